use crate::core::finder::find_route;
use crate::core::graph::{GraphBuilder, TransitGraph};
use crate::core::report::{Report, TripOutcome};
use crate::core::stats;
use crate::domain::model::{RouteStrategy, TripQuery};
use crate::domain::ports::{ConfigProvider, TransitSource};
use crate::utils::error::{Result, TransitError};
use crate::utils::monitor::RunMonitor;

pub struct ReportEngine<S: TransitSource> {
    source: S,
    route_types: Vec<u8>,
    trips: Vec<TripQuery>,
    strategy: RouteStrategy,
    monitor: RunMonitor,
}

impl<S: TransitSource> ReportEngine<S> {
    pub fn new(source: S, route_types: &[u8]) -> Self {
        Self {
            source,
            route_types: route_types.to_vec(),
            trips: Vec::new(),
            strategy: RouteStrategy::default(),
            monitor: RunMonitor::new(false),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(source: S, config: &C) -> Self {
        Self::new(source, config.route_types())
            .with_trips(config.trips())
            .with_strategy(config.strategy())
    }

    pub fn with_trips(mut self, trips: Vec<TripQuery>) -> Self {
        self.trips = trips;
        self
    }

    pub fn with_strategy(mut self, strategy: RouteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = RunMonitor::new(enabled);
        self
    }

    pub async fn build_graph(&self) -> Result<TransitGraph> {
        let builder = GraphBuilder::new(&self.source, &self.route_types);
        let mut graph = TransitGraph::new();

        tracing::info!("Loading routes...");
        builder.load_routes(&mut graph).await?;
        self.monitor.finish_phase("load routes");
        if graph.is_empty() {
            return Err(TransitError::EmptyNetwork);
        }

        tracing::info!("Loading stops...");
        builder.load_stops(&mut graph).await?;
        self.monitor.finish_phase("load stops");

        Ok(graph)
    }

    pub fn report(&self, graph: &TransitGraph) -> Result<Report> {
        let stop_counts =
            stats::route_with_extreme_stop_counts(graph).ok_or(TransitError::EmptyNetwork)?;
        let connecting_stops = stats::connecting_stops(graph);
        tracing::info!("{} stops connect two or more routes", connecting_stops.len());
        self.monitor.finish_phase("statistics");

        let trips = self
            .trips
            .iter()
            .map(|trip| match find_route(graph, &trip.from, &trip.to, self.strategy) {
                Ok(routes) => TripOutcome::found(&trip.from, &trip.to, routes),
                Err(e) => {
                    tracing::warn!("Trip {} -> {} failed: {}", trip.from, trip.to, e);
                    TripOutcome::failed(&trip.from, &trip.to, e.user_friendly_message())
                }
            })
            .collect();
        self.monitor.finish_phase("trips");

        Ok(Report {
            route_names: stats::route_names(graph),
            stop_counts,
            connecting_stops,
            trips,
        })
    }

    pub async fn run(&self) -> Result<Report> {
        let graph = self.build_graph().await?;
        tracing::info!(
            "Built graph with {} routes and {} stops",
            graph.route_count(),
            graph.stop_count()
        );

        let report = self.report(&graph)?;
        self.monitor.log_summary();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::FixtureSource;
    use crate::domain::resources::{RouteResource, StopResource};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct EmptySource {
        stop_requests: AtomicUsize,
    }

    #[async_trait]
    impl TransitSource for EmptySource {
        async fn fetch_routes(&self, _route_types: &[u8]) -> Result<Vec<RouteResource>> {
            Ok(Vec::new())
        }

        async fn fetch_route_stops(&self, _route_id: &str) -> Result<Vec<StopResource>> {
            self.stop_requests.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn fetch_stops(&self, _route_types: &[u8]) -> Result<Vec<StopResource>> {
            self.stop_requests.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_run_reports_all_sections() {
        let engine = ReportEngine::new(FixtureSource::new(), &[0, 1]).with_trips(vec![
            TripQuery::new("Davis", "Kendall/MIT"),
            TripQuery::new("Ashmont", "Arlington"),
        ]);

        let report = engine.run().await.unwrap();

        assert_eq!(report.route_names.len(), 6);
        assert_eq!(report.stop_counts.most.name, "Red Line");
        assert_eq!(report.connecting_stops.len(), 6);
        assert_eq!(report.trips[0].routes, Some(vec!["Red Line".to_string()]));
        assert_eq!(report.trips[1].routes.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_failed_trip_does_not_abort_run() {
        let engine = ReportEngine::new(FixtureSource::new(), &[0, 1]).with_trips(vec![
            TripQuery::new("Davis", "Hogwarts"),
            TripQuery::new("Airport", "Harvard"),
        ]);

        let report = engine.run().await.unwrap();

        assert!(report.trips[0].error.as_deref().unwrap().contains("Hogwarts"));
        assert!(report.trips[1].routes.is_none());
        assert!(report.trips[1].error.is_some());
    }

    #[tokio::test]
    async fn test_breadth_first_strategy_is_used_for_trips() {
        let engine = ReportEngine::new(FixtureSource::new(), &[0, 1])
            .with_trips(vec![TripQuery::new("Airport", "Harvard")])
            .with_strategy(RouteStrategy::BreadthFirst);

        let report = engine.run().await.unwrap();

        assert_eq!(report.trips[0].routes.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_empty_network_is_an_error() {
        let engine = ReportEngine::new(EmptySource::default(), &[0, 1]);
        assert!(matches!(engine.run().await, Err(TransitError::EmptyNetwork)));
        assert_eq!(engine.source.stop_requests.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_report_on_empty_graph_is_an_error() {
        let engine = ReportEngine::new(EmptySource::default(), &[0, 1]);
        assert!(matches!(
            engine.report(&TransitGraph::new()),
            Err(TransitError::EmptyNetwork)
        ));
    }
}
