use crate::domain::model::{Route, Stop};
use crate::domain::ports::TransitSource;
use crate::domain::resources::StopResource;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Routes and stops of one network, in insertion order.
///
/// Every stop's `route_ids` is kept equal to the set of routes that list the
/// stop under its own id, its parent station, or any merged platform id.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    routes: Vec<Route>,
    route_index: HashMap<String, usize>,
    stops: Vec<Stop>,
    stop_index: HashMap<String, usize>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route, or replaces one with the same id, and relinks every stop.
    pub fn insert_route(&mut self, route: Route) {
        match self.route_index.get(&route.id).copied() {
            Some(idx) => self.routes[idx] = route,
            None => {
                self.route_index.insert(route.id.clone(), self.routes.len());
                self.routes.push(route);
            }
        }

        for idx in 0..self.stops.len() {
            self.relink_stop(idx);
        }
    }

    /// Adds a stop record, merging it into an existing stop that has the same
    /// canonical key (parent station if present, otherwise its own id).
    ///
    /// Returns `true` when the record created a new stop.
    pub fn add_stop(&mut self, id: &str, name: &str, parent_station: Option<&str>) -> bool {
        let candidate = Stop::new(id, name, parent_station.map(str::to_string));
        let key = candidate.canonical_key().to_string();

        let (idx, created) = match self.stop_index.get(&key).copied() {
            Some(idx) => {
                let stop = &mut self.stops[idx];
                if stop.id != id && !stop.merged_ids.iter().any(|m| m == id) {
                    tracing::debug!("Merging stop record {} into {} ({})", id, stop.id, stop.name);
                    stop.merged_ids.push(id.to_string());
                }
                (idx, false)
            }
            None => {
                let idx = self.stops.len();
                self.stops.push(candidate);
                self.stop_index.insert(key, idx);
                (idx, true)
            }
        };

        self.relink_stop(idx);
        created
    }

    fn relink_stop(&mut self, idx: usize) {
        let stop = &self.stops[idx];
        let route_ids: Vec<String> = self
            .routes
            .iter()
            .filter(|route| stop.is_on(route))
            .map(|route| route.id.clone())
            .collect();
        self.stops[idx].route_ids = route_ids;
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.route_index.get(id).map(|&idx| &self.routes[idx])
    }

    /// Looks a stop up by its canonical key.
    pub fn stop(&self, key: &str) -> Option<&Stop> {
        self.stop_index.get(key).map(|&idx| &self.stops[idx])
    }

    /// First stop, in insertion order, whose display name matches exactly.
    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.name == name)
    }

    /// Display name of a route, or the id itself for an unknown route.
    pub fn route_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.route(id).map(|route| route.name.as_str()).unwrap_or(id)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Populates a [`TransitGraph`] from a [`TransitSource`].
pub struct GraphBuilder<'a, S: TransitSource + ?Sized> {
    source: &'a S,
    route_types: Vec<u8>,
}

impl<'a, S: TransitSource + ?Sized> GraphBuilder<'a, S> {
    pub fn new(source: &'a S, route_types: &[u8]) -> Self {
        Self {
            source,
            route_types: route_types.to_vec(),
        }
    }

    /// Loads every route of the configured types with one stop request per route.
    pub async fn load_routes(&self, graph: &mut TransitGraph) -> Result<usize> {
        let records = self.source.fetch_routes(&self.route_types).await?;
        tracing::info!("Found {} routes of types {:?}", records.len(), self.route_types);

        let mut loaded = 0;
        for record in records {
            let stops = self.source.fetch_route_stops(&record.id).await?;
            let mut route = Route::new(record.id.as_str(), record.display_name())
                .with_stops(stops.iter().map(|stop| stop.id.as_str()));
            route.line_id = record.line_id().map(str::to_string);

            tracing::debug!("Route {} ({}) has {} stops", route.id, route.name, route.num_stops());
            graph.insert_route(route);
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Loads every stop of the configured route types and links it to its routes.
    pub async fn load_stops(&self, graph: &mut TransitGraph) -> Result<usize> {
        let records = self.source.fetch_stops(&self.route_types).await?;
        let total = records.len();
        let created = add_stop_records(graph, &records);

        tracing::info!(
            "Loaded {} stops from {} records ({} merged by parent station)",
            created,
            total,
            total - created
        );
        Ok(created)
    }

    pub async fn build(&self) -> Result<TransitGraph> {
        let mut graph = TransitGraph::new();
        self.load_routes(&mut graph).await?;
        self.load_stops(&mut graph).await?;
        Ok(graph)
    }
}

fn add_stop_records(graph: &mut TransitGraph, records: &[StopResource]) -> usize {
    records
        .iter()
        .filter(|record| graph.add_stop(&record.id, &record.attributes.name, record.parent_station_id()))
        .count()
}
