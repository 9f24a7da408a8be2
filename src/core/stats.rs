use crate::core::graph::TransitGraph;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStopCount {
    pub name: String,
    pub num_stops: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopCountExtremes {
    pub most: RouteStopCount,
    pub fewest: RouteStopCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectingStop {
    pub name: String,
    pub routes: Vec<String>,
}

pub fn route_names(graph: &TransitGraph) -> Vec<String> {
    graph.routes().map(|route| route.name.clone()).collect()
}

/// Routes with the most and the fewest stops, or `None` for an empty graph.
///
/// Ties go to the route seen last in graph order.
pub fn route_with_extreme_stop_counts(graph: &TransitGraph) -> Option<StopCountExtremes> {
    let mut routes = graph.routes();
    let first = routes.next()?;
    let (mut most, mut fewest) = (first, first);

    for route in routes {
        if route.num_stops() >= most.num_stops() {
            most = route;
        }
        if route.num_stops() <= fewest.num_stops() {
            fewest = route;
        }
    }

    Some(StopCountExtremes {
        most: RouteStopCount {
            name: most.name.clone(),
            num_stops: most.num_stops(),
        },
        fewest: RouteStopCount {
            name: fewest.name.clone(),
            num_stops: fewest.num_stops(),
        },
    })
}

/// Stops served by two or more routes, in graph order.
pub fn connecting_stops(graph: &TransitGraph) -> Vec<ConnectingStop> {
    graph
        .stops()
        .filter(|stop| stop.is_connecting())
        .map(|stop| ConnectingStop {
            name: stop.name.clone(),
            routes: stop
                .route_ids
                .iter()
                .map(|id| graph.route_name(id).to_string())
                .collect(),
        })
        .collect()
}
