use crate::core::graph::TransitGraph;
use crate::domain::model::{RouteStrategy, Stop};
use crate::utils::error::{Result, TransitError};
use std::collections::{HashMap, VecDeque};

/// Route names to ride, in order, to get from stop `from` to stop `to`.
///
/// Stops are looked up by exact display name. Neither strategy produces a
/// stop-by-stop itinerary, only the routes to take.
pub fn find_route(
    graph: &TransitGraph,
    from: &str,
    to: &str,
    strategy: RouteStrategy,
) -> Result<Vec<String>> {
    let stop_a = resolve(graph, from)?;
    let stop_b = resolve(graph, to)?;

    let hops = match strategy {
        RouteStrategy::Transfer => transfer_route(graph, stop_a, stop_b),
        RouteStrategy::BreadthFirst => breadth_first_route(graph, stop_a, stop_b),
    }
    .ok_or_else(|| TransitError::NoRouteFound {
        from: from.to_string(),
        to: to.to_string(),
    })?;

    let names: Vec<String> = hops
        .into_iter()
        .map(|id| graph.route_name(id).to_string())
        .collect();
    tracing::debug!("{} -> {} via {:?} ({:?})", from, to, names, strategy);
    Ok(names)
}

fn resolve<'g>(graph: &'g TransitGraph, name: &str) -> Result<&'g Stop> {
    graph.stop_by_name(name).ok_or_else(|| TransitError::StopNotFound {
        name: name.to_string(),
    })
}

fn first_shared<'s>(a: &'s Stop, b: &Stop) -> Option<&'s str> {
    a.route_ids
        .iter()
        .find(|id| b.serves(id))
        .map(String::as_str)
}

/// A shared route if there is one, otherwise one transfer at the first
/// connecting stop that touches both stops' routes. Misses trips that need
/// two transfers.
fn transfer_route<'g>(graph: &'g TransitGraph, a: &'g Stop, b: &'g Stop) -> Option<Vec<&'g str>> {
    if let Some(direct) = first_shared(a, b) {
        return Some(vec![direct]);
    }

    graph
        .stops()
        .filter(|stop| stop.is_connecting())
        .find_map(|transfer| {
            let first_leg = first_shared(transfer, a)?;
            let second_leg = first_shared(transfer, b)?;
            Some(vec![first_leg, second_leg])
        })
}

/// Fewest-routes search over the graph whose nodes are routes and whose edges
/// join two routes sharing a stop.
fn breadth_first_route<'g>(graph: &'g TransitGraph, a: &'g Stop, b: &'g Stop) -> Option<Vec<&'g str>> {
    let adjacency = route_adjacency(graph);

    let mut previous: HashMap<&str, Option<&str>> = HashMap::new();
    let mut queue = VecDeque::new();
    for id in &a.route_ids {
        if previous.insert(id.as_str(), None).is_none() {
            queue.push_back(id.as_str());
        }
    }

    while let Some(route) = queue.pop_front() {
        if b.serves(route) {
            let mut path = vec![route];
            let mut current = route;
            while let Some(&Some(prev)) = previous.get(current) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            return Some(path);
        }

        for &next in adjacency.get(route).into_iter().flatten() {
            if !previous.contains_key(next) {
                previous.insert(next, Some(route));
                queue.push_back(next);
            }
        }
    }

    None
}

/// Neighbours of each route, in the order the shared stops appear.
fn route_adjacency(graph: &TransitGraph) -> HashMap<&str, Vec<&str>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for stop in graph.stops().filter(|stop| stop.is_connecting()) {
        for route in &stop.route_ids {
            let neighbours = adjacency.entry(route.as_str()).or_default();
            for other in &stop.route_ids {
                if other != route && !neighbours.contains(&other.as_str()) {
                    neighbours.push(other.as_str());
                }
            }
        }
    }
    adjacency
}
