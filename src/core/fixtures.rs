//! A cut-down MBTA subway network shared by the core unit tests.

use crate::core::graph::TransitGraph;
use crate::domain::model::Route;
use crate::domain::ports::TransitSource;
use crate::domain::resources::{RouteResource, StopResource};
use crate::utils::error::{Result, TransitError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ROUTES: &[(&str, &str, &str, &[&str])] = &[
    (
        "Red",
        "Red Line",
        "line-Red",
        &[
            "place-alfcl",
            "place-davis",
            "place-harsq",
            "place-knncl",
            "place-pktrm",
            "place-dwnxg",
            "place-asmnl",
            "place-brntn",
        ],
    ),
    (
        "Mattapan",
        "Mattapan Trolley",
        "line-Mattapan",
        &["place-asmnl", "place-cedgr", "place-matt"],
    ),
    (
        "Orange",
        "Orange Line",
        "line-Orange",
        &["place-ogmnl", "place-welln", "place-state", "place-dwnxg", "place-chncl"],
    ),
    (
        "Blue",
        "Blue Line",
        "line-Blue",
        &[
            "place-wondl",
            "place-bmmnl",
            "place-aport",
            "place-aqucl",
            "place-state",
            "place-gover",
        ],
    ),
    (
        "Green-B",
        "Green Line B",
        "line-Green",
        &["place-gover", "place-pktrm", "place-boyls", "place-armnl"],
    ),
    (
        "Green-E",
        "Green Line E",
        "line-Green",
        &["place-gover", "place-pktrm", "place-armnl", "place-rivwy"],
    ),
];

/// `(id, name, parent_station)` in API order.
pub const STOP_RECORDS: &[(&str, &str, Option<&str>)] = &[
    ("place-alfcl", "Alewife", None),
    ("place-davis", "Davis", None),
    ("70063", "Davis", Some("place-davis")),
    ("70068", "Harvard", Some("place-harsq")),
    ("place-harsq", "Harvard", None),
    ("place-knncl", "Kendall/MIT", None),
    ("place-pktrm", "Park Street", None),
    ("place-dwnxg", "Downtown Crossing", None),
    ("place-asmnl", "Ashmont", None),
    ("place-brntn", "Braintree", None),
    ("place-cedgr", "Cedar Grove", None),
    ("place-matt", "Mattapan", None),
    ("place-ogmnl", "Oak Grove", None),
    ("place-welln", "Wellington", None),
    ("place-state", "State", None),
    ("place-chncl", "Chinatown", None),
    ("place-wondl", "Wonderland", None),
    ("place-bmmnl", "Beachmont", None),
    ("place-aport", "Airport", None),
    ("place-aqucl", "Aquarium", None),
    ("place-gover", "Government Center", None),
    ("place-boyls", "Boylston", None),
    ("place-armnl", "Arlington", None),
    ("place-rivwy", "Riverway", None),
];

pub fn subway_graph() -> TransitGraph {
    let mut graph = TransitGraph::new();
    for (id, name, line, stops) in ROUTES {
        let mut route = Route::new(*id, *name).with_stops(stops.iter().copied());
        route.line_id = Some(line.to_string());
        graph.insert_route(route);
    }
    for (id, name, parent) in STOP_RECORDS {
        graph.add_stop(id, name, *parent);
    }
    graph
}

fn stop_resource(id: &str, name: &str, parent: Option<&str>) -> StopResource {
    let parent = parent.map(|id| serde_json::json!({"id": id, "type": "stop"}));
    serde_json::from_value(serde_json::json!({
        "id": id,
        "attributes": {"name": name},
        "relationships": {"parent_station": {"data": parent}}
    }))
    .expect("fixture stop")
}

/// Serves the fixture network and counts per-route stop requests.
#[derive(Default)]
pub struct FixtureSource {
    route_stop_requests: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route_stop_requests(&self) -> usize {
        self.route_stop_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransitSource for FixtureSource {
    async fn fetch_routes(&self, _route_types: &[u8]) -> Result<Vec<RouteResource>> {
        Ok(ROUTES
            .iter()
            .map(|(id, name, line, _)| {
                serde_json::from_value(serde_json::json!({
                    "id": id,
                    "attributes": {"long_name": name},
                    "relationships": {"line": {"data": {"id": line, "type": "line"}}}
                }))
                .expect("fixture route")
            })
            .collect())
    }

    async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<StopResource>> {
        self.route_stop_requests.fetch_add(1, Ordering::SeqCst);
        let (_, _, _, stops) = ROUTES
            .iter()
            .find(|(id, ..)| *id == route_id)
            .ok_or_else(|| TransitError::ApiStatus {
                status: 404,
                url: format!("fixture://stops?filter[route]={}", route_id),
            })?;
        Ok(stops.iter().map(|id| stop_resource(id, id, None)).collect())
    }

    async fn fetch_stops(&self, _route_types: &[u8]) -> Result<Vec<StopResource>> {
        Ok(STOP_RECORDS
            .iter()
            .map(|(id, name, parent)| stop_resource(id, name, *parent))
            .collect())
    }
}
