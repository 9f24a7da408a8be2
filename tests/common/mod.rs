#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub const ROUTES: &[(&str, &str, &[&str])] = &[
    (
        "Red",
        "Red Line",
        &["place-alfcl", "place-davis", "place-harsq", "place-knncl", "place-pktrm", "place-dwnxg", "place-asmnl"],
    ),
    ("Mattapan", "Mattapan Trolley", &["place-asmnl", "place-matt"]),
    ("Orange", "Orange Line", &["place-welln", "place-state", "place-dwnxg", "place-chncl"]),
    ("Blue", "Blue Line", &["place-bmmnl", "place-aport", "place-aqucl", "place-state", "place-gover"]),
    ("Green-B", "Green Line B", &["place-gover", "place-pktrm", "place-armnl"]),
];

pub const STOPS: &[(&str, &str, Option<&str>)] = &[
    ("place-alfcl", "Alewife", None),
    ("place-davis", "Davis", None),
    ("70063", "Davis", Some("place-davis")),
    ("place-harsq", "Harvard", None),
    ("place-knncl", "Kendall/MIT", None),
    ("place-pktrm", "Park Street", None),
    ("place-dwnxg", "Downtown Crossing", None),
    ("place-asmnl", "Ashmont", None),
    ("place-matt", "Mattapan", None),
    ("place-welln", "Wellington", None),
    ("place-state", "State", None),
    ("place-chncl", "Chinatown", None),
    ("place-bmmnl", "Beachmont", None),
    ("place-aport", "Airport", None),
    ("place-aqucl", "Aquarium", None),
    ("place-gover", "Government Center", None),
    ("place-armnl", "Arlington", None),
];

fn stop_json(id: &str, name: &str, parent: Option<&str>) -> Value {
    json!({
        "id": id,
        "type": "stop",
        "attributes": {"name": name},
        "relationships": {
            "parent_station": {"data": parent.map(|p| json!({"id": p, "type": "stop"}))}
        }
    })
}

fn stop_name(id: &str) -> &'static str {
    STOPS
        .iter()
        .find(|(stop_id, ..)| *stop_id == id)
        .map(|(_, name, _)| *name)
        .unwrap_or("Unknown")
}

/// Mocks for every request a full run makes against the network above.
pub struct MbtaMocks<'a> {
    pub routes: Mock<'a>,
    pub route_stops: Vec<Mock<'a>>,
    pub stops: Mock<'a>,
}

impl MbtaMocks<'_> {
    pub fn assert_all(&self) {
        self.routes.assert();
        for mock in &self.route_stops {
            mock.assert();
        }
        self.stops.assert();
    }
}

pub fn mount_subway(server: &MockServer) -> MbtaMocks<'_> {
    let routes_body = json!({
        "data": ROUTES
            .iter()
            .map(|(id, name, _)| json!({
                "id": id,
                "type": "route",
                "attributes": {"long_name": name},
                "relationships": {"line": {"data": {"id": format!("line-{}", id), "type": "line"}}}
            }))
            .collect::<Vec<_>>()
    });
    let routes = server.mock(|when, then| {
        when.method(GET)
            .path("/routes")
            .query_param("filter[type]", "0,1")
            .query_param("fields[route]", "long_name");
        then.status(200)
            .header("Content-Type", "application/vnd.api+json")
            .json_body(routes_body);
    });

    let route_stops = ROUTES
        .iter()
        .map(|(route_id, _, stop_ids)| {
            let body = json!({
                "data": stop_ids
                    .iter()
                    .map(|id| stop_json(id, stop_name(id), None))
                    .collect::<Vec<_>>()
            });
            server.mock(|when, then| {
                when.method(GET).path("/stops").query_param("filter[route]", *route_id);
                then.status(200).json_body(body);
            })
        })
        .collect();

    let stops_body = json!({
        "data": STOPS
            .iter()
            .map(|(id, name, parent)| stop_json(id, name, *parent))
            .collect::<Vec<_>>()
    });
    let stops = server.mock(|when, then| {
        when.method(GET).path("/stops").query_param("filter[route_type]", "0,1");
        then.status(200).json_body(stops_body);
    });

    MbtaMocks {
        routes,
        route_stops,
        stops,
    }
}
