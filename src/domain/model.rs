use serde::{Deserialize, Serialize};

/// MBTA route types for Light Rail (0) and Heavy Rail (1).
pub const SUBWAY_ROUTE_TYPES: &[u8] = &[0, 1];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub id: String,
    pub name: String,
    pub line_id: Option<String>,
    pub stop_ids: Vec<String>,
}

impl Route {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            line_id: None,
            stop_ids: Vec::new(),
        }
    }

    pub fn with_stops<I, S>(mut self, stop_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_ids = stop_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn num_stops(&self) -> usize {
        self.stop_ids.len()
    }

    /// True when this route lists either the platform id or its parent station.
    pub fn has_stop(&self, stop_id: &str, parent_station: Option<&str>) -> bool {
        self.stop_ids
            .iter()
            .any(|id| id == stop_id || Some(id.as_str()) == parent_station)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub parent_station: Option<String>,
    /// Ids of later records that were merged into this stop.
    pub merged_ids: Vec<String>,
    /// Owning routes, in graph route order.
    pub route_ids: Vec<String>,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_station: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_station,
            merged_ids: Vec::new(),
            route_ids: Vec::new(),
        }
    }

    /// Platforms sharing a parent station collapse onto the parent's id.
    pub fn canonical_key(&self) -> &str {
        self.parent_station.as_deref().unwrap_or(&self.id)
    }

    /// Whether `route` lists this stop under any of its ids.
    pub fn is_on(&self, route: &Route) -> bool {
        route.has_stop(&self.id, self.parent_station.as_deref())
            || self.merged_ids.iter().any(|id| route.has_stop(id, None))
    }

    pub fn is_connecting(&self) -> bool {
        self.route_ids.len() >= 2
    }

    pub fn serves(&self, route_id: &str) -> bool {
        self.route_ids.iter().any(|id| id == route_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripQuery {
    pub from: String,
    pub to: String,
}

impl TripQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Sample trips planned when none are configured.
    pub fn defaults() -> Vec<TripQuery> {
        vec![
            TripQuery::new("Davis", "Kendall/MIT"),
            TripQuery::new("Ashmont", "Arlington"),
            TripQuery::new("Aquarium", "Chinatown"),
            TripQuery::new("Riverway", "Beachmont"),
            TripQuery::new("Wellington", "Braintree"),
            TripQuery::new("Airport", "Harvard"),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum RouteStrategy {
    /// Direct route, or a single transfer at a connecting stop.
    #[default]
    Transfer,
    /// Fewest routes over the route adjacency graph.
    BreadthFirst,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
