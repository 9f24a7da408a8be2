use crate::core::stats::{ConnectingStop, StopCountExtremes};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripOutcome {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TripOutcome {
    pub fn found(from: &str, to: &str, routes: Vec<String>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            routes: Some(routes),
            error: None,
        }
    }

    pub fn failed(from: &str, to: &str, error: String) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            routes: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub route_names: Vec<String>,
    pub stop_counts: StopCountExtremes,
    pub connecting_stops: Vec<ConnectingStop>,
    pub trips: Vec<TripOutcome>,
}

impl Report {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", "#".repeat(70))?;
    writeln!(f, "{}", title)?;
    writeln!(f)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "Subway routes")?;
        writeln!(f, "{}", self.route_names.join(", "))?;
        writeln!(f)?;

        section(f, "Stop counts")?;
        writeln!(
            f,
            "Route {} has the most stops with {} stops.",
            self.stop_counts.most.name, self.stop_counts.most.num_stops
        )?;
        writeln!(
            f,
            "Route {} has the fewest stops with {} stops.",
            self.stop_counts.fewest.name, self.stop_counts.fewest.num_stops
        )?;
        writeln!(f)?;
        writeln!(f, "Stops connecting two or more subway routes:")?;
        for stop in &self.connecting_stops {
            writeln!(f, "\tStop: {}, Routes: {}", stop.name, stop.routes.join(", "))?;
        }
        writeln!(f)?;

        section(f, "Trips")?;
        for trip in &self.trips {
            match (&trip.routes, &trip.error) {
                (Some(routes), _) => writeln!(
                    f,
                    "To get from '{}' to '{}', take these routes: {}",
                    trip.from,
                    trip.to,
                    routes.join(", ")
                )?,
                (None, Some(error)) => {
                    writeln!(f, "No route from '{}' to '{}': {}", trip.from, trip.to, error)?
                }
                (None, None) => writeln!(f, "No route from '{}' to '{}'", trip.from, trip.to)?,
            }
        }
        Ok(())
    }
}
