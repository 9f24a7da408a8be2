pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::http::MbtaClient;
pub use crate::core::{
    engine::ReportEngine,
    finder::find_route,
    graph::{GraphBuilder, TransitGraph},
    report::{Report, TripOutcome},
};
pub use domain::model::{OutputFormat, Route, RouteStrategy, Stop, TripQuery};
pub use utils::error::{Result, TransitError};
