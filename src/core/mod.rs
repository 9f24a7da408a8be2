pub mod engine;
pub mod finder;
pub mod graph;
pub mod report;
pub mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

pub use crate::domain::model::{Route, RouteStrategy, Stop, TripQuery};
pub use crate::domain::ports::{ConfigProvider, TransitSource};
pub use crate::utils::error::Result;
