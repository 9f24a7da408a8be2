use crate::domain::model::{RouteStrategy, TripQuery};
use crate::domain::resources::{RouteResource, StopResource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Where route and stop records come from.
#[async_trait]
pub trait TransitSource: Send + Sync {
    async fn fetch_routes(&self, route_types: &[u8]) -> Result<Vec<RouteResource>>;
    async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<StopResource>>;
    async fn fetch_stops(&self, route_types: &[u8]) -> Result<Vec<StopResource>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn route_types(&self) -> &[u8];
    fn page_limit(&self) -> Option<usize>;
    fn request_timeout(&self) -> Duration;
    fn retry_attempts(&self) -> u32;
    fn retry_delay(&self) -> Duration;
    fn trips(&self) -> Vec<TripQuery>;
    fn strategy(&self) -> RouteStrategy;
}
