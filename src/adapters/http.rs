use crate::domain::ports::{ConfigProvider, TransitSource};
use crate::domain::resources::{Document, RouteResource, StopResource};
use crate::utils::error::{Result, TransitError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Path plus JSON:API query parameters for one resource collection.
#[derive(Debug, Clone)]
pub struct ResourceQuery {
    path: String,
    params: Vec<(String, String)>,
}

impl ResourceQuery {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    pub fn filter(self, name: &str, value: impl Into<String>) -> Self {
        self.param(format!("filter[{}]", name), value)
    }

    pub fn fields(self, resource_type: &str, fields: &[&str]) -> Self {
        self.param(format!("fields[{}]", resource_type), fields.join(","))
    }

    pub fn include(self, relationships: &[&str]) -> Self {
        self.param("include", relationships.join(","))
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn join_route_types(route_types: &[u8]) -> String {
    route_types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Drops the API key so URLs can be logged and put into errors.
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "api_key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        shown.set_query(None);
    } else {
        shown.query_pairs_mut().clear().extend_pairs(kept);
    }
    shown.to_string()
}

/// Client for the MBTA v3 API. Requests are sent one at a time.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    page_limit: Option<usize>,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl MbtaClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| TransitError::InvalidConfigValueError {
            field: "api_base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: None,
            page_limit: None,
            retry_attempts: 0,
            retry_delay: Duration::from_millis(500),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        let mut this = Self::new(config.api_base_url())?
            .with_page_limit(config.page_limit())
            .with_retry(config.retry_attempts(), config.retry_delay());
        this.client = client;
        if let Some(key) = config.api_key() {
            this = this.with_api_key(key);
        }
        Ok(this)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_page_limit(mut self, page_limit: Option<usize>) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    fn resource_url(&self, query: &ResourceQuery) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransitError::ConfigError {
                message: format!("API base URL cannot have a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(query.path());

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query.params {
                pairs.append_pair(key, value);
            }
            if let Some(limit) = self.page_limit {
                pairs.append_pair("page[limit]", &limit.to_string());
                pairs.append_pair("page[offset]", "0");
            }
            if let Some(key) = &self.api_key {
                pairs.append_pair("api_key", key);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    /// Fetches every `data` entry for the query, following `links.next` when paging.
    pub async fn get_collection<T: DeserializeOwned>(&self, query: &ResourceQuery) -> Result<Vec<T>> {
        let mut url = self.resource_url(query)?;
        let mut data = Vec::new();

        loop {
            let document: Document<T> = self.get_with_retry(&url, query.path()).await?;
            data.extend(document.data);

            let next = match (self.page_limit, document.links.and_then(|links| links.next)) {
                (Some(_), Some(next)) => next,
                _ => break,
            };
            let mut next_url = url
                .join(&next)
                .map_err(|e| TransitError::MalformedResponse {
                    resource: query.path().to_string(),
                    message: format!("invalid pagination link '{}': {}", next, e),
                })?;
            self.ensure_api_key(&mut next_url);
            if next_url == url {
                break;
            }
            url = next_url;
        }

        tracing::debug!("Fetched {} {} records", data.len(), query.path());
        Ok(data)
    }

    /// Pagination links are not guaranteed to carry the key.
    fn ensure_api_key(&self, url: &mut Url) {
        if let Some(key) = &self.api_key {
            if !url.query_pairs().any(|(k, _)| k == "api_key") {
                url.query_pairs_mut().append_pair("api_key", key);
            }
        }
    }

    async fn get_with_retry<T: DeserializeOwned>(&self, url: &Url, resource: &str) -> Result<Document<T>> {
        let mut attempt = 0;
        loop {
            match self.get_once(url, resource).await {
                Ok(document) => return Ok(document),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    let delay = self.retry_delay * attempt;
                    tracing::warn!(
                        "Request for {} failed ({}), retry {}/{} in {:?}",
                        resource,
                        e,
                        attempt,
                        self.retry_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url, resource: &str) -> Result<Document<T>> {
        tracing::debug!("GET {}", redact(url));
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(TransitError::ApiStatus {
                status: status.as_u16(),
                url: redact(url),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TransitError::MalformedResponse {
            resource: resource.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TransitSource for MbtaClient {
    async fn fetch_routes(&self, route_types: &[u8]) -> Result<Vec<RouteResource>> {
        let query = ResourceQuery::new("routes")
            .filter("type", join_route_types(route_types))
            .fields("route", &["long_name"])
            .include(&["line"]);
        self.get_collection(&query).await
    }

    async fn fetch_route_stops(&self, route_id: &str) -> Result<Vec<StopResource>> {
        let query = ResourceQuery::new("stops").filter("route", route_id);
        self.get_collection(&query).await
    }

    async fn fetch_stops(&self, route_types: &[u8]) -> Result<Vec<StopResource>> {
        let query = ResourceQuery::new("stops").filter("route_type", join_route_types(route_types));
        self.get_collection(&query).await
    }
}
