//! JSON:API documents as returned by the MBTA v3 API.
//!
//! Only the members this crate reads are modelled; everything else is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<ResourceIdentifier>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: String,
    #[serde(default)]
    pub attributes: RouteAttributes,
    #[serde(default)]
    pub relationships: RouteRelationships,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteAttributes {
    #[serde(default)]
    pub long_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteRelationships {
    #[serde(default)]
    pub line: Option<Relationship>,
}

impl RouteResource {
    /// `long_name`, or the id when the API leaves it blank.
    pub fn display_name(&self) -> &str {
        match self.attributes.long_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.id,
        }
    }

    pub fn line_id(&self) -> Option<&str> {
        self.relationships
            .line
            .as_ref()
            .and_then(|rel| rel.data.as_ref())
            .map(|data| data.id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    pub id: String,
    pub attributes: StopAttributes,
    #[serde(default)]
    pub relationships: StopRelationships,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopAttributes {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopRelationships {
    #[serde(default)]
    pub parent_station: Option<Relationship>,
}

impl StopResource {
    pub fn parent_station_id(&self) -> Option<&str> {
        self.relationships
            .parent_station
            .as_ref()
            .and_then(|rel| rel.data.as_ref())
            .map(|data| data.id.as_str())
    }
}
