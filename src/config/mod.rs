#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::domain::model::TripQuery;

/// Pairs flat `FROM TO FROM TO ...` tokens into trips; a trailing odd token is dropped.
pub fn trip_pairs(tokens: &[String]) -> Vec<TripQuery> {
    tokens
        .chunks_exact(2)
        .map(|pair| TripQuery::new(pair[0].as_str(), pair[1].as_str()))
        .collect()
}
