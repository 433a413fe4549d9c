//! Configuration management for the box office.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::types::Movie;
use serde::{Deserialize, Serialize};
use std::env;

/// Catalog loaded when `BOX_OFFICE_MOVIES` is unset
pub const DEFAULT_CATALOG: &str = "Avengers=5,Inception=3,Titanic=0";

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "box_office=info,box_office_runtime=warn";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Movies added to the registry at startup
    pub movies: Vec<Movie>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `BOX_OFFICE_MOVIES`: comma-separated `Title=count` pairs
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            movies: parse_catalog(
                &env::var("BOX_OFFICE_MOVIES").unwrap_or_else(|_| DEFAULT_CATALOG.to_string()),
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movies: parse_catalog(DEFAULT_CATALOG),
        }
    }
}

/// Parse a `Title=count,Title=count` catalog.
///
/// Malformed entries are skipped with a warning; blank entries are ignored.
#[must_use]
pub fn parse_catalog(catalog: &str) -> Vec<Movie> {
    catalog
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let parsed = entry.split_once('=').and_then(|(title, count)| {
                let title = title.trim();
                let count = count.trim().parse::<u32>().ok()?;
                (!title.is_empty()).then(|| Movie::new(title, count))
            });
            if parsed.is_none() {
                tracing::warn!(entry, "Skipping malformed catalog entry");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_matches_demo() {
        let config = Config::default();
        assert_eq!(
            config.movies,
            vec![
                Movie::new("Avengers", 5),
                Movie::new("Inception", 3),
                Movie::new("Titanic", 0),
            ]
        );
    }

    #[test]
    fn catalog_trims_whitespace() {
        assert_eq!(
            parse_catalog(" The Matrix = 7 , Up=1,"),
            vec![Movie::new("The Matrix", 7), Movie::new("Up", 1)]
        );
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert_eq!(
            parse_catalog("Heat,Jaws=-1,=4,Alien=2"),
            vec![Movie::new("Alien", 2)]
        );
    }

    #[test]
    fn empty_catalog() {
        assert!(parse_catalog("").is_empty());
    }
}
