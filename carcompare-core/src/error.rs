//! Error types for the catalog and comparison engines

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::EntityId;

/// Failures while loading catalog data or configuration
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The data file could not be read
    #[error("Failed to read catalog data from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a JSON array of brands
    #[error("Failed to parse catalog data (expected a JSON array of brands)")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// A configuration file could not be parsed
    #[error("Failed to parse configuration file {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// `reload` was called on a store that was never loaded from a file
    #[error("Catalog has no data source to reload from")]
    NoSource,
}

/// Rejected comparison requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("At least one trim id is required for a comparison")]
    TooFewTrims,

    #[error("Can compare at most {max} trims (got {requested})")]
    TooManyTrims { requested: usize, max: usize },

    #[error("None of the requested trims exist: {requested:?}")]
    NoTrimsResolved { requested: Vec<EntityId> },
}
