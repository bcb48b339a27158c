//! Error types for `dungeon-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown table: {0:?} (expected Locations, Connections or Sessions)")]
  UnknownTable(String),
}

/// Why a seed document could not be parsed.
#[derive(Debug, Error)]
pub enum SeedError {
  #[error("yaml error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
