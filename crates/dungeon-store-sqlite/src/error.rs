//! Error type for `dungeon-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// A connection points at a location that could not be loaded.
  #[error("connection {connection_id} references missing location {location_id}")]
  MissingEndpoint { connection_id: i64, location_id: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
