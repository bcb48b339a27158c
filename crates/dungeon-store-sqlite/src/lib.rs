//! SQLite backend for the Dungeonmaster world store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on the connection's
//! own thread without blocking the async runtime.

mod database;
mod rows;
mod schema;
mod store;

pub mod error;

pub use database::{create_database, drop_database};
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
