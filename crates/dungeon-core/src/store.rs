//! The `WorldStore` trait.
//!
//! Implemented by storage backends (e.g. `dungeon-store-sqlite`). The CLI
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  outcome::{ResetReport, SeedOutcome, TableReport},
  table::Table,
  world::{Exit, Location, Session},
};

/// Abstraction over a world store backend.
///
/// "Already exists", "does not exist" and "already seeded" are reported as
/// outcomes. Every other failure is returned as `Self::Error` and aborts the
/// remainder of the current operation; work completed before the failure is
/// kept.
pub trait WorldStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create every table that is absent, in dependency order.
  fn create_schema(
    &self,
  ) -> impl Future<Output = Result<Vec<TableReport>, Self::Error>> + Send + '_;

  /// Drop each of `tables` that is present, in the order given.
  fn drop_schema<'a>(
    &'a self,
    tables: &'a [Table],
  ) -> impl Future<Output = Result<Vec<TableReport>, Self::Error>> + Send + 'a;

  /// Drop everything, recreate it and reseed it. Not atomic: if seeding
  /// fails the schema is left empty but complete.
  fn reset_schema(&self) -> impl Future<Output = Result<ResetReport, Self::Error>> + Send + '_;

  /// Names of the tables currently present in the store.
  fn list_tables(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Seeding ───────────────────────────────────────────────────────────

  /// Insert the seed records for each of `tables`, always in dependency
  /// order regardless of the order requested.
  fn seed_tables<'a>(
    &'a self,
    tables: &'a [Table],
  ) -> impl Future<Output = Result<Vec<SeedOutcome>, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Fetch a location by id. Returns `None` if not found.
  fn load_location(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Location>, Self::Error>> + Send + '_;

  /// Every connection touching `location_id`, each paired with the location
  /// at its other end.
  fn exits(
    &self,
    location_id: i64,
  ) -> impl Future<Output = Result<Vec<Exit>, Self::Error>> + Send + '_;

  /// Fetch a session by id. Returns `None` if not found.
  fn get_session(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Session>, Self::Error>> + Send + '_;
}
