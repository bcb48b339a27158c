//! Typed outcomes reported by schema, seed and database operations.
//!
//! Expected conditions (a table that already exists, a row that was already
//! seeded) are outcomes, not errors. Each outcome renders as one
//! human-readable line via [`Display`](std::fmt::Display).

use std::fmt;

use serde::Serialize;

use crate::table::Table;

// ─── Tables ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
  Created,
  AlreadyExisted,
  Dropped,
  DidNotExist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableReport {
  pub table:  Table,
  pub status: TableStatus,
}

impl fmt::Display for TableReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let what = match self.status {
      TableStatus::Created => "created",
      TableStatus::AlreadyExisted => "already exists",
      TableStatus::Dropped => "dropped",
      TableStatus::DidNotExist => "does not exist",
    };
    write!(f, "Table {} {what}.", self.table)
  }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStatus {
  Seeded,
  AlreadySeeded,
}

/// Result of inserting a single seed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
  pub table:  Table,
  pub id:     Option<i64>,
  pub name:   String,
  pub status: SeedStatus,
}

impl fmt::Display for SeedOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let kind = match self.table {
      Table::Locations => "Location",
      Table::Connections => "Connection",
      Table::Sessions => "Session",
    };
    let id = self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
    let what = match self.status {
      SeedStatus::Seeded => "seeded",
      SeedStatus::AlreadySeeded => "already seeded",
    };
    write!(f, "{kind} {id} {:?} {what}.", self.name)
  }
}

/// Everything a `reset` did, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResetReport {
  pub dropped: Vec<TableReport>,
  pub created: Vec<TableReport>,
  pub seeded:  Vec<SeedOutcome>,
}

// ─── Database files ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
  Created,
  AlreadyExisted,
  Dropped,
  DidNotExist,
  /// The OS refused the operation; reported rather than raised.
  InsufficientPrivilege,
}

impl fmt::Display for DatabaseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      DatabaseStatus::Created => "created",
      DatabaseStatus::AlreadyExisted => "already exists",
      DatabaseStatus::Dropped => "dropped",
      DatabaseStatus::DidNotExist => "does not exist",
      DatabaseStatus::InsufficientPrivilege => "cannot be changed: insufficient privilege",
    })
  }
}
