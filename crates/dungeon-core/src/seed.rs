//! Declarative seed data for the world tables.
//!
//! The seed document is YAML (or JSON, selected by a `.json` extension) with
//! two list-valued top-level keys:
//!
//! ```yaml
//! Locations:
//!   - id: 1
//!     name: Tavern
//!     category: building
//! Connections:
//!   - start_location_id: 1
//!     end_location_id: 2
//!     name: Tavern Door
//! ```
//!
//! A missing, unreadable or malformed document parses to an empty
//! [`SeedData`], which makes seeding a no-op.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SeedError;

/// The single session row the seed loader writes.
pub const SESSION_ID: i64 = 1;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Seed settings, resolved once at startup and handed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
  /// Location of the seed document.
  pub path:                 PathBuf,
  /// `current_location_id` of the seeded session.
  pub session_location_id:  i64,
  pub session_time_in_game: Option<String>,
}

impl Default for SeedConfig {
  fn default() -> Self {
    Self {
      path:                 PathBuf::from("seed_data.yml"),
      session_location_id:  23,
      session_time_in_game: None,
    }
  }
}

impl SeedConfig {
  /// The fixed session record described by this configuration.
  pub fn session(&self) -> SessionSeed {
    SessionSeed {
      id:                  SESSION_ID,
      current_location_id: self.session_location_id,
      time_in_game:        self.session_time_in_game.clone(),
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSeed {
  #[serde(default)]
  pub id:                   Option<i64>,
  pub name:                 String,
  #[serde(default)]
  pub starting_location_id: Option<i64>,
  #[serde(default)]
  pub parent_id:            Option<i64>,
  #[serde(default)]
  pub category:             Option<String>,
  #[serde(default)]
  pub interior_description: Option<String>,
  #[serde(default)]
  pub exterior_description: Option<String>,
  #[serde(default)]
  pub notes:                Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSeed {
  #[serde(default)]
  pub id:                             Option<i64>,
  pub start_location_id:              i64,
  pub end_location_id:                i64,
  pub name:                           String,
  #[serde(default)]
  pub description:                    Option<String>,
  #[serde(default)]
  pub category:                       Option<String>,
  #[serde(default)]
  pub is_one_way:                     bool,
  #[serde(default)]
  pub is_hidden:                      bool,
  #[serde(default)]
  pub is_fast_travel_path:            bool,
  #[serde(default)]
  pub describe_end_location_exterior: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeed {
  pub id:                  i64,
  pub current_location_id: i64,
  pub time_in_game:        Option<String>,
}

// ─── Document ────────────────────────────────────────────────────────────────

/// Parsed seed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
  #[serde(rename = "Locations", default)]
  pub locations:   Vec<LocationSeed>,
  #[serde(rename = "Connections", default)]
  pub connections: Vec<ConnectionSeed>,
}

impl SeedData {
  /// Read and parse the seed document at `path`.
  ///
  /// Never fails: problems are logged and yield an empty document.
  pub fn from_path(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
      Ok(raw) => raw,
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "seed file not readable; nothing to seed");
        return Self::default();
      }
    };

    let is_json = path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
      Self::from_json(&raw)
    } else {
      Self::from_yaml(&raw)
    };

    parsed.unwrap_or_else(|e| {
      tracing::warn!(path = %path.display(), error = %e, "seed file malformed; nothing to seed");
      Self::default()
    })
  }

  pub fn from_yaml(raw: &str) -> Result<Self, SeedError> {
    // An empty YAML document is null, not an empty mapping.
    if raw.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(raw)?)
  }

  pub fn from_json(raw: &str) -> Result<Self, SeedError> { Ok(serde_json::from_str(raw)?) }

  pub fn is_empty(&self) -> bool { self.locations.is_empty() && self.connections.is_empty() }
}
