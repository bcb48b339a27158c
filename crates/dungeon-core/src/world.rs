//! Rows of the world graph: locations (nodes), connections (edges) and the
//! session pointer into the graph.

use serde::{Deserialize, Serialize};

/// A node in the world graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
  pub id:                   i64,
  pub starting_location_id: Option<i64>,
  pub parent_id:            Option<i64>,
  /// Globally unique.
  pub name:                 String,
  pub category:             Option<String>,
  pub interior_description: Option<String>,
  pub exterior_description: Option<String>,
  pub notes:                Option<String>,
}

/// An edge between two locations.
///
/// The flags are stored for callers; nothing in the store enforces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
  pub id:                             i64,
  pub start_location_id:              i64,
  pub end_location_id:                i64,
  /// Globally unique.
  pub name:                           String,
  pub description:                    Option<String>,
  pub category:                       Option<String>,
  pub is_one_way:                     bool,
  pub is_hidden:                      bool,
  pub is_fast_travel_path:            bool,
  pub describe_end_location_exterior: bool,
}

impl Connection {
  /// The endpoint opposite `location_id`. A self-loop yields `location_id`.
  pub fn other_end(&self, location_id: i64) -> i64 {
    if self.start_location_id == location_id {
      self.end_location_id
    } else {
      self.start_location_id
    }
  }

  pub fn touches(&self, location_id: i64) -> bool {
    self.start_location_id == location_id || self.end_location_id == location_id
  }
}

/// Where play currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub id:                  i64,
  pub current_location_id: Option<i64>,
  /// Free-form in-fiction clock.
  pub time_in_game:        Option<String>,
}

/// One hop out of a location: the connection plus its resolved far end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
  pub connection:    Connection,
  pub exit_location: Location,
}
