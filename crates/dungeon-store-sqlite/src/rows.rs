//! Mapping between SQLite rows and domain types, plus classification of
//! constraint failures that mean "this row is already here".

use dungeon_core::world::{Connection, Location, Session};
use rusqlite::{ErrorCode, Row, ffi};

// ─── Column lists ────────────────────────────────────────────────────────────

pub const LOCATION_COLUMNS: &str = "id, starting_location_id, parent_id, name, category, \
                                    interior_description, exterior_description, notes";

pub const CONNECTION_COLUMNS: &str = "id, start_location_id, end_location_id, name, \
                                      description, category, is_one_way, is_hidden, \
                                      is_fast_travel_path, describe_end_location_exterior";

pub const SESSION_COLUMNS: &str = "id, current_location_id, time_in_game";

// ─── Row decoders ────────────────────────────────────────────────────────────

pub fn location_from_row(row: &Row<'_>) -> rusqlite::Result<Location> {
  Ok(Location {
    id:                   row.get(0)?,
    starting_location_id: row.get(1)?,
    parent_id:            row.get(2)?,
    name:                 row.get(3)?,
    category:             row.get(4)?,
    interior_description: row.get(5)?,
    exterior_description: row.get(6)?,
    notes:                row.get(7)?,
  })
}

pub fn connection_from_row(row: &Row<'_>) -> rusqlite::Result<Connection> {
  Ok(Connection {
    id:                             row.get(0)?,
    start_location_id:              row.get(1)?,
    end_location_id:                row.get(2)?,
    name:                           row.get(3)?,
    description:                    row.get(4)?,
    category:                       row.get(5)?,
    is_one_way:                     row.get(6)?,
    is_hidden:                      row.get(7)?,
    is_fast_travel_path:            row.get(8)?,
    describe_end_location_exterior: row.get(9)?,
  })
}

pub fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
  Ok(Session {
    id:                  row.get(0)?,
    current_location_id: row.get(1)?,
    time_in_game:        row.get(2)?,
  })
}

// ─── Error classification ────────────────────────────────────────────────────

/// `true` for a UNIQUE or PRIMARY KEY violation, i.e. the record was already
/// inserted. Foreign-key and other constraint failures return `false`.
pub fn is_already_present(err: &rusqlite::Error) -> bool {
  match err {
    rusqlite::Error::SqliteFailure(e, _) => {
      e.code == ErrorCode::ConstraintViolation
        && matches!(
          e.extended_code,
          ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        )
    }
    _ => false,
  }
}
