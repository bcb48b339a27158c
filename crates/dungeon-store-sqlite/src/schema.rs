//! SQL schema for the world store.
//!
//! Each table is created and dropped on its own so callers get a per-table
//! outcome. `SERIAL` ids are SQLite rowid aliases.

use dungeon_core::table::Table;

/// Run on every new connection.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// DDL for `table`; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub fn create_sql(table: Table) -> &'static str {
  match table {
    Table::Locations => LOCATIONS,
    Table::Connections => CONNECTIONS,
    Table::Sessions => SESSIONS,
  }
}

pub fn drop_sql(table: Table) -> String { format!("DROP TABLE IF EXISTS {}", table.sql_name()) }

pub const TABLE_EXISTS: &str =
  "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE";

pub const LIST_TABLES: &str =
  "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

const LOCATIONS: &str = "
CREATE TABLE IF NOT EXISTS locations (
    id                   INTEGER PRIMARY KEY,
    starting_location_id INTEGER REFERENCES locations(id) ON DELETE CASCADE,
    parent_id            INTEGER REFERENCES locations(id) ON DELETE CASCADE,
    name                 VARCHAR(255) NOT NULL UNIQUE,
    category             VARCHAR(100),
    interior_description TEXT,
    exterior_description TEXT,
    notes                TEXT
)";

const CONNECTIONS: &str = "
CREATE TABLE IF NOT EXISTS connections (
    id                             INTEGER PRIMARY KEY,
    start_location_id              INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
    end_location_id                INTEGER NOT NULL REFERENCES locations(id) ON DELETE CASCADE,
    name                           VARCHAR(255) NOT NULL UNIQUE,
    description                    TEXT,
    category                       VARCHAR(100),
    is_one_way                     BOOLEAN NOT NULL DEFAULT 0,
    is_hidden                      BOOLEAN NOT NULL DEFAULT 0,
    is_fast_travel_path            BOOLEAN NOT NULL DEFAULT 0,
    describe_end_location_exterior BOOLEAN NOT NULL DEFAULT 0
)";

const SESSIONS: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    id                  INTEGER PRIMARY KEY,
    current_location_id INTEGER REFERENCES locations(id) ON DELETE CASCADE,
    time_in_game        VARCHAR(200)
)";
