//! [`SqliteStore`] — the SQLite implementation of [`WorldStore`].

use std::path::Path;

use dungeon_core::{
  outcome::{ResetReport, SeedOutcome, SeedStatus, TableReport, TableStatus},
  seed::{ConnectionSeed, LocationSeed, SeedConfig, SeedData, SessionSeed},
  store::WorldStore,
  table::Table,
  world::{Exit, Location, Session},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  rows::{
    CONNECTION_COLUMNS, LOCATION_COLUMNS, SESSION_COLUMNS, connection_from_row,
    is_already_present, location_from_row, session_from_row,
  },
  schema::{CONNECTION_PRAGMAS, LIST_TABLES, TABLE_EXISTS, create_sql, drop_sql},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A world store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Each
/// operation holds the connection only for the duration of one `call`.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  seed:            SeedConfig,
}

impl SqliteStore {
  /// Open (or create) a store at `path`. The schema is not created; call
  /// [`WorldStore::create_schema`] for that.
  pub async fn open(path: impl AsRef<Path>, seed: SeedConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, seed).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(seed: SeedConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, seed).await
  }

  async fn init(conn: tokio_rusqlite::Connection, seed: SeedConfig) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn, seed })
  }

  async fn create_table(&self, table: Table) -> Result<TableReport> {
    let status = self
      .conn
      .call(move |conn| {
        if table_exists(conn, table)? {
          return Ok(TableStatus::AlreadyExisted);
        }
        conn.execute(create_sql(table), [])?;
        Ok(TableStatus::Created)
      })
      .await?;

    tracing::debug!(%table, ?status, "create table");
    Ok(TableReport { table, status })
  }

  async fn drop_table(&self, table: Table) -> Result<TableReport> {
    let status = self
      .conn
      .call(move |conn| {
        if !table_exists(conn, table)? {
          return Ok(TableStatus::DidNotExist);
        }
        conn.execute(&drop_sql(table), [])?;
        Ok(TableStatus::Dropped)
      })
      .await?;

    tracing::debug!(%table, ?status, "drop table");
    Ok(TableReport { table, status })
  }

  // ── Per-table seeding ─────────────────────────────────────────────────────
  //
  // Statements autocommit individually: a failure part-way through a table
  // keeps the rows inserted before it.

  async fn seed_locations(&self, records: Vec<LocationSeed>) -> Result<Vec<SeedOutcome>> {
    let outcomes = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "INSERT INTO locations ({LOCATION_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ))?;

        let mut outcomes = Vec::with_capacity(records.len());
        for rec in records {
          let inserted = stmt.execute(rusqlite::params![
            rec.id,
            rec.starting_location_id,
            rec.parent_id,
            rec.name,
            rec.category,
            rec.interior_description,
            rec.exterior_description,
            rec.notes,
          ]);
          let status = classify_insert(inserted)?;
          outcomes.push(outcome(Table::Locations, rec.id, rec.name, status));
        }
        Ok(outcomes)
      })
      .await?;
    Ok(outcomes)
  }

  async fn seed_connections(&self, records: Vec<ConnectionSeed>) -> Result<Vec<SeedOutcome>> {
    let outcomes = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "INSERT INTO connections ({CONNECTION_COLUMNS})
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ))?;

        let mut outcomes = Vec::with_capacity(records.len());
        for rec in records {
          let inserted = stmt.execute(rusqlite::params![
            rec.id,
            rec.start_location_id,
            rec.end_location_id,
            rec.name,
            rec.description,
            rec.category,
            rec.is_one_way,
            rec.is_hidden,
            rec.is_fast_travel_path,
            rec.describe_end_location_exterior,
          ]);
          let status = classify_insert(inserted)?;
          outcomes.push(outcome(Table::Connections, rec.id, rec.name, status));
        }
        Ok(outcomes)
      })
      .await?;
    Ok(outcomes)
  }

  async fn seed_session(&self, record: SessionSeed) -> Result<SeedOutcome> {
    let id = record.id;
    let name = format!("at location {}", record.current_location_id);

    let status = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          &format!("INSERT INTO sessions ({SESSION_COLUMNS}) VALUES (?1, ?2, ?3)"),
          rusqlite::params![record.id, record.current_location_id, record.time_in_game],
        );
        Ok(classify_insert(inserted)?)
      })
      .await?;

    Ok(outcome(Table::Sessions, Some(id), name, status))
  }
}

fn table_exists(conn: &rusqlite::Connection, table: Table) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(TABLE_EXISTS, rusqlite::params![table.sql_name()], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

/// Turn an "already present" constraint failure into an outcome; every other
/// failure stays an error.
fn classify_insert(inserted: rusqlite::Result<usize>) -> rusqlite::Result<SeedStatus> {
  match inserted {
    Ok(_) => Ok(SeedStatus::Seeded),
    Err(e) if is_already_present(&e) => Ok(SeedStatus::AlreadySeeded),
    Err(e) => Err(e),
  }
}

fn outcome(table: Table, id: Option<i64>, name: String, status: SeedStatus) -> SeedOutcome {
  let outcome = SeedOutcome { table, id, name, status };
  tracing::debug!("{outcome}");
  outcome
}

// ─── WorldStore impl ─────────────────────────────────────────────────────────

impl WorldStore for SqliteStore {
  type Error = Error;

  // ── Schema ────────────────────────────────────────────────────────────────

  async fn create_schema(&self) -> Result<Vec<TableReport>> {
    let mut reports = Vec::with_capacity(Table::ALL.len());
    for table in Table::ALL {
      reports.push(self.create_table(table).await?);
    }
    Ok(reports)
  }

  async fn drop_schema(&self, tables: &[Table]) -> Result<Vec<TableReport>> {
    let mut reports = Vec::with_capacity(tables.len());
    for &table in tables {
      reports.push(self.drop_table(table).await?);
    }
    Ok(reports)
  }

  async fn reset_schema(&self) -> Result<ResetReport> {
    let dropped = self.drop_schema(&Table::DROP_ORDER).await?;
    let created = self.create_schema().await?;
    let seeded = self.seed_tables(&Table::ALL).await?;
    tracing::info!(seeded = seeded.len(), "world store reset");
    Ok(ResetReport { dropped, created, seeded })
  }

  async fn list_tables(&self) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(LIST_TABLES)?;
        let names = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await?;
    Ok(names)
  }

  // ── Seeding ───────────────────────────────────────────────────────────────

  async fn seed_tables(&self, tables: &[Table]) -> Result<Vec<SeedOutcome>> {
    let data = SeedData::from_path(&self.seed.path);
    if data.is_empty() {
      tracing::info!(path = %self.seed.path.display(), "no seed data; nothing to seed");
      return Ok(Vec::new());
    }

    let SeedData { locations, connections } = data;
    let mut outcomes = Vec::new();

    if tables.contains(&Table::Locations) {
      outcomes.extend(self.seed_locations(locations).await?);
    }
    if tables.contains(&Table::Connections) {
      outcomes.extend(self.seed_connections(connections).await?);
    }
    if tables.contains(&Table::Sessions) {
      outcomes.push(self.seed_session(self.seed.session()).await?);
    }

    Ok(outcomes)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn load_location(&self, id: i64) -> Result<Option<Location>> {
    let location = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1"),
              rusqlite::params![id],
              location_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(location)
  }

  async fn exits(&self, location_id: i64) -> Result<Vec<Exit>> {
    let connections = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONNECTION_COLUMNS} FROM connections
           WHERE start_location_id = ?1 OR end_location_id = ?1
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![location_id], connection_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut exits = Vec::with_capacity(connections.len());
    for connection in connections {
      debug_assert!(connection.touches(location_id));
      let other = connection.other_end(location_id);
      let exit_location = self
        .load_location(other)
        .await?
        .ok_or(Error::MissingEndpoint { connection_id: connection.id, location_id: other })?;
      exits.push(Exit { connection, exit_location });
    }
    Ok(exits)
  }

  async fn get_session(&self, id: i64) -> Result<Option<Session>> {
    let session = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
              rusqlite::params![id],
              session_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(session)
  }
}
