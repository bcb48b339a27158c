//! Integration tests for `SqliteStore` against an in-memory database.

use std::path::Path;

use dungeon_core::{
  outcome::{DatabaseStatus, SeedStatus, TableStatus},
  seed::SeedConfig,
  store::WorldStore,
  table::Table,
};
use tempfile::TempDir;

use crate::{Error, SqliteStore, create_database, drop_database};

const WORLD: &str = "
Locations:
  - id: 1
    name: Tavern
    category: building
    interior_description: Smoky and loud.
  - id: 2
    name: Market Square
    exterior_description: Stalls everywhere.
  - id: 3
    name: Cellar
    parent_id: 1
Connections:
  - id: 1
    start_location_id: 1
    end_location_id: 2
    name: Door
  - id: 2
    start_location_id: 1
    end_location_id: 3
    name: Trapdoor
    is_one_way: true
    is_hidden: true
";

fn seed_config(dir: &Path, contents: Option<&str>) -> SeedConfig {
  let path = dir.join("seed_data.yml");
  if let Some(contents) = contents {
    std::fs::write(&path, contents).expect("write seed file");
  }
  SeedConfig { path, session_location_id: 1, ..SeedConfig::default() }
}

async fn store_with(contents: Option<&str>) -> (TempDir, SqliteStore) {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = SqliteStore::open_in_memory(seed_config(dir.path(), contents))
    .await
    .expect("in-memory store");
  (dir, store)
}

async fn store() -> (TempDir, SqliteStore) { store_with(Some(WORLD)).await }

async fn count(store: &SqliteStore, table: &'static str) -> i64 {
  store
    .conn
    .call(move |conn| {
      Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    })
    .await
    .unwrap()
}

async fn exec(store: &SqliteStore, sql: &'static str) {
  store
    .conn
    .call(move |conn| {
      conn.execute_batch(sql)?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_schema_is_idempotent() {
  let (_dir, s) = store().await;

  let first = s.create_schema().await.unwrap();
  assert_eq!(
    first.iter().map(|r| r.table).collect::<Vec<_>>(),
    Table::ALL.to_vec()
  );
  assert!(first.iter().all(|r| r.status == TableStatus::Created));
  let tables_after_first = s.list_tables().await.unwrap();

  let second = s.create_schema().await.unwrap();
  assert_eq!(second.len(), 3);
  assert!(second.iter().all(|r| r.status == TableStatus::AlreadyExisted));
  assert_eq!(s.list_tables().await.unwrap(), tables_after_first);
  assert_eq!(tables_after_first, ["connections", "locations", "sessions"]);
}

#[tokio::test]
async fn drop_schema_tolerates_missing_tables() {
  let (_dir, s) = store().await;

  let reports = s.drop_schema(&Table::DROP_ORDER).await.unwrap();
  assert!(reports.iter().all(|r| r.status == TableStatus::DidNotExist));

  s.create_schema().await.unwrap();
  let reports = s.drop_schema(&[Table::Sessions]).await.unwrap();
  assert_eq!(reports.len(), 1);
  assert_eq!(reports[0].status, TableStatus::Dropped);
  assert_eq!(s.list_tables().await.unwrap(), ["connections", "locations"]);

  let reports = s.drop_schema(&Table::DROP_ORDER).await.unwrap();
  let statuses: Vec<_> = reports.iter().map(|r| r.status).collect();
  assert_eq!(
    statuses,
    [TableStatus::DidNotExist, TableStatus::Dropped, TableStatus::Dropped]
  );
  assert!(s.list_tables().await.unwrap().is_empty());
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeding_twice_reports_already_seeded() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();

  let first = s.seed_tables(&[Table::Locations]).await.unwrap();
  assert_eq!(first.len(), 3);
  assert!(first.iter().all(|o| o.status == SeedStatus::Seeded));
  assert_eq!(count(&s, "locations").await, 3);

  let second = s.seed_tables(&[Table::Locations]).await.unwrap();
  assert_eq!(second.len(), 3);
  assert!(second.iter().all(|o| o.status == SeedStatus::AlreadySeeded));
  assert_eq!(count(&s, "locations").await, 3);
}

#[tokio::test]
async fn reseeding_every_table_changes_nothing() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();

  let first = s.seed_tables(&Table::ALL).await.unwrap();
  assert_eq!(first.len(), 6);
  assert!(first.iter().all(|o| o.status == SeedStatus::Seeded));

  let second = s.seed_tables(&Table::ALL).await.unwrap();
  assert_eq!(second.len(), 6);
  assert!(second.iter().all(|o| o.status == SeedStatus::AlreadySeeded));
  for table in Table::ALL {
    assert!(second.iter().any(|o| o.table == table));
  }

  assert_eq!(count(&s, "locations").await, 3);
  assert_eq!(count(&s, "connections").await, 2);
  assert_eq!(count(&s, "sessions").await, 1);
}

#[tokio::test]
async fn records_without_ids_converge_by_name() {
  let (_dir, s) = store_with(Some("Locations:\n  - name: Well\n  - name: Mill\n")).await;
  s.create_schema().await.unwrap();

  s.seed_tables(&[Table::Locations]).await.unwrap();
  let again = s.seed_tables(&[Table::Locations]).await.unwrap();
  assert!(again.iter().all(|o| o.status == SeedStatus::AlreadySeeded));
  assert_eq!(count(&s, "locations").await, 2);
}

#[tokio::test]
async fn seeding_follows_dependency_order() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();

  let outcomes = s
    .seed_tables(&[Table::Sessions, Table::Connections, Table::Locations])
    .await
    .unwrap();
  let tables: Vec<_> = outcomes.iter().map(|o| o.table).collect();
  assert_eq!(
    tables,
    [
      Table::Locations,
      Table::Locations,
      Table::Locations,
      Table::Connections,
      Table::Connections,
      Table::Sessions,
    ]
  );

  let session = s.get_session(1).await.unwrap().unwrap();
  assert_eq!(session.current_location_id, Some(1));
  assert!(session.time_in_game.is_none());
}

#[tokio::test]
async fn dangling_connection_aborts_remaining_inserts() {
  let yaml = "
Locations:
  - id: 1
    name: Tavern
Connections:
  - id: 1
    start_location_id: 1
    end_location_id: 1
    name: Loop
  - id: 2
    start_location_id: 1
    end_location_id: 99
    name: Nowhere
  - id: 3
    start_location_id: 1
    end_location_id: 1
    name: Never Reached
";
  let (_dir, s) = store_with(Some(yaml)).await;
  s.create_schema().await.unwrap();

  let err = s
    .seed_tables(&[Table::Locations, Table::Connections])
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)));

  // Locations finished before the failure; the first connection stays.
  assert_eq!(count(&s, "locations").await, 1);
  assert_eq!(count(&s, "connections").await, 1);
}

#[tokio::test]
async fn missing_seed_file_seeds_nothing() {
  let (_dir, s) = store_with(None).await;
  s.create_schema().await.unwrap();

  let outcomes = s.seed_tables(&Table::ALL).await.unwrap();
  assert!(outcomes.is_empty());
  assert_eq!(count(&s, "locations").await, 0);
  assert_eq!(count(&s, "connections").await, 0);
  assert_eq!(count(&s, "sessions").await, 0);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_location_round_trip() {
  let (_dir, s) = store_with(Some("Locations:\n  - id: 1\n    name: Tavern\n")).await;
  s.create_schema().await.unwrap();
  s.seed_tables(&[Table::Locations]).await.unwrap();

  let tavern = s.load_location(1).await.unwrap().unwrap();
  assert_eq!(tavern.id, 1);
  assert_eq!(tavern.name, "Tavern");
  assert!(tavern.starting_location_id.is_none());
  assert!(tavern.parent_id.is_none());
  assert!(tavern.category.is_none());
  assert!(tavern.interior_description.is_none());
  assert!(tavern.exterior_description.is_none());
  assert!(tavern.notes.is_none());
}

#[tokio::test]
async fn load_location_missing_returns_none() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();
  assert!(s.load_location(42).await.unwrap().is_none());
}

#[tokio::test]
async fn exits_resolve_the_other_endpoint() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();
  s.seed_tables(&Table::ALL).await.unwrap();

  let from_tavern = s.exits(1).await.unwrap();
  assert_eq!(from_tavern.len(), 2);
  let door = &from_tavern[0];
  assert_eq!(door.connection.name, "Door");
  assert_eq!(door.exit_location.id, 2);
  assert_eq!(door.exit_location.name, "Market Square");
  let trapdoor = &from_tavern[1];
  assert_eq!(trapdoor.exit_location.id, 3);
  assert!(trapdoor.connection.is_one_way);
  assert!(trapdoor.connection.is_hidden);
  assert!(!trapdoor.connection.is_fast_travel_path);

  let from_square = s.exits(2).await.unwrap();
  assert_eq!(from_square.len(), 1);
  assert_eq!(from_square[0].connection.id, door.connection.id);
  assert_eq!(from_square[0].exit_location.id, 1);
  assert_eq!(from_square[0].connection.start_location_id, 1);
  assert_eq!(from_square[0].connection.end_location_id, 2);
}

#[tokio::test]
async fn exits_of_isolated_location_are_empty() {
  let (_dir, s) = store_with(Some("Locations:\n  - id: 9\n    name: Island\n")).await;
  s.create_schema().await.unwrap();
  s.seed_tables(&[Table::Locations]).await.unwrap();
  assert!(s.exits(9).await.unwrap().is_empty());
}

// ─── Cascades ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_a_location_cascades_to_dependents() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();
  s.seed_tables(&Table::ALL).await.unwrap();

  exec(&s, "DELETE FROM locations WHERE id = 1").await;

  // The cellar hung off the tavern via parent_id.
  assert!(s.load_location(3).await.unwrap().is_none());
  assert!(s.load_location(2).await.unwrap().is_some());
  assert_eq!(count(&s, "connections").await, 0);
  assert!(s.get_session(1).await.unwrap().is_none());
  assert!(s.exits(2).await.unwrap().is_empty());
}

// ─── Reset ───────────────────────────────────────────────────────────────────

async fn assert_seeded_world(s: &SqliteStore) {
  assert_eq!(count(s, "locations").await, 3);
  assert_eq!(count(s, "connections").await, 2);
  assert_eq!(count(s, "sessions").await, 1);
  assert!(s.load_location(4).await.unwrap().is_none());
}

#[tokio::test]
async fn reset_from_empty_store() {
  let (_dir, s) = store().await;

  let report = s.reset_schema().await.unwrap();
  assert!(report.dropped.iter().all(|r| r.status == TableStatus::DidNotExist));
  assert!(report.created.iter().all(|r| r.status == TableStatus::Created));
  assert!(report.seeded.iter().all(|o| o.status == SeedStatus::Seeded));
  assert_seeded_world(&s).await;
}

#[tokio::test]
async fn reset_from_partial_and_full_state_converges() {
  let (_dir, s) = store().await;
  s.create_schema().await.unwrap();
  s.seed_tables(&[Table::Locations]).await.unwrap();

  s.reset_schema().await.unwrap();
  assert_seeded_world(&s).await;

  exec(&s, "INSERT INTO locations (id, name) VALUES (4, 'Stray')").await;
  let report = s.reset_schema().await.unwrap();
  assert!(report.dropped.iter().all(|r| r.status == TableStatus::Dropped));
  assert!(report.seeded.iter().all(|o| o.status == SeedStatus::Seeded));
  assert_seeded_world(&s).await;
}

// ─── Database files ──────────────────────────────────────────────────────────

#[tokio::test]
async fn database_file_lifecycle() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dungeonmaster_test.sqlite3");

  assert_eq!(drop_database(&path).unwrap(), DatabaseStatus::DidNotExist);
  assert_eq!(create_database(&path).unwrap(), DatabaseStatus::Created);
  assert_eq!(create_database(&path).unwrap(), DatabaseStatus::AlreadyExisted);

  {
    let s = SqliteStore::open(&path, seed_config(dir.path(), Some(WORLD)))
      .await
      .unwrap();
    s.reset_schema().await.unwrap();
    assert!(s.load_location(1).await.unwrap().is_some());
  }

  assert_eq!(drop_database(&path).unwrap(), DatabaseStatus::Dropped);
  assert!(!path.exists());
}
