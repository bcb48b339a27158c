//! `dungeonmaster` — schema, seed and read tooling for the world store.
//!
//! # Usage
//!
//! ```text
//! dungeonmaster create-db
//! dungeonmaster reset
//! dungeonmaster drop-schema sessions connections
//! dungeonmaster exits 1
//! ```
//!
//! Settings come from `dungeonmaster.toml` (or `--config`) layered under
//! `DUNGEONMASTER_*` environment variables; nested keys use `__`, e.g.
//! `DUNGEONMASTER_SEED__PATH=world.yml`.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dungeon_core::{
  seed::{SESSION_ID, SeedConfig},
  store::WorldStore,
  table::Table,
};
use dungeon_store_sqlite::{SqliteStore, create_database, drop_database};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Dungeonmaster world store tooling")]
struct Cli {
  /// Path to the configuration file; missing is fine.
  #[arg(short, long, default_value = "dungeonmaster.toml")]
  config: PathBuf,

  /// SQLite database file (overrides configuration).
  #[arg(long)]
  store: Option<PathBuf>,

  /// Seed document (overrides configuration).
  #[arg(long)]
  seed: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create the database file if it does not exist.
  CreateDb,
  /// Delete the database file.
  DropDb,
  #[command(flatten)]
  Store(StoreCommand),
}

/// Commands that run against an open store.
#[derive(Subcommand)]
enum StoreCommand {
  /// Create any missing tables.
  CreateSchema,
  /// Drop the named tables (default: all).
  DropSchema { tables: Vec<Table> },
  /// Seed the named tables (default: all).
  Seed { tables: Vec<Table> },
  /// Drop, recreate and reseed every table.
  Reset,
  /// Show one location.
  Location { id: i64 },
  /// Show the exits of a location.
  Exits { id: i64 },
  /// Show a session.
  Session {
    #[arg(default_value_t = SESSION_ID)]
    id: i64,
  },
  /// List the tables present in the database.
  Tables,
}

// ─── Configuration ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(default)]
struct Config {
  /// Deployment environment; picks the default database file.
  env:        String,
  store_path: Option<PathBuf>,
  seed:       SeedConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self { env: "dev".into(), store_path: None, seed: SeedConfig::default() }
  }
}

impl Config {
  fn store_path(&self) -> PathBuf {
    self
      .store_path
      .clone()
      .unwrap_or_else(|| PathBuf::from(format!("dungeonmaster_{}.sqlite3", self.env)))
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(
      config::Environment::with_prefix("DUNGEONMASTER")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read configuration")?;

  let mut cfg: Config = settings
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  // Flags override configuration.
  if let Some(store) = cli.store {
    cfg.store_path = Some(store);
  }
  if let Some(seed) = cli.seed {
    cfg.seed.path = seed;
  }
  let store_path = cfg.store_path();

  match cli.command {
    Command::CreateDb => {
      let status = create_database(&store_path)?;
      println!("Database {} {status}.", store_path.display());
      Ok(())
    }
    Command::DropDb => {
      let status = drop_database(&store_path)?;
      println!("Database {} {status}.", store_path.display());
      Ok(())
    }
    Command::Store(command) => {
      let store = SqliteStore::open(&store_path, cfg.seed)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      run(&store, command).await
    }
  }
}

/// Execute a store-backed command and print its outcome lines.
async fn run<S: WorldStore>(store: &S, command: StoreCommand) -> anyhow::Result<()> {
  match command {
    StoreCommand::CreateSchema => {
      for report in store.create_schema().await? {
        println!("{report}");
      }
    }
    StoreCommand::DropSchema { tables } => {
      let tables = or_default(tables, &Table::DROP_ORDER);
      for report in store.drop_schema(&tables).await? {
        println!("{report}");
      }
    }
    StoreCommand::Seed { tables } => {
      let tables = or_default(tables, &Table::ALL);
      let outcomes = store.seed_tables(&tables).await?;
      if outcomes.is_empty() {
        println!("Nothing to seed.");
      }
      for outcome in outcomes {
        println!("{outcome}");
      }
    }
    StoreCommand::Reset => {
      let report = store.reset_schema().await?;
      for line in report.dropped.iter().chain(&report.created) {
        println!("{line}");
      }
      for outcome in &report.seeded {
        println!("{outcome}");
      }
    }
    StoreCommand::Location { id } => match store.load_location(id).await? {
      Some(location) => println!("{}", serde_json::to_string_pretty(&location)?),
      None => println!("Location {id} not found."),
    },
    StoreCommand::Exits { id } => {
      if store.load_location(id).await?.is_none() {
        println!("Location {id} not found.");
        return Ok(());
      }
      let exits = store.exits(id).await?;
      println!("{}", serde_json::to_string_pretty(&exits)?);
    }
    StoreCommand::Session { id } => match store.get_session(id).await? {
      Some(session) => println!("{}", serde_json::to_string_pretty(&session)?),
      None => println!("Session {id} not found."),
    },
    StoreCommand::Tables => {
      for name in store.list_tables().await? {
        println!("{name}");
      }
    }
  }
  Ok(())
}

fn or_default(tables: Vec<Table>, default: &[Table]) -> Vec<Table> {
  if tables.is_empty() { default.to_vec() } else { tables }
}
