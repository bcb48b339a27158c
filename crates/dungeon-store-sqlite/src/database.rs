//! Creation and removal of the database file itself.
//!
//! A permission failure is reported as
//! [`DatabaseStatus::InsufficientPrivilege`] rather than raised. Table
//! operations never get this treatment.

use std::{fs::OpenOptions, io::ErrorKind, path::Path};

use dungeon_core::outcome::DatabaseStatus;

use crate::Result;

/// Suffixes of the files SQLite may keep next to the database.
const SIDECARS: [&str; 3] = ["-journal", "-wal", "-shm"];

/// Create an empty database file at `path` unless one is already there.
pub fn create_database(path: impl AsRef<Path>) -> Result<DatabaseStatus> {
  let path = path.as_ref();
  let status = match OpenOptions::new().write(true).create_new(true).open(path) {
    Ok(_) => DatabaseStatus::Created,
    Err(e) if e.kind() == ErrorKind::AlreadyExists => DatabaseStatus::AlreadyExisted,
    Err(e) if e.kind() == ErrorKind::PermissionDenied => DatabaseStatus::InsufficientPrivilege,
    Err(e) => return Err(e.into()),
  };

  tracing::info!(path = %path.display(), %status, "create database");
  Ok(status)
}

/// Remove the database file at `path`, along with any SQLite sidecars.
pub fn drop_database(path: impl AsRef<Path>) -> Result<DatabaseStatus> {
  let path = path.as_ref();
  let status = match std::fs::remove_file(path) {
    Ok(()) => DatabaseStatus::Dropped,
    Err(e) if e.kind() == ErrorKind::NotFound => DatabaseStatus::DidNotExist,
    Err(e) if e.kind() == ErrorKind::PermissionDenied => DatabaseStatus::InsufficientPrivilege,
    Err(e) => return Err(e.into()),
  };

  if status == DatabaseStatus::Dropped {
    for suffix in SIDECARS {
      let mut sidecar = path.as_os_str().to_owned();
      sidecar.push(suffix);
      match std::fs::remove_file(&sidecar) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
      }
    }
  }

  tracing::info!(path = %path.display(), %status, "drop database");
  Ok(status)
}
