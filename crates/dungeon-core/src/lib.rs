//! Core types and trait definitions for the Dungeonmaster world store.
//!
//! This crate is deliberately free of database dependencies. The storage
//! backend (`dungeon-store-sqlite`) and the CLI both depend on it.

pub mod error;
pub mod outcome;
pub mod seed;
pub mod store;
pub mod table;
pub mod world;

pub use error::{Error, Result, SeedError};
