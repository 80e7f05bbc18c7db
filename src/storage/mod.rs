//! Storage layer for clientdb.
//!
//! Provides persistent storage for clients and phone numbers using
//! `SQLite`. All operations run inside a [`Session`], a scoped transaction
//! over one connection.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{DROP_SCHEMA_SQL, SCHEMA_SQL};
pub use sqlite::{Session, SqliteStorage};
pub use traits::ContactStore;

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".clientdb/clients.db";
