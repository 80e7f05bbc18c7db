//! # clientdb
//!
//! Client contact records backed by `SQLite`.
//!
//! clientdb keeps clients (name, family name, unique email) and the phone
//! numbers they own, and finds them again by substring of any text field
//! or by phone number.
//!
//! ## Features
//!
//! - **Scoped sessions**: every operation runs in a transaction that commits
//!   on success and rolls back on error or drop
//! - **Structured outcomes**: writes report what changed as typed values
//! - **Typed errors**: schema, constraint and not-found failures are
//!   distinct error variants

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod error;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{ConstraintKind, Error, Result, StorageError};

// Re-export core domain types
pub use core::{Client, ClientChanges, ClientMatch, NewClient, Outcome, PhoneNumber, SearchFilter};

// Re-export storage types
pub use storage::{ContactStore, DEFAULT_DB_PATH, Session, SqliteStorage};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
