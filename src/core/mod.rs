//! Core domain models for clientdb.
//!
//! This module contains the record types the store manages (clients and
//! their phone numbers), the search filter and result row, and the
//! structured outcome of write operations. These are pure domain models
//! with no I/O dependencies.

pub mod client;
pub mod outcome;
pub mod phone;
pub mod search;

pub use client::{Client, ClientChanges, NewClient};
pub use outcome::Outcome;
pub use phone::PhoneNumber;
pub use search::{ClientMatch, SearchFilter, WILDCARD};
