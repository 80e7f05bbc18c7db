//! Structured results of write operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a write operation did.
///
/// Callers branch on the variant; `Display` renders the status line shown
/// by the CLI.
///
/// # Examples
///
/// ```
/// use clientdb::core::Outcome;
///
/// let outcome = Outcome::ClientAdded { id: 3, number: None };
/// assert_eq!(outcome.to_string(), "Client 3 added without a phone number");
/// assert_eq!(outcome.client_id(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Client and phone tables exist.
    SchemaCreated,

    /// Client and phone tables were dropped.
    SchemaDropped,

    /// A client was inserted, possibly with a first phone.
    ClientAdded {
        /// ID assigned to the new client.
        id: i64,
        /// Phone registered with the client, if any.
        number: Option<String>,
    },

    /// A phone was attached to an existing client.
    PhoneAdded {
        /// The new phone number.
        number: String,
        /// Owning client.
        client_id: i64,
    },

    /// A client's fields were overwritten.
    ClientChanged {
        /// Client ID.
        id: i64,
    },

    /// A phone delete ran.
    PhoneDeleted {
        /// Number that was requested.
        number: String,
        /// Whether a row existed and was removed.
        removed: bool,
    },

    /// A client delete ran.
    ClientDeleted {
        /// Client ID that was requested.
        id: i64,
        /// Number of phones removed with the client.
        phones_removed: usize,
        /// Whether the client row existed and was removed.
        removed: bool,
    },
}

impl Outcome {
    /// Returns the client the outcome refers to, if any.
    #[must_use]
    pub const fn client_id(&self) -> Option<i64> {
        match self {
            Self::ClientAdded { id, .. }
            | Self::ClientChanged { id }
            | Self::ClientDeleted { id, .. } => Some(*id),
            Self::PhoneAdded { client_id, .. } => Some(*client_id),
            Self::SchemaCreated | Self::SchemaDropped | Self::PhoneDeleted { .. } => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaCreated => write!(f, "Tables have been created successfully"),
            Self::SchemaDropped => write!(f, "Tables successfully deleted"),
            Self::ClientAdded {
                id,
                number: Some(number),
            } => write!(f, "Client {id} added with phone number {number}"),
            Self::ClientAdded { id, number: None } => {
                write!(f, "Client {id} added without a phone number")
            }
            Self::PhoneAdded { number, client_id } => write!(
                f,
                "A phone number {number} has been added to the client {client_id}"
            ),
            Self::ClientChanged { id } => write!(f, "The data of client {id} changed"),
            Self::PhoneDeleted { number, .. } => write!(f, "Phone number {number} deleted"),
            Self::ClientDeleted { id, .. } => {
                write!(f, "Client number {id} has been successfully deleted")
            }
        }
    }
}
