//! Phone number records.

use serde::{Deserialize, Serialize};

/// Maximum length of a phone number.
pub const NUMBER_MAX_LEN: usize = 12;

/// A phone number owned by a client.
///
/// The number itself is the identity: it is unique across the store and
/// belongs to exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// The number, at most [`NUMBER_MAX_LEN`] characters.
    pub number: String,

    /// ID of the owning client.
    pub client_id: i64,
}

impl PhoneNumber {
    /// Creates a phone number owned by `client_id`.
    #[must_use]
    pub fn new(number: impl Into<String>, client_id: i64) -> Self {
        Self {
            number: number.into(),
            client_id,
        }
    }
}
