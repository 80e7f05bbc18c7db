//! Client records.
//!
//! A client is a contact with a given name, family name and a unique email.
//! Identity is assigned by the storage layer on insert and never changes.

use serde::{Deserialize, Serialize};

/// Maximum length of a client's given name.
pub const NAME_MAX_LEN: usize = 20;

/// Maximum length of a client's family name.
pub const LASTNAME_MAX_LEN: usize = 30;

/// Maximum length of a client's email.
pub const EMAIL_MAX_LEN: usize = 50;

/// A stored client.
///
/// # Examples
///
/// ```
/// use clientdb::core::Client;
///
/// let client = Client::new(1, "Марат", "Башкаров", "martbash@mail.ru");
/// assert_eq!(client.full_name(), "Марат Башкаров");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Identifier assigned by the storage layer.
    pub id: i64,

    /// Given name.
    pub name: String,

    /// Family name.
    pub lastname: String,

    /// Email address, unique across all clients.
    pub email: String,
}

impl Client {
    /// Creates a client value with a known ID.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
        }
    }

    /// Returns "name lastname".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }
}

/// A client that has not been stored yet, with an optional first phone.
///
/// # Examples
///
/// ```
/// use clientdb::core::NewClient;
///
/// let client = NewClient::new("Константин", "Хабеников", "konsthab@mail.ru")
///     .with_phone("89219212131");
/// assert_eq!(client.number.as_deref(), Some("89219212131"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Given name.
    pub name: String,

    /// Family name.
    pub lastname: String,

    /// Email address.
    pub email: String,

    /// Phone number to register for the client in the same operation.
    pub number: Option<String>,
}

impl NewClient {
    /// Creates a new client without a phone number.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            email: email.into(),
            number: None,
        }
    }

    /// Attaches a phone number to register alongside the client.
    #[must_use]
    pub fn with_phone(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }
}

/// A partial update of a client.
///
/// Fields left as `None` keep the value currently stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientChanges {
    /// New given name.
    pub name: Option<String>,

    /// New family name.
    pub lastname: Option<String>,

    /// New email address.
    pub email: Option<String>,
}

impl ClientChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new given name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new family name.
    #[must_use]
    pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    /// Sets the new email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.lastname.is_none() && self.email.is_none()
    }

    /// Merges the changes over an existing client.
    ///
    /// # Examples
    ///
    /// ```
    /// use clientdb::core::{Client, ClientChanges};
    ///
    /// let current = Client::new(2, "Марат", "Башкаров", "martbash@mail.ru");
    /// let merged = ClientChanges::new().with_lastname("Коротков").apply(&current);
    /// assert_eq!(merged.name, "Марат");
    /// assert_eq!(merged.lastname, "Коротков");
    /// assert_eq!(merged.email, "martbash@mail.ru");
    /// ```
    #[must_use]
    pub fn apply(&self, current: &Client) -> Client {
        Client {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            lastname: self
                .lastname
                .clone()
                .unwrap_or_else(|| current.lastname.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Client {
        Client::new(2, "Марат", "Башкаров", "martbash@mail.ru")
    }

    #[test]
    fn test_new_client_without_phone() {
        let client = NewClient::new("Светлана", "Ходчекова", "svethod@mail.ru");
        assert!(client.number.is_none());
        assert_eq!(client.email, "svethod@mail.ru");
    }

    #[test]
    fn test_empty_changes_keep_everything() {
        let changes = ClientChanges::new();
        assert!(changes.is_empty());
        assert_eq!(changes.apply(&stored()), stored());
    }

    #[test]
    fn test_full_changes_replace_everything() {
        let changes = ClientChanges::new()
            .with_name("Матвей")
            .with_lastname("Коротков")
            .with_email("matvcor@mail.ru");
        assert!(!changes.is_empty());

        let merged = changes.apply(&stored());
        assert_eq!(merged, Client::new(2, "Матвей", "Коротков", "matvcor@mail.ru"));
    }

    #[test]
    fn test_partial_changes_keep_id() {
        let merged = ClientChanges::new().with_email("new@mail.ru").apply(&stored());
        assert_eq!(merged.id, 2);
        assert_eq!(merged.name, "Марат");
        assert_eq!(merged.email, "new@mail.ru");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(stored().full_name(), "Марат Башкаров");
    }
}
