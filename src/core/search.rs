//! Client search filters and result rows.
//!
//! Text filters match substrings, case-sensitively; an unset filter matches
//! everything. The phone filter is passed to the engine as a `LIKE` pattern
//! unchanged, so a full number matches exactly and [`WILDCARD`] matches any
//! number.
//!
//! Whether the phone filter is set also decides which clients are
//! considered at all:
//!
//! - unset: only clients with at least one phone (inner join)
//! - set: every client, phones joined optionally (left join); a client
//!   without phones survives only a bare [`WILDCARD`] filter

use serde::{Deserialize, Serialize};

/// `LIKE` pattern matching any value.
pub const WILDCARD: &str = "%";

/// Optional filters for [`crate::storage::ContactStore::search_clients`].
///
/// # Examples
///
/// ```
/// use clientdb::core::SearchFilter;
///
/// let filter = SearchFilter::new().with_name("Павел");
/// assert_eq!(filter.name_pattern(), "%Павел%");
/// assert_eq!(filter.lastname_pattern(), "%");
/// assert!(!filter.has_number());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Substring of the given name.
    pub name: Option<String>,

    /// Substring of the family name.
    pub lastname: Option<String>,

    /// Substring of the email.
    pub email: Option<String>,

    /// Phone number pattern.
    pub number: Option<String>,
}

impl SearchFilter {
    /// Creates a filter that matches every client with a phone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by a substring of the given name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by a substring of the family name.
    #[must_use]
    pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    /// Filters by a substring of the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Filters by phone number and switches to the outer-join search.
    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Returns true if a phone filter is set.
    #[must_use]
    pub const fn has_number(&self) -> bool {
        self.number.is_some()
    }

    /// `LIKE` pattern for the given name.
    #[must_use]
    pub fn name_pattern(&self) -> String {
        substring_pattern(self.name.as_deref())
    }

    /// `LIKE` pattern for the family name.
    #[must_use]
    pub fn lastname_pattern(&self) -> String {
        substring_pattern(self.lastname.as_deref())
    }

    /// `LIKE` pattern for the email.
    #[must_use]
    pub fn email_pattern(&self) -> String {
        substring_pattern(self.email.as_deref())
    }
}

/// Wraps a value in wildcards, or returns a bare wildcard when unset.
#[must_use]
pub fn substring_pattern(value: Option<&str>) -> String {
    value.map_or_else(|| WILDCARD.to_string(), |v| format!("%{v}%"))
}

/// One row of a client search: a client paired with one of its phones.
///
/// A client with several phones yields one row per phone. `number` is
/// `None` only for phoneless clients returned by a wildcard phone search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMatch {
    /// Client ID.
    pub id: i64,

    /// Given name.
    pub name: String,

    /// Family name.
    pub lastname: String,

    /// Email address.
    pub email: String,

    /// Phone number, if the client has one.
    pub number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_filters_are_wildcards() {
        let filter = SearchFilter::new();
        assert_eq!(filter.name_pattern(), WILDCARD);
        assert_eq!(filter.lastname_pattern(), WILDCARD);
        assert_eq!(filter.email_pattern(), WILDCARD);
        assert!(!filter.has_number());
    }

    #[test]
    fn test_set_filters_match_substrings() {
        let filter = SearchFilter::new()
            .with_name("Мар")
            .with_lastname("аров")
            .with_email("@mail.ru");
        assert_eq!(filter.name_pattern(), "%Мар%");
        assert_eq!(filter.lastname_pattern(), "%аров%");
        assert_eq!(filter.email_pattern(), "%@mail.ru%");
    }

    #[test]
    fn test_number_filter_switches_mode() {
        let filter = SearchFilter::new().with_number("89219212131");
        assert!(filter.has_number());
        assert_eq!(filter.number.as_deref(), Some("89219212131"));
    }

    #[test]
    fn test_empty_string_is_a_set_filter() {
        assert_eq!(substring_pattern(Some("")), "%%");
    }
}
