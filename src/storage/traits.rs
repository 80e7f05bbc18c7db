//! Storage trait definition.
//!
//! Defines the record store facade: every operation clientdb offers over
//! clients and phone numbers. Implementations run each call against an
//! active session; nothing is cached between calls.

use crate::core::{Client, ClientChanges, ClientMatch, NewClient, Outcome, PhoneNumber, SearchFilter};
use crate::error::Result;

/// Operations over the client and phone tables.
///
/// Writes return an [`Outcome`] describing what changed; reads return rows.
pub trait ContactStore {
    // ==================== Schema Operations ====================

    /// Creates the client and phone tables if they are absent.
    ///
    /// Idempotent - safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the engine rejects the definition.
    fn initialize_schema(&mut self) -> Result<Outcome>;

    /// Drops both tables and everything in them.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the tables do not exist.
    fn reset_schema(&mut self) -> Result<Outcome>;

    /// Checks whether both tables exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn schema_exists(&self) -> Result<bool>;

    // ==================== Client Operations ====================

    /// Inserts a client, and its phone if one is given.
    ///
    /// # Errors
    ///
    /// Returns a constraint error if the email is already used, the phone
    /// number is taken, or a field exceeds its length limit.
    fn add_client(&mut self, client: &NewClient) -> Result<Outcome>;

    /// Overwrites a client's fields, keeping the current value of every
    /// field `changes` leaves unset.
    ///
    /// # Errors
    ///
    /// Returns `ClientNotFound` if no client has this ID, or a constraint
    /// error if the new email belongs to another client.
    fn change_client(&mut self, id: i64, changes: &ClientChanges) -> Result<Outcome>;

    /// Deletes a client and every phone it owns.
    ///
    /// Deleting an absent client succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn delete_client(&mut self, id: i64) -> Result<Outcome>;

    /// Retrieves a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_client(&self, id: i64) -> Result<Option<Client>>;

    // ==================== Phone Operations ====================

    /// Attaches a phone number to an existing client.
    ///
    /// # Errors
    ///
    /// Returns a constraint error if the client does not exist or the
    /// number is already in use.
    fn add_phone(&mut self, client_id: i64, number: &str) -> Result<Outcome>;

    /// Deletes a phone number.
    ///
    /// Deleting an absent number succeeds without changes.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn delete_phone(&mut self, number: &str) -> Result<Outcome>;

    /// Lists the phones owned by a client, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn client_phones(&self, client_id: i64) -> Result<Vec<PhoneNumber>>;

    // ==================== Search ====================

    /// Finds client/phone pairs matching the filter.
    ///
    /// See [`crate::core::search`] for the matching rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn search_clients(&self, filter: &SearchFilter) -> Result<Vec<ClientMatch>>;
}
