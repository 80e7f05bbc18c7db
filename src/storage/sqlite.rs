//! `SQLite` storage implementation.
//!
//! [`SqliteStorage`] owns the connection. Work happens inside a [`Session`],
//! a scoped transaction that implements [`ContactStore`]: it commits when
//! asked to and rolls back when dropped, so every exit path releases it.

use crate::core::{Client, ClientChanges, ClientMatch, NewClient, Outcome, PhoneNumber, SearchFilter};
use crate::core::search::WILDCARD;
use crate::error::{Result, StorageError};
use crate::storage::schema::{CHECK_SCHEMA_SQL, DROP_SCHEMA_SQL, SCHEMA_SQL, SCHEMA_TABLE_COUNT};
use crate::storage::traits::ContactStore;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Inner join: only clients that own at least one phone.
const SEARCH_WITH_PHONES_SQL: &str = r"
SELECT cl.id, cl.name, cl.lastname, cl.email, ph.number
FROM clients cl
JOIN phones ph ON cl.id = ph.client_id
WHERE cl.name LIKE ?1 AND cl.lastname LIKE ?2 AND cl.email LIKE ?3
ORDER BY cl.id, ph.number
";

/// Left join: every client, filtered on the joined phone.
const SEARCH_BY_NUMBER_SQL: &str = r"
SELECT cl.id, cl.name, cl.lastname, cl.email, ph.number
FROM clients cl
LEFT JOIN phones ph ON cl.id = ph.client_id
WHERE cl.name LIKE ?1 AND cl.lastname LIKE ?2 AND cl.email LIKE ?3
  AND (ph.number LIKE ?4 OR (ph.number IS NULL AND ?4 = ?5))
ORDER BY cl.id, ph.number
";

/// SQLite-based storage.
///
/// # Examples
///
/// ```no_run
/// use clientdb::core::NewClient;
/// use clientdb::storage::{ContactStore, SqliteStorage};
///
/// let mut storage = SqliteStorage::open("clients.db").unwrap();
/// storage
///     .with_session(|session| {
///         session.initialize_schema()?;
///         session.add_client(&NewClient::new("Павел", "Волен", "pavwol@mail.ru"))
///     })
///     .unwrap();
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or configured.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(StorageError::from)?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        Self::configure(&conn)?;

        // Use WAL mode for better concurrent access (returns result, use query_row)
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        debug!(path = %path.display(), "opened database");
        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Self::configure(&conn)?;

        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Begins a session.
    ///
    /// The session must be committed with [`Session::commit`]; dropping it
    /// rolls back everything it did.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn session(&mut self) -> Result<Session<'_>> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(Session { tx })
    }

    /// Runs `f` in a session, committing if it returns `Ok` and rolling
    /// back if it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a transaction error if the commit
    /// fails.
    pub fn with_session<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session<'_>) -> Result<T>,
    {
        let mut session = self.session()?;
        match f(&mut session) {
            Ok(value) => {
                session.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = session.rollback() {
                    warn!(error = %rollback_err, "rollback failed after session error");
                }
                Err(err)
            }
        }
    }

    /// Per-connection settings. Foreign keys are off by default in `SQLite`,
    /// and `LIKE` folds ASCII case unless told otherwise.
    fn configure(conn: &Connection) -> Result<()> {
        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(StorageError::from)?;
        conn.execute("PRAGMA case_sensitive_like = ON;", [])
            .map_err(StorageError::from)?;
        Ok(())
    }
}

/// A scoped transaction over a [`SqliteStorage`] connection.
///
/// All [`ContactStore`] operations run inside it. Uncommitted work is
/// rolled back on drop.
pub struct Session<'conn> {
    tx: Transaction<'conn>,
}

impl Session<'_> {
    /// Commits everything done in the session.
    ///
    /// # Errors
    ///
    /// Returns a transaction error if the commit fails.
    pub fn commit(self) -> Result<()> {
        self.tx
            .commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        debug!("session committed");
        Ok(())
    }

    /// Discards everything done in the session.
    ///
    /// # Errors
    ///
    /// Returns a transaction error if the rollback fails.
    pub fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;
        debug!("session rolled back");
        Ok(())
    }

    fn insert_phone(&self, client_id: i64, number: &str) -> Result<()> {
        self.tx
            .execute(
                "INSERT INTO phones (number, client_id) VALUES (?1, ?2)",
                params![number, client_id],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn row_to_match(row: &Row<'_>) -> rusqlite::Result<ClientMatch> {
        Ok(ClientMatch {
            id: row.get(0)?,
            name: row.get(1)?,
            lastname: row.get(2)?,
            email: row.get(3)?,
            number: row.get(4)?,
        })
    }
}

impl ContactStore for Session<'_> {
    // ==================== Schema Operations ====================

    fn initialize_schema(&mut self) -> Result<Outcome> {
        self.tx
            .execute_batch(SCHEMA_SQL)
            .map_err(|e| StorageError::schema(&e))?;
        info!("schema initialized");
        Ok(Outcome::SchemaCreated)
    }

    fn reset_schema(&mut self) -> Result<Outcome> {
        self.tx
            .execute_batch(DROP_SCHEMA_SQL)
            .map_err(|e| StorageError::schema(&e))?;
        info!("schema dropped");
        Ok(Outcome::SchemaDropped)
    }

    fn schema_exists(&self) -> Result<bool> {
        let count: i64 = self
            .tx
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count == SCHEMA_TABLE_COUNT)
    }

    // ==================== Client Operations ====================

    fn add_client(&mut self, client: &NewClient) -> Result<Outcome> {
        let id: i64 = self
            .tx
            .query_row(
                r"
            INSERT INTO clients (name, lastname, email)
            VALUES (?1, ?2, ?3)
            RETURNING id
        ",
                params![client.name, client.lastname, client.email],
                |row| row.get(0),
            )
            .map_err(StorageError::from)?;

        if let Some(number) = &client.number {
            self.insert_phone(id, number)?;
        }

        debug!(id, with_phone = client.number.is_some(), "client added");
        Ok(Outcome::ClientAdded {
            id,
            number: client.number.clone(),
        })
    }

    fn change_client(&mut self, id: i64, changes: &ClientChanges) -> Result<Outcome> {
        let current = self
            .get_client(id)?
            .ok_or(StorageError::ClientNotFound { id })?;
        let merged = changes.apply(&current);

        self.tx
            .execute(
                r"
            UPDATE clients SET name = ?1, lastname = ?2, email = ?3
            WHERE id = ?4
        ",
                params![merged.name, merged.lastname, merged.email, id],
            )
            .map_err(StorageError::from)?;

        debug!(id, unchanged = changes.is_empty(), "client changed");
        Ok(Outcome::ClientChanged { id })
    }

    fn delete_client(&mut self, id: i64) -> Result<Outcome> {
        // Phones first: they reference the client row
        let phones_removed = self
            .tx
            .execute("DELETE FROM phones WHERE client_id = ?1", params![id])
            .map_err(StorageError::from)?;
        let removed = self
            .tx
            .execute("DELETE FROM clients WHERE id = ?1", params![id])
            .map_err(StorageError::from)?
            > 0;

        if removed {
            debug!(id, phones_removed, "client deleted");
        } else {
            warn!(id, "delete of absent client");
        }
        Ok(Outcome::ClientDeleted {
            id,
            phones_removed,
            removed,
        })
    }

    fn get_client(&self, id: i64) -> Result<Option<Client>> {
        let client = self
            .tx
            .query_row(
                "SELECT id, name, lastname, email FROM clients WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Client {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        lastname: row.get(2)?,
                        email: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(StorageError::from)?;

        Ok(client)
    }

    // ==================== Phone Operations ====================

    fn add_phone(&mut self, client_id: i64, number: &str) -> Result<Outcome> {
        self.insert_phone(client_id, number)?;

        debug!(client_id, number, "phone added");
        Ok(Outcome::PhoneAdded {
            number: number.to_string(),
            client_id,
        })
    }

    fn delete_phone(&mut self, number: &str) -> Result<Outcome> {
        let removed = self
            .tx
            .execute("DELETE FROM phones WHERE number = ?1", params![number])
            .map_err(StorageError::from)?
            > 0;

        if !removed {
            warn!(number, "delete of absent phone");
        }
        Ok(Outcome::PhoneDeleted {
            number: number.to_string(),
            removed,
        })
    }

    fn client_phones(&self, client_id: i64) -> Result<Vec<PhoneNumber>> {
        let mut stmt = self
            .tx
            .prepare("SELECT number, client_id FROM phones WHERE client_id = ?1 ORDER BY number")
            .map_err(StorageError::from)?;

        let phones = stmt
            .query_map(params![client_id], |row| {
                Ok(PhoneNumber {
                    number: row.get(0)?,
                    client_id: row.get(1)?,
                })
            })
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        Ok(phones)
    }

    // ==================== Search ====================

    fn search_clients(&self, filter: &SearchFilter) -> Result<Vec<ClientMatch>> {
        let name = filter.name_pattern();
        let lastname = filter.lastname_pattern();
        let email = filter.email_pattern();

        let matches = if let Some(number) = &filter.number {
            let mut stmt = self
                .tx
                .prepare(SEARCH_BY_NUMBER_SQL)
                .map_err(StorageError::from)?;
            stmt.query_map(
                params![name, lastname, email, number, WILDCARD],
                Self::row_to_match,
            )
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?
        } else {
            let mut stmt = self
                .tx
                .prepare(SEARCH_WITH_PHONES_SQL)
                .map_err(StorageError::from)?;
            stmt.query_map(params![name, lastname, email], Self::row_to_match)
                .map_err(StorageError::from)?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(StorageError::from)?
        };

        debug!(
            outer_join = filter.has_number(),
            rows = matches.len(),
            "client search"
        );
        Ok(matches)
    }
}
