//! Database schema definitions.
//!
//! Contains the DDL for the client and phone tables and the probes used to
//! check whether they exist.
//!
//! Declared column types follow the reference definition. `SQLite` does not
//! enforce `VARCHAR`/`CHAR` lengths, so every length limit is repeated as a
//! `CHECK` constraint.

/// Table holding clients.
pub const CLIENTS_TABLE: &str = "clients";

/// Table holding phone numbers.
pub const PHONES_TABLE: &str = "phones";

/// SQL creating both tables if they are absent.
pub const SCHEMA_SQL: &str = r"
-- Clients
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(20) NOT NULL CHECK (length(name) <= 20),
    lastname VARCHAR(30) NOT NULL CHECK (length(lastname) <= 30),
    email VARCHAR(50) NOT NULL UNIQUE CHECK (length(email) <= 50)
);

-- Phone numbers, each owned by one client
CREATE TABLE IF NOT EXISTS phones (
    number CHAR(12) NOT NULL PRIMARY KEY CHECK (length(number) <= 12),
    client_id INTEGER REFERENCES clients(id)
);
";

/// SQL dropping both tables.
///
/// Phones go first so no row ever references a dropped client. Fails if
/// either table is missing.
pub const DROP_SCHEMA_SQL: &str = r"
DROP TABLE phones;
DROP TABLE clients;
";

/// SQL counting how many of the two tables exist.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type = 'table' AND name IN ('clients', 'phones');
";

/// Number of tables [`CHECK_SCHEMA_SQL`] reports for a complete schema.
pub const SCHEMA_TABLE_COUNT: i64 = 2;
