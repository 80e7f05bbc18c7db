//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clientdb: client contact records backed by `SQLite`.
///
/// Stores clients and their phone numbers and searches them by name,
/// family name, email or phone.
#[derive(Parser, Debug)]
#[command(name = "clientdb")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file.
    ///
    /// Defaults to `.clientdb/clients.db` in the current directory.
    #[arg(short, long, env = "CLIENTDB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the client and phone tables if they don't exist.
    Init,

    /// Drop the client and phone tables (deletes all data).
    Reset {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Add a client, optionally with a phone number.
    AddClient {
        /// Given name.
        name: String,

        /// Family name.
        lastname: String,

        /// Email address (must be unique).
        email: String,

        /// Phone number to register with the client.
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Add a phone number to an existing client.
    AddPhone {
        /// Client ID.
        client_id: i64,

        /// Phone number.
        number: String,
    },

    /// Change a client's fields; omitted fields keep their values.
    ChangeClient {
        /// Client ID.
        id: i64,

        /// New given name.
        #[arg(short, long)]
        name: Option<String>,

        /// New family name.
        #[arg(short, long)]
        lastname: Option<String>,

        /// New email address.
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Delete a phone number.
    #[command(alias = "rm-phone")]
    DeletePhone {
        /// Phone number.
        number: String,
    },

    /// Delete a client and all of its phone numbers.
    #[command(alias = "rm")]
    DeleteClient {
        /// Client ID.
        id: i64,
    },

    /// Show a client and its phone numbers.
    Show {
        /// Client ID.
        id: i64,
    },

    /// Search clients by substring of name, family name or email, or by
    /// phone number.
    ///
    /// Without --phone only clients that have a phone are listed. With
    /// --phone every client is considered; --phone '%' also lists clients
    /// without a phone.
    Search {
        /// Substring of the given name.
        #[arg(short, long)]
        name: Option<String>,

        /// Substring of the family name.
        #[arg(short, long)]
        lastname: Option<String>,

        /// Substring of the email.
        #[arg(short, long)]
        email: Option<String>,

        /// Phone number (a `LIKE` pattern; '%' matches any).
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Run the demonstration sequence against the database.
    ///
    /// Drops existing tables, recreates them, and runs sample inserts,
    /// updates, deletes and searches.
    Demo {
        /// Skip confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_db_path() {
        let cli = Cli {
            db_path: None,
            verbose: false,
            format: "text".to_string(),
            command: Commands::Init,
        };
        assert_eq!(
            cli.get_db_path(),
            PathBuf::from(crate::storage::DEFAULT_DB_PATH)
        );
    }

    #[test]
    fn test_custom_db_path() {
        let cli = Cli {
            db_path: Some(PathBuf::from("/custom/clients.db")),
            verbose: false,
            format: "text".to_string(),
            command: Commands::Init,
        };
        assert_eq!(cli.get_db_path(), PathBuf::from("/custom/clients.db"));
    }

    #[test]
    fn test_parse_add_client_with_phone() {
        let cli = Cli::try_parse_from([
            "clientdb",
            "add-client",
            "Марат",
            "Башкаров",
            "martbash@mail.ru",
            "--phone",
            "89998554050",
        ])
        .unwrap();

        match cli.command {
            Commands::AddClient {
                name,
                lastname,
                email,
                phone,
            } => {
                assert_eq!(name, "Марат");
                assert_eq!(lastname, "Башкаров");
                assert_eq!(email, "martbash@mail.ru");
                assert_eq!(phone.as_deref(), Some("89998554050"));
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_change_client_partial() {
        let cli =
            Cli::try_parse_from(["clientdb", "change-client", "2", "--lastname", "Коротков"])
                .unwrap();

        match cli.command {
            Commands::ChangeClient {
                id,
                name,
                lastname,
                email,
            } => {
                assert_eq!(id, 2);
                assert!(name.is_none());
                assert_eq!(lastname.as_deref(), Some("Коротков"));
                assert!(email.is_none());
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["clientdb", "search", "--format", "json", "-v"]).unwrap();
        assert_eq!(cli.format, "json");
        assert!(cli.verbose);
    }
}
