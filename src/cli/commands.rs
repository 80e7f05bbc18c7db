//! CLI command implementations.
//!
//! Each command opens the database, runs in one session and commits it on
//! success. A failing command rolls its session back.

use crate::cli::output::{
    DemoStep, OutputFormat, format_client, format_demo, format_matches, format_outcome,
};
use crate::cli::parser::{Cli, Commands};
use crate::core::{ClientChanges, NewClient, Outcome, SearchFilter};
use crate::error::{CommandError, Result, StorageError};
use crate::storage::{ContactStore, Session, SqliteStorage};
use std::path::Path;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init => cmd_init(&db_path, format),
        Commands::Reset { yes } => cmd_reset(&db_path, *yes, format),
        Commands::AddClient {
            name,
            lastname,
            email,
            phone,
        } => {
            let client = NewClient {
                name: name.clone(),
                lastname: lastname.clone(),
                email: email.clone(),
                number: phone.clone(),
            };
            cmd_add_client(&db_path, &client, format)
        }
        Commands::AddPhone { client_id, number } => {
            cmd_add_phone(&db_path, *client_id, number, format)
        }
        Commands::ChangeClient {
            id,
            name,
            lastname,
            email,
        } => {
            let changes = ClientChanges {
                name: name.clone(),
                lastname: lastname.clone(),
                email: email.clone(),
            };
            cmd_change_client(&db_path, *id, &changes, format)
        }
        Commands::DeletePhone { number } => cmd_delete_phone(&db_path, number, format),
        Commands::DeleteClient { id } => cmd_delete_client(&db_path, *id, format),
        Commands::Show { id } => cmd_show(&db_path, *id, format),
        Commands::Search {
            name,
            lastname,
            email,
            phone,
        } => {
            let filter = SearchFilter {
                name: name.clone(),
                lastname: lastname.clone(),
                email: email.clone(),
                number: phone.clone(),
            };
            cmd_search(&db_path, &filter, format)
        }
        Commands::Demo { yes } => cmd_demo(&db_path, *yes, format),
    }
}

/// Fails unless both tables exist.
fn require_schema(session: &Session<'_>) -> Result<()> {
    if session.schema_exists()? {
        Ok(())
    } else {
        Err(
            StorageError::Schema("client tables do not exist. Run: clientdb init".to_string())
                .into(),
        )
    }
}

/// Opens the database and runs one write in a checked session.
fn run_write<F>(db_path: &Path, format: OutputFormat, write: F) -> Result<String>
where
    F: FnOnce(&mut Session<'_>) -> Result<Outcome>,
{
    let mut storage = SqliteStorage::open(db_path)?;
    let outcome = storage.with_session(|session| {
        require_schema(session)?;
        write(session)
    })?;
    Ok(format_outcome(&outcome, format))
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, format: OutputFormat) -> Result<String> {
    let mut storage = SqliteStorage::open(db_path)?;
    let outcome = storage.with_session(|session| session.initialize_schema())?;
    Ok(format_outcome(&outcome, format))
}

fn cmd_reset(db_path: &Path, yes: bool, format: OutputFormat) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm reset. This will delete all data.".to_string(),
        )
        .into());
    }

    let mut storage = SqliteStorage::open(db_path)?;
    let outcome = storage.with_session(|session| session.reset_schema())?;
    Ok(format_outcome(&outcome, format))
}

fn cmd_add_client(db_path: &Path, client: &NewClient, format: OutputFormat) -> Result<String> {
    run_write(db_path, format, |session| session.add_client(client))
}

fn cmd_add_phone(
    db_path: &Path,
    client_id: i64,
    number: &str,
    format: OutputFormat,
) -> Result<String> {
    run_write(db_path, format, |session| session.add_phone(client_id, number))
}

fn cmd_change_client(
    db_path: &Path,
    id: i64,
    changes: &ClientChanges,
    format: OutputFormat,
) -> Result<String> {
    run_write(db_path, format, |session| session.change_client(id, changes))
}

fn cmd_delete_phone(db_path: &Path, number: &str, format: OutputFormat) -> Result<String> {
    run_write(db_path, format, |session| session.delete_phone(number))
}

fn cmd_delete_client(db_path: &Path, id: i64, format: OutputFormat) -> Result<String> {
    run_write(db_path, format, |session| session.delete_client(id))
}

fn cmd_show(db_path: &Path, id: i64, format: OutputFormat) -> Result<String> {
    let mut storage = SqliteStorage::open(db_path)?;
    let (client, phones) = storage.with_session(|session| {
        require_schema(session)?;
        let client = session
            .get_client(id)?
            .ok_or(StorageError::ClientNotFound { id })?;
        let phones = session.client_phones(id)?;
        Ok((client, phones))
    })?;
    Ok(format_client(&client, &phones, format))
}

fn cmd_search(db_path: &Path, filter: &SearchFilter, format: OutputFormat) -> Result<String> {
    let mut storage = SqliteStorage::open(db_path)?;
    let matches = storage.with_session(|session| {
        require_schema(session)?;
        session.search_clients(filter)
    })?;
    Ok(format_matches(&matches, format))
}

fn cmd_demo(db_path: &Path, yes: bool, format: OutputFormat) -> Result<String> {
    if !yes {
        return Err(CommandError::ExecutionFailed(
            "Use --yes to confirm the demo. It drops all existing data.".to_string(),
        )
        .into());
    }

    let mut storage = SqliteStorage::open(db_path)?;
    let steps = storage.with_session(run_demo)?;
    Ok(format_demo(&steps, format))
}

/// Runs the demonstration sequence in one session.
///
/// Starts from an empty schema, so existing tables are dropped first.
///
/// # Errors
///
/// Returns the first error raised by any step.
pub fn run_demo(session: &mut Session<'_>) -> Result<Vec<DemoStep>> {
    let mut steps = Vec::new();

    if session.schema_exists()? {
        record(&mut steps, session.reset_schema()?);
    }
    record(&mut steps, session.initialize_schema()?);

    let konstantin = record(
        &mut steps,
        session.add_client(
            &NewClient::new("Константин", "Хабеников", "konsthab@mail.ru")
                .with_phone("89219212131"),
        )?,
    );
    let marat = record(
        &mut steps,
        session.add_client(
            &NewClient::new("Марат", "Башкаров", "martbash@mail.ru").with_phone("89998554050"),
        )?,
    );
    let svetlana = record(
        &mut steps,
        session.add_client(&NewClient::new("Светлана", "Ходчекова", "svethod@mail.ru"))?,
    );
    record(
        &mut steps,
        session.add_client(&NewClient::new("Павел", "Волен", "pavwol@mail.ru"))?,
    );

    let (Some(konstantin), Some(marat), Some(svetlana)) = (konstantin, marat, svetlana) else {
        return Err(
            CommandError::ExecutionFailed("demo client was not assigned an ID".to_string()).into(),
        );
    };

    record(&mut steps, session.add_phone(svetlana, "89554554535")?);
    record(&mut steps, session.add_phone(marat, "89453859525")?);

    record(
        &mut steps,
        session.change_client(
            marat,
            &ClientChanges::new()
                .with_name("Матвей")
                .with_lastname("Коротков")
                .with_email("matvcor@mail.ru"),
        )?,
    );

    record(&mut steps, session.delete_phone("89554554535")?);
    record(&mut steps, session.delete_client(konstantin)?);

    let searches = [
        SearchFilter::new()
            .with_name("Павел")
            .with_lastname("Волен")
            .with_email("pavwol@mail.ru"),
        SearchFilter::new().with_name("Марат"),
        SearchFilter::new()
            .with_name("Константин")
            .with_lastname("Хабеников")
            .with_email("konsthab@mail.ru")
            .with_number("89219212131"),
    ];
    for filter in searches {
        let rows = session.search_clients(&filter)?;
        steps.push(DemoStep::Search { filter, rows });
    }

    Ok(steps)
}

/// Appends a write step and returns the client it touched.
fn record(steps: &mut Vec<DemoStep>, outcome: Outcome) -> Option<i64> {
    let id = outcome.client_id();
    steps.push(DemoStep::Write { outcome });
    id
}
