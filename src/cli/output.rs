//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::{Client, ClientMatch, Outcome, PhoneNumber, SearchFilter};
use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the outcome of a write operation.
#[must_use]
pub fn format_outcome(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{outcome}\n"),
        OutputFormat::Json => format_json(outcome),
    }
}

/// Formats search results.
#[must_use]
pub fn format_matches(matches: &[ClientMatch], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_matches_text(matches),
        OutputFormat::Json => format_json(&matches),
    }
}

fn format_matches_text(matches: &[ClientMatch]) -> String {
    if matches.is_empty() {
        return "No clients found.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<6} {:<20} {:<30} {:<30} Phone",
        "ID", "Name", "Last name", "Email"
    );
    output.push_str(&"-".repeat(100));
    output.push('\n');

    for m in matches {
        let _ = writeln!(
            output,
            "{:<6} {:<20} {:<30} {:<30} {}",
            m.id,
            m.name,
            m.lastname,
            truncate(&m.email, 30),
            m.number.as_deref().unwrap_or("-")
        );
    }

    output
}

/// Formats a single client with its phones.
#[must_use]
pub fn format_client(client: &Client, phones: &[PhoneNumber], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Client: {}", client.full_name());
            let _ = writeln!(output, "  ID:     {}", client.id);
            let _ = writeln!(output, "  Email:  {}", client.email);
            if phones.is_empty() {
                output.push_str("  Phones: -\n");
            } else {
                let numbers: Vec<&str> = phones.iter().map(|p| p.number.as_str()).collect();
                let _ = writeln!(output, "  Phones: {}", numbers.join(", "));
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ClientWithPhones<'a> {
                client: &'a Client,
                phones: &'a [PhoneNumber],
            }
            format_json(&ClientWithPhones { client, phones })
        }
    }
}

/// One step of the demonstration sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum DemoStep {
    /// A write and what it did.
    Write {
        /// Operation outcome.
        outcome: Outcome,
    },
    /// A search and its rows.
    Search {
        /// Filter used.
        filter: SearchFilter,
        /// Matching rows.
        rows: Vec<ClientMatch>,
    },
}

/// Formats the demonstration sequence.
#[must_use]
pub fn format_demo(steps: &[DemoStep], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for step in steps {
                match step {
                    DemoStep::Write { outcome } => {
                        let _ = writeln!(output, "{outcome}");
                    }
                    DemoStep::Search { filter, rows } => {
                        let _ = writeln!(output, "Search {}:", describe_filter(filter));
                        output.push_str(&format_matches_text(rows));
                    }
                }
            }
            output
        }
        OutputFormat::Json => format_json(&steps),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput<'a> {
                error: &'a str,
                message: String,
            }
            format_json(&ErrorOutput {
                error: error.kind(),
                message: error.to_string(),
            })
        }
    }
}

fn describe_filter(filter: &SearchFilter) -> String {
    let parts: Vec<String> = [
        ("name", filter.name.as_deref()),
        ("lastname", filter.lastname.as_deref()),
        ("email", filter.email.as_deref()),
        ("phone", filter.number.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label}={v}")))
    .collect();

    if parts.is_empty() {
        "(all)".to_string()
    } else {
        parts.join(" ")
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    fn sample_match(number: Option<&str>) -> ClientMatch {
        ClientMatch {
            id: 1,
            name: "Павел".to_string(),
            lastname: "Волен".to_string(),
            email: "pavwol@mail.ru".to_string(),
            number: number.map(String::from),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("Константин", 6), "Кон...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_format_matches_empty() {
        assert_eq!(format_matches(&[], OutputFormat::Text), "No clients found.\n");
        assert_eq!(format_matches(&[], OutputFormat::Json), "[]");
    }

    #[test]
    fn test_format_matches_text_shows_missing_phone() {
        let output = format_matches(
            &[sample_match(None), sample_match(Some("89453859525"))],
            OutputFormat::Text,
        );
        assert!(output.contains("Павел"));
        assert!(output.contains("89453859525"));
        assert!(output.lines().nth(2).is_some_and(|line| line.ends_with('-')));
    }

    #[test]
    fn test_format_matches_json_null_phone() {
        let output = format_matches(&[sample_match(None)], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value[0]["number"].is_null());
        assert_eq!(value[0]["email"], "pavwol@mail.ru");
    }

    #[test]
    fn test_format_outcome() {
        let outcome = Outcome::ClientChanged { id: 2 };
        assert_eq!(
            format_outcome(&outcome, OutputFormat::Text),
            "The data of client 2 changed\n"
        );
        assert!(format_outcome(&outcome, OutputFormat::Json).contains("client_changed"));
    }

    #[test]
    fn test_format_client() {
        let client = Client::new(3, "Светлана", "Ходчекова", "svethod@mail.ru");
        let text = format_client(&client, &[], OutputFormat::Text);
        assert!(text.contains("Светлана Ходчекова"));
        assert!(text.contains("Phones: -"));

        let phones = vec![PhoneNumber::new("89554554535", 3)];
        let json = format_client(&client, &phones, OutputFormat::Json);
        assert!(json.contains("89554554535"));
    }

    #[test]
    fn test_format_error_json_carries_kind() {
        let err: Error = StorageError::ClientNotFound { id: 4 }.into();
        let output = format_error(&err, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error"], "not_found");
        assert!(value["message"].as_str().unwrap().contains("client not found: 4"));
    }

    #[test]
    fn test_describe_filter() {
        assert_eq!(describe_filter(&SearchFilter::new()), "(all)");
        assert_eq!(
            describe_filter(&SearchFilter::new().with_name("Марат").with_number("%")),
            "name=Марат phone=%"
        );
    }

    #[test]
    fn test_format_demo() {
        let steps = vec![
            DemoStep::Write {
                outcome: Outcome::SchemaCreated,
            },
            DemoStep::Search {
                filter: SearchFilter::new().with_name("Павел"),
                rows: vec![],
            },
        ];
        let text = format_demo(&steps, OutputFormat::Text);
        assert!(text.contains("Tables have been created successfully"));
        assert!(text.contains("Search name=Павел:"));
        assert!(text.contains("No clients found."));

        let json = format_demo(&steps, OutputFormat::Json);
        assert!(json.contains("\"step\": \"search\""));
    }
}
