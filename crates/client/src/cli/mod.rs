//! CLI command definitions.

pub mod health;
pub mod items;
pub mod queries;
pub mod tables;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the Movies API.
#[derive(Debug, Parser)]
#[command(name = "movies-client")]
#[command(about = "CLI client for the Movies API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "MOVIES_URL", default_value = "http://localhost:5000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Table creation and sample data.
    Table(tables::TableCommand),
    /// Single-movie operations.
    Items(items::ItemsCommand),
    /// Queries and scans.
    Query(queries::QueryCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_by_title() {
        let cli = Cli::try_parse_from([
            "movies-client",
            "--format",
            "json",
            "query",
            "by-year-and-title",
            "1982",
            "--letter1",
            "B",
            "--letter2",
            "M",
        ])
        .unwrap();

        assert!(matches!(cli.format, OutputFormat::Json));
        match cli.command {
            Commands::Query(query) => match query.action {
                queries::QueryAction::ByYearAndTitle {
                    year,
                    letter1,
                    letter2,
                } => {
                    assert_eq!(year, 1982);
                    assert_eq!(letter1, "B");
                    assert_eq!(letter2, "M");
                }
                other => panic!("unexpected action: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_update_actors() {
        let cli = Cli::try_parse_from([
            "movies-client",
            "items",
            "update",
            "2015",
            "The Big New Movie",
            "--rating",
            "5.5",
            "--plot",
            "Everything happens all at once.",
            "--actor",
            "Larry",
            "--actor",
            "Moe",
        ])
        .unwrap();

        match cli.command {
            Commands::Items(items) => match items.action {
                items::ItemsAction::Update { rating, actors, .. } => {
                    assert_eq!(rating, 5.5);
                    assert_eq!(actors, vec!["Larry", "Moe"]);
                }
                other => panic!("unexpected action: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
