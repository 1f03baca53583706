//! Table CLI commands.

use clap::{Parser, Subcommand};

/// Table commands.
#[derive(Debug, Parser)]
pub struct TableCommand {
    #[command(subcommand)]
    pub action: TableAction,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TableAction {
    /// Create the Movies table.
    Create,
    /// Load the server's sample data file.
    LoadSampleData,
}
