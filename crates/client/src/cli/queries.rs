//! Query CLI commands.

use clap::{Parser, Subcommand};

/// Query and scan commands.
#[derive(Debug, Parser)]
pub struct QueryCommand {
    #[command(subcommand)]
    pub action: QueryAction,
}

/// Available query actions.
#[derive(Debug, Subcommand)]
pub enum QueryAction {
    /// All movies of one year.
    ByYear {
        /// Release year.
        year: i64,
    },
    /// Movies of one year with a title in an inclusive range.
    ByYearAndTitle {
        /// Release year.
        year: i64,
        /// Lower title bound.
        #[arg(long)]
        letter1: String,
        /// Upper title bound.
        #[arg(long)]
        letter2: String,
    },
    /// Movies released within an inclusive year range.
    Scan {
        /// First year.
        #[arg(long)]
        start_yr: i64,
        /// Last year.
        #[arg(long)]
        end_yr: i64,
    },
}
