//! Movie CLI commands.

use clap::{Parser, Subcommand};

/// Single-movie commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Available movie actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// Store a movie.
    Create {
        /// Release year.
        year: i64,
        /// Movie title.
        title: String,
        /// Info document as JSON.
        #[arg(long, default_value = "{}")]
        info: String,
    },
    /// Get a movie by key.
    Get {
        /// Release year.
        year: i64,
        /// Movie title.
        title: String,
    },
    /// Replace rating, plot and actors.
    Update {
        /// Release year.
        year: i64,
        /// Movie title.
        title: String,
        /// New rating.
        #[arg(long)]
        rating: f64,
        /// New plot.
        #[arg(long)]
        plot: String,
        /// Actor name (repeatable).
        #[arg(long = "actor")]
        actors: Vec<String>,
    },
    /// Add one to the rating.
    IncrementRating {
        /// Release year.
        year: i64,
        /// Movie title.
        title: String,
    },
    /// Remove the first actor if there are at least three.
    RemoveFirstActor {
        /// Release year.
        year: i64,
        /// Movie title.
        title: String,
    },
    /// Delete a movie rated 8.0 or lower.
    Delete {
        /// Release year.
        year: i64,
        /// Movie title.
        title: String,
    },
}
