//! movies_client - CLI client for the Movies HTTP adapter.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::MoviesClient;
pub use error::{ClientError, Result};
