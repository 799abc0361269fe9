//! CLI support for cosmoql
//!
//! Provides programmatic access to the `cosmoql` commands for embedding in
//! other tools and for tests.

mod inspect;
mod run;

pub use inspect::{execute_parse, execute_tokens};
pub use run::{RunOptions, execute_run};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("{0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Input must be a JSON object or an array of objects")]
    InvalidDocuments,
}
