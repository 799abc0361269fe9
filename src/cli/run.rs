//! Execute queries against JSON documents

use serde_json::Value as JsonValue;

use super::CliError;
use crate::store::{InMemoryStore, StoreConfig};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// The query to execute
    pub query: String,
    /// Container name the documents belong to
    pub container: String,
    /// JSON input string: one document or an array of documents
    pub input: Option<String>,
    /// Compare the container name case-insensitively
    pub ignore_case: bool,
}

fn documents(input: &str) -> Result<Vec<JsonValue>, CliError> {
    let value: JsonValue = serde_json::from_str(input)?;
    match value {
        JsonValue::Array(items) if items.iter().all(JsonValue::is_object) => Ok(items),
        object @ JsonValue::Object(_) => Ok(vec![object]),
        _ => Err(CliError::InvalidDocuments),
    }
}

/// Run the query and return the projected rows
pub fn execute_run(options: &RunOptions) -> Result<Vec<JsonValue>, CliError> {
    let input = options.input.as_deref().ok_or(CliError::NoInput)?;

    let mut config = StoreConfig::new(&options.container);
    if options.ignore_case {
        config = config.case_insensitive();
    }

    let store = InMemoryStore::with_records(config, documents(input)?);
    Ok(store.select(&options.query)?)
}
