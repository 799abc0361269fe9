//! Show how a query is tokenized and parsed

use serde_json::Value as JsonValue;

use super::CliError;
use crate::{Parser, Token, lexer::tokenise};

/// Tokens of a query, comments included.
pub fn execute_tokens(query: &str) -> Result<Vec<Token>, CliError> {
    tokenise(query).map_err(|e| CliError::Parse(e.into()))
}

/// The parsed query as JSON.
pub fn execute_parse(query: &str) -> Result<JsonValue, CliError> {
    let parsed = Parser::<JsonValue>::parse(query)?;
    Ok(serde_json::to_value(&parsed)?)
}
