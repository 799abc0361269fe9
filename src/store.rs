//! In-memory document store queried with the Cosmos dialect.
//!
//! # Example
//!
//! ```
//! use cosmoql::store::{InMemoryStore, StoreConfig};
//! use serde_json::json;
//!
//! let mut store = InMemoryStore::new(StoreConfig::new("people"));
//! store.insert(json!({"name": "Alice", "age": 30}));
//! store.insert(json!({"name": "Bob", "age": 25}));
//!
//! let rows = store.select("select c.name from people c where c.age > 26").unwrap();
//! assert_eq!(rows, vec![json!({"name": "Alice"})]);
//! ```

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    ast::{ColumnExpression, CosmosColumnReference, CosmosQuery, CosmosTable},
    error::ParseError,
    evaluator::{EvalError, lookup, record_path},
    parser::Parser,
};

/// Which container a store serves and how query table names are compared to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub container: String,
    pub case_sensitive: bool,
}

impl StoreConfig {
    pub fn new(container: impl Into<String>) -> Self {
        StoreConfig {
            container: container.into(),
            case_sensitive: true,
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Whether a query's `from` table names this container.
    pub fn serves(&self, table: &str) -> bool {
        if self.case_sensitive {
            self.container == table
        } else {
            self.container.to_lowercase() == table.to_lowercase()
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid query '{query}': {source}")]
    Parse {
        query: String,
        #[source]
        source: ParseError,
    },

    #[error("Query reads from '{requested}' but this store holds '{container}'")]
    ContainerMismatch { requested: String, container: String },

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Record could not be converted to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct InMemoryStore<T> {
    config: StoreConfig,
    records: Vec<T>,
}

impl<T: Serialize> InMemoryStore<T> {
    pub fn new(config: StoreConfig) -> Self {
        InMemoryStore {
            config,
            records: vec![],
        }
    }

    pub fn with_records(config: StoreConfig, records: Vec<T>) -> Self {
        InMemoryStore { config, records }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn insert(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Parses `query_text` and checks that it reads from this container.
    pub fn prepare(&self, query_text: &str) -> Result<CosmosQuery<T>, StoreError> {
        let query = Parser::parse(query_text).map_err(|source| StoreError::Parse {
            query: query_text.to_string(),
            source,
        })?;

        if !self.config.serves(&query.from.name) {
            warn!(
                requested = %query.from.name,
                container = %self.config.container,
                "query targets another container"
            );
            return Err(StoreError::ContainerMismatch {
                requested: query.from.name.clone(),
                container: self.config.container.clone(),
            });
        }
        Ok(query)
    }

    /// Records matching the query's `where` clause, in insertion order.
    pub fn query(&self, query_text: &str) -> Result<Vec<&T>, StoreError> {
        let query = self.prepare(query_text)?;
        let mut matched = vec![];
        for record in &self.records {
            let value = serde_json::to_value(record)?;
            if query.matches_value(&value)? {
                matched.push(record);
            }
        }
        debug!(
            container = %self.config.container,
            scanned = self.records.len(),
            matched = matched.len(),
            "executed query"
        );
        Ok(matched)
    }

    /// Matching records projected onto the select list.
    pub fn select(&self, query_text: &str) -> Result<Vec<JsonValue>, StoreError> {
        let query = self.prepare(query_text)?;
        let mut rows = vec![];
        for record in &self.records {
            let value = serde_json::to_value(record)?;
            if query.matches_value(&value)? {
                rows.push(project(&value, &query.select_columns, &query.from)?);
            }
        }
        debug!(
            container = %self.config.container,
            scanned = self.records.len(),
            returned = rows.len(),
            "executed select"
        );
        Ok(rows)
    }
}

/// Builds the output row for a record.
///
/// `*` or the bare table alias returns the record itself. Any other entry is
/// read as a column path and stored under its last segment; missing columns are
/// left out.
pub fn project(
    record: &JsonValue,
    columns: &[ColumnExpression],
    table: &CosmosTable,
) -> Result<JsonValue, EvalError> {
    if columns
        .iter()
        .any(|c| c.is_wildcard() || table.is_referenced_by(&c.expression))
    {
        return Ok(record.clone());
    }

    let mut row = Map::new();
    for column in columns {
        let path = record_path(&CosmosColumnReference::parse(&column.expression), table)?;
        let key = path.rsplit('.').next().unwrap_or(path.as_str()).to_string();
        if let Some(value) = lookup(record, &path) {
            row.insert(key, value.clone());
        }
    }
    Ok(JsonValue::Object(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_case_sensitivity() {
        let config = StoreConfig::new("People");
        assert!(config.serves("People"));
        assert!(!config.serves("people"));
        assert!(config.case_insensitive().serves("people"));
    }

    #[test]
    fn test_projection() {
        let table = CosmosTable::with_alias("people", "c");
        let record = json!({"name": "Ann", "address": {"city": "Oslo"}});

        let columns = vec![
            ColumnExpression::new("c.name"),
            ColumnExpression::new("c.address.city"),
            ColumnExpression::new("c.missing"),
        ];
        assert_eq!(
            project(&record, &columns, &table).unwrap(),
            json!({"name": "Ann", "city": "Oslo"})
        );

        let wildcard = vec![ColumnExpression::new("*")];
        assert_eq!(project(&record, &wildcard, &table).unwrap(), record);

        let alias = vec![ColumnExpression::new("c")];
        assert_eq!(project(&record, &alias, &table).unwrap(), record);

        let unknown = vec![ColumnExpression::new("x.name")];
        assert!(matches!(
            project(&record, &unknown, &table),
            Err(EvalError::UnknownAlias { .. })
        ));
    }
}
