//! Filter evaluation against JSON records.
//!
//! Records are viewed as [`serde_json::Value`]s. Numbers are compared as
//! [`Decimal`]s so that `1`, `1.0` and `1.00` are equal.

use std::{cmp::Ordering, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::trace;

use crate::ast::{
    CosmosColumnReference, CosmosQuery, CosmosQueryFilter, CosmosTable, LogicalCosmosQueryFilter,
    Operator, Token, TokenKind,
};

/// Errors that can occur while matching a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    /// `in` used with something other than an array literal
    #[error("Operator 'in' expects an array value, found '{0}'")]
    ExpectedArray(String),

    #[error("{kind} token '{content}' cannot be used as a value")]
    UnsupportedValue { kind: TokenKind, content: String },

    /// Column qualified with something other than the table name or alias
    #[error("Unknown alias '{alias}' in '{column}'; the query reads from {table}")]
    UnknownAlias {
        alias: String,
        column: String,
        table: String,
    },

    #[error("Record could not be converted to JSON: {0}")]
    Serialize(String),
}

/// Converts a filter value token into the JSON value it denotes.
pub fn literal(token: &Token) -> Result<JsonValue, EvalError> {
    match token.kind {
        TokenKind::Text => Ok(JsonValue::String(token.content.clone())),
        TokenKind::Number => serde_json::from_str::<serde_json::Number>(&token.content)
            .map(JsonValue::Number)
            .map_err(|_| EvalError::InvalidNumber(token.content.clone())),
        TokenKind::Array => token
            .elements
            .iter()
            .map(literal)
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        TokenKind::Query => match token.content.as_str() {
            "true" => Ok(JsonValue::Bool(true)),
            "false" => Ok(JsonValue::Bool(false)),
            "null" => Ok(JsonValue::Null),
            _ => Err(EvalError::UnsupportedValue {
                kind: token.kind,
                content: token.content.clone(),
            }),
        },
        _ => Err(EvalError::UnsupportedValue {
            kind: token.kind,
            content: token.content.clone(),
        }),
    }
}

/// Reads a number from its shortest decimal rendering, so `0.1` stays exactly
/// `0.1`. `None` when the magnitude is outside the `Decimal` range.
fn decimal(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn compare_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Option<Ordering> {
    match (decimal(a), decimal(b)) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        // beyond Decimal's range
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Orders two scalars of the same type. Mixed types are unordered.
fn compare(left: &JsonValue, right: &JsonValue) -> Option<Ordering> {
    match (left, right) {
        (JsonValue::Number(a), JsonValue::Number(b)) => compare_numbers(a, b),
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        (JsonValue::Bool(a), JsonValue::Bool(b)) => Some(a.cmp(b)),
        (JsonValue::Null, JsonValue::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn equals(left: &JsonValue, right: &JsonValue) -> bool {
    match (left, right) {
        (JsonValue::Array(_), JsonValue::Array(_)) | (JsonValue::Object(_), JsonValue::Object(_)) => {
            left == right
        }
        _ => compare(left, right) == Some(Ordering::Equal),
    }
}

/// Dotted path of a column inside a record of `table`.
///
/// A qualified column must be qualified with the table alias or the table
/// name; the qualifier is dropped from the path.
pub fn record_path(column: &CosmosColumnReference, table: &CosmosTable) -> Result<String, EvalError> {
    match &column.table_alias {
        None => Ok(column.column_name.clone()),
        Some(alias) if table.is_referenced_by(alias) => Ok(column.column_name.clone()),
        Some(alias) => Err(EvalError::UnknownAlias {
            alias: alias.clone(),
            column: column.to_string(),
            table: table.to_string(),
        }),
    }
}

/// Follows a dotted path. Numeric segments index into arrays.
pub fn lookup<'a>(record: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    path.split('.').try_fold(record, |value, segment| match value {
        JsonValue::Object(map) => map.get(segment),
        JsonValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Applies `operator` to a field. A missing field satisfies no comparison.
fn apply(operator: &Operator, field: Option<&JsonValue>, value: &JsonValue) -> Result<bool, EvalError> {
    let field = match (operator, field) {
        (Operator::Not(inner), _) => return Ok(!apply(inner, field, value)?),
        (_, None) => return Ok(false),
        (_, Some(field)) => field,
    };

    let ordering = compare(field, value);
    Ok(match operator {
        Operator::EqualTo => equals(field, value),
        Operator::In => match value {
            JsonValue::Array(items) => items.iter().any(|item| equals(field, item)),
            other => return Err(EvalError::ExpectedArray(other.to_string())),
        },
        Operator::GreaterThan => ordering == Some(Ordering::Greater),
        Operator::GreaterThanOrEqualTo => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessThan => ordering == Some(Ordering::Less),
        Operator::LessThanOrEqualTo => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        Operator::Not(inner) => !apply(inner, Some(field), value)?,
    })
}

impl<T> CosmosQueryFilter<T> {
    /// Evaluates the filter against a JSON record read from `table`.
    pub fn matches(&self, record: &JsonValue, table: &CosmosTable) -> Result<bool, EvalError> {
        let value = literal(&self.value)?;
        let field = lookup(record, &record_path(&self.column_name, table)?);
        let matched = apply(&self.operator, field, &value)?;
        trace!(filter = %self, matched, "evaluated filter");
        Ok(matched)
    }
}

impl<T> LogicalCosmosQueryFilter<T> {
    /// An empty group matches everything. With both lists populated the group
    /// matches when all `and` filters match or any `or` filter matches.
    pub fn matches(&self, record: &JsonValue, table: &CosmosTable) -> Result<bool, EvalError> {
        let all_and = || -> Result<bool, EvalError> {
            for filter in &self.and {
                if !filter.matches(record, table)? {
                    return Ok(false);
                }
            }
            Ok(true)
        };
        let any_or = || -> Result<bool, EvalError> {
            for filter in &self.or {
                if filter.matches(record, table)? {
                    return Ok(true);
                }
            }
            Ok(false)
        };

        match (self.and.is_empty(), self.or.is_empty()) {
            (true, true) => Ok(true),
            (false, true) => all_and(),
            (true, false) => any_or(),
            (false, false) => Ok(all_and()? || any_or()?),
        }
    }
}

impl<T> CosmosQuery<T> {
    /// Evaluates the `where` clause against a JSON record.
    pub fn matches_value(&self, record: &JsonValue) -> Result<bool, EvalError> {
        for group in self.where_clause.iter().flatten() {
            if !group.matches(record, &self.from)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<T: Serialize> CosmosQuery<T> {
    /// Evaluates the `where` clause against a typed record.
    pub fn matches(&self, record: &T) -> Result<bool, EvalError> {
        let value =
            serde_json::to_value(record).map_err(|e| EvalError::Serialize(e.to_string()))?;
        self.matches_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_equality() {
        assert!(equals(&json!(1), &json!(1.0)));
        assert!(!equals(&json!(1), &json!("1")));
        assert_eq!(compare(&json!(2.5), &json!(10)), Some(Ordering::Less));
    }

    #[test]
    fn test_lookup_nested_and_indexed() {
        let record = json!({"address": {"lines": ["a", "b"]}});
        assert_eq!(lookup(&record, "address.lines.1"), Some(&json!("b")));
        assert_eq!(lookup(&record, "address.zip"), None);
    }

    #[test]
    fn test_record_path() {
        let table = CosmosTable::with_alias("people", "c");
        let aliased = CosmosColumnReference::parse("c.address.city");
        assert_eq!(record_path(&aliased, &table).unwrap(), "address.city");

        let by_name = CosmosColumnReference::parse("people.age");
        assert_eq!(record_path(&by_name, &table).unwrap(), "age");

        let bare = CosmosColumnReference::parse("age");
        assert_eq!(record_path(&bare, &table).unwrap(), "age");

        let unknown = CosmosColumnReference::parse("address.city");
        assert_eq!(
            record_path(&unknown, &table),
            Err(EvalError::UnknownAlias {
                alias: "address".to_string(),
                column: "address.city".to_string(),
                table: "people c".to_string(),
            })
        );
    }

    #[test]
    fn test_large_and_exact_numbers() {
        assert_eq!(compare(&json!(1e30), &json!(2e30)), Some(Ordering::Less));
        assert_eq!(compare(&json!(9e28), &json!(9e28)), Some(Ordering::Equal));
        assert_eq!(compare(&json!(1e30), &json!(5)), Some(Ordering::Greater));
        assert!(equals(&json!(0.1), &json!(0.10)));
        assert_eq!(compare(&json!(0.3), &json!(0.1 + 0.2)), Some(Ordering::Less));
    }

    #[test]
    fn test_unknown_alias_in_filter() {
        let query = crate::parse::<JsonValue>("select * from people c where zz.name = 'A'").unwrap();
        assert!(matches!(
            query.matches_value(&json!({"name": "A"})),
            Err(EvalError::UnknownAlias { .. })
        ));

        let by_name = crate::parse::<JsonValue>("select * from people c where people.name = 'A'").unwrap();
        assert!(by_name.matches_value(&json!({"name": "A"})).unwrap());
    }

    #[test]
    fn test_missing_field() {
        assert!(!apply(&Operator::EqualTo, None, &json!(1)).unwrap());
        assert!(apply(&Operator::EqualTo.negate(), None, &json!(1)).unwrap());
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal(&Token::new("-1.5", TokenKind::Number)).unwrap(), json!(-1.5));
        assert_eq!(literal(&Token::new("null", TokenKind::Query)).unwrap(), json!(null));
        assert!(literal(&Token::new("5.", TokenKind::Number)).is_err());

        let array = Token::array(vec![
            Token::new("a", TokenKind::Text),
            Token::new("2", TokenKind::Number),
        ]);
        assert_eq!(literal(&array).unwrap(), json!(["a", 2]));
    }
}
