use std::{fmt, marker::PhantomData};

use serde::Serialize;

use crate::ast::{Operator, Token};

/// Column named by a filter, optionally qualified with a table alias.
///
/// # Examples
/// ```
/// use cosmoql::ast::CosmosColumnReference;
///
/// let column = CosmosColumnReference::parse("c.address.city");
/// assert_eq!(column.table_alias.as_deref(), Some("c"));
/// assert_eq!(column.column_name, "address.city");
///
/// let bare = CosmosColumnReference::parse("age");
/// assert_eq!(bare.table_alias, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CosmosColumnReference {
    pub column_name: String,
    pub table_alias: Option<String>,
}

impl CosmosColumnReference {
    /// Splits `alias.column` at the first dot. A reference without a dot is a bare column.
    pub fn parse(reference: &str) -> Self {
        match reference.split_once('.') {
            Some((alias, column)) => CosmosColumnReference {
                column_name: column.to_string(),
                table_alias: Some(alias.to_string()),
            },
            None => CosmosColumnReference {
                column_name: reference.to_string(),
                table_alias: None,
            },
        }
    }
}

impl fmt::Display for CosmosColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table_alias {
            Some(alias) => write!(f, "{}.{}", alias, self.column_name),
            None => f.write_str(&self.column_name),
        }
    }
}

/// Single `column operator value` comparison.
#[derive(Serialize)]
#[serde(bound = "")]
pub struct CosmosQueryFilter<T> {
    pub column_name: CosmosColumnReference,
    pub operator: Operator,
    pub value: Token,
    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

impl<T> CosmosQueryFilter<T> {
    pub fn new(column_name: CosmosColumnReference, operator: Operator, value: Token) -> Self {
        CosmosQueryFilter {
            column_name,
            operator,
            value,
            marker: PhantomData,
        }
    }
}

impl<T> Clone for CosmosQueryFilter<T> {
    fn clone(&self) -> Self {
        CosmosQueryFilter::new(
            self.column_name.clone(),
            self.operator.clone(),
            self.value.clone(),
        )
    }
}

impl<T> PartialEq for CosmosQueryFilter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.column_name == other.column_name
            && self.operator == other.operator
            && self.value == other.value
    }
}

impl<T> fmt::Debug for CosmosQueryFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosQueryFilter")
            .field("column_name", &self.column_name)
            .field("operator", &self.operator)
            .field("value", &self.value)
            .finish()
    }
}

impl<T> fmt::Display for CosmosQueryFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.column_name,
            self.operator.symbol(),
            self.value.to_source()
        )
    }
}

/// One logical group of filters.
///
/// A filter lands in `and` or `or` depending on the connective that closed it.
/// When both lists are non-empty the group matches if all of `and` match or
/// any of `or` match.
#[derive(Serialize)]
#[serde(bound = "")]
pub struct LogicalCosmosQueryFilter<T> {
    pub and: Vec<CosmosQueryFilter<T>>,
    pub or: Vec<CosmosQueryFilter<T>>,
}

impl<T> LogicalCosmosQueryFilter<T> {
    pub fn new() -> Self {
        LogicalCosmosQueryFilter {
            and: Vec::new(),
            or: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.and.is_empty() && self.or.is_empty()
    }

    pub fn len(&self) -> usize {
        self.and.len() + self.or.len()
    }
}

impl<T> Default for LogicalCosmosQueryFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LogicalCosmosQueryFilter<T> {
    fn clone(&self) -> Self {
        LogicalCosmosQueryFilter {
            and: self.and.clone(),
            or: self.or.clone(),
        }
    }
}

impl<T> PartialEq for LogicalCosmosQueryFilter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.and == other.and && self.or == other.or
    }
}

impl<T> fmt::Debug for LogicalCosmosQueryFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalCosmosQueryFilter")
            .field("and", &self.and)
            .field("or", &self.or)
            .finish()
    }
}

/// Writes the group so that re-reading it puts every filter back in the same list.
///
/// A filter is filed under the connective that follows it, and the last filter under
/// the last connective seen. The list holding the last filter is therefore written
/// last and joined by its own connective; the other list is written first with each
/// entry followed by its connective.
impl<T> fmt::Display for LogicalCosmosQueryFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (leading, leading_word, trailing, trailing_word) = if self.or.len() >= 2
            || self.and.is_empty()
        {
            (&self.and, "and", &self.or, "or")
        } else {
            (&self.or, "or", &self.and, "and")
        };

        for filter in leading {
            write!(f, "{} {} ", filter, leading_word)?;
        }
        let trailing = trailing
            .iter()
            .map(|filter| filter.to_string())
            .collect::<Vec<_>>()
            .join(&format!(" {} ", trailing_word));
        f.write_str(&trailing)
    }
}
