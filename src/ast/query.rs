use std::{fmt, marker::PhantomData};

use serde::Serialize;

use crate::ast::LogicalCosmosQueryFilter;

/// Complete parsed query.
///
/// `T` is the record type the query will be evaluated against. It does not
/// influence parsing.
#[derive(Serialize)]
#[serde(bound = "")]
pub struct CosmosQuery<T> {
    /// Select list entries in order of appearance
    pub select_columns: Vec<ColumnExpression>,

    /// Source container
    pub from: CosmosTable,

    /// Filter groups of the `where` clause, `None` when the query has no `where`
    #[serde(rename = "where")]
    pub where_clause: Option<Vec<LogicalCosmosQueryFilter<T>>>,

    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

impl<T> CosmosQuery<T> {
    pub fn new(
        select_columns: Vec<ColumnExpression>,
        from: CosmosTable,
        where_clause: Option<Vec<LogicalCosmosQueryFilter<T>>>,
    ) -> Self {
        CosmosQuery {
            select_columns,
            from,
            where_clause,
            marker: PhantomData,
        }
    }

    /// Iterates every filter of every group, `and` list before `or` list.
    pub fn filters(&self) -> impl Iterator<Item = &crate::ast::CosmosQueryFilter<T>> {
        self.where_clause
            .iter()
            .flatten()
            .flat_map(|group| group.and.iter().chain(group.or.iter()))
    }
}

impl<T> Clone for CosmosQuery<T> {
    fn clone(&self) -> Self {
        CosmosQuery::new(
            self.select_columns.clone(),
            self.from.clone(),
            self.where_clause.clone(),
        )
    }
}

impl<T> PartialEq for CosmosQuery<T> {
    fn eq(&self, other: &Self) -> bool {
        self.select_columns == other.select_columns
            && self.from == other.from
            && self.where_clause == other.where_clause
    }
}

impl<T> fmt::Debug for CosmosQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosQuery")
            .field("select_columns", &self.select_columns)
            .field("from", &self.from)
            .field("where_clause", &self.where_clause)
            .finish()
    }
}

/// Writes the query back as text that parses to an equal query.
impl<T> fmt::Display for CosmosQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .select_columns
            .iter()
            .map(|c| c.expression.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "select {} from {}", columns, self.from)?;

        if let Some(groups) = &self.where_clause {
            for group in groups {
                write!(f, " where {}", group)?;
            }
        }
        Ok(())
    }
}

/// Table named in the `from` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CosmosTable {
    pub name: String,
    pub alias: Option<String>,
}

impl CosmosTable {
    pub fn new(name: impl Into<String>) -> Self {
        CosmosTable {
            name: name.into(),
            alias: None,
        }
    }

    pub fn with_alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
        CosmosTable {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// True when `alias` names this table, either by alias or by name.
    pub fn is_referenced_by(&self, alias: &str) -> bool {
        self.alias.as_deref() == Some(alias) || self.name == alias
    }
}

impl fmt::Display for CosmosTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} {}", self.name, alias),
            None => f.write_str(&self.name),
        }
    }
}

/// Raw select list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnExpression {
    pub expression: String,
}

impl ColumnExpression {
    pub fn new(expression: impl Into<String>) -> Self {
        ColumnExpression {
            expression: expression.into(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.expression == "*"
    }
}
