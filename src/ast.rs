//! # Cosmos Query Dialect - Tokens and Query Model
//!
//! This module defines the tokens produced by the [lexer](crate::lexer) and the
//! strongly-typed query the [parser](crate::parser) builds from them.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Classified units of query text
//! - **[query]** - The parsed query: select list, source table, `where` groups
//! - **[filters]** - Column references, single filters and logical groups
//! - **[operators]** - Comparison operators and their negation
//!
//! ## Quick Start
//!
//! ```text
//! select c.name, c.age from people c where c.age >= 18 and c.city = 'Oslo'
//! ```
//!
//! This query reads two columns from the `people` container (aliased `c`) and
//! keeps records whose `age` is at least 18 and whose `city` is Oslo.
//!
//! ## Grammar
//!
//! ```text
//! select <col>[, <col>...] from <table>[ <alias>]
//!     [where <col> <op> <value> (<and|or> <col> <op> <value>)*]
//! ```
//!
//! - `<op>` is one of `=`, `is`, `is not`, `<>`, `!=`, `>`, `>=`, `<`, `<=`, `in`
//! - `<value>` is a quoted string, a number, `true`/`false`/`null`, or a
//!   parenthesized list such as `('a', 'b')`
//! - `--`, `//` and `/* */` comments may appear wherever whitespace can
//!
//! Keywords are matched in lowercase only.
//!
//! ## Filter Grouping
//!
//! There is a single flat group per query. Each filter is filed under the
//! connective that follows it; the last filter under the last connective seen
//! (`and` when there is none):
//!
//! ```text
//! a = 1 and b = 2 or c = 3   // and: [a]   or: [b, c]
//! ```
pub mod filters;
pub mod operators;
pub mod query;
pub mod tokens;

pub use filters::{CosmosColumnReference, CosmosQueryFilter, LogicalCosmosQueryFilter};
pub use operators::Operator;
pub use query::{ColumnExpression, CosmosQuery, CosmosTable};
pub use tokens::{Token, TokenKind};
