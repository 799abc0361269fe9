//! cosmoql - front end for a Cosmos-style query dialect.
//!
//! A query string is turned into [`Token`]s by the [`lexer`], and the tokens
//! into a [`CosmosQuery`] by the [`parser`]. The [`store`] module runs parsed
//! queries against records kept in memory.
//!
//! # Example
//!
//! ```
//! use cosmoql::{Operator, parse};
//!
//! let query = parse::<serde_json::Value>("select a, b from t where x = 1").unwrap();
//! assert_eq!(query.select_columns.len(), 2);
//! assert_eq!(query.from.name, "t");
//!
//! let group = &query.where_clause.unwrap()[0];
//! assert_eq!(group.and[0].operator, Operator::EqualTo);
//! ```

pub mod ast;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod store;

pub use ast::{
    ColumnExpression, CosmosColumnReference, CosmosQuery, CosmosQueryFilter, CosmosTable,
    LogicalCosmosQueryFilter, Operator, Token, TokenKind,
};
pub use error::{ErrorKind, LexError, ParseError, Position};
pub use evaluator::EvalError;
pub use lexer::{Lexer, tokenise};
pub use parser::Parser;
pub use store::{InMemoryStore, StoreConfig, StoreError};

/// Parses a query for records of type `T`.
pub fn parse<T>(query: &str) -> Result<CosmosQuery<T>, ParseError> {
    Parser::parse(query)
}
