//! Phase-driven parser.
//!
//! Tokens are fed one at a time. The keywords `select`, `from` and `where`
//! switch the phase; every other token is interpreted by the current phase.

mod filter;

use tracing::{debug, trace};

use crate::{
    ast::{
        ColumnExpression, CosmosQuery, CosmosQueryFilter, CosmosTable, LogicalCosmosQueryFilter,
        Token, TokenKind,
    },
    error::ParseError,
    lexer::tokenise,
};

pub use filter::FilterAccumulator;

/// Query clause currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Select,
    From,
    Where,
}

/// Keyword joining two filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    fn word(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
        }
    }
}

pub struct Parser<T> {
    phase: Option<Phase>,
    select_columns: Vec<ColumnExpression>,
    from: Option<CosmosTable>,
    from_tokens: usize,
    group: Option<LogicalCosmosQueryFilter<T>>,
    pending: Option<FilterAccumulator>,
    connective: Option<Connective>,
    // A connective was read and no filter has started since
    dangling: bool,
}

impl<T> Parser<T> {
    pub fn new() -> Self {
        Parser {
            phase: None,
            select_columns: vec![],
            from: None,
            from_tokens: 0,
            group: None,
            pending: None,
            connective: None,
            dangling: false,
        }
    }

    /// Tokenizes and parses a complete query.
    pub fn parse(query: &str) -> Result<CosmosQuery<T>, ParseError> {
        let mut parser = Parser::new();
        for token in tokenise(query)? {
            parser.feed(token)?;
        }
        parser.build()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Reads one token. Comments are ignored in every phase.
    pub fn feed(&mut self, token: Token) -> Result<(), ParseError> {
        if token.is_comment() {
            return Ok(());
        }
        trace!(phase = ?self.phase, kind = %token.kind, content = %token.content, "feeding token");

        if token.kind == TokenKind::Query {
            match token.content.as_str() {
                "select" => return self.enter_select(),
                "from" => return self.enter_from(),
                "where" => return self.enter_where(),
                _ => {}
            }
        }

        match self.phase {
            None => Err(ParseError::Syntax(format!(
                "Query must start with 'select', found '{}'",
                token.content
            ))),
            Some(Phase::Select) => {
                self.select_columns.push(ColumnExpression::new(token.content));
                Ok(())
            }
            Some(Phase::From) => self.read_from(token),
            Some(Phase::Where) => self.read_where(token),
        }
    }

    /// Closes any open filter and produces the query.
    pub fn build(mut self) -> Result<CosmosQuery<T>, ParseError> {
        if let Some(pending) = self.pending.take() {
            let filter = pending.build()?;
            let connective = self.connective.unwrap_or(Connective::And);
            self.push_filter(filter, connective);
        } else if self.dangling {
            let word = self.connective.map_or("and", Connective::word);
            return Err(ParseError::Syntax(format!(
                "Query ends with '{}' but no filter follows",
                word
            )));
        }

        let Some(from) = self.from else {
            return Err(ParseError::Syntax("No table present in query".to_string()));
        };

        if let Some(group) = &self.group
            && group.is_empty()
        {
            return Err(ParseError::Syntax("'where' clause has no filters".to_string()));
        }

        let query = CosmosQuery::new(self.select_columns, from, self.group.map(|g| vec![g]));
        debug!(
            table = %query.from.name,
            columns = query.select_columns.len(),
            filters = query.filters().count(),
            "parsed query"
        );
        Ok(query)
    }

    fn enter_select(&mut self) -> Result<(), ParseError> {
        if self.phase.is_some() {
            return Err(ParseError::Syntax(
                "'select' may only appear at the start of the query".to_string(),
            ));
        }
        self.phase = Some(Phase::Select);
        Ok(())
    }

    fn enter_from(&mut self) -> Result<(), ParseError> {
        if self.phase != Some(Phase::Select) {
            return Err(ParseError::Syntax("'from' is only valid after 'select'".to_string()));
        }
        if self.select_columns.is_empty() {
            return Err(ParseError::Syntax("Select list is empty".to_string()));
        }
        self.phase = Some(Phase::From);
        Ok(())
    }

    fn enter_where(&mut self) -> Result<(), ParseError> {
        if self.phase == Some(Phase::Where) {
            return Err(ParseError::Syntax("'where' may only appear once".to_string()));
        }
        if self.from.is_none() {
            return Err(ParseError::Syntax(
                "'where' requires a table in a preceding 'from' clause".to_string(),
            ));
        }
        self.phase = Some(Phase::Where);
        self.group = Some(LogicalCosmosQueryFilter::new());
        Ok(())
    }

    fn read_from(&mut self, token: Token) -> Result<(), ParseError> {
        if token.kind != TokenKind::Query {
            return Err(ParseError::NotSupported(format!(
                "{} token '{}' is not supported in the from clause",
                token.kind, token.content
            )));
        }

        match self.from_tokens {
            0 => self.from = Some(CosmosTable::new(token.content)),
            1 => {
                if let Some(table) = self.from.as_mut() {
                    table.alias = Some(token.content);
                }
            }
            _ => {
                return Err(ParseError::State(format!(
                    "From token is invalid: '{}'",
                    token.content
                )));
            }
        }
        self.from_tokens += 1;
        Ok(())
    }

    fn read_where(&mut self, token: Token) -> Result<(), ParseError> {
        match (token.kind, token.content.as_str()) {
            (TokenKind::Block, _) => {
                return Err(ParseError::NotSupported(
                    "Parenthesized groups are not supported in the where clause".to_string(),
                ));
            }
            (TokenKind::Query, "and") => return self.close_filter(Connective::And),
            (TokenKind::Query, "or") => return self.close_filter(Connective::Or),
            _ => {}
        }

        let Some(pending) = self.pending.as_mut() else {
            return self.start_filter(token);
        };

        if pending.has_value() {
            return Err(ParseError::State(format!(
                "Filter on '{}' was not closed with 'and' or 'or' before '{}'",
                pending.column_name(),
                token.content
            )));
        }

        if !pending.has_operator() || token.kind == TokenKind::Operator {
            return match (token.kind, token.content.as_str()) {
                (TokenKind::Operator, op) | (TokenKind::Query, op @ "in") => pending.set_operator(op),
                _ => Err(ParseError::State(format!(
                    "Expected an operator after '{}', found '{}'",
                    pending.column_name(),
                    token.content
                ))),
            };
        }

        match (token.kind, token.content.as_str()) {
            (TokenKind::Text | TokenKind::Number | TokenKind::Array, _)
            | (TokenKind::Query, "true" | "false" | "null") => pending.set_value(token),
            _ => Err(ParseError::NotSupported(format!(
                "{} '{}' is not supported as a filter value",
                token.kind, token.content
            ))),
        }
    }

    fn start_filter(&mut self, token: Token) -> Result<(), ParseError> {
        match token.kind {
            TokenKind::Query => {
                self.pending = Some(FilterAccumulator::new(token.content));
                self.dangling = false;
                Ok(())
            }
            TokenKind::Operator => Err(ParseError::Syntax(format!(
                "Operator '{}' has no column to filter",
                token.content
            ))),
            _ => Err(ParseError::State(format!(
                "Value '{}' has no column to filter",
                token.content
            ))),
        }
    }

    fn close_filter(&mut self, connective: Connective) -> Result<(), ParseError> {
        let Some(pending) = self.pending.take() else {
            return Err(ParseError::Syntax(format!(
                "'{}' must follow a complete filter",
                connective.word()
            )));
        };

        let filter = pending.build()?;
        self.push_filter(filter, connective);
        self.connective = Some(connective);
        self.dangling = true;
        Ok(())
    }

    fn push_filter(&mut self, filter: CosmosQueryFilter<T>, connective: Connective) {
        trace!(filter = %filter, connective = connective.word(), "closed filter");
        let group = self.group.get_or_insert_with(LogicalCosmosQueryFilter::new);
        match connective {
            Connective::And => group.and.push(filter),
            Connective::Or => group.or.push(filter),
        }
    }
}

impl<T> Default for Parser<T> {
    fn default() -> Self {
        Self::new()
    }
}
