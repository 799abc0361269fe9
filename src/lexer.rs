//! Character-level tokenizer.
//!
//! The input is scanned one character at a time by a root [`BlockTokenBuilder`].
//! Each character goes to the recognizer that currently owns it; when that
//! recognizer reports [`Step::Done`] its tokens are collected and the same
//! character is offered to a freshly selected recognizer.

mod block;
mod comment;
mod context;
mod delimiter;
mod number;
mod operator;
mod query;
mod text;

use std::fmt;

use tracing::debug;

use crate::{ast::Token, error::LexError};

pub use block::BlockTokenBuilder;
pub use comment::CommentTokenBuilder;
pub use context::TokeniserContext;
pub use delimiter::ArrayItemDelimiterTokenBuilder;
pub use number::NumberTokenBuilder;
pub use operator::OperatorTokenBuilder;
pub use query::QueryTokenBuilder;
pub use text::TextTokenBuilder;

/// Outcome of feeding one character to a recognizer.
#[derive(Debug)]
pub enum Step {
    /// The character was consumed; keep feeding this recognizer.
    Continue,
    /// The character was consumed; feed the returned recognizer from now on.
    HandOff(Box<dyn TokenBuilder>),
    /// The token is complete and the character was NOT consumed.
    Done,
}

/// A recognizer for one kind of token.
///
/// Recognizers accumulate characters privately and hand out their tokens once
/// through [`TokenBuilder::as_tokens`].
pub trait TokenBuilder: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Whether a token of this kind may start with `ch`.
    fn can_accept(&self, ch: char, ctx: &TokeniserContext) -> bool;

    fn accept(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError>;

    /// Drains the accumulated tokens, failing if the token is incomplete.
    fn as_tokens(&mut self, ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError>;

    fn is_comment(&self) -> bool {
        false
    }
}

/// Fresh instances of every recognizer, in selection order.
pub(crate) fn recognizers() -> Vec<Box<dyn TokenBuilder>> {
    vec![
        Box::new(QueryTokenBuilder::default()),
        Box::new(TextTokenBuilder::default()),
        Box::new(NumberTokenBuilder::default()),
        Box::new(OperatorTokenBuilder::default()),
        Box::new(CommentTokenBuilder::default()),
        Box::new(BlockTokenBuilder::new()),
        Box::new(ArrayItemDelimiterTokenBuilder::default()),
    ]
}

pub struct Lexer {
    input: Vec<char>,
}

impl Lexer {
    /// Carriage returns are not part of the grammar and are dropped here.
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().filter(|&ch| ch != '\r').collect(),
        }
    }

    /// Consumes the whole input and returns its tokens.
    pub fn tokenise(self) -> Result<Vec<Token>, LexError> {
        let mut ctx = TokeniserContext::new();
        let mut root = BlockTokenBuilder::root();

        for ch in self.input {
            root.accept(ch, &mut ctx)?;
            ctx.advance(ch);
        }

        let tokens = root.as_tokens(&mut ctx)?;
        debug!(count = tokens.len(), lines = ctx.line, "tokenised query");
        Ok(tokens)
    }
}

pub fn tokenise(query: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(query).tokenise()
}
