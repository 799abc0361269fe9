use std::mem;

use tracing::trace;

use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{Step, TokenBuilder, TokeniserContext, recognizers},
};

/// A parenthesized region, or the whole query for the root instance.
///
/// The block owns the dispatch loop: it forwards each character to the active
/// recognizer and picks a new one whenever the active one is done.
#[derive(Debug)]
pub struct BlockTokenBuilder {
    // False only for the root, which has no parentheses
    delimited: bool,
    opened: bool,
    closed: bool,
    active: Option<Box<dyn TokenBuilder>>,
    tokens: Vec<Token>,
    delimiters: usize,
}

impl BlockTokenBuilder {
    /// A block that starts on `(` and ends on `)`.
    pub fn new() -> Self {
        BlockTokenBuilder {
            delimited: true,
            opened: false,
            closed: false,
            active: None,
            tokens: vec![],
            delimiters: 0,
        }
    }

    /// The block representing the whole query.
    pub fn root() -> Self {
        BlockTokenBuilder {
            delimited: false,
            opened: true,
            ..Self::new()
        }
    }

    fn flush(&mut self, ctx: &mut TokeniserContext) -> Result<(), LexError> {
        let Some(mut builder) = self.active.take() else {
            return Ok(());
        };

        for token in builder.as_tokens(ctx)? {
            if token.kind == TokenKind::ArrayDelimiter {
                self.delimiters += 1;
            } else {
                self.tokens.push(token);
            }
        }
        // comments are transparent to the delimiter check
        if !builder.is_comment() {
            ctx.previous = Some(builder.name());
        }
        Ok(())
    }

    fn dispatch(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        if ch.is_whitespace() {
            return Ok(Step::Continue);
        }

        if ch == ')' {
            if !self.delimited {
                return Err(LexError::syntax("Unexpected ')' without matching '('", ctx.position()));
            }
            self.closed = true;
            return Ok(Step::Continue);
        }

        let mut builder = select(ch, ctx)?;
        trace!(builder = builder.name(), %ch, line = ctx.line, column = ctx.column, "selected recognizer");

        match builder.accept(ch, ctx)? {
            Step::Continue => self.active = Some(builder),
            Step::HandOff(next) => self.active = Some(next),
            Step::Done => {
                return Err(LexError::syntax(
                    format!("Unexpected character '{}'", ch),
                    ctx.position(),
                ));
            }
        }
        Ok(Step::Continue)
    }

    /// Emits the collected tokens of a closed, delimited block.
    fn emit(&mut self, ctx: &TokeniserContext) -> Result<Vec<Token>, LexError> {
        let tokens = mem::take(&mut self.tokens);
        let delimiters = mem::take(&mut self.delimiters);

        let all_literals = !tokens.is_empty()
            && tokens
                .iter()
                .all(|t| matches!(t.kind, TokenKind::Text | TokenKind::Number));

        if delimiters > 0 || all_literals {
            let values: Vec<Token> = tokens.into_iter().filter(|t| !t.is_comment()).collect();

            if let Some(nested) = values
                .iter()
                .find(|t| matches!(t.kind, TokenKind::Block | TokenKind::Array))
            {
                return Err(LexError::not_supported(
                    format!("Nested {} inside an array literal", nested.kind),
                    ctx.position(),
                ));
            }
            if values.len() != delimiters + 1 && delimiters > 0 {
                return Err(LexError::syntax(
                    "Array literal has an empty item",
                    ctx.position(),
                ));
            }
            return Ok(vec![Token::array(values)]);
        }

        // An empty block yields no end marker.
        let mut out = vec![Token::block_start()];
        if !tokens.is_empty() {
            out.extend(tokens);
            out.push(Token::block_end());
        }
        Ok(out)
    }
}

impl Default for BlockTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the recognizer for a character no recognizer currently owns.
///
/// Comments only win when nothing else accepts the character.
fn select(ch: char, ctx: &TokeniserContext) -> Result<Box<dyn TokenBuilder>, LexError> {
    let mut candidates: Vec<_> = recognizers()
        .into_iter()
        .filter(|b| b.can_accept(ch, ctx))
        .collect();

    if candidates.len() > 1 {
        candidates.retain(|b| !b.is_comment());
    }

    match candidates.len() {
        0 => Err(LexError::syntax(
            format!("Unexpected character '{}'", ch),
            ctx.position(),
        )),
        1 => Ok(candidates.remove(0)),
        _ => {
            let names: Vec<_> = candidates.iter().map(|b| b.name()).collect();
            Err(LexError::not_supported(
                format!("Character '{}' is ambiguous between {}", ch, names.join(", ")),
                ctx.position(),
            ))
        }
    }
}

impl TokenBuilder for BlockTokenBuilder {
    fn name(&self) -> &'static str {
        "BlockTokenBuilder"
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        ch == '('
    }

    fn accept(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        if self.closed {
            return Ok(Step::Done);
        }
        if !self.opened {
            self.opened = true;
            return Ok(Step::Continue);
        }

        if let Some(active) = self.active.as_mut() {
            match active.accept(ch, ctx)? {
                Step::Continue => return Ok(Step::Continue),
                Step::HandOff(next) => {
                    self.active = Some(next);
                    return Ok(Step::Continue);
                }
                Step::Done => self.flush(ctx)?,
            }
        }

        self.dispatch(ch, ctx)
    }

    fn as_tokens(&mut self, ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        self.flush(ctx)?;

        if !self.delimited {
            self.delimiters = 0;
            return Ok(mem::take(&mut self.tokens));
        }
        if !mem::take(&mut self.closed) {
            return Err(LexError::syntax("Unclosed '(' at end of input", ctx.position()));
        }
        self.opened = false;
        self.emit(ctx)
    }
}
