use std::mem;

use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{CommentTokenBuilder, Step, TokenBuilder, TokeniserContext},
};

/// Integers and decimals with an optional leading minus.
///
/// `--` reaches this recognizer first, since comments lose ambiguity ties; the
/// second `-` hands the rest of the line to a [`CommentTokenBuilder`].
#[derive(Debug, Default)]
pub struct NumberTokenBuilder {
    content: String,
    has_point: bool,
}

impl TokenBuilder for NumberTokenBuilder {
    fn name(&self) -> &'static str {
        "NumberTokenBuilder"
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        ch.is_ascii_digit() || ch == '-'
    }

    fn accept(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        if self.content.is_empty() || ch.is_ascii_digit() {
            self.content.push(ch);
            return Ok(Step::Continue);
        }

        if self.content == "-" {
            return if ch == '-' {
                self.content.clear();
                Ok(Step::HandOff(Box::new(CommentTokenBuilder::line())))
            } else {
                Err(LexError::syntax(
                    format!("Expected a digit after '-', found '{}'", ch),
                    ctx.position(),
                ))
            };
        }

        if ch == '.' {
            if self.has_point {
                return Err(LexError::syntax(
                    format!("Number '{}.' has more than one decimal point", self.content),
                    ctx.position(),
                ));
            }
            self.has_point = true;
            self.content.push(ch);
            return Ok(Step::Continue);
        }

        Ok(Step::Done)
    }

    fn as_tokens(&mut self, ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        self.has_point = false;
        let content = mem::take(&mut self.content);
        if content == "-" {
            return Err(LexError::syntax("Expected a digit after '-'", ctx.position()));
        }
        Ok(vec![Token::new(content, TokenKind::Number)])
    }
}
