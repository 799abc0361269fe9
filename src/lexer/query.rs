use std::mem;

use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{Step, TokenBuilder, TokeniserContext},
};

/// Keywords and identifiers, including dotted column references and `*`.
///
/// `$`, `@` and square brackets are part of an identifier, so references such
/// as `c.@id`, `$x` or `c["first name"]` stay one token. Inside brackets every
/// character up to the matching `]` is kept.
#[derive(Debug, Default)]
pub struct QueryTokenBuilder {
    content: String,
    brackets: usize,
}

impl TokenBuilder for QueryTokenBuilder {
    fn name(&self) -> &'static str {
        "QueryTokenBuilder"
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        ch.is_alphabetic() || matches!(ch, '_' | '*' | '$' | '@')
    }

    fn accept(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        if self.brackets > 0 {
            match ch {
                '\n' => {
                    return Err(LexError::syntax(
                        format!("Unclosed '[' in '{}'", self.content),
                        ctx.position(),
                    ));
                }
                '[' => self.brackets += 1,
                ']' => self.brackets -= 1,
                _ => {}
            }
            self.content.push(ch);
            return Ok(Step::Continue);
        }

        match ch {
            '[' => self.brackets += 1,
            ']' => {
                return Err(LexError::syntax("Unexpected ']'", ctx.position()));
            }
            _ if ch.is_alphanumeric() || matches!(ch, '_' | '.' | '*' | '$' | '@') => {}
            _ => return Ok(Step::Done),
        }
        self.content.push(ch);
        Ok(Step::Continue)
    }

    fn as_tokens(&mut self, ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        if self.brackets > 0 {
            return Err(LexError::syntax(
                format!("Unclosed '[' in '{}'", self.content),
                ctx.position(),
            ));
        }
        let content = mem::take(&mut self.content);
        if content.is_empty() {
            return Ok(vec![]);
        }

        // `is` and `not` take part in operators (`is not`)
        let kind = match content.as_str() {
            "is" | "not" => TokenKind::Operator,
            _ => TokenKind::Query,
        };
        Ok(vec![Token::new(content, kind)])
    }
}
