use std::mem;

use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{Step, TokenBuilder, TokeniserContext},
};

/// Quoted literals. A doubled quote inside the literal is an escaped quote.
#[derive(Debug, Default)]
pub struct TextTokenBuilder {
    quote: Option<char>,
    content: String,
    // The last character was a quote that may close the literal
    closing: bool,
}

impl TokenBuilder for TextTokenBuilder {
    fn name(&self) -> &'static str {
        "TextTokenBuilder"
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        ch == '\'' || ch == '"'
    }

    fn accept(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        let Some(quote) = self.quote else {
            self.quote = Some(ch);
            return Ok(Step::Continue);
        };

        if self.closing {
            if ch != quote {
                return Ok(Step::Done);
            }
            self.content.push(quote);
            self.closing = false;
        } else if ch == quote {
            self.closing = true;
        } else if ch == '\n' {
            return Err(LexError::syntax(
                "Unterminated string literal before end of line",
                ctx.position(),
            ));
        } else {
            self.content.push(ch);
        }
        Ok(Step::Continue)
    }

    fn as_tokens(&mut self, ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        if self.quote.take().is_some() && !mem::take(&mut self.closing) {
            return Err(LexError::syntax(
                "Unterminated string literal at end of input",
                ctx.position(),
            ));
        }
        let content = mem::take(&mut self.content);
        Ok(vec![Token::new(content, TokenKind::Text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(input: &str) -> Result<Vec<Token>, LexError> {
        let mut ctx = TokeniserContext::new();
        let mut builder = TextTokenBuilder::default();
        for ch in input.chars() {
            if let Step::Done = builder.accept(ch, &mut ctx)? {
                break;
            }
            ctx.advance(ch);
        }
        builder.as_tokens(&mut ctx)
    }

    #[test]
    fn test_doubled_quote_is_escaped() {
        let tokens = feed("'it''s' ").unwrap();
        assert_eq!(tokens, vec![Token::new("it's", TokenKind::Text)]);
    }

    #[test]
    fn test_other_quote_is_literal() {
        let tokens = feed("\"say 'hi'\"").unwrap();
        assert_eq!(tokens, vec![Token::new("say 'hi'", TokenKind::Text)]);
    }

    #[test]
    fn test_newline_inside_literal_fails() {
        let err = feed("'abc\ndef'").unwrap_err();
        assert_eq!(err.position.line, 1);
        assert_eq!(err.position.column, 5);
    }

    #[test]
    fn test_unterminated_at_end_of_input() {
        assert!(feed("'abc").is_err());
    }
}
