use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{Step, TokenBuilder, TokeniserContext},
};

const NAME: &str = "ArrayItemDelimiterTokenBuilder";

/// The `,` between array items and select columns.
#[derive(Debug, Default)]
pub struct ArrayItemDelimiterTokenBuilder {
    seen: bool,
}

impl TokenBuilder for ArrayItemDelimiterTokenBuilder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        ch == ','
    }

    fn accept(&mut self, _ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        if self.seen {
            return Ok(Step::Done);
        }
        if ctx.previous == Some(NAME) {
            return Err(LexError::syntax(
                "Expected a value between ',' delimiters",
                ctx.position(),
            ));
        }
        self.seen = true;
        Ok(Step::Continue)
    }

    fn as_tokens(&mut self, _ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        self.seen = false;
        Ok(vec![Token::new(",", TokenKind::ArrayDelimiter)])
    }
}
