use std::mem;

use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{Step, TokenBuilder, TokeniserContext},
};

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '=' | '>' | '<' | '!')
}

/// Symbolic comparison operators such as `=`, `>=` and `<>`.
///
/// The text is not validated here; unknown operators are rejected by the parser.
#[derive(Debug, Default)]
pub struct OperatorTokenBuilder {
    content: String,
}

impl TokenBuilder for OperatorTokenBuilder {
    fn name(&self) -> &'static str {
        "OperatorTokenBuilder"
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        is_operator_char(ch)
    }

    fn accept(&mut self, ch: char, _ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        if is_operator_char(ch) {
            self.content.push(ch);
            Ok(Step::Continue)
        } else {
            Ok(Step::Done)
        }
    }

    fn as_tokens(&mut self, _ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        let content = mem::take(&mut self.content);
        Ok(vec![Token::new(content, TokenKind::Operator)])
    }
}
