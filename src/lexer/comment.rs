use std::mem;

use crate::{
    ast::{Token, TokenKind},
    error::LexError,
    lexer::{Step, TokenBuilder, TokeniserContext},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum CommentStyle {
    /// One delimiter character seen, style not known yet
    Opening(char),
    /// `--` or `//`, runs to the end of the line
    Line,
    /// `/* ... */`
    Block,
}

/// Line and block comments. The token content excludes the delimiters.
#[derive(Debug, Default)]
pub struct CommentTokenBuilder {
    style: Option<CommentStyle>,
    content: String,
    star: bool,
    closed: bool,
}

impl CommentTokenBuilder {
    /// A builder that has already consumed `--` or `//`.
    pub fn line() -> Self {
        CommentTokenBuilder {
            style: Some(CommentStyle::Line),
            ..Default::default()
        }
    }
}

impl TokenBuilder for CommentTokenBuilder {
    fn name(&self) -> &'static str {
        "CommentTokenBuilder"
    }

    fn can_accept(&self, ch: char, _ctx: &TokeniserContext) -> bool {
        ch == '/' || ch == '-'
    }

    fn accept(&mut self, ch: char, ctx: &mut TokeniserContext) -> Result<Step, LexError> {
        match self.style {
            None => self.style = Some(CommentStyle::Opening(ch)),
            Some(CommentStyle::Opening(first)) => {
                self.style = match (first, ch) {
                    ('-', '-') | ('/', '/') => Some(CommentStyle::Line),
                    ('/', '*') => Some(CommentStyle::Block),
                    _ => {
                        return Err(LexError::syntax(
                            format!("Expected a comment after '{}', found '{}'", first, ch),
                            ctx.position(),
                        ));
                    }
                };
            }
            Some(CommentStyle::Line) => {
                if ch == '\n' {
                    return Ok(Step::Done);
                }
                self.content.push(ch);
            }
            Some(CommentStyle::Block) => {
                if self.closed {
                    return Ok(Step::Done);
                }
                if self.star && ch == '/' {
                    self.closed = true;
                    return Ok(Step::Continue);
                }
                if self.star {
                    self.content.push('*');
                }
                self.star = ch == '*';
                if !self.star {
                    self.content.push(ch);
                }
            }
        }
        Ok(Step::Continue)
    }

    fn as_tokens(&mut self, ctx: &mut TokeniserContext) -> Result<Vec<Token>, LexError> {
        let style = self.style.take();
        let closed = mem::take(&mut self.closed);
        self.star = false;
        let content = mem::take(&mut self.content);

        match style {
            Some(CommentStyle::Opening(first)) => Err(LexError::syntax(
                format!("Unexpected '{}'", first),
                ctx.position(),
            )),
            Some(CommentStyle::Block) if !closed => Err(LexError::syntax(
                "Unterminated block comment",
                ctx.position(),
            )),
            _ => Ok(vec![Token::new(content, TokenKind::Comment)]),
        }
    }

    fn is_comment(&self) -> bool {
        true
    }
}
