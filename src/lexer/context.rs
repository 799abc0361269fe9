use crate::error::Position;

/// Mutable state of one tokenization pass.
#[derive(Debug, Clone)]
pub struct TokeniserContext {
    pub line: usize,
    pub column: usize,
    /// Name of the recognizer whose tokens were collected last
    pub previous: Option<&'static str>,
}

impl TokeniserContext {
    pub fn new() -> Self {
        TokeniserContext {
            line: 1,
            column: 1,
            previous: None,
        }
    }

    /// Position of the character currently being processed.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    /// Moves past `ch`.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for TokeniserContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_tracking() {
        let mut ctx = TokeniserContext::new();
        for ch in "ab\ncd".chars() {
            ctx.advance(ch);
        }
        assert_eq!(ctx.position(), Position { line: 2, column: 3 });
    }
}
