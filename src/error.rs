//! Error types shared by the lexer and the parser.

use thiserror::Error;

/// Category of a tokenizer or parser failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grammar violation: bad character, keyword misuse, missing clause
    Syntax,
    /// Filter accumulator misuse: operator or value set twice, unclosed filter
    State,
    /// Intentionally unimplemented feature
    NotSupported,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "Syntax error"),
            ErrorKind::State => write!(f, "State error"),
            ErrorKind::NotSupported => write!(f, "Not supported"),
        }
    }
}

/// 1-based location of a character in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Tokenizer failure.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {position}: {message}")]
pub struct LexError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl LexError {
    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        LexError {
            kind: ErrorKind::Syntax,
            message: message.into(),
            position,
        }
    }

    pub fn not_supported(message: impl Into<String>, position: Position) -> Self {
        LexError {
            kind: ErrorKind::NotSupported,
            message: message.into(),
            position,
        }
    }
}

/// Parser failure. Tokenizer failures pass through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Syntax(_) => ErrorKind::Syntax,
            ParseError::State(_) => ErrorKind::State,
            ParseError::NotSupported(_) => ErrorKind::NotSupported,
            ParseError::Lex(e) => e.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LexError::syntax("Unexpected character '#'", Position { line: 2, column: 7 });
        assert_eq!(err.to_string(), "Syntax error at 2:7: Unexpected character '#'");

        let err = ParseError::State("Operator already set".to_string());
        assert_eq!(err.to_string(), "State error: Operator already set");
        assert_eq!(err.kind(), ErrorKind::State);

        let err = ParseError::from(LexError::not_supported("ambiguous", Position::default()));
        assert_eq!(err.kind(), ErrorKind::NotSupported);
        assert_eq!(err.to_string(), "Not supported at 1:1: ambiguous");
    }
}
