use serde::Serialize;

/// Classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Keyword or identifier
    ///
    /// # Examples
    /// ```text
    /// select
    /// c.name
    /// *
    /// ```
    Query,

    /// Quoted literal, stored without its quotes
    ///
    /// # Examples
    /// ```text
    /// 'foo'
    /// "it''s"
    /// ```
    Text,

    /// Integer or decimal number, possibly negative
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1.5
    /// ```
    Number,

    /// Comparison operator, including the words `is` and `not`
    ///
    /// # Examples
    /// ```text
    /// >=
    /// <>
    /// is
    /// ```
    Operator,

    /// Marker for the start or end of a parenthesized region
    Block,

    /// Comment text without its delimiters
    ///
    /// # Examples
    /// ```text
    /// -- line comment
    /// // line comment
    /// /* block comment */
    /// ```
    Comment,

    /// Parenthesized list of literal values
    ///
    /// # Examples
    /// ```text
    /// ('a', 'b')
    /// (1, 2, 3)
    /// ```
    Array,

    /// Separator between array items. Never leaves the lexer.
    ArrayDelimiter,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Query => "Query",
            TokenKind::Text => "Text",
            TokenKind::Number => "Number",
            TokenKind::Operator => "Operator",
            TokenKind::Block => "Block",
            TokenKind::Comment => "Comment",
            TokenKind::Array => "Array",
            TokenKind::ArrayDelimiter => "ArrayDelimiter",
        };
        f.write_str(name)
    }
}

/// Smallest classified unit of query text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
    /// Values of an [`TokenKind::Array`] token, in source order. Empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Token>,
}

impl Token {
    pub fn new(content: impl Into<String>, kind: TokenKind) -> Self {
        Token {
            content: content.into(),
            kind,
            elements: Vec::new(),
        }
    }

    pub fn array(elements: Vec<Token>) -> Self {
        let content = elements
            .iter()
            .map(Token::to_source)
            .collect::<Vec<_>>()
            .join(", ");
        Token {
            content,
            kind: TokenKind::Array,
            elements,
        }
    }

    pub fn block_start() -> Self {
        Token::new("start", TokenKind::Block)
    }

    pub fn block_end() -> Self {
        Token::new("end", TokenKind::Block)
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// Renders the token back into query text that tokenizes to an equal token.
    pub fn to_source(&self) -> String {
        match self.kind {
            TokenKind::Text => format!("'{}'", self.content.replace('\'', "''")),
            TokenKind::Array => format!("({})", self.content),
            TokenKind::Comment => format!("/*{}*/", self.content),
            TokenKind::Block if self.content == "start" => "(".to_string(),
            TokenKind::Block => ")".to_string(),
            _ => self.content.clone(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.content)
    }
}
