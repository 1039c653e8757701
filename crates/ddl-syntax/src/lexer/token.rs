use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text. Quoted tokens keep their surrounding quotes.
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Keyword or bare identifier.
    Word,
    /// Optionally signed numeric literal.
    Number,
    /// One of `( ) , . ; =`.
    Symbol,
    /// Identifier wrapped in the given quote character.
    QuotedIdent(char),
    /// String literal wrapped in the given quote character.
    String(char),
    Newline,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
            span: (0, 0),
        }
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::Newline
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme.len() == 1 && self.lexeme.starts_with(symbol)
    }

    /// Case-insensitive match against an unquoted word.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.lexeme.eq_ignore_ascii_case(keyword)
    }

    pub fn is_any_keyword(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.is_keyword(k))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, TokenKind::String(_))
    }

    pub fn is_quoted_ident(&self) -> bool {
        matches!(self.kind, TokenKind::QuotedIdent(_))
    }

    /// Text without the surrounding quotes of a quoted identifier or string.
    /// Other tokens are returned as-is.
    pub fn unquoted(&self) -> &str {
        match self.kind {
            TokenKind::QuotedIdent(q) | TokenKind::String(q) => strip_quotes(&self.lexeme, q),
            _ => &self.lexeme,
        }
    }

    /// Same token text and kind at the position of `other`.
    pub fn synthesized(kind: TokenKind, lexeme: &str, other: &Token) -> Self {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line: other.line,
            column: other.column,
            span: (other.span.0, other.span.0),
        }
    }
}

fn strip_quotes(text: &str, quote: char) -> &str {
    text.strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Newline => write!(f, "\\n"),
            _ => write!(f, "{}", self.lexeme),
        }
    }
}
