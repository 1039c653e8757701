use crate::{
    dialect::{Dialect, QuoteKind},
    error::{ValidateError, ValidateResult},
    lexer::token::{Token, TokenKind},
};
use tracing::debug;

pub mod token;

const FULL_WIDTH_SPACE: char = '\u{3000}';

/// Character scanner producing the raw token stream of a DDL script.
///
/// Every source newline outside a line comment's body is emitted as a
/// [`TokenKind::Newline`] token so later stages can count lines. Comments are
/// dropped; quoted tokens keep their quotes.
pub struct Lexer {
    dialect: Dialect,
    chars: Vec<(usize, char)>,
    input_len: usize,
    pos: usize,
    line: usize,
    column: usize,
    word: String,
    word_start: (usize, usize, usize),
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(dialect: Dialect) -> Self {
        Lexer {
            dialect,
            chars: Vec::new(),
            input_len: 0,
            pos: 0,
            line: 1,
            column: 1,
            word: String::new(),
            word_start: (0, 1, 1),
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(&mut self, input: &str) -> ValidateResult<Vec<Token>> {
        self.reset(input);

        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.flush();
                    self.bump();
                }
                '\n' => {
                    self.flush();
                    self.newline();
                }
                '.' if self.is_decimal_point() => self.push_char(c),
                '(' | ')' | ',' | '.' | ';' | '=' => {
                    self.flush();
                    self.symbol(c);
                }
                '-' if self.peek_at(1) == Some('-') => {
                    self.flush();
                    self.line_comment();
                }
                '#' if self.dialect.hash_comments() => {
                    self.flush();
                    self.line_comment();
                }
                '#' if self.word.is_empty() => return Err(self.error_near(c)),
                '/' if self.peek_at(1) == Some('*') => {
                    self.flush();
                    self.block_comment()?;
                }
                '*' if self.peek_at(1) == Some('/') => return Err(self.error_near("*/")),
                '"' | '\'' | '`' => {
                    self.flush();
                    self.quoted(c)?;
                }
                // `0::integer` splits into `0` and `::integer`
                ':' if self.peek_at(1) == Some(':')
                    && !self.word.is_empty()
                    && !self.word.ends_with(':') =>
                {
                    self.flush();
                    self.push_char(c);
                }
                FULL_WIDTH_SPACE => return Err(self.error_near(c)),
                _ => self.push_char(c),
            }
        }
        self.flush();

        debug!(
            "Tokenized {} input into {} tokens over {} lines",
            self.dialect,
            self.tokens.len(),
            self.line
        );

        Ok(std::mem::take(&mut self.tokens))
    }

    fn reset(&mut self, input: &str) {
        self.chars = input.char_indices().collect();
        self.input_len = input.len();
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.word.clear();
        self.tokens.clear();
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(i, _)| i)
            .unwrap_or(self.input_len)
    }

    fn bump(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    fn error_near(&self, near: impl std::fmt::Display) -> ValidateError {
        ValidateError::new(self.line, near)
    }

    fn push_char(&mut self, c: char) {
        if self.word.is_empty() {
            self.word_start = (self.offset(), self.line, self.column);
        }
        self.word.push(c);
        self.bump();
    }

    /// Emits the accumulated word, if any.
    fn flush(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let lexeme = std::mem::take(&mut self.word);
        let kind = if is_number(&lexeme) {
            TokenKind::Number
        } else {
            TokenKind::Word
        };
        let (start, line, column) = self.word_start;
        self.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
            span: (start, self.offset()),
        });
    }

    fn symbol(&mut self, c: char) {
        let start = self.offset();
        self.tokens.push(Token {
            kind: TokenKind::Symbol,
            lexeme: c.to_string(),
            line: self.line,
            column: self.column,
            span: (start, start + c.len_utf8()),
        });
        self.bump();
    }

    /// Consumes a `\n`, emitting its marker token.
    fn newline(&mut self) {
        let token = self.newline_token();
        self.tokens.push(token);
        self.advance_line();
    }

    fn newline_token(&self) -> Token {
        let start = self.offset();
        Token {
            kind: TokenKind::Newline,
            lexeme: "\n".to_string(),
            line: self.line,
            column: self.column,
            span: (start, start + 1),
        }
    }

    fn advance_line(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.column = 1;
    }

    /// A `.` continues a number when it sits between digits of a numeric word.
    fn is_decimal_point(&self) -> bool {
        let digits = self.word.trim_start_matches(['-', '+']);
        !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
    }

    /// Skips to the end of the line; the newline itself is left for the main loop.
    fn line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self) -> ValidateResult<()> {
        self.bump();
        self.bump();
        let mut depth = 1usize;

        while depth > 0 {
            match (self.peek(), self.peek_at(1)) {
                (None, _) => return Err(ValidateError::eof(self.line)),
                (Some('/'), Some('*')) => {
                    depth += 1;
                    self.bump();
                    self.bump();
                }
                (Some('*'), Some('/')) => {
                    depth -= 1;
                    self.bump();
                    self.bump();
                }
                (Some('\n'), _) => self.newline(),
                _ => self.bump(),
            }
        }

        Ok(())
    }

    /// Reads a quoted identifier or string literal starting at `quote`.
    ///
    /// Any other quote character met inside opens a nested span that must be
    /// closed before the outer one. A doubled quote continues the current span.
    /// Newlines inside are emitted after the token itself.
    fn quoted(&mut self, quote: char) -> ValidateResult<()> {
        let kind = match self.dialect.quote_kind(quote) {
            Some(QuoteKind::Identifier) => TokenKind::QuotedIdent(quote),
            Some(QuoteKind::String) => TokenKind::String(quote),
            None => return Err(self.error_near(quote)),
        };

        let (start, line, column) = (self.offset(), self.line, self.column);
        let mut lexeme = String::from(quote);
        let mut newlines = Vec::new();
        let mut open = vec![quote];
        self.bump();

        while let Some(&current) = open.last() {
            let Some(c) = self.peek() else {
                return Err(ValidateError::eof(self.line));
            };

            match c {
                _ if c == current && self.peek_at(1) == Some(current) => {
                    lexeme.push(c);
                    lexeme.push(c);
                    self.bump();
                    self.bump();
                }
                _ if c == current => {
                    lexeme.push(c);
                    self.bump();
                    open.pop();
                }
                '\\' if self.dialect.backslash_escapes() => {
                    lexeme.push(c);
                    self.bump();
                    match self.peek() {
                        Some('\n') => {
                            newlines.push(self.newline_token());
                            lexeme.push('\n');
                            self.advance_line();
                        }
                        Some(escaped) => {
                            lexeme.push(escaped);
                            self.bump();
                        }
                        None => {}
                    }
                }
                '"' | '\'' | '`' => {
                    lexeme.push(c);
                    self.bump();
                    open.push(c);
                }
                '\n' => {
                    newlines.push(self.newline_token());
                    lexeme.push(c);
                    self.advance_line();
                }
                _ => {
                    lexeme.push(c);
                    self.bump();
                }
            }
        }

        self.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
            span: (start, self.offset()),
        });
        self.tokens.extend(newlines);

        Ok(())
    }
}

/// `[+-]digits[.digits][e[+-]digits]`
fn is_number(word: &str) -> bool {
    let body = word.strip_prefix(['-', '+']).unwrap_or(word);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let mut parts = mantissa.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let mantissa_ok = !int_part.is_empty()
        && all_digits(int_part)
        && frac_part.is_none_or(|f| !f.is_empty() && all_digits(f));

    let exponent_ok = exponent.is_none_or(|e| {
        let e = e.strip_prefix(['-', '+']).unwrap_or(e);
        !e.is_empty() && all_digits(e)
    });

    mantissa_ok && exponent_ok
}
