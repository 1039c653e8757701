//! Recursive-descent acceptor for `CREATE TABLE` scripts.
//!
//! The validator walks the raw token stream once. Besides proving the input
//! well-formed, it copies the tokens the converter needs into a *kept* stream:
//! table heads, column names, type words and arguments, model-relevant
//! constraints and the delimiters around them. Options with no model impact
//! are accepted and dropped.

use crate::{
    dialect::Dialect,
    error::{ValidateError, ValidateResult},
    lexer::token::{Token, TokenKind},
};
use tracing::{debug, trace};

mod class;
mod column;
mod options;
mod table;
mod types;

pub use class::ConstraintClass;

/// Whether a consumed token is copied to the kept stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Keep,
    Drop,
}

/// Validates `tokens` and returns the kept stream.
pub fn filter(tokens: &[Token], dialect: Dialect) -> ValidateResult<Vec<Token>> {
    let mut validator = Validator::new(tokens, dialect);

    match validator.statements() {
        Ok(count) => {
            debug!(
                "Validated {} {} statements, kept {} of {} tokens",
                count,
                dialect,
                validator.kept.len(),
                tokens.len()
            );
            Ok(validator.kept)
        }
        Err(err) => {
            debug!("Rejected {} input: {}", dialect, err);
            Err(err)
        }
    }
}

pub(crate) struct Validator<'a> {
    dialect: Dialect,
    tokens: &'a [Token],
    pos: usize,
    line: usize,
    kept: Vec<Token>,
}

impl<'a> Validator<'a> {
    pub(crate) fn new(tokens: &'a [Token], dialect: Dialect) -> Self {
        Validator {
            dialect,
            tokens,
            pos: 0,
            line: 1,
            kept: Vec::new(),
        }
    }

    // ----- cursor -----

    fn skip_newlines(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.is_newline() {
                break;
            }
            self.line += 1;
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<&'a Token> {
        self.skip_newlines();
        self.tokens.get(self.pos)
    }

    /// The `n`-th significant token from the cursor, without moving it.
    fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.is_newline())
            .nth(n)
    }

    fn advance(&mut self, mode: Mode) -> Option<&'a Token> {
        let token = self.peek()?;
        self.pos += 1;
        if mode == Mode::Keep {
            self.kept.push(token.clone());
        }
        Some(token)
    }

    fn check(&mut self, keyword: &str) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    fn check_any(&mut self, keywords: &[&str]) -> bool {
        self.peek().is_some_and(|t| t.is_any_keyword(keywords))
    }

    fn check_nth(&self, n: usize, keyword: &str) -> bool {
        self.peek_nth(n).is_some_and(|t| t.is_keyword(keyword))
    }

    fn check_symbol(&mut self, symbol: char) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    fn accept(&mut self, keyword: &str, mode: Mode) -> bool {
        if self.check(keyword) {
            self.advance(mode);
            true
        } else {
            false
        }
    }

    fn accept_any(&mut self, keywords: &[&str], mode: Mode) -> bool {
        if self.check_any(keywords) {
            self.advance(mode);
            true
        } else {
            false
        }
    }

    fn accept_symbol(&mut self, symbol: char, mode: Mode) -> Option<&'a Token> {
        if self.check_symbol(symbol) {
            self.advance(mode)
        } else {
            None
        }
    }

    fn expect(&mut self, keyword: &str, mode: Mode) -> ValidateResult<&'a Token> {
        if self.check(keyword) {
            self.advance(mode).ok_or_else(|| self.error())
        } else {
            Err(self.error())
        }
    }

    fn expect_all(&mut self, keywords: &[&str], mode: Mode) -> ValidateResult<()> {
        for keyword in keywords {
            self.expect(keyword, mode)?;
        }
        Ok(())
    }

    fn expect_any(&mut self, keywords: &[&str], mode: Mode) -> ValidateResult<&'a Token> {
        if self.check_any(keywords) {
            self.advance(mode).ok_or_else(|| self.error())
        } else {
            Err(self.error())
        }
    }

    fn expect_symbol(&mut self, symbol: char, mode: Mode) -> ValidateResult<&'a Token> {
        self.accept_symbol(symbol, mode).ok_or_else(|| self.error())
    }

    /// Error pointing at the current token, or at end of input.
    fn error(&mut self) -> ValidateError {
        match self.peek() {
            Some(token) => ValidateError::new(self.line, &token.lexeme),
            None => ValidateError::eof(self.line),
        }
    }

    // ----- shared productions -----

    /// Quoted identifier, or a bare word that is identifier-shaped and not reserved.
    fn name(&mut self, mode: Mode) -> ValidateResult<&'a Token> {
        let valid = match self.peek() {
            Some(token) => match token.kind {
                TokenKind::QuotedIdent(_) => true,
                TokenKind::Word => {
                    is_identifier(&token.lexeme) && !self.dialect.is_reserved(&token.lexeme)
                }
                _ => false,
            },
            None => false,
        };

        if valid {
            self.advance(mode).ok_or_else(|| self.error())
        } else {
            Err(self.error())
        }
    }

    /// `name [. name]`
    fn qualified_name(&mut self, mode: Mode) -> ValidateResult<()> {
        self.name(mode)?;
        if self.accept_symbol('.', mode).is_some() {
            self.name(mode)?;
        }
        Ok(())
    }

    /// `( name [, name]* )`
    fn name_list(&mut self, mode: Mode) -> ValidateResult<()> {
        self.expect_symbol('(', mode)?;
        loop {
            self.name(mode)?;
            if self.accept_symbol(',', mode).is_none() {
                break;
            }
        }
        self.expect_symbol(')', mode)?;
        Ok(())
    }

    /// Reads from `(` to its matching `)`, accepting any tokens in between.
    fn paren_span(&mut self, mode: Mode) -> ValidateResult<()> {
        self.expect_symbol('(', mode)?;
        let mut depth = 1usize;

        while depth > 0 {
            let Some(token) = self.peek() else {
                return Err(self.error());
            };
            if token.is_symbol('(') {
                depth += 1;
            } else if token.is_symbol(')') {
                depth -= 1;
            }
            self.advance(mode);
        }

        Ok(())
    }

    /// A single option value: word, number, string or quoted identifier.
    fn option_value(&mut self, mode: Mode) -> ValidateResult<()> {
        match self.peek().map(|t| t.kind) {
            Some(
                TokenKind::Word
                | TokenKind::Number
                | TokenKind::String(_)
                | TokenKind::QuotedIdent(_),
            ) => {
                self.advance(mode);
                Ok(())
            }
            _ => Err(self.error()),
        }
    }

    fn string_literal(&mut self, mode: Mode) -> ValidateResult<()> {
        if self.peek().is_some_and(|t| t.is_string()) {
            self.advance(mode);
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn number(&mut self, mode: Mode) -> ValidateResult<()> {
        if self.peek().is_some_and(|t| t.kind == TokenKind::Number) {
            self.advance(mode);
            Ok(())
        } else {
            Err(self.error())
        }
    }

    // ----- statements -----

    /// Zero or more statements, each terminated by `;`.
    fn statements(&mut self) -> ValidateResult<usize> {
        let mut count = 0;
        while self.peek().is_some() {
            self.statement()?;
            count += 1;
        }
        Ok(count)
    }

    fn statement(&mut self) -> ValidateResult<()> {
        let mark = self.kept.len();
        self.expect("CREATE", Mode::Keep)?;

        match self.dialect {
            Dialect::Sqlite => {
                self.accept_any(&["TEMP", "TEMPORARY"], Mode::Drop);
            }
            Dialect::Postgres => {
                if self.accept_any(&["GLOBAL", "LOCAL"], Mode::Drop) {
                    self.expect_any(&["TEMP", "TEMPORARY"], Mode::Drop)?;
                } else {
                    self.accept_any(&["TEMP", "TEMPORARY", "UNLOGGED"], Mode::Drop);
                }
            }
            Dialect::MySql => {
                self.accept("TEMPORARY", Mode::Drop);
            }
        }

        if self.check("TABLE") {
            return self.create_table();
        }

        if self.dialect == Dialect::Sqlite
            && self.check_any(&["INDEX", "UNIQUE", "VIEW", "TRIGGER", "VIRTUAL"])
        {
            self.kept.truncate(mark);
            return self.skip_statement();
        }

        Err(self.error())
    }

    /// `CREATE TABLE [IF NOT EXISTS] name ( entries ) [options] ;`
    fn create_table(&mut self) -> ValidateResult<()> {
        self.expect("TABLE", Mode::Keep)?;

        if self.check("IF") && self.check_nth(1, "NOT") {
            self.expect_all(&["IF", "NOT", "EXISTS"], Mode::Keep)?;
        }

        self.qualified_name(Mode::Keep)?;
        self.table_body()?;
        self.table_options()?;
        self.expect_symbol(';', Mode::Keep)?;

        Ok(())
    }

    /// Column definitions and table constraints between parentheses.
    ///
    /// A separating comma is kept only between two entries that both kept
    /// tokens, so dropped entries never leave empty slots behind.
    fn table_body(&mut self) -> ValidateResult<()> {
        self.expect_symbol('(', Mode::Keep)?;

        let mut columns = 0usize;
        let mut kept_entries = 0usize;
        let mut separator: Option<&'a Token> = None;

        loop {
            let mark = self.kept.len();

            if self.at_table_constraint() {
                self.table_constraint()?;
            } else {
                self.column_definition()?;
                columns += 1;
            }

            if self.kept.len() > mark {
                if let Some(comma) = separator.filter(|_| kept_entries > 0) {
                    self.kept.insert(mark, comma.clone());
                }
                kept_entries += 1;
            }

            separator = self.accept_symbol(',', Mode::Drop);
            if separator.is_none() {
                break;
            }
        }

        if columns == 0 {
            return Err(self.error());
        }

        self.expect_symbol(')', Mode::Keep)?;
        Ok(())
    }

    fn column_definition(&mut self) -> ValidateResult<()> {
        self.name(Mode::Keep)?;
        self.data_type()?;
        self.column_constraints()
    }

    /// Skips a non-table SQLite `CREATE` statement up to its terminating `;`.
    ///
    /// A `;` only terminates outside `BEGIN … END`; `CASE … END` is tracked
    /// too so its `END` does not close a trigger body.
    fn skip_statement(&mut self) -> ValidateResult<()> {
        let start_line = self.line;
        let mut depth = 0usize;

        loop {
            let Some(token) = self.advance(Mode::Drop) else {
                return Err(self.error());
            };

            if token.is_any_keyword(&["BEGIN", "CASE"]) {
                depth += 1;
            } else if token.is_keyword("END") {
                depth = depth.saturating_sub(1);
            } else if token.is_symbol(';') && depth == 0 {
                trace!(
                    "Skipped non-table statement on lines {}-{}",
                    start_line, self.line
                );
                return Ok(());
            }
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
