use super::{Mode, Validator};
use crate::{
    dialect::Dialect,
    error::ValidateResult,
    lexer::token::{Token, TokenKind},
};

const MYSQL_LENGTH_TYPES: &[&str] = &[
    "VARCHAR", "CHAR", "BINARY", "VARBINARY", "BLOB", "TEXT", "NCHAR", "NVARCHAR",
];
const MYSQL_DECIMAL_TYPES: &[&str] = &["NUMERIC", "DECIMAL", "DEC", "FIXED", "FLOAT", "REAL"];
const MYSQL_INTEGER_TYPES: &[&str] = &[
    "TINYINT", "SMALLINT", "MEDIUMINT", "INT", "INTEGER", "BIGINT", "BIT",
];
const MYSQL_TEMPORAL_TYPES: &[&str] = &["DATETIME", "TIMESTAMP", "TIME", "YEAR"];

impl Validator<'_> {
    /// Type keyword(s) and optional numeric arguments.
    pub(super) fn data_type(&mut self) -> ValidateResult<()> {
        let word = match self.peek() {
            Some(token) if token.kind == TokenKind::Word => token.lexeme.to_uppercase(),
            _ => return Err(self.error()),
        };

        match self.dialect {
            Dialect::Sqlite => self.sqlite_type(&word),
            Dialect::Postgres => self.postgres_type(&word),
            Dialect::MySql => self.mysql_type(&word),
        }
    }

    fn sqlite_type(&mut self, word: &str) -> ValidateResult<()> {
        if !self.dialect.is_type_word(word) {
            return Err(self.error());
        }
        self.advance(Mode::Keep);
        Ok(())
    }

    fn postgres_type(&mut self, word: &str) -> ValidateResult<()> {
        let base = word.trim_end_matches("[]");

        match base {
            "BIT" | "CHARACTER" => {
                self.advance(Mode::Keep);
                self.accept("VARYING", Mode::Keep);
                self.optional_length()?;
            }
            "VARBIT" | "VARCHAR" | "CHAR" | "FLOAT" | "INTERVAL" => {
                self.advance(Mode::Keep);
                self.optional_length()?;
            }
            "NUMERIC" | "DECIMAL" => {
                self.advance(Mode::Keep);
                self.optional_precision_scale()?;
            }
            "DOUBLE" => {
                self.advance(Mode::Keep);
                self.expect("PRECISION", Mode::Keep)?;
            }
            "TIME" | "TIMESTAMP" => {
                self.advance(Mode::Keep);
                self.optional_length()?;
                self.optional_time_zone()?;
            }
            _ if self.dialect.is_type_word(base) => {
                self.advance(Mode::Keep);
            }
            _ => return Err(self.error()),
        }

        // `VARCHAR(10)[]`
        if self.peek().is_some_and(is_array_suffix) {
            self.advance(Mode::Drop);
        }

        Ok(())
    }

    fn mysql_type(&mut self, word: &str) -> ValidateResult<()> {
        match word {
            _ if MYSQL_LENGTH_TYPES.contains(&word) => {
                self.advance(Mode::Keep);
                self.optional_length()?;
            }
            "CHARACTER" => {
                self.advance(Mode::Keep);
                self.accept("VARYING", Mode::Keep);
                self.optional_length()?;
            }
            "DOUBLE" => {
                self.advance(Mode::Keep);
                self.accept("PRECISION", Mode::Keep);
                self.optional_precision_scale()?;
            }
            _ if MYSQL_DECIMAL_TYPES.contains(&word) => {
                self.advance(Mode::Keep);
                self.optional_precision_scale()?;
            }
            _ if MYSQL_INTEGER_TYPES.contains(&word) => {
                self.advance(Mode::Keep);
                self.optional_length()?;
            }
            _ if MYSQL_TEMPORAL_TYPES.contains(&word) => {
                self.advance(Mode::Keep);
                self.optional_length()?;
                self.optional_time_zone()?;
            }
            "ENUM" | "SET" => {
                self.advance(Mode::Keep);
                self.value_list()?;
            }
            _ if self.dialect.is_type_word(word) => {
                self.advance(Mode::Keep);
            }
            _ => return Err(self.error()),
        }

        self.mysql_type_attributes()
    }

    /// `UNSIGNED`, `ZEROFILL`, `CHARACTER SET x` and friends; all dropped.
    fn mysql_type_attributes(&mut self) -> ValidateResult<()> {
        loop {
            if self.accept_any(&["UNSIGNED", "SIGNED", "ZEROFILL", "BINARY"], Mode::Drop) {
                continue;
            }
            if self.check("CHARACTER") && self.check_nth(1, "SET") {
                self.expect_all(&["CHARACTER", "SET"], Mode::Drop)?;
                self.option_value(Mode::Drop)?;
                continue;
            }
            if self.accept("CHARSET", Mode::Drop) {
                self.option_value(Mode::Drop)?;
                continue;
            }
            return Ok(());
        }
    }

    /// `[( n )]` with `n` a positive integer.
    fn optional_length(&mut self) -> ValidateResult<()> {
        if self.accept_symbol('(', Mode::Keep).is_some() {
            self.positive_integer()?;
            self.expect_symbol(')', Mode::Keep)?;
        }
        Ok(())
    }

    /// `[( p [, s] )]` with a positive precision and a non-negative scale.
    fn optional_precision_scale(&mut self) -> ValidateResult<()> {
        if self.accept_symbol('(', Mode::Keep).is_some() {
            self.positive_integer()?;
            if self.accept_symbol(',', Mode::Keep).is_some() {
                self.unsigned_integer()?;
            }
            self.expect_symbol(')', Mode::Keep)?;
        }
        Ok(())
    }

    /// `[WITH | WITHOUT] TIME ZONE`, dropped.
    fn optional_time_zone(&mut self) -> ValidateResult<()> {
        if self.accept_any(&["WITH", "WITHOUT"], Mode::Drop) {
            self.expect_all(&["TIME", "ZONE"], Mode::Drop)?;
        }
        Ok(())
    }

    /// `( 'a' [, 'b']* )` for `ENUM` and `SET`, dropped.
    fn value_list(&mut self) -> ValidateResult<()> {
        self.expect_symbol('(', Mode::Drop)?;
        loop {
            self.string_literal(Mode::Drop)?;
            if self.accept_symbol(',', Mode::Drop).is_none() {
                break;
            }
        }
        self.expect_symbol(')', Mode::Drop)?;
        Ok(())
    }

    fn positive_integer(&mut self) -> ValidateResult<()> {
        match self.peek().and_then(integer_value) {
            Some(n) if n > 0 => {
                self.advance(Mode::Keep);
                Ok(())
            }
            _ => Err(self.error()),
        }
    }

    fn unsigned_integer(&mut self) -> ValidateResult<()> {
        match self.peek().and_then(integer_value) {
            Some(_) => {
                self.advance(Mode::Keep);
                Ok(())
            }
            None => Err(self.error()),
        }
    }
}

fn integer_value(token: &Token) -> Option<u32> {
    if token.kind != TokenKind::Number {
        return None;
    }
    token.lexeme.parse::<u32>().ok()
}

fn is_array_suffix(token: &Token) -> bool {
    token.kind == TokenKind::Word
        && token.lexeme.starts_with('[')
        && token
            .lexeme
            .chars()
            .all(|c| c == '[' || c == ']' || c.is_ascii_digit())
}
