use super::{ConstraintClass, Mode, Validator};
use crate::{
    dialect::Dialect,
    error::ValidateResult,
    lexer::token::{Token, TokenKind},
};

const LITERAL_DEFAULTS: &[&str] = &[
    "NULL",
    "TRUE",
    "FALSE",
    "CURRENT_TIME",
    "CURRENT_DATE",
    "CURRENT_TIMESTAMP",
];
const CONFLICT_RESOLUTIONS: &[&str] = &["ROLLBACK", "ABORT", "FAIL", "IGNORE", "REPLACE"];
const REFERENTIAL_ACTIONS: &[&str] = &["SET", "CASCADE", "RESTRICT", "NO"];
const MYSQL_ATTRIBUTE_CLASSES: &[(&str, ConstraintClass)] = &[
    ("COMMENT", ConstraintClass::COMMENT),
    ("COLUMN_FORMAT", ConstraintClass::COLUMN_FORMAT),
    ("ENGINE_ATTRIBUTE", ConstraintClass::ENGINE_ATTRIBUTE),
    (
        "SECONDARY_ENGINE_ATTRIBUTE",
        ConstraintClass::SECONDARY_ENGINE_ATTRIBUTE,
    ),
    ("STORAGE", ConstraintClass::STORAGE),
    ("VISIBLE", ConstraintClass::VISIBILITY),
    ("INVISIBLE", ConstraintClass::VISIBILITY),
];

impl Validator<'_> {
    /// Zero or more column constraints, each class at most once.
    pub(super) fn column_constraints(&mut self) -> ValidateResult<()> {
        let mut seen = ConstraintClass::empty();

        loop {
            let named = self.constraint_head()?;
            if !self.column_constraint(&mut seen)? {
                // A constraint name must be followed by a constraint.
                return if named { Err(self.error()) } else { Ok(()) };
            }
        }
    }

    /// `CONSTRAINT name`, kept. MySQL also allows a bare `CONSTRAINT`, which is
    /// dropped. Returns whether a head was read.
    pub(super) fn constraint_head(&mut self) -> ValidateResult<bool> {
        if !self.check("CONSTRAINT") {
            return Ok(false);
        }

        let bare = self.dialect == Dialect::MySql
            && self
                .peek_nth(1)
                .is_some_and(|t| t.is_any_keyword(&["PRIMARY", "UNIQUE", "CHECK", "FOREIGN"]));
        if bare {
            self.advance(Mode::Drop);
        } else {
            self.advance(Mode::Keep);
            self.name(Mode::Keep)?;
        }

        Ok(true)
    }

    /// Records `class` for the current column; a repeat points at the current token.
    fn claim(&mut self, seen: &mut ConstraintClass, class: ConstraintClass) -> ValidateResult<()> {
        if seen.insert_once(class) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// One column constraint. Returns `false` without consuming anything when
    /// the next token does not start one.
    fn column_constraint(&mut self, seen: &mut ConstraintClass) -> ValidateResult<bool> {
        let dialect = self.dialect;

        if self.check("NOT") && self.check_nth(1, "NULL") {
            self.claim(seen, ConstraintClass::NOT_NULL)?;
            self.expect_all(&["NOT", "NULL"], Mode::Keep)?;
            self.conflict_clause()?;
        } else if self.check("NULL") {
            self.claim(seen, ConstraintClass::NULL)?;
            self.advance(Mode::Drop);
            self.conflict_clause()?;
        } else if self.check("PRIMARY") {
            self.claim(seen, ConstraintClass::PRIMARY)?;
            self.expect_all(&["PRIMARY", "KEY"], Mode::Keep)?;
            self.primary_key_tail(seen)?;
        } else if dialect == Dialect::MySql && self.check("KEY") {
            self.claim(seen, ConstraintClass::PRIMARY)?;
            let key = self.expect("KEY", Mode::Drop)?;
            self.kept
                .push(Token::synthesized(TokenKind::Word, "PRIMARY", key));
            self.kept.push(key.clone());
        } else if self.check("UNIQUE") {
            self.claim(seen, ConstraintClass::UNIQUE)?;
            self.advance(Mode::Keep);
            if dialect == Dialect::MySql {
                self.accept("KEY", Mode::Drop);
            }
            self.conflict_clause()?;
            self.postgres_index_parameters()?;
        } else if self.check("CHECK") {
            self.claim(seen, ConstraintClass::CHECK)?;
            self.advance(Mode::Keep);
            self.paren_span(Mode::Keep)?;
            self.check_tail()?;
        } else if self.check("DEFAULT") {
            self.claim(seen, ConstraintClass::DEFAULT)?;
            self.advance(Mode::Keep);
            self.default_value()?;
        } else if self.check("COLLATE") {
            self.claim(seen, ConstraintClass::COLLATE)?;
            self.advance(Mode::Keep);
            self.option_value(Mode::Keep)?;
            if self.accept_symbol('.', Mode::Keep).is_some() {
                self.option_value(Mode::Keep)?;
            }
        } else if self.check("REFERENCES") {
            self.claim(seen, ConstraintClass::REFERENCES)?;
            self.references()?;
        } else if self.check("GENERATED") || (dialect != Dialect::Postgres && self.check("AS")) {
            self.claim(seen, ConstraintClass::GENERATED)?;
            self.generated()?;
        } else if dialect == Dialect::MySql && self.check("AUTO_INCREMENT") {
            self.claim(seen, ConstraintClass::AUTOINCREMENT)?;
            self.advance(Mode::Keep);
        } else if dialect == Dialect::MySql && self.check("ON") && self.check_nth(1, "UPDATE") {
            self.claim(seen, ConstraintClass::ON_UPDATE)?;
            self.expect_all(&["ON", "UPDATE"], Mode::Drop)?;
            self.expect_any(&["CURRENT_TIMESTAMP", "NOW", "LOCALTIME", "LOCALTIMESTAMP"], Mode::Drop)?;
            if self.check_symbol('(') {
                self.paren_span(Mode::Drop)?;
            }
        } else if let Some(class) = self
            .mysql_attribute_class()
            .filter(|_| dialect == Dialect::MySql)
        {
            self.claim(seen, class)?;
            self.mysql_column_attribute()?;
        } else if dialect == Dialect::Postgres && self.at_deferrable() {
            self.claim(seen, ConstraintClass::DEFERRABLE)?;
            self.deferrable()?;
        } else {
            return Ok(false);
        }

        Ok(true)
    }

    /// SQLite `ASC`/`DESC`, conflict clause and `AUTOINCREMENT` after `PRIMARY KEY`.
    fn primary_key_tail(&mut self, seen: &mut ConstraintClass) -> ValidateResult<()> {
        match self.dialect {
            Dialect::Sqlite => {
                self.accept_any(&["ASC", "DESC"], Mode::Drop);
                self.conflict_clause()?;
                if self.check("AUTOINCREMENT") {
                    self.claim(seen, ConstraintClass::AUTOINCREMENT)?;
                    self.advance(Mode::Keep);
                }
            }
            Dialect::Postgres => self.postgres_index_parameters()?,
            Dialect::MySql => {}
        }
        Ok(())
    }

    /// SQLite `ON CONFLICT resolution`, dropped.
    pub(super) fn conflict_clause(&mut self) -> ValidateResult<()> {
        if self.dialect == Dialect::Sqlite && self.check("ON") && self.check_nth(1, "CONFLICT") {
            self.expect_all(&["ON", "CONFLICT"], Mode::Drop)?;
            self.expect_any(CONFLICT_RESOLUTIONS, Mode::Drop)?;
        }
        Ok(())
    }

    /// Modifiers after a `CHECK (expr)`, dropped.
    pub(super) fn check_tail(&mut self) -> ValidateResult<()> {
        match self.dialect {
            Dialect::MySql => {
                if self.check("NOT") && self.check_nth(1, "ENFORCED") {
                    self.expect_all(&["NOT", "ENFORCED"], Mode::Drop)?;
                } else {
                    self.accept("ENFORCED", Mode::Drop);
                }
            }
            Dialect::Postgres => {
                if self.check("NO") && self.check_nth(1, "INHERIT") {
                    self.expect_all(&["NO", "INHERIT"], Mode::Drop)?;
                }
            }
            Dialect::Sqlite => {}
        }
        Ok(())
    }

    /// PostgreSQL `INCLUDE (…)`, `WITH (…)` and `USING INDEX TABLESPACE name`, dropped.
    pub(super) fn postgres_index_parameters(&mut self) -> ValidateResult<()> {
        if self.dialect != Dialect::Postgres {
            return Ok(());
        }

        loop {
            if self.accept("INCLUDE", Mode::Drop) {
                self.name_list(Mode::Drop)?;
            } else if self.check("WITH") && self.peek_nth(1).is_some_and(|t| t.is_symbol('(')) {
                self.advance(Mode::Drop);
                self.paren_span(Mode::Drop)?;
            } else if self.check("USING") && self.check_nth(1, "INDEX") {
                self.expect_all(&["USING", "INDEX", "TABLESPACE"], Mode::Drop)?;
                self.name(Mode::Drop)?;
            } else {
                return Ok(());
            }
        }
    }

    /// Literal, parenthesized expression, or function call after `DEFAULT`.
    fn default_value(&mut self) -> ValidateResult<()> {
        let Some(token) = self.peek() else {
            return Err(self.error());
        };

        match token.kind {
            TokenKind::Symbol if token.is_symbol('(') => self.paren_span(Mode::Keep)?,
            TokenKind::Number | TokenKind::String(_) => {
                self.advance(Mode::Keep);
            }
            TokenKind::Word if token.is_any_keyword(LITERAL_DEFAULTS) => {
                self.advance(Mode::Keep);
                if self.dialect != Dialect::Sqlite && self.check_symbol('(') {
                    self.paren_span(Mode::Keep)?;
                }
            }
            TokenKind::Word
                if self.dialect != Dialect::Sqlite
                    && super::is_identifier(&token.lexeme)
                    && self.peek_nth(1).is_some_and(|t| t.is_symbol('(')) =>
            {
                self.advance(Mode::Keep);
                self.paren_span(Mode::Keep)?;
            }
            _ => return Err(self.error()),
        }

        if self.dialect == Dialect::Postgres {
            self.casts()?;
        }
        Ok(())
    }

    /// PostgreSQL `::type` suffixes, dropped. `'a'::character varying` is one cast.
    fn casts(&mut self) -> ValidateResult<()> {
        while let Some(token) = self.peek() {
            let Some(target) = token.lexeme.strip_prefix("::") else {
                break;
            };
            if token.kind != TokenKind::Word {
                break;
            }
            self.advance(Mode::Drop);

            let target = if target.is_empty() {
                match self.peek() {
                    Some(t) if t.kind == TokenKind::Word => {
                        self.advance(Mode::Drop);
                        t.lexeme.as_str()
                    }
                    _ => return Err(self.error()),
                }
            } else {
                target
            };

            let base = target.trim_end_matches("[]").to_uppercase();
            match base.as_str() {
                "CHARACTER" | "BIT" => {
                    self.accept("VARYING", Mode::Drop);
                }
                "DOUBLE" => {
                    self.expect("PRECISION", Mode::Drop)?;
                }
                _ => {}
            }
            if self.check_symbol('(') {
                self.paren_span(Mode::Drop)?;
            }
        }
        Ok(())
    }

    /// `REFERENCES name [(cols)]` kept, followed by a dropped trailer.
    pub(super) fn references(&mut self) -> ValidateResult<()> {
        self.expect("REFERENCES", Mode::Keep)?;
        self.qualified_name(Mode::Keep)?;
        if self.check_symbol('(') {
            self.name_list(Mode::Keep)?;
        }

        loop {
            if self.accept("MATCH", Mode::Drop) {
                self.expect_any(&["FULL", "PARTIAL", "SIMPLE"], Mode::Drop)?;
            } else if self.at_referential_action() {
                self.referential_action()?;
            } else if self.dialect != Dialect::MySql && self.at_deferrable() {
                self.deferrable()?;
            } else {
                return Ok(());
            }
        }
    }

    fn at_referential_action(&self) -> bool {
        self.check_nth(0, "ON")
            && self
                .peek_nth(1)
                .is_some_and(|t| t.is_any_keyword(&["DELETE", "UPDATE"]))
            && self
                .peek_nth(2)
                .is_some_and(|t| t.is_any_keyword(REFERENTIAL_ACTIONS))
    }

    /// `ON DELETE|UPDATE SET NULL|SET DEFAULT|CASCADE|RESTRICT|NO ACTION`
    fn referential_action(&mut self) -> ValidateResult<()> {
        self.expect("ON", Mode::Drop)?;
        self.expect_any(&["DELETE", "UPDATE"], Mode::Drop)?;

        if self.accept("SET", Mode::Drop) {
            self.expect_any(&["NULL", "DEFAULT"], Mode::Drop)?;
        } else if self.accept("NO", Mode::Drop) {
            self.expect("ACTION", Mode::Drop)?;
        } else {
            self.expect_any(&["CASCADE", "RESTRICT"], Mode::Drop)?;
        }
        Ok(())
    }

    pub(super) fn at_deferrable(&self) -> bool {
        self.check_nth(0, "DEFERRABLE")
            || self.check_nth(0, "INITIALLY")
            || (self.check_nth(0, "NOT") && self.check_nth(1, "DEFERRABLE"))
    }

    /// `[NOT] DEFERRABLE [INITIALLY DEFERRED|IMMEDIATE]` or `INITIALLY …` alone.
    pub(super) fn deferrable(&mut self) -> ValidateResult<()> {
        if self.check("INITIALLY") {
            return self.initially();
        }

        self.accept("NOT", Mode::Drop);
        self.expect("DEFERRABLE", Mode::Drop)?;
        if self.check("INITIALLY") {
            self.initially()?;
        }
        Ok(())
    }

    fn initially(&mut self) -> ValidateResult<()> {
        self.expect("INITIALLY", Mode::Drop)?;
        self.expect_any(&["DEFERRED", "IMMEDIATE"], Mode::Drop)?;
        Ok(())
    }

    /// Generated and identity columns, dropped.
    fn generated(&mut self) -> ValidateResult<()> {
        if self.dialect == Dialect::Postgres {
            self.expect("GENERATED", Mode::Drop)?;
            if self.accept("BY", Mode::Drop) {
                self.expect("DEFAULT", Mode::Drop)?;
            } else {
                self.expect("ALWAYS", Mode::Drop)?;
            }
            self.expect("AS", Mode::Drop)?;

            if self.accept("IDENTITY", Mode::Drop) {
                if self.check_symbol('(') {
                    self.paren_span(Mode::Drop)?;
                }
            } else {
                self.paren_span(Mode::Drop)?;
                self.expect("STORED", Mode::Drop)?;
            }
            return Ok(());
        }

        if self.accept("GENERATED", Mode::Drop) {
            self.expect("ALWAYS", Mode::Drop)?;
        }
        self.expect("AS", Mode::Drop)?;
        self.paren_span(Mode::Drop)?;
        self.accept_any(&["STORED", "VIRTUAL"], Mode::Drop);
        Ok(())
    }

    fn mysql_attribute_class(&mut self) -> Option<ConstraintClass> {
        let token = self.peek()?;
        MYSQL_ATTRIBUTE_CLASSES
            .iter()
            .find(|(keyword, _)| token.is_keyword(keyword))
            .map(|&(_, class)| class)
    }

    /// MySQL column attributes with no model impact, dropped.
    fn mysql_column_attribute(&mut self) -> ValidateResult<()> {
        if self.accept_any(&["VISIBLE", "INVISIBLE"], Mode::Drop) {
            return Ok(());
        }
        if self.accept("COMMENT", Mode::Drop) {
            return self.string_literal(Mode::Drop);
        }
        if self.accept("COLUMN_FORMAT", Mode::Drop) {
            self.expect_any(&["FIXED", "DYNAMIC", "DEFAULT"], Mode::Drop)?;
            return Ok(());
        }
        if self.accept("STORAGE", Mode::Drop) {
            self.expect_any(&["DISK", "MEMORY"], Mode::Drop)?;
            return Ok(());
        }

        self.expect_any(&["ENGINE_ATTRIBUTE", "SECONDARY_ENGINE_ATTRIBUTE"], Mode::Drop)?;
        self.accept_symbol('=', Mode::Drop);
        self.string_literal(Mode::Drop)
    }
}
