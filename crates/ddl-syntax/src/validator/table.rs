use super::{Mode, Validator};
use crate::{dialect::Dialect, error::ValidateResult};

const CONSTRAINT_STARTS: &[&str] = &["CONSTRAINT", "PRIMARY", "UNIQUE", "CHECK", "FOREIGN"];
const MYSQL_INDEX_STARTS: &[&str] = &["INDEX", "KEY", "FULLTEXT", "SPATIAL"];

impl Validator<'_> {
    /// Whether the next table entry is a constraint rather than a column.
    pub(super) fn at_table_constraint(&mut self) -> bool {
        if self.check_any(CONSTRAINT_STARTS) {
            return true;
        }

        match self.dialect {
            Dialect::MySql => self.check_any(MYSQL_INDEX_STARTS),
            Dialect::Postgres => {
                self.check("EXCLUDE")
                    && self
                        .peek_nth(1)
                        .is_some_and(|t| t.is_keyword("USING") || t.is_symbol('('))
            }
            Dialect::Sqlite => false,
        }
    }

    /// `[CONSTRAINT name] PRIMARY KEY | UNIQUE | CHECK | FOREIGN KEY …`
    ///
    /// MySQL index definitions and PostgreSQL `EXCLUDE` are validated and then
    /// removed from the kept stream.
    pub(super) fn table_constraint(&mut self) -> ValidateResult<()> {
        let mark = self.kept.len();
        let named = self.constraint_head()?;

        if self.check("PRIMARY") {
            self.expect_all(&["PRIMARY", "KEY"], Mode::Keep)?;
            self.mysql_index_type()?;
            self.key_part_list(Mode::Keep)?;
            self.key_constraint_tail()?;
        } else if self.check("UNIQUE") {
            self.advance(Mode::Keep);
            self.unique_head()?;
            self.key_part_list(Mode::Keep)?;
            self.key_constraint_tail()?;
        } else if self.check("CHECK") {
            self.advance(Mode::Keep);
            self.paren_span(Mode::Keep)?;
            self.check_tail()?;
        } else if self.check("FOREIGN") {
            self.expect_all(&["FOREIGN", "KEY"], Mode::Keep)?;
            if self.dialect == Dialect::MySql && !self.check_symbol('(') {
                self.name(Mode::Drop)?;
            }
            self.name_list(Mode::Keep)?;
            self.references()?;
        } else if !named && self.dialect == Dialect::MySql && self.check_any(MYSQL_INDEX_STARTS) {
            self.mysql_index()?;
            self.kept.truncate(mark);
        } else if !named && self.dialect == Dialect::Postgres && self.check("EXCLUDE") {
            self.exclude()?;
            self.kept.truncate(mark);
        } else {
            return Err(self.error());
        }

        if self.dialect == Dialect::Postgres && self.at_deferrable() {
            self.deferrable()?;
        }
        Ok(())
    }

    /// MySQL `[INDEX|KEY] [name] [USING type]` and PostgreSQL
    /// `NULLS [NOT] DISTINCT` after `UNIQUE`, dropped.
    fn unique_head(&mut self) -> ValidateResult<()> {
        match self.dialect {
            Dialect::MySql => {
                self.accept_any(&["INDEX", "KEY"], Mode::Drop);
                if !self.check_symbol('(') && !self.check("USING") {
                    self.name(Mode::Drop)?;
                }
                self.mysql_index_type()?;
            }
            Dialect::Postgres => {
                if self.accept("NULLS", Mode::Drop) {
                    self.accept("NOT", Mode::Drop);
                    self.expect("DISTINCT", Mode::Drop)?;
                }
            }
            Dialect::Sqlite => {}
        }
        Ok(())
    }

    /// Trailer shared by `PRIMARY KEY (…)` and `UNIQUE (…)`, dropped.
    fn key_constraint_tail(&mut self) -> ValidateResult<()> {
        match self.dialect {
            Dialect::Sqlite => self.conflict_clause(),
            Dialect::Postgres => self.postgres_index_parameters(),
            Dialect::MySql => self.mysql_index_options(),
        }
    }

    /// `( part [, part]* )` where a part is a column name with optional
    /// length, collation and ordering. Only names and delimiters follow `mode`.
    fn key_part_list(&mut self, mode: Mode) -> ValidateResult<()> {
        self.expect_symbol('(', mode)?;
        loop {
            self.key_part(mode)?;
            if self.accept_symbol(',', mode).is_none() {
                break;
            }
        }
        self.expect_symbol(')', mode)?;
        Ok(())
    }

    fn key_part(&mut self, mode: Mode) -> ValidateResult<()> {
        // MySQL functional key part, only inside dropped index definitions.
        if mode == Mode::Drop && self.check_symbol('(') {
            self.paren_span(Mode::Drop)?;
        } else {
            self.name(mode)?;
        }

        if self.dialect == Dialect::MySql && self.check_symbol('(') {
            self.expect_symbol('(', Mode::Drop)?;
            self.number(Mode::Drop)?;
            self.expect_symbol(')', Mode::Drop)?;
        }
        if self.dialect != Dialect::MySql && self.accept("COLLATE", Mode::Drop) {
            self.option_value(Mode::Drop)?;
        }
        self.accept_any(&["ASC", "DESC"], Mode::Drop);
        if self.dialect == Dialect::Postgres && self.accept("NULLS", Mode::Drop) {
            self.expect_any(&["FIRST", "LAST"], Mode::Drop)?;
        }
        Ok(())
    }

    /// `{INDEX|KEY} [name] [USING type] (parts) [options]` and the
    /// `FULLTEXT`/`SPATIAL` forms.
    fn mysql_index(&mut self) -> ValidateResult<()> {
        if self.accept_any(&["FULLTEXT", "SPATIAL"], Mode::Drop) {
            self.accept_any(&["INDEX", "KEY"], Mode::Drop);
        } else {
            self.expect_any(&["INDEX", "KEY"], Mode::Drop)?;
        }

        if !self.check_symbol('(') && !self.check("USING") {
            self.name(Mode::Drop)?;
        }
        self.mysql_index_type()?;
        self.key_part_list(Mode::Drop)?;
        self.mysql_index_options()
    }

    /// MySQL `USING BTREE|HASH`, dropped.
    fn mysql_index_type(&mut self) -> ValidateResult<()> {
        if self.dialect == Dialect::MySql && self.accept("USING", Mode::Drop) {
            self.expect_any(&["BTREE", "HASH"], Mode::Drop)?;
        }
        Ok(())
    }

    fn mysql_index_options(&mut self) -> ValidateResult<()> {
        loop {
            if self.accept("KEY_BLOCK_SIZE", Mode::Drop) {
                self.accept_symbol('=', Mode::Drop);
                self.number(Mode::Drop)?;
            } else if self.check("USING") {
                self.mysql_index_type()?;
            } else if self.accept("WITH", Mode::Drop) {
                self.expect("PARSER", Mode::Drop)?;
                self.name(Mode::Drop)?;
            } else if self.accept("COMMENT", Mode::Drop) {
                self.string_literal(Mode::Drop)?;
            } else if self.accept_any(&["VISIBLE", "INVISIBLE"], Mode::Drop) {
            } else if self.accept_any(
                &["ENGINE_ATTRIBUTE", "SECONDARY_ENGINE_ATTRIBUTE"],
                Mode::Drop,
            ) {
                self.accept_symbol('=', Mode::Drop);
                self.string_literal(Mode::Drop)?;
            } else {
                return Ok(());
            }
        }
    }

    /// PostgreSQL `EXCLUDE [USING method] (elements) [params] [WHERE (pred)]`.
    fn exclude(&mut self) -> ValidateResult<()> {
        self.expect("EXCLUDE", Mode::Drop)?;
        if self.accept("USING", Mode::Drop) {
            self.name(Mode::Drop)?;
        }
        self.paren_span(Mode::Drop)?;
        self.postgres_index_parameters()?;
        if self.accept("WHERE", Mode::Drop) {
            self.paren_span(Mode::Drop)?;
        }
        Ok(())
    }
}
