use super::{Mode, Validator};
use crate::{dialect::Dialect, error::ValidateResult};

const MYSQL_VALUE_OPTIONS: &[&str] = &[
    "ENGINE",
    "SECONDARY_ENGINE",
    "AUTO_INCREMENT",
    "AVG_ROW_LENGTH",
    "KEY_BLOCK_SIZE",
    "MAX_ROWS",
    "MIN_ROWS",
    "STATS_SAMPLE_PAGES",
    "CHECKSUM",
    "DELAY_KEY_WRITE",
    "CHARSET",
    "COLLATE",
    "COMMENT",
    "COMPRESSION",
    "CONNECTION",
    "ENCRYPTION",
    "PASSWORD",
    "ENGINE_ATTRIBUTE",
    "SECONDARY_ENGINE_ATTRIBUTE",
    "INSERT_METHOD",
    "PACK_KEYS",
    "STATS_AUTO_RECALC",
    "STATS_PERSISTENT",
    "ROW_FORMAT",
];

impl Validator<'_> {
    /// Options between the closing `)` and `;`. All are dropped.
    pub(super) fn table_options(&mut self) -> ValidateResult<()> {
        match self.dialect {
            Dialect::Sqlite => self.sqlite_table_options(),
            Dialect::Postgres => self.postgres_table_options(),
            Dialect::MySql => self.mysql_table_options(),
        }
    }

    /// `WITHOUT ROWID` and `STRICT`, comma separated, each at most once.
    fn sqlite_table_options(&mut self) -> ValidateResult<()> {
        let mut without_rowid = false;
        let mut strict = false;

        if !self.check_any(&["WITHOUT", "STRICT"]) {
            return Ok(());
        }

        loop {
            if self.check("WITHOUT") && !without_rowid {
                self.expect_all(&["WITHOUT", "ROWID"], Mode::Drop)?;
                without_rowid = true;
            } else if self.check("STRICT") && !strict {
                self.advance(Mode::Drop);
                strict = true;
            } else {
                return Err(self.error());
            }

            if self.accept_symbol(',', Mode::Drop).is_none() {
                return Ok(());
            }
        }
    }

    fn postgres_table_options(&mut self) -> ValidateResult<()> {
        loop {
            if self.accept("INHERITS", Mode::Drop) {
                self.name_list(Mode::Drop)?;
            } else if self.check("PARTITION") {
                self.expect_all(&["PARTITION", "BY"], Mode::Drop)?;
                self.expect_any(&["RANGE", "LIST", "HASH"], Mode::Drop)?;
                self.paren_span(Mode::Drop)?;
            } else if self.accept("USING", Mode::Drop) {
                self.name(Mode::Drop)?;
            } else if self.accept("WITH", Mode::Drop) {
                self.paren_span(Mode::Drop)?;
            } else if self.check("WITHOUT") {
                self.expect_all(&["WITHOUT", "OIDS"], Mode::Drop)?;
            } else if self.check("ON") {
                self.expect_all(&["ON", "COMMIT"], Mode::Drop)?;
                if self.accept_any(&["PRESERVE", "DELETE"], Mode::Drop) {
                    self.expect("ROWS", Mode::Drop)?;
                } else {
                    self.expect("DROP", Mode::Drop)?;
                }
            } else if self.accept("TABLESPACE", Mode::Drop) {
                self.name(Mode::Drop)?;
            } else {
                return Ok(());
            }
        }
    }

    /// MySQL table options up to `;`. `=` is optional everywhere and options
    /// may be separated by commas.
    fn mysql_table_options(&mut self) -> ValidateResult<()> {
        loop {
            let Some(token) = self.peek() else {
                return Ok(());
            };
            if token.is_symbol(';') {
                return Ok(());
            }

            if self.check("PARTITION") && self.check_nth(1, "BY") {
                return self.mysql_partitioning();
            }

            self.accept("DEFAULT", Mode::Drop);
            self.mysql_table_option()?;
            self.accept_symbol(',', Mode::Drop);
        }
    }

    fn mysql_table_option(&mut self) -> ValidateResult<()> {
        if self.check("CHARACTER") {
            self.expect_all(&["CHARACTER", "SET"], Mode::Drop)?;
        } else if self.check_any(&["DATA", "INDEX"]) {
            self.advance(Mode::Drop);
            self.expect("DIRECTORY", Mode::Drop)?;
        } else if self.accept("TABLESPACE", Mode::Drop) {
            self.name(Mode::Drop)?;
            if self.accept("STORAGE", Mode::Drop) {
                self.expect_any(&["DISK", "MEMORY"], Mode::Drop)?;
            }
            return Ok(());
        } else if self.accept("UNION", Mode::Drop) {
            self.accept_symbol('=', Mode::Drop);
            self.name_list(Mode::Drop)?;
            return Ok(());
        } else if !self.accept_any(MYSQL_VALUE_OPTIONS, Mode::Drop) {
            return Err(self.error());
        }

        self.accept_symbol('=', Mode::Drop);
        self.option_value(Mode::Drop)
    }

    /// `PARTITION BY …` up to the terminating `;`, dropped.
    fn mysql_partitioning(&mut self) -> ValidateResult<()> {
        loop {
            let Some(token) = self.peek() else {
                return Ok(());
            };
            if token.is_symbol(';') {
                return Ok(());
            }
            if token.is_symbol('(') {
                self.paren_span(Mode::Drop)?;
            } else {
                self.advance(Mode::Drop);
            }
        }
    }
}
