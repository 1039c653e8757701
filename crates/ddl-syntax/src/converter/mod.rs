//! Builds the table model from the validator's kept stream.
//!
//! The kept stream is already known to be well-formed, so conversion cannot
//! fail. An unexpected token ends the production it appears in and is skipped.

use crate::lexer::token::{Token, TokenKind};
use model::{
    Check, Column, ColumnConstraint, DataType, DefaultValue, ForeignKey, PrimaryKey, Reference,
    Table, TableConstraint, Unique,
};
use tracing::debug;

const TABLE_CONSTRAINT_STARTS: &[&str] = &["CONSTRAINT", "PRIMARY", "UNIQUE", "CHECK", "FOREIGN"];

/// Converts a kept token stream into tables, in source order.
pub fn convert(tokens: &[Token]) -> Vec<Table> {
    let mut converter = Converter { tokens, pos: 0 };
    let mut tables = Vec::new();

    while let Some(token) = converter.peek() {
        if token.is_keyword("CREATE") {
            tables.push(converter.table());
        } else {
            converter.pos += 1;
        }
    }

    debug!(
        "Converted {} kept tokens into {} tables",
        tokens.len(),
        tables.len()
    );
    tables
}

struct Converter<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Converter<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn accept(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn accept_symbol(&mut self, symbol: char) -> bool {
        if self.peek().is_some_and(|t| t.is_symbol(symbol)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Whether the next tokens are exactly `keywords`, in order.
    fn at_keywords(&self, keywords: &[&str]) -> bool {
        keywords
            .iter()
            .enumerate()
            .all(|(i, k)| self.tokens.get(self.pos + i).is_some_and(|t| t.is_keyword(k)))
    }

    fn at_entry_end(&self) -> bool {
        self.peek()
            .is_none_or(|t| t.is_symbol(',') || t.is_symbol(')'))
    }

    /// Next token as a model name, without its quotes.
    fn name(&mut self) -> Option<String> {
        self.next().map(|t| t.unquoted().to_string())
    }

    /// `name [. name]`, joined with `.` when qualified.
    fn qualified_name(&mut self) -> (Option<String>, String) {
        let first = self.name().unwrap_or_default();
        if self.accept_symbol('.') {
            (Some(first), self.name().unwrap_or_default())
        } else {
            (None, first)
        }
    }

    /// `( name [, name]* )`
    fn name_list(&mut self) -> Vec<String> {
        let mut names = Vec::new();
        if !self.accept_symbol('(') {
            return names;
        }

        while let Some(token) = self.next() {
            if token.is_symbol(')') {
                break;
            }
            if !token.is_symbol(',') {
                names.push(token.unquoted().to_string());
            }
        }
        names
    }

    /// Text of a balanced `( … )` span, lexemes joined without separators.
    fn paren_text(&mut self) -> String {
        let mut text = String::new();
        let mut depth = 0usize;

        while let Some(token) = self.peek() {
            if token.is_symbol('(') {
                depth += 1;
            } else if token.is_symbol(')') {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if depth == 0 {
                break;
            }

            text.push_str(&token.lexeme);
            self.pos += 1;
            if depth == 0 {
                break;
            }
        }
        text
    }

    fn table(&mut self) -> Table {
        let mut table = Table::default();

        self.accept("CREATE");
        self.accept("TABLE");
        if self.at_keywords(&["IF", "NOT", "EXISTS"]) {
            self.pos += 3;
            table.if_not_exists = true;
        }

        let (schema, name) = self.qualified_name();
        table.schema = schema.unwrap_or_default();
        table.name = name;

        self.accept_symbol('(');
        while let Some(token) = self.peek() {
            if token.is_symbol(')') {
                self.pos += 1;
                break;
            }
            if token.is_symbol(',') {
                // Doubled commas are tolerated.
                self.pos += 1;
                continue;
            }

            if token.is_any_keyword(TABLE_CONSTRAINT_STARTS) {
                self.table_constraint(&mut table.constraints);
            } else {
                table.columns.push(self.column());
            }
        }
        self.accept_symbol(';');

        debug!(
            "Converted table {} with {} columns",
            table.qualified_name(),
            table.columns.len()
        );
        table
    }

    fn column(&mut self) -> Column {
        let name = self.name().unwrap_or_default();
        let data_type = self.data_type();
        let constraint = self.column_constraint();

        Column {
            name,
            data_type,
            constraint,
        }
    }

    fn data_type(&mut self) -> DataType {
        let Some(first) = self.peek().filter(|t| t.kind == TokenKind::Word) else {
            return DataType::default();
        };
        self.pos += 1;

        let first = first.lexeme.to_uppercase();
        let name = match self.peek() {
            Some(second) if second.is_any_keyword(&["VARYING", "PRECISION"]) => {
                self.pos += 1;
                canonical_type(&first, &second.lexeme.to_uppercase())
            }
            _ => first,
        };

        let mut digits = [0u32; 2];
        if self.accept_symbol('(') {
            let mut slot = 0;
            while let Some(token) = self.next() {
                if token.is_symbol(')') {
                    break;
                }
                if token.is_symbol(',') {
                    slot += 1;
                } else if let Some(digit) = digits.get_mut(slot) {
                    *digit = token.lexeme.parse().unwrap_or_default();
                }
            }
        }

        DataType::new(&name).with_digits(digits[0], digits[1])
    }

    fn column_constraint(&mut self) -> ColumnConstraint {
        let mut constraint = ColumnConstraint::default();

        while !self.at_entry_end() {
            if self.accept("CONSTRAINT") {
                constraint.name = self.name();
            } else if self.accept("NOT") {
                self.accept("NULL");
                constraint.is_not_null = true;
            } else if self.accept("PRIMARY") {
                self.accept("KEY");
                constraint.is_primary_key = true;
            } else if self.accept("AUTOINCREMENT") || self.accept("AUTO_INCREMENT") {
                constraint.is_autoincrement = true;
            } else if self.accept("UNIQUE") {
                constraint.is_unique = true;
            } else if self.accept("CHECK") {
                constraint.check = Some(self.paren_text());
            } else if self.accept("DEFAULT") {
                constraint.default = self.default_value();
            } else if self.accept("COLLATE") {
                constraint.collate = self.name().map(|first| {
                    if self.accept_symbol('.') {
                        format!("{}.{}", first, self.name().unwrap_or_default())
                    } else {
                        first
                    }
                });
            } else if self.accept("REFERENCES") {
                constraint.references = self.reference();
            } else {
                self.pos += 1;
            }
        }

        constraint
    }

    fn default_value(&mut self) -> Option<DefaultValue> {
        let token = self.peek()?;

        let value = match token.kind {
            TokenKind::Symbol if token.is_symbol('(') => {
                return Some(DefaultValue::Expr(self.paren_text()));
            }
            TokenKind::Number => DefaultValue::Number(token.lexeme.parse().unwrap_or_default()),
            TokenKind::String(_) => DefaultValue::String(token.unquoted().to_string()),
            _ if token.is_keyword("NULL") => DefaultValue::Null,
            _ if token.is_keyword("TRUE") => DefaultValue::Boolean(true),
            _ if token.is_keyword("FALSE") => DefaultValue::Boolean(false),
            _ => {
                // Function call or keyword such as CURRENT_TIMESTAMP.
                self.pos += 1;
                let mut text = token.lexeme.clone();
                if self.peek().is_some_and(|t| t.is_symbol('(')) {
                    text.push_str(&self.paren_text());
                }
                return Some(DefaultValue::Expr(text));
            }
        };

        self.pos += 1;
        Some(value)
    }

    /// `REFERENCES` target; a qualified table becomes `schema.table`.
    fn reference(&mut self) -> Reference {
        let table_name = match self.qualified_name() {
            (Some(schema), name) => format!("{}.{}", schema, name),
            (None, name) => name,
        };
        let column_names = self
            .peek()
            .is_some_and(|t| t.is_symbol('('))
            .then(|| self.name_list());

        Reference {
            table_name,
            column_names,
        }
    }

    fn table_constraint(&mut self, constraints: &mut TableConstraint) {
        let name = if self.accept("CONSTRAINT") {
            self.name()
        } else {
            None
        };

        if self.accept("PRIMARY") {
            self.accept("KEY");
            let column_names = self.name_list();
            constraints.primary_key.push(PrimaryKey { name, column_names });
        } else if self.accept("UNIQUE") {
            let column_names = self.name_list();
            constraints.unique.push(Unique { name, column_names });
        } else if self.accept("CHECK") {
            let expr = self.paren_text();
            constraints.check.push(Check { name, expr });
        } else if self.accept("FOREIGN") {
            self.accept("KEY");
            let column_names = self.name_list();
            let references = if self.accept("REFERENCES") {
                self.reference()
            } else {
                Reference::default()
            };
            constraints.foreign_key.push(ForeignKey {
                name,
                column_names,
                references,
            });
        }
    }
}

fn canonical_type(first: &str, second: &str) -> String {
    match (first, second) {
        ("BIT", "VARYING") => "VARBIT".to_string(),
        ("CHARACTER", "VARYING") => "VARCHAR".to_string(),
        _ => format!("{} {}", first, second),
    }
}
