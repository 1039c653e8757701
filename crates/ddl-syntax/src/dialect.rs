use crate::{
    error::DdlError,
    keywords::{
        MYSQL_RESERVED, MYSQL_TYPES, POSTGRES_RESERVED, POSTGRES_TYPES, SQLITE_RESERVED,
        SQLITE_TYPES,
    },
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

/// SQL dialect a script is written in.
///
/// Besides naming the grammar, a dialect decides how quote characters are
/// classified, which words are reserved and which type words exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Sqlite,
    Postgres,
    MySql,
}

/// What a quote character opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Identifier,
    String,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Sqlite, Dialect::Postgres, Dialect::MySql];

    /// Classifies a quote character, `None` when the dialect rejects it.
    pub fn quote_kind(self, quote: char) -> Option<QuoteKind> {
        match (self, quote) {
            (_, '\'') => Some(QuoteKind::String),
            (Dialect::Sqlite | Dialect::Postgres, '"') => Some(QuoteKind::Identifier),
            (Dialect::MySql, '"') => Some(QuoteKind::String),
            (Dialect::Sqlite | Dialect::MySql, '`') => Some(QuoteKind::Identifier),
            _ => None,
        }
    }

    /// `#` starts a line comment.
    pub fn hash_comments(self) -> bool {
        self == Dialect::MySql
    }

    /// `\` escapes the next character inside string literals.
    pub fn backslash_escapes(self) -> bool {
        self == Dialect::MySql
    }

    pub fn reserved_words(self) -> &'static HashSet<&'static str> {
        match self {
            Dialect::Sqlite => &*SQLITE_RESERVED,
            Dialect::Postgres => &*POSTGRES_RESERVED,
            Dialect::MySql => &*MYSQL_RESERVED,
        }
    }

    pub fn type_words(self) -> &'static HashSet<&'static str> {
        match self {
            Dialect::Sqlite => &*SQLITE_TYPES,
            Dialect::Postgres => &*POSTGRES_TYPES,
            Dialect::MySql => &*MYSQL_TYPES,
        }
    }

    pub fn is_reserved(self, word: &str) -> bool {
        self.reserved_words().contains(word.to_uppercase().as_str())
    }

    pub fn is_type_word(self, word: &str) -> bool {
        self.type_words().contains(word.to_uppercase().as_str())
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Sqlite => write!(f, "SQLite"),
            Dialect::Postgres => write!(f, "PostgreSQL"),
            Dialect::MySql => write!(f, "MySQL"),
        }
    }
}

impl FromStr for Dialect {
    type Err = DdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            _ => Err(DdlError::UnsupportedDialect(s.to_string())),
        }
    }
}
