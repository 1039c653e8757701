use ddl_syntax::{Dialect, Token, TokenKind, parse, tokenize, validator};
use serde_json::json;

use super::helpers::*;

const SAMPLES: &[(Dialect, &str)] = &[
    (
        Dialect::Sqlite,
        "CREATE TABLE IF NOT EXISTS users (
  \"user_id\" INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT NOT NULL UNIQUE,
  created TEXT DEFAULT (DATETIME('now')) CHECK (created <> '')
) WITHOUT ROWID;
CREATE INDEX users_name ON users (username);",
    ),
    (
        Dialect::Postgres,
        "CREATE TABLE app.event (
  id bigserial PRIMARY KEY,
  kind character varying(32) NOT NULL DEFAULT 'info'::character varying,
  payload jsonb,
  during tsrange,
  CONSTRAINT kind_check CHECK (kind <> ''),
  EXCLUDE USING gist (during WITH &&)
) WITH (fillfactor = 90);",
    ),
    (
        Dialect::MySql,
        "CREATE TABLE `t` (
  `id` int unsigned NOT NULL AUTO_INCREMENT,
  `k` varchar(10) DEFAULT NULL,
  KEY `idx_k` (`k`),
  PRIMARY KEY (`id`)
) ENGINE=InnoDB;",
    ),
];

fn significant(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| !t.is_newline()).collect()
}

#[test]
fn test_kept_stream_is_subsequence_of_raw_tokens() {
    for &(dialect, ddl) in SAMPLES {
        let raw = tokenize(ddl, dialect).unwrap();
        let kept = validator::filter(&raw, dialect).unwrap();
        let raw = significant(&raw);

        let mut cursor = 0;
        for token in &kept {
            let found = raw[cursor..].iter().position(|r| *r == token);
            match found {
                Some(offset) => cursor += offset + 1,
                None => panic!("{} kept token {:?} is out of order", dialect, token.lexeme),
            }
        }
    }
}

#[test]
fn test_synthetic_primary_is_the_only_insertion() {
    let ddl = "CREATE TABLE t (a int key, b int);";
    let raw = tokenize(ddl, Dialect::MySql).unwrap();
    let kept = validator::filter(&raw, Dialect::MySql).unwrap();

    let raw = significant(&raw);
    let inserted: Vec<_> = kept.iter().filter(|k| !raw.contains(k)).collect();

    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].lexeme, "PRIMARY");
    assert_eq!(inserted[0].kind, TokenKind::Word);
}

#[test]
fn test_retokenizing_is_idempotent() {
    for &(dialect, ddl) in SAMPLES {
        assert_eq!(tokenize(ddl, dialect), tokenize(ddl, dialect));
    }
}

#[test]
fn test_errors_are_deterministic() {
    let bad = "CREATE TABLE t (\n  a INTEGER,\n  b INTEGER NOT NULL NOT NULL\n);";
    for dialect in Dialect::ALL {
        let first = parse(bad, dialect).unwrap_err();
        let second = parse(bad, dialect).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.line, 3);
    }
}

#[test]
fn test_error_line_is_at_least_newlines_before_it() {
    let lines = ["CREATE TABLE t (", "  a INTEGER,", "", "  -- gap", "  b INTEGER,", "  c nope", ");"];
    let ddl = lines.join("\n");
    let newlines_before = ddl[..ddl.find("nope").unwrap()].matches('\n').count();

    let err = parse_err(Dialect::Sqlite, &ddl);
    assert!(err.line > newlines_before);
    assert_eq!(err.line, 6);
}

#[test]
fn test_column_count_matches_source() {
    for n in 1..=40 {
        let columns: Vec<String> = (0..n).map(|i| format!("c{} INTEGER", i)).collect();
        let ddl = format!("CREATE TABLE t ({});", columns.join(", "));

        let table = parse_one(Dialect::Sqlite, &ddl);
        assert_eq!(table.columns.len(), n);
        for (i, column) in table.columns.iter().enumerate() {
            assert_eq!(column.name, format!("c{}", i));
        }
    }
}

#[test]
fn test_names_are_unquoted_exactly_once() {
    let table = parse_one(Dialect::Sqlite, "CREATE TABLE \"a\"\"b\" (`x y` TEXT, \"'q'\" TEXT);");

    assert_eq!(table.name, "a\"\"b");
    assert_eq!(table.columns[0].name, "x y");
    assert_eq!(table.columns[1].name, "'q'");
}

#[test]
fn test_deep_parentheses_do_not_overflow() {
    let depth = 10_000;
    let expr = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let ddl = format!("CREATE TABLE t (a INTEGER DEFAULT {});", expr);

    let table = parse_one(Dialect::Sqlite, &ddl);
    let default = table.columns[0].constraint.default.as_ref().unwrap();
    assert_eq!(default.as_str().map(str::len), Some(2 * depth + 1));
}

#[test]
fn test_json_shape() {
    let table = parse_one(
        Dialect::Sqlite,
        "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT DEFAULT 'x', PRIMARY KEY (id));",
    );
    let value = serde_json::to_value(&table).unwrap();

    assert_eq!(
        value,
        json!({
            "schema": "",
            "name": "t",
            "if_not_exists": false,
            "columns": [
                {
                    "name": "id",
                    "data_type": { "name": "INTEGER", "digit_n": 0, "digit_m": 0 },
                    "constraint": {
                        "name": null,
                        "is_primary_key": true,
                        "is_unique": false,
                        "is_not_null": false,
                        "is_autoincrement": false,
                        "default": null,
                        "check": null,
                        "collate": null,
                        "references": { "table_name": "", "column_names": null }
                    }
                },
                {
                    "name": "name",
                    "data_type": { "name": "TEXT", "digit_n": 0, "digit_m": 0 },
                    "constraint": {
                        "name": null,
                        "is_primary_key": false,
                        "is_unique": false,
                        "is_not_null": false,
                        "is_autoincrement": false,
                        "default": "x",
                        "check": null,
                        "collate": null,
                        "references": { "table_name": "", "column_names": null }
                    }
                }
            ],
            "constraints": {
                "primary_key": [{ "name": null, "column_names": ["id"] }],
                "unique": [],
                "check": [],
                "foreign_key": []
            }
        })
    );
}

#[test]
fn test_json_round_trip() {
    let (dialect, ddl) = SAMPLES[1];
    let tables = parse_ok(dialect, ddl);

    let json = serde_json::to_string(&tables).unwrap();
    let back: Vec<ddl_syntax::Table> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tables);
}
