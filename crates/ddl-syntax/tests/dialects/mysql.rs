use ddl_syntax::{DataType, DefaultValue, Dialect, ValidateError, tokenize, validator};

use super::helpers::*;

#[test]
fn test_key_shorthand() {
    let table = parse_one(Dialect::MySql, "CREATE TABLE t (id integer key);");
    assert!(table.columns[0].constraint.is_primary_key);

    let tokens = tokenize("CREATE TABLE t (id integer key);", Dialect::MySql).unwrap();
    let kept = validator::filter(&tokens, Dialect::MySql).unwrap();
    let lexemes: Vec<_> = kept.iter().map(|t| t.lexeme.as_str()).collect();

    let key = lexemes.iter().position(|l| *l == "key").unwrap();
    assert_eq!(lexemes[key - 1], "PRIMARY");
}

#[test]
fn test_unknown_data_type() {
    let err = parse_err(Dialect::MySql, "CREATE TABLE t (x bigin);");
    assert_eq!(err, ValidateError::new(1, "bigin"));
}

#[test]
fn test_dump_style_table() {
    let table = parse_one(
        Dialect::MySql,
        "# dumped table
CREATE TABLE IF NOT EXISTS `shop`.`orders` (
  `id` bigint unsigned NOT NULL AUTO_INCREMENT,
  `customer_id` int(11) NOT NULL,
  `status` enum('new','paid','shipped') NOT NULL DEFAULT 'new',
  `total` decimal(10,2) NOT NULL DEFAULT '0.00',
  `note` varchar(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin DEFAULT NULL COMMENT 'free text',
  `created_at` datetime(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
  `updated_at` timestamp NULL DEFAULT NULL ON UPDATE CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_customer_created` (`customer_id`, `created_at`),
  KEY `idx_status` (`status`) USING BTREE,
  CONSTRAINT `fk_customer` FOREIGN KEY (`customer_id`) REFERENCES `customers` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci ROW_FORMAT=DYNAMIC COMMENT='orders';",
    );

    assert_eq!(table.schema, "shop");
    assert_eq!(table.name, "orders");
    assert!(table.if_not_exists);
    assert_eq!(table.columns.len(), 7);

    let id = &table.columns[0];
    assert_eq!(id.data_type, DataType::new("BIGINT"));
    assert!(id.constraint.is_not_null);
    assert!(id.constraint.is_autoincrement);

    assert_eq!(table.columns[1].data_type, DataType::new("INT").with_digits(11, 0));
    assert_eq!(table.columns[2].data_type, DataType::new("ENUM"));
    assert_eq!(
        table.columns[2].constraint.default,
        Some(DefaultValue::String("new".to_string()))
    );
    assert_eq!(table.columns[3].data_type, DataType::new("DECIMAL").with_digits(10, 2));

    let note = &table.columns[4].constraint;
    assert_eq!(note.collate.as_deref(), Some("utf8mb4_bin"));
    assert_eq!(note.default, Some(DefaultValue::Null));

    assert_eq!(
        table.columns[5].constraint.default,
        Some(DefaultValue::Expr("CURRENT_TIMESTAMP(3)".to_string()))
    );
    assert!(!table.columns[6].constraint.is_not_null);

    let constraints = &table.constraints;
    assert_eq!(constraints.primary_key[0].column_names, vec!["id"]);
    assert_eq!(
        constraints.unique[0].column_names,
        vec!["customer_id", "created_at"]
    );
    assert_eq!(constraints.foreign_key[0].name.as_deref(), Some("fk_customer"));
    assert_eq!(constraints.foreign_key[0].references.table_name, "customers");
}

#[test]
fn test_double_quotes_are_strings() {
    let table = parse_one(Dialect::MySql, "CREATE TABLE t (a varchar(8) DEFAULT \"x\");");
    assert_eq!(
        table.columns[0].constraint.default,
        Some(DefaultValue::String("x".to_string()))
    );

    let err = parse_err(Dialect::MySql, "CREATE TABLE \"t\" (a int);");
    assert_eq!(err.near, "\"t\"");
}

#[test]
fn test_backslash_escaped_default() {
    let table = parse_one(
        Dialect::MySql,
        r"CREATE TABLE t (a varchar(8) DEFAULT 'it\'s');",
    );
    assert_eq!(
        table.columns[0].constraint.default,
        Some(DefaultValue::String(r"it\'s".to_string()))
    );
}

#[test]
fn test_index_definitions_are_dropped() {
    let table = parse_one(
        Dialect::MySql,
        "CREATE TABLE doc (
  id int PRIMARY KEY,
  body text,
  INDEX (id),
  FULLTEXT KEY ft_body (body) WITH PARSER ngram,
  SPATIAL INDEX sp (id) COMMENT 'x'
);",
    );

    assert_eq!(table.columns.len(), 2);
    assert!(table.constraints.is_empty());
}

#[test]
fn test_check_constraints() {
    let table = parse_one(
        Dialect::MySql,
        "CREATE TABLE t (
  qty int CHECK (qty >= 0) ENFORCED,
  price int,
  CONSTRAINT CHECK (price > qty) NOT ENFORCED
);",
    );

    assert_eq!(table.columns[0].constraint.check.as_deref(), Some("(qty>=0)"));
    assert_eq!(table.constraints.check.len(), 1);
    assert_eq!(table.constraints.check[0].name, None);
    assert_eq!(table.constraints.check[0].expr, "(price>qty)");
}

#[test]
fn test_column_attributes() {
    let table = parse_one(
        Dialect::MySql,
        "CREATE TABLE t (
  a int zerofill UNIQUE KEY COLUMN_FORMAT FIXED STORAGE DISK VISIBLE,
  b int AS (a + 1) VIRTUAL INVISIBLE,
  c json ENGINE_ATTRIBUTE = '{}' SECONDARY_ENGINE_ATTRIBUTE '{}'
);",
    );

    assert_eq!(table.columns.len(), 3);
    assert!(table.columns[0].constraint.is_unique);
    assert_eq!(table.columns[2].data_type, DataType::new("JSON"));
}

#[test]
fn test_duplicate_attribute_is_rejected() {
    let err = parse_err(
        Dialect::MySql,
        "CREATE TABLE t (a int COMMENT 'x'\n  COMMENT 'y');",
    );
    assert_eq!(err, ValidateError::new(2, "COMMENT"));

    let err = parse_err(Dialect::MySql, "CREATE TABLE t (a int VISIBLE INVISIBLE);");
    assert_eq!(err.near, "INVISIBLE");
}

#[test]
fn test_table_options_and_partitions() {
    let table = parse_one(
        Dialect::MySql,
        "CREATE TEMPORARY TABLE t (a int, b date)
  ENGINE = MEMORY, DEFAULT CHARACTER SET = latin1 MAX_ROWS 100 TABLESPACE ts STORAGE MEMORY
  PARTITION BY RANGE (YEAR(b)) (PARTITION p0 VALUES LESS THAN (2000), PARTITION p1 VALUES LESS THAN MAXVALUE);",
    );

    assert_eq!(table.name, "t");
    assert_eq!(table.columns.len(), 2);
}

#[test]
fn test_unknown_table_option() {
    let err = parse_err(Dialect::MySql, "CREATE TABLE t (a int) ENGINE=InnoDB\nSHARDS=4;");
    assert_eq!(err, ValidateError::new(2, "SHARDS"));
}

#[test]
fn test_hash_comment() {
    let table = parse_one(
        Dialect::MySql,
        "CREATE TABLE t ( # columns follow\n  a int # the only one\n);",
    );
    assert_eq!(table.columns[0].name, "a");
}
