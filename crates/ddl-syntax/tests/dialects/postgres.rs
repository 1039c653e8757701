use ddl_syntax::{DataType, DefaultValue, Dialect};

use super::helpers::*;

#[test]
fn test_type_canonicalization() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE t (aaa bit varying(10), bbb character varying, ccc double precision);",
    );
    let types: Vec<_> = table.columns.iter().map(|c| c.data_type.clone()).collect();

    assert_eq!(
        types,
        vec![
            DataType::new("VARBIT").with_digits(10, 0),
            DataType::new("VARCHAR"),
            DataType::new("DOUBLE PRECISION"),
        ]
    );
}

#[test]
fn test_type_arguments() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE price (
  amount numeric(12, 4),
  ratio decimal(5),
  code char(3),
  tag varchar(64)[],
  stamp timestamp(6) without time zone,
  at time with time zone,
  flags varbit(8),
  measured float(24)
);",
    );
    let types: Vec<_> = table
        .columns
        .iter()
        .map(|c| c.data_type.to_string())
        .collect();

    assert_eq!(
        types,
        vec![
            "NUMERIC(12,4)",
            "DECIMAL(5)",
            "CHAR(3)",
            "VARCHAR(64)",
            "TIMESTAMP(6)",
            "TIME",
            "VARBIT(8)",
            "FLOAT(24)"
        ]
    );
}

#[test]
fn test_array_suffix_stays_in_type_name() {
    let table = parse_one(Dialect::Postgres, "CREATE TABLE t (ids integer[], tags text[]);");

    assert_eq!(table.columns[0].data_type.name, "INTEGER[]");
    assert_eq!(table.columns[1].data_type.name, "TEXT[]");
}

#[test]
fn test_schema_qualified_names() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE IF NOT EXISTS billing.\"Invoice\" (
  id bigserial PRIMARY KEY,
  customer_id bigint NOT NULL REFERENCES crm.customer (id) ON DELETE SET NULL
);",
    );

    assert_eq!(table.schema, "billing");
    assert_eq!(table.name, "Invoice");
    assert_eq!(table.qualified_name(), "billing.Invoice");
    assert!(table.if_not_exists);

    let references = &table.columns[1].constraint.references;
    assert_eq!(references.table_name, "crm.customer");
    assert_eq!(references.column_names, Some(vec!["id".to_string()]));
}

#[test]
fn test_defaults_with_casts_and_calls() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE account (
  id uuid DEFAULT gen_random_uuid(),
  status varchar(16) DEFAULT 'active'::character varying NOT NULL,
  created timestamptz DEFAULT now(),
  score integer DEFAULT 0,
  meta jsonb DEFAULT '{}'::jsonb,
  active boolean DEFAULT true
);",
    );
    let defaults: Vec<_> = table
        .columns
        .iter()
        .map(|c| c.constraint.default.clone())
        .collect();

    assert_eq!(
        defaults,
        vec![
            Some(DefaultValue::Expr("gen_random_uuid()".to_string())),
            Some(DefaultValue::String("active".to_string())),
            Some(DefaultValue::Expr("now()".to_string())),
            Some(DefaultValue::Number(0.0)),
            Some(DefaultValue::String("{}".to_string())),
            Some(DefaultValue::Boolean(true)),
        ]
    );
    assert!(table.columns[1].constraint.is_not_null);
}

#[test]
fn test_casts_on_numbers_and_keywords() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE stock (
  qty integer DEFAULT 0::integer NOT NULL,
  price numeric(10,2) DEFAULT -1.5::numeric,
  note text DEFAULT NULL::text,
  label character varying(32) DEFAULT NULL::character varying,
  flag boolean DEFAULT false::boolean,
  code text DEFAULT 'x'::text::character varying
);",
    );
    let defaults: Vec<_> = table
        .columns
        .iter()
        .map(|c| c.constraint.default.clone())
        .collect();

    assert_eq!(
        defaults,
        vec![
            Some(DefaultValue::Number(0.0)),
            Some(DefaultValue::Number(-1.5)),
            Some(DefaultValue::Null),
            Some(DefaultValue::Null),
            Some(DefaultValue::Boolean(false)),
            Some(DefaultValue::String("x".to_string())),
        ]
    );
    assert!(table.columns[0].constraint.is_not_null);
    assert_eq!(table.columns[3].data_type.name, "VARCHAR");
}

#[test]
fn test_bare_if_is_a_table_name() {
    let table = parse_one(Dialect::Postgres, "CREATE TABLE if (x int);");

    assert_eq!(table.name, "if");
    assert!(!table.if_not_exists);
    assert_eq!(table.columns[0].name, "x");
}

#[test]
fn test_schema_qualified_collation() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE t (name text COLLATE pg_catalog.\"default\" NOT NULL);",
    );
    let constraint = &table.columns[0].constraint;

    assert_eq!(constraint.collate.as_deref(), Some("pg_catalog.default"));
    assert!(constraint.is_not_null);
}

#[test]
fn test_identity_and_generated_columns() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE item (
  id integer GENERATED ALWAYS AS IDENTITY (START WITH 10 INCREMENT BY 1) PRIMARY KEY,
  price numeric(10, 2) NOT NULL,
  taxed numeric GENERATED ALWAYS AS (price * 1.2) STORED
);",
    );

    assert_eq!(table.columns.len(), 3);
    assert!(table.columns[0].constraint.is_primary_key);
    assert!(!table.columns[0].constraint.is_autoincrement);
    assert_eq!(table.columns[2].data_type, DataType::new("NUMERIC"));
}

#[test]
fn test_table_level_constraints() {
    let table = parse_one(
        Dialect::Postgres,
        "CREATE TABLE booking (
  room int NOT NULL,
  during tsrange NOT NULL,
  guest int,
  CONSTRAINT booking_pk PRIMARY KEY (room, during) INCLUDE (guest),
  CONSTRAINT one_guest UNIQUE NULLS NOT DISTINCT (guest),
  CONSTRAINT positive CHECK (room > 0) NO INHERIT,
  CONSTRAINT guest_fk FOREIGN KEY (guest) REFERENCES guest (id) MATCH SIMPLE
    ON UPDATE CASCADE ON DELETE RESTRICT DEFERRABLE INITIALLY DEFERRED,
  EXCLUDE USING gist (room WITH =, during WITH &&)
);",
    );
    let constraints = &table.constraints;

    assert_eq!(table.columns.len(), 3);
    assert_eq!(constraints.primary_key[0].name.as_deref(), Some("booking_pk"));
    assert_eq!(constraints.primary_key[0].column_names, vec!["room", "during"]);
    assert_eq!(constraints.unique[0].name.as_deref(), Some("one_guest"));
    assert_eq!(constraints.unique[0].column_names, vec!["guest"]);
    assert_eq!(constraints.check[0].expr, "(room>0)");
    assert_eq!(constraints.foreign_key[0].name.as_deref(), Some("guest_fk"));
    assert_eq!(constraints.foreign_key[0].references.table_name, "guest");
}

#[test]
fn test_table_options() {
    let tables = parse_ok(
        Dialect::Postgres,
        "CREATE UNLOGGED TABLE a (x int) WITH (fillfactor = 70) TABLESPACE fast;
CREATE TABLE b (y int) INHERITS (a);
CREATE TABLE c (z date) PARTITION BY RANGE (z);
CREATE TEMP TABLE d (w text) ON COMMIT DROP;
CREATE TABLE e (v text) WITHOUT OIDS;",
    );

    assert_eq!(tables.len(), 5);
    assert!(tables.iter().all(|t| t.columns.len() == 1));
}

#[test]
fn test_double_requires_precision() {
    let err = parse_err(Dialect::Postgres, "CREATE TABLE t (a double, b int);");
    assert_eq!(err.near, ",");
}

#[test]
fn test_backtick_is_rejected() {
    let err = parse_err(Dialect::Postgres, "CREATE TABLE `t` (a int);");
    assert_eq!(err.near, "`");
}

#[test]
fn test_reserved_column_name_needs_quotes() {
    let err = parse_err(Dialect::Postgres, "CREATE TABLE t (user text);");
    assert_eq!(err.near, "user");

    let table = parse_one(Dialect::Postgres, "CREATE TABLE t (\"user\" text);");
    assert_eq!(table.columns[0].name, "user");
}
