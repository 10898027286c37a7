mod common;

use common::{script_rows, RecordingConnection};
use oxide_sql_hsqldb::prelude::*;

fn adapter(conn: RecordingConnection) -> HsqldbAdapter<RecordingConnection> {
    HsqldbAdapter::new(conn, AdapterConfig::default())
}

#[test]
fn test_adapter_identity() {
    let adapter = adapter(RecordingConnection::new());
    assert_eq!(adapter.adapter_name(), "HSQLDB");
    assert_eq!(adapter.empty_insert_statement_value(), "DEFAULT VALUES");
    assert_eq!(
        adapter.native_database_types()[&LogicalType::String].name,
        "varchar"
    );
}

#[test]
fn test_insert_reports_generated_identity() {
    let conn = RecordingConnection::new().with_identity(Value::Int(41));
    let mut adapter = adapter(conn);

    let result = adapter.execute("INSERT INTO users (name) VALUES ('a')").unwrap();
    assert_eq!(result, StatementResult::InsertId(41));

    let executed = &adapter.connection().executed;
    assert_eq!(
        executed,
        &["INSERT INTO users (name) VALUES ('a')", "CALL IDENTITY()"]
    );
}

#[test]
fn test_identity_parsed_from_text() {
    let conn = RecordingConnection::new().with_identity(Value::from("1234"));
    let mut adapter = adapter(conn);
    assert_eq!(adapter.last_insert_id().unwrap(), 1234);
}

#[test]
fn test_missing_identity_is_zero() {
    let mut adapter = adapter(RecordingConnection::new());
    assert_eq!(adapter.last_insert_id().unwrap(), 0);

    let mut adapter = self::adapter(RecordingConnection::new().with_identity(Value::Null));
    assert_eq!(
        adapter.execute("insert into t default values").unwrap(),
        StatementResult::InsertId(0)
    );
}

#[test]
fn test_non_numeric_identity_is_an_error() {
    let conn = RecordingConnection::new().with_identity(Value::from("abc"));
    let mut adapter = adapter(conn);
    assert!(matches!(
        adapter.last_insert_id(),
        Err(HsqldbError::TypeCoercion { .. })
    ));
}

#[test]
fn test_select_returns_rows_without_identity_lookup() {
    let rows = vec![Row::new([("ID", Value::Int(1))])];
    let conn = RecordingConnection::new().with_result("SELECT ID FROM USERS", rows.clone());
    let mut adapter = adapter(conn);

    assert_eq!(
        adapter.execute("SELECT ID FROM USERS").unwrap(),
        StatementResult::Rows(rows)
    );
    assert_eq!(adapter.connection().executed.len(), 1);
}

#[test]
fn test_driver_errors_pass_through() {
    let conn = RecordingConnection::new().failing_on("DROP TABLE nope");
    let mut adapter = adapter(conn);
    let err = adapter.execute("DROP TABLE nope").unwrap_err();
    assert!(matches!(err, HsqldbError::Driver(_)));
    assert!(err.to_string().contains("DROP TABLE nope"));
}

#[test]
fn test_ddl_statements() {
    let mut adapter = adapter(RecordingConnection::new());
    adapter
        .add_column("users", "age", LogicalType::Integer, &ColumnOptions::new().limit(11))
        .unwrap();
    adapter
        .change_column("users", "name", LogicalType::String, &ColumnOptions::new().limit(80))
        .unwrap();
    adapter
        .change_column_default("users", "name", &Value::from("n/a"))
        .unwrap();
    adapter.rename_column("users", "name", "full_name").unwrap();
    adapter.rename_table("users", "people").unwrap();
    adapter
        .remove_index("people", &IndexTarget::Columns(vec!["full_name".into()]))
        .unwrap();

    assert_eq!(
        adapter.connection().executed,
        [
            "ALTER TABLE users ADD age integer",
            "ALTER TABLE users ALTER COLUMN name varchar(80)",
            "ALTER TABLE users ALTER COLUMN name SET DEFAULT 'n/a'",
            "ALTER TABLE users ALTER COLUMN name RENAME TO full_name",
            "ALTER TABLE users RENAME TO people",
            "DROP INDEX index_people_on_full_name",
        ]
    );
}

#[test]
fn test_h2_keeps_integer_limit() {
    let mut adapter =
        HsqldbAdapter::new(RecordingConnection::new(), AdapterConfig::new(Driver::H2));
    adapter
        .add_column("users", "age", LogicalType::Integer, &ColumnOptions::new().limit(11))
        .unwrap();
    assert_eq!(adapter.connection().executed, ["ALTER TABLE users ADD age integer(11)"]);
}

#[test]
fn test_invalid_default_is_not_executed() {
    let mut adapter = adapter(RecordingConnection::new());
    let options = ColumnOptions::new().default_value("twelve");
    let err = adapter
        .add_column("t", "n", LogicalType::Integer, &options)
        .unwrap_err();
    assert!(matches!(err, HsqldbError::TypeCoercion { .. }));
    assert!(adapter.connection().executed.is_empty());
}

#[test]
fn test_tables_hide_system_tables() {
    let conn = RecordingConnection::new()
        .with_tables(&["SYSTEM_TABLES", "USERS", "system_lobs", "POSTS"]);
    let mut adapter = adapter(conn);
    assert_eq!(adapter.tables().unwrap(), ["USERS", "POSTS"]);
}

#[test]
fn test_database_lifecycle() {
    let mut adapter = adapter(RecordingConnection::new());
    adapter.create_database(Some("test")).unwrap();
    assert!(adapter.connection().executed.is_empty());

    adapter.recreate_database(None).unwrap();
    adapter.shutdown().unwrap();
    assert_eq!(
        adapter.connection().executed,
        ["DROP SCHEMA PUBLIC CASCADE", "SHUTDOWN"]
    );
}

#[test]
fn test_column_uses_configured_dialect() {
    let raw = RawColumnDescriptor::new("flag", "TINYINT(1)").declared_limit(255);

    let hsqldb = adapter(RecordingConnection::new());
    assert_eq!(hsqldb.column(&raw).limit, Some(1));

    let generic = HsqldbAdapter::new(
        RecordingConnection::new(),
        AdapterConfig::default().adapter("jdbch2"),
    );
    assert_eq!(generic.column(&raw).limit, Some(255));
}

#[test]
fn test_quote_through_adapter() {
    let adapter = adapter(RecordingConnection::new());
    let raw = RawColumnDescriptor::new("id", "INTEGER").primary_key();
    let column = adapter.column(&raw);
    assert_eq!(adapter.quote(&Value::from("9"), Some(column.hint())).unwrap(), "9");
    assert_eq!(adapter.quote_column_name("e-mail"), "\"E-MAIL\"");
    assert_eq!(
        adapter.add_limit_offset("SELECT * FROM t", None, 3),
        "SELECT LIMIT 3 0 * FROM t"
    );
}

#[test]
fn test_structure_dump_uses_script() {
    let conn = RecordingConnection::new().with_result(
        "SCRIPT",
        script_rows(&[
            "CREATE SCHEMA PUBLIC AUTHORIZATION DBA",
            "CREATE MEMORY TABLE USERS(ID INTEGER)",
            "CREATE USER SA PASSWORD DIGEST 'abc'",
            "GRANT DBA TO SA",
            "CREATE INDEX IDX ON USERS(ID)",
        ]),
    );
    let mut adapter = adapter(conn);
    let dump = adapter.structure_dump().unwrap();
    assert_eq!(
        dump,
        "CREATE MEMORY TABLE USERS(ID INTEGER)\n\nCREATE INDEX IDX ON USERS(ID)"
    );
}

#[test]
fn test_structure_dump_keeps_rows_quoting_bootstrap_text() {
    let commands = [
        "CREATE MEMORY TABLE NOTES(ID INTEGER,BODY VARCHAR(255))",
        "INSERT INTO NOTES VALUES(1,'ops: run GRANT DBA TO SA on staging')",
    ];
    let conn = RecordingConnection::new().with_result("SCRIPT", script_rows(&commands));
    let mut adapter = adapter(conn);
    assert_eq!(
        adapter.structure_dump().unwrap(),
        format!("{}\n\n{}", commands[0], commands[1])
    );
}

#[test]
fn test_structure_dump_rejects_non_text_rows() {
    let conn = RecordingConnection::new()
        .with_result("SCRIPT", vec![Row::new([("COMMAND", Value::Int(1))])]);
    let mut adapter = adapter(conn);
    assert!(matches!(
        adapter.structure_dump(),
        Err(HsqldbError::TypeCoercion { target: "text", .. })
    ));
}
