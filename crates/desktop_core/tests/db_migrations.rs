use desktop_core::db::{latest_version, open_db, open_db_in_memory, schema_version, DbError};
use rusqlite::Connection;

#[test]
fn in_memory_database_reaches_latest_schema() {
    let conn = open_db_in_memory().expect("open in-memory db");

    assert_eq!(schema_version(&conn).expect("read version"), latest_version());
    assert!(table_exists(&conn, "window_layouts"));
}

#[test]
fn reopening_file_database_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.sqlite3");

    let first = open_db(&path).expect("first open");
    first
        .execute(
            "INSERT INTO window_layouts (app_id, window_key, x, y, width, height, maximized, updated_at)
             VALUES ('org.necloud.notes', 'default', 1, 2, 300, 200, 0, 0);",
            [],
        )
        .expect("insert layout row");
    drop(first);

    let second = open_db(&path).expect("second open");
    assert_eq!(schema_version(&second).expect("read version"), latest_version());
    let rows: i64 = second
        .query_row("SELECT COUNT(*) FROM window_layouts;", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(rows, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).expect("raw open");
    conn.execute_batch("PRAGMA user_version = 999;")
        .expect("set version");
    drop(conn);

    let err = open_db(&path).expect_err("future schema must fail");
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion {
            db_version: 999,
            latest_supported,
        } if latest_supported == latest_version()
    ));
}

#[test]
fn current_file_without_layout_table_fails_to_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("damaged.sqlite3");

    let conn = open_db(&path).expect("first open");
    conn.execute_batch("DROP TABLE window_layouts;")
        .expect("drop table");
    drop(conn);

    let err = open_db(&path).expect_err("missing table must fail");
    assert!(matches!(err, DbError::MissingTable("window_layouts")));
}

#[test]
fn maximized_flag_is_constrained() {
    let conn = open_db_in_memory().expect("open in-memory db");
    let result = conn.execute(
        "INSERT INTO window_layouts (app_id, window_key, x, y, width, height, maximized, updated_at)
         VALUES ('org.necloud.notes', 'default', 0, 0, 10, 10, 2, 0);",
        [],
    );
    assert!(result.is_err());
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table_name],
        |row| row.get::<_, i64>(0),
    )
    .expect("query sqlite_master")
        == 1
}
