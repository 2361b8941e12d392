use rusqlite::{params, Connection, ErrorCode};
use userdao_core::db::migrations::{apply_migrations, latest_version};
use userdao_core::db::{open_db, open_db_in_memory, DbError};
use userdao_core::DataSource;

fn stored_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn users_columns(conn: &Connection) -> Vec<(String, bool)> {
    conn.prepare("SELECT name, pk FROM pragma_table_info('users') ORDER BY cid;")
        .unwrap()
        .query_map([], |row| Ok((row.get(0)?, row.get::<_, i64>(1)? > 0)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn insert_counts(conn: &Connection, id: &str, login: i64, recommend: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO users (id, name, password, email, level, login, recommend)
         VALUES (?1, 'n', 'p', 'e@x.org', 1, ?2, ?3);",
        params![id, login, recommend],
    )
}

#[test]
fn fresh_store_has_the_users_layout() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(stored_version(&conn), latest_version());
    let columns = users_columns(&conn);
    let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        ["id", "name", "password", "email", "level", "login", "recommend"]
    );
    let keys: Vec<&str> = columns
        .iter()
        .filter(|(_, pk)| *pk)
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(keys, ["id"]);
}

#[test]
fn negative_counters_are_rejected_by_the_schema() {
    let conn = open_db_in_memory().unwrap();

    insert_counts(&conn, "zero", 0, 0).unwrap();
    for (id, login, recommend) in [("neg_login", -1, 0), ("neg_recommend", 0, -5)] {
        let err = insert_counts(&conn, id, login, recommend).unwrap_err();
        assert_eq!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation));
    }
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn reopening_a_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");

    {
        let conn = open_db(&path).unwrap();
        insert_counts(&conn, "kept", 3, 2).unwrap();
    }

    let mut conn = open_db(&path).unwrap();
    apply_migrations(&mut conn).unwrap();
    assert_eq!(stored_version(&conn), latest_version());
    let login: i64 = conn
        .query_row("SELECT login FROM users WHERE id = 'kept';", [], |row| row.get(0))
        .unwrap();
    assert_eq!(login, 3);
}

#[test]
fn store_stamped_by_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let ahead = latest_version() + 7;

    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", ahead)
        .unwrap();

    let Err(err) = DataSource::open(&path) else {
        panic!("a newer schema must not open");
    };
    assert!(matches!(
        err,
        DbError::UnsupportedSchemaVersion { db_version, latest_supported }
            if db_version == ahead && latest_supported == latest_version()
    ));
}

#[test]
fn data_source_reports_sqlite_product() {
    let ds = DataSource::in_memory().unwrap();
    assert_eq!(ds.database_product_name(), "SQLite");
    assert_eq!(stored_version(&ds.connection()), latest_version());
}
