use std::sync::Arc;
use std::thread;

use snowduck_catalog::{ColumnDef, TableType};
use snowduck_common::EmulatorConfig;
use snowduck_emulator::Emulator;

fn emulator() -> Emulator {
    Emulator::open(EmulatorConfig::default()).unwrap()
}

/// (S1) Login + SELECT + logout.
#[test]
fn login_select_then_logout_revokes_the_token() {
    let emu = emulator();
    let session = emu.login("u", "p", "TEST_DB", "PUBLIC").unwrap();

    let outcome = emu.query(&session.access_token, "SELECT 1 AS n").unwrap();
    let shaped = outcome.shaped.unwrap();
    assert_eq!(shaped.columns[0].name, "N");
    assert_eq!(shaped.columns[0].type_tag, "FIXED");
    assert_eq!(shaped.rows, vec![vec![serde_json::Value::String("1".to_string())]]);

    emu.sessions().logout(&session.access_token).unwrap();
    let err = emu.query(&session.access_token, "SELECT 1 AS n").unwrap_err();
    assert_eq!(err.kind(), snowduck_common::ErrorKind::AuthenticationError);
}

/// (S2) CREATE/INSERT/SELECT round trip.
#[test]
fn create_insert_select_round_trip_materializes_the_mangled_name() {
    let emu = emulator();
    let session = emu.login("u", "p", "TEST_DB", "PUBLIC").unwrap();

    for sql in [
        "CREATE DATABASE TEST_DB",
        "CREATE SCHEMA TEST_DB.PUBLIC",
        "CREATE TABLE TEST_DB.PUBLIC.USERS (ID INTEGER PRIMARY KEY, NAME VARCHAR)",
        "INSERT INTO \"TEST_DB\".\"PUBLIC_USERS\" VALUES (1, 'Alice'), (2, 'Bob')",
    ] {
        emu.query(&session.access_token, sql).unwrap();
    }

    let outcome = emu
        .query(
            &session.access_token,
            "SELECT id, name FROM \"TEST_DB\".\"PUBLIC_USERS\" ORDER BY id",
        )
        .unwrap();
    let rows = outcome.shaped.unwrap().rows;
    assert_eq!(
        rows,
        vec![
            vec![serde_json::Value::String("1".to_string()), serde_json::Value::String("Alice".to_string())],
            vec![serde_json::Value::String("2".to_string()), serde_json::Value::String("Bob".to_string())],
        ]
    );

    let tables = emu.catalog().list_tables("TEST_DB", "PUBLIC").unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "USERS");
}

/// (S3) MERGE correctness.
#[test]
fn merge_matched_updates_and_not_matched_inserts() {
    let emu = emulator();
    let session = emu.login("u", "p", "TEST_DB", "PUBLIC").unwrap();

    for sql in [
        "CREATE DATABASE TEST_DB",
        "CREATE SCHEMA TEST_DB.PUBLIC",
        "CREATE TABLE TEST_DB.PUBLIC.TARGET (ID INTEGER PRIMARY KEY, NAME VARCHAR, AMOUNT INTEGER)",
        "CREATE TABLE TEST_DB.PUBLIC.SOURCE (ID INTEGER PRIMARY KEY, NAME VARCHAR, AMOUNT INTEGER)",
        "INSERT INTO \"TEST_DB\".\"PUBLIC_TARGET\" VALUES (1, 'Alice', 100), (2, 'Bob', 200)",
        "INSERT INTO \"TEST_DB\".\"PUBLIC_SOURCE\" VALUES (2, 'Bob Updated', 250), (3, 'Charlie', 300)",
    ] {
        emu.query(&session.access_token, sql).unwrap();
    }

    emu.query(
        &session.access_token,
        "MERGE INTO \"TEST_DB\".\"PUBLIC_TARGET\" t USING \"TEST_DB\".\"PUBLIC_SOURCE\" s ON t.id = s.id \
         WHEN MATCHED THEN UPDATE SET t.name = s.name, t.amount = s.amount \
         WHEN NOT MATCHED THEN INSERT (id, name, amount) VALUES (s.id, s.name, s.amount)",
    )
    .unwrap();

    let outcome = emu
        .query(
            &session.access_token,
            "SELECT id, name, amount FROM \"TEST_DB\".\"PUBLIC_TARGET\" ORDER BY id",
        )
        .unwrap();
    let rows = outcome.shaped.unwrap().rows;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][1], serde_json::Value::String("Alice".to_string()));
    assert_eq!(rows[1][1], serde_json::Value::String("Bob Updated".to_string()));
    assert_eq!(rows[2][1], serde_json::Value::String("Charlie".to_string()));
}

/// (S4) Function translation.
#[test]
fn dialect_functions_translate_to_engine_equivalents() {
    let emu = emulator();
    let session = emu.login("u", "p", "TEST_DB", "PUBLIC").unwrap();

    let outcome = emu.query(&session.access_token, "SELECT IFF(1=1,'yes','no')").unwrap();
    assert_eq!(
        outcome.shaped.unwrap().rows[0][0],
        serde_json::Value::String("yes".to_string())
    );

    let outcome = emu.query(&session.access_token, "SELECT NVL(NULL,'d')").unwrap();
    assert_eq!(
        outcome.shaped.unwrap().rows[0][0],
        serde_json::Value::String("d".to_string())
    );

    let outcome = emu
        .query(&session.access_token, "SELECT DATEDIFF(day,'2024-01-01','2024-01-10')")
        .unwrap();
    assert_eq!(
        outcome.shaped.unwrap().rows[0][0],
        serde_json::Value::String("9".to_string())
    );

    for sql in [
        "CREATE DATABASE TEST_DB",
        "CREATE SCHEMA TEST_DB.PUBLIC",
        "CREATE TABLE TEST_DB.PUBLIC.NAMES (NAME VARCHAR)",
        "INSERT INTO \"TEST_DB\".\"PUBLIC_NAMES\" VALUES ('Alice'), ('Bob'), ('Charlie')",
    ] {
        emu.query(&session.access_token, sql).unwrap();
    }
    let outcome = emu
        .query(
            &session.access_token,
            "SELECT LISTAGG(name, ', ') FROM \"TEST_DB\".\"PUBLIC_NAMES\"",
        )
        .unwrap();
    let agg = match &outcome.shaped.unwrap().rows[0][0] {
        serde_json::Value::String(s) => s.clone(),
        other => panic!("expected string, got {other:?}"),
    };
    assert!(agg.contains("Alice"));
    assert!(agg.contains("Bob"));
    assert!(agg.contains("Charlie"));
}

/// (S5) Database isolation.
#[test]
fn distinct_databases_never_see_each_others_rows() {
    let emu = emulator();
    let session = emu.login("u", "p", "DB1", "PUBLIC").unwrap();

    for sql in [
        "CREATE DATABASE DB1",
        "CREATE SCHEMA DB1.PUBLIC",
        "CREATE TABLE DB1.PUBLIC.DATA (ID INTEGER PRIMARY KEY, VAL VARCHAR)",
        "INSERT INTO \"DB1\".\"PUBLIC_DATA\" VALUES (1, 'from-db1')",
        "CREATE DATABASE DB2",
        "CREATE SCHEMA DB2.PUBLIC",
        "CREATE TABLE DB2.PUBLIC.DATA (ID INTEGER PRIMARY KEY, VAL VARCHAR)",
        "INSERT INTO \"DB2\".\"PUBLIC_DATA\" VALUES (1, 'from-db2')",
    ] {
        emu.query(&session.access_token, sql).unwrap();
    }

    let db1_rows = emu
        .query(&session.access_token, "SELECT val FROM \"DB1\".\"PUBLIC_DATA\"")
        .unwrap()
        .shaped
        .unwrap()
        .rows;
    let db2_rows = emu
        .query(&session.access_token, "SELECT val FROM \"DB2\".\"PUBLIC_DATA\"")
        .unwrap()
        .shaped
        .unwrap()
        .rows;
    assert_eq!(db1_rows, vec![vec![serde_json::Value::String("from-db1".to_string())]]);
    assert_eq!(db2_rows, vec![vec![serde_json::Value::String("from-db2".to_string())]]);
}

/// (S6) Concurrent writes serialize.
#[test]
fn concurrent_warehouse_creates_and_engine_writes_all_commit() {
    let emu = Arc::new(emulator());
    let session = emu.login("u", "p", "TEST_DB", "PUBLIC").unwrap();
    for sql in [
        "CREATE DATABASE TEST_DB",
        "CREATE SCHEMA TEST_DB.PUBLIC",
        "CREATE TABLE TEST_DB.PUBLIC.COUNTER (ID INTEGER PRIMARY KEY)",
    ] {
        emu.query(&session.access_token, sql).unwrap();
    }

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let emu = Arc::clone(&emu);
            thread::spawn(move || {
                emu.catalog()
                    .warehouses
                    .create(&format!("WH{i}"), snowduck_catalog::WarehouseSize::XSmall, true, None)
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(emu.catalog().warehouses.list().len(), 10);

    let access_token = session.access_token.clone();
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let emu = Arc::clone(&emu);
            let access_token = access_token.clone();
            thread::spawn(move || {
                emu.query(&access_token, &format!("INSERT INTO \"TEST_DB\".\"PUBLIC_COUNTER\" VALUES ({i})"))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let rows = emu
        .query(&session.access_token, "SELECT COUNT(*) FROM \"TEST_DB\".\"PUBLIC_COUNTER\"")
        .unwrap()
        .shaped
        .unwrap()
        .rows;
    assert_eq!(rows[0][0], serde_json::Value::String("10".to_string()));
}

/// Boundary behaviors from the testable-properties list.
#[test]
fn create_database_with_empty_name_is_validation_failed() {
    let emu = emulator();
    let err = emu.catalog().create_database("", "u", None).unwrap_err();
    assert_eq!(err.kind(), snowduck_common::ErrorKind::ValidationFailed);
}

#[test]
fn create_table_with_zero_columns_is_validation_failed() {
    let emu = emulator();
    emu.catalog().create_database("TEST_DB", "u", None).unwrap();
    emu.catalog().create_schema("TEST_DB", "PUBLIC", "u", None).unwrap();
    let err = emu
        .catalog()
        .create_table("TEST_DB", "PUBLIC", "EMPTY", "u", TableType::BaseTable, vec![], None)
        .unwrap_err();
    assert_eq!(err.kind(), snowduck_common::ErrorKind::ValidationFailed);
}

#[test]
fn create_table_materializes_exactly_one_mangled_engine_entity() {
    let emu = emulator();
    emu.catalog().create_database("TEST_DB", "u", None).unwrap();
    emu.catalog().create_schema("TEST_DB", "PUBLIC", "u", None).unwrap();
    emu.catalog()
        .create_table(
            "TEST_DB",
            "PUBLIC",
            "USERS",
            "u",
            TableType::BaseTable,
            vec![ColumnDef {
                name: "ID".into(),
                data_type: "INTEGER".into(),
                nullable: false,
                primary_key: true,
                default: None,
            }],
            None,
        )
        .unwrap();

    let tables = emu.catalog().list_tables("TEST_DB", "PUBLIC").unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "USERS");
    assert!(emu
        .catalog()
        .engine()
        .query("SELECT * FROM \"TEST_DB\".\"PUBLIC_USERS\"", &[])
        .is_ok());
}

/// `createdOn` millisecond check: a statement's history timestamps fall
/// within [now_before, now_after] and are in the 13-digit millisecond range.
#[test]
fn history_timestamps_are_millisecond_resolution_and_bounded() {
    let emu = emulator();
    let session = emu.login("u", "p", "TEST_DB", "PUBLIC").unwrap();

    let before = snowduck_common::time::now_millis();
    let handle_id = emu
        .submit_statement(&session.access_token, "SELECT 1", &[], None, None)
        .unwrap();
    let after = snowduck_common::time::now_millis();
    assert_eq!(emu.statement_status(&handle_id).unwrap(), snowduck_session::StatementStatus::Succeeded);

    let history = emu.catalog().get_query_history(1).unwrap();
    let started_at = history[0].started_at;
    assert!(started_at >= before && started_at <= after);
    assert!(started_at > 10i64.pow(12));
}
