//! The query executor (L4): orchestrates translation, bind validation,
//! dispatch through the connection manager, history recording, and
//! result shaping for every statement the session layer hands it.

mod classify;
mod ddl;
mod executor;
mod shape;

pub use classify::{classify, StatementKind};
pub use executor::{execute, ExecContext, Outcome};
pub use shape::{cell_to_json, shape_rowset, ColumnMeta, ShapedResult};

#[cfg(test)]
mod tests {
    use super::*;
    use snowduck_catalog::Catalog;
    use snowduck_common::EmulatorConfig;
    use snowduck_engine::{Engine, Value};
    use std::sync::Arc;

    fn test_catalog() -> Catalog {
        let engine = Arc::new(Engine::open(&EmulatorConfig::default()).unwrap());
        Catalog::new(engine).unwrap()
    }

    fn ctx() -> ExecContext {
        ExecContext {
            session_id: "s1".to_string(),
            database: "TEST_DB".to_string(),
            schema: "PUBLIC".to_string(),
        }
    }

    #[test]
    fn select_literal_round_trips_through_shaping() {
        let catalog = test_catalog();
        let outcome = execute(&catalog, &ctx(), "h1", "SELECT 1 AS n", &[]).unwrap();
        let shaped = outcome.shaped.unwrap();
        assert_eq!(shaped.columns[0].name, "N");
        assert_eq!(shaped.rows[0][0], serde_json::Value::String("1".to_string()));
    }

    #[test]
    fn create_insert_select_round_trip_through_mangled_physical_name() {
        let catalog = test_catalog();
        execute(&catalog, &ctx(), "h1", "CREATE DATABASE TEST_DB", &[]).unwrap();
        execute(&catalog, &ctx(), "h2", "CREATE SCHEMA TEST_DB.PUBLIC", &[]).unwrap();
        execute(
            &catalog,
            &ctx(),
            "h3",
            "CREATE TABLE TEST_DB.PUBLIC.USERS (ID INTEGER PRIMARY KEY, NAME VARCHAR)",
            &[],
        )
        .unwrap();
        execute(
            &catalog,
            &ctx(),
            "h4",
            "INSERT INTO \"TEST_DB\".\"PUBLIC_USERS\" VALUES (1, 'Alice'), (2, 'Bob')",
            &[],
        )
        .unwrap();

        let outcome = execute(
            &catalog,
            &ctx(),
            "h5",
            "SELECT id, name FROM \"TEST_DB\".\"PUBLIC_USERS\" ORDER BY id",
            &[],
        )
        .unwrap();
        let shaped = outcome.shaped.unwrap();
        assert_eq!(shaped.rows.len(), 2);
        assert_eq!(shaped.rows[0][1], serde_json::Value::String("Alice".to_string()));

        let tables = catalog.list_tables("TEST_DB", "PUBLIC").unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "USERS");
    }

    #[test]
    fn function_translation_matches_expected_output() {
        let catalog = test_catalog();
        let outcome = execute(&catalog, &ctx(), "h1", "SELECT IFF(1=1,'yes','no')", &[]).unwrap();
        assert_eq!(
            outcome.shaped.unwrap().rows[0][0],
            serde_json::Value::String("yes".to_string())
        );

        let outcome = execute(&catalog, &ctx(), "h2", "SELECT NVL(NULL,'d')", &[]).unwrap();
        assert_eq!(
            outcome.shaped.unwrap().rows[0][0],
            serde_json::Value::String("d".to_string())
        );

        let outcome = execute(
            &catalog,
            &ctx(),
            "h3",
            "SELECT DATEDIFF(day,'2024-01-01','2024-01-10')",
            &[],
        )
        .unwrap();
        assert_eq!(
            outcome.shaped.unwrap().rows[0][0],
            serde_json::Value::String("9".to_string())
        );
    }

    #[test]
    fn merge_applies_update_and_insert_branches() {
        let catalog = test_catalog();
        execute(&catalog, &ctx(), "h1", "CREATE DATABASE TEST_DB", &[]).unwrap();
        execute(&catalog, &ctx(), "h2", "CREATE SCHEMA TEST_DB.PUBLIC", &[]).unwrap();
        execute(
            &catalog,
            &ctx(),
            "h3",
            "CREATE TABLE TEST_DB.PUBLIC.TARGET (ID INTEGER PRIMARY KEY, NAME VARCHAR, AMOUNT INTEGER)",
            &[],
        )
        .unwrap();
        execute(
            &catalog,
            &ctx(),
            "h4",
            "CREATE TABLE TEST_DB.PUBLIC.SOURCE (ID INTEGER PRIMARY KEY, NAME VARCHAR, AMOUNT INTEGER)",
            &[],
        )
        .unwrap();
        execute(
            &catalog,
            &ctx(),
            "h5",
            "INSERT INTO \"TEST_DB\".\"PUBLIC_TARGET\" VALUES (1, 'Alice', 100), (2, 'Bob', 200)",
            &[],
        )
        .unwrap();
        execute(
            &catalog,
            &ctx(),
            "h6",
            "INSERT INTO \"TEST_DB\".\"PUBLIC_SOURCE\" VALUES (2, 'Bob Updated', 250), (3, 'Charlie', 300)",
            &[],
        )
        .unwrap();

        execute(
            &catalog,
            &ctx(),
            "h7",
            "MERGE INTO \"TEST_DB\".\"PUBLIC_TARGET\" t USING \"TEST_DB\".\"PUBLIC_SOURCE\" s ON t.id = s.id \
             WHEN MATCHED THEN UPDATE SET t.name = s.name, t.amount = s.amount \
             WHEN NOT MATCHED THEN INSERT (id, name, amount) VALUES (s.id, s.name, s.amount)",
            &[],
        )
        .unwrap();

        let outcome = execute(
            &catalog,
            &ctx(),
            "h8",
            "SELECT id, name, amount FROM \"TEST_DB\".\"PUBLIC_TARGET\" ORDER BY id",
            &[],
        )
        .unwrap();
        let rows = outcome.shaped.unwrap().rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][1], serde_json::Value::String("Bob Updated".to_string()));
        assert_eq!(rows[2][1], serde_json::Value::String("Charlie".to_string()));
    }

    #[test]
    fn use_database_reports_the_cursor_update_without_touching_the_engine() {
        let catalog = test_catalog();
        let outcome = execute(&catalog, &ctx(), "h1", "USE DATABASE OTHER_DB", &[]).unwrap();
        assert_eq!(outcome.new_database.as_deref(), Some("OTHER_DB"));
    }

    #[test]
    fn failed_statements_are_recorded_in_history_as_failed() {
        let catalog = test_catalog();
        let _ = execute(&catalog, &ctx(), "h1", "SELECT * FROM NO_SUCH_TABLE", &[]);
        let history = catalog.get_query_history(10).unwrap();
        assert_eq!(history[0].status, snowduck_catalog::QueryStatus::Failed);
    }

    #[test]
    fn parameters_are_bound_not_concatenated() {
        let catalog = test_catalog();
        let outcome = execute(&catalog, &ctx(), "h1", "SELECT ? AS echoed", &[Value::text("hi")]).unwrap();
        assert_eq!(
            outcome.shaped.unwrap().rows[0][0],
            serde_json::Value::String("hi".to_string())
        );
    }
}
