//! Idempotent creation of the `_metadata_*` tables the catalog is backed by.

use snowduck_common::SdResult;
use snowduck_engine::Engine;

const DDL: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS _metadata_databases (
        id VARCHAR PRIMARY KEY,
        name VARCHAR NOT NULL,
        owner VARCHAR NOT NULL,
        comment VARCHAR,
        account_id VARCHAR NOT NULL,
        created_at BIGINT NOT NULL,
        UNIQUE(name)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS _metadata_schemas (
        id VARCHAR PRIMARY KEY,
        database_id VARCHAR NOT NULL,
        name VARCHAR NOT NULL,
        owner VARCHAR NOT NULL,
        comment VARCHAR,
        created_at BIGINT NOT NULL,
        UNIQUE(database_id, name)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS _metadata_tables (
        id VARCHAR PRIMARY KEY,
        schema_id VARCHAR NOT NULL,
        name VARCHAR NOT NULL,
        owner VARCHAR NOT NULL,
        comment VARCHAR,
        table_type VARCHAR NOT NULL,
        columns VARCHAR NOT NULL,
        clustering_key VARCHAR,
        created_at BIGINT NOT NULL,
        UNIQUE(schema_id, name)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS _metadata_stages (
        id VARCHAR PRIMARY KEY,
        schema_id VARCHAR NOT NULL,
        name VARCHAR NOT NULL,
        owner VARCHAR NOT NULL,
        stage_type VARCHAR NOT NULL,
        url VARCHAR,
        created_at BIGINT NOT NULL,
        UNIQUE(schema_id, name)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS _metadata_fileformats (
        id VARCHAR PRIMARY KEY,
        schema_id VARCHAR NOT NULL,
        name VARCHAR NOT NULL,
        owner VARCHAR NOT NULL,
        format_type VARCHAR NOT NULL,
        options VARCHAR NOT NULL,
        created_at BIGINT NOT NULL,
        UNIQUE(schema_id, name)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS _metadata_query_history (
        id VARCHAR PRIMARY KEY,
        session_id VARCHAR NOT NULL,
        handle_id VARCHAR NOT NULL,
        sql_text VARCHAR NOT NULL,
        status VARCHAR NOT NULL,
        rows_affected BIGINT NOT NULL,
        execution_time_ms BIGINT NOT NULL,
        error VARCHAR,
        started_at BIGINT NOT NULL,
        completed_at BIGINT
    )"#,
];

pub fn init_metadata_tables(engine: &Engine) -> SdResult<()> {
    let conn = engine.raw_write();
    for stmt in DDL {
        conn.execute_batch(stmt)
            .map_err(|e| snowduck_common::translate_engine_error("init metadata tables", e.to_string()))?;
    }
    Ok(())
}
