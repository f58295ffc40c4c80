use snowduck_common::SdResult;
use snowduck_engine::{Engine, Value};
use uuid::Uuid;

use crate::models::{QueryHistoryEntry, QueryStatus};
use crate::row::{int, opt_int, opt_text, text};

pub fn record_query_start(
    engine: &Engine,
    session_id: &str,
    handle_id: &str,
    sql_text: &str,
) -> SdResult<String> {
    let id = Uuid::new_v4().to_string();
    let started_at = snowduck_common::time::now_millis();

    engine.exec(
        "INSERT INTO _metadata_query_history \
         (id, session_id, handle_id, sql_text, status, rows_affected, execution_time_ms, error, started_at, completed_at) \
         VALUES (?, ?, ?, ?, ?, 0, 0, NULL, ?, NULL)",
        &[
            Value::text(&id),
            Value::text(session_id),
            Value::text(handle_id),
            Value::text(sql_text),
            Value::text(QueryStatus::Running.as_str()),
            Value::Int(started_at),
        ],
    )?;
    Ok(id)
}

pub fn record_query_success(engine: &Engine, id: &str, rows_affected: i64, execution_time_ms: i64) -> SdResult<()> {
    let completed_at = snowduck_common::time::now_millis();
    engine.exec(
        "UPDATE _metadata_query_history SET status = ?, rows_affected = ?, execution_time_ms = ?, completed_at = ? \
         WHERE id = ?",
        &[
            Value::text(QueryStatus::Success.as_str()),
            Value::Int(rows_affected),
            Value::Int(execution_time_ms),
            Value::Int(completed_at),
            Value::text(id),
        ],
    )?;
    Ok(())
}

pub fn record_query_failure(engine: &Engine, id: &str, error: &str, execution_time_ms: i64) -> SdResult<()> {
    let completed_at = snowduck_common::time::now_millis();
    engine.exec(
        "UPDATE _metadata_query_history SET status = ?, error = ?, execution_time_ms = ?, completed_at = ? \
         WHERE id = ?",
        &[
            Value::text(QueryStatus::Failed.as_str()),
            Value::text(error),
            Value::Int(execution_time_ms),
            Value::Int(completed_at),
            Value::text(id),
        ],
    )?;
    Ok(())
}

pub fn get_query_history(engine: &Engine, limit: u32) -> SdResult<Vec<QueryHistoryEntry>> {
    let rows = engine.query(
        "SELECT id, session_id, handle_id, sql_text, status, rows_affected, execution_time_ms, error, \
         started_at, completed_at FROM _metadata_query_history ORDER BY started_at DESC LIMIT ?",
        &[Value::Int(limit as i64)],
    )?;
    rows.rows.into_iter().map(|r| row_to_entry(&r)).collect()
}

pub fn get_query_history_by_session(
    engine: &Engine,
    session_id: &str,
    limit: u32,
) -> SdResult<Vec<QueryHistoryEntry>> {
    let rows = engine.query(
        "SELECT id, session_id, handle_id, sql_text, status, rows_affected, execution_time_ms, error, \
         started_at, completed_at FROM _metadata_query_history WHERE session_id = ? \
         ORDER BY started_at DESC LIMIT ?",
        &[Value::text(session_id), Value::Int(limit as i64)],
    )?;
    rows.rows.into_iter().map(|r| row_to_entry(&r)).collect()
}

pub fn clear_query_history(engine: &Engine, older_than_ms: i64) -> SdResult<u64> {
    let result = engine.exec(
        "DELETE FROM _metadata_query_history WHERE started_at < ?",
        &[Value::Int(older_than_ms)],
    )?;
    Ok(result.rows_affected)
}

fn row_to_entry(row: &[Value]) -> SdResult<QueryHistoryEntry> {
    Ok(QueryHistoryEntry {
        id: text(row, 0)?,
        session_id: text(row, 1)?,
        handle_id: text(row, 2)?,
        sql_text: text(row, 3)?,
        status: QueryStatus::parse(&text(row, 4)?)?,
        rows_affected: int(row, 5)?,
        execution_time_ms: int(row, 6)?,
        error: opt_text(row, 7),
        started_at: int(row, 8)?,
        completed_at: opt_int(row, 9),
    })
}
