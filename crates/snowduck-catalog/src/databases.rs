use snowduck_common::{ident, SdError, SdResult};
use snowduck_engine::{Engine, Value};
use uuid::Uuid;

use crate::models::Database;
use crate::row::{int, opt_text, row_opt, text};

pub fn create_database(
    engine: &Engine,
    name: &str,
    owner: &str,
    comment: Option<&str>,
) -> SdResult<Database> {
    if name.trim().is_empty() {
        return Err(SdError::validation("database name must not be empty"));
    }
    let name = ident::normalize(name);
    let id = Uuid::new_v4().to_string();
    let created_at = snowduck_common::time::now_millis();

    engine.transaction(|txn| {
        txn.exec(
            "INSERT INTO _metadata_databases (id, name, owner, comment, account_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
            &[
                Value::text(&id),
                Value::text(&name),
                Value::text(owner),
                comment.map(Value::text).unwrap_or(Value::Null),
                Value::text(""),
                Value::Int(created_at),
            ],
        )?;
        txn.exec(&format!("CREATE SCHEMA \"{name}\""), &[])?;
        Ok(())
    })?;

    tracing::debug!(database = %name, %id, "database created");

    Ok(Database {
        id,
        name,
        owner: owner.to_string(),
        comment: comment.map(str::to_string),
        account_id: String::new(),
        created_at,
    })
}

pub fn drop_database(engine: &Engine, name: &str) -> SdResult<()> {
    let name = ident::normalize(name);
    let existing = get_database_by_name(engine, &name)?;

    engine.transaction(|txn| {
        txn.exec(
            "DELETE FROM _metadata_tables WHERE schema_id IN \
             (SELECT id FROM _metadata_schemas WHERE database_id = ?)",
            &[Value::text(&existing.id)],
        )?;
        txn.exec(
            "DELETE FROM _metadata_schemas WHERE database_id = ?",
            &[Value::text(&existing.id)],
        )?;
        txn.exec(
            "DELETE FROM _metadata_databases WHERE id = ?",
            &[Value::text(&existing.id)],
        )?;
        txn.exec(&format!("DROP SCHEMA \"{name}\" CASCADE"), &[])?;
        Ok(())
    })?;

    tracing::debug!(database = %name, id = %existing.id, "database dropped");
    Ok(())
}

pub fn get_database_by_id(engine: &Engine, id: &str) -> SdResult<Database> {
    let rows = engine.query(
        "SELECT id, name, owner, comment, account_id, created_at FROM _metadata_databases WHERE id = ?",
        &[Value::text(id)],
    )?;
    row_opt(rows, row_to_database)?.ok_or_else(|| SdError::not_found(format!("database id {id}")))
}

pub fn get_database_by_name(engine: &Engine, name: &str) -> SdResult<Database> {
    let name = ident::normalize(name);
    let rows = engine.query(
        "SELECT id, name, owner, comment, account_id, created_at FROM _metadata_databases WHERE name = ?",
        &[Value::text(&name)],
    )?;
    row_opt(rows, row_to_database)?.ok_or_else(|| SdError::not_found(format!("database {name}")))
}

pub fn list_databases(engine: &Engine) -> SdResult<Vec<Database>> {
    let rows = engine.query(
        "SELECT id, name, owner, comment, account_id, created_at FROM _metadata_databases ORDER BY name",
        &[],
    )?;
    rows.rows.into_iter().map(|r| row_to_database(&r)).collect()
}

fn row_to_database(row: &[Value]) -> SdResult<Database> {
    Ok(Database {
        id: text(row, 0)?,
        name: text(row, 1)?,
        owner: text(row, 2)?,
        comment: opt_text(row, 3),
        account_id: text(row, 4)?,
        created_at: int(row, 5)?,
    })
}
