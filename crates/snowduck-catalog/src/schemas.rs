use snowduck_common::{ident, SdError, SdResult};
use snowduck_engine::{Engine, Value};
use uuid::Uuid;

use crate::databases::get_database_by_name;
use crate::models::Schema;
use crate::row::{int, opt_text, row_opt, text};

pub fn create_schema(
    engine: &Engine,
    database: &str,
    name: &str,
    owner: &str,
    comment: Option<&str>,
) -> SdResult<Schema> {
    if name.trim().is_empty() {
        return Err(SdError::validation("schema name must not be empty"));
    }
    let db = get_database_by_name(engine, database)?;
    let name = ident::normalize(name);
    let id = Uuid::new_v4().to_string();
    let created_at = snowduck_common::time::now_millis();

    engine.exec(
        "INSERT INTO _metadata_schemas (id, database_id, name, owner, comment, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
        &[
            Value::text(&id),
            Value::text(&db.id),
            Value::text(&name),
            Value::text(owner),
            comment.map(Value::text).unwrap_or(Value::Null),
            Value::Int(created_at),
        ],
    )?;

    tracing::debug!(database, schema = %name, %id, "schema created");

    Ok(Schema {
        id,
        database_id: db.id,
        name,
        owner: owner.to_string(),
        comment: comment.map(str::to_string),
        created_at,
    })
}

/// Deletes every table metadata row under the schema, then the schema row
/// itself. Mirrors the source behavior documented as an open question: the
/// engine-side `DB.SCHEMA_TABLE` entities are not individually dropped here
/// (they are reclaimed only when the parent database's engine schema is
/// dropped) and are orphaned, reachable again only if a same-named schema
/// is recreated under the same database. See DESIGN.md for why this
/// orphaning is kept rather than fixed.
pub fn drop_schema(engine: &Engine, database: &str, name: &str) -> SdResult<()> {
    let schema = get_schema_by_name(engine, database, name)?;

    engine.transaction(|txn| {
        txn.exec(
            "DELETE FROM _metadata_tables WHERE schema_id = ?",
            &[Value::text(&schema.id)],
        )?;
        txn.exec("DELETE FROM _metadata_schemas WHERE id = ?", &[Value::text(&schema.id)])?;
        Ok(())
    })?;

    tracing::debug!(database, schema = name, id = %schema.id, "schema dropped");
    Ok(())
}

pub fn get_schema_by_id(engine: &Engine, id: &str) -> SdResult<Schema> {
    let rows = engine.query(
        "SELECT id, database_id, name, owner, comment, created_at FROM _metadata_schemas WHERE id = ?",
        &[Value::text(id)],
    )?;
    row_opt(rows, row_to_schema)?.ok_or_else(|| SdError::not_found(format!("schema id {id}")))
}

pub fn get_schema_by_name(engine: &Engine, database: &str, name: &str) -> SdResult<Schema> {
    let db = get_database_by_name(engine, database)?;
    let name = ident::normalize(name);
    let rows = engine.query(
        "SELECT id, database_id, name, owner, comment, created_at FROM _metadata_schemas \
         WHERE database_id = ? AND name = ?",
        &[Value::text(&db.id), Value::text(&name)],
    )?;
    row_opt(rows, row_to_schema)?
        .ok_or_else(|| SdError::not_found(format!("schema {database}.{name}")))
}

pub fn list_schemas(engine: &Engine, database: &str) -> SdResult<Vec<Schema>> {
    let db = get_database_by_name(engine, database)?;
    let rows = engine.query(
        "SELECT id, database_id, name, owner, comment, created_at FROM _metadata_schemas \
         WHERE database_id = ? ORDER BY name",
        &[Value::text(&db.id)],
    )?;
    rows.rows.into_iter().map(|r| row_to_schema(&r)).collect()
}

fn row_to_schema(row: &[Value]) -> SdResult<Schema> {
    Ok(Schema {
        id: text(row, 0)?,
        database_id: text(row, 1)?,
        name: text(row, 2)?,
        owner: text(row, 3)?,
        comment: opt_text(row, 4),
        created_at: int(row, 5)?,
    })
}
