use snowduck_common::{ident, SdError, SdResult};
use snowduck_engine::{Engine, Value};
use uuid::Uuid;

use crate::columns::{deserialize_columns, serialize_columns};
use crate::databases::get_database_by_name;
use crate::models::{ColumnDef, Table, TableType};
use crate::row::{int, opt_text, row_opt, text};
use crate::schemas::get_schema_by_name;

/// Creates the physical engine table and its `_metadata_tables` row in one
/// transaction. `columns` must already carry engine-dialect types; type
/// translation happens one layer up, before the catalog ever sees them.
pub fn create_table(
    engine: &Engine,
    database: &str,
    schema: &str,
    name: &str,
    owner: &str,
    table_type: TableType,
    columns: Vec<ColumnDef>,
    clustering_key: Option<&str>,
) -> SdResult<Table> {
    if name.trim().is_empty() {
        return Err(SdError::validation("table name must not be empty"));
    }
    if columns.is_empty() {
        return Err(SdError::validation(
            "table must have at least one column",
        ));
    }

    let db = get_database_by_name(engine, database)?;
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let name = ident::normalize(name);
    let id = Uuid::new_v4().to_string();
    let created_at = snowduck_common::time::now_millis();
    let columns_raw = serialize_columns(&columns);
    let physical_name = physical_table_name(&db.name, &schema_row.name, &name);
    let column_ddl = column_definitions_ddl(&columns);

    engine.transaction(|txn| {
        txn.exec(
            "INSERT INTO _metadata_tables \
             (id, schema_id, name, owner, comment, table_type, columns, clustering_key, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            &[
                Value::text(&id),
                Value::text(&schema_row.id),
                Value::text(&name),
                Value::text(owner),
                Value::Null,
                Value::text(table_type.as_str()),
                Value::text(&columns_raw),
                clustering_key.map(Value::text).unwrap_or(Value::Null),
                Value::Int(created_at),
            ],
        )?;
        txn.exec(
            &format!("CREATE TABLE {physical_name} ({column_ddl})"),
            &[],
        )?;
        Ok(())
    })?;

    tracing::debug!(database, schema, table = %name, %id, "table created");

    Ok(Table {
        id,
        schema_id: schema_row.id,
        name,
        owner: owner.to_string(),
        comment: None,
        table_type,
        columns,
        clustering_key: clustering_key.map(str::to_string),
        created_at,
    })
}

pub fn drop_table(engine: &Engine, database: &str, schema: &str, name: &str) -> SdResult<()> {
    let db = get_database_by_name(engine, database)?;
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let table = get_table_by_name(engine, database, schema, name)?;
    let physical_name = physical_table_name(&db.name, &schema_row.name, &table.name);

    engine.transaction(|txn| {
        txn.exec("DELETE FROM _metadata_tables WHERE id = ?", &[Value::text(&table.id)])?;
        txn.exec(&format!("DROP TABLE {physical_name}"), &[])?;
        Ok(())
    })?;

    tracing::debug!(database, schema, table = name, id = %table.id, "table dropped");
    Ok(())
}

pub fn get_table_by_id(engine: &Engine, id: &str) -> SdResult<Table> {
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, comment, table_type, columns, clustering_key, created_at \
         FROM _metadata_tables WHERE id = ?",
        &[Value::text(id)],
    )?;
    row_opt(rows, row_to_table)?.ok_or_else(|| SdError::not_found(format!("table id {id}")))
}

pub fn get_table_by_name(engine: &Engine, database: &str, schema: &str, name: &str) -> SdResult<Table> {
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let name = ident::normalize(name);
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, comment, table_type, columns, clustering_key, created_at \
         FROM _metadata_tables WHERE schema_id = ? AND name = ?",
        &[Value::text(&schema_row.id), Value::text(&name)],
    )?;
    row_opt(rows, row_to_table)?
        .ok_or_else(|| SdError::not_found(format!("table {database}.{schema}.{name}")))
}

pub fn list_tables(engine: &Engine, database: &str, schema: &str) -> SdResult<Vec<Table>> {
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, comment, table_type, columns, clustering_key, created_at \
         FROM _metadata_tables WHERE schema_id = ? ORDER BY name",
        &[Value::text(&schema_row.id)],
    )?;
    rows.rows.into_iter().map(|r| row_to_table(&r)).collect()
}

pub fn update_table_comment(
    engine: &Engine,
    database: &str,
    schema: &str,
    name: &str,
    comment: Option<&str>,
) -> SdResult<()> {
    let table = get_table_by_name(engine, database, schema, name)?;
    engine.exec(
        "UPDATE _metadata_tables SET comment = ? WHERE id = ?",
        &[comment.map(Value::text).unwrap_or(Value::Null), Value::text(&table.id)],
    )?;
    Ok(())
}

/// The `DB.SCHEMA_TABLE` engine identifier for a logical table, quoted as
/// two separately-quoted identifiers since the mangled `SCHEMA_TABLE` half
/// is one opaque engine identifier, not a further-nested qualifier.
pub fn physical_table_name(database: &str, schema: &str, table: &str) -> String {
    format!(
        "\"{}\".\"{}\"",
        ident::normalize(database),
        ident::mangle_table_name(schema, table)
    )
}

fn column_definitions_ddl(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|c| {
            let mut parts = vec![format!("\"{}\" {}", c.name, c.data_type)];
            if !c.nullable {
                parts.push("NOT NULL".to_string());
            }
            if c.primary_key {
                parts.push("PRIMARY KEY".to_string());
            }
            if let Some(default) = &c.default {
                parts.push(format!("DEFAULT {default}"));
            }
            parts.join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_table(row: &[Value]) -> SdResult<Table> {
    Ok(Table {
        id: text(row, 0)?,
        schema_id: text(row, 1)?,
        name: text(row, 2)?,
        owner: text(row, 3)?,
        comment: opt_text(row, 4),
        table_type: TableType::parse(&text(row, 5)?)?,
        columns: deserialize_columns(&text(row, 6)?)?,
        clustering_key: opt_text(row, 7),
        created_at: int(row, 8)?,
    })
}
