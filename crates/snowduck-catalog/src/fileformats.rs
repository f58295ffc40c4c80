use snowduck_common::{ident, SdError, SdResult};
use snowduck_engine::{Engine, Value};
use uuid::Uuid;

use crate::models::{FileFormat, FileFormatType};
use crate::row::{int, row_opt, text};
use crate::schemas::get_schema_by_name;

pub fn create_file_format(
    engine: &Engine,
    database: &str,
    schema: &str,
    name: &str,
    owner: &str,
    format_type: FileFormatType,
    options: &str,
) -> SdResult<FileFormat> {
    if name.trim().is_empty() {
        return Err(SdError::validation("file format name must not be empty"));
    }
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let name = ident::normalize(name);
    let id = Uuid::new_v4().to_string();
    let created_at = snowduck_common::time::now_millis();

    engine.exec(
        "INSERT INTO _metadata_fileformats (id, schema_id, name, owner, format_type, options, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        &[
            Value::text(&id),
            Value::text(&schema_row.id),
            Value::text(&name),
            Value::text(owner),
            Value::text(format_type.as_str()),
            Value::text(options),
            Value::Int(created_at),
        ],
    )?;

    tracing::debug!(database, schema, file_format = %name, %id, "file format created");

    Ok(FileFormat {
        id,
        schema_id: schema_row.id,
        name,
        owner: owner.to_string(),
        format_type,
        options: options.to_string(),
        created_at,
    })
}

pub fn drop_file_format(engine: &Engine, database: &str, schema: &str, name: &str) -> SdResult<()> {
    let ff = get_file_format_by_name(engine, database, schema, name)?;
    engine.exec("DELETE FROM _metadata_fileformats WHERE id = ?", &[Value::text(&ff.id)])?;
    tracing::debug!(database, schema, file_format = name, id = %ff.id, "file format dropped");
    Ok(())
}

pub fn get_file_format_by_name(
    engine: &Engine,
    database: &str,
    schema: &str,
    name: &str,
) -> SdResult<FileFormat> {
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let name = ident::normalize(name);
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, format_type, options, created_at FROM _metadata_fileformats \
         WHERE schema_id = ? AND name = ?",
        &[Value::text(&schema_row.id), Value::text(&name)],
    )?;
    row_opt(rows, row_to_file_format)?
        .ok_or_else(|| SdError::not_found(format!("file format {database}.{schema}.{name}")))
}

pub fn list_file_formats(engine: &Engine, database: &str, schema: &str) -> SdResult<Vec<FileFormat>> {
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, format_type, options, created_at FROM _metadata_fileformats \
         WHERE schema_id = ? ORDER BY name",
        &[Value::text(&schema_row.id)],
    )?;
    rows.rows.into_iter().map(|r| row_to_file_format(&r)).collect()
}

fn row_to_file_format(row: &[Value]) -> SdResult<FileFormat> {
    Ok(FileFormat {
        id: text(row, 0)?,
        schema_id: text(row, 1)?,
        name: text(row, 2)?,
        owner: text(row, 3)?,
        format_type: FileFormatType::parse(&text(row, 4)?)?,
        options: text(row, 5)?,
        created_at: int(row, 6)?,
    })
}
