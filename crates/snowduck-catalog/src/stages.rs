use snowduck_common::{ident, SdError, SdResult};
use snowduck_engine::{Engine, Value};
use uuid::Uuid;

use crate::models::{Stage, StageType};
use crate::row::{int, opt_text, row_opt, text};
use crate::schemas::get_schema_by_name;

pub fn create_stage(
    engine: &Engine,
    database: &str,
    schema: &str,
    name: &str,
    owner: &str,
    stage_type: StageType,
    url: Option<&str>,
) -> SdResult<Stage> {
    if name.trim().is_empty() {
        return Err(SdError::validation("stage name must not be empty"));
    }
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let name = ident::normalize(name);
    let id = Uuid::new_v4().to_string();
    let created_at = snowduck_common::time::now_millis();

    engine.exec(
        "INSERT INTO _metadata_stages (id, schema_id, name, owner, stage_type, url, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        &[
            Value::text(&id),
            Value::text(&schema_row.id),
            Value::text(&name),
            Value::text(owner),
            Value::text(stage_type.as_str()),
            url.map(Value::text).unwrap_or(Value::Null),
            Value::Int(created_at),
        ],
    )?;

    tracing::debug!(database, schema, stage = %name, %id, "stage created");

    Ok(Stage {
        id,
        schema_id: schema_row.id,
        name,
        owner: owner.to_string(),
        stage_type,
        url: url.map(str::to_string),
        created_at,
    })
}

pub fn drop_stage(engine: &Engine, database: &str, schema: &str, name: &str) -> SdResult<()> {
    let stage = get_stage_by_name(engine, database, schema, name)?;
    engine.exec("DELETE FROM _metadata_stages WHERE id = ?", &[Value::text(&stage.id)])?;
    tracing::debug!(database, schema, stage = name, id = %stage.id, "stage dropped");
    Ok(())
}

pub fn get_stage_by_name(engine: &Engine, database: &str, schema: &str, name: &str) -> SdResult<Stage> {
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let name = ident::normalize(name);
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, stage_type, url, created_at FROM _metadata_stages \
         WHERE schema_id = ? AND name = ?",
        &[Value::text(&schema_row.id), Value::text(&name)],
    )?;
    row_opt(rows, row_to_stage)?
        .ok_or_else(|| SdError::not_found(format!("stage {database}.{schema}.{name}")))
}

pub fn list_stages(engine: &Engine, database: &str, schema: &str) -> SdResult<Vec<Stage>> {
    let schema_row = get_schema_by_name(engine, database, schema)?;
    let rows = engine.query(
        "SELECT id, schema_id, name, owner, stage_type, url, created_at FROM _metadata_stages \
         WHERE schema_id = ? ORDER BY name",
        &[Value::text(&schema_row.id)],
    )?;
    rows.rows.into_iter().map(|r| row_to_stage(&r)).collect()
}

fn row_to_stage(row: &[Value]) -> SdResult<Stage> {
    Ok(Stage {
        id: text(row, 0)?,
        schema_id: text(row, 1)?,
        name: text(row, 2)?,
        owner: text(row, 3)?,
        stage_type: StageType::parse(&text(row, 4)?)?,
        url: opt_text(row, 5),
        created_at: int(row, 6)?,
    })
}
