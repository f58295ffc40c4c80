use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use snowduck_api::catalog::{
    CreateDatabaseRequest, CreateSchemaRequest, CreateTableRequest, DatabaseDto, SchemaDto, TableDto,
};
use snowduck_catalog::TableType;
use snowduck_common::SdError;

use crate::state::AppState;

fn status_for(err: &SdError) -> StatusCode {
    StatusCode::from_u16(err.kind().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn list_databases(State(state): State<AppState>) -> Result<Json<Vec<DatabaseDto>>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .list_databases()
        .map(|dbs| Json(dbs.into_iter().map(DatabaseDto::from).collect()))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn create_database(
    State(state): State<AppState>,
    Json(req): Json<CreateDatabaseRequest>,
) -> Result<(StatusCode, Json<DatabaseDto>), (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .create_database(&req.name, "rest_api", req.comment.as_deref())
        .map(|db| (StatusCode::CREATED, Json(DatabaseDto::from(db))))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn get_database(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DatabaseDto>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .get_database_by_name(&name)
        .map(|db| Json(DatabaseDto::from(db)))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn drop_database(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    match state.emulator.catalog().drop_database(&name) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => status_for(&e),
    }
}

pub async fn list_schemas(
    State(state): State<AppState>,
    Path(db): Path<String>,
) -> Result<Json<Vec<SchemaDto>>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .list_schemas(&db)
        .map(|schemas| Json(schemas.into_iter().map(|s| SchemaDto::from_schema(s, db.clone())).collect()))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn create_schema(
    State(state): State<AppState>,
    Path(db): Path<String>,
    Json(req): Json<CreateSchemaRequest>,
) -> Result<(StatusCode, Json<SchemaDto>), (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .create_schema(&db, &req.name, "rest_api", req.comment.as_deref())
        .map(|s| (StatusCode::CREATED, Json(SchemaDto::from_schema(s, db))))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn get_schema(
    State(state): State<AppState>,
    Path((db, schema)): Path<(String, String)>,
) -> Result<Json<SchemaDto>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .get_schema_by_name(&db, &schema)
        .map(|s| Json(SchemaDto::from_schema(s, db)))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn drop_schema(State(state): State<AppState>, Path((db, schema)): Path<(String, String)>) -> StatusCode {
    match state.emulator.catalog().drop_schema(&db, &schema) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => status_for(&e),
    }
}

pub async fn list_tables(
    State(state): State<AppState>,
    Path((db, schema)): Path<(String, String)>,
) -> Result<Json<Vec<TableDto>>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .list_tables(&db, &schema)
        .map(|tables| Json(tables.into_iter().map(|t| TableDto::from_table(t, schema.clone())).collect()))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn create_table(
    State(state): State<AppState>,
    Path((db, schema)): Path<(String, String)>,
    Json(req): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<TableDto>), (StatusCode, String)> {
    let columns = req.columns.into_iter().map(Into::into).collect();
    state
        .emulator
        .catalog()
        .create_table(&db, &schema, &req.name, "rest_api", TableType::BaseTable, columns, None)
        .map(|t| (StatusCode::CREATED, Json(TableDto::from_table(t, schema))))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn get_table(
    State(state): State<AppState>,
    Path((db, schema, table)): Path<(String, String, String)>,
) -> Result<Json<TableDto>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .get_table_by_name(&db, &schema, &table)
        .map(|t| Json(TableDto::from_table(t, schema)))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn drop_table(
    State(state): State<AppState>,
    Path((db, schema, table)): Path<(String, String, String)>,
) -> StatusCode {
    match state.emulator.catalog().drop_table(&db, &schema, &table) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => status_for(&e),
    }
}

