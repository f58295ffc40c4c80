use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use snowduck_api::warehouse::{CreateWarehouseRequest, WarehouseDto};
use snowduck_catalog::WarehouseSize;
use snowduck_common::SdError;

use crate::state::AppState;

fn status_for(err: &SdError) -> StatusCode {
    StatusCode::from_u16(err.kind().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<WarehouseDto>> {
    Json(
        state
            .emulator
            .catalog()
            .warehouses
            .list()
            .into_iter()
            .map(WarehouseDto::from)
            .collect(),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateWarehouseRequest>,
) -> Result<(StatusCode, Json<WarehouseDto>), (StatusCode, String)> {
    let size = WarehouseSize::parse(&req.size).map_err(|e| (status_for(&e), e.to_string()))?;
    state
        .emulator
        .catalog()
        .warehouses
        .create(&req.name, size, req.auto_resume, req.auto_suspend_secs)
        .map(|w| (StatusCode::CREATED, Json(WarehouseDto::from(w))))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WarehouseDto>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .warehouses
        .get(&name)
        .map(|w| Json(WarehouseDto::from(w)))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn drop(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    match state.emulator.catalog().warehouses.drop(&name) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => status_for(&e),
    }
}

pub async fn resume(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WarehouseDto>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .warehouses
        .resume(&name)
        .map(|w| Json(WarehouseDto::from(w)))
        .map_err(|e| (status_for(&e), e.to_string()))
}

pub async fn suspend(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WarehouseDto>, (StatusCode, String)> {
    state
        .emulator
        .catalog()
        .warehouses
        .suspend(&name)
        .map(|w| Json(WarehouseDto::from(w)))
        .map_err(|e| (status_for(&e), e.to_string()))
}
