use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use snowduck_api::codes::{code_for, SUCCESS};
use snowduck_api::statements::{StatementResponse, StatementSubmitRequest};
use snowduck_common::ErrorKind;
use snowduck_session::StatementStatus;

use crate::auth::extract_token;
use crate::bindings::bindings_to_params;
use crate::state::AppState;

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<StatementSubmitRequest>,
) -> Json<StatementResponse> {
    let created_on = snowduck_common::time::now_millis();
    let Some(token) = extract_token(&headers) else {
        return Json(StatementResponse::failed(
            code_for(ErrorKind::AuthenticationError),
            "missing Authorization header",
            String::new(),
            created_on,
        ));
    };

    let params = match bindings_to_params(&req.bindings) {
        Ok(params) => params,
        Err(err) => {
            return Json(StatementResponse::failed(
                code_for(err.kind()),
                err.to_string(),
                String::new(),
                created_on,
            ))
        }
    };

    let handle_id = match state.emulator.submit_statement(
        &token,
        &req.statement,
        &params,
        req.database.as_deref(),
        req.schema.as_deref(),
    ) {
        Ok(id) => id,
        Err(err) => {
            return Json(StatementResponse::failed(code_for(err.kind()), err.to_string(), String::new(), created_on))
        }
    };

    Json(render_status(&state, &handle_id, created_on))
}

pub async fn status(State(state): State<AppState>, Path(handle_id): Path<String>) -> Json<StatementResponse> {
    let created_on = snowduck_common::time::now_millis();
    Json(render_status(&state, &handle_id, created_on))
}

pub async fn cancel(State(state): State<AppState>, Path(handle_id): Path<String>) -> Json<serde_json::Value> {
    match state.emulator.cancel_statement(&handle_id) {
        Ok(()) => Json(serde_json::json!({"success": true, "code": SUCCESS})),
        Err(err) => Json(serde_json::json!({
            "success": false,
            "code": code_for(err.kind()),
            "message": err.to_string(),
        })),
    }
}

fn render_status(state: &AppState, handle_id: &str, created_on: i64) -> StatementResponse {
    match state.emulator.statement_status(handle_id) {
        Ok(StatementStatus::Succeeded) | Ok(StatementStatus::Running) => {
            match state.emulator.statement_result(handle_id) {
                Ok(outcome) => StatementResponse::succeeded(
                    handle_id.to_string(),
                    created_on,
                    outcome.as_ref().and_then(|o| o.shaped.clone()),
                    outcome.map(|o| o.rows_affected).unwrap_or(0),
                ),
                Err(err) => StatementResponse::failed(code_for(err.kind()), err.to_string(), handle_id.to_string(), created_on),
            }
        }
        Ok(StatementStatus::Failed) | Ok(StatementStatus::Cancelled) => {
            let message = state
                .emulator
                .statement_result(handle_id)
                .err()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "statement failed".to_string());
            StatementResponse::failed(code_for(ErrorKind::ExecutionError), message, handle_id.to_string(), created_on)
        }
        Err(err) => StatementResponse::failed(code_for(err.kind()), err.to_string(), handle_id.to_string(), created_on),
    }
}
