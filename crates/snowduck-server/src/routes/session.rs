use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use snowduck_api::login::{LoginRequest, LoginResponse, SimpleResponse};

use crate::auth::extract_token;
use crate::state::AppState;

pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Json<LoginResponse> {
    let database = req.data.database_name.unwrap_or_default();
    let schema = req.data.schema_name.unwrap_or_default();
    match state
        .emulator
        .login(&req.data.login_name, &req.data.password, &database, &schema)
    {
        Ok(session) => Json(LoginResponse::ok(
            session.access_token,
            session.master_token,
            session.database,
            session.schema,
        )),
        Err(err) => Json(LoginResponse::failed(err.to_string())),
    }
}

pub async fn heartbeat(State(state): State<AppState>, headers: HeaderMap) -> Json<SimpleResponse> {
    match extract_token(&headers) {
        Some(token) => match state.emulator.sessions().heartbeat(&token) {
            Ok(()) => Json(SimpleResponse::ok()),
            Err(err) => Json(SimpleResponse::failed(err.to_string())),
        },
        None => Json(SimpleResponse::failed("missing Authorization header")),
    }
}

pub async fn renew(State(state): State<AppState>, headers: HeaderMap) -> Json<LoginResponse> {
    match extract_token(&headers) {
        Some(master_token) => match state.emulator.sessions().renew(&master_token) {
            Ok(session) => Json(LoginResponse::ok(
                session.access_token,
                session.master_token,
                session.database,
                session.schema,
            )),
            Err(err) => Json(LoginResponse::failed(err.to_string())),
        },
        None => Json(LoginResponse::failed("missing Authorization header")),
    }
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<SimpleResponse> {
    do_logout(&state, &headers)
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub delete: bool,
}

pub async fn session_delete(
    State(state): State<AppState>,
    Query(_query): Query<DeleteQuery>,
    headers: HeaderMap,
) -> Json<SimpleResponse> {
    do_logout(&state, &headers)
}

fn do_logout(state: &AppState, headers: &HeaderMap) -> Json<SimpleResponse> {
    match extract_token(headers) {
        Some(token) => match state.emulator.sessions().logout(&token) {
            Ok(()) => Json(SimpleResponse::ok()),
            Err(err) => Json(SimpleResponse::failed(err.to_string())),
        },
        None => Json(SimpleResponse::failed("missing Authorization header")),
    }
}

pub async fn telemetry_send() -> Json<serde_json::Value> {
    Json(serde_json::json!({"success": true}))
}
