use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Json;
use snowduck_api::query::{QueryRequest, QueryResponse};
use snowduck_exec::shape_rowset;

use crate::auth::extract_token;
use crate::state::AppState;

pub async fn query_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let Some(token) = extract_token(&headers) else {
        return Json(QueryResponse::failed("missing Authorization header"));
    };

    match state.emulator.query(&token, &req.sql_text) {
        Ok(outcome) => {
            let query_id = uuid::Uuid::new_v4().to_string();
            let shaped = outcome.shaped.unwrap_or_else(|| {
                shape_rowset(&snowduck_engine::RowSet {
                    columns: Vec::new(),
                    rows: Vec::new(),
                })
            });
            Json(QueryResponse::ok(query_id, shaped))
        }
        Err(err) => Json(QueryResponse::failed(err.to_string())),
    }
}
