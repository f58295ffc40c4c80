use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes::{catalog, query, session, statements, warehouse};
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/session/v1/login-request", post(session::login))
        .route("/session/token-request", post(session::renew))
        .route("/session/heartbeat", post(session::heartbeat))
        .route("/session/renew", post(session::renew))
        .route("/session/logout", post(session::logout))
        .route("/session", post(session::session_delete))
        .route("/queries/v1/query-request", post(query::query_request))
        .route("/telemetry/send", post(session::telemetry_send))
        .route("/api/v2/statements", post(statements::submit))
        .route("/api/v2/statements/:handle", get(statements::status))
        .route("/api/v2/statements/:handle/cancel", post(statements::cancel))
        .route(
            "/api/v2/databases",
            get(catalog::list_databases).post(catalog::create_database),
        )
        .route(
            "/api/v2/databases/:db",
            get(catalog::get_database).delete(catalog::drop_database),
        )
        .route(
            "/api/v2/databases/:db/schemas",
            get(catalog::list_schemas).post(catalog::create_schema),
        )
        .route(
            "/api/v2/databases/:db/schemas/:schema",
            get(catalog::get_schema).delete(catalog::drop_schema),
        )
        .route(
            "/api/v2/databases/:db/schemas/:schema/tables",
            get(catalog::list_tables).post(catalog::create_table),
        )
        .route(
            "/api/v2/databases/:db/schemas/:schema/tables/:table",
            get(catalog::get_table).delete(catalog::drop_table),
        )
        .route("/api/v2/warehouses", get(warehouse::list).post(warehouse::create))
        .route(
            "/api/v2/warehouses/:name",
            get(warehouse::get).delete(warehouse::drop),
        )
        .route("/api/v2/warehouses/:name/resume", post(warehouse::resume))
        .route("/api/v2/warehouses/:name/suspend", post(warehouse::suspend))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

