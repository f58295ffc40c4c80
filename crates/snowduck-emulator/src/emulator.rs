//! Composition root: one `Emulator` owns the engine, catalog, and the
//! session/statement managers that front it, and is the single type the
//! HTTP layer depends on.

use std::sync::Arc;

use snowduck_catalog::Catalog;
use snowduck_common::{ident, EmulatorConfig, SdResult};
use snowduck_engine::{Engine, Value};
use snowduck_exec::{ExecContext, Outcome};
use snowduck_session::{Session, SessionManager, StatementManager, StatementStatus};
use uuid::Uuid;

pub struct Emulator {
    catalog: Arc<Catalog>,
    sessions: SessionManager,
    statements: StatementManager,
    config: EmulatorConfig,
}

impl Emulator {
    pub fn open(config: EmulatorConfig) -> SdResult<Self> {
        let engine = Arc::new(Engine::open(&config)?);
        let catalog = Arc::new(Catalog::new(engine)?);
        Ok(Emulator {
            catalog,
            sessions: SessionManager::new(config.session_ttl),
            statements: StatementManager::new(config.statement_ttl),
            config,
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn statements(&self) -> &StatementManager {
        &self.statements
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn login(&self, username: &str, password: &str, database: &str, schema: &str) -> SdResult<Session> {
        tracing::info!(username, database, schema, "login");
        let result = self.sessions.login(username, password, database, schema);
        if let Err(ref e) = result {
            tracing::debug!(username, error = %e, "login rejected");
        }
        result
    }

    /// The synchronous driver-protocol query path: executes immediately
    /// and returns the full result, applying any cursor change the
    /// statement produced (`USE DATABASE`/`USE SCHEMA`) back onto the
    /// session before returning.
    pub fn query(&self, access_token: &str, sql_text: &str) -> SdResult<Outcome> {
        let session = self.sessions.resolve(access_token)?;
        let handle_id = Uuid::new_v4().to_string();
        tracing::info!(session_id = %session.id, handle_id, "query");
        let ctx = ExecContext {
            session_id: session.id.clone(),
            database: session.database.clone(),
            schema: session.schema.clone(),
        };
        let outcome = snowduck_exec::execute(&self.catalog, &ctx, &handle_id, sql_text, &[]).inspect_err(
            |e| tracing::debug!(session_id = %session.id, handle_id, error = %e, "query failed"),
        )?;
        self.apply_cursor_update(&session.id, &outcome)?;
        Ok(outcome)
    }

    /// The async REST statements v2 path: submits through the statement
    /// manager, which currently executes synchronously, then applies the
    /// same cursor propagation as `query`.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_statement(
        &self,
        access_token: &str,
        sql_text: &str,
        params: &[Value],
        database: Option<&str>,
        schema: Option<&str>,
    ) -> SdResult<String> {
        let session = self.sessions.resolve(access_token)?;
        let ctx = ExecContext {
            session_id: session.id.clone(),
            database: database.map(ident::normalize).unwrap_or_else(|| session.database.clone()),
            schema: schema.map(ident::normalize).unwrap_or_else(|| session.schema.clone()),
        };
        tracing::info!(session_id = %session.id, database = %ctx.database, schema = %ctx.schema, "submit_statement");
        let handle_id = self.statements.submit(&self.catalog, &ctx, sql_text, params)?;
        if let Ok(Some(outcome)) = self.statements.result(&handle_id) {
            self.apply_cursor_update(&session.id, &outcome)?;
        }
        Ok(handle_id)
    }

    pub fn statement_status(&self, handle_id: &str) -> SdResult<StatementStatus> {
        self.statements.status(handle_id)
    }

    pub fn statement_result(&self, handle_id: &str) -> SdResult<Option<Outcome>> {
        self.statements.result(handle_id)
    }

    pub fn cancel_statement(&self, handle_id: &str) -> SdResult<()> {
        tracing::info!(handle_id, "cancel_statement");
        self.statements.cancel(handle_id)
    }

    fn apply_cursor_update(&self, session_id: &str, outcome: &Outcome) -> SdResult<()> {
        if outcome.new_database.is_some() || outcome.new_schema.is_some() {
            self.sessions
                .update_cursor(session_id, outcome.new_database.as_deref(), outcome.new_schema.as_deref())?;
        }
        Ok(())
    }
}

