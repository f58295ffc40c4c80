//! Statement handle lifecycle (L5b): submission, status polling, cancellation.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use snowduck_cancel::CancellationTokenSource;
use snowduck_catalog::Catalog;
use snowduck_common::{SdError, SdResult};
use snowduck_engine::Value;
use snowduck_exec::{execute, ExecContext, Outcome};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementStatus {
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

pub struct StatementHandle {
    pub id: String,
    pub session_id: String,
    pub sql_text: String,
    pub status: StatementStatus,
    pub submitted_at: i64,
    pub completed_at: Option<i64>,
    pub rows_affected: u64,
    pub error: Option<String>,
    pub result: Option<Outcome>,
    cancel: CancellationTokenSource,
}

pub struct StatementManager {
    handles: RwLock<HashMap<String, StatementHandle>>,
    ttl: Duration,
}

impl StatementManager {
    pub fn new(ttl: Duration) -> Self {
        StatementManager {
            handles: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Runs the statement to completion before returning. Execution here is
    /// synchronous; the handle exists so polling and cancellation have a
    /// consistent shape even though there is no async window to act on yet.
    pub fn submit(
        &self,
        catalog: &Catalog,
        ctx: &ExecContext,
        sql: &str,
        params: &[Value],
    ) -> SdResult<String> {
        let handle_id = Uuid::new_v4().to_string();
        let submitted_at = snowduck_common::time::now_millis();
        let cancel = CancellationTokenSource::new();
        let token = cancel.token();

        let outcome = if token.is_cancelled() {
            Err(SdError::cancelled())
        } else {
            execute(catalog, ctx, &handle_id, sql, params)
        };

        let handle = match outcome {
            Ok(result) => {
                tracing::debug!(handle_id, rows_affected = result.rows_affected, "statement succeeded");
                StatementHandle {
                    id: handle_id.clone(),
                    session_id: ctx.session_id.clone(),
                    sql_text: sql.to_string(),
                    status: StatementStatus::Succeeded,
                    submitted_at,
                    completed_at: Some(snowduck_common::time::now_millis()),
                    rows_affected: result.rows_affected,
                    error: None,
                    result: Some(result),
                    cancel,
                }
            }
            Err(err) => {
                tracing::debug!(handle_id, error = %err, "statement failed");
                StatementHandle {
                    id: handle_id.clone(),
                    session_id: ctx.session_id.clone(),
                    sql_text: sql.to_string(),
                    status: StatementStatus::Failed,
                    submitted_at,
                    completed_at: Some(snowduck_common::time::now_millis()),
                    rows_affected: 0,
                    error: Some(err.to_string()),
                    result: None,
                    cancel,
                }
            }
        };

        self.handles.write().insert(handle_id.clone(), handle);
        Ok(handle_id)
    }

    pub fn status(&self, handle_id: &str) -> SdResult<StatementStatus> {
        self.handles
            .read()
            .get(handle_id)
            .map(|h| h.status)
            .ok_or_else(|| SdError::not_found(format!("statement handle {handle_id}")))
    }

    pub fn result(&self, handle_id: &str) -> SdResult<Option<Outcome>> {
        let handles = self.handles.read();
        let handle = handles
            .get(handle_id)
            .ok_or_else(|| SdError::not_found(format!("statement handle {handle_id}")))?;
        match handle.status {
            StatementStatus::Succeeded => Ok(Some(clone_outcome(handle.result.as_ref().unwrap()))),
            StatementStatus::Failed => Err(SdError::execution(
                handle.error.clone().unwrap_or_else(|| "statement failed".to_string()),
            )),
            StatementStatus::Running => Ok(None),
            StatementStatus::Cancelled => Err(SdError::cancelled()),
        }
    }

    /// Always reports `ValidationFailed` for a handle that has already
    /// finished; synchronous submission leaves no in-flight window to
    /// actually interrupt.
    pub fn cancel(&self, handle_id: &str) -> SdResult<()> {
        let mut handles = self.handles.write();
        let handle = handles
            .get_mut(handle_id)
            .ok_or_else(|| SdError::not_found(format!("statement handle {handle_id}")))?;
        match handle.status {
            StatementStatus::Running => {
                handle.cancel.cancel();
                handle.status = StatementStatus::Cancelled;
                tracing::debug!(handle_id, "statement cancelled");
                Ok(())
            }
            _ => Err(SdError::validation("statement has already completed and cannot be cancelled")),
        }
    }

    pub fn evict_expired(&self) {
        let now = snowduck_common::time::now_millis();
        let ttl_ms = self.ttl.as_millis() as i64;
        let before = self.handles.read().len();
        self.handles
            .write()
            .retain(|_, h| h.completed_at.map(|c| now - c < ttl_ms).unwrap_or(true));
        let evicted = before - self.handles.read().len();
        if evicted > 0 {
            tracing::debug!(evicted, "statement handles evicted");
        }
    }
}

fn clone_outcome(outcome: &Outcome) -> Outcome {
    Outcome {
        shaped: outcome.shaped.clone(),
        rows_affected: outcome.rows_affected,
        new_database: outcome.new_database.clone(),
        new_schema: outcome.new_schema.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowduck_common::EmulatorConfig;
    use snowduck_engine::Engine;
    use std::sync::Arc;

    fn test_catalog() -> Catalog {
        let engine = Arc::new(Engine::open(&EmulatorConfig::default()).unwrap());
        Catalog::new(engine).unwrap()
    }

    fn ctx() -> ExecContext {
        ExecContext {
            session_id: "s1".to_string(),
            database: "TEST_DB".to_string(),
            schema: "PUBLIC".to_string(),
        }
    }

    #[test]
    fn submit_then_poll_returns_succeeded_status_and_result() {
        let catalog = test_catalog();
        let mgr = StatementManager::new(Duration::from_secs(60));
        let handle_id = mgr.submit(&catalog, &ctx(), "SELECT 1 AS n", &[]).unwrap();
        assert_eq!(mgr.status(&handle_id).unwrap(), StatementStatus::Succeeded);
        let result = mgr.result(&handle_id).unwrap().unwrap();
        assert_eq!(result.rows_affected, 1);
    }

    #[test]
    fn submit_of_failing_sql_reports_failed_status() {
        let catalog = test_catalog();
        let mgr = StatementManager::new(Duration::from_secs(60));
        let handle_id = mgr.submit(&catalog, &ctx(), "SELECT * FROM NO_SUCH_TABLE", &[]).unwrap();
        assert_eq!(mgr.status(&handle_id).unwrap(), StatementStatus::Failed);
        assert!(mgr.result(&handle_id).is_err());
    }

    #[test]
    fn cancel_on_a_completed_handle_is_rejected() {
        let catalog = test_catalog();
        let mgr = StatementManager::new(Duration::from_secs(60));
        let handle_id = mgr.submit(&catalog, &ctx(), "SELECT 1", &[]).unwrap();
        let err = mgr.cancel(&handle_id).unwrap_err();
        assert_eq!(err.kind(), snowduck_common::ErrorKind::ValidationFailed);
    }

    #[test]
    fn status_of_unknown_handle_is_not_found() {
        let mgr = StatementManager::new(Duration::from_secs(60));
        assert!(mgr.status("nope").is_err());
    }
}
