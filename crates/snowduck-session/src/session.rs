//! Session manager (L5a): token issuance, lookup, renewal, invalidation.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use snowduck_common::{ident, SdError, SdResult};
use uuid::Uuid;

use crate::token::generate_token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Renewing,
    Expired,
    Closed,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub access_token: String,
    pub master_token: String,
    pub username: String,
    pub database: String,
    pub schema: String,
    pub created_at: i64,
    pub expires_at: i64,
    pub state: SessionState,
}

/// Accepts any non-empty username/password pair. The reference service
/// has a much richer auth surface (key-pair, OAuth, MFA); the emulator's
/// default policy exists only to keep the login handshake shaped right.
pub fn default_auth_policy(username: &str, password: &str) -> bool {
    !username.trim().is_empty() && !password.trim().is_empty()
}

pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
    by_access_token: RwLock<HashMap<String, String>>,
    by_master_token: RwLock<HashMap<String, String>>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        SessionManager {
            sessions: RwLock::new(HashMap::new()),
            by_access_token: RwLock::new(HashMap::new()),
            by_master_token: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn login(&self, username: &str, password: &str, database: &str, schema: &str) -> SdResult<Session> {
        if !default_auth_policy(username, password) {
            return Err(SdError::auth("invalid credentials"));
        }

        let now = snowduck_common::time::now_millis();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            access_token: generate_token(),
            master_token: generate_token(),
            username: username.to_string(),
            database: ident::normalize(database),
            schema: ident::normalize(schema),
            created_at: now,
            expires_at: now + self.ttl.as_millis() as i64,
            state: SessionState::Active,
        };

        self.by_access_token
            .write()
            .insert(session.access_token.clone(), session.id.clone());
        self.by_master_token
            .write()
            .insert(session.master_token.clone(), session.id.clone());
        self.sessions.write().insert(session.id.clone(), session.clone());
        tracing::debug!(session_id = %session.id, username, "session created");
        Ok(session)
    }

    /// Resolutions dominate over mutations, so the hot path only ever takes
    /// a read lock. The lock is upgraded to exclusive for the rare case
    /// where this call is the one that observes the session just crossed
    /// its TTL and has to flip it to `Expired`.
    pub fn resolve(&self, access_token: &str) -> SdResult<Session> {
        let id = self
            .by_access_token
            .read()
            .get(access_token)
            .cloned()
            .ok_or_else(|| SdError::auth("no such session"))?;

        let sessions = self.sessions.upgradable_read();
        let session = sessions.get(&id).ok_or_else(|| SdError::auth("no such session"))?;

        if session.state == SessionState::Closed {
            return Err(SdError::auth("session closed"));
        }
        if snowduck_common::time::now_millis() > session.expires_at {
            let mut sessions = RwLockUpgradableReadGuard::upgrade(sessions);
            let session = sessions
                .get_mut(&id)
                .ok_or_else(|| SdError::auth("no such session"))?;
            session.state = SessionState::Expired;
            tracing::debug!(session_id = %id, "session expired");
            return Err(SdError::auth("session expired"));
        }
        Ok(session.clone())
    }

    pub fn renew(&self, master_token: &str) -> SdResult<Session> {
        let id = self
            .by_master_token
            .read()
            .get(master_token)
            .cloned()
            .ok_or_else(|| SdError::auth("no such session"))?;

        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or_else(|| SdError::auth("no such session"))?;
        if session.state == SessionState::Closed {
            return Err(SdError::auth("session closed"));
        }

        session.state = SessionState::Renewing;
        let old_access_token = session.access_token.clone();
        let old_master_token = session.master_token.clone();
        session.access_token = generate_token();
        session.master_token = generate_token();
        session.expires_at = snowduck_common::time::now_millis() + self.ttl.as_millis() as i64;
        session.state = SessionState::Active;
        let renewed = session.clone();
        drop(sessions);

        let mut by_access = self.by_access_token.write();
        by_access.remove(&old_access_token);
        by_access.insert(renewed.access_token.clone(), id.clone());
        drop(by_access);

        let mut by_master = self.by_master_token.write();
        by_master.remove(&old_master_token);
        by_master.insert(renewed.master_token.clone(), id.clone());
        drop(by_master);

        tracing::debug!(session_id = %id, "session renewed");
        Ok(renewed)
    }

    pub fn heartbeat(&self, access_token: &str) -> SdResult<()> {
        let id = self
            .by_access_token
            .read()
            .get(access_token)
            .cloned()
            .ok_or_else(|| SdError::auth("no such session"))?;
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or_else(|| SdError::auth("no such session"))?;
        if session.state == SessionState::Closed || session.state == SessionState::Expired {
            return Err(SdError::auth("session not active"));
        }
        session.expires_at = snowduck_common::time::now_millis() + self.ttl.as_millis() as i64;
        tracing::debug!(session_id = %id, "session heartbeat");
        Ok(())
    }

    pub fn logout(&self, access_token: &str) -> SdResult<()> {
        let id = self
            .by_access_token
            .write()
            .remove(access_token)
            .ok_or_else(|| SdError::auth("no such session"))?;
        if let Some(session) = self.sessions.write().get_mut(&id) {
            self.by_master_token.write().remove(&session.master_token);
            session.state = SessionState::Closed;
        }
        tracing::debug!(session_id = %id, "session closed");
        Ok(())
    }

    pub fn update_cursor(&self, session_id: &str, database: Option<&str>, schema: Option<&str>) -> SdResult<()> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SdError::not_found(format!("session {session_id}")))?;
        if let Some(database) = database {
            session.database = ident::normalize(database);
        }
        if let Some(schema) = schema {
            session.schema = ident::normalize(schema);
        }
        tracing::debug!(session_id, "session cursor updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(Duration::from_secs(3600))
    }

    #[test]
    fn login_then_resolve_succeeds() {
        let mgr = manager();
        let session = mgr.login("u", "p", "TEST_DB", "PUBLIC").unwrap();
        let resolved = mgr.resolve(&session.access_token).unwrap();
        assert_eq!(resolved.username, "u");
    }

    #[test]
    fn login_rejects_empty_credentials() {
        let mgr = manager();
        assert!(mgr.login("", "p", "TEST_DB", "PUBLIC").is_err());
    }

    #[test]
    fn logout_then_resolve_fails_with_auth_error() {
        let mgr = manager();
        let session = mgr.login("u", "p", "TEST_DB", "PUBLIC").unwrap();
        mgr.logout(&session.access_token).unwrap();
        let err = mgr.resolve(&session.access_token).unwrap_err();
        assert_eq!(err.kind(), snowduck_common::ErrorKind::AuthenticationError);
    }

    #[test]
    fn renew_rotates_both_tokens() {
        let mgr = manager();
        let session = mgr.login("u", "p", "TEST_DB", "PUBLIC").unwrap();
        let renewed = mgr.renew(&session.master_token).unwrap();
        assert_ne!(renewed.access_token, session.access_token);
        assert_ne!(renewed.master_token, session.master_token);
        assert!(mgr.resolve(&session.access_token).is_err());
        assert!(mgr.resolve(&renewed.access_token).is_ok());
    }

    #[test]
    fn update_cursor_changes_database_and_schema() {
        let mgr = manager();
        let session = mgr.login("u", "p", "TEST_DB", "PUBLIC").unwrap();
        mgr.update_cursor(&session.id, Some("other_db"), None).unwrap();
        let resolved = mgr.resolve(&session.access_token).unwrap();
        assert_eq!(resolved.database, "OTHER_DB");
        assert_eq!(resolved.schema, "PUBLIC");
    }
}
