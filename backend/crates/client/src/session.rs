//! Client Session Store
//!
//! Holds the authenticated principal and bearer token for the process,
//! with optional persistence to a JSON snapshot file. The session is
//! considered stale a fixed duration after login regardless of token
//! expiry, and a stale snapshot is discarded on startup.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Principal as seen by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Server id; older backends used `_id`
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub last_login_at: Option<i64>,
}

fn default_active() -> bool {
    true
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionState {
    user: Option<SessionUser>,
    token: Option<String>,
    logged_in_at_ms: Option<i64>,
}

/// Thread-safe session store
pub struct SessionStore {
    state: Mutex<SessionState>,
    session_file: Option<PathBuf>,
    session_duration: Duration,
}

impl SessionStore {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            session_file: config.session_file.clone(),
            session_duration: config.session_duration,
        }
    }

    /// Load the persisted snapshot, discarding it when stale or unreadable
    pub fn init(&self) {
        let Some(path) = &self.session_file else {
            return;
        };

        let loaded = match std::fs::read(path) {
            Ok(bytes) => serde_json::from_slice::<SessionState>(&bytes).ok(),
            Err(_) => None,
        };

        let Some(state) = loaded else {
            return;
        };

        if !fresh(state.logged_in_at_ms, self.session_duration) {
            tracing::debug!("Discarding stale session snapshot");
            let _ = std::fs::remove_file(path);
            return;
        }

        *self.lock() = state;
    }

    /// Store a fresh login
    pub fn login(&self, user: SessionUser, token: String) {
        {
            let mut state = self.lock();
            state.user = Some(user);
            state.token = Some(token);
            state.logged_in_at_ms = Some(Utc::now().timestamp_millis());
        }
        self.persist();
    }

    /// Replace the token after a refresh; login time is untouched
    pub fn set_token(&self, token: String) {
        {
            let mut state = self.lock();
            state.token = Some(token);
        }
        self.persist();
    }

    /// Clear the session
    pub fn logout(&self) {
        {
            *self.lock() = SessionState::default();
        }
        if let Some(path) = &self.session_file {
            let _ = std::fs::remove_file(path);
        }
    }

    /// Current token snapshot
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    /// Current principal snapshot
    pub fn user(&self) -> Option<SessionUser> {
        self.lock().user.clone()
    }

    /// True while a token is held and the session has not gone stale
    pub fn is_authenticated(&self) -> bool {
        let state = self.lock();
        state.token.is_some() && fresh(state.logged_in_at_ms, self.session_duration)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // A poisoned lock only means another thread panicked mid-write;
        // the state itself is plain data
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self) {
        let Some(path) = &self.session_file else {
            return;
        };

        let snapshot = self.lock().clone();
        let result = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| e.to_string())
            .and_then(|bytes| std::fs::write(path, bytes).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist session snapshot");
        }
    }
}

fn fresh(logged_in_at_ms: Option<i64>, duration: Duration) -> bool {
    match logged_in_at_ms {
        None => false,
        Some(at) => {
            let age_ms = Utc::now().timestamp_millis().saturating_sub(at);
            age_ms >= 0 && (age_ms as u128) < duration.as_millis()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost:9")
    }

    fn user() -> SessionUser {
        SessionUser {
            id: "u1".to_string(),
            email: "a@b.example".to_string(),
            role: "sales".to_string(),
            active: true,
            last_login_at: None,
        }
    }

    #[test]
    fn test_login_logout() {
        let store = SessionStore::new(&config());
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());

        store.login(user(), "tok".to_string());
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.user().unwrap().email, "a@b.example");

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_stale_session_not_authenticated() {
        let mut cfg = config();
        cfg.session_duration = Duration::ZERO;
        let store = SessionStore::new(&cfg);

        store.login(user(), "tok".to_string());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_token_keeps_login_time() {
        let store = SessionStore::new(&config());
        store.login(user(), "tok1".to_string());

        store.set_token("tok2".to_string());
        assert_eq!(store.token().as_deref(), Some("tok2"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let cfg = config().with_session_file(&path);
        let store = SessionStore::new(&cfg);
        store.login(user(), "tok".to_string());
        assert!(path.exists());

        let restored = SessionStore::new(&cfg);
        restored.init();
        assert!(restored.is_authenticated());
        assert_eq!(restored.token().as_deref(), Some("tok"));

        restored.logout();
        assert!(!path.exists());
    }

    #[test]
    fn test_stale_snapshot_discarded_on_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut cfg = config().with_session_file(&path);
        let store = SessionStore::new(&cfg);
        store.login(user(), "tok".to_string());

        // Reload with a zero lifetime, the snapshot is now stale
        cfg.session_duration = Duration::ZERO;
        let restored = SessionStore::new(&cfg);
        restored.init();
        assert!(!restored.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn test_user_id_aliases() {
        let modern: SessionUser =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.example","role":"sales"}"#).unwrap();
        assert_eq!(modern.id, "u1");

        let legacy: SessionUser =
            serde_json::from_str(r#"{"_id":"u2","email":"a@b.example","role":"admin"}"#).unwrap();
        assert_eq!(legacy.id, "u2");
        assert!(legacy.is_admin());
    }
}
