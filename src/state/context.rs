//! Session context
//!
//! One injected object owns the active session. Every component reads the
//! token, role and identity through it, and logout or a rejected token
//! invalidates it in one place.

use std::fmt;
use std::sync::{Arc, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::models::Role;
use crate::utils::errors::Result;
use super::storage::{MemorySessionStore, SessionStore};

/// Credentials and identity of the logged-in user
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub email: String,
    pub user_id: Option<i64>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Shared handle to the active session
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Create a context backed by `store`, loading any persisted session
    pub fn new(store: Arc<dyn SessionStore>) -> Result<Self> {
        let loaded = store.load()?;
        Ok(Self {
            current: Arc::new(RwLock::new(loaded)),
            store,
        })
    }

    /// A context that forgets everything when dropped
    pub fn in_memory() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store: Arc::new(MemorySessionStore::new()),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn email(&self) -> Option<String> {
        self.current().map(|s| s.email).filter(|e| !e.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.current().map(|s| s.role)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.current().and_then(|s| s.user_id)
    }

    /// Replace the active session and persist it
    pub fn set(&self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    /// Explicit logout
    pub fn logout(&self) -> Result<()> {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
        self.store.clear()?;
        info!("Session cleared");
        Ok(())
    }

    /// Drop the session after the server rejected its token
    pub fn invalidate(&self) {
        if !self.is_authenticated() {
            return;
        }
        warn!("Session rejected by server, clearing");
        if let Err(e) = self.logout() {
            warn!(error = %e, "Failed to clear persisted session");
        }
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &self.current())
            .finish()
    }
}
