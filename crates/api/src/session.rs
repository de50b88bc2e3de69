//! In-memory session store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

/// Account as returned by `/register` and `/verify-email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: Option<User>,
}

/// Holds the current session for the lifetime of the process; never written to disk
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            inner: RwLock::new(access_token.map(|access_token| Session {
                access_token,
                user: None,
            })),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn set(&self, session: Session) {
        *self.write() = Some(session);
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    // A poisoned lock still holds a valid Option<Session>
    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_lifecycle() {
        let store = SessionStore::new(None);
        assert!(!store.is_authenticated());

        store.set(Session {
            access_token: "tok".to_string(),
            user: None,
        });
        assert_eq!(store.access_token().as_deref(), Some("tok"));

        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_initial_token() {
        let store = SessionStore::new(Some("env-token".to_string()));
        assert!(store.is_authenticated());
        assert!(store.current().unwrap().user.is_none());
    }
}
