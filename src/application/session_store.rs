// Session storage trait and the context handed to every page
use crate::domain::session::{ROLE_KEY, Session, TOKEN_KEY};
use crate::error::DashboardError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Key/value storage that outlives a single page (browser-local storage).
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError>;

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError>;

    fn remove(&self, key: &str) -> Result<(), DashboardError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DashboardError> {
        self.entries
            .lock()
            .map_err(|_| DashboardError::Session("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, DashboardError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DashboardError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Authentication context injected into controllers; login and logout are its only writers.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored session, if a non-empty token is present.
    pub fn current(&self) -> Option<Session> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!("Could not read session token: {}", e);
                return None;
            }
        };
        let role = self.store.get(ROLE_KEY).ok().flatten();
        Some(Session::new(token, role))
    }

    pub fn sign_in(&self, token: &str, role: Option<&str>) -> Result<(), DashboardError> {
        self.store.set(TOKEN_KEY, token)?;
        match role {
            Some(role) => self.store.set(ROLE_KEY, role)?,
            None => self.store.remove(ROLE_KEY)?,
        }
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), DashboardError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(ROLE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
impl SessionContext {
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}
