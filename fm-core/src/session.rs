//! Logged-in user session
//!
//! The session is an explicit object created at login and cleared at logout.
//! It keeps the current user in a single key-value record so that a session
//! can be restored from the same store later in the process.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Artist,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Artist => f.write_str("ARTIST"),
            UserRole::Admin => f.write_str("ADMIN"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub stage_name: String,
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// String key-value storage
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store, lives as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

pub struct Session<S: KeyValueStore> {
    store: S,
    key: String,
    user: Option<User>,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore a session from `store`. A missing or unreadable record
    /// yields a logged-out session; an unreadable record is removed.
    pub fn restore(mut store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let user = match store.get(&key) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("Restored session for {}", user.stage_name);
                    Some(user)
                }
                Err(e) => {
                    warn!("Discarding unreadable session record {}: {}", key, e);
                    store.remove(&key);
                    None
                }
            },
            None => {
                debug!("No stored session under {}", key);
                None
            }
        };
        Self { store, key, user }
    }

    pub fn login(&mut self, user: User) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.store.set(&self.key, &raw),
            Err(e) => warn!("Failed to persist session for {}: {}", user.stage_name, e),
        }
        info!("Logged in as {} ({})", user.stage_name, user.role);
        self.user = Some(user);
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("Logged out {}", user.stage_name);
        }
        self.store.remove(&self.key);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Hand back the underlying store, e.g. to restore a later session.
    pub fn into_store(self) -> S {
        self.store
    }
}
