// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Pluggable session and user stores.
//!
//! The auth gate consumes these through trait objects so applications can
//! plug in their own storage. The bundled in-memory implementations are
//! suitable for development and tests: data is lost when the process exits.
//!
//! The session store serializes writes through an `RwLock` while serving
//! reads concurrently. Expired entries are invisible to reads and are evicted
//! by a low-frequency background sweep that holds the write lock for one
//! entry removal at a time.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::AuthConfig;
use crate::error::{Result, VitralError};
use crate::request::VitralRequest;

/// An authenticated user as seen by the auth gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable user id (the session subject).
    pub id: String,
    /// Display name.
    pub username: String,
    /// Granted roles.
    pub roles: Vec<String>,
}

impl User {
    /// Creates a user with the given id, name, and roles.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            roles,
        }
    }

    /// The user's role list.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

/// A server-side session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque session id, carried by a cookie.
    pub id: String,
    /// Subject id of the user the session belongs to.
    pub user_id: String,
    /// Unix timestamp (seconds) after which the session is invalid.
    pub expires_at: u64,
}

impl Session {
    /// Returns true if the session has expired.
    pub fn is_expired(&self) -> bool {
        now_secs() >= self.expires_at
    }
}

/// Pluggable session storage consumed by the auth gate.
pub trait SessionStore: Send + Sync {
    /// Resolves the request's session, if it carries a valid one.
    fn get_session(&self, request: &VitralRequest) -> Result<Option<Session>>;

    /// Creates a new session for a user.
    fn create_session(&self, user_id: &str) -> Result<Session>;

    /// Deletes a session by id. Deleting an unknown id is not an error.
    fn delete_session(&self, id: &str) -> Result<()>;
}

/// Pluggable user storage consumed by the auth gate.
pub trait UserStore: Send + Sync {
    /// Looks up a user by id. Unknown ids return `Ok(None)`.
    fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// In-memory session store.
pub struct MemorySessionStore {
    cookie_name: String,
    ttl_secs: u64,
    counter: AtomicU64,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Creates a store with the given cookie name and session TTL.
    pub fn new(cookie_name: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl_secs,
            counter: AtomicU64::new(0),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store from the auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.session_cookie.clone(), config.session_ttl_secs)
    }

    /// Derives an unguessable-enough session id from a process-local counter
    /// and the current time.
    fn new_session_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let digest = Sha256::digest(format!("{}:{}", n, nanos).as_bytes());
        format!("{:x}", digest)
    }

    /// Number of live (non-expired) sessions.
    pub fn len(&self) -> usize {
        match self.sessions.read() {
            Ok(map) => map.values().filter(|s| !s.is_expired()).count(),
            Err(_) => 0,
        }
    }

    /// Returns true if the store holds no live sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evicts expired sessions.
    ///
    /// Candidates are collected under a read lock; each removal then takes
    /// the write lock for a single entry, so concurrent request-path reads
    /// and writes are never blocked for longer than one removal.
    pub fn sweep_expired(&self) -> usize {
        let expired: Vec<String> = match self.sessions.read() {
            Ok(map) => map
                .values()
                .filter(|s| s.is_expired())
                .map(|s| s.id.clone())
                .collect(),
            Err(_) => return 0,
        };

        let mut removed = 0;
        for id in expired {
            if let Ok(mut map) = self.sessions.write() {
                // Re-check under the write lock; the entry may have been
                // replaced since the scan.
                if map.get(&id).map(|s| s.is_expired()).unwrap_or(false) {
                    map.remove(&id);
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Spawns a low-frequency background thread sweeping expired sessions.
    ///
    /// The thread exits on its own once the store has been dropped.
    pub fn spawn_sweeper(store: &Arc<Self>, interval: Duration) -> thread::JoinHandle<()> {
        let weak = Arc::downgrade(store);
        thread::spawn(move || loop {
            thread::sleep(interval);
            match weak.upgrade() {
                Some(store) => {
                    let removed = store.sweep_expired();
                    if removed > 0 {
                        tracing::debug!(removed, "session sweep evicted expired entries");
                    }
                }
                None => break,
            }
        })
    }
}

impl SessionStore for MemorySessionStore {
    fn get_session(&self, request: &VitralRequest) -> Result<Option<Session>> {
        let Some(id) = request.cookies.get(&self.cookie_name) else {
            return Ok(None);
        };

        let map = self
            .sessions
            .read()
            .map_err(|e| VitralError::Store(e.to_string()))?;

        match map.get(id) {
            Some(session) if !session.is_expired() => Ok(Some(session.clone())),
            _ => Ok(None),
        }
    }

    fn create_session(&self, user_id: &str) -> Result<Session> {
        let session = Session {
            id: self.new_session_id(),
            user_id: user_id.to_string(),
            expires_at: now_secs() + self.ttl_secs,
        };

        let mut map = self
            .sessions
            .write()
            .map_err(|e| VitralError::Store(e.to_string()))?;
        map.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn delete_session(&self, id: &str) -> Result<()> {
        let mut map = self
            .sessions
            .write()
            .map_err(|e| VitralError::Store(e.to_string()))?;
        map.remove(id);
        Ok(())
    }
}

/// In-memory user store.
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Creates an empty user store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a store pre-populated with users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: RwLock::new(map),
        }
    }

    /// Adds or replaces a user.
    pub fn insert(&self, user: User) -> Result<()> {
        let mut map = self
            .users
            .write()
            .map_err(|e| VitralError::Store(e.to_string()))?;
        map.insert(user.id.clone(), user);
        Ok(())
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryUserStore {
    fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let map = self
            .users
            .read()
            .map_err(|e| VitralError::Store(e.to_string()))?;
        Ok(map.get(id).cloned())
    }
}
