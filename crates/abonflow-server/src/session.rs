//! Browser Sessions
//!
//! A session is an opaque uuid token in an HTTP-only cookie, mapped to a
//! user id in process memory. Restarting the server logs everyone out,
//! which is acceptable for a single-process deployment.

use std::collections::HashMap;
use std::sync::RwLock;

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "abonflow_session";

/// In-memory token → user-id map
pub struct SessionStore {
    sessions: RwLock<HashMap<String, i64>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for a user and return the fresh token.
    pub fn open(&self, user_id: i64) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(token.clone(), user_id);
        token
    }

    /// Resolve a token to the authenticated user id.
    pub fn user_id(&self, token: &str) -> Option<i64> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(token).copied()
    }

    /// Close a session. Unknown tokens are a no-op.
    pub fn close(&self, token: &str) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(token);
    }
}

/// Cookie carrying a freshly opened session.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Expired cookie that clears the session on the browser side.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_resolve_close() {
        let store = SessionStore::new();
        let token = store.open(42);
        assert_eq!(store.user_id(&token), Some(42));

        store.close(&token);
        assert_eq!(store.user_id(&token), None);
        // Closing again is a no-op
        store.close(&token);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new();
        assert_ne!(store.open(1), store.open(1));
    }

    #[test]
    fn test_unknown_token_resolves_to_nothing() {
        let store = SessionStore::new();
        assert_eq!(store.user_id("forged"), None);
    }
}
