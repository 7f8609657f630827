//! services/api/src/web/session.rs
//!
//! The in-memory session layer. Login issues an opaque UUID token mapped
//! to either a participant identity or the admin flag (never both); the
//! cookie carries only the token. Sessions have no expiry beyond process
//! lifetime and are removed on logout.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use annotation_study_core::domain::Identity;

/// Who a session token stands for.
#[derive(Debug, Clone)]
pub enum SessionUser {
    Participant(Identity),
    Admin,
}

struct SessionRecord {
    user: SessionUser,
    issued_at: DateTime<Utc>,
}

/// Token -> session mapping, shared across all requests.
#[derive(Default)]
pub struct SessionLayer {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for `user` and returns it.
    pub async fn issue(&self, user: SessionUser) -> String {
        let token = Uuid::new_v4().to_string();
        let record = SessionRecord {
            user,
            issued_at: Utc::now(),
        };
        self.sessions.write().await.insert(token.clone(), record);
        token
    }

    /// Resolves the request's session cookie to its user, if any.
    pub async fn resolve(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let token = token_from_headers(headers)?;
        self.sessions.read().await.get(token).map(|r| r.user.clone())
    }

    /// Clears the request's session unconditionally. Absent or stale
    /// tokens are fine; logout never fails.
    pub async fn clear(&self, headers: &HeaderMap) {
        let Some(token) = token_from_headers(headers) else {
            return;
        };
        if let Some(record) = self.sessions.write().await.remove(token) {
            info!("Cleared session issued at {}", record.issued_at);
        }
    }
}

/// The Set-Cookie value carrying a freshly issued session token.
pub fn session_cookie(token: &str) -> String {
    format!("session={}; HttpOnly; SameSite=Lax; Path=/", token)
}

/// The Set-Cookie value that expires the session cookie.
pub fn clear_cookie() -> &'static str {
    "session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0"
}

fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let cookie_header = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    cookie_header.split(';').find_map(|c| {
        let c = c.trim();
        c.strip_prefix("session=")
    })
}
