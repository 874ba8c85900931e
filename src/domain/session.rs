use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const AUTH_COOKIE_MAX_AGE_SECS: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Everything the client remembers about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Mirror of the `auth_token` cookie set alongside the stored token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCookie {
    pub value: String,
    pub path: String,
    pub max_age: i64,
    pub expires_at: DateTime<Utc>,
}

impl AuthCookie {
    pub fn issue(token: &str, now: DateTime<Utc>) -> Self {
        Self {
            value: token.to_string(),
            path: "/".to_string(),
            max_age: AUTH_COOKIE_MAX_AGE_SECS,
            expires_at: now + Duration::seconds(AUTH_COOKIE_MAX_AGE_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
