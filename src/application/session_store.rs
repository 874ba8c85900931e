use std::sync::Arc;

use chrono::Utc;

use crate::domain::ports::KeyValueStore;
use crate::domain::session::{AuthCookie, AuthResponse, Session};
use crate::errors::ClientError;

use super::navigation::{Outcome, Route};

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const USERNAME_KEY: &str = "username";
pub const USER_ROLE_KEY: &str = "userRole";
pub const AUTH_COOKIE_KEY: &str = "cookie.auth_token";

const SESSION_KEYS: [&str; 5] = [
    TOKEN_KEY,
    USER_ID_KEY,
    USERNAME_KEY,
    USER_ROLE_KEY,
    AUTH_COOKIE_KEY,
];

/// Session bookkeeping on top of the client's key/value storage.
pub struct SessionStore<S> {
    store: Arc<S>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn current(&self) -> Result<Session, ClientError> {
        Ok(Session {
            token: self.store.get(TOKEN_KEY)?,
            user_id: self.store.get(USER_ID_KEY)?,
            username: self.store.get(USERNAME_KEY)?,
            role: self.store.get(USER_ROLE_KEY)?,
        })
    }

    pub fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn is_authenticated(&self) -> Result<bool, ClientError> {
        Ok(self.token()?.is_some())
    }

    pub fn save(&self, auth: &AuthResponse) -> Result<(), ClientError> {
        let token = auth.token.trim();
        self.store.set(USER_ID_KEY, &auth.user.id)?;
        self.store.set(USERNAME_KEY, &auth.user.username)?;
        self.store.set(TOKEN_KEY, token)?;
        match auth.user.role.as_deref() {
            Some(role) => self.store.set(USER_ROLE_KEY, role)?,
            None => self.store.remove(USER_ROLE_KEY)?,
        }

        let cookie = AuthCookie::issue(token, Utc::now());
        self.store.set(AUTH_COOKIE_KEY, &serde_json::to_string(&cookie)?)?;
        log::info!("signed in as {}", auth.user.username);
        Ok(())
    }

    /// The `auth_token` cookie, unless it is missing, unreadable or expired.
    pub fn auth_cookie(&self) -> Result<Option<AuthCookie>, ClientError> {
        let Some(raw) = self.store.get(AUTH_COOKIE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<AuthCookie>(&raw) {
            Ok(cookie) if !cookie.is_expired(Utc::now()) => Ok(Some(cookie)),
            Ok(_) => Ok(None),
            Err(e) => {
                log::warn!("ignoring unreadable auth cookie: {}", e);
                Ok(None)
            }
        }
    }

    pub fn set_user_id(&self, user_id: &str) -> Result<(), ClientError> {
        self.store.set(USER_ID_KEY, user_id)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        for key in SESSION_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Applies the auth-failure rule to the result of an authenticated call:
    /// a 401/403 wipes the session and sends the user to the login page.
    pub fn guard<T>(&self, result: Result<T, ClientError>) -> Result<Outcome<T>, ClientError> {
        match result {
            Ok(value) => Ok(Outcome::Done(value)),
            Err(ClientError::Unauthorized { status }) => {
                log::warn!("session rejected with {}, signing out", status);
                self.clear()?;
                Ok(Outcome::Redirect(Route::Login))
            }
            Err(e) => Err(e),
        }
    }
}
