use std::sync::Arc;

use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;
use crate::infrastructure::UserClient;

use super::navigation::{Outcome, Route};
use super::session_store::SessionStore;

pub struct LoginPage<S> {
    users: UserClient,
    session: SessionStore<S>,
}

impl<S: KeyValueStore> LoginPage<S> {
    pub fn new(users: UserClient, store: Arc<S>) -> Self {
        Self {
            users,
            session: SessionStore::new(store),
        }
    }

    /// Signed-in users skip the form.
    pub fn open(&self) -> Result<Outcome<()>, ClientError> {
        if self.session.is_authenticated()? {
            return Ok(Outcome::Redirect(Route::Profile));
        }
        Ok(Outcome::Done(()))
    }

    pub async fn submit(&self, username: &str, password: &str) -> Result<Route, ClientError> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Fill all fields".to_string()));
        }

        let auth = match self.users.login(username, password).await {
            Ok(auth) => auth,
            Err(e @ ClientError::Http { .. }) => {
                log::warn!("login failed for {}: {}", username, e);
                let message = e
                    .server_error()
                    .unwrap_or("Invalid username or password")
                    .to_string();
                return Err(ClientError::Rejected(message));
            }
            Err(e) => return Err(e),
        };

        self.session.save(&auth)?;
        Ok(Route::Profile)
    }
}
