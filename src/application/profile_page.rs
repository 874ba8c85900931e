use std::sync::Arc;

use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;
use crate::infrastructure::UserClient;

use super::navigation::{Outcome, Route};
use super::session_store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub role: Option<String>,
    /// Set when the refresh from the user service failed; the cached
    /// identity is still shown.
    pub error: Option<String>,
}

pub struct ProfilePage<S> {
    users: UserClient,
    session: SessionStore<S>,
}

impl<S: KeyValueStore> ProfilePage<S> {
    pub fn new(users: UserClient, store: Arc<S>) -> Self {
        Self {
            users,
            session: SessionStore::new(store),
        }
    }

    pub async fn load(&self) -> Result<Outcome<Profile>, ClientError> {
        let session = self.session.current()?;
        let (Some(user_id), Some(username)) = (session.user_id.clone(), session.username.clone())
        else {
            return Ok(Outcome::Redirect(Route::Login));
        };

        let mut profile = Profile {
            user_id,
            username,
            role: session.role.clone(),
            error: None,
        };

        let result = self.users.get_profile(&profile.user_id, session.bearer()).await;
        match self.session.guard(result) {
            Ok(Outcome::Done(user)) => {
                log::debug!("profile loaded for {}", user.id);
                profile.user_id = user.id;
                profile.username = user.username;
                if user.role.is_some() {
                    profile.role = user.role;
                }
            }
            Ok(Outcome::Redirect(route)) => return Ok(Outcome::Redirect(route)),
            Err(e) => {
                log::error!("Profile loading error: {}", e);
                profile.error = Some("Failed to load profile data".to_string());
            }
        }
        Ok(Outcome::Done(profile))
    }

    pub fn logout(&self) -> Result<Route, ClientError> {
        self.session.clear()?;
        log::info!("signed out");
        Ok(Route::Login)
    }
}
