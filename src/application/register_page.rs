use std::sync::Arc;

use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;
use crate::infrastructure::UserClient;

use super::navigation::{Outcome, Route};
use super::session_store::SessionStore;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.is_empty() || self.password.is_empty() || self.confirm_password.is_empty()
        {
            return Err(ClientError::Validation("Fill all fields".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords are not same".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

pub struct RegisterPage<S> {
    users: UserClient,
    session: SessionStore<S>,
}

impl<S: KeyValueStore> RegisterPage<S> {
    pub fn new(users: UserClient, store: Arc<S>) -> Self {
        Self {
            users,
            session: SessionStore::new(store),
        }
    }

    pub fn open(&self) -> Result<Outcome<()>, ClientError> {
        if self.session.is_authenticated()? {
            return Ok(Outcome::Redirect(Route::Profile));
        }
        Ok(Outcome::Done(()))
    }

    pub async fn submit(&self, form: &RegistrationForm) -> Result<Route, ClientError> {
        form.validate()?;

        let auth = match self.users.register(&form.username, &form.password).await {
            Ok(auth) => auth,
            Err(e @ ClientError::Http { .. }) => {
                log::warn!("registration failed for {}: {}", form.username, e);
                let message = match (e.status(), e.server_error()) {
                    (_, Some(error)) => error.to_string(),
                    (Some(409), None) => "Username already exists".to_string(),
                    (status, None) => {
                        format!("Registration failed ({})", status.unwrap_or_default())
                    }
                };
                return Err(ClientError::Rejected(message));
            }
            Err(e) => return Err(e),
        };

        self.session.save(&auth)?;
        Ok(Route::Profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn empty_field_is_rejected_first() {
        let err = form("", "abc", "xyz").validate().unwrap_err();
        assert_eq!(err.to_string(), "Fill all fields");
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let err = form("bob", "secret1", "secret2").validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords are not same");
    }

    #[test]
    fn short_password_is_rejected() {
        let err = form("bob", "abc", "abc").validate().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");
    }

    #[test]
    fn valid_form_passes() {
        assert!(form("bob", "secret", "secret").validate().is_ok());
    }
}
