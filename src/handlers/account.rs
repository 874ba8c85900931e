use std::sync::Arc;

use crate::application::{LoginPage, Outcome, ProfilePage, RegisterPage, RegistrationForm};
use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;
use crate::{render, Backends};

use super::Response;

pub async fn login<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    username: &str,
    password: &str,
) -> Result<Response, ClientError> {
    let page = LoginPage::new(backends.users.clone(), store);
    if let Outcome::Redirect(route) = page.open()? {
        return Ok(Response::redirect(route));
    }
    let route = page.submit(username, password).await?;
    Ok(Response::redirect(route))
}

pub async fn register<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    username: String,
    password: String,
    confirm_password: String,
) -> Result<Response, ClientError> {
    let page = RegisterPage::new(backends.users.clone(), store);
    if let Outcome::Redirect(route) = page.open()? {
        return Ok(Response::redirect(route));
    }
    let form = RegistrationForm {
        username,
        password,
        confirm_password,
    };
    let route = page.submit(&form).await?;
    Ok(Response::redirect(route))
}

pub async fn profile<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
) -> Result<Response, ClientError> {
    let page = ProfilePage::new(backends.users.clone(), store);
    let outcome = page.load().await?;
    Ok(Response::from_outcome(outcome, |profile| {
        let text = render::profile(&profile);
        if profile.error.is_some() {
            Response::failed(text)
        } else {
            Response::ok(text)
        }
    }))
}

pub fn logout<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
) -> Result<Response, ClientError> {
    let page = ProfilePage::new(backends.users.clone(), store);
    Ok(Response::redirect(page.logout()?))
}
