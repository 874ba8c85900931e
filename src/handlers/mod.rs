pub mod account;
pub mod admin;
pub mod cli;
pub mod shop;

use std::sync::Arc;

use crate::application::{Outcome, Route};
use crate::domain::ports::KeyValueStore;
use crate::errors::ClientError;
use crate::Backends;

use cli::Command;

/// What a command produced: text for the terminal and whether it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub failed: bool,
}

impl Response {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: false,
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failed: true,
        }
    }

    pub fn redirect(route: Route) -> Self {
        Self::ok(format!("→ {}\n", route.path()))
    }

    pub(crate) fn from_outcome<T>(outcome: Outcome<T>, render: impl FnOnce(T) -> Response) -> Self {
        match outcome {
            Outcome::Done(value) => render(value),
            Outcome::Redirect(route) => Self::redirect(route),
        }
    }
}

/// Wraps an error with the prefix the page shows for the failed action.
pub(crate) fn failure(action: &str) -> impl FnOnce(ClientError) -> ClientError + '_ {
    move |e| match e {
        ClientError::Unauthorized { .. } => e,
        other => ClientError::Rejected(format!("{}: {}", action, other)),
    }
}

pub async fn dispatch<S: KeyValueStore>(
    command: Command,
    backends: &Backends,
    store: Arc<S>,
) -> Result<Response, ClientError> {
    match command {
        Command::Products(args) => shop::list_products(backends, store, &args).await,
        Command::Product { id } => shop::show_product(backends, &id).await,
        Command::Cart { action } => shop::cart(backends, store, action).await,
        Command::Checkout { user_id } => shop::checkout(backends, store, user_id.as_deref()).await,
        Command::Orders { user_id } => shop::list_orders(backends, store, user_id.as_deref()).await,
        Command::Order { id } => shop::show_order(backends, store, &id).await,
        Command::OrderStatus { id, status } => {
            shop::update_order_status(backends, store, &id, status.into()).await
        }
        Command::Login { username, password } => {
            account::login(backends, store, &username, &password).await
        }
        Command::Register {
            username,
            password,
            confirm_password,
        } => account::register(backends, store, username, password, confirm_password).await,
        Command::Profile => account::profile(backends, store).await,
        Command::Logout => account::logout(backends, store),
        Command::Admin { action } => admin::run(backends, store, action).await,
    }
}
