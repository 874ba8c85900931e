pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod render;

use reqwest::Client;

pub use config::Config;
pub use errors::ClientError;
pub use infrastructure::{
    AdminClient, CatalogClient, FileStore, MemoryStore, OrderClient, UserClient,
};

/// One typed client per backend service, sharing a connection pool.
#[derive(Debug, Clone)]
pub struct Backends {
    pub catalog: CatalogClient,
    pub admin: AdminClient,
    pub users: UserClient,
    pub orders: OrderClient,
}

/// Build the service clients described by `config`.
///
/// Requests carry no timeout and are never retried.
pub fn build_backends(config: &Config) -> Backends {
    let http = Client::new();
    Backends {
        catalog: CatalogClient::new(http.clone(), config.catalog_url.clone()),
        admin: AdminClient::new(http.clone(), config.admin_url.clone()),
        users: UserClient::new(http.clone(), config.users_url.clone()),
        orders: OrderClient::new(http, config.orders_url.clone()),
    }
}
