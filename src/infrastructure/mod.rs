pub mod admin_client;
pub mod catalog_client;
pub mod file_store;
mod http;
pub mod memory_store;
pub mod models;
pub mod order_client;
pub mod user_client;

pub use admin_client::AdminClient;
pub use catalog_client::CatalogClient;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use order_client::OrderClient;
pub use user_client::UserClient;
