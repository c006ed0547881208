pub mod domain;
pub mod forms;
pub mod media;
pub mod models;
pub mod money;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod slug;

/// Role required to manage the catalog.
pub const SERVICE_ACCESS_ROLE: &str = "admin";

/// Runtime settings shared with request handlers.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Directory uploaded item images are written to and served from.
    pub media_root: std::path::PathBuf,
}
