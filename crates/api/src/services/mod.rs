//! Application services used by route handlers.

pub mod admin_bootstrap;
pub mod auth;
pub mod cache;
pub mod export;
pub mod storage;

#[allow(unused_imports)] // Used in routes
pub use auth::AuthService;
#[allow(unused_imports)] // Shared through application state
pub use cache::{CacheKey, ResponseCache};
#[allow(unused_imports)] // Used in routes
pub use storage::StorageService;
