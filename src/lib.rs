//! blog-users
//!
//! REST API for managing the blog platform's user accounts: paginated and
//! sorted listing, lookup by id, create, update, and delete. Handlers are
//! stateless adapters over the `services::UserService` collaborator.

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;
