//! Application state shared across request handlers.

use std::sync::Arc;

use crate::services::UserService;

/// Shared state for axum's `State` extractor.
///
/// Holds the user service collaborator behind a trait object; handlers stay
/// agnostic of which binding backs it. Cloning is cheap (`Arc`).
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
}

impl AppState {
    /// Creates the state with an explicitly injected service collaborator.
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}
