//! Contract required from the user service collaborator.
//!
//! The handler layer consumes this trait and owns none of its semantics:
//! id assignment, ordering, and mutation all happen behind it.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewUser, PageRequest, UpdateUser, User};

/// Service collaborator owning user persistence and business logic.
///
/// Injected into `AppState` as `Arc<dyn UserService>` at construction time.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Returns one page of users, sorted ascending by the page's sort key.
    async fn find_all(&self, page: &PageRequest) -> AppResult<Vec<User>>;

    /// Returns the user with the given id, or `None` when absent.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Creates a user and assigns its id.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Applies a partial changeset to an existing user.
    ///
    /// Fails with `AppError::NotFound` when the id matches nothing.
    async fn update(&self, id: i64, changes: UpdateUser) -> AppResult<User>;

    /// Deletes the user with the given id. Succeeds whether or not the id
    /// existed; callers observe delete as idempotent.
    async fn delete(&self, id: i64) -> AppResult<()>;
}
