//! Storage interface for user records.

use async_trait::async_trait;

use common::AppResult;
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Each call is atomic on its own; callers get no transaction across calls.
/// `create` is insert-if-absent, which closes the race between the service's
/// existence check and the write.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// List all users, ordered by ID
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a new user. Fails with `AlreadyExists` if the ID is taken.
    async fn create(&self, user: User) -> AppResult<()>;

    /// Overwrite the user with the same ID. Fails with `NotFound` if absent.
    async fn update(&self, user: User) -> AppResult<()>;

    /// Remove user by ID. Fails with `NotFound` if absent.
    async fn delete(&self, id: &str) -> AppResult<()>;
}
