//! User service - Handles user-related business logic.
//!
//! Holds no state of its own between calls: storage and clock are injected.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, OptionExt};
use domain::{User, UserFields};

use super::clock::{Clock, SystemClock};
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a new user with a caller-chosen ID
    async fn create_user(&self, fields: UserFields) -> AppResult<User>;

    /// Replace an existing user's fields
    async fn update_user(&self, fields: UserFields) -> AppResult<User>;

    /// Delete an existing user
    async fn delete_user(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    /// Create a service that reads time from the given clock
    pub fn with_clock(repo: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn require_id(id: &str) -> AppResult<()> {
    if id.is_empty() {
        return Err(AppError::validation("id is required"));
    }
    Ok(())
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: &str) -> AppResult<User> {
        require_id(id)?;
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn create_user(&self, fields: UserFields) -> AppResult<User> {
        require_id(&fields.id)?;

        if self.repo.find_by_id(&fields.id).await?.is_some() {
            return Err(AppError::user_exists(&fields.id));
        }

        // Storage re-checks atomically; a concurrent create loses there
        let user = User::create(fields, self.clock.now());
        self.repo.create(user.clone()).await?;
        Ok(user)
    }

    async fn update_user(&self, fields: UserFields) -> AppResult<User> {
        require_id(&fields.id)?;

        let existing = self.repo.find_by_id(&fields.id).await?.ok_or_not_found()?;

        let user = existing
            .updated(fields, self.clock.now())
            .ok_or_else(|| {
                AppError::conversion("updated_at cannot advance past the end of the time range")
            })?;
        self.repo.update(user.clone()).await?;
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        require_id(id)?;

        self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.repo.delete(id).await
    }
}
