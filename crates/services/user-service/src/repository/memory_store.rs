//! In-memory user repository.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::User;

use super::UserRepository;

/// Process-local repository backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn create(&self, user: User) -> AppResult<()> {
        match self.users.write().await.entry(user.id.clone()) {
            Entry::Occupied(_) => Err(AppError::user_exists(&user.id)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn update(&self, user: User) -> AppResult<()> {
        match self.users.write().await.get_mut(&user.id) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(AppError::NotFound),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserFields;
    use tokio_test::{assert_err, assert_ok};

    fn user(id: &str, username: &str) -> User {
        User::create(
            UserFields {
                id: id.to_string(),
                username: username.to_string(),
                email: format!("{}@x.com", username),
                state: 1,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn create_is_insert_if_absent() {
        let store = MemoryUserStore::new();
        assert_ok!(store.create(user("1", "alice")).await);

        let err = store.create(user("1", "mallory")).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let stored = store.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(stored.username, "alice");
    }

    #[tokio::test]
    async fn concurrent_creates_admit_exactly_one() {
        let store = std::sync::Arc::new(MemoryUserStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(user("dup", &format!("u{}", i))).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_record() {
        let store = MemoryUserStore::new();

        assert!(matches!(
            store.update(user("9", "ghost")).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(store.delete("9").await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn update_overwrites_record() {
        let store = MemoryUserStore::new();
        assert_ok!(store.create(user("1", "alice")).await);

        assert_ok!(store.update(user("1", "alice2")).await);

        let stored = store.find_by_id("1").await.unwrap().unwrap();
        assert_eq!(stored.username, "alice2");
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemoryUserStore::new();
        assert_ok!(store.create(user("1", "alice")).await);

        assert_ok!(store.delete("1").await);

        assert_eq!(store.find_by_id("1").await.unwrap(), None);
        assert_err!(store.delete("1").await);
    }

    #[tokio::test]
    async fn list_is_sorted_by_id() {
        let store = MemoryUserStore::new();
        assert!(store.list().await.unwrap().is_empty());

        for (id, name) in [("3", "carol"), ("1", "alice"), ("2", "bob")] {
            assert_ok!(store.create(user(id, name)).await);
        }

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
