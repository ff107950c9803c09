//! Repository layer - the storage interface and its backends.

pub mod entities;
mod memory_store;
mod user_repository;
mod user_store;

pub use memory_store::MemoryUserStore;
pub use user_repository::UserRepository;
pub use user_store::UserStore;

#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
