//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The wire representation lives in the proto crate; conversion happens in
//! the user service.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::{User, UserFields};
