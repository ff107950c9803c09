//! Service layer - user use cases on top of the storage interface.

mod clock;
mod user_service;

pub use clock::{Clock, SystemClock};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::MockClock;
