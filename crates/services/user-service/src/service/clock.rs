//! Source of "now" for timestamp stamping.

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Clock trait so tests can pin time.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
