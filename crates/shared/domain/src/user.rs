//! User domain entity and related types.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// User domain entity, as persisted by storage.
///
/// `state` is an opaque status code owned by the caller. It is stored and
/// returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub state: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for create and update. Timestamps are never
/// accepted from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserFields {
    pub id: String,
    pub username: String,
    pub email: String,
    pub state: i32,
}

impl User {
    /// Build a freshly created user; both timestamps are `now` at
    /// microsecond precision, the finest the SQL store keeps.
    pub fn create(fields: UserFields, now: DateTime<Utc>) -> Self {
        let now = now.trunc_subsecs(6);
        Self {
            id: fields.id,
            username: fields.username,
            email: fields.email,
            state: fields.state,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields, keeping `created_at` and advancing
    /// `updated_at`. `None` when `updated_at` has nowhere left to go.
    pub fn updated(&self, fields: UserFields, now: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            id: fields.id,
            username: fields.username,
            email: fields.email,
            state: fields.state,
            created_at: self.created_at,
            updated_at: self.next_update_stamp(now)?,
        })
    }

    /// Timestamp for the next update, at microsecond precision. Always
    /// after the current `updated_at`, even if the clock reads behind it or
    /// within the same microsecond. `None` at the end of chrono's range.
    pub fn next_update_stamp(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let now = now.trunc_subsecs(6);
        if now > self.updated_at {
            Some(now)
        } else {
            self.updated_at.checked_add_signed(Duration::microseconds(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fields(username: &str) -> UserFields {
        UserFields {
            id: "1".to_string(),
            username: username.to_string(),
            email: "a@x.com".to_string(),
            state: 1,
        }
    }

    #[test]
    fn create_sets_both_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let user = User::create(fields("alice"), now);

        assert_eq!(user.created_at, now);
        assert_eq!(user.updated_at, now);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn updated_preserves_created_at() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
        let user = User::create(fields("alice"), created);

        let next = user.updated(fields("alice2"), later).unwrap();

        assert_eq!(next.created_at, created);
        assert_eq!(next.updated_at, later);
        assert_eq!(next.username, "alice2");
    }

    #[test]
    fn update_stamp_moves_forward_when_clock_lags() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap();
        let user = User::create(fields("alice"), created);

        assert_eq!(
            user.next_update_stamp(created),
            Some(created + Duration::microseconds(1))
        );
        assert!(user.next_update_stamp(earlier).unwrap() > user.updated_at);
    }

    #[test]
    fn create_drops_sub_microsecond_digits() {
        let now = Utc.timestamp_opt(1_714_564_800, 1_400).unwrap();
        let user = User::create(fields("alice"), now);

        assert_eq!(user.created_at.timestamp_subsec_nanos(), 1_000);
        assert_eq!(user.updated_at, user.created_at);
    }

    #[test]
    fn update_stamp_advances_within_the_same_microsecond() {
        let stored = Utc.timestamp_opt(1_714_564_800, 1_000).unwrap();
        let now = Utc.timestamp_opt(1_714_564_800, 1_400).unwrap();
        let user = User::create(fields("alice"), stored);

        let next = user.next_update_stamp(now).unwrap();

        // What a microsecond-precision column would read back
        assert!(next.trunc_subsecs(6) > stored);
        assert_eq!(next, stored + Duration::microseconds(1));
    }

    #[test]
    fn update_stamp_is_none_at_end_of_range() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut user = User::create(fields("alice"), created);
        user.updated_at = DateTime::<Utc>::MAX_UTC;

        assert_eq!(user.next_update_stamp(DateTime::<Utc>::MAX_UTC), None);
        assert_eq!(user.updated(fields("alice2"), Utc::now()), None);
    }
}
