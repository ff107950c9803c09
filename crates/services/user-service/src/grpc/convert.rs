//! Conversion between domain users and wire users.

use common::{to_proto_timestamp, AppResult};
use domain::{User, UserFields};
use proto::user::User as ProtoUser;

/// Convert domain User to wire User. Fails if either timestamp cannot be
/// represented on the wire.
pub fn user_to_proto(user: &User) -> AppResult<ProtoUser> {
    Ok(ProtoUser {
        id: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        state: user.state,
        created_at: Some(to_proto_timestamp(user.created_at)?),
        updated_at: Some(to_proto_timestamp(user.updated_at)?),
    })
}

/// Take the caller-owned fields from a wire User; timestamps are dropped.
pub fn fields_from_proto(user: ProtoUser) -> UserFields {
    UserFields {
        id: user.id,
        username: user.username,
        email: user.email,
        state: user.state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::AppError;
    use proto::user::UserState;
    use proto::Timestamp;

    fn user() -> User {
        User::create(
            UserFields {
                id: "1".to_string(),
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                state: UserState::Active as i32,
            },
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn user_to_proto_copies_fields_and_timestamps() {
        let user = user();
        let proto = user_to_proto(&user).unwrap();

        assert_eq!(proto.id, "1");
        assert_eq!(proto.username, "alice");
        assert_eq!(proto.state(), UserState::Active);
        assert_eq!(proto.created_at.unwrap().seconds, user.created_at.timestamp());
        assert_eq!(proto.updated_at, proto.created_at);
    }

    #[test]
    fn user_to_proto_fails_on_unrepresentable_timestamp() {
        let mut user = user();
        user.updated_at = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();

        assert!(matches!(user_to_proto(&user), Err(AppError::Conversion(_))));
    }

    #[test]
    fn fields_from_proto_ignores_wire_timestamps() {
        let proto = ProtoUser {
            id: "7".to_string(),
            username: "eve".to_string(),
            email: "e@x.com".to_string(),
            state: 42,
            created_at: Some(Timestamp { seconds: 1, nanos: 0 }),
            updated_at: None,
        };

        let fields = fields_from_proto(proto);

        assert_eq!(fields.id, "7");
        assert_eq!(fields.state, 42);
    }
}
