//! gRPC client for the user service.

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{from_proto_timestamp, AppError, AppResult, GrpcClientConfig};
use domain::{User, UserFields};
use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, CreateUserRequest,
    DeleteUserRequest, GetUserRequest, ListUserRequest, UpdateUserRequest, User as ProtoUser,
    UserState,
};

/// gRPC client wrapper for the user service.
#[derive(Clone)]
pub struct UserClient {
    client: ProtoUserServiceClient<Channel>,
}

impl UserClient {
    /// Connect to the user service with the configured timeouts.
    pub async fn connect(config: &GrpcClientConfig) -> AppResult<Self> {
        debug!("Connecting to user service at {}", config.endpoint);

        let channel = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| AppError::validation(format!("invalid endpoint: {}", e)))?
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .connect()
            .await
            .map_err(|e| {
                debug!("Connection failed: {}", e);
                AppError::service_unavailable(config.endpoint.clone())
            })?;

        Ok(Self::from_channel(channel))
    }

    /// Wrap an already established channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            client: ProtoUserServiceClient::new(channel),
        }
    }

    /// Get user by ID.
    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        let request = tonic::Request::new(GetUserRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.get(request).await.map_err(AppError::from)?;
        let user = response
            .into_inner()
            .user
            .ok_or_else(|| AppError::grpc("response carried no user"))?;
        proto_to_user(user)
    }

    /// List all users.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let request = tonic::Request::new(ListUserRequest {});

        let mut client = self.client.clone();
        let response = client.list(request).await.map_err(AppError::from)?;

        response.into_inner().user.into_iter().map(proto_to_user).collect()
    }

    /// Create user; returns the result marker.
    pub async fn create_user(&self, fields: UserFields) -> AppResult<String> {
        let request = tonic::Request::new(CreateUserRequest {
            user: Some(fields_to_proto(fields)),
        });

        let mut client = self.client.clone();
        let response = client.create(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().result)
    }

    /// Update user; returns the result marker.
    pub async fn update_user(&self, fields: UserFields) -> AppResult<String> {
        let request = tonic::Request::new(UpdateUserRequest {
            user: Some(fields_to_proto(fields)),
        });

        let mut client = self.client.clone();
        let response = client.update(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().result)
    }

    /// Delete user; returns the result marker.
    pub async fn delete_user(&self, id: &str) -> AppResult<String> {
        let request = tonic::Request::new(DeleteUserRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.delete(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().result)
    }
}

/// Convert wire User to domain User. Both timestamps must be present and
/// in range.
pub fn proto_to_user(proto: ProtoUser) -> AppResult<User> {
    let created_at = proto
        .created_at
        .as_ref()
        .ok_or_else(|| AppError::conversion("missing created_at from user service"))
        .and_then(from_proto_timestamp)?;

    let updated_at = proto
        .updated_at
        .as_ref()
        .ok_or_else(|| AppError::conversion("missing updated_at from user service"))
        .and_then(from_proto_timestamp)?;

    Ok(User {
        id: proto.id,
        username: proto.username,
        email: proto.email,
        state: proto.state,
        created_at,
        updated_at,
    })
}

fn fields_to_proto(fields: UserFields) -> ProtoUser {
    ProtoUser {
        id: fields.id,
        username: fields.username,
        email: fields.email,
        state: fields.state,
        created_at: None,
        updated_at: None,
    }
}

/// Parse a state given as a number or a name ("active", "USER_STATE_ACTIVE").
pub fn parse_state(s: &str) -> Result<i32, String> {
    if let Ok(n) = s.parse::<i32>() {
        return Ok(n);
    }

    let upper = s.trim().to_ascii_uppercase();
    let name = if upper.starts_with("USER_STATE_") {
        upper
    } else {
        format!("USER_STATE_{}", upper)
    };

    UserState::from_str_name(&name)
        .map(|state| state as i32)
        .ok_or_else(|| format!("unknown user state '{}'", s))
}

/// Short display name for a state code; unnamed codes print as numbers.
pub fn state_name(state: i32) -> String {
    match UserState::try_from(state) {
        Ok(named) => named
            .as_str_name()
            .trim_start_matches("USER_STATE_")
            .to_ascii_lowercase(),
        Err(_) => state.to_string(),
    }
}
