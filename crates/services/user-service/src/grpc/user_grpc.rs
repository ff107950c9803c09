//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{debug, info, instrument};

use super::convert::{fields_from_proto, user_to_proto};
use crate::service::UserService;
use common::{AppError, AppResult};
use domain::RESULT_OK;
use proto::user::{
    user_service_server::UserService as UserServiceProto, CreateUserRequest, CreateUserResponse,
    DeleteUserRequest, DeleteUserResponse, GetUserRequest, GetUserResponse, ListUserRequest,
    ListUserResponse, UpdateUserRequest, UpdateUserResponse, User as ProtoUser,
};

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    #[instrument(skip_all, fields(id = %request.get_ref().id))]
    async fn get(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let req = request.into_inner();

        let user = self.service.get_user(&req.id).await.map_err(to_status)?;
        let user = user_to_proto(&user).map_err(to_status)?;
        Ok(Response::new(GetUserResponse { user: Some(user) }))
    }

    #[instrument(skip_all)]
    async fn list(
        &self,
        _request: Request<ListUserRequest>,
    ) -> Result<Response<ListUserResponse>, Status> {
        let users = self.service.list_users().await.map_err(to_status)?;

        // One unconvertible record fails the whole listing
        let user = users
            .iter()
            .map(user_to_proto)
            .collect::<AppResult<Vec<ProtoUser>>>()
            .map_err(to_status)?;

        Ok(Response::new(ListUserResponse { user }))
    }

    #[instrument(skip_all, fields(id = request.get_ref().user.as_ref().map(|u| u.id.as_str())))]
    async fn create(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let req = request.into_inner();
        let fields = fields_from_proto(required_user(req.user)?);

        let user = self.service.create_user(fields).await.map_err(to_status)?;
        info!(id = %user.id, "user created");

        Ok(Response::new(CreateUserResponse {
            result: RESULT_OK.to_string(),
        }))
    }

    #[instrument(skip_all, fields(id = request.get_ref().user.as_ref().map(|u| u.id.as_str())))]
    async fn update(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let req = request.into_inner();
        let fields = fields_from_proto(required_user(req.user)?);

        let user = self.service.update_user(fields).await.map_err(to_status)?;
        info!(id = %user.id, "user updated");

        Ok(Response::new(UpdateUserResponse {
            result: RESULT_OK.to_string(),
        }))
    }

    #[instrument(skip_all, fields(id = %request.get_ref().id))]
    async fn delete(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();

        self.service.delete_user(&req.id).await.map_err(to_status)?;
        info!(id = %req.id, "user deleted");

        Ok(Response::new(DeleteUserResponse {
            result: RESULT_OK.to_string(),
        }))
    }
}

/// Unwrap the `user` message of a create/update request.
fn required_user(user: Option<ProtoUser>) -> Result<ProtoUser, Status> {
    user.ok_or_else(|| to_status(AppError::validation("user is required")))
}

/// Convert an AppError into a Status, logging precondition failures.
///
/// Faults are logged while building the status message.
fn to_status(err: AppError) -> Status {
    if err.is_precondition() {
        debug!(code = err.code(), "request rejected: {}", err);
    }
    Status::from(err)
}
