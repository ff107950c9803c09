//! Unified error handling for the user service and its client.
//!
//! Provides a single error type that converts to and from tonic gRPC
//! status codes.

use thiserror::Error;
use tonic::Status;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    AlreadyExists(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Timestamp conversion between storage and wire
    #[error("Timestamp conversion failed: {0}")]
    Conversion(String),

    // Storage errors
    /// Failure reported by a non-SQL repository backend.
    #[error("Storage error: {0}")]
    Storage(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // gRPC specific
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("gRPC error: {0}")]
    Grpc(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Conversion(_) => "CONVERSION_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::DeadlineExceeded => "DEADLINE_EXCEEDED",
            AppError::Grpc(_) => "GRPC_ERROR",
        }
    }

    /// Get user-facing message (hides storage internals)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::AlreadyExists(msg) => {
                // Avoid duplicating "already exists" when converted from gRPC
                if msg.ends_with("already exists") {
                    msg.clone()
                } else {
                    format!("{} already exists", msg)
                }
            }
            AppError::Conversion(msg) => {
                tracing::error!("Conversion error: {}", msg);
                self.to_string()
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                "A storage error occurred".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A storage error occurred".to_string()
            }
            AppError::ServiceUnavailable(service) => {
                tracing::error!("Service unavailable: {}", service);
                format!("Service {} is unavailable", service)
            }
            AppError::Grpc(msg) => msg.clone(),
            _ => self.to_string(),
        }
    }

    /// Whether this error is a failed precondition rather than a fault.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::NotFound | AppError::AlreadyExists(_) | AppError::Validation(_)
        )
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::NotFound => tonic::Code::NotFound,
            AppError::AlreadyExists(_) => tonic::Code::AlreadyExists,
            AppError::Validation(_) => tonic::Code::InvalidArgument,
            AppError::ServiceUnavailable(_) => tonic::Code::Unavailable,
            AppError::DeadlineExceeded => tonic::Code::DeadlineExceeded,
            _ => tonic::Code::Internal,
        };

        Status::new(code, err.user_message())
    }
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        match status.code() {
            tonic::Code::NotFound => AppError::NotFound,
            tonic::Code::AlreadyExists => AppError::AlreadyExists(status.message().to_string()),
            tonic::Code::InvalidArgument => AppError::Validation(status.message().to_string()),
            tonic::Code::Unavailable => AppError::ServiceUnavailable(status.message().to_string()),
            tonic::Code::DeadlineExceeded => AppError::DeadlineExceeded,
            _ => AppError::Grpc(status.message().to_string()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    /// Duplicate-id error for the given user id.
    pub fn user_exists(id: &str) -> Self {
        AppError::AlreadyExists(format!("User {}", id))
    }

    pub fn already_exists(entity: impl Into<String>) -> Self {
        AppError::AlreadyExists(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        AppError::Conversion(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn grpc(msg: impl Into<String>) -> Self {
        AppError::Grpc(msg.into())
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        AppError::ServiceUnavailable(service.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_onto_grpc_codes() {
        assert_eq!(Status::from(AppError::NotFound).code(), tonic::Code::NotFound);
        assert_eq!(
            Status::from(AppError::already_exists("User 1")).code(),
            tonic::Code::AlreadyExists
        );
        assert_eq!(
            Status::from(AppError::validation("id is required")).code(),
            tonic::Code::InvalidArgument
        );
        assert_eq!(
            Status::from(AppError::conversion("out of range")).code(),
            tonic::Code::Internal
        );
        assert_eq!(
            Status::from(AppError::storage("backend unreachable")).code(),
            tonic::Code::Internal
        );
    }

    #[test]
    fn storage_details_are_hidden() {
        let status = Status::from(AppError::storage("disk on fire"));
        assert_eq!(status.message(), "A storage error occurred");
    }

    #[test]
    fn conversion_message_is_kept() {
        let status = Status::from(AppError::conversion("created_at out of range"));
        assert!(status.message().contains("created_at out of range"));
    }

    #[test]
    fn already_exists_round_trips_without_duplicate_suffix() {
        let status = Status::from(AppError::already_exists("User 1"));
        assert_eq!(status.message(), "User 1 already exists");

        let back = AppError::from(status);
        assert!(matches!(back, AppError::AlreadyExists(_)));
        assert_eq!(back.user_message(), "User 1 already exists");
    }

    #[test]
    fn status_maps_back_to_app_error() {
        assert!(matches!(
            AppError::from(Status::not_found("gone")),
            AppError::NotFound
        ));
        assert!(matches!(
            AppError::from(Status::deadline_exceeded("slow")),
            AppError::DeadlineExceeded
        ));
        assert!(matches!(
            AppError::from(Status::internal("boom")),
            AppError::Grpc(_)
        ));
    }

    #[test]
    fn option_ext_maps_none_to_not_found() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}
