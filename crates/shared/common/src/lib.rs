//! Common utilities shared by the user service and its client.
//!
//! This crate provides:
//! - Unified error handling mapped onto gRPC status codes
//! - Fallible timestamp conversion between storage and wire
//! - Configuration structures

pub mod config;
pub mod error;
pub mod timestamp;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use timestamp::{from_proto_timestamp, to_proto_timestamp};
