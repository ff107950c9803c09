//! gRPC layer - adapts the service onto the generated tonic server trait.

mod convert;
mod user_grpc;

pub use convert::{fields_from_proto, user_to_proto};
pub use user_grpc::UserGrpcService;
