//! Domain-level constants.

// =============================================================================
// Wire limits
// =============================================================================

/// Earliest instant a protobuf `Timestamp` may carry (0001-01-01T00:00:00Z).
pub const MIN_WIRE_TIMESTAMP_SECONDS: i64 = -62_135_596_800;

/// Latest whole second a protobuf `Timestamp` may carry (9999-12-31T23:59:59Z).
pub const MAX_WIRE_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

/// Exclusive upper bound for the `nanos` part of a protobuf `Timestamp`.
pub const NANOS_PER_SECOND: i32 = 1_000_000_000;

// =============================================================================
// Responses
// =============================================================================

/// Result marker returned by successful write operations
pub const RESULT_OK: &str = "ok";

// =============================================================================
// Service defaults
// =============================================================================

/// Default bind host for the user service
pub const DEFAULT_SERVICE_HOST: &str = "0.0.0.0";

/// Default gRPC port for the user service
pub const DEFAULT_SERVICE_PORT: u16 = 8001;

/// Default per-request deadline enforced by the server
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
