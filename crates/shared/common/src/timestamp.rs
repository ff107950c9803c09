//! Timestamp conversion between storage (`chrono`) and wire (`prost_types`).
//!
//! The protobuf `Timestamp` only covers 0001-01-01 through 9999-12-31 and
//! has no leap seconds, so both directions are fallible.

use chrono::{DateTime, Utc};
use prost_types::Timestamp;

use domain::{MAX_WIRE_TIMESTAMP_SECONDS, MIN_WIRE_TIMESTAMP_SECONDS, NANOS_PER_SECOND};

use crate::error::{AppError, AppResult};

/// Convert a storage time into a wire timestamp.
pub fn to_proto_timestamp(dt: DateTime<Utc>) -> AppResult<Timestamp> {
    let seconds = dt.timestamp();
    if !(MIN_WIRE_TIMESTAMP_SECONDS..=MAX_WIRE_TIMESTAMP_SECONDS).contains(&seconds) {
        return Err(AppError::conversion(format!(
            "{} is outside the protobuf Timestamp range",
            dt.to_rfc3339()
        )));
    }

    // chrono encodes a leap second as nanos >= 1s
    let nanos = i32::try_from(dt.timestamp_subsec_nanos())
        .ok()
        .filter(|n| *n < NANOS_PER_SECOND)
        .ok_or_else(|| {
            AppError::conversion(format!("{} is a leap second", dt.to_rfc3339()))
        })?;

    Ok(Timestamp { seconds, nanos })
}

/// Convert a wire timestamp into a storage time.
pub fn from_proto_timestamp(ts: &Timestamp) -> AppResult<DateTime<Utc>> {
    if !(MIN_WIRE_TIMESTAMP_SECONDS..=MAX_WIRE_TIMESTAMP_SECONDS).contains(&ts.seconds) {
        return Err(AppError::conversion(format!(
            "{}s is outside the protobuf Timestamp range",
            ts.seconds
        )));
    }
    if !(0..NANOS_PER_SECOND).contains(&ts.nanos) {
        return Err(AppError::conversion(format!(
            "nanos {} must be within 0..{}",
            ts.nanos, NANOS_PER_SECOND
        )));
    }

    DateTime::from_timestamp(ts.seconds, ts.nanos as u32)
        .ok_or_else(|| AppError::conversion(format!("invalid timestamp {}s", ts.seconds)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn converts_in_range_time() {
        let dt = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_000)
            .unwrap();

        let ts = to_proto_timestamp(dt).unwrap();

        assert_eq!(ts.seconds, dt.timestamp());
        assert_eq!(ts.nanos, 123_456_000);
        assert_eq!(from_proto_timestamp(&ts).unwrap(), dt);
    }

    #[test]
    fn accepts_range_edges() {
        let min = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        let max = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();

        assert_eq!(to_proto_timestamp(min).unwrap().seconds, MIN_WIRE_TIMESTAMP_SECONDS);
        assert_eq!(to_proto_timestamp(max).unwrap().seconds, MAX_WIRE_TIMESTAMP_SECONDS);
    }

    #[test]
    fn rejects_time_after_year_9999() {
        let dt = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();

        let err = to_proto_timestamp(dt).unwrap_err();
        assert!(matches!(err, AppError::Conversion(_)));
    }

    #[test]
    fn rejects_time_before_year_1() {
        let dt = Utc.with_ymd_and_hms(0, 12, 31, 23, 59, 59).unwrap();

        assert!(matches!(to_proto_timestamp(dt), Err(AppError::Conversion(_))));
    }

    #[test]
    fn rejects_leap_second() {
        let dt = Utc
            .with_ymd_and_hms(2016, 12, 31, 23, 59, 59)
            .unwrap()
            .with_nanosecond(1_500_000_000)
            .unwrap();

        assert!(matches!(to_proto_timestamp(dt), Err(AppError::Conversion(_))));
    }

    #[test]
    fn rejects_malformed_wire_timestamps() {
        let negative_nanos = Timestamp { seconds: 0, nanos: -1 };
        let too_late = Timestamp {
            seconds: MAX_WIRE_TIMESTAMP_SECONDS + 1,
            nanos: 0,
        };

        assert!(matches!(
            from_proto_timestamp(&negative_nanos),
            Err(AppError::Conversion(_))
        ));
        assert!(matches!(
            from_proto_timestamp(&too_late),
            Err(AppError::Conversion(_))
        ));
    }
}
