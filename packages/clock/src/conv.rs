//! Conversions between timestamps and datetimes.
use chrono::{DateTime, Utc};
use roomtracker_primitives::DurationSinceUnixEpoch;

/// Converts a timestamp into a UTC datetime, for human-readable log output.
///
/// # Panics
///
/// Panics if the timestamp does not fit into a `chrono` datetime.
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> DateTime<Utc> {
    #[allow(clippy::cast_possible_wrap)]
    DateTime::from_timestamp(duration.as_secs() as i64, duration.subsec_nanos())
        .expect("the timestamp should be in the valid chrono range")
}

#[cfg(test)]
mod tests {
    use roomtracker_primitives::DurationSinceUnixEpoch;

    use crate::conv::convert_from_timestamp_to_datetime_utc;

    #[test]
    fn it_should_convert_the_unix_epoch() {
        let datetime = convert_from_timestamp_to_datetime_utc(DurationSinceUnixEpoch::ZERO);

        assert_eq!(datetime.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }
}
