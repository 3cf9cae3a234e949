// src/converters/epoch.rs
use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EpochError {
    #[error("Timestamp out of range: {0}")]
    OutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, EpochError>;

#[derive(Debug, Clone, Serialize)]
pub struct EpochReport {
    pub millis: i64,
    pub seconds: i64,
    pub iso: String,
    pub utc: String,
    pub local: String,
    pub offset: String,
}

// Describe a millisecond timestamp in every form the converter shows
pub fn describe(millis: i64) -> Result<EpochReport> {
    let utc: DateTime<Utc> = Utc
        .timestamp_millis_opt(millis)
        .single()
        .ok_or(EpochError::OutOfRange(millis))?;
    let local = utc.with_timezone(&Local);

    Ok(EpochReport {
        millis,
        seconds: millis.div_euclid(1000),
        iso: utc.to_rfc3339_opts(SecondsFormat::Millis, true),
        utc: utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        local: local.format("%Y-%m-%d %H:%M:%S").to_string(),
        offset: format_offset(local.offset().local_minus_utc()),
    })
}

pub fn from_seconds(seconds: i64) -> Result<EpochReport> {
    let millis = seconds
        .checked_mul(1000)
        .ok_or(EpochError::OutOfRange(seconds))?;
    describe(millis)
}

pub fn now() -> Result<EpochReport> {
    describe(Utc::now().timestamp_millis())
}

// Offset east of UTC as +HH:MM
fn format_offset(seconds: i32) -> String {
    let sign = if seconds >= 0 { '+' } else { '-' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero() {
        let report = describe(0).unwrap();
        assert_eq!(report.iso, "1970-01-01T00:00:00.000Z");
        assert_eq!(report.utc, "Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(report.seconds, 0);
    }

    #[test]
    fn seconds_floor_for_negative_millis() {
        let report = describe(-1).unwrap();
        assert_eq!(report.seconds, -1);
        assert_eq!(report.iso, "1969-12-31T23:59:59.999Z");
    }

    #[test]
    fn from_seconds_scales_to_millis() {
        let report = from_seconds(1_700_000_000).unwrap();
        assert_eq!(report.millis, 1_700_000_000_000);
        assert_eq!(report.iso, "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert!(matches!(describe(i64::MAX), Err(EpochError::OutOfRange(i64::MAX))));
        assert!(from_seconds(i64::MAX).is_err());
    }

    #[test]
    fn offsets_are_signed_hours_and_minutes() {
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(19_800), "+05:30");
        assert_eq!(format_offset(-12_600), "-03:30");
    }
}
