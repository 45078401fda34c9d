//! Scan time handling.
//!
//! The radar names its files after the UTC start of the scan,
//! `YYYYMMDD-HHMMSS...`. Costa Rica keeps a fixed UTC-6 offset all year,
//! so local time is a plain subtraction with no daylight-saving rules.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::{RadarError, RadarResult};

/// Offset of local (Costa Rica) time from UTC, in hours.
pub const LOCAL_UTC_OFFSET_HOURS: i64 = -6;

/// Length of the `YYYYMMDD-HHMMSS` prefix.
const STAMP_LEN: usize = 15;

/// Position of the date/time separator inside the prefix.
const SEPARATOR_INDEX: usize = 8;

/// Final path segment of a file identifier.
///
/// Both `/` and `\` are treated as separators so that identifiers produced
/// on either platform resolve to the same segment.
pub fn final_segment(file_id: &str) -> &str {
    file_id
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_id)
}

/// Parse the UTC scan time embedded at the start of a file identifier's
/// final path segment.
pub fn parse_scan_time(file_id: &str) -> RadarResult<DateTime<Utc>> {
    let segment = final_segment(file_id);
    let bytes = segment.as_bytes();

    if bytes.len() < STAMP_LEN {
        return Err(RadarError::parse(
            segment,
            format!("expected at least {} characters, got {}", STAMP_LEN, bytes.len()),
        ));
    }
    if bytes[SEPARATOR_INDEX] != b'-' {
        return Err(RadarError::parse(segment, "missing '-' between date and time"));
    }

    let field = |start: usize, end: usize, name: &str| -> RadarResult<u32> {
        let digits = &bytes[start..end];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(RadarError::parse(segment, format!("{} is not numeric", name)));
        }
        Ok(digits
            .iter()
            .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0')))
    };

    let year = field(0, 4, "year")?;
    let month = field(4, 6, "month")?;
    let day = field(6, 8, "day")?;
    let hour = field(9, 11, "hour")?;
    let minute = field(11, 13, "minute")?;
    let second = field(13, 15, "second")?;

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| RadarError::parse(segment, "date out of range"))?;
    let naive = date
        .and_hms_opt(hour, minute, second)
        .ok_or_else(|| RadarError::parse(segment, "time out of range"))?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Convert a UTC instant to Costa Rica local wall-clock time.
pub fn to_local(utc: DateTime<Utc>) -> NaiveDateTime {
    utc.naive_utc() + Duration::hours(LOCAL_UTC_OFFSET_HOURS)
}
