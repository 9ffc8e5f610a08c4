//! Parsing of `saleDate` values into wall-clock times used for bucketing.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Which clock a sale timestamp is read on before it is bucketed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeBasis {
    /// Use the wall-clock time exactly as written in `saleDate`.
    #[default]
    AsRecorded,
    /// Convert offset-bearing timestamps to this offset. Timestamps without
    /// an offset are taken to be in this offset already.
    Offset(FixedOffset),
}

/// Offset-bearing forms RFC 3339 rejects, such as `2024-05-01T10:15+02:00`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a `saleDate` into the wall-clock time it falls on under `basis`.
///
/// Accepts RFC 3339 (with `Z` or an offset, seconds optional), naive ISO
/// date-times with a `T` or space separator, and bare ISO dates (taken as
/// midnight). Returns `None` for anything else.
pub fn wall_clock(raw: &str, basis: TimeBasis) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(dt) = parse_with_offset(raw) {
        return Some(match basis {
            TimeBasis::AsRecorded => dt.naive_local(),
            TimeBasis::Offset(offset) => dt.with_timezone(&offset).naive_local(),
        });
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_with_offset(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let raw: Cow<'_, str> = match raw.strip_suffix(['Z', 'z']) {
        Some(head) => Cow::Owned(format!("{head}+00:00")),
        None => Cow::Borrowed(raw),
    };
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&raw, fmt).ok())
}

/// Calendar-date key for the daily series.
///
/// Unparseable values keep their text before the first `T`, matching how the
/// dashboards keyed raw strings.
pub fn day_key(raw: &str, basis: TimeBasis) -> String {
    match wall_clock(raw, basis) {
        Some(dt) => dt.date().format("%Y-%m-%d").to_string(),
        None => raw.split('T').next().unwrap_or(raw).to_string(),
    }
}
