use std::cmp::Ordering;
use std::fmt;

use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

// Written by the capture backend into clip file names: `2025-03-11 23-46-30`.
const LEGACY_DASHED: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]-[minute]-[second]");
const LEGACY_COLON: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Capture time of a clip.
///
/// Ordering compares absolute instants. The calendar day used for grouping is
/// taken in the offset the timestamp was recorded with, so a clip captured at
/// 23:30+02:00 belongs to that local day even though it is already the next
/// day in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClipTimestamp(OffsetDateTime);

impl ClipTimestamp {
    /// Parses RFC 3339, falling back to the zone-less legacy forms (read as UTC).
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(Self(dt));
        }
        [LEGACY_DASHED, LEGACY_COLON]
            .iter()
            .find_map(|fmt| PrimitiveDateTime::parse(raw, fmt).ok())
            .map(|dt| Self(dt.assume_utc()))
    }

    pub fn from_datetime(dt: OffsetDateTime) -> Self {
        Self(dt)
    }

    pub fn datetime(&self) -> OffsetDateTime {
        self.0
    }

    pub fn day(&self) -> Date {
        self.0.date()
    }

    pub fn to_rfc3339(&self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl Ord for ClipTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for ClipTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ClipTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl serde::Serialize for ClipTimestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
#[path = "../tests/model/timestamp_tests.rs"]
mod tests;
