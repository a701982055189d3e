//! Timestamp representation shared by work orders and pause intervals.
//!
//! Records reach the engine from two places: freshly built local values and
//! documents deserialized from the record store, where the server writes an
//! authoritative `{ seconds, nanoseconds }` object. [`Timestamp`] accepts both
//! and resolves them to the local wall clock used by every SLA calculation.
//!
//! ## Accepted Shapes
//!
//! - `{ "seconds": 1736935200, "nanoseconds": 0 }` - server timestamp (UTC epoch)
//! - `"2025-01-15 10:00:00"` - local wall clock
//! - `"2025-01-15T10:00:00-03:00"` - RFC 3339, converted to local time
//!
//! ## Usage
//!
//! ```rust
//! use obras::libs::timestamp::Timestamp;
//!
//! let ts = Timestamp::parse("2025-01-15 10:00")?;
//! let local = ts.to_local();
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Storage and display format for local timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Additional formats accepted when parsing user input.
const INPUT_FORMATS: [&str; 3] = [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A point in time as delivered by the record store or built locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Server-authoritative timestamp, seconds since the UNIX epoch in UTC.
    Server { seconds: i64, nanoseconds: u32 },
    /// Plain local date and time.
    Plain(#[serde(serialize_with = "serialize_plain", deserialize_with = "deserialize_plain")] NaiveDateTime),
}

impl Timestamp {
    /// Returns the current local time as a plain timestamp.
    pub fn now() -> Self {
        Timestamp::Plain(Local::now().naive_local())
    }

    /// Resolves the timestamp to the local wall clock.
    ///
    /// Returns `None` when a server timestamp is outside the representable
    /// range; callers treat that the same as a missing value.
    pub fn to_local(&self) -> Option<NaiveDateTime> {
        match *self {
            Timestamp::Plain(value) => Some(value),
            Timestamp::Server { seconds, nanoseconds } => {
                DateTime::<Utc>::from_timestamp(seconds, nanoseconds).map(|utc| utc.with_timezone(&Local).naive_local())
            }
        }
    }

    /// Parses user input into a timestamp.
    ///
    /// Accepts `now`, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM:SS` and
    /// RFC 3339 values with an offset.
    pub fn parse(input: &str) -> Result<Timestamp> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("now") {
            return Ok(Timestamp::now());
        }
        parse_local(input).map(Timestamp::Plain).ok_or_else(|| anyhow!("Invalid timestamp '{}'", input))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp::Plain(value)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Timestamp::Server {
            seconds: value.timestamp(),
            nanoseconds: value.timestamp_subsec_nanos(),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            Some(local) => write!(f, "{}", local.format(TIMESTAMP_FORMAT)),
            None => write!(f, "-"),
        }
    }
}

/// Parses a local or RFC 3339 string into the local wall clock.
pub fn parse_local(input: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    INPUT_FORMATS.iter().find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

fn serialize_plain<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
}

fn deserialize_plain<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_local(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}
