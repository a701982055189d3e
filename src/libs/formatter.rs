//! Duration formatting utilities for user-friendly display.
//!
//! SLA figures reach operators as `HH:MM` strings in tables, watch alerts and
//! exports. Durations are often several days long, so hours are not wrapped
//! at 24.
//!
//! ## Format Rules
//!
//! - Hours are zero-padded to at least 2 digits
//! - Minutes are zero-padded to 2 digits
//! - Seconds are dropped
//! - Negative durations are shown as "00:00"
//!
//! ## Examples
//!
//! ```rust
//! use obras::libs::formatter::{format_duration, format_hours};
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&Duration::hours(73)), "73:00");
//! assert_eq!(format_hours(54.5), "54:30");
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A pause interval pre-formatted for table display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedPause {
    /// Position of the pause in the order's list, starting at 1.
    pub id: i32,
    pub kind: String,
    pub reason: String,
    pub note: String,
    /// Start as "YYYY-MM-DD HH:MM:SS", or "-" when missing.
    pub start: String,
    /// End as "YYYY-MM-DD HH:MM:SS", or "-" while open.
    pub end: String,
    /// Length as "HH:MM", or "--:--" for malformed entries.
    pub duration: String,
}

/// Formats a chrono::Duration into a "HH:MM" string.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats fractional hours as "HH:MM".
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() {
        return format_duration(&Duration::zero());
    }
    format_duration(&Duration::minutes((hours * 60.0).round() as i64))
}
