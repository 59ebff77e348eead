//! Artifact timestamps: signed Unix seconds

use chrono::{Local, TimeZone, Utc};

/// Current wall-clock time in Unix seconds.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Render Unix seconds as local `YYYY-MM-DD HH:MM:SS`.
///
/// Out-of-range values fall back to the raw number.
pub fn format_local(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}
