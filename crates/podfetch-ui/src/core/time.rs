//! Duration and date formatting for episode lists and the player.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up. Negative or
/// non-finite input renders as `0:00`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = seconds.floor() as u64;
        whole
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Render a feed timestamp as `YYYY-MM-DD`; unparseable values pass through.
#[must_use]
pub fn format_recording_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.date_naive().to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return parsed.date_naive().to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return parsed.date().to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.to_string();
    }
    raw.to_string()
}

/// Render a server timestamp as `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_durations_use_minutes() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(245.0), "4:05");
        assert_eq!(format_time(754.0), "12:34");
    }

    #[test]
    fn long_durations_include_hours() {
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(5025.0), "1:23:45");
    }

    #[test]
    fn invalid_durations_render_zero() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn recording_dates_accept_feed_formats() {
        assert_eq!(format_recording_date("2023-04-01T10:00:00"), "2023-04-01");
        assert_eq!(format_recording_date("2023-04-01T10:00:00+02:00"), "2023-04-01");
        assert_eq!(
            format_recording_date("Sat, 01 Apr 2023 10:00:00 +0000"),
            "2023-04-01"
        );
        assert_eq!(format_recording_date("2023-04-01"), "2023-04-01");
        assert_eq!(format_recording_date("someday"), "someday");
    }

    #[test]
    fn timestamps_drop_seconds() {
        let value = NaiveDateTime::parse_from_str("2023-04-01 10:05:59", "%Y-%m-%d %H:%M:%S")
            .expect("parse");
        assert_eq!(format_timestamp(&value), "2023-04-01 10:05");
    }
}
