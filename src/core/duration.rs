//! Duration formatting and parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a countdown that has run past zero is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrunStyle {
    /// Show the overrun with a leading minus sign (`-01:05`).
    #[default]
    Signed,
    /// Stop at `00:00`.
    Clamp,
}

/// Format a number of seconds as `MM:SS`.
///
/// Minutes are not folded into hours, so an hour renders as `60:00`.
/// Negative values keep their sign in front of the absolute value.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let minutes = total / 60;
    let secs = total % 60;
    format!("{sign}{minutes:02}:{secs:02}")
}

/// Format a countdown value, applying `style` to negative values.
#[must_use]
pub fn format_countdown(seconds: i64, style: OverrunStyle) -> String {
    match style {
        OverrunStyle::Signed => format_duration(seconds),
        OverrunStyle::Clamp => format_duration(seconds.max(0)),
    }
}

/// Whole seconds from `from` to `to`, truncated toward zero.
#[must_use]
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from).num_seconds()
}

/// Parse a duration such as `"20"`, `"20m"`, `"1h"` or `"1h30m"` into minutes.
///
/// A bare number is taken as minutes. Returns `None` for empty, zero or
/// malformed input.
#[must_use]
pub fn parse_minutes(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u32>() {
        return (minutes > 0).then_some(minutes);
    }

    let mut total: u32 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else {
            if current_num.is_empty() {
                return None;
            }
            let num: u32 = current_num.parse().ok()?;
            current_num.clear();

            match c {
                'h' => total = total.checked_add(num.checked_mul(60)?)?,
                'm' => total = total.checked_add(num)?,
                _ => return None,
            }
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: u32 = current_num.parse().ok()?;
        total = total.checked_add(num)?;
    }

    (total > 0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(3600), "60:00");
        assert_eq!(format_duration(1170), "19:30");
    }

    #[test]
    fn test_format_duration_negative() {
        assert_eq!(format_duration(-65), "-01:05");
        assert_eq!(format_duration(-1), "-00:01");
    }

    #[test]
    fn test_format_countdown_styles() {
        assert_eq!(format_countdown(-30, OverrunStyle::Signed), "-00:30");
        assert_eq!(format_countdown(-30, OverrunStyle::Clamp), "00:00");
        assert_eq!(format_countdown(90, OverrunStyle::Clamp), "01:30");
    }

    #[test]
    fn test_seconds_between_truncates() {
        let start = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let end = start + Duration::milliseconds(65_900);
        assert_eq!(seconds_between(start, end), 65);
        assert_eq!(seconds_between(end, start), -65);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("20"), Some(20));
        assert_eq!(parse_minutes("40m"), Some(40));
        assert_eq!(parse_minutes("1h"), Some(60));
        assert_eq!(parse_minutes("1h30m"), Some(90));
        assert_eq!(parse_minutes(" 2H "), Some(120));
    }

    #[test]
    fn test_parse_minutes_invalid() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes("90s"), None);
    }
}
