//! Presentation formatters: byte sizes, dates, relative times, and
//! modification statistics.
//!
//! Pure functions over raw numeric/date fields; the rendering layer calls
//! these instead of formatting inline.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::modification::PreviewStats;

/// Sentinel returned for unparseable timestamps.
const INVALID_DATE: &str = "Invalid Date";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count as a human-readable size.
///
/// Units step by powers of 1024; values show up to two decimal places with
/// trailing zeros trimmed (`1536` → `"1.5 KB"`, `0` → `"0 Bytes"`).
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    format!("{} {}", trim_trailing_zeros(scaled), SIZE_UNITS[exponent])
}

fn trim_trailing_zeros(value: f64) -> String {
    let rendered = format!("{value:.2}");
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Parses an ISO 8601 / RFC 3339 timestamp, tolerating the naive form the
/// backend emits for timezone-unaware fields.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp as a date-time string.
///
/// Unparseable input yields the literal `"Invalid Date"`.
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Formats a timestamp relative to the current time (`"3 minutes ago"`).
///
/// Anything seven days or older falls back to [`format_date`].
pub fn format_relative_time(value: &str) -> String {
    format_relative_time_from(value, Utc::now())
}

/// [`format_relative_time`] with an explicit reference point.
pub fn format_relative_time_from(value: &str, now: DateTime<Utc>) -> String {
    let Some(parsed) = parse_timestamp(value) else {
        return INVALID_DATE.to_string();
    };
    let elapsed = now.signed_duration_since(parsed);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} minute{} ago", minutes, plural(minutes));
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{} hour{} ago", hours, plural(hours));
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{} day{} ago", days, plural(days));
    }
    format_date(value)
}

fn plural(count: i64) -> &'static str {
    if count > 1 { "s" } else { "" }
}

/// Formats a modification rate in [0,1] as a rounded percentage.
pub fn format_modification_rate(rate: f64) -> String {
    format!("{}%", (rate * 100.0).round() as i64)
}

/// Groups a count with thousands separators (`1234567` → `"1,234,567"`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Display-ready summary of modification statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModificationSummary {
    /// Thousands-grouped total row count
    pub total_rows: String,
    /// Thousands-grouped modified row count
    pub modified_rows: String,
    /// Rounded percentage form of the modification rate
    pub change_rate: String,
    /// Whether any row would change at all
    pub has_changes: bool,
}

/// Builds the display summary for a preview's statistics.
pub fn modification_summary(stats: &PreviewStats) -> ModificationSummary {
    ModificationSummary {
        total_rows: group_thousands(stats.total_rows),
        modified_rows: group_thousands(stats.modified_rows),
        change_rate: format_modification_rate(stats.modification_rate),
        has_changes: stats.modified_rows > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats(total: u64, modified: u64, rate: f64) -> PreviewStats {
        PreviewStats {
            total_rows: total,
            modified_rows: modified,
            modification_rate: rate,
            pattern: String::new(),
            replacement: String::new(),
            error: None,
        }
    }

    #[test]
    fn file_size_zero_is_special_cased() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn file_size_unit_follows_log_base_1024() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn file_size_trims_trailing_zeros() {
        // 1.50 -> 1.5, 2.00 -> 2
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2048), "2 KB");
        // 1627 / 1024 = 1.5888... -> 1.59
        assert_eq!(format_file_size(1627), "1.59 KB");
    }

    #[test]
    fn file_size_clamps_beyond_gb() {
        // 5 TB still renders in GB, the largest available unit
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn date_formats_and_rejects() {
        assert_eq!(
            format_date("2024-05-01T10:30:00+00:00"),
            "2024-05-01 10:30:00"
        );
        // Naive backend timestamps parse too
        assert_eq!(format_date("2024-05-01T10:30:00"), "2024-05-01 10:30:00");
        assert_eq!(format_date("not a date"), "Invalid Date");
        assert_eq!(format_date(""), "Invalid Date");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
        assert_eq!(
            format_relative_time_from("2024-05-08T11:59:40+00:00", now),
            "Just now"
        );
        assert_eq!(
            format_relative_time_from("2024-05-08T11:59:00+00:00", now),
            "1 minute ago"
        );
        assert_eq!(
            format_relative_time_from("2024-05-08T11:57:00+00:00", now),
            "3 minutes ago"
        );
        assert_eq!(
            format_relative_time_from("2024-05-08T10:00:00+00:00", now),
            "2 hours ago"
        );
        assert_eq!(
            format_relative_time_from("2024-05-05T12:00:00+00:00", now),
            "3 days ago"
        );
        // >= 7 days falls back to the absolute form
        assert_eq!(
            format_relative_time_from("2024-04-28T12:00:00+00:00", now),
            "2024-04-28 12:00:00"
        );
    }

    #[test]
    fn relative_time_future_reads_as_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
        assert_eq!(
            format_relative_time_from("2024-05-08T12:05:00+00:00", now),
            "Just now"
        );
    }

    #[test]
    fn modification_rate_rounds() {
        assert_eq!(format_modification_rate(0.08), "8%");
        assert_eq!(format_modification_rate(0.856), "86%");
        assert_eq!(format_modification_rate(0.0), "0%");
        assert_eq!(format_modification_rate(1.0), "100%");
    }

    #[test]
    fn summary_groups_and_flags_changes() {
        let summary = modification_summary(&stats(1_234_567, 98_765, 0.08));
        assert_eq!(summary.total_rows, "1,234,567");
        assert_eq!(summary.modified_rows, "98,765");
        assert_eq!(summary.change_rate, "8%");
        assert!(summary.has_changes);
    }

    #[test]
    fn summary_with_no_changes() {
        let summary = modification_summary(&stats(100, 0, 0.0));
        assert_eq!(summary.modified_rows, "0");
        assert_eq!(summary.change_rate, "0%");
        assert!(!summary.has_changes);
    }
}
