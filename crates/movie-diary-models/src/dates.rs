//! Date parsing that never routes a date-only string through a timezone-aware
//! epoch parse. Interpreting "2026-01-14" as a UTC instant shifts the
//! displayed day in timezones west of UTC, so the strict path decomposes the
//! string into year/month/day integers and builds a `NaiveDate` directly.

use chrono::{DateTime, NaiveDate};
use tracing::debug;

/// Known free-form formats tried after the strict path, in order. RFC 2822 is
/// handled separately because it carries a timezone.
const FALLBACK_FORMATS: &[&str] = &["%d %b %Y", "%B %d, %Y", "%m/%d/%Y"];

/// Parse a strict `YYYY-MM-DD` string by direct decomposition, taking the
/// day-of-month literally.
pub fn parse_strict(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.splitn(3, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Best-effort parse: strict `YYYY-MM-DD` first, then RFC 2822 (feed
/// pub-dates), then a short list of free-form formats. `None` means the input
/// is not a recognizable date.
pub fn parse_watched_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(date) = parse_strict(raw) {
        return Some(date);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.date_naive());
    }
    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    debug!(input = raw, "unparsable date string");
    None
}

/// Abbreviated display form, e.g. "Jan 14".
pub fn format_badge(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
