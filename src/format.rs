//! Display helpers shared by the list and detail panes.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use std::fmt::Display;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Characters of body text shown in a list row.
pub const PREVIEW_CHARS: usize = 100;

pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Formats a backend timestamp in the local timezone.
pub fn format_date(raw: &str, full: bool) -> String {
    format_date_at(raw, full, &Local::now())
}

/// List context (`full == false`) shows less the more recent a message is:
/// under a day only the time, under a week the weekday, otherwise month/day.
/// Detail context always shows date and time.
pub fn format_date_at<Tz: TimeZone>(raw: &str, full: bool, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let Some(ts) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let local = ts.with_timezone(&now.timezone());
    if full {
        return local.format("%Y/%m/%d %H:%M").to_string();
    }

    let age_ms = now.timestamp_millis() - ts.timestamp_millis();
    if age_ms < DAY_MS {
        local.format("%H:%M").to_string()
    } else if age_ms < 7 * DAY_MS {
        local.format("%a").to_string()
    } else {
        local.format("%m/%d").to_string()
    }
}

/// One-line preview of a body: blank lines dropped, the rest joined with
/// spaces, cut at `max_chars` and marked with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(line);
        if out.chars().count() >= max_chars {
            break;
        }
    }
    let mut out: String = out.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/// Body text as paragraphs, one per `\n`.
pub fn paragraphs(content: &str) -> Vec<String> {
    content.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn now() -> DateTime<Utc> {
        // a Wednesday
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_messages_show_time_only() {
        assert_eq!(format_date_at("2024-05-15T11:00:00Z", false, &now()), "11:00");
        assert_eq!(
            format_date_at("Wed, 15 May 2024 11:00:00 GMT", false, &now()),
            "11:00"
        );
    }

    #[test]
    fn this_week_shows_weekday() {
        assert_eq!(format_date_at("2024-05-12 12:00:00", false, &now()), "Sun");
    }

    #[test]
    fn older_shows_month_and_day() {
        assert_eq!(format_date_at("2024-04-15T12:00:00Z", false, &now()), "04/15");
    }

    #[test]
    fn band_edges_are_exclusive() {
        // exactly 24h old is no longer "today"
        assert_eq!(format_date_at("2024-05-14T12:00:00Z", false, &now()), "Tue");
        // exactly 7 days old falls into month/day
        assert_eq!(format_date_at("2024-05-08T12:00:00Z", false, &now()), "05/08");
    }

    #[test]
    fn full_ignores_age() {
        assert_eq!(
            format_date_at("2024-05-15T11:00:00Z", true, &now()),
            "2024/05/15 11:00"
        );
        assert_eq!(
            format_date_at("2024-04-15T12:00:00Z", true, &now()),
            "2024/04/15 12:00"
        );
    }

    #[test]
    fn converts_into_viewer_timezone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = now().with_timezone(&tokyo);
        assert_eq!(format_date_at("2024-05-15T11:00:00Z", false, &now), "20:00");
    }

    #[test]
    fn garbage_is_shown_verbatim() {
        assert_eq!(format_date_at("yesterday", false, &now()), "yesterday");
    }

    #[test]
    fn preview_truncates_at_100_chars() {
        let body = "x".repeat(150);
        let p = preview(&body, PREVIEW_CHARS);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));

        assert_eq!(preview("hi\n\n  there ", PREVIEW_CHARS), "hi there...");
    }

    #[test]
    fn paragraphs_split_on_newline() {
        assert_eq!(paragraphs("a\r\n\nb"), vec!["a", "", "b"]);
    }
}
