//! Entry date parsing and file name formatting.
//!
//! Entry file names are rendered with the configured `fileNameFormat`, which uses
//! the token style `YYYY-MM-DD`. A pattern containing `%` is taken as a native
//! strftime pattern instead.
//!
//! Generated indexes sort entries by file name, so only lexicographically
//! sortable patterns (largest unit first, zero padded) list entries in
//! chronological order. A pattern such as `MM-DD-YYYY` still works for writing
//! entries but orders the index by month rather than by date.

use crate::constants::{DATETIME_INPUT_FORMATS, DATE_INPUT_FORMATS, DEFAULT_FILE_NAME_FORMAT};
use crate::errors::{AppError, AppResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Tokens recognised in a file name pattern, longest first where they share a prefix.
const PATTERN_TOKENS: &[&str] = &[
    "YYYY", "YY", "MMMM", "MMM", "MM", "M", "DDDD", "DD", "D", "dddd", "ddd", "HH", "H", "hh",
    "h", "mm", "m", "ss", "s", "A", "a", "Q",
];

/// Resolves the date for a new entry into its file name stem.
///
/// With no date given, or a blank one, the reference time is used. The
/// returned string is the entry's on-disk identity.
///
/// # Errors
///
/// Returns `AppError::InvalidDate` if the date cannot be parsed or the pattern is
/// not a valid strftime pattern.
pub fn resolve_entry_date(
    file_name_format: &str,
    raw_date: Option<&str>,
    reference: &NaiveDateTime,
) -> AppResult<String> {
    let date = match raw_date {
        Some(raw) if !raw.trim().is_empty() => parse_entry_date(raw, reference)?,
        _ => *reference,
    };
    format_entry_date(&date, file_name_format)
}

/// Parses a user supplied date.
///
/// Accepts `today`, `yesterday` and `tomorrow`, RFC 3339 timestamps, and the
/// date/date-time layouts listed in the constants module. Date-only inputs
/// resolve to midnight.
pub fn parse_entry_date(raw: &str, reference: &NaiveDateTime) -> AppResult<NaiveDateTime> {
    let input = raw.trim();
    let invalid = |reason: &str| AppError::InvalidDate {
        input: raw.to_string(),
        reason: reason.to_string(),
    };

    if input.is_empty() {
        return Err(invalid("no date given"));
    }

    match input.to_lowercase().as_str() {
        "today" => return Ok(*reference),
        "yesterday" => return Ok(*reference - Duration::days(1)),
        "tomorrow" => return Ok(*reference + Duration::days(1)),
        _ => {}
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.naive_local());
    }

    for format in DATETIME_INPUT_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(datetime);
        }
    }

    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| invalid("date has no midnight"));
        }
    }

    Err(invalid("unrecognised date format"))
}

/// Formats a date with a file name pattern.
pub fn format_entry_date(date: &NaiveDateTime, pattern: &str) -> AppResult<String> {
    let pattern = if pattern.trim().is_empty() {
        DEFAULT_FILE_NAME_FORMAT
    } else {
        pattern
    };

    if pattern.contains('%') {
        return format_strftime(date, pattern);
    }
    Ok(format_tokens(date, pattern))
}

fn format_strftime(date: &NaiveDateTime, pattern: &str) -> AppResult<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(AppError::InvalidDate {
            input: date.to_string(),
            reason: format!("invalid file name format '{}'", pattern),
        });
    }
    Ok(date.format_with_items(items.into_iter()).to_string())
}

fn format_tokens(date: &NaiveDateTime, pattern: &str) -> String {
    let mut output = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(next) = rest.chars().next() {
        if next == '[' {
            // bracketed text is copied verbatim
            match rest[1..].find(']') {
                Some(end) => {
                    output.push_str(&rest[1..=end]);
                    rest = &rest[end + 2..];
                }
                None => {
                    output.push_str(&rest[1..]);
                    rest = "";
                }
            }
            continue;
        }

        match PATTERN_TOKENS.iter().find(|token| rest.starts_with(*token)) {
            Some(token) => {
                output.push_str(&render_token(date, token));
                rest = &rest[token.len()..];
            }
            None => {
                output.push(next);
                rest = &rest[next.len_utf8()..];
            }
        }
    }

    output
}

fn render_token(date: &NaiveDateTime, token: &str) -> String {
    let (is_pm, hour12) = date.hour12();
    match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => date.format("%B").to_string(),
        "MMM" => date.format("%b").to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DDDD" => format!("{:03}", date.ordinal()),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "dddd" => date.format("%A").to_string(),
        "ddd" => date.format("%a").to_string(),
        "HH" => format!("{:02}", date.hour()),
        "H" => date.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", date.minute()),
        "m" => date.minute().to_string(),
        "ss" => format!("{:02}", date.second()),
        "s" => date.second().to_string(),
        "A" => String::from(if is_pm { "PM" } else { "AM" }),
        "a" => String::from(if is_pm { "pm" } else { "am" }),
        "Q" => ((date.month() - 1) / 3 + 1).to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_resolve_without_date_uses_reference() {
        let result = resolve_entry_date("YYYY-MM-DD", None, &reference()).unwrap();
        assert_eq!(result, "2024-01-15");
    }

    #[test]
    fn test_resolve_blank_date_uses_reference() {
        assert_eq!(
            resolve_entry_date("YYYY-MM-DD", Some(""), &reference()).unwrap(),
            "2024-01-15"
        );
        assert_eq!(
            resolve_entry_date("YYYY-MM-DD", Some("   "), &reference()).unwrap(),
            "2024-01-15"
        );
    }

    #[test]
    fn test_resolve_with_given_date() {
        let result = resolve_entry_date("YYYY-MM-DD", Some("2017-11-10"), &reference()).unwrap();
        assert_eq!(result, "2017-11-10");
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        let result = resolve_entry_date("YYYY-MM-DD", Some("not-a-date"), &reference());
        match result {
            Err(AppError::InvalidDate { input, .. }) => assert_eq!(input, "not-a-date"),
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_accepted_layouts() {
        let expected = date(2017, 11, 10);
        for input in [
            "2017-11-10",
            "20171110",
            "2017/11/10",
            "2017.11.10",
            "11/10/2017",
            "November 10, 2017",
            "Nov 10, 2017",
            "10 November 2017",
            "  2017-11-10  ",
        ] {
            assert_eq!(parse_entry_date(input, &reference()).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_parse_datetimes_keep_wall_time() {
        let parsed = parse_entry_date("2017-11-10T23:15:00-05:00", &reference()).unwrap();
        assert_eq!(parsed, date(2017, 11, 10).with_hour(23).unwrap().with_minute(15).unwrap());

        let parsed = parse_entry_date("2017-11-10 08:05", &reference()).unwrap();
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.minute(), 5);
    }

    #[test]
    fn test_parse_relative_keywords() {
        assert_eq!(parse_entry_date("today", &reference()).unwrap(), reference());
        assert_eq!(
            parse_entry_date("Yesterday", &reference()).unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()
        );
        assert_eq!(
            parse_entry_date("TOMORROW", &reference()).unwrap().date(),
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(parse_entry_date("2017-02-30", &reference()).is_err());
        assert!(parse_entry_date("", &reference()).is_err());
        assert!(parse_entry_date("   ", &reference()).is_err());
    }

    #[test]
    fn test_format_tokens() {
        let when = reference();
        assert_eq!(format_entry_date(&when, "YYYY-MM-DD").unwrap(), "2024-01-15");
        assert_eq!(format_entry_date(&when, "YYYYMMDD").unwrap(), "20240115");
        assert_eq!(format_entry_date(&when, "YY.M.D").unwrap(), "24.1.15");
        assert_eq!(format_entry_date(&when, "MMMM D, YYYY").unwrap(), "January 15, 2024");
        assert_eq!(format_entry_date(&when, "ddd MMM DD").unwrap(), "Mon Jan 15");
        assert_eq!(format_entry_date(&when, "dddd").unwrap(), "Monday");
        assert_eq!(format_entry_date(&when, "YYYY-DDDD").unwrap(), "2024-015");
        assert_eq!(format_entry_date(&when, "HH-mm-ss").unwrap(), "14-30-05");
        assert_eq!(format_entry_date(&when, "h A").unwrap(), "2 PM");
        assert_eq!(format_entry_date(&when, "hh a").unwrap(), "02 pm");
        assert_eq!(format_entry_date(&when, "YYYY-[Q]Q").unwrap(), "2024-Q1");
    }

    #[test]
    fn test_format_bracket_literals() {
        let when = reference();
        assert_eq!(
            format_entry_date(&when, "[Week of] YYYY-MM-DD").unwrap(),
            "Week of 2024-01-15"
        );
        assert_eq!(format_entry_date(&when, "YYYY[unclosed").unwrap(), "2024unclosed");
    }

    #[test]
    fn test_format_native_strftime() {
        let when = reference();
        assert_eq!(format_entry_date(&when, "%Y-%m-%d").unwrap(), "2024-01-15");
        assert!(format_entry_date(&when, "%Q%").is_err());
    }

    #[test]
    fn test_format_empty_pattern_uses_default() {
        assert_eq!(format_entry_date(&reference(), "").unwrap(), "2024-01-15");
    }

    #[test]
    fn test_sortable_pattern_orders_chronologically() {
        let mut names: Vec<String> = [date(2017, 9, 30), date(2017, 10, 1), date(2016, 12, 31)]
            .iter()
            .map(|d| format_entry_date(d, "YYYY-MM-DD").unwrap())
            .collect();
        names.sort();

        assert_eq!(names, vec!["2016-12-31", "2017-09-30", "2017-10-01"]);
    }
}
