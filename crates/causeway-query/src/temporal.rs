//! Extract a UTC time-range constraint from a natural-language question.
//!
//! An explicit caller-supplied range always wins — extraction never runs.
//! Otherwise temporal expressions are scanned out of the question text and
//! parsed into (start, end) spans: quarters expand to calendar-quarter
//! bounds, bare years to the full year, month+year to the full month;
//! everything else resolves to a point-in-time span. Relative expressions
//! resolve against the current wall-clock time — this is query-time
//! resolution, not ingestion-time dating. Multiple spans collapse to their
//! bounding envelope.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone, Utc};
use regex::Regex;

use causeway_core::models::TimeRange;

/// A resolved temporal expression.
#[derive(Debug, Clone, Copy)]
struct TemporalSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

static QUARTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:q([1-4])|(first|second|third|fourth)\s+quarter)(?:\s+(?:of\s+)?((?:19|20)\d{2}))?\b",
    )
    .expect("quarter pattern")
});

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2}),?\s+((?:19|20)\d{2})\b",
    )
    .expect("month-day-year pattern")
});

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+((?:19|20)\d{2})\b",
    )
    .expect("month-year pattern")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:19|20)\d{2})-(\d{2})-(\d{2})\b").expect("iso pattern"));

static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(yesterday|today|last\s+(?:week|month|quarter|year))\b")
        .expect("relative pattern")
});

static BARE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("year pattern"));

fn month_number(name: &str) -> u32 {
    match name.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        _ => 12,
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight"))
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(23, 59, 59).expect("end of day"))
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
}

fn year_span(year: i32) -> Option<TemporalSpan> {
    Some(TemporalSpan {
        start: day_start(NaiveDate::from_ymd_opt(year, 1, 1)?),
        end: day_end(NaiveDate::from_ymd_opt(year, 12, 31)?),
    })
}

fn month_span(year: i32, month: u32) -> Option<TemporalSpan> {
    Some(TemporalSpan {
        start: day_start(NaiveDate::from_ymd_opt(year, month, 1)?),
        end: day_end(last_day_of_month(year, month)?),
    })
}

fn quarter_span(year: i32, quarter: u32) -> Option<TemporalSpan> {
    let (m_start, m_end) = match quarter {
        1 => (1, 3),
        2 => (4, 6),
        3 => (7, 9),
        _ => (10, 12),
    };
    Some(TemporalSpan {
        start: day_start(NaiveDate::from_ymd_opt(year, m_start, 1)?),
        end: day_end(last_day_of_month(year, m_end)?),
    })
}

fn point_span(at: DateTime<Utc>) -> TemporalSpan {
    TemporalSpan { start: at, end: at }
}

/// Scan the question for temporal expressions, higher-priority patterns
/// first so a "July 2024" is a month span, not a month plus a bare year.
fn extract_spans(question: &str, now: DateTime<Utc>) -> Vec<TemporalSpan> {
    let mut spans: Vec<TemporalSpan> = Vec::new();
    let mut consumed: Vec<(usize, usize)> = Vec::new();

    let claim = |consumed: &mut Vec<(usize, usize)>, start: usize, end: usize| -> bool {
        if consumed.iter().any(|&(s, e)| start < e && s < end) {
            return false;
        }
        consumed.push((start, end));
        true
    };

    for caps in QUARTER.captures_iter(question) {
        let whole = caps.get(0).expect("match");
        if !claim(&mut consumed, whole.start(), whole.end()) {
            continue;
        }
        let quarter = match (caps.get(1), caps.get(2)) {
            (Some(digit), _) => digit.as_str().parse::<u32>().unwrap_or(1),
            (None, Some(word)) => match word.as_str().to_lowercase().as_str() {
                "first" => 1,
                "second" => 2,
                "third" => 3,
                _ => 4,
            },
            _ => 1,
        };
        let year = caps
            .get(3)
            .and_then(|y| y.as_str().parse::<i32>().ok())
            .unwrap_or_else(|| now.year());
        if let Some(span) = quarter_span(year, quarter) {
            spans.push(span);
        }
    }

    for caps in MONTH_DAY_YEAR.captures_iter(question) {
        let whole = caps.get(0).expect("match");
        if !claim(&mut consumed, whole.start(), whole.end()) {
            continue;
        }
        let month = month_number(&caps[1]);
        let day: u32 = caps[2].parse().unwrap_or(1);
        let year: i32 = caps[3].parse().unwrap_or_else(|_| now.year());
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            spans.push(point_span(day_start(date)));
        }
    }

    for caps in MONTH_YEAR.captures_iter(question) {
        let whole = caps.get(0).expect("match");
        if !claim(&mut consumed, whole.start(), whole.end()) {
            continue;
        }
        let month = month_number(&caps[1]);
        let year: i32 = caps[2].parse().unwrap_or_else(|_| now.year());
        if let Some(span) = month_span(year, month) {
            spans.push(span);
        }
    }

    for caps in ISO_DATE.captures_iter(question) {
        let whole = caps.get(0).expect("match");
        if !claim(&mut consumed, whole.start(), whole.end()) {
            continue;
        }
        let year: i32 = caps[1].parse().unwrap_or(1970);
        let month: u32 = caps[2].parse().unwrap_or(1);
        let day: u32 = caps[3].parse().unwrap_or(1);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            spans.push(point_span(day_start(date)));
        }
    }

    for caps in RELATIVE.captures_iter(question) {
        let whole = caps.get(0).expect("match");
        if !claim(&mut consumed, whole.start(), whole.end()) {
            continue;
        }
        let expr = caps[1].to_lowercase();
        let expr = expr.split_whitespace().collect::<Vec<_>>().join(" ");
        let at = match expr.as_str() {
            "today" => Some(now),
            "yesterday" => now.checked_sub_days(Days::new(1)),
            "last week" => now.checked_sub_days(Days::new(7)),
            "last month" => now.checked_sub_months(Months::new(1)),
            "last quarter" => now.checked_sub_months(Months::new(3)),
            "last year" => now.checked_sub_months(Months::new(12)),
            _ => None,
        };
        if let Some(at) = at {
            spans.push(point_span(at));
        }
    }

    for caps in BARE_YEAR.captures_iter(question) {
        let whole = caps.get(0).expect("match");
        if !claim(&mut consumed, whole.start(), whole.end()) {
            continue;
        }
        if let Some(span) = caps[1].parse::<i32>().ok().and_then(year_span) {
            spans.push(span);
        }
    }

    spans
}

/// Collapse one or more spans into a single range: a single span keeps its
/// own bounds, multiple spans take the bounding envelope, and an inverted
/// envelope is swapped.
fn collapse(spans: &[TemporalSpan]) -> Option<TimeRange> {
    if spans.is_empty() {
        return None;
    }
    let mut start = spans.iter().map(|s| s.start).min().expect("non-empty");
    let mut end = spans.iter().map(|s| s.end).max().expect("non-empty");
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }
    Some(TimeRange { start, end })
}

/// Extract a UTC time range from `question`. The caller's explicit range
/// always takes precedence over anything inferred from text.
pub fn extract_time_range(question: &str, explicit: Option<TimeRange>) -> Option<TimeRange> {
    if let Some(range) = explicit {
        tracing::debug!("temporal extractor: explicit pass-through");
        return Some(range);
    }

    let spans = extract_spans(question, Utc::now());
    let range = collapse(&spans);
    if let Some(range) = range {
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            "temporal extractor: resolved"
        );
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        day_start(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn explicit_always_wins() {
        let explicit = TimeRange {
            start: ymd(2020, 1, 1),
            end: ymd(2020, 12, 31),
        };
        let range = extract_time_range("what happened in 2023?", Some(explicit)).unwrap();
        assert_eq!(range, explicit);
    }

    #[test]
    fn quarter_expands_to_calendar_bounds() {
        let range = extract_time_range("Why did revenue drop in Q3 2024?", None).unwrap();
        assert_eq!(range.start, ymd(2024, 7, 1));
        assert_eq!(range.end.date_naive(), NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
    }

    #[test]
    fn bare_year_expands_to_full_year() {
        let range = extract_time_range("events in 2023", None).unwrap();
        assert_eq!(range.start, ymd(2023, 1, 1));
        assert_eq!(range.end.date_naive(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn month_year_expands_to_full_month() {
        let range = extract_time_range("what happened in February 2024?", None).unwrap();
        assert_eq!(range.start, ymd(2024, 2, 1));
        // Leap year.
        assert_eq!(range.end.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn two_years_collapse_to_envelope() {
        let range = extract_time_range("compare 2023 and 2024", None).unwrap();
        assert_eq!(range.start, ymd(2023, 1, 1));
        assert_eq!(range.end.date_naive(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn month_year_is_not_double_counted_as_bare_year() {
        let range = extract_time_range("what happened in July 2024?", None).unwrap();
        assert_eq!(range.start, ymd(2024, 7, 1));
        assert_eq!(range.end.date_naive(), NaiveDate::from_ymd_opt(2024, 7, 31).unwrap());
    }

    #[test]
    fn no_temporal_expression_yields_none() {
        assert!(extract_time_range("why did the server crash?", None).is_none());
    }

    #[test]
    fn iso_date_is_a_point_span() {
        let range = extract_time_range("what happened on 2024-03-15?", None).unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(range.start, ymd(2024, 3, 15));
    }
}
