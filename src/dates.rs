// ABOUTME: Date validation and resolution for CLI queries
// ABOUTME: Defines the default "WHOOP day" rule and ISO-8601 gatekeeping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use crate::models::{parse_iso_date, DateQuery};
use chrono::{Local, NaiveDate};

/// True iff `input` is a `YYYY-MM-DD` string naming a real calendar date.
///
/// Rejects non-padded forms (`2024-6-1`) and calendar-invalid dates
/// (`2024-02-30`, `2024-13-01`). No side effects.
#[must_use]
pub fn validate_iso_date(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    digits_ok && NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
}

/// The current "WHOOP day".
///
/// WHOOP anchors its reporting day to the user's device timezone, so the
/// closest rule a CLI can apply without querying the API is local-timezone
/// midnight: today is whatever calendar day the machine's clock says.
#[must_use]
pub fn whoop_day() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve an optional explicit `--date` value.
///
/// An explicit value must pass [`validate_iso_date`]; an omitted value
/// resolves to [`whoop_day`]. Validation failures abort before any fetch.
pub fn resolve_date(explicit: Option<&str>) -> AppResult<NaiveDate> {
    match explicit {
        Some(input) if validate_iso_date(input) => parse_iso_date(input),
        Some(input) => Err(AppError::InvalidDate(input.to_owned())),
        None => Ok(whoop_day()),
    }
}

/// Resolve `--date`/`--start`/`--end` into a [`DateQuery`].
///
/// `--start`/`--end` take precedence over `--date`; if only one bound is
/// given the other defaults to it. A reversed range is rejected up front.
pub fn resolve_query(
    date: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<DateQuery> {
    if start.is_none() && end.is_none() {
        return Ok(DateQuery::Day(resolve_date(date)?));
    }

    let validated = |input: Option<&str>| -> AppResult<Option<NaiveDate>> {
        match input {
            Some(value) if validate_iso_date(value) => Ok(Some(parse_iso_date(value)?)),
            Some(value) => Err(AppError::InvalidDate(value.to_owned())),
            None => Ok(None),
        }
    };

    let start = validated(start)?;
    let end = validated(end)?;
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        (Some(only), None) | (None, Some(only)) => (only, only),
        (None, None) => unreachable!("guarded above"),
    };

    if end < start {
        return Err(AppError::InvalidDate(format!(
            "range end {end} precedes start {start}"
        )));
    }

    Ok(if start == end {
        DateQuery::Day(start)
    } else {
        DateQuery::Range { start, end }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_calendar_dates() {
        for input in ["2024-06-01", "2024-02-29", "1999-12-31", "2024-01-01"] {
            assert!(validate_iso_date(input), "{input} should validate");
        }
    }

    #[test]
    fn rejects_invalid_or_malformed_dates() {
        for input in [
            "2024-02-30",
            "2024-13-01",
            "2023-02-29",
            "2024-6-01",
            "2024-06-1",
            "24-06-01",
            "2024/06/01",
            "2024-06-01T00:00:00Z",
            "not-a-date",
            "",
        ] {
            assert!(!validate_iso_date(input), "{input} should be rejected");
        }
    }

    #[test]
    fn explicit_date_wins_and_invalid_aborts() {
        let date = resolve_date(Some("2024-06-01")).unwrap();
        assert_eq!(date.to_string(), "2024-06-01");
        assert!(matches!(
            resolve_date(Some("2024-02-30")),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn omitted_date_resolves_to_today() {
        assert_eq!(resolve_date(None).unwrap(), whoop_day());
    }

    #[test]
    fn range_resolution_rules() {
        let query = resolve_query(None, Some("2024-06-01"), Some("2024-06-03")).unwrap();
        assert!(matches!(query, DateQuery::Range { .. }));

        // Single bound collapses to a one-day query
        let query = resolve_query(None, Some("2024-06-01"), None).unwrap();
        assert!(matches!(query, DateQuery::Day(_)));

        // Range bounds beat --date
        let query = resolve_query(Some("2024-01-01"), Some("2024-06-01"), Some("2024-06-02"))
            .unwrap();
        assert_eq!(query.key_date().to_string(), "2024-06-01");

        assert!(matches!(
            resolve_query(None, Some("2024-06-03"), Some("2024-06-01")),
            Err(AppError::InvalidDate(_))
        ));
    }
}
