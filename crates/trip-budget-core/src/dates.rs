//! Trip length calculation.

use chrono::{DateTime, NaiveDate};

/// Inclusive number of days between two calendar dates.
///
/// Dates are `YYYY-MM-DD`; an RFC 3339 timestamp is accepted and its date part
/// used. If either side does not parse the result is `0`. The result is not
/// clamped: an end date before the start date gives `diff + 1`, which is zero or
/// negative.
///
/// ```
/// use trip_budget_core::trip_days;
///
/// assert_eq!(trip_days("2024-01-01", "2024-01-03"), 3);
/// assert_eq!(trip_days("2024-01-05", "2024-01-01"), -3);
/// assert_eq!(trip_days("", "2024-01-01"), 0);
/// ```
#[must_use]
pub fn trip_days(start_date: &str, end_date: &str) -> i64 {
    match (parse_date(start_date), parse_date(end_date)) {
        (Some(start), Some(end)) => (end - start).num_days() + 1,
        _ => 0,
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}
