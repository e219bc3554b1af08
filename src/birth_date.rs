// Date of birth - DD/MM/YYYY parsing, long-form rendering, calendar-year age

use crate::errors::{Field, RecordError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// chrono pattern for the accepted input (e.g. "29/02/2020")
pub const INPUT_FORMAT: &str = "%d/%m/%Y";

/// chrono pattern for `format_long` (e.g. "Saturday, February 29, 2020")
pub const LONG_FORMAT: &str = "%A, %B %d, %Y";

pub const EXPECTED_DATE: &str = "DD/MM/YYYY";

// chrono accepts single-digit days/months and signed years for %d/%m/%Y,
// so the fixed-width shape is checked first
static SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("date shape pattern is valid"));

/// Parse a DD/MM/YYYY date.
///
/// Any calendar date is accepted (no future/past bounds). Impossible days such as
/// 31/02 fail with `InvalidFormat` carrying chrono's error as the cause.
pub fn parse(raw: &str) -> Result<NaiveDate> {
    if !SHAPE.is_match(raw) {
        return Err(RecordError::invalid(Field::DateOfBirth, raw, EXPECTED_DATE));
    }

    NaiveDate::parse_from_str(raw, INPUT_FORMAT).map_err(|e| RecordError::InvalidFormat {
        field: Field::DateOfBirth,
        input: raw.to_string(),
        expected: EXPECTED_DATE,
        cause: Some(e),
    })
}

pub fn format_long(date: NaiveDate) -> String {
    date.format(LONG_FORMAT).to_string()
}

pub fn format_input(date: NaiveDate) -> String {
    date.format(INPUT_FORMAT).to_string()
}

/// Difference in calendar years only.
///
/// Month and day are ignored, so the result is one more than the elapsed
/// years whenever `today` falls before the birthday in its year.
pub fn calendar_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth.year()
}
