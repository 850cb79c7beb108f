// Pure field validators for the project form
// Validators only answer pass/fail; markers are applied by the presenter.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static COORDINATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?$").expect("valid coordinate pattern")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(19|20)[0-9]{2}-(0[1-9]|1[012])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("valid date pattern")
});

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Optional checks layered on top of the syntactic patterns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject latitudes outside ±90 and longitudes outside ±180
    pub check_coordinate_range: bool,
    /// Reject dates that do not exist, such as 2023-02-30
    pub check_calendar_dates: bool,
}

impl ValidationPolicy {
    pub fn strict() -> Self {
        Self {
            check_coordinate_range: true,
            check_calendar_dates: true,
        }
    }
}

/// Present and not blank
pub fn validate_text(value: Option<&str>) -> bool {
    value.map(|text| !text.trim().is_empty()).unwrap_or(false)
}

/// Signed decimal: optional `-`, no leading zeros, optional fraction.
/// ASCII digits only.
pub fn validate_coordinate(value: &str) -> bool {
    COORDINATE_PATTERN.is_match(value)
}

/// `YYYY-MM-DD` with a 19xx/20xx year; syntax only, so `2023-02-30` passes
pub fn validate_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}

pub fn validate_latitude(value: &str, policy: &ValidationPolicy) -> bool {
    validate_bounded_coordinate(value, MAX_LATITUDE, policy)
}

pub fn validate_longitude(value: &str, policy: &ValidationPolicy) -> bool {
    validate_bounded_coordinate(value, MAX_LONGITUDE, policy)
}

fn validate_bounded_coordinate(value: &str, limit: f64, policy: &ValidationPolicy) -> bool {
    if !validate_coordinate(value) {
        return false;
    }
    if !policy.check_coordinate_range {
        return true;
    }
    value
        .parse::<f64>()
        .map(|degrees| degrees.abs() <= limit)
        .unwrap_or(false)
}

pub fn validate_date_with(value: &str, policy: &ValidationPolicy) -> bool {
    if !validate_date(value) {
        return false;
    }
    !policy.check_calendar_dates || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
