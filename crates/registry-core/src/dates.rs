//! Display formatting for server dates (vi-VN short date, `d/m/YYYY`).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|datetime| datetime.date())
}

/// Empty input renders empty; input that is not a date is shown as-is.
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match parse_date(value) {
        Some(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        None => value.to_string(),
    }
}

pub fn format_optional_date(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_default()
}
