//! Field validators.
//!
//! Every validator is a pure function of the field name, the value and (for
//! the date of birth) today's date. Blank values always pass: whether a field
//! must be filled in is decided by required-marking at the input level, not
//! here. Unknown field names pass too.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use leadform_types::error::FieldError;
use leadform_types::field::FieldName;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("valid date pattern")
});

static PHONE_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("valid phone strip pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone pattern"));

static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid zip pattern"));

/// Earliest accepted birth year.
const MIN_BIRTH_YEAR: i32 = 1900;

/// Validate a field by its wire name against today's local date.
pub fn validate_field(name: &str, value: &str) -> Result<(), FieldError> {
    validate_field_on(name, value, Local::now().date_naive())
}

/// Validate a field by its wire name, with "today" supplied by the caller.
pub fn validate_field_on(name: &str, value: &str, today: NaiveDate) -> Result<(), FieldError> {
    match name.parse::<FieldName>() {
        Ok(field) => validate_named(field, value, today),
        Err(_) => Ok(()),
    }
}

/// Validate a known field.
pub fn validate_named(field: FieldName, value: &str, today: NaiveDate) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    match field {
        FieldName::Email => validate_email(value),
        FieldName::DateOfBirth => validate_date_of_birth(value, today),
        FieldName::PhoneNumber => validate_phone(value),
        FieldName::Zip => validate_zip(value),
        _ => Ok(()),
    }
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidEmail)
    }
}

/// `MM/DD/YYYY`, a real calendar date, born no earlier than 1900 and not in
/// the future.
pub fn validate_date_of_birth(value: &str, today: NaiveDate) -> Result<(), FieldError> {
    let captures = DATE_RE.captures(value).ok_or(FieldError::DateFormat)?;

    // The pattern guarantees ASCII digits of fixed width.
    let month: u32 = captures[1].parse().map_err(|_| FieldError::DateFormat)?;
    let day: u32 = captures[2].parse().map_err(|_| FieldError::DateFormat)?;
    let year: i32 = captures[3].parse().map_err(|_| FieldError::DateFormat)?;

    if !(1..=12).contains(&month) {
        return Err(FieldError::InvalidMonth);
    }
    if !(1..=31).contains(&day) {
        return Err(FieldError::InvalidDay);
    }

    let current_year = today.year();
    if !(MIN_BIRTH_YEAR..=current_year).contains(&year) {
        return Err(FieldError::InvalidYear { max: current_year });
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(FieldError::InvalidDate)?;
    if date > today {
        return Err(FieldError::FutureDate);
    }

    Ok(())
}

/// Strip spaces, hyphens and parentheses from a phone number.
pub fn normalize_phone(value: &str) -> String {
    PHONE_STRIP_RE.replace_all(value, "").into_owned()
}

pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    if PHONE_RE.is_match(&normalize_phone(value)) {
        Ok(())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

pub fn validate_zip(value: &str) -> Result<(), FieldError> {
    if ZIP_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::InvalidZip)
    }
}
