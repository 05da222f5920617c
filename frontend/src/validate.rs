//! Client-side checks run before a form is submitted.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{ValidationError, MIN_PASSWORD_LEN};
use crate::model::parse_wire_date;

pub fn email(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    Ok(trimmed.to_string())
}

/// Length is counted in characters, not bytes.
pub fn password(input: &str) -> Result<(), ValidationError> {
    let len = input.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { len });
    }
    Ok(())
}

/// Parses a strictly positive amount typed by the user.
pub fn positive_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidAmount {
        input: input.to_string(),
    })?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(amount)
}

/// A select left on its placeholder has no id (or id 0).
pub fn category(selected: Option<i64>) -> Result<i64, ValidationError> {
    match selected {
        Some(id) if id != 0 => Ok(id),
        _ => Err(ValidationError::MissingCategory),
    }
}

pub fn date(input: &str) -> Result<NaiveDate, ValidationError> {
    parse_wire_date(input).ok_or_else(|| ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

pub fn month(month: u32) -> Result<u32, ValidationError> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ValidationError::InvalidMonth { month })
    }
}
