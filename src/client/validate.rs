//! Input validation patterns for client records

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::data::ClientData;
use super::MIN_MONTHLY_INCOME;

// Surname, given name, patronymic: capitalized Cyrillic words, single spaces
static FULL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[А-ЯЁ][а-яё]+\s[А-ЯЁ][а-яё]+\s[А-ЯЁ][а-яё]+$").unwrap());

// Passport: 4-digit series, space, 6-digit number, validated jointly
static PASSPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}\s\d{6}$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("full name must be three capitalized words: surname, given name, patronymic")]
    MalformedName,
    #[error("passport must be in the format: 1234 567890")]
    MalformedPassport,
    #[error("birth date must be in the format: dd.mm.yyyy")]
    MalformedBirthDate,
    #[error("monthly income must be at least {0}")]
    IncomeBelowMinimum(u32),
}

pub(crate) fn validate_client(client: &ClientData) -> Result<(), ValidationError> {
    if !FULL_NAME.is_match(&client.full_name) {
        return Err(ValidationError::MalformedName);
    }

    let passport = format!("{} {}", client.passport_series, client.passport_number);
    if !PASSPORT.is_match(&passport) {
        return Err(ValidationError::MalformedPassport);
    }

    if NaiveDate::parse_from_str(&client.birth_date, "%d.%m.%Y").is_err() {
        return Err(ValidationError::MalformedBirthDate);
    }

    if client.monthly_income < MIN_MONTHLY_INCOME {
        return Err(ValidationError::IncomeBelowMinimum(MIN_MONTHLY_INCOME as u32));
    }

    Ok(())
}
