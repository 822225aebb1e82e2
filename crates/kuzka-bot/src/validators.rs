//! Format checks for free-text answers.
//!
//! Each validator takes the raw message text and returns the value to store.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// A rejected answer. The message is shown to the customer above the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("ИНН должен быть 10 или 12 цифр.")]
    TaxId,

    #[error("Некорректный email. Пример: example@mail.ru")]
    Email,

    #[error("Имя должно быть минимум 2 символа.")]
    Name,

    #[error("Неверный формат. Пример: +71231234567 или 81231234567")]
    Phone,
}

fn tax_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[0-9]{10}|[0-9]{12})$").expect("Invalid regex pattern"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("Invalid regex pattern"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\+7|8)[0-9]{10}$").expect("Invalid regex pattern"))
}

/// INN: exactly 10 or 12 ASCII digits.
pub fn validate_tax_id(input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if tax_id_regex().is_match(value) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::TaxId)
    }
}

/// Email: `local@domain.tld`, the domain part must contain a dot.
pub fn validate_email(input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if email_regex().is_match(value) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::Email)
    }
}

/// Name: at least two characters after trimming.
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if value.chars().count() >= 2 {
        Ok(value.to_string())
    } else {
        Err(ValidationError::Name)
    }
}

/// Phone: `+7` or `8` followed by exactly ten digits, no separators.
pub fn validate_phone(input: &str) -> Result<String, ValidationError> {
    let value = input.trim();
    if phone_regex().is_match(value) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::Phone)
    }
}
