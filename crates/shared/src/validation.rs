//! Field validation rules for user registration and profile updates.
//!
//! Every validator runs all of its checks and returns the accepted value
//! together with the full list of violations, so a handler can report every
//! problem with a request in a single response. The value is only populated
//! when no rule was violated.

use validator::ValidationError;

/// Required country prefix for phone numbers.
pub const PHONE_NUMBER_PREFIX: &str = "+62";

const PHONE_NUMBER_MIN_LEN: usize = 10;
const PHONE_NUMBER_MAX_LEN: usize = 13;
const FULL_NAME_MIN_LEN: usize = 3;
const FULL_NAME_MAX_LEN: usize = 60;
const PASSWORD_MIN_LEN: usize = 6;
const PASSWORD_MAX_LEN: usize = 64;

/// Outcome of a field validator: the accepted value (empty when invalid)
/// and every rule it violated, in rule order.
pub type Validated = (String, Vec<ValidationError>);

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn finish(value: String, errors: Vec<ValidationError>) -> Validated {
    if errors.is_empty() {
        (value, errors)
    } else {
        (String::new(), errors)
    }
}

/// Validates a phone number.
///
/// Surrounding whitespace is trimmed and a missing value is treated as empty.
/// Rules, all evaluated:
/// 1. starts with `+62`
/// 2. 10 to 13 characters long, prefix included
/// 3. only ASCII digits after the prefix
pub fn validate_phone_number(input: Option<&str>) -> Validated {
    let phone_number = input.map(str::trim).unwrap_or_default();
    let mut errors = Vec::new();

    if !phone_number.starts_with(PHONE_NUMBER_PREFIX) {
        errors.push(violation(
            "phone_number_prefix",
            "phone_number should start with +62",
        ));
    }

    let len = phone_number.chars().count();
    if !(PHONE_NUMBER_MIN_LEN..=PHONE_NUMBER_MAX_LEN).contains(&len) {
        errors.push(violation(
            "phone_number_length",
            "phone_number should be 10 to 13 characters",
        ));
    }

    if !phone_number
        .chars()
        .skip(PHONE_NUMBER_PREFIX.len())
        .all(|c| c.is_ascii_digit())
    {
        errors.push(violation(
            "phone_number_digits",
            "phone_number should only contain numbers after the +62 prefix",
        ));
    }

    finish(phone_number.to_string(), errors)
}

/// Validates a full name: trimmed, 3 to 60 characters.
pub fn validate_full_name(input: Option<&str>) -> Validated {
    let full_name = input.map(str::trim).unwrap_or_default();
    let mut errors = Vec::new();

    let len = full_name.chars().count();
    if !(FULL_NAME_MIN_LEN..=FULL_NAME_MAX_LEN).contains(&len) {
        errors.push(violation(
            "full_name_length",
            "full_name should be 3 to 60 characters",
        ));
    }

    finish(full_name.to_string(), errors)
}

/// Validates a password.
///
/// The value is taken verbatim (no trimming). A password must be 6 to 64
/// characters and contain at least one capital letter, one number and one
/// character that is neither a letter nor a number. Each missing property is
/// reported on its own, the length rule does not hide the others.
pub fn validate_password(input: Option<&str>) -> Validated {
    let password = input.unwrap_or_default();
    let mut errors = Vec::new();

    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        errors.push(violation(
            "password_length",
            "password should be 6 to 64 characters",
        ));
    }

    let mut has_capital = false;
    let mut has_number = false;
    let mut has_special = false;
    for c in password.chars() {
        has_capital |= c.is_uppercase();
        has_number |= c.is_numeric();
        has_special |= !c.is_alphanumeric();
    }

    if !has_capital {
        errors.push(violation(
            "password_capital",
            "password should contain a capital letter",
        ));
    }
    if !has_number {
        errors.push(violation(
            "password_number",
            "password should contain a number",
        ));
    }
    if !has_special {
        errors.push(violation(
            "password_special",
            "password should contain a special character",
        ));
    }

    finish(password.to_string(), errors)
}

/// Flattens validation errors into their human-readable messages.
pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors
        .iter()
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect()
}
