//! Form validation: login, create-account, and change-password schemas.
//!
//! Each form holds raw user input and validates it into a domain value.
//! All failing fields are reported together, one message per field.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{Credentials, NewAccount, PasswordChange};

/// Minimum password length for new and changed passwords.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Storage prefilled in the create-account form, in megabytes.
pub const DEFAULT_STORAGE_MB: u64 = 1024;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const NEW_PASSWORD_TOO_SHORT: &str = "New password must be at least 6 characters";
pub const STORAGE_NOT_A_NUMBER: &str = "Storage must be a number";
pub const STORAGE_NOT_POSITIVE: &str = "Storage must be greater than 0";

/// A single field-level message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Field-level validation failures for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("invalid form input: {}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

/// Raw login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// The password has no minimum here; the backend decides.
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let email = self.email.trim();
        if let Some(message) = check_email(email) {
            errors.push("email", message);
        }
        errors.into_result(|| Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Raw create-account form input. Storage is kept as typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountForm {
    pub email: String,
    pub password: String,
    pub storage: String,
}

impl Default for CreateAccountForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            storage: DEFAULT_STORAGE_MB.to_string(),
        }
    }
}

impl CreateAccountForm {
    pub fn validate(&self) -> Result<NewAccount, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let email = self.email.trim();
        if let Some(message) = check_email(email) {
            errors.push("email", message);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("password", PASSWORD_TOO_SHORT);
        }
        let storage = match parse_storage(&self.storage) {
            Ok(mb) => mb,
            Err(message) => {
                errors.push("storage", message);
                0
            }
        };
        errors.into_result(|| NewAccount {
            email: email.to_string(),
            password: self.password.clone(),
            storage,
        })
    }
}

/// Raw change-password form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<PasswordChange, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("password", NEW_PASSWORD_TOO_SHORT);
        }
        errors.into_result(|| PasswordChange {
            password: self.password.clone(),
        })
    }
}

/// Coerce typed storage input into a positive number of megabytes.
///
/// Accepts whole numbers, including float notation with no fractional part
/// (`"2048.0"`).
pub fn parse_storage(input: &str) -> Result<u64, &'static str> {
    let trimmed = input.trim();
    if let Ok(mb) = trimmed.parse::<u64>() {
        return if mb > 0 { Ok(mb) } else { Err(STORAGE_NOT_POSITIVE) };
    }
    match trimmed.parse::<f64>() {
        Ok(n) if !n.is_finite() || n.fract() != 0.0 => Err(STORAGE_NOT_A_NUMBER),
        Ok(n) if n <= 0.0 => Err(STORAGE_NOT_POSITIVE),
        Ok(n) if n > u64::MAX as f64 => Err(STORAGE_NOT_A_NUMBER),
        Ok(n) => Ok(n as u64),
        Err(_) => Err(STORAGE_NOT_A_NUMBER),
    }
}

fn check_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

/// `local@domain.tld`: dot-separated atoms before the `@`, hostname labels
/// that neither start nor end with `-`, and an alphabetic TLD.
fn email_pattern() -> &'static Regex {
    static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        )
        .expect("email pattern is valid")
    });
    &PATTERN
}

/// Syntactic email check.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}
