//! Client-side form checks, run before any request is sent

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::MIN_PASSWORD_LEN;
use crate::error::ApiError;

type Checked<T> = Result<T, ApiError>;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// Trimmed value of a required field
pub fn required(value: &str, label: &str) -> Checked<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}

pub fn email(value: &str) -> Checked<String> {
    let value = required(value, "Email")?;
    if !email_pattern().is_match(&value) {
        return Err(ApiError::validation("Please enter a valid email address"));
    }
    Ok(value)
}

/// Password plus confirmation, as on the register form
pub fn new_password(password: &str, confirm: &str) -> Checked<String> {
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    if password != confirm {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(password.to_string())
}

/// Integer within an inclusive range
pub fn int_in_range(value: &str, label: &str, min: i64, max: i64) -> Checked<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or_else(|| {
            ApiError::validation(format!("{} must be a whole number between {} and {}", label, min, max))
        })
}

/// Decimal within an inclusive range
pub fn number_in_range(value: &str, label: &str, min: f64, max: f64) -> Checked<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= min && *n <= max)
        .ok_or_else(|| ApiError::validation(format!("{} must be between {} and {}", label, min, max)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Heat ", "Title").unwrap(), "Heat");
        assert_eq!(
            required("   ", "Title").unwrap_err().to_string(),
            "Title is required"
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(email("kim@example.com").is_ok());
        assert!(email("kim@example").is_err());
        assert!(email("kim example.com").is_err());
        assert_eq!(email("").unwrap_err().to_string(), "Email is required");
    }

    #[test]
    fn test_password_rules() {
        assert!(new_password("hunter22", "hunter22").is_ok());
        assert_eq!(
            new_password("hunter22", "hunter23").unwrap_err().to_string(),
            "Passwords do not match"
        );
        assert!(new_password("abc", "abc").is_err());
    }

    #[test]
    fn test_ranges() {
        assert_eq!(int_in_range(" 2010 ", "Year", 1900, 2030).unwrap(), 2010);
        assert!(int_in_range("1899", "Year", 1900, 2030).is_err());
        assert!(int_in_range("twenty", "Year", 1900, 2030).is_err());
        assert_eq!(number_in_range("4.5", "Rating", 0.0, 5.0).unwrap(), 4.5);
        assert!(number_in_range("5.1", "Rating", 0.0, 5.0).is_err());
        assert!(number_in_range("NaN", "Rating", 0.0, 5.0).is_err());
    }
}
