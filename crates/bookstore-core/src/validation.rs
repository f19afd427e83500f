//! Form Validators
//!
//! Each validator returns `None` when the input is acceptable and an
//! English message otherwise, so views can show the result directly under
//! the field.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex"));

pub const PASSWORD_MIN_LEN: usize = 8;

pub fn required(value: &str, field: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} is required", field))
    } else {
        None
    }
}

pub fn min_length(value: &str, min: usize, field: &str) -> Option<String> {
    if value.trim().chars().count() < min {
        Some(format!("{} must be at least {} characters", field, min))
    } else {
        None
    }
}

pub fn email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Email is required".to_string());
    }
    if EMAIL_RE.is_match(value) {
        None
    } else {
        Some("Enter a valid email address".to_string())
    }
}

/// Digits with an optional leading `+`; spaces, dashes and parentheses are ignored.
pub fn phone(value: &str) -> Option<String> {
    let compact: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if compact.is_empty() {
        return Some("Phone number is required".to_string());
    }
    if PHONE_RE.is_match(&compact) {
        None
    } else {
        Some("Enter a valid phone number".to_string())
    }
}

pub fn password(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Password is required".to_string());
    }
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Some(format!("Password must be at least {} characters", PASSWORD_MIN_LEN));
    }
    let has_letter = value.chars().any(|c| c.is_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Some("Password must contain letters and numbers".to_string());
    }
    None
}

pub fn confirm_password(password: &str, confirmation: &str) -> Option<String> {
    if confirmation.is_empty() {
        Some("Please confirm your password".to_string())
    } else if password != confirmation {
        Some("Passwords do not match".to_string())
    } else {
        None
    }
}

pub fn name(value: &str) -> Option<String> {
    let len = value.trim().chars().count();
    if len == 0 {
        Some("Name is required".to_string())
    } else if len < 2 {
        Some("Name is too short".to_string())
    } else if len > 100 {
        Some("Name is too long".to_string())
    } else {
        None
    }
}

/// `YYYY-MM-DD` naming a real calendar day.
pub fn date(value: &str) -> Option<String> {
    let value = value.trim();
    if !DATE_RE.is_match(value) || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        Some("Enter a date as YYYY-MM-DD".to_string())
    } else {
        None
    }
}

/// ISBN-10 (last digit may be `X`) or ISBN-13, hyphens and spaces ignored.
pub fn isbn(value: &str) -> Option<String> {
    let compact: Vec<char> = value
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .collect();
    let valid = match compact.len() {
        10 => {
            let mut sum = 0u32;
            let mut ok = true;
            for (i, c) in compact.iter().enumerate() {
                let digit = match (i, *c) {
                    (9, 'X') | (9, 'x') => 10,
                    (_, c) => match c.to_digit(10) {
                        Some(d) => d,
                        None => {
                            ok = false;
                            break;
                        }
                    },
                };
                sum += digit * (10 - i as u32);
            }
            ok && sum % 11 == 0
        }
        13 => {
            let digits: Option<Vec<u32>> = compact.iter().map(|c| c.to_digit(10)).collect();
            match digits {
                Some(d) => {
                    let sum: u32 = d
                        .iter()
                        .enumerate()
                        .map(|(i, v)| if i % 2 == 0 { *v } else { v * 3 })
                        .sum();
                    sum % 10 == 0
                }
                None => false,
            }
        }
        _ => false,
    };
    if valid {
        None
    } else {
        Some("Enter a valid ISBN-10 or ISBN-13".to_string())
    }
}

pub fn price(value: &str) -> Option<String> {
    match value.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => None,
        Ok(_) => Some("Price cannot be negative".to_string()),
        Err(_) => Some("Enter a valid price".to_string()),
    }
}

pub fn quantity(value: &str) -> Option<String> {
    match value.trim().parse::<u32>() {
        Ok(q) if q > 0 => None,
        _ => Some("Enter a whole number greater than zero".to_string()),
    }
}

/// First failing message out of a form's checks.
pub fn validate_all<I>(checks: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    checks.into_iter().flatten().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(email("bad").is_some());
        assert!(email("a@b").is_some());
        assert!(email("").is_some());
        assert!(email("a@b.com").is_none());
        assert!(email("  first.last+tag@mail.example.org ").is_none());
    }

    #[test]
    fn test_phone() {
        assert!(phone("+1 (555) 123-4567").is_none());
        assert!(phone("0912345678").is_none());
        assert!(phone("12345").is_some());
        assert!(phone("phone").is_some());
        assert_eq!(phone(""), Some("Phone number is required".to_string()));
    }

    #[test]
    fn test_password_rules() {
        assert!(password("short1").is_some());
        assert!(password("longenough").is_some());
        assert!(password("12345678").is_some());
        assert!(password("abcd1234").is_none());
        assert_eq!(confirm_password("abcd1234", "abcd1235"), Some("Passwords do not match".to_string()));
        assert!(confirm_password("abcd1234", "abcd1234").is_none());
    }

    #[test]
    fn test_required_and_name() {
        assert_eq!(required("  ", "Title"), Some("Title is required".to_string()));
        assert!(required("x", "Title").is_none());
        assert!(name("A").is_some());
        assert!(name("Al").is_none());
        assert!(min_length("abc", 4, "Subject").is_some());
    }

    #[test]
    fn test_date() {
        assert!(date("2024-02-29").is_none());
        assert!(date("2023-02-29").is_some());
        assert!(date("2024-2-1").is_some());
        assert!(date("01/02/2024").is_some());
    }

    #[test]
    fn test_isbn() {
        assert!(isbn("0-306-40615-2").is_none());
        assert!(isbn("978-0-306-40615-7").is_none());
        assert!(isbn("0-8044-2957-X").is_none());
        assert!(isbn("978-0-306-40615-8").is_some());
        assert!(isbn("12345").is_some());
    }

    #[test]
    fn test_price_and_quantity() {
        assert!(price("12.50").is_none());
        assert!(price("0").is_none());
        assert!(price("-1").is_some());
        assert!(price("ten").is_some());
        assert!(quantity("3").is_none());
        assert!(quantity("0").is_some());
        assert!(quantity("1.5").is_some());
    }

    #[test]
    fn test_validate_all_returns_first_error() {
        let result = validate_all([email("a@b.com"), password("x"), name("")]);
        assert_eq!(result, password("x"));
        assert!(validate_all([None, None]).is_none());
    }
}
