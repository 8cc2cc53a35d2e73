//! Small helpers for credential and code validation.

use regex::Regex;

pub(super) const MIN_PASSWORD_CHARS: usize = 6;
pub(super) const OTP_CODE_LEN: usize = 6;

/// Normalize an email for lookup and display.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub(super) fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

pub(super) fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

/// Exactly six ASCII digits; checked before any network call is made.
pub(super) fn valid_otp_code(code: &str) -> bool {
    code.len() == OTP_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing@tld"));
        assert!(!valid_email("@example.com"));
    }

    #[test]
    fn password_minimum_is_six_chars() {
        assert!(valid_password("password123"));
        assert!(valid_password("abcdef"));
        assert!(!valid_password("abcde"));
    }

    #[test]
    fn otp_code_is_exactly_six_digits() {
        assert!(valid_otp_code("123456"));
        assert!(valid_otp_code("000000"));
        assert!(!valid_otp_code("12345"));
        assert!(!valid_otp_code("1234567"));
        assert!(!valid_otp_code("12345a"));
        assert!(!valid_otp_code("12 456"));
    }
}
