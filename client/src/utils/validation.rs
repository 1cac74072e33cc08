//! Validation utilities for sign-in and sign-up input.
//!
//! Catches obvious mistakes before a request is sent. Password and name rules
//! match the backend; the email check is stricter than the backend's (which
//! only wants an `@`), also requiring a dotted domain. The backend stays
//! authoritative either way.

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let Some((local, domain)) = email.split_once('@') else {
        return ValidationResult::err("Please enter a valid email address");
    };

    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return ValidationResult::err("Please enter a valid email address");
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => ValidationResult::ok(),
        _ => ValidationResult::err("Please enter a valid email address"),
    }
}

/// Validate password length
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ));
    }

    ValidationResult::ok()
}

/// Validate display name
pub fn validate_name(name: &str) -> ValidationResult {
    if name.trim().is_empty() {
        return ValidationResult::err("Name is required");
    }

    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_valid);
        assert!(validate_email(" user@domain.co.uk ").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("test@").is_valid);
        // Passes the backend's `@` check but has no dotted domain.
        assert!(!validate_email("test@localhost").is_valid);
        assert!(!validate_email("a@b@c.com").is_valid);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("secret").is_valid);
        assert!(!validate_password("").is_valid);
        let short = validate_password("abc");
        assert!(!short.is_valid);
        assert_eq!(
            short.error.as_deref(),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Ana").is_valid);
        assert!(!validate_name("   ").is_valid);
    }
}
