//! Validation for the email/password forms. Checks are UX-only; the backend
//! remains the authority on credentials.

use crate::features::auth::types::{LoginRequest, RegisterRequest};
use regex::Regex;

const MIN_PASSWORD_CHARS: usize = 8;

/// Normalize an email before it is submitted.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// Builds a login request or returns the message to show under the form.
///
/// # Errors
///
/// Returns a user-facing message when a field is missing or malformed.
pub fn login_request(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = normalize_email(email);
    if email.is_empty() || password.trim().is_empty() {
        return Err("Email and password are required.");
    }
    if !valid_email(&email) {
        return Err("Email address looks invalid.");
    }
    Ok(LoginRequest {
        email,
        password: password.to_string(),
    })
}

/// Builds a register request or returns the message to show under the form.
///
/// # Errors
///
/// Returns a user-facing message when a field is missing or malformed.
pub fn register_request(
    name: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required.");
    }
    let login = login_request(email, password)?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 8 characters.");
    }
    Ok(RegisterRequest {
        email: login.email,
        password: login.password,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{login_request, register_request, valid_email};

    #[test]
    fn valid_email_accepts_common_shapes() {
        assert!(valid_email("ada@example.com"));
        assert!(!valid_email("ada@example"));
        assert!(!valid_email("ada example.com"));
    }

    #[test]
    fn login_request_normalizes_email_and_keeps_password() {
        let request = login_request("  Ada@Example.COM ", " secret ").unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.password, " secret ");
    }

    #[test]
    fn login_request_rejects_blank_fields() {
        assert!(login_request("", "secret").is_err());
        assert!(login_request("ada@example.com", "   ").is_err());
        assert!(login_request("nope", "secret").is_err());
    }

    #[test]
    fn register_request_enforces_name_and_length() {
        assert_eq!(
            register_request(" ", "ada@example.com", "longenough"),
            Err("Name is required.")
        );
        assert_eq!(
            register_request("Ada", "ada@example.com", "short"),
            Err("Password must be at least 8 characters.")
        );
        let request = register_request(" Ada ", "ada@example.com", "longenough").unwrap();
        assert_eq!(request.name, "Ada");
    }
}
