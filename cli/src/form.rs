//! Login form validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session core performs no validation of its own; malformed input is
//! stopped here before a login request is ever sent.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use authshell::Credentials;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Enter an email address.")]
    MissingEmail,
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Enter a password.")]
    MissingPassword,
    #[error("Password must be at least {} characters.", MIN_PASSWORD_LEN)]
    PasswordTooShort,
}

/// Trim and check the email shape (`local@domain`, both parts non-empty).
pub fn validate_email(email: &str) -> Result<String, FormError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FormError::MissingEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_owned())
        }
        _ => Err(FormError::InvalidEmail),
    }
}

/// Passwords are taken verbatim; only presence and length are checked.
pub fn validate_password(password: &str) -> Result<(), FormError> {
    if password.is_empty() {
        return Err(FormError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, FormError> {
    let email = validate_email(email)?;
    validate_password(password)?;
    Ok(Credentials::new(email, password))
}
