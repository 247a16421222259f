// Client-side form validation, evaluated in fixed order.
//
// A violated rule surfaces as the store's error and gates the network
// call: the first failing rule's message wins and no request is issued.
// Required-field checks trim; length checks run on the raw value.

use secrecy::ExposeSecret;
use thiserror::Error;

use octoview_api::{LoginCredentials, RegisterData};

/// A violated client-side rule, carrying its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

pub const IDENTIFIER_REQUIRED: &str = "Email or username is required";
pub const IDENTIFIER_MIN_LENGTH: &str = "Email/username must be at least 3 characters";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_MIN_LENGTH: &str = "Password must be at least 6 characters";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_MIN_LENGTH: &str = "Username must be at least 3 characters";
pub const USERNAME_CHARSET: &str =
    "Username may only contain letters, numbers, and underscores";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_FORMAT: &str = "Enter a valid email address";

/// Login rules: identifier-required, identifier-min-length,
/// password-required, password-min-length.
pub fn validate_login(credentials: &LoginCredentials) -> Result<(), ValidationError> {
    if credentials.identifier.trim().is_empty() {
        return Err(ValidationError(IDENTIFIER_REQUIRED));
    }
    if credentials.identifier.len() < 3 {
        return Err(ValidationError(IDENTIFIER_MIN_LENGTH));
    }
    let password = credentials.password.expose_secret();
    if password.trim().is_empty() {
        return Err(ValidationError(PASSWORD_REQUIRED));
    }
    if password.len() < 6 {
        return Err(ValidationError(PASSWORD_MIN_LENGTH));
    }
    Ok(())
}

/// Registration rules: username-required, username-min-length,
/// username-charset, email-required, email-format, password-required,
/// password-min-length.
pub fn validate_registration(data: &RegisterData) -> Result<(), ValidationError> {
    if data.username.trim().is_empty() {
        return Err(ValidationError(USERNAME_REQUIRED));
    }
    if data.username.len() < 3 {
        return Err(ValidationError(USERNAME_MIN_LENGTH));
    }
    if !data
        .username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError(USERNAME_CHARSET));
    }
    if data.email.trim().is_empty() {
        return Err(ValidationError(EMAIL_REQUIRED));
    }
    if !is_plausible_email(&data.email) {
        return Err(ValidationError(EMAIL_FORMAT));
    }
    let password = data.password.expose_secret();
    if password.trim().is_empty() {
        return Err(ValidationError(PASSWORD_REQUIRED));
    }
    if password.len() < 6 {
        return Err(ValidationError(PASSWORD_MIN_LENGTH));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace. A form-level plausibility
/// check, not an RFC 5322 parser.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn login(identifier: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            identifier: identifier.into(),
            password: SecretString::from(password.to_owned()),
        }
    }

    fn registration(username: &str, email: &str, password: &str) -> RegisterData {
        RegisterData {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.to_owned()),
        }
    }

    #[test]
    fn login_rules_fire_in_order() {
        assert_eq!(
            validate_login(&login("  ", "secret1")).unwrap_err().0,
            IDENTIFIER_REQUIRED
        );
        assert_eq!(
            validate_login(&login("ab", "secret1")).unwrap_err().0,
            IDENTIFIER_MIN_LENGTH
        );
        assert_eq!(
            validate_login(&login("ada", "   ")).unwrap_err().0,
            PASSWORD_REQUIRED
        );
        assert_eq!(
            validate_login(&login("ada", "abc")).unwrap_err().0,
            PASSWORD_MIN_LENGTH
        );
        assert!(validate_login(&login("ada", "secret1")).is_ok());
    }

    #[test]
    fn registration_rules_fire_in_order() {
        let cases = [
            (registration("", "a@b.io", "secret1"), USERNAME_REQUIRED),
            (registration("ab", "a@b.io", "secret1"), USERNAME_MIN_LENGTH),
            (registration("a-b!", "a@b.io", "secret1"), USERNAME_CHARSET),
            (registration("ada", "", "secret1"), EMAIL_REQUIRED),
            (registration("ada", "not-an-email", "secret1"), EMAIL_FORMAT),
            (registration("ada", "a@b.io", ""), PASSWORD_REQUIRED),
            (registration("ada", "a@b.io", "abc"), PASSWORD_MIN_LENGTH),
        ];
        for (data, expected) in cases {
            assert_eq!(validate_registration(&data).unwrap_err().0, expected);
        }
        assert!(validate_registration(&registration("ada_99", "a@b.io", "secret1")).is_ok());
    }

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("user@example.com"));
        assert!(is_plausible_email("u.ser+tag@sub.example.co"));
        assert!(!is_plausible_email("user@example"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@"));
        assert!(!is_plausible_email("user@@example.com"));
        assert!(!is_plausible_email("us er@example.com"));
        assert!(!is_plausible_email("user@.com")); // empty domain name
    }
}
