//! Local form validation run before any request leaves the client.

use serde::{Deserialize, Serialize};

use crate::form::{Credentials, EMAIL, FieldError, FormError, PASSWORD, SignupForm, USERNAME};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub password_min_len: usize,
    pub require_username: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            password_min_len: 6,
            require_username: true,
        }
    }
}

/// Outcome of validating the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Invalid(FormError),
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok)
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            Validation::Ok => None,
            Validation::Invalid(error) => Some(error),
        }
    }

    pub fn into_error(self) -> Option<FormError> {
        match self {
            Validation::Ok => None,
            Validation::Invalid(error) => Some(error),
        }
    }
}

fn password_message(rules: &ValidationRules) -> String {
    format!(
        "Password must be at least {} characters",
        rules.password_min_len
    )
}

/// Returns the first rule the credentials break.
pub fn validate_credentials(credentials: &Credentials, rules: &ValidationRules) -> Validation {
    if rules.require_username && credentials.username.trim().is_empty() {
        return Validation::Invalid(FormError::new("Username or email is required"));
    }
    if credentials.password.chars().count() < rules.password_min_len {
        return Validation::Invalid(FormError::new(password_message(rules)));
    }
    Validation::Ok
}

/// Returns every rule the signup form breaks, in field order.
pub fn validate_signup(form: &SignupForm, rules: &ValidationRules) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if rules.require_username && form.username.trim().is_empty() {
        errors.push(FieldError::new(USERNAME, "Username is required"));
    }
    if !form.email.contains('@') {
        errors.push(FieldError::new(EMAIL, "Email is not valid"));
    }
    if form.password.chars().count() < rules.password_min_len {
        errors.push(FieldError::new(PASSWORD, password_message(rules)));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_message() {
        let result = validate_credentials(
            &Credentials::new("christian", "123"),
            &ValidationRules::default(),
        );
        assert_eq!(
            result.error().map(|e| e.message.as_str()),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_empty_username_reported_first() {
        let result =
            validate_credentials(&Credentials::new("  ", ""), &ValidationRules::default());
        assert_eq!(
            result.into_error(),
            Some(FormError::new("Username or email is required"))
        );
    }

    #[test]
    fn test_valid_credentials() {
        let result = validate_credentials(
            &Credentials::new("christian", "123456"),
            &ValidationRules::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_signup_collects_all_errors() {
        let form = SignupForm {
            username: String::new(),
            email: "nope".to_string(),
            password: "1".to_string(),
        };
        let fields: Vec<_> = validate_signup(&form, &ValidationRules::default())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, ["username", "email", "password"]);
    }

    #[test]
    fn test_custom_min_len() {
        let rules = ValidationRules {
            password_min_len: 10,
            ..ValidationRules::default()
        };
        let result = validate_credentials(&Credentials::new("a", "123456"), &rules);
        assert_eq!(
            result.into_error().map(|e| e.message),
            Some("Password must be at least 10 characters".to_string())
        );
    }
}
