//! Actions: tagged state-change intents consumed by the reducers.
//!
//! Every variant carries its own typed payload. The serialized shape is
//! `{"kind": "<KIND>", "payload": ...}` so the wire form matches the action
//! kinds the forms were originally written against.

use serde::{Deserialize, Serialize};

use crate::form::{FieldError, FieldInput, FormError, Session, SocialProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFlag {
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Payload of a failed signup. `errors` may be absent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPayload {
    pub provider: SocialProvider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatePayload {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // Signup slice
    ClearSignupForm,
    SignupFormSubmit(SubmitFlag),
    SignupForm(FieldInput),
    SignupSuccess(StatusMessage),
    SignupFailure(SignupFailure),
    EmailVerificationSuccess(String),
    EmailVerificationError(String),

    // Login slice
    HandleLoginInput(FieldInput),
    LoginSubmit(SubmitFlag),
    LoginValidated(Option<FormError>),
    LoginSuccess(Session),
    LoginFailure(FormError),
    ClearLoginForm,
    SocialAuthRequest(SocialPayload),

    // Current user / routing
    Logout,
    Navigate(NavigatePayload),
}

impl Action {
    /// Returns the action kind as it appears in the serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ClearSignupForm => "CLEAR_SIGNUP_FORM",
            Action::SignupFormSubmit(_) => "SIGNUP_FORM_SUBMIT",
            Action::SignupForm(_) => "SIGNUP_FORM",
            Action::SignupSuccess(_) => "SIGNUP_SUCCESS",
            Action::SignupFailure(_) => "SIGNUP_FAILURE",
            Action::EmailVerificationSuccess(_) => "EMAIL_VERIFICATION_SUCCESS",
            Action::EmailVerificationError(_) => "EMAIL_VERIFICATION_ERROR",
            Action::HandleLoginInput(_) => "HANDLE_LOGIN_INPUT",
            Action::LoginSubmit(_) => "LOGIN_SUBMIT",
            Action::LoginValidated(_) => "LOGIN_VALIDATED",
            Action::LoginSuccess(_) => "LOGIN_SUCCESS",
            Action::LoginFailure(_) => "LOGIN_FAILURE",
            Action::ClearLoginForm => "CLEAR_LOGIN_FORM",
            Action::SocialAuthRequest(_) => "SOCIAL_AUTH_REQUEST",
            Action::Logout => "LOGOUT",
            Action::Navigate(_) => "NAVIGATE",
        }
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Action::Navigate(NavigatePayload { path: path.into() })
    }

    pub fn login_submit(submitting: bool) -> Self {
        Action::LoginSubmit(SubmitFlag { submitting })
    }

    pub fn signup_submit(submitting: bool) -> Self {
        Action::SignupFormSubmit(SubmitFlag { submitting })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_handle_login_input_wire_shape() {
        let action = Action::HandleLoginInput(FieldInput::new("username", "email@email.com"));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "HANDLE_LOGIN_INPUT",
                "payload": { "field": "username", "value": "email@email.com" }
            })
        );
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let actions = [
            Action::ClearSignupForm,
            Action::signup_submit(true),
            Action::EmailVerificationError("bad token".to_string()),
            Action::LoginValidated(None),
            Action::Logout,
            Action::navigate("/"),
            Action::SocialAuthRequest(SocialPayload {
                provider: SocialProvider::Twitter,
            }),
        ];
        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["kind"], action.kind());
        }
    }

    #[test]
    fn test_signup_failure_without_errors_decodes() {
        let action: Action = serde_json::from_value(json!({
            "kind": "SIGNUP_FAILURE",
            "payload": { "message": "X" }
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::SignupFailure(SignupFailure {
                message: "X".to_string(),
                errors: None,
            })
        );
    }

    #[test]
    fn test_social_provider_serializes_lowercase() {
        let action = Action::SocialAuthRequest(SocialPayload {
            provider: SocialProvider::Google,
        });
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["payload"]["provider"], "google");
    }
}
