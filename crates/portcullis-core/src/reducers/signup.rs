//! Signup form reducer.

use crate::action::Action;
use crate::state::SignupFormState;

/// Folds one action into the signup slice.
///
/// Actions that belong to other slices return `state` untouched.
pub fn reduce(state: SignupFormState, action: &Action) -> SignupFormState {
    match action {
        Action::ClearSignupForm => SignupFormState::default(),
        Action::SignupFormSubmit(flag) => SignupFormState {
            submitting: flag.submitting,
            ..state
        },
        Action::SignupForm(input) => {
            let mut fields = state.fields;
            fields.insert(input.field.clone(), input.value.clone());
            SignupFormState {
                fields,
                errors: Vec::new(),
                message: String::new(),
                ..state
            }
        }
        Action::SignupSuccess(status) => SignupFormState {
            success_message: status.message.clone(),
            submitting: false,
            ..state
        },
        Action::SignupFailure(failure) => SignupFormState {
            message: failure.message.clone(),
            errors: failure.errors.clone().unwrap_or_default(),
            submitting: false,
            ..state
        },
        // Both verification outcomes land in the same field.
        Action::EmailVerificationSuccess(message) | Action::EmailVerificationError(message) => {
            SignupFormState {
                confirm_message: message.clone(),
                ..state
            }
        }
        Action::HandleLoginInput(_)
        | Action::LoginSubmit(_)
        | Action::LoginValidated(_)
        | Action::LoginSuccess(_)
        | Action::LoginFailure(_)
        | Action::ClearLoginForm
        | Action::SocialAuthRequest(_)
        | Action::Logout
        | Action::Navigate(_) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{SignupFailure, StatusMessage};
    use crate::form::{FieldError, FieldInput, FormError};

    fn dirty_state() -> SignupFormState {
        let mut state = SignupFormState {
            submitting: true,
            errors: vec![FieldError::new("email", "Email is taken")],
            message: "Signup failed".to_string(),
            success_message: "old".to_string(),
            confirm_message: "pending".to_string(),
            ..SignupFormState::default()
        };
        state
            .fields
            .insert("username".to_string(), "christian".to_string());
        state
    }

    #[test]
    fn test_unrelated_actions_are_identity() {
        let actions = [
            Action::HandleLoginInput(FieldInput::new("username", "x")),
            Action::login_submit(true),
            Action::LoginFailure(FormError::new("nope")),
            Action::ClearLoginForm,
            Action::Logout,
            Action::navigate("/"),
        ];
        for action in &actions {
            assert_eq!(reduce(dirty_state(), action), dirty_state());
        }
    }

    #[test]
    fn test_clear_form_resets_to_initial() {
        let next = reduce(dirty_state(), &Action::ClearSignupForm);
        assert_eq!(next, SignupFormState::default());
    }

    #[test]
    fn test_submit_only_touches_submitting() {
        let mut expected = dirty_state();
        expected.submitting = false;
        assert_eq!(reduce(dirty_state(), &Action::signup_submit(false)), expected);
    }

    #[test]
    fn test_field_edit_sets_value_and_clears_errors() {
        let next = reduce(
            dirty_state(),
            &Action::SignupForm(FieldInput::new("email", "a@b.co")),
        );
        assert_eq!(next.field("email"), "a@b.co");
        assert_eq!(next.field("username"), "christian");
        assert!(next.errors.is_empty());
        assert!(next.message.is_empty());
        assert!(next.submitting);
        assert_eq!(next.confirm_message, "pending");
    }

    #[test]
    fn test_field_edit_overwrites_existing_value() {
        let next = reduce(
            dirty_state(),
            &Action::SignupForm(FieldInput::new("username", "other")),
        );
        assert_eq!(next.field("username"), "other");
    }

    #[test]
    fn test_success_sets_message_and_stops_submitting() {
        let next = reduce(
            dirty_state(),
            &Action::SignupSuccess(StatusMessage {
                message: "Check your email".to_string(),
            }),
        );
        assert_eq!(next.success_message, "Check your email");
        assert!(!next.submitting);
    }

    #[test]
    fn test_failure_without_errors_defaults_to_empty() {
        let next = reduce(
            dirty_state(),
            &Action::SignupFailure(SignupFailure {
                message: "X".to_string(),
                errors: None,
            }),
        );
        assert_eq!(next.message, "X");
        assert!(next.errors.is_empty());
        assert!(!next.submitting);
    }

    #[test]
    fn test_failure_keeps_error_order() {
        let errors = vec![
            FieldError::new("username", "Username is taken"),
            FieldError::new("password", "Password too weak"),
        ];
        let next = reduce(
            SignupFormState::default(),
            &Action::SignupFailure(SignupFailure {
                message: "Invalid".to_string(),
                errors: Some(errors.clone()),
            }),
        );
        assert_eq!(next.errors, errors);
    }

    #[test]
    fn test_email_verification_branches_write_confirm_message() {
        let ok = reduce(
            dirty_state(),
            &Action::EmailVerificationSuccess("Email verified".to_string()),
        );
        assert_eq!(ok.confirm_message, "Email verified");

        let err = reduce(
            dirty_state(),
            &Action::EmailVerificationError("Invalid token".to_string()),
        );
        assert_eq!(err.confirm_message, "Invalid token");
        assert_eq!(err.message, dirty_state().message);
    }
}
