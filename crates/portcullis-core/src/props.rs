//! Mapping functions between the store and the form views.
//!
//! `map_state_to_props` derives what a view reads; `map_dispatch_to_props`
//! wraps a dispatcher into the callbacks a view invokes. Neither holds
//! state of its own.

use crate::action::{Action, SocialPayload};
use crate::form::{Credentials, FieldError, FieldInput, FormError, SignupForm, VERIFICATION_TOKEN};
use crate::session::AuthRequest;
use crate::state::{RootState, SignupOutcome};
use crate::store::Dispatch;
use crate::validation::{Validation, ValidationRules, validate_credentials};

/// Props the login view derives from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginViewState {
    pub credentials: Credentials,
    pub error: Option<FormError>,
    pub submitting: bool,
    pub is_logged_in: bool,
}

pub fn map_state_to_props(state: &RootState) -> LoginViewState {
    LoginViewState {
        credentials: state.login.credentials.clone(),
        error: state.login.error.clone(),
        submitting: state.login.submitting,
        is_logged_in: state.current_user.is_logged_in,
    }
}

/// Props the signup view derives from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupViewState {
    pub form: SignupForm,
    pub errors: Vec<FieldError>,
    pub message: String,
    pub success_message: String,
    pub submitting: bool,
    pub verification_token: String,
    pub confirm_message: String,
}

/// Only the latest signup result is passed on: after a success the failure
/// message and field errors are dropped, and after a failure the success
/// message is.
pub fn map_signup_state_to_props(state: &RootState) -> SignupViewState {
    let signup = &state.signup;
    let (message, errors, success_message) = match state.signup_outcome {
        SignupOutcome::Succeeded => (String::new(), Vec::new(), signup.success_message.clone()),
        SignupOutcome::Failed => (signup.message.clone(), signup.errors.clone(), String::new()),
        SignupOutcome::Pending => (
            signup.message.clone(),
            signup.errors.clone(),
            signup.success_message.clone(),
        ),
    };
    SignupViewState {
        form: signup.to_form(),
        errors,
        message,
        success_message,
        submitting: signup.submitting,
        verification_token: signup.field(VERIFICATION_TOKEN).to_string(),
        confirm_message: signup.confirm_message.clone(),
    }
}

/// Login callbacks bound to a dispatcher.
pub struct LoginDispatch<'a, D: Dispatch> {
    dispatch: &'a mut D,
}

pub fn map_dispatch_to_props<D: Dispatch>(dispatch: &mut D) -> LoginDispatch<'_, D> {
    LoginDispatch { dispatch }
}

impl<D: Dispatch> LoginDispatch<'_, D> {
    pub fn handle_input(&mut self, payload: FieldInput) {
        self.dispatch.dispatch(Action::HandleLoginInput(payload));
    }

    /// Runs the local rules and records the outcome in the login slice.
    pub fn validate(&mut self, credentials: &Credentials, rules: &ValidationRules) -> Validation {
        let validation = validate_credentials(credentials, rules);
        self.dispatch
            .dispatch(Action::LoginValidated(validation.error().cloned()));
        validation
    }

    /// Marks the form as submitting and hands back the request to run.
    pub fn login(&mut self, credentials: Credentials) -> AuthRequest {
        self.dispatch.dispatch(Action::login_submit(true));
        AuthRequest::Login(credentials)
    }

    pub fn social_auth(&mut self, payload: SocialPayload) -> AuthRequest {
        let provider = payload.provider;
        self.dispatch.dispatch(Action::SocialAuthRequest(payload));
        AuthRequest::Social(provider)
    }

    pub fn navigate(&mut self, path: &str) {
        self.dispatch.dispatch(Action::navigate(path));
    }
}

/// Signup callbacks bound to a dispatcher.
pub struct SignupDispatch<'a, D: Dispatch> {
    dispatch: &'a mut D,
}

pub fn map_signup_dispatch_to_props<D: Dispatch>(dispatch: &mut D) -> SignupDispatch<'_, D> {
    SignupDispatch { dispatch }
}

impl<D: Dispatch> SignupDispatch<'_, D> {
    pub fn handle_input(&mut self, payload: FieldInput) {
        self.dispatch.dispatch(Action::SignupForm(payload));
    }

    /// Surfaces locally detected errors the same way a rejected request would.
    pub fn reject(&mut self, errors: Vec<FieldError>) {
        self.dispatch
            .dispatch(Action::SignupFailure(crate::action::SignupFailure {
                message: "Please fix the highlighted fields".to_string(),
                errors: Some(errors),
            }));
    }

    pub fn signup(&mut self, form: SignupForm) -> AuthRequest {
        self.dispatch.dispatch(Action::signup_submit(true));
        AuthRequest::Signup(form)
    }

    /// Hands back the verification request for a pasted token. A blank
    /// token is answered locally with a verification error.
    pub fn verify_email(&mut self, token: &str) -> Option<AuthRequest> {
        let token = token.trim();
        if token.is_empty() {
            self.dispatch.dispatch(Action::EmailVerificationError(
                "Enter the verification token".to_string(),
            ));
            return None;
        }
        Some(AuthRequest::VerifyEmail(token.to_string()))
    }

    pub fn clear(&mut self) {
        self.dispatch.dispatch(Action::ClearSignupForm);
    }

    pub fn navigate(&mut self, path: &str) {
        self.dispatch.dispatch(Action::navigate(path));
    }
}
