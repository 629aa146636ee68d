//! Login form reducer.

use crate::action::Action;
use crate::form::{PASSWORD, USERNAME};
use crate::state::LoginState;

pub fn reduce(state: LoginState, action: &Action) -> LoginState {
    match action {
        Action::HandleLoginInput(input) => {
            let mut credentials = state.credentials;
            match input.field.as_str() {
                USERNAME => credentials.username.clone_from(&input.value),
                PASSWORD => credentials.password.clone_from(&input.value),
                other => {
                    tracing::debug!(field = other, "ignoring unknown login field");
                }
            }
            LoginState {
                credentials,
                error: None,
                ..state
            }
        }
        Action::LoginSubmit(flag) => LoginState {
            submitting: flag.submitting,
            ..state
        },
        Action::LoginValidated(error) => LoginState {
            error: error.clone(),
            ..state
        },
        Action::LoginFailure(error) => LoginState {
            error: Some(error.clone()),
            submitting: false,
            ..state
        },
        // Credentials never outlive a successful login.
        Action::LoginSuccess(_) | Action::ClearLoginForm => LoginState::default(),
        Action::ClearSignupForm
        | Action::SignupFormSubmit(_)
        | Action::SignupForm(_)
        | Action::SignupSuccess(_)
        | Action::SignupFailure(_)
        | Action::EmailVerificationSuccess(_)
        | Action::EmailVerificationError(_)
        | Action::SocialAuthRequest(_)
        | Action::Logout
        | Action::Navigate(_) => state,
    }
}
