//! Reducers: pure `(state, action) -> state` functions, one per slice.
//!
//! Each slice reducer matches exhaustively on `Action`, so adding a variant
//! forces every slice to decide whether it cares. Actions a slice does not
//! handle return the slice unchanged.

pub mod login;
pub mod signup;

use crate::action::Action;
use crate::state::{CurrentUserState, HOME_PATH, LOGIN_PATH, RootState, RouteState, SignupOutcome};

/// Threads an action through every slice reducer.
pub fn reduce(state: RootState, action: &Action) -> RootState {
    RootState {
        login: login::reduce(state.login, action),
        signup: signup::reduce(state.signup, action),
        signup_outcome: signup_outcome(state.signup_outcome, action),
        current_user: current_user(state.current_user, action),
        route: route(state.route, action),
    }
}

pub fn signup_outcome(state: SignupOutcome, action: &Action) -> SignupOutcome {
    match action {
        Action::SignupSuccess(_) => SignupOutcome::Succeeded,
        Action::SignupFailure(_) => SignupOutcome::Failed,
        Action::ClearSignupForm => SignupOutcome::Pending,
        Action::SignupFormSubmit(_)
        | Action::SignupForm(_)
        | Action::EmailVerificationSuccess(_)
        | Action::EmailVerificationError(_)
        | Action::HandleLoginInput(_)
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

pub fn current_user(state: CurrentUserState, action: &Action) -> CurrentUserState {
    match action {
        Action::LoginSuccess(session) => CurrentUserState {
            is_logged_in: true,
            username: Some(session.username.clone()),
            token: Some(session.token.clone()),
        },
        Action::Logout => CurrentUserState::default(),
        Action::ClearSignupForm
        | Action::SignupFormSubmit(_)
        | Action::SignupForm(_)
        | Action::SignupSuccess(_)
        | Action::SignupFailure(_)
        | Action::EmailVerificationSuccess(_)
        | Action::EmailVerificationError(_)
        | Action::HandleLoginInput(_)
        | Action::LoginSubmit(_)
        | Action::LoginValidated(_)
        | Action::LoginFailure(_)
        | Action::ClearLoginForm
        | Action::SocialAuthRequest(_)
        | Action::Navigate(_) => state,
    }
}

pub fn route(state: RouteState, action: &Action) -> RouteState {
    match action {
        Action::Navigate(payload) => RouteState {
            path: if payload.path.is_empty() {
                HOME_PATH.to_string()
            } else {
                payload.path.clone()
            },
        },
        Action::Logout => RouteState {
            path: LOGIN_PATH.to_string(),
        },
        Action::ClearSignupForm
        | Action::SignupFormSubmit(_)
        | Action::SignupForm(_)
        | Action::SignupSuccess(_)
        | Action::SignupFailure(_)
        | Action::EmailVerificationSuccess(_)
        | Action::EmailVerificationError(_)
        | Action::HandleLoginInput(_)
        | Action::LoginSubmit(_)
        | Action::LoginValidated(_)
        | Action::LoginSuccess(_)
        | Action::LoginFailure(_)
        | Action::ClearLoginForm
        | Action::SocialAuthRequest(_) => state,
    }
}
