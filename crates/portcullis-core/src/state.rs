//! Store state slices.
//!
//! ```text
//! RootState
//! ├── login: LoginState              (credentials, submitting, error)
//! ├── signup: SignupFormState        (dynamic fields, errors, messages)
//! ├── signup_outcome: SignupOutcome  (which signup result landed last)
//! ├── current_user: CurrentUserState (is_logged_in, username, token)
//! └── route: RouteState              (current view path)
//! ```
//!
//! Every slice starts from its `Default` and is only ever replaced by a
//! reducer. Nothing outside `reducers` constructs a changed slice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::{Credentials, EMAIL, FieldError, FormError, PASSWORD, SignupForm, USERNAME};

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupFormState {
    pub submitting: bool,
    pub fields: BTreeMap<String, String>,
    pub errors: Vec<FieldError>,
    pub message: String,
    pub success_message: String,
    pub confirm_message: String,
}

impl SignupFormState {
    /// Value of a field, empty if it was never set.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }

    /// Builds the signup request from the current field values.
    pub fn to_form(&self) -> SignupForm {
        SignupForm {
            username: self.field(USERNAME).to_string(),
            email: self.field(EMAIL).to_string(),
            password: self.field(PASSWORD).to_string(),
        }
    }
}

/// Last terminal signup action. The signup slice keeps both message kinds;
/// this decides which one is current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignupOutcome {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    pub submitting: bool,
    pub credentials: Credentials,
    pub error: Option<FormError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUserState {
    pub is_logged_in: bool,
    pub username: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    pub path: String,
}

impl Default for RouteState {
    fn default() -> Self {
        Self {
            path: LOGIN_PATH.to_string(),
        }
    }
}

/// Views the route slice can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Signup,
    Home,
}

impl RouteState {
    pub fn view(&self) -> View {
        match self.path.as_str() {
            LOGIN_PATH => View::Login,
            SIGNUP_PATH => View::Signup,
            _ => View::Home,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootState {
    pub login: LoginState,
    pub signup: SignupFormState,
    pub signup_outcome: SignupOutcome,
    pub current_user: CurrentUserState,
    pub route: RouteState,
}
