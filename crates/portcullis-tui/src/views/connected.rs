//! Handler implementations bound to a dispatcher.
//!
//! These are the glue between the views' callback traits and the core
//! dispatch mappings. Requests that need I/O are collected in `requests`
//! for the reducer to turn into effects.

use portcullis_core::action::SocialPayload;
use portcullis_core::form::{Credentials, FieldError, FieldInput, SignupForm};
use portcullis_core::props::{
    LoginDispatch, SignupDispatch, map_dispatch_to_props, map_signup_dispatch_to_props,
};
use portcullis_core::session::AuthRequest;
use portcullis_core::state::{LOGIN_PATH, SIGNUP_PATH};
use portcullis_core::store::Dispatch;
use portcullis_core::validation::{Validation, ValidationRules, validate_signup};

use super::login::LoginHandlers;
use super::signup::SignupHandlers;

pub struct ConnectedLogin<'a, D: Dispatch> {
    dispatch: &'a mut D,
    rules: &'a ValidationRules,
    pub requests: Vec<AuthRequest>,
}

impl<'a, D: Dispatch> ConnectedLogin<'a, D> {
    pub fn new(dispatch: &'a mut D, rules: &'a ValidationRules) -> Self {
        Self {
            dispatch,
            rules,
            requests: Vec::new(),
        }
    }

    fn props(&mut self) -> LoginDispatch<'_, D> {
        map_dispatch_to_props(&mut *self.dispatch)
    }
}

impl<D: Dispatch> LoginHandlers for ConnectedLogin<'_, D> {
    fn handle_input(&mut self, input: FieldInput) {
        self.props().handle_input(input);
    }

    fn validate(&mut self, credentials: &Credentials) -> Validation {
        let rules = self.rules;
        self.props().validate(credentials, rules)
    }

    fn login(&mut self, credentials: Credentials) {
        let request = self.props().login(credentials);
        self.requests.push(request);
    }

    fn social_auth(&mut self, payload: SocialPayload) {
        let request = self.props().social_auth(payload);
        self.requests.push(request);
    }

    fn on_flip(&mut self) {
        self.props().navigate(SIGNUP_PATH);
    }

    fn navigate(&mut self, path: &str) {
        self.props().navigate(path);
    }
}

pub struct ConnectedSignup<'a, D: Dispatch> {
    dispatch: &'a mut D,
    rules: &'a ValidationRules,
    pub requests: Vec<AuthRequest>,
}

impl<'a, D: Dispatch> ConnectedSignup<'a, D> {
    pub fn new(dispatch: &'a mut D, rules: &'a ValidationRules) -> Self {
        Self {
            dispatch,
            rules,
            requests: Vec::new(),
        }
    }

    fn props(&mut self) -> SignupDispatch<'_, D> {
        map_signup_dispatch_to_props(&mut *self.dispatch)
    }
}

impl<D: Dispatch> SignupHandlers for ConnectedSignup<'_, D> {
    fn handle_input(&mut self, input: FieldInput) {
        self.props().handle_input(input);
    }

    fn validate(&mut self, form: &SignupForm) -> Vec<FieldError> {
        validate_signup(form, self.rules)
    }

    fn reject(&mut self, errors: Vec<FieldError>) {
        self.props().reject(errors);
    }

    fn signup(&mut self, form: SignupForm) {
        let request = self.props().signup(form);
        self.requests.push(request);
    }

    fn verify_email(&mut self, token: &str) {
        if let Some(request) = self.props().verify_email(token) {
            self.requests.push(request);
        }
    }

    /// Leaving the signup form discards what was typed into it.
    fn on_flip(&mut self) {
        let mut props = self.props();
        props.clear();
        props.navigate(LOGIN_PATH);
    }
}

#[cfg(test)]
mod tests {
    use portcullis_core::action::{Action, SubmitFlag};
    use portcullis_core::form::{FormError, SocialProvider};

    use super::*;

    #[test]
    fn test_login_request_is_collected() {
        let mut dispatched: Vec<Action> = Vec::new();
        let rules = ValidationRules::default();
        let mut handlers = ConnectedLogin::new(&mut dispatched, &rules);

        handlers.login(Credentials::new("christian", "123456"));
        handlers.social_auth(SocialPayload {
            provider: SocialProvider::Facebook,
        });

        assert_eq!(
            handlers.requests,
            vec![
                AuthRequest::Login(Credentials::new("christian", "123456")),
                AuthRequest::Social(SocialProvider::Facebook),
            ]
        );
        assert_eq!(
            dispatched,
            vec![
                Action::LoginSubmit(SubmitFlag { submitting: true }),
                Action::SocialAuthRequest(SocialPayload {
                    provider: SocialProvider::Facebook
                }),
            ]
        );
    }

    #[test]
    fn test_validate_uses_configured_rules() {
        let mut dispatched: Vec<Action> = Vec::new();
        let rules = ValidationRules {
            password_min_len: 10,
            ..ValidationRules::default()
        };
        let mut handlers = ConnectedLogin::new(&mut dispatched, &rules);

        let validation = handlers.validate(&Credentials::new("christian", "123456"));

        let error = FormError::new("Password must be at least 10 characters");
        assert_eq!(validation, Validation::Invalid(error.clone()));
        assert_eq!(dispatched, vec![Action::LoginValidated(Some(error))]);
    }

    #[test]
    fn test_login_flip_navigates_to_signup() {
        let mut dispatched: Vec<Action> = Vec::new();
        let rules = ValidationRules::default();
        ConnectedLogin::new(&mut dispatched, &rules).on_flip();
        assert_eq!(dispatched, vec![Action::navigate(SIGNUP_PATH)]);
    }

    #[test]
    fn test_signup_flip_clears_then_navigates() {
        let mut dispatched: Vec<Action> = Vec::new();
        let rules = ValidationRules::default();
        ConnectedSignup::new(&mut dispatched, &rules).on_flip();
        assert_eq!(
            dispatched,
            vec![Action::ClearSignupForm, Action::navigate(LOGIN_PATH)]
        );
    }

    #[test]
    fn test_signup_validate_does_not_dispatch() {
        let mut dispatched: Vec<Action> = Vec::new();
        let rules = ValidationRules::default();
        let errors = ConnectedSignup::new(&mut dispatched, &rules).validate(&SignupForm::default());
        assert_eq!(errors.len(), 3);
        assert!(dispatched.is_empty());
    }

    #[test]
    fn test_verify_request_is_collected() {
        let mut dispatched: Vec<Action> = Vec::new();
        let rules = ValidationRules::default();
        let mut handlers = ConnectedSignup::new(&mut dispatched, &rules);

        handlers.verify_email("tok-1");
        handlers.verify_email("");

        assert_eq!(
            handlers.requests,
            vec![AuthRequest::VerifyEmail("tok-1".to_string())]
        );
        assert_eq!(dispatched.len(), 1);
        assert_eq!(dispatched[0].kind(), "EMAIL_VERIFICATION_ERROR");
    }
}
