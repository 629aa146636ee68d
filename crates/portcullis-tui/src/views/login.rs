//! Login form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use portcullis_core::action::SocialPayload;
use portcullis_core::form::{Credentials, FieldInput, FormError, PASSWORD, SocialProvider, USERNAME};
use portcullis_core::props::LoginViewState;
use portcullis_core::validation::Validation;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::render_utils::{FormConfig, InputHint, render_form};
use super::{Element, ElementKind, FORM_ERRORS_ID, Focus, LOADING_CLASS};
use crate::common::mask;

pub const SUBMIT_ID: &str = "submit";
pub const FLIP_ID: &str = "flip-login";

const FOCUS_ORDER: &[&str] = &[
    USERNAME,
    PASSWORD,
    SUBMIT_ID,
    "social-google",
    "social-facebook",
    "social-twitter",
    FLIP_ID,
];

pub fn social_id(provider: SocialProvider) -> &'static str {
    match provider {
        SocialProvider::Google => "social-google",
        SocialProvider::Facebook => "social-facebook",
        SocialProvider::Twitter => "social-twitter",
    }
}

fn provider_for(id: &str) -> Option<SocialProvider> {
    SocialProvider::all()
        .iter()
        .copied()
        .find(|p| social_id(*p) == id)
}

/// Everything the login view reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginProps {
    pub credentials: Credentials,
    pub error: Option<FormError>,
    pub submitting: bool,
    pub is_logged_in: bool,
    /// Where to go once logged in.
    pub next_path: Option<String>,
}

impl LoginProps {
    pub fn new(state: LoginViewState, next_path: Option<String>) -> Self {
        Self {
            credentials: state.credentials,
            error: state.error,
            submitting: state.submitting,
            is_logged_in: state.is_logged_in,
            next_path,
        }
    }
}

/// Callbacks the login view invokes.
pub trait LoginHandlers {
    fn handle_input(&mut self, input: FieldInput);
    fn validate(&mut self, credentials: &Credentials) -> Validation;
    fn login(&mut self, credentials: Credentials);
    fn social_auth(&mut self, payload: SocialPayload);
    /// Switch to the signup form.
    fn on_flip(&mut self);
    fn navigate(&mut self, path: &str);
}

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    focus: Focus,
    redirected: bool,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> &'static str {
        self.focus.current(FOCUS_ORDER)
    }

    pub fn focus(&mut self, id: &str) {
        self.focus.set(FOCUS_ORDER, id);
    }

    /// Called after every store change. Redirects once per login.
    pub fn on_props<H: LoginHandlers>(&mut self, props: &LoginProps, handlers: &mut H) {
        if !props.is_logged_in {
            self.redirected = false;
            return;
        }
        if self.redirected {
            return;
        }
        if let Some(next) = props.next_path.as_deref() {
            self.redirected = true;
            handlers.navigate(next);
        }
    }

    pub fn handle_key<H: LoginHandlers>(
        &mut self,
        props: &LoginProps,
        key: KeyEvent,
        handlers: &mut H,
    ) {
        let focused = self.focused();
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus.next(FOCUS_ORDER.len()),
            KeyCode::BackTab | KeyCode::Up => self.focus.prev(FOCUS_ORDER.len()),
            KeyCode::Enter => match focused {
                USERNAME => self.focus(PASSWORD),
                PASSWORD | SUBMIT_ID => self.submit(props, handlers),
                FLIP_ID => handlers.on_flip(),
                id => {
                    if let Some(provider) = provider_for(id)
                        && !props.submitting
                    {
                        handlers.social_auth(SocialPayload { provider });
                    }
                }
            },
            KeyCode::Backspace => {
                if let Some(mut value) = field_value(props, focused).map(str::to_string) {
                    value.pop();
                    handlers.handle_input(FieldInput::new(focused, value));
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(value) = field_value(props, focused) {
                    let mut value = value.to_string();
                    value.push(c);
                    handlers.handle_input(FieldInput::new(focused, value));
                }
            }
            _ => {}
        }
    }

    /// Always validates. Only a clean form with no request in flight
    /// reaches `login`.
    pub fn submit<H: LoginHandlers>(&mut self, props: &LoginProps, handlers: &mut H) {
        let validation = handlers.validate(&props.credentials);
        if validation.is_ok() && !props.submitting {
            handlers.login(props.credentials.clone());
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, props: &LoginProps, spinner: &str) {
        let hints = [
            InputHint::new("Tab", "next"),
            InputHint::new("Enter", "select"),
            InputHint::new("Esc", "cancel/quit"),
        ];
        render_form(
            frame,
            area,
            &FormConfig {
                title: "Log in",
                width: 56,
                hints: &hints,
                focused: self.focused(),
                spinner,
            },
            &elements(props),
        );
    }
}

fn field_value<'a>(props: &'a LoginProps, id: &str) -> Option<&'a str> {
    match id {
        USERNAME => Some(&props.credentials.username),
        PASSWORD => Some(&props.credentials.password),
        _ => None,
    }
}

/// The login view tree. Always holds exactly one `form-errors` element.
pub fn elements(props: &LoginProps) -> Vec<Element> {
    let mut elements = vec![
        Element::new(FORM_ERRORS_ID, ElementKind::Error, "").with_text(
            props
                .error
                .as_ref()
                .map(|e| e.message.clone())
                .unwrap_or_default(),
        ),
        Element::new(USERNAME, ElementKind::TextField, "Username or email")
            .with_text(props.credentials.username.clone()),
        Element::new(PASSWORD, ElementKind::PasswordField, "Password")
            .with_text(mask(&props.credentials.password)),
    ];

    let submit = if props.submitting {
        Element::new(SUBMIT_ID, ElementKind::Button, "Logging in").with_class(LOADING_CLASS)
    } else {
        Element::new(SUBMIT_ID, ElementKind::Button, "Log in")
    };
    elements.push(submit);

    elements.extend(
        SocialProvider::all()
            .iter()
            .map(|p| Element::new(social_id(*p), ElementKind::Icon, p.label())),
    );
    elements.push(Element::new(FLIP_ID, ElementKind::Link, "No account? Sign up"));
    elements
}
