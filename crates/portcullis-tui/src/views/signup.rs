//! Signup form. Mirrors the login form, with per-field errors.
//!
//! Once an account is created the form is swapped for a verification step:
//! a token field, a verify button and the confirmation message.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use portcullis_core::form::{
    EMAIL, FieldError, FieldInput, PASSWORD, SignupForm, USERNAME, VERIFICATION_TOKEN,
};
use portcullis_core::props::SignupViewState;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::render_utils::{FormConfig, InputHint, render_form};
use super::{Element, ElementKind, FORM_ERRORS_ID, Focus, LOADING_CLASS};
use crate::common::mask;

pub const SUBMIT_ID: &str = "submit";
pub const FLIP_ID: &str = "flip-signup";
pub const SUCCESS_ID: &str = "signup-success";
pub const VERIFY_ID: &str = "verify";
pub const CONFIRM_ID: &str = "confirm-message";

const FOCUS_ORDER: &[&str] = &[USERNAME, EMAIL, PASSWORD, SUBMIT_ID, FLIP_ID];
const VERIFY_FOCUS_ORDER: &[&str] = &[VERIFICATION_TOKEN, VERIFY_ID, FLIP_ID];

fn field_error_id(field: &str) -> Option<&'static str> {
    match field {
        USERNAME => Some("error-username"),
        EMAIL => Some("error-email"),
        PASSWORD => Some("error-password"),
        _ => None,
    }
}

pub type SignupProps = SignupViewState;

fn is_verifying(props: &SignupProps) -> bool {
    !props.success_message.is_empty()
}

pub trait SignupHandlers {
    fn handle_input(&mut self, input: FieldInput);
    /// Local checks; an empty list means the form may be sent.
    fn validate(&mut self, form: &SignupForm) -> Vec<FieldError>;
    fn reject(&mut self, errors: Vec<FieldError>);
    fn signup(&mut self, form: SignupForm);
    fn verify_email(&mut self, token: &str);
    /// Switch back to the login form.
    fn on_flip(&mut self);
}

#[derive(Debug, Clone, Default)]
pub struct SignupView {
    focus: Focus,
    verifying: bool,
}

impl SignupView {
    pub fn new() -> Self {
        Self::default()
    }

    fn order(&self) -> &'static [&'static str] {
        if self.verifying {
            VERIFY_FOCUS_ORDER
        } else {
            FOCUS_ORDER
        }
    }

    pub fn focused(&self) -> &'static str {
        self.focus.current(self.order())
    }

    pub fn focus(&mut self, id: &str) {
        self.focus.set(self.order(), id);
    }

    /// Called after every store change. Entering or leaving the
    /// verification step moves focus to its first element.
    pub fn on_props(&mut self, props: &SignupProps) {
        let verifying = is_verifying(props);
        if verifying != self.verifying {
            self.verifying = verifying;
            self.focus = Focus::default();
        }
    }

    pub fn handle_key<H: SignupHandlers>(
        &mut self,
        props: &SignupProps,
        key: KeyEvent,
        handlers: &mut H,
    ) {
        self.on_props(props);
        let focused = self.focused();
        let len = self.order().len();
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus.next(len),
            KeyCode::BackTab | KeyCode::Up => self.focus.prev(len),
            KeyCode::Enter => match focused {
                USERNAME | EMAIL => self.focus.next(len),
                PASSWORD | SUBMIT_ID => self.submit(props, handlers),
                VERIFICATION_TOKEN | VERIFY_ID => {
                    handlers.verify_email(&props.verification_token);
                }
                FLIP_ID => handlers.on_flip(),
                _ => {}
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

    pub fn submit<H: SignupHandlers>(&mut self, props: &SignupProps, handlers: &mut H) {
        if props.submitting {
            return;
        }
        let errors = handlers.validate(&props.form);
        if errors.is_empty() {
            handlers.signup(props.form.clone());
        } else {
            if let Some(first) = errors.first() {
                self.focus(&first.field);
            }
            handlers.reject(errors);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, props: &SignupProps, spinner: &str) {
        let hints = [
            InputHint::new("Tab", "next"),
            InputHint::new("Enter", "select"),
            InputHint::new("Esc", "cancel/quit"),
        ];
        render_form(
            frame,
            area,
            &FormConfig {
                title: if self.verifying { "Verify email" } else { "Sign up" },
                width: 60,
                hints: &hints,
                focused: self.focused(),
                spinner,
            },
            &elements(props),
        );
    }
}

fn field_value<'a>(props: &'a SignupProps, id: &str) -> Option<&'a str> {
    match id {
        USERNAME => Some(&props.form.username),
        EMAIL => Some(&props.form.email),
        PASSWORD => Some(&props.form.password),
        VERIFICATION_TOKEN => Some(&props.verification_token),
        _ => None,
    }
}

pub fn elements(props: &SignupProps) -> Vec<Element> {
    let mut elements = vec![
        Element::new(FORM_ERRORS_ID, ElementKind::Error, "").with_text(props.message.clone()),
        Element::new(SUCCESS_ID, ElementKind::Notice, "")
            .with_text(props.success_message.clone()),
    ];

    if is_verifying(props) {
        elements.extend([
            Element::new(VERIFICATION_TOKEN, ElementKind::TextField, "Verification token")
                .with_text(props.verification_token.clone()),
            Element::new(VERIFY_ID, ElementKind::Button, "Verify email"),
            Element::new(CONFIRM_ID, ElementKind::Notice, "")
                .with_text(props.confirm_message.clone()),
            Element::new(FLIP_ID, ElementKind::Link, "Back to log in"),
        ]);
        return elements;
    }

    let fields = [
        (USERNAME, ElementKind::TextField, "Username", props.form.username.clone()),
        (EMAIL, ElementKind::TextField, "Email", props.form.email.clone()),
        (
            PASSWORD,
            ElementKind::PasswordField,
            "Password",
            mask(&props.form.password),
        ),
    ];
    for (id, kind, label, value) in fields {
        elements.push(Element::new(id, kind, label).with_text(value));
        for error in props.errors.iter().filter(|e| e.field == id) {
            if let Some(error_id) = field_error_id(&error.field) {
                elements.push(
                    Element::new(error_id, ElementKind::Error, "").with_text(error.message.clone()),
                );
            }
        }
    }

    let submit = if props.submitting {
        Element::new(SUBMIT_ID, ElementKind::Button, "Signing up").with_class(LOADING_CLASS)
    } else {
        Element::new(SUBMIT_ID, ElementKind::Button, "Sign up")
    };
    elements.push(submit);
    elements.push(Element::new(FLIP_ID, ElementKind::Link, "Have an account? Log in"));
    elements
}
