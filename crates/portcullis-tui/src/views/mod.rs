//! Form views.
//!
//! Each view is a controlled component: values come from props, user
//! intent leaves through a handler trait, and the only state a view keeps
//! is focus and redirect bookkeeping.
//!
//! `elements(props)` describes what a view shows as a flat list of
//! `Element`s. Rendering walks that list, and tests assert on it directly.

pub mod connected;
pub mod home;
pub mod login;
pub mod render_utils;
pub mod signup;

pub use connected::{ConnectedLogin, ConnectedSignup};
pub use home::{HomeCommand, HomeProps, HomeView};
pub use login::{LoginHandlers, LoginProps, LoginView};
pub use signup::{SignupHandlers, SignupProps, SignupView};

/// Element id of the single error banner every form renders.
pub const FORM_ERRORS_ID: &str = "form-errors";

/// Class carried by the submit element while a request is in flight.
pub const LOADING_CLASS: &str = "loading";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading,
    TextField,
    PasswordField,
    Button,
    Icon,
    Link,
    Error,
    Notice,
}

impl ElementKind {
    pub fn is_focusable(self) -> bool {
        matches!(
            self,
            ElementKind::TextField
                | ElementKind::PasswordField
                | ElementKind::Button
                | ElementKind::Icon
                | ElementKind::Link
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: &'static str,
    pub kind: ElementKind,
    /// Field label or button caption.
    pub label: String,
    /// Field value or message body.
    pub text: String,
    pub classes: Vec<&'static str>,
}

impl Element {
    pub fn new(id: &'static str, kind: ElementKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            text: String::new(),
            classes: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(&class)
    }
}

/// Looks up an element by id.
pub fn find<'a>(elements: &'a [Element], id: &str) -> Option<&'a Element> {
    elements.iter().find(|e| e.id == id)
}

/// Focus cycling over a fixed list of focusable ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Focus {
    index: usize,
}

impl Focus {
    pub fn current<'a>(&self, order: &[&'a str]) -> &'a str {
        order.get(self.index).copied().unwrap_or_default()
    }

    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    pub fn set(&mut self, order: &[&str], id: &str) {
        if let Some(index) = order.iter().position(|candidate| *candidate == id) {
            self.index = index;
        }
    }
}
