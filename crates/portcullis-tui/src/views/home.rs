//! Signed-in landing view.

use crossterm::event::{KeyCode, KeyEvent};
use portcullis_core::state::RootState;
use ratatui::Frame;
use ratatui::layout::Rect;

use super::render_utils::{FormConfig, InputHint, render_form};
use super::{Element, ElementKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeProps {
    pub username: Option<String>,
    pub path: String,
}

impl HomeProps {
    pub fn from_state(state: &RootState) -> Self {
        Self {
            username: state.current_user.username.clone(),
            path: state.route.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeCommand {
    None,
    Logout,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct HomeView;

impl HomeView {
    pub fn handle_key(&self, key: KeyEvent) -> HomeCommand {
        match key.code {
            KeyCode::Char('l') => HomeCommand::Logout,
            KeyCode::Char('q') => HomeCommand::Quit,
            _ => HomeCommand::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, props: &HomeProps) {
        let hints = [InputHint::new("l", "log out"), InputHint::new("q", "quit")];
        render_form(
            frame,
            area,
            &FormConfig {
                title: "Portcullis",
                width: 50,
                hints: &hints,
                focused: "",
                spinner: "",
            },
            &elements(props),
        );
    }
}

pub fn elements(props: &HomeProps) -> Vec<Element> {
    let greeting = match props.username.as_deref() {
        Some(name) => format!("Welcome, {name}"),
        None => "Welcome".to_string(),
    };
    vec![
        Element::new("greeting", ElementKind::Heading, greeting),
        Element::new("location", ElementKind::Notice, "").with_text(format!("At {}", props.path)),
    ]
}
