//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use portcullis_core::state::View;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::state::AppState;

/// Height of status line at the bottom.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for loading buttons and the status line.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
            .areas(frame.area());
    let spinner = spinner(app.spinner_frame);

    match app.store.state().route.view() {
        View::Login => app.login.render(frame, body, &app.login_props(), spinner),
        View::Signup => app.signup.render(frame, body, &app.signup_props(), spinner),
        View::Home => app.home.render(frame, body, &app.home_props()),
    }

    render_status_line(app, frame, status, spinner);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect, spinner: &str) {
    let width = area.width.saturating_sub(1) as usize;
    let line = if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            truncate_with_ellipsis(notice, width),
            Style::default().fg(Color::Yellow),
        ))
    } else if app.tasks.is_any_running() {
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Cyan)),
            Span::styled(" Working…", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let state = app.store.state();
        let who = state
            .current_user
            .username
            .as_deref()
            .map_or_else(|| "signed out".to_string(), |name| format!("signed in as {name}"));
        Line::from(Span::styled(
            truncate_with_ellipsis(&format!("{} · {who}", state.route.path), width),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
