use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{Element, ElementKind, LOADING_CLASS};
use crate::common::truncate_start_with_ellipsis;

const ACCENT: Color = Color::Cyan;

/// Calculates a centered area of at most `width` x `height` inside `area`.
pub fn calculate_form_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for a form (clears background, draws border and title).
pub fn render_form_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a line of keyboard hints at the bottom of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Configuration for rendering a labelled input line.
pub struct InputLine<'a> {
    pub value: &'a str,
    pub prompt: &'a str,
    pub focused: bool,
}

/// Renders an input line: "<prompt> <text>█". The cursor only shows when focused.
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let prompt_width = input.prompt.chars().count() as u16;
    let max_text_width = area.width.saturating_sub(prompt_width + 1) as usize;
    let display_text = truncate_start_with_ellipsis(input.value, max_text_width);

    let prompt_color = if input.focused { ACCENT } else { Color::Gray };
    let mut spans = vec![
        Span::styled(input.prompt, Style::default().fg(prompt_color)),
        Span::styled(display_text, Style::default().fg(Color::White)),
    ];
    if input.focused {
        spans.push(Span::styled("█", Style::default().fg(ACCENT)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a separator line.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        separator_area,
    );
}

pub struct FormConfig<'a> {
    pub title: &'a str,
    pub width: u16,
    pub hints: &'a [InputHint<'a>],
    /// Id of the focused element.
    pub focused: &'a str,
    /// Current spinner frame, shown on loading buttons.
    pub spinner: &'a str,
}

/// One rendered row; icons share a row.
enum Row<'a> {
    Single(&'a Element),
    Icons(Vec<&'a Element>),
}

fn rows(elements: &[Element]) -> Vec<Row<'_>> {
    let mut rows: Vec<Row<'_>> = Vec::new();
    for element in elements {
        match element.kind {
            ElementKind::Icon => {
                if let Some(Row::Icons(icons)) = rows.last_mut() {
                    icons.push(element);
                } else {
                    rows.push(Row::Icons(vec![element]));
                }
            }
            // Error banners keep their row even when empty so the form does not jump.
            ElementKind::Notice if element.text.is_empty() => {}
            _ => rows.push(Row::Single(element)),
        }
    }
    rows
}

fn button_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT)
    }
}

/// Draws a form box from its element list.
pub fn render_form(frame: &mut Frame, area: Rect, config: &FormConfig<'_>, elements: &[Element]) {
    let rows = rows(elements);
    // Rows, separator, hints and the border.
    let height = rows.len() as u16 + 4;
    let popup = calculate_form_area(area, config.width, height);
    render_form_container(frame, popup, config.title, ACCENT);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );
    if inner.height == 0 {
        return;
    }

    for (offset, row) in rows.iter().enumerate() {
        let offset = offset as u16;
        if offset >= inner.height.saturating_sub(2) {
            break;
        }
        let row_area = Rect::new(inner.x, inner.y + offset, inner.width, 1);
        render_row(frame, row_area, row, config);
    }

    render_separator(frame, inner, inner.height.saturating_sub(2));
    render_hints(frame, inner, config.hints, ACCENT);
}

fn render_row(frame: &mut Frame, area: Rect, row: &Row<'_>, config: &FormConfig<'_>) {
    match row {
        Row::Icons(icons) => {
            let mut spans = Vec::new();
            for (i, icon) in icons.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(
                    format!("[{}]", icon.label),
                    button_style(icon.id == config.focused),
                ));
            }
            frame.render_widget(
                Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
                area,
            );
        }
        Row::Single(element) => {
            let focused = element.id == config.focused;
            match element.kind {
                ElementKind::TextField | ElementKind::PasswordField => {
                    let prompt = format!("{}: ", element.label);
                    render_input_line(
                        frame,
                        area,
                        &InputLine {
                            value: &element.text,
                            prompt: &prompt,
                            focused,
                        },
                    );
                }
                ElementKind::Button => {
                    let caption = if element.has_class(LOADING_CLASS) {
                        format!("[ {} {} ]", element.label, config.spinner)
                    } else {
                        format!("[ {} ]", element.label)
                    };
                    frame.render_widget(
                        Paragraph::new(Span::styled(caption, button_style(focused)))
                            .alignment(Alignment::Center),
                        area,
                    );
                }
                ElementKind::Link => {
                    let mut style = Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED);
                    if focused {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    frame.render_widget(
                        Paragraph::new(Span::styled(element.label.as_str(), style))
                            .alignment(Alignment::Center),
                        area,
                    );
                }
                ElementKind::Error => {
                    frame.render_widget(
                        Paragraph::new(Span::styled(
                            element.text.as_str(),
                            Style::default().fg(Color::Red),
                        )),
                        area,
                    );
                }
                ElementKind::Notice => {
                    frame.render_widget(
                        Paragraph::new(Span::styled(
                            element.text.as_str(),
                            Style::default().fg(Color::Green),
                        )),
                        area,
                    );
                }
                ElementKind::Heading => {
                    frame.render_widget(
                        Paragraph::new(Span::styled(
                            element.label.as_str(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                        .alignment(Alignment::Center),
                        area,
                    );
                }
                ElementKind::Icon => {}
            }
        }
    }
}
