//! UI rendering
//!
//! Rendering functions that turn the [`Screen`] into terminal output using
//! ratatui widgets. All functions are pure (no I/O).

mod controls;
mod input;
mod messages;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::screen::Screen;

/// Render the entire entry screen.
pub fn render(frame: &mut Frame, screen: &Screen) {
    const STATUS_HEIGHT: u16 = 1;
    const CONTROLS_HEIGHT: u16 = 1;
    const MESSAGES_MIN_HEIGHT: u16 = 1;
    const DIALOG_HEIGHT: u16 = 1;
    const INPUT_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Min(MESSAGES_MIN_HEIGHT),
            Constraint::Length(DIALOG_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(frame.area());

    let [status_area, controls_area, messages_area, dialog_area, input_area] = chunks.as_ref()
    else {
        return;
    };

    status::render(frame, screen.view(), *status_area);
    controls::render(frame, screen.view(), *controls_area);
    messages::render(frame, screen.messages(), *messages_area);

    if let Some(dialog) = screen.dialog() {
        let paragraph = Paragraph::new(dialog.question()).style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, *dialog_area);
    }

    input::render(frame, screen, *input_area);
}
