//! Button row
//!
//! Enabled buttons are drawn in brackets, disabled ones in parentheses.

use cyberchat_gate::GateView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the enable, discovery and chat buttons.
pub fn render(frame: &mut Frame, view: Option<&GateView>, area: Rect) {
    let Some(view) = view else {
        return;
    };

    let controls = Line::from(vec![
        button(&view.enable_label.to_string(), view.enable_button_enabled),
        Span::raw("  "),
        button("FIND DEVICES", view.actions_enabled),
        Span::raw("  "),
        button("START CHAT", view.actions_enabled),
    ]);

    frame.render_widget(Paragraph::new(controls), area);
}

fn button(label: &str, enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled(format!("[{label}]"), Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::styled(format!("({label})"), Style::default().fg(Color::DarkGray))
    }
}
