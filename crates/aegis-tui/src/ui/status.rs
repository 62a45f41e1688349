//! Status bar
//!
//! Displays the connection status, endpoint and feed size.

use aegis_app::{App, Indicator};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const LIVENESS_DOT: &str = "●";

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status();

    let color = match status.indicator {
        Indicator::Positive => Color::Green,
        Indicator::Pending => Color::Yellow,
        Indicator::Negative => Color::Red,
    };

    let mut dot_style = Style::default().fg(color);
    if status.pulsing {
        dot_style = dot_style.add_modifier(Modifier::SLOW_BLINK);
    }

    let details = format!(" | {} | Entries: {}", app.endpoint(), app.feed().len());

    let status_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(LIVENESS_DOT, dot_style),
        Span::raw(" "),
        Span::styled(status.text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(details, Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, area);
}
