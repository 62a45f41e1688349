//! Audit feed
//!
//! Displays rendered log entries, newest at the top. High-severity entries
//! use the warning style; thought signatures are shown under the message.

use aegis_app::{App, LogEntry};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Continuation indent, the width of `"[HH:MM:SS] "`.
const INDENT: &str = "           ";

/// Render the feed.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.scroll() > 0 {
        format!(" Audit Feed (+{} newer) ", app.scroll())
    } else {
        " Audit Feed ".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let items: Vec<ListItem> = if app.feed().is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Waiting for audit events...",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        app.feed().entries().skip(app.scroll()).map(entry_item).collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}

fn entry_item(entry: &LogEntry) -> ListItem<'static> {
    let style = if entry.is_high_severity() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut message_lines = entry.message.lines();
    let first = message_lines.next().unwrap_or_default();

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", entry.time_label()), Style::default().fg(Color::DarkGray)),
        Span::styled(first.to_owned(), style),
    ])];

    lines.extend(message_lines.map(|line| Line::from(Span::styled(format!("{INDENT}{line}"), style))));

    if let Some(label) = entry.thought_label() {
        lines.push(Line::from(Span::styled(
            format!("{INDENT}{label}"),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        )));
    }

    ListItem::new(lines)
}
