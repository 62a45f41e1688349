//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod feed;
mod input;
mod status;

use aegis_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const FEED_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(FEED_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [feed_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    feed::render(frame, app, *feed_area);
    input::render(frame, app.input(), *input_area);
    status::render(frame, app, *status_area);
}
