//! Rendering tests against ratatui's `TestBackend`.
//!
//! Rows are compared with trailing blanks trimmed; styles are checked on
//! individual cells.

use aegis_app::{App, AppEvent, Endpoint, KeyInput, ReconnectPolicy};
use aegis_proto::{AuditResponse, Inbound};
use aegis_tui::ui;
use chrono::{Local, TimeZone};
use ratatui::{
    Terminal,
    backend::{Backend, TestBackend},
    style::{Color, Modifier},
};

const WIDTH: u16 = 80;
const HEIGHT: u16 = 12;
const STATUS_ROW: usize = 11;
const INPUT_ROW: usize = 9;

fn app() -> App {
    App::new(Endpoint::from_origin("http://localhost:8000").unwrap(), ReconnectPolicy::disabled())
}

fn deliver(app: &mut App, message: &str, signature: Option<&str>, (h, m, s): (u32, u32, u32)) {
    let response = AuditResponse::new(message, signature.map(str::to_owned));
    let raw = aegis_proto::encode_inbound(&Inbound::AuditResponse(response)).unwrap();
    let received_at = Local.with_ymd_and_hms(2024, 6, 1, h, m, s).unwrap();
    app.handle(AppEvent::Payload { raw, received_at });
}

fn draw(app: &App) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    terminal
}

fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            let row: String = (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect();
            row.trim_end().to_string()
        })
        .collect()
}

#[test]
fn status_bar_tracks_connection() {
    let mut app = app();
    insta::assert_snapshot!(
        rows(&draw(&app))[STATUS_ROW],
        @" ● CONNECTING | ws://localhost:8000/ws/auditor/ | Entries: 0"
    );

    app.handle(AppEvent::Opened);
    insta::assert_snapshot!(
        rows(&draw(&app))[STATUS_ROW],
        @" ● ACTIVE - MONITORING | ws://localhost:8000/ws/auditor/ | Entries: 0"
    );

    deliver(&mut app, "all clear", None, (9, 0, 0));
    app.handle(AppEvent::Closed { reason: None });
    insta::assert_snapshot!(
        rows(&draw(&app))[STATUS_ROW],
        @" ● OFFLINE | ws://localhost:8000/ws/auditor/ | Entries: 1"
    );
}

#[test]
fn liveness_dot_pulses_only_while_live() {
    let mut app = app();
    app.handle(AppEvent::Opened);
    let terminal = draw(&app);
    let dot = &terminal.backend().buffer()[(1, STATUS_ROW as u16)];
    assert_eq!(dot.fg, Color::Green);
    assert!(dot.modifier.contains(Modifier::SLOW_BLINK));

    app.handle(AppEvent::Closed { reason: None });
    let terminal = draw(&app);
    let dot = &terminal.backend().buffer()[(1, STATUS_ROW as u16)];
    assert_eq!(dot.fg, Color::Red);
    assert!(!dot.modifier.contains(Modifier::SLOW_BLINK));
}

#[test]
fn empty_feed_shows_placeholder() {
    let rows = rows(&draw(&app()));

    assert!(rows[0].starts_with("┌ Audit Feed ─"));
    assert!(rows[1].starts_with("│Waiting for audit events..."));
}

#[test]
fn entries_render_newest_first_with_annotations() {
    let mut app = app();
    app.handle(AppEvent::Opened);
    deliver(&mut app, "routine check", None, (7, 5, 2));
    deliver(&mut app, "policy violation detected", Some("sig-42"), (7, 5, 3));

    let terminal = draw(&app);
    let rows = rows(&terminal);

    assert!(rows[1].starts_with("│[07:05:03] policy violation detected"));
    assert!(rows[2].starts_with("│           Thought Sig: sig-42"));
    assert!(rows[3].starts_with("│[07:05:02] routine check"));

    let buffer = terminal.backend().buffer();
    let high = &buffer[(12, 1)];
    assert_eq!(high.fg, Color::Red);
    assert!(high.modifier.contains(Modifier::BOLD));
    assert_eq!(buffer[(12, 3)].fg, Color::Reset);
}

#[test]
fn multiline_messages_are_indented() {
    let mut app = app();
    app.handle(AppEvent::Opened);
    deliver(&mut app, "SAFETY DEVIATION LOGGED\nSeverity: HIGH", None, (12, 0, 0));

    let rows = rows(&draw(&app));

    assert!(rows[1].starts_with("│[12:00:00] SAFETY DEVIATION LOGGED"));
    assert!(rows[2].starts_with("│           Severity: HIGH"));
}

#[test]
fn scrolled_feed_hides_newer_entries() {
    let mut app = app();
    app.handle(AppEvent::Opened);
    for (i, message) in ["first", "second", "third"].into_iter().enumerate() {
        deliver(&mut app, message, None, (8, 0, i as u32));
    }
    app.handle(AppEvent::Key(KeyInput::Up));

    let rows = rows(&draw(&app));

    assert!(rows[0].starts_with("┌ Audit Feed (+1 newer) ─"));
    assert!(rows[1].starts_with("│[08:00:01] second"));
}

#[test]
fn input_line_shows_prompt_and_cursor() {
    let mut app = app();
    for c in "hello".chars() {
        app.handle(AppEvent::Key(KeyInput::Char(c)));
    }
    app.handle(AppEvent::Key(KeyInput::Left));

    let mut terminal = draw(&app);
    let rows = rows(&terminal);

    assert!(rows[INPUT_ROW].starts_with("│> hello"));
    let cursor = terminal.backend_mut().get_cursor_position().unwrap();
    assert_eq!((cursor.x, cursor.y), (7, INPUT_ROW as u16));
}
