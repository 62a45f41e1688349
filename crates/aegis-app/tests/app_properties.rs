//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.

use aegis_app::{
    App, AppAction, AppEvent, ConnectionState, Endpoint, HIGH_SEVERITY_MARKERS, KeyInput,
    ReconnectPolicy, Severity, classify,
};
use aegis_proto::{AuditResponse, Inbound};
use chrono::Local;
use proptest::prelude::*;

fn app() -> App {
    App::new(Endpoint::from_origin("http://localhost:8000").unwrap(), ReconnectPolicy::disabled())
}

fn open_app() -> App {
    let mut app = app();
    app.handle(AppEvent::Opened);
    app
}

fn audit(message: &str) -> String {
    let response = AuditResponse::new(message, None);
    aegis_proto::encode_inbound(&Inbound::AuditResponse(response)).unwrap()
}

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        1 => Just(AppEvent::Tick),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        1 => Just(AppEvent::Opened),
        1 => Just(AppEvent::Closed { reason: None }),
        1 => Just(AppEvent::Submit),
        2 => any::<char>().prop_map(|c| AppEvent::Key(KeyInput::Char(c))),
        1 => prop_oneof![
            Just(KeyInput::Backspace),
            Just(KeyInput::Delete),
            Just(KeyInput::Left),
            Just(KeyInput::Right),
            Just(KeyInput::Home),
            Just(KeyInput::End),
            Just(KeyInput::Up),
            Just(KeyInput::Down),
        ]
        .prop_map(AppEvent::Key),
        3 => "[a-zA-Z ]{0,20}".prop_map(|m| AppEvent::Payload {
            raw: audit(&m),
            received_at: Local::now(),
        }),
        1 => ".*".prop_map(|raw| AppEvent::Payload { raw, received_at: Local::now() }),
    ]
}

/// Text that never contains a severity marker.
fn benign_text() -> impl Strategy<Value = String> {
    "[a-zA-Z ]{0,40}".prop_filter("no marker", |s| {
        !HIGH_SEVERITY_MARKERS.iter().any(|marker| s.contains(marker))
    })
}

proptest! {
    #[test]
    fn prop_app_invariants_hold(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut app = app();
        let mut feed_len = 0;
        let mut closed = false;

        for event in events {
            let actions = app.handle(event);

            // The feed only grows, and only while open
            prop_assert!(app.feed().len() >= feed_len);
            if app.feed().len() > feed_len {
                prop_assert!(app.connection_state().is_open());
            }
            feed_len = app.feed().len();

            // Without a reconnect policy, closed is terminal
            if closed {
                prop_assert_eq!(app.connection_state(), ConnectionState::Closed);
            }
            closed = app.connection_state() == ConnectionState::Closed;

            prop_assert!(app.scroll() <= app.feed().len().saturating_sub(1));
            prop_assert!(app.input().cursor() <= app.input().as_str().chars().count());
            for action in actions {
                let is_send = matches!(action, AppAction::Send { .. });
                prop_assert!(!is_send || app.connection_state().is_open());
                let is_schedule = matches!(action, AppAction::ScheduleReconnect { .. });
                prop_assert!(!is_schedule);
            }
        }
    }

    #[test]
    fn prop_n_events_render_newest_first(messages in prop::collection::vec("[a-z0-9]{1,12}", 1..30)) {
        let mut app = open_app();
        for message in &messages {
            app.handle(AppEvent::Payload { raw: audit(message), received_at: Local::now() });
        }

        let rendered: Vec<String> = app.feed().entries().map(|e| e.message.clone()).collect();
        let expected: Vec<String> = messages.iter().rev().cloned().collect();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn prop_marker_anywhere_is_high(
        prefix in "[a-zA-Z ]{0,20}",
        suffix in "[a-zA-Z ]{0,20}",
        marker in prop::sample::select(vec!["violation", "High"]),
    ) {
        let message = format!("{prefix}{marker}{suffix}");
        prop_assert_eq!(classify(&message), Severity::High);
    }

    #[test]
    fn prop_no_marker_is_normal(message in benign_text()) {
        prop_assert_eq!(classify(&message), Severity::Normal);
    }

    #[test]
    fn prop_untyped_payloads_render_nothing(
        message in "[a-z ]{0,20}",
        kind in prop::option::of("[a-z_]{1,20}".prop_filter("not audit", |k| k != "audit_response")),
    ) {
        let raw = match kind {
            Some(kind) => format!(r#"{{"type":"{kind}","message":"{message}"}}"#),
            None => format!(r#"{{"message":"{message}"}}"#),
        };

        let mut app = open_app();
        let actions = app.handle(AppEvent::Payload { raw, received_at: Local::now() });

        prop_assert!(actions.is_empty());
        prop_assert!(app.feed().is_empty());
    }

    #[test]
    fn prop_blank_submit_is_ignored(blank in "[ \t]{0,10}") {
        let mut app = open_app();
        app.input_mut().set(blank.clone());

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        prop_assert!(actions.is_empty());
        prop_assert_eq!(app.input().as_str(), blank.as_str());
    }

    #[test]
    fn prop_submit_sends_verbatim(text in "[ ]{0,3}[a-zA-Z0-9]{1,20}[ ]{0,3}") {
        let mut app = open_app();
        app.input_mut().set(text.clone());

        let actions = app.submit();

        prop_assert_eq!(actions, vec![AppAction::Send { message: text }, AppAction::Render]);
        prop_assert!(app.input().as_str().is_empty());
    }
}
