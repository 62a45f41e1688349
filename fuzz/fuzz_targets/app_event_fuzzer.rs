//! Fuzz target for the App state machine
//!
//! Drives the App with arbitrary event sequences, mixing lifecycle
//! transitions, operator keys and raw payloads, and checks:
//! - No event sequence panics
//! - The feed never shrinks
//! - Entries are only added while the connection is open
//! - Sends are only emitted while the connection is open

#![no_main]

use aegis_app::{App, AppAction, AppEvent, Endpoint, KeyInput, ReconnectPolicy};
use arbitrary::Arbitrary;
use chrono::Local;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Opened,
    Closed,
    Reconnect,
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
    Payload(String),
    Audit { message: String, signature: Option<String> },
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_attempts: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let Ok(endpoint) = Endpoint::from_origin("http://localhost:8000") else {
        return;
    };
    let policy = ReconnectPolicy::with_attempts(u32::from(input.max_attempts % 4));
    let mut app = App::new(endpoint, policy);

    for op in input.ops {
        let before = app.feed().len();

        let actions = match op {
            Op::Opened => app.handle(AppEvent::Opened),
            Op::Closed => app.handle(AppEvent::Closed { reason: None }),
            Op::Reconnect => app.reconnect(),
            Op::Char(c) => app.handle(AppEvent::Key(KeyInput::Char(c))),
            Op::Enter => app.handle(AppEvent::Key(KeyInput::Enter)),
            Op::Backspace => app.handle(AppEvent::Key(KeyInput::Backspace)),
            Op::Up => app.handle(AppEvent::Key(KeyInput::Up)),
            Op::Down => app.handle(AppEvent::Key(KeyInput::Down)),
            Op::Payload(raw) => app.handle(AppEvent::Payload { raw, received_at: Local::now() }),
            Op::Audit { message, signature } => {
                let response = aegis_proto::AuditResponse::new(message, signature);
                let Ok(raw) =
                    aegis_proto::encode_inbound(&aegis_proto::Inbound::AuditResponse(response))
                else {
                    continue;
                };
                app.handle(AppEvent::Payload { raw, received_at: Local::now() })
            },
        };

        let after = app.feed().len();
        assert!(after >= before);
        if after > before {
            assert!(app.connection_state().is_open());
        }
        for action in actions {
            if matches!(action, AppAction::Send { .. }) {
                assert!(app.connection_state().is_open());
            }
        }
    }
});
