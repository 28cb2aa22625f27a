#![forbid(unsafe_code)]

//! Structured log events emitted by the engine.
//!
//! Run:
//!   cargo test -p sidescroll-core --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sidescroll_core::engine::GestureTranslationEngine;
use sidescroll_core::input::{KeyInput, TouchInput, TouchPhase, WheelInput};
use sidescroll_core::sim::{ManualFrameScheduler, SimViewport, StaticFocus};
use sidescroll_core::ScrollOptions;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);

        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(EventCapture {
            events: Arc::clone(&events),
        });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> &'a CapturedEvent {
    events
        .iter()
        .find(|event| event.message == message)
        .unwrap_or_else(|| panic!("no event {message:?} in {events:#?}"))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn lifecycle_logs_at_debug() {
    let events = with_captured_events(|| {
        let mut engine = GestureTranslationEngine::new(
            SimViewport::new(800.0, 4000.0),
            ManualFrameScheduler::new(),
            StaticFocus::new(),
            ScrollOptions::default().with_touch_redirection(false),
        );
        engine.on_wheel(&WheelInput::pixels(0.0, 40.0));
        engine.detach();
    });

    let attached = find(&events, "gesture engine attached");
    assert_eq!(attached.level, tracing::Level::DEBUG);
    assert_eq!(attached.fields.get("touch").map(String::as_str), Some("false"));
    assert_eq!(attached.fields.get("keyboard").map(String::as_str), Some("true"));

    let detached = find(&events, "gesture engine detached");
    assert_eq!(detached.level, tracing::Level::DEBUG);
    assert_eq!(
        detached.fields.get("canceled_frame").map(String::as_str),
        Some("true")
    );
}

#[test]
fn redirections_log_at_trace_with_deltas() {
    let events = with_captured_events(|| {
        let viewport = SimViewport::new(800.0, 4000.0);
        let frames = ManualFrameScheduler::new();
        let mut engine = GestureTranslationEngine::new(
            viewport,
            frames.clone(),
            StaticFocus::new(),
            ScrollOptions::default(),
        );
        engine.on_wheel(&WheelInput::pixels(0.0, 40.0));
        for token in frames.advance_frame() {
            engine.on_frame(token);
        }
        engine.on_touch(&TouchInput::single(TouchPhase::Start, 10.0, 100.0));
        engine.on_touch(&TouchInput::single(TouchPhase::Move, 10.0, 90.0));
        engine.on_touch(&TouchInput::released(TouchPhase::End));
        engine.on_key(&KeyInput::down("End"));
    });

    let wheel = find(&events, "wheel redirected");
    assert_eq!(wheel.level, tracing::Level::TRACE);
    assert_eq!(wheel.fields.get("dy").map(String::as_str), Some("40"));

    let flush = find(&events, "frame flush");
    assert_eq!(flush.fields.get("offset").map(String::as_str), Some("40"));

    let pan = find(&events, "pan redirected");
    assert_eq!(pan.fields.get("dy").map(String::as_str), Some("-10"));
    assert_eq!(pan.fields.get("offset").map(String::as_str), Some("50"));

    let ended = find(&events, "pan session ended");
    assert_eq!(ended.fields.get("reason").map(String::as_str), Some("Released"));

    let key = find(&events, "keyboard scroll");
    assert_eq!(key.fields.get("action").map(String::as_str), Some("End"));
}
