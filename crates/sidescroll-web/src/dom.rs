#![forbid(unsafe_code)]

//! DOM capabilities and the attach/detach lifecycle.
//!
//! - [`DomViewport`]: `scrollLeft`/`clientWidth`/`scrollWidth` and native
//!   smooth scrolling on one element.
//! - [`DomFocusProbe`]: `document.activeElement`.
//! - [`RafScheduler`]: one `requestAnimationFrame` slot per engine; a new
//!   request replaces (and cancels) the previous one.
//! - [`attach`]: installs the listeners from
//!   [`LISTENERS`](sidescroll_core::listener::LISTENERS) and returns the
//!   [`Attachment`] that owns them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{AnimationFrame, request_animation_frame};
use js_sys::Reflect;
use sidescroll_core::ScrollOptions;
use sidescroll_core::coalescer::{FrameScheduler, FrameToken};
use sidescroll_core::engine::{EventDisposition, GestureTranslationEngine};
use sidescroll_core::focus::{FocusProbe, FocusedElement};
use sidescroll_core::listener::{DomEvent, ListenerTarget, listeners_for};
use sidescroll_core::viewport::Viewport;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, ScrollBehavior,
    ScrollToOptions, TouchEvent, WheelEvent,
};

use crate::convert;

/// `scrollLeft` is read through `Reflect` to keep sub-pixel offsets.
const SCROLL_LEFT: &str = "scrollLeft";

/// Engine wired to DOM capabilities.
pub type DomEngine = GestureTranslationEngine<DomViewport, RafScheduler, DomFocusProbe>;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// A scrollable DOM element.
#[derive(Debug, Clone)]
pub struct DomViewport {
    element: Element,
}

impl DomViewport {
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

fn smooth_options(left: f64) -> ScrollToOptions {
    let options = ScrollToOptions::new();
    options.set_left(left);
    options.set_behavior(ScrollBehavior::Smooth);
    options
}

impl Viewport for DomViewport {
    fn scroll_left(&self) -> f64 {
        Reflect::get(&self.element, &JsValue::from_str(SCROLL_LEFT))
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    fn set_scroll_left(&mut self, offset: f64) {
        if let Err(err) = Reflect::set(
            &self.element,
            &JsValue::from_str(SCROLL_LEFT),
            &JsValue::from_f64(offset),
        ) {
            warn!(?err, "scrollLeft write rejected");
        }
    }

    fn client_width(&self) -> f64 {
        f64::from(self.element.client_width())
    }

    fn scroll_width(&self) -> f64 {
        f64::from(self.element.scroll_width())
    }

    fn smooth_scroll_by(&mut self, delta: f64) {
        self.element
            .scroll_by_with_scroll_to_options(&smooth_options(delta));
    }

    fn smooth_scroll_to(&mut self, offset: f64) {
        self.element
            .scroll_to_with_scroll_to_options(&smooth_options(offset));
    }
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Reads `document.activeElement`.
#[derive(Debug, Clone)]
pub struct DomFocusProbe {
    document: Document,
}

impl DomFocusProbe {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl FocusProbe for DomFocusProbe {
    fn focused_element(&self) -> Option<FocusedElement> {
        let active = self.document.active_element()?;
        let editable = active
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable);
        Some(FocusedElement::new(active.tag_name(), editable))
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// Receives the token of each animation frame that fires.
pub type FrameSink = Rc<dyn Fn(FrameToken)>;

/// `requestAnimationFrame` scheduler with a single in-flight slot.
pub struct RafScheduler {
    next_id: u64,
    in_flight: Option<(FrameToken, AnimationFrame)>,
    sink: FrameSink,
}

impl std::fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RafScheduler")
            .field("next_id", &self.next_id)
            .field("in_flight", &self.in_flight.as_ref().map(|(token, _)| *token))
            .finish()
    }
}

impl RafScheduler {
    #[must_use]
    pub fn new(sink: FrameSink) -> Self {
        Self {
            next_id: 0,
            in_flight: None,
            sink,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken::new(self.next_id);
        let sink = Rc::clone(&self.sink);
        let handle = request_animation_frame(move |_timestamp| sink(token));
        // Dropping a replaced AnimationFrame cancels it.
        self.in_flight = Some((token, handle));
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|(live, _)| *live == token)
        {
            self.in_flight = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Live binding between one element and its engine.
///
/// Dropping the attachment (or calling [`detach`](Self::detach)) removes
/// every listener and cancels the pending animation frame.
pub struct Attachment {
    engine: Rc<RefCell<DomEngine>>,
    listeners: Vec<EventListener>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("listeners", &self.listeners.len())
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl Attachment {
    /// Tear down now instead of at drop.
    pub fn detach(mut self) {
        self.teardown();
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.engine
            .try_borrow()
            .is_ok_and(|engine| engine.is_attached())
    }

    #[must_use]
    pub fn options(&self) -> Option<ScrollOptions> {
        self.engine.try_borrow().ok().map(|engine| *engine.options())
    }

    fn teardown(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let removed = self.listeners.len();
        self.listeners.clear();
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.detach();
        }
        debug!(removed, "detached from scroll surface");
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Attach an engine to `element`.
///
/// Returns `None` outside a window context (no `window`/`document`).
#[must_use]
pub fn attach(element: &Element, options: ScrollOptions) -> Option<Attachment> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let engine = Rc::new_cyclic(|weak: &Weak<RefCell<DomEngine>>| {
        let weak = weak.clone();
        let sink: FrameSink = Rc::new(move |token| {
            let Some(cell) = weak.upgrade() else {
                return;
            };
            let Ok(mut engine) = cell.try_borrow_mut() else {
                return;
            };
            engine.on_frame(token);
        });
        RefCell::new(GestureTranslationEngine::new(
            DomViewport::new(element.clone()),
            RafScheduler::new(sink),
            DomFocusProbe::new(document),
            options,
        ))
    });

    let mut listeners = Vec::new();
    for spec in listeners_for(&options) {
        let target: &EventTarget = match spec.target {
            ListenerTarget::Surface => element,
            ListenerTarget::Window => &window,
        };
        let listener_options = if spec.passive {
            EventListenerOptions::default()
        } else {
            EventListenerOptions::enable_prevent_default()
        };
        let engine = Rc::clone(&engine);
        let kind = spec.event;
        listeners.push(EventListener::new_with_options(
            target,
            kind.as_str(),
            listener_options,
            move |event| dispatch(&engine, kind, event),
        ));
    }

    debug!(listeners = listeners.len(), "attached to scroll surface");
    Some(Attachment { engine, listeners })
}

/// Attach to the element with `id`, if it exists.
#[must_use]
pub fn attach_by_id(id: &str, options: ScrollOptions) -> Option<Attachment> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    attach(&element, options)
}

fn dispatch(engine: &RefCell<DomEngine>, kind: DomEvent, event: &Event) {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        return;
    };

    let disposition = match kind {
        DomEvent::Wheel => match event.dyn_ref::<WheelEvent>() {
            Some(wheel) => engine.on_wheel(&convert::wheel_input(
                wheel.delta_x(),
                wheel.delta_y(),
                wheel.delta_mode(),
            )),
            None => EventDisposition::PassThrough,
        },
        DomEvent::KeyDown => match event.dyn_ref::<KeyboardEvent>() {
            Some(key) => engine.on_key(&convert::key_down(&key.key())),
            None => EventDisposition::PassThrough,
        },
        DomEvent::TouchStart | DomEvent::TouchMove | DomEvent::TouchEnd | DomEvent::TouchCancel => {
            let input = event
                .dyn_ref::<TouchEvent>()
                .and_then(|touch| convert::touch_input(kind, touch_points(touch)));
            match input {
                Some(input) => engine.on_touch(&input),
                None => EventDisposition::PassThrough,
            }
        }
    };

    if disposition.is_suppressed() {
        event.prevent_default();
    }
}

fn touch_points(event: &TouchEvent) -> Vec<(i32, f64, f64)> {
    let list = event.touches();
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|touch| {
            (
                touch.identifier(),
                f64::from(touch.client_x()),
                f64::from(touch.client_y()),
            )
        })
        .collect()
}
