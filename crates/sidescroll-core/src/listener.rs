#![forbid(unsafe_code)]

//! Event listener registration table.
//!
//! Hosts install exactly the listeners declared in [`LISTENERS`]. The
//! `passive` flag matters: a passive listener cannot cancel the platform's
//! default action, so every event the engine may suppress (`wheel`,
//! `touchmove`, `keydown`) must be registered non-passive or suppression is
//! silently ignored by the browser.

use crate::config::ScrollOptions;
use crate::input::TouchPhase;

/// DOM event types the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    KeyDown,
}

impl DomEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wheel => "wheel",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::KeyDown => "keydown",
        }
    }

    #[must_use]
    pub const fn touch_phase(self) -> Option<TouchPhase> {
        match self {
            Self::TouchStart => Some(TouchPhase::Start),
            Self::TouchMove => Some(TouchPhase::Move),
            Self::TouchEnd => Some(TouchPhase::End),
            Self::TouchCancel => Some(TouchPhase::Cancel),
            Self::Wheel | Self::KeyDown => None,
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The scrollable surface itself.
    Surface,
    /// The global window (keyboard paging works without surface focus).
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerSpec {
    pub event: DomEvent,
    pub target: ListenerTarget,
    pub passive: bool,
}

impl ListenerSpec {
    const fn new(event: DomEvent, target: ListenerTarget, passive: bool) -> Self {
        Self {
            event,
            target,
            passive,
        }
    }

    /// Whether this listener may call `preventDefault`.
    #[must_use]
    pub const fn can_suppress(&self) -> bool {
        !self.passive
    }
}

/// Every listener the engine may need.
pub const LISTENERS: &[ListenerSpec] = &[
    ListenerSpec::new(DomEvent::Wheel, ListenerTarget::Surface, false),
    ListenerSpec::new(DomEvent::TouchStart, ListenerTarget::Surface, true),
    ListenerSpec::new(DomEvent::TouchMove, ListenerTarget::Surface, false),
    ListenerSpec::new(DomEvent::TouchEnd, ListenerTarget::Surface, true),
    ListenerSpec::new(DomEvent::TouchCancel, ListenerTarget::Surface, true),
    ListenerSpec::new(DomEvent::KeyDown, ListenerTarget::Window, false),
];

/// Listeners to install for `options`.
///
/// Disabled input families get no listener at all.
pub fn listeners_for(
    options: &ScrollOptions,
) -> impl Iterator<Item = &'static ListenerSpec> + '_ {
    LISTENERS.iter().filter(move |spec| match spec.event {
        DomEvent::Wheel => true,
        DomEvent::KeyDown => options.keyboard_redirection,
        DomEvent::TouchStart | DomEvent::TouchMove | DomEvent::TouchEnd | DomEvent::TouchCancel => {
            options.touch_redirection
        }
    })
}
