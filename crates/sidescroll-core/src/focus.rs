#![forbid(unsafe_code)]

//! Typing-context detection.
//!
//! Keyboard paging must never steal arrow keys or the space bar from a text
//! field. [`InputContextGuard`] asks an injected [`FocusProbe`] what element
//! currently holds focus and reports whether it accepts text.

/// Description of the focused element, as far as the guard cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusedElement {
    tag_name: String,
    content_editable: bool,
}

impl FocusedElement {
    #[must_use]
    pub fn new(tag_name: impl Into<String>, content_editable: bool) -> Self {
        Self {
            tag_name: tag_name.into(),
            content_editable,
        }
    }

    /// A non-editable element such as a button or the document body.
    #[must_use]
    pub fn plain(tag_name: impl Into<String>) -> Self {
        Self::new(tag_name, false)
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    #[must_use]
    pub const fn is_content_editable(&self) -> bool {
        self.content_editable
    }

    /// Text input, multi-line text area, or editable-in-place element.
    #[must_use]
    pub fn is_text_entry(&self) -> bool {
        self.content_editable
            || self.tag_name.eq_ignore_ascii_case("input")
            || self.tag_name.eq_ignore_ascii_case("textarea")
    }
}

/// Capability reporting the currently focused element.
pub trait FocusProbe {
    /// `None` when nothing (or the document itself) holds focus.
    fn focused_element(&self) -> Option<FocusedElement>;
}

/// Suppresses keyboard redirection while the user is typing.
#[derive(Debug, Clone)]
pub struct InputContextGuard<P> {
    probe: P,
}

impl<P: FocusProbe> InputContextGuard<P> {
    #[must_use]
    pub const fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Whether the focused element accepts text input.
    #[must_use]
    pub fn is_typing_context(&self) -> bool {
        self.probe
            .focused_element()
            .is_some_and(|element| element.is_text_entry())
    }

    #[must_use]
    pub fn probe(&self) -> &P {
        &self.probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::StaticFocus;

    #[test]
    fn text_entry_elements() {
        assert!(FocusedElement::plain("INPUT").is_text_entry());
        assert!(FocusedElement::plain("textarea").is_text_entry());
        assert!(FocusedElement::new("DIV", true).is_text_entry());
        assert!(!FocusedElement::plain("BUTTON").is_text_entry());
        assert!(!FocusedElement::plain("BODY").is_text_entry());
    }

    #[test]
    fn guard_follows_focus() {
        let focus = StaticFocus::new();
        let guard = InputContextGuard::new(focus.clone());
        assert!(!guard.is_typing_context());

        focus.focus(FocusedElement::plain("INPUT"));
        assert!(guard.is_typing_context());

        focus.focus(FocusedElement::plain("A"));
        assert!(!guard.is_typing_context());

        focus.focus(FocusedElement::new("SECTION", true));
        assert!(guard.is_typing_context());

        focus.blur();
        assert!(!guard.is_typing_context());
    }
}
