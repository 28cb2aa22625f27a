#![forbid(unsafe_code)]

//! Per-viewport engine options.
//!
//! Hosts pass options as JSON (the web binding stringifies the JS object it
//! receives). Supported keys, each optional:
//! - `keyboardRedirection` / `keyboard_redirection` / `keyboard`: bool
//! - `touchRedirection` / `touch_redirection` / `touch`: bool
//! - `lineHeight` / `line_height`: number, pixels per line-mode wheel step
//!
//! Defaults: both redirections enabled, `lineHeight = 16`. Unknown keys are
//! rejected so a misspelled option does not silently fall back to a default.

use serde::{Deserialize, Serialize};

/// Pixels per wheel "line" when the platform reports line-mode deltas.
pub const DEFAULT_LINE_HEIGHT: f64 = 16.0;

/// Configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Input was not valid options JSON.
    Parse(String),
    /// `lineHeight` must be finite and positive.
    InvalidLineHeight(f64),
}

impl core::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid scroll options: {msg}"),
            Self::InvalidLineHeight(value) => {
                write!(f, "lineHeight must be finite and > 0, got {value}")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

/// Options recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ScrollOptions {
    /// Arrow/page/space/home/end paging.
    #[serde(alias = "keyboard", alias = "keyboard_redirection")]
    pub keyboard_redirection: bool,
    /// Vertical touch pans mapped onto horizontal scrolling.
    #[serde(alias = "touch", alias = "touch_redirection")]
    pub touch_redirection: bool,
    /// Pixels per line for line-mode wheel deltas.
    #[serde(alias = "line_height")]
    pub line_height: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            keyboard_redirection: true,
            touch_redirection: true,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl ScrollOptions {
    /// Parse and validate options JSON. Empty input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self =
            serde_json::from_str(json).map_err(|err| OptionsError::Parse(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(OptionsError::InvalidLineHeight(self.line_height));
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_keyboard_redirection(mut self, enabled: bool) -> Self {
        self.keyboard_redirection = enabled;
        self
    }

    #[must_use]
    pub const fn with_touch_redirection(mut self, enabled: bool) -> Self {
        self.touch_redirection = enabled;
        self
    }

    #[must_use]
    pub const fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Serialize for host-side snapshots.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Plain struct of bools and one finite float: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_enable_everything() {
        let options = ScrollOptions::default();
        assert!(options.keyboard_redirection);
        assert!(options.touch_redirection);
        assert_eq!(options.line_height, DEFAULT_LINE_HEIGHT);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(ScrollOptions::from_json(""), Ok(ScrollOptions::default()));
        assert_eq!(ScrollOptions::from_json("{}"), Ok(ScrollOptions::default()));
    }

    #[test]
    fn camel_snake_and_short_aliases() {
        let camel = ScrollOptions::from_json(r#"{"keyboardRedirection": false}"#);
        let snake = ScrollOptions::from_json(r#"{"keyboard_redirection": false}"#);
        let short = ScrollOptions::from_json(r#"{"keyboard": false}"#);
        let expected = ScrollOptions::default().with_keyboard_redirection(false);
        assert_eq!(camel, Ok(expected));
        assert_eq!(snake, Ok(expected));
        assert_eq!(short, Ok(expected));

        let touch = ScrollOptions::from_json(r#"{"touch": false, "lineHeight": 20}"#);
        assert_eq!(
            touch,
            Ok(ScrollOptions::default()
                .with_touch_redirection(false)
                .with_line_height(20.0))
        );
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ScrollOptions::from_json(r#"{"keybord": false}"#);
        assert!(matches!(err, Err(OptionsError::Parse(_))));
    }

    #[test]
    fn wrong_type_rejected() {
        let err = ScrollOptions::from_json(r#"{"touch": "yes"}"#);
        assert!(matches!(err, Err(OptionsError::Parse(_))));
    }

    #[test]
    fn line_height_validated() {
        assert_eq!(
            ScrollOptions::from_json(r#"{"lineHeight": 0}"#),
            Err(OptionsError::InvalidLineHeight(0.0))
        );
        assert_eq!(
            ScrollOptions::from_json(r#"{"lineHeight": -4.5}"#),
            Err(OptionsError::InvalidLineHeight(-4.5))
        );
        assert!(ScrollOptions::default().with_line_height(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn json_snapshot_roundtrips() {
        let options = ScrollOptions::default().with_touch_redirection(false);
        let json = options.to_json();
        assert!(json.contains("\"touchRedirection\":false"));
        assert_eq!(ScrollOptions::from_json(&json), Ok(options));
    }

    #[test]
    fn error_display() {
        let err = OptionsError::InvalidLineHeight(-1.0);
        assert_eq!(err.to_string(), "lineHeight must be finite and > 0, got -1");
    }
}
