#![forbid(unsafe_code)]

//! JS-facing handle.
//!
//! ```js
//! const scroll = HorizontalScroll.attach(document.getElementById("strip"), {
//!   keyboard: false,
//! });
//! // ...
//! scroll.detach();
//! ```

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{self, Attachment};
use crate::{ScrollOptions, parse_options};

/// Horizontal scrolling bound to one element.
///
/// A handle created for a missing element is inert: every method is a no-op.
#[wasm_bindgen]
#[derive(Debug)]
pub struct HorizontalScroll {
    attachment: Option<Attachment>,
}

#[wasm_bindgen]
impl HorizontalScroll {
    /// Attach to `element`. `options` may be `undefined`, `null` or an
    /// object with `keyboard`/`touch`/`lineHeight` (snake_case accepted).
    pub fn attach(element: Option<Element>, options: JsValue) -> Result<HorizontalScroll, JsValue> {
        let options = parse_js_options(&options)?;
        let attachment = match element {
            Some(element) => dom::attach(&element, options),
            None => {
                debug!("no scroll surface, handle is inert");
                None
            }
        };
        Ok(Self { attachment })
    }

    /// Attach to `document.getElementById(id)`.
    #[wasm_bindgen(js_name = attachById)]
    pub fn attach_by_id(id: &str, options: JsValue) -> Result<HorizontalScroll, JsValue> {
        let options = parse_js_options(&options)?;
        let attachment = dom::attach_by_id(id, options);
        if attachment.is_none() {
            debug!(id, "no element with id, handle is inert");
        }
        Ok(Self { attachment })
    }

    #[wasm_bindgen(js_name = isAttached)]
    pub fn is_attached(&self) -> bool {
        self.attachment
            .as_ref()
            .is_some_and(Attachment::is_attached)
    }

    /// Remove every listener and cancel the pending frame. Idempotent.
    pub fn detach(&mut self) {
        if let Some(attachment) = self.attachment.take() {
            attachment.detach();
        }
    }
}

fn parse_js_options(options: &JsValue) -> Result<ScrollOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ScrollOptions::default());
    }
    let json: String = js_sys::JSON::stringify(options)?.into();
    parse_options(Some(&json)).map_err(|err| {
        warn!(%err, "rejected scroll options");
        JsValue::from_str(&err.to_string())
    })
}
