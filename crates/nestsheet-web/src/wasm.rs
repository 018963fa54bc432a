#![forbid(unsafe_code)]

use nestsheet_widgets::scroll_lock::OverflowTarget;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::overflow::{OVERFLOW_PROPERTY, StyleWrite};
use crate::session::WebDrawerSession;

/// `overflow` on `document.documentElement`.
///
/// Resolved on every access so a missing document degrades to a no-op.
#[derive(Debug, Default)]
struct DocumentOverflow;

impl DocumentOverflow {
    fn root() -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl OverflowTarget for DocumentOverflow {
    fn overflow(&self) -> String {
        Self::root()
            .and_then(|el| el.style().get_property_value(OVERFLOW_PROPERTY).ok())
            .unwrap_or_default()
    }

    fn set_overflow(&mut self, value: &str) {
        let Some(el) = Self::root() else {
            return;
        };
        let style = el.style();
        let written = match StyleWrite::for_value(value) {
            StyleWrite::Remove => style.remove_property(OVERFLOW_PROPERTY).map(drop),
            StyleWrite::Set(v) => style.set_property(OVERFLOW_PROPERTY, v),
        };
        if let Err(_err) = written {
            nestsheet_core::debug!(error = ?_err, value, "failed to write page overflow");
        }
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Browser-facing nested navigation drawer.
///
/// Inputs and outputs are JSON strings in the schema of
/// [`crate::input::InputEventJson`] and [`crate::output::StepResultJson`].
#[wasm_bindgen]
pub struct NestedDrawerWeb {
    session: WebDrawerSession,
}

#[wasm_bindgen]
impl NestedDrawerWeb {
    /// Create a drawer from a menu document and optional options JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(menu_json: &str, options_json: Option<String>) -> Result<NestedDrawerWeb, JsValue> {
        let session = WebDrawerSession::from_json(menu_json, options_json.as_deref())
            .map_err(js_error)?
            .with_scroll_target(Box::new(DocumentOverflow));
        Ok(Self { session })
    }

    /// Feed one DOM-derived event; returns the step result as JSON.
    pub fn input(&mut self, event_json: &str) -> Result<String, JsValue> {
        let step = self.session.step(event_json).map_err(js_error)?;
        serde_json::to_string(&step).map_err(js_error)
    }

    /// Run deferred work; call from `requestAnimationFrame`.
    pub fn frame(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.frame()).map_err(js_error)
    }

    /// Current render state as JSON.
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.session.snapshot_json().map_err(js_error)
    }

    /// Replace the menu.
    #[wasm_bindgen(js_name = setMenu)]
    pub fn set_menu(&mut self, menu_json: &str) -> Result<String, JsValue> {
        let step = self.session.set_menu_json(menu_json).map_err(js_error)?;
        serde_json::to_string(&step).map_err(js_error)
    }

    /// Release page resources before the host element is removed.
    pub fn destroy(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.teardown()).map_err(js_error)
    }
}
