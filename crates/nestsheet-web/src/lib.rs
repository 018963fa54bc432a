#![forbid(unsafe_code)]

//! Browser host for the Nestsheet drawer.
//!
//! The drawer itself is headless (`nestsheet-widgets`). This crate defines
//! the JSON protocol a JS/TS host speaks to it:
//! - [`input`]: DOM events in,
//! - [`output`]: notifications and render snapshots out,
//! - [`menu_json`]: the menu document,
//! - [`session`]: a native-testable loop tying them together,
//! - [`overflow`]: the inline-style writes behind the page scroll lock.
//!
//! On `wasm32` the session is exported through `wasm-bindgen` as
//! `NestedDrawerWeb`, with page scroll locking applied to
//! `document.documentElement`.

pub mod input;
pub mod menu_json;
pub mod output;
pub mod overflow;
pub mod session;

pub use input::{DrawerCommand, InputDecodeError, InputEventJson, normalize_dom_key};
pub use menu_json::{DEFAULT_MAX_DEPTH, MenuSchemaError, load_menu};
pub use output::{OutputEventJson, SnapshotJson, StepResultJson};
pub use session::{SessionError, WebDrawerSession};

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::NestedDrawerWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct NestedDrawerWeb;

#[cfg(not(target_arch = "wasm32"))]
impl NestedDrawerWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
