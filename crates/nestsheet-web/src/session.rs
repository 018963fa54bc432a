#![forbid(unsafe_code)]

//! Host session: JSON in, JSON out.
//!
//! [`WebDrawerSession`] owns a [`NestedDrawer`] and speaks the schemas in
//! [`crate::input`] and [`crate::output`]. It has no browser dependencies, so
//! the whole host protocol is testable natively; the wasm export is a thin
//! wrapper around it.
//!
//! # Step contract
//!
//! Each [`step`](WebDrawerSession::step) decodes one message, applies it, and
//! returns every notification the drawer queued while handling it. The host
//! calls `preventDefault()` when `consumed` is true and applies the events in
//! order (open flag, focus, pointer capture, overflow).
//!
//! Deferred work (focusing the first item, clearing the drag state) runs on
//! [`frame`](WebDrawerSession::frame), which the host calls from
//! `requestAnimationFrame`.

use std::fmt;

use nestsheet_core::event::Event;
use nestsheet_widgets::scroll_lock::OverflowTarget;
use nestsheet_widgets::{
    ConfigError, DialogControl, DrawerConfig, EventResult, MenuTree, NavigationError,
    NestedDrawer,
};
use serde::Deserialize;

use crate::input::{DrawerCommand, InputDecodeError, InputEventJson};
use crate::menu_json::{DEFAULT_MAX_DEPTH, MenuSchemaError, load_menu};
use crate::output::{ItemJson, OutputEventJson, SnapshotJson, StepResultJson};

/// Host-only options read from the same JSON object as [`DrawerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct HostOptions {
    max_menu_depth: usize,
    leading_controls: Vec<u16>,
    trailing_controls: Vec<u16>,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            max_menu_depth: DEFAULT_MAX_DEPTH,
            leading_controls: Vec::new(),
            trailing_controls: Vec::new(),
        }
    }
}

impl HostOptions {
    fn controls(&self) -> Vec<DialogControl> {
        self.leading_controls
            .iter()
            .map(|&id| DialogControl::leading(id))
            .chain(
                self.trailing_controls
                    .iter()
                    .map(|&id| DialogControl::trailing(id)),
            )
            .collect()
    }
}

/// Anything that stops a session call.
#[derive(Debug)]
pub enum SessionError {
    /// The input message could not be decoded.
    Input(InputDecodeError),
    /// The menu document was rejected.
    Menu(MenuSchemaError),
    /// The options describe an unusable configuration.
    Config(ConfigError),
    /// A deep link did not resolve.
    Navigation(NavigationError),
    /// Options or output could not be (de)serialized.
    Json(serde_json::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Menu(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid drawer options: {err}"),
            Self::Navigation(err) => write!(f, "navigation failed: {err}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Menu(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Navigation(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<InputDecodeError> for SessionError {
    fn from(err: InputDecodeError) -> Self {
        Self::Input(err)
    }
}

impl From<MenuSchemaError> for SessionError {
    fn from(err: MenuSchemaError) -> Self {
        Self::Menu(err)
    }
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<NavigationError> for SessionError {
    fn from(err: NavigationError) -> Self {
        Self::Navigation(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// A drawer driven by JSON host messages.
#[derive(Debug)]
pub struct WebDrawerSession {
    drawer: NestedDrawer,
    max_menu_depth: usize,
}

impl WebDrawerSession {
    /// Wrap an existing drawer.
    #[must_use]
    pub fn new(drawer: NestedDrawer) -> Self {
        Self {
            drawer,
            max_menu_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Build a session from a menu document and an optional options object.
    ///
    /// The options object carries [`DrawerConfig`] fields (all optional)
    /// plus `max_menu_depth`, `leading_controls` and `trailing_controls`.
    pub fn from_json(menu_json: &str, options_json: Option<&str>) -> Result<Self, SessionError> {
        let (config, host) = match options_json {
            Some(json) => (
                serde_json::from_str::<DrawerConfig>(json)?,
                serde_json::from_str::<HostOptions>(json)?,
            ),
            None => (DrawerConfig::default(), HostOptions::default()),
        };
        let tree = load_menu(menu_json, host.max_menu_depth)?;
        let drawer = NestedDrawer::with_config(tree, config)?.with_controls(host.controls());
        Ok(Self {
            drawer,
            max_menu_depth: host.max_menu_depth,
        })
    }

    /// Lock scrolling on `target` while open.
    #[must_use]
    pub fn with_scroll_target(mut self, target: Box<dyn OverflowTarget>) -> Self {
        self.drawer = self.drawer.with_scroll_target(target);
        self
    }

    /// The wrapped drawer.
    #[must_use]
    pub fn drawer(&self) -> &NestedDrawer {
        &self.drawer
    }

    /// Mutable access to the wrapped drawer.
    pub fn drawer_mut(&mut self) -> &mut NestedDrawer {
        &mut self.drawer
    }

    /// Replace the menu from a JSON document.
    pub fn set_menu_json(&mut self, menu_json: &str) -> Result<StepResultJson, SessionError> {
        let tree = load_menu(menu_json, self.max_menu_depth)?;
        Ok(self.set_menu(tree))
    }

    /// Replace the menu tree.
    pub fn set_menu(&mut self, tree: MenuTree) -> StepResultJson {
        self.drawer.set_menu(tree);
        self.collect(EventResult::Ignored)
    }

    /// Apply a decoded command.
    pub fn apply(&mut self, command: DrawerCommand) -> Result<EventResult, SessionError> {
        let result = match command {
            DrawerCommand::Event(event) => self.drawer.handle_event(&event),
            DrawerCommand::Click(target) => self.drawer.click(target),
            DrawerCommand::Focus(target) => {
                self.drawer.focus_changed(target);
                EventResult::Ignored
            }
            DrawerCommand::SetOpen(open) => {
                self.drawer.set_open(open);
                EventResult::Ignored
            }
            DrawerCommand::SetTrigger(attached) => {
                self.drawer.set_trigger(attached);
                EventResult::Ignored
            }
            DrawerCommand::Navigate { path, open } => {
                if open {
                    self.drawer.open_at(&path)?;
                } else {
                    self.drawer.navigate_to(&path)?;
                }
                EventResult::Ignored
            }
        };
        Ok(result)
    }

    /// Decode and apply one host message.
    ///
    /// Messages the drawer has no use for (unmapped keys) yield an empty,
    /// unconsumed result. On error the drawer is unchanged.
    pub fn step(&mut self, input_json: &str) -> Result<StepResultJson, SessionError> {
        let message = InputEventJson::from_json_str(input_json)?;
        let Some(command) = message.to_command()? else {
            nestsheet_core::trace!(input = input_json, "input without a drawer mapping");
            return Ok(StepResultJson::default());
        };
        let result = self.apply(command)?;
        Ok(self.collect(result))
    }

    /// [`step`](Self::step) with a JSON string result.
    ///
    /// Failures are reported as `{"error": "..."}`.
    pub fn step_json(&mut self, input_json: &str) -> String {
        match self
            .step(input_json)
            .and_then(|step| serde_json::to_string(&step).map_err(SessionError::from))
        {
            Ok(json) => json,
            Err(err) => {
                nestsheet_core::debug!(error = %err, "rejected host input");
                error_json(&err)
            }
        }
    }

    /// Run deferred work for one animation frame.
    pub fn frame(&mut self) -> StepResultJson {
        let result = self.drawer.handle_event(&Event::Frame);
        self.collect(result)
    }

    /// Unmount: cancel deferred work and release the scroll lock.
    pub fn teardown(&mut self) -> StepResultJson {
        self.drawer.teardown();
        self.collect(EventResult::Ignored)
    }

    /// Everything the host needs to render the current state.
    #[must_use]
    pub fn snapshot(&self) -> SnapshotJson {
        let drawer = &self.drawer;
        let heading = drawer.heading();
        SnapshotJson {
            open: drawer.is_open(),
            path: drawer.path().ids().to_vec(),
            level_key: drawer.level_key().to_string(),
            trail_label: drawer.trail_label(),
            heading: heading.title,
            subheading: heading.subtitle,
            dialog_label: drawer.config().dialog_label.clone(),
            back_label: (drawer.depth() > 0).then(|| drawer.config().back_label.clone()),
            items: drawer.current_items().iter().map(ItemJson::from).collect(),
            focus: drawer.focus().into(),
            presentation: drawer.presentation().into(),
            scroll_locked: drawer.is_scroll_locked(),
            a11y_outline: drawer.accessibility().outline(),
        }
    }

    /// [`snapshot`](Self::snapshot) as a JSON string.
    pub fn snapshot_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    fn collect(&mut self, result: EventResult) -> StepResultJson {
        StepResultJson {
            consumed: result.is_consumed(),
            events: self
                .drawer
                .drain_events()
                .iter()
                .map(OutputEventJson::from)
                .collect(),
        }
    }
}

/// Encode an error for the host.
#[must_use]
pub fn error_json(err: &dyn std::error::Error) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
