#![forbid(unsafe_code)]

//! JSON input schema for `nestsheet-web`.
//!
//! The web host (JS/TS) forwards DOM events as small JSON objects tagged by
//! `kind`. This module focuses on:
//! - stable key normalization (DOM `key`/`code` → [`KeyCode`]),
//! - a compact modifier bitset (`mods: u8`),
//! - turning each message into a [`DrawerCommand`] for the session.
//!
//! Pointer messages are expected only for the drag handle; clicks carry the
//! part of the drawer they landed on.

use std::fmt;

use nestsheet_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind, PointerId, PointerType,
};
use nestsheet_widgets::{ClickTarget, ControlId, FocusTarget};
use serde::{Deserialize, Serialize};

/// Phase for key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPhase {
    Down,
    Up,
}

/// Phase for pointer events (`pointerdown`, `pointermove`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

impl From<PointerPhase> for PointerEventKind {
    fn from(phase: PointerPhase) -> Self {
        match phase {
            PointerPhase::Down => Self::Down,
            PointerPhase::Move => Self::Move,
            PointerPhase::Up => Self::Up,
            PointerPhase::Cancel => Self::Cancel,
        }
    }
}

/// Part of the drawer a click or focus message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Nothing,
    Trigger,
    Backdrop,
    Back,
    Item,
    Control,
}

/// JSON encoding of a host input message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEventJson {
    Key {
        phase: KeyPhase,
        key: String,
        #[serde(default)]
        code: String,
        #[serde(default)]
        mods: u8,
        #[serde(default)]
        repeat: bool,
    },
    Pointer {
        phase: PointerPhase,
        pointer_id: i32,
        #[serde(default = "default_pointer_type")]
        pointer_type: String,
        #[serde(default)]
        button: i16,
        client_y: f64,
    },
    Click {
        target: TargetKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        control: Option<u16>,
    },
    Focus {
        target: TargetKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        control: Option<u16>,
    },
    Frame,
    Resize {
        #[serde(default)]
        height: Option<f64>,
    },
    Open {
        open: bool,
    },
    Trigger {
        attached: bool,
    },
    Navigate {
        path: Vec<String>,
        #[serde(default)]
        open: bool,
    },
}

fn default_pointer_type() -> String {
    "mouse".to_string()
}

/// What a decoded message asks the session to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerCommand {
    /// Feed a canonical event to the drawer.
    Event(Event),
    /// A click on part of the drawer.
    Click(ClickTarget),
    /// The platform moved focus.
    Focus(FocusTarget),
    /// Mirror the host's open flag.
    SetOpen(bool),
    /// Attach or detach the trigger.
    SetTrigger(bool),
    /// Deep link, optionally opening the drawer.
    Navigate {
        /// Submenu ids from the root.
        path: Vec<String>,
        /// Open the drawer at the path.
        open: bool,
    },
}

/// A host message that cannot be decoded.
#[derive(Debug)]
pub enum InputDecodeError {
    /// Not valid JSON for the schema.
    Json(serde_json::Error),
    /// An `item` target without `index`.
    MissingIndex,
    /// A `control` target without `control`.
    MissingControl,
    /// A target that makes no sense for this message kind.
    InvalidTarget(TargetKind),
}

impl fmt::Display for InputDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed input event: {err}"),
            Self::MissingIndex => write!(f, "item target requires an index"),
            Self::MissingControl => write!(f, "control target requires a control id"),
            Self::InvalidTarget(kind) => write!(f, "target {kind:?} is not valid here"),
        }
    }
}

impl std::error::Error for InputDecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InputDecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl InputEventJson {
    /// Decode a host message.
    pub fn from_json_str(s: &str) -> Result<Self, InputDecodeError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Encode as a stable JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Translate into a command.
    ///
    /// Returns `Ok(None)` for messages the drawer has no use for, such as
    /// keys that do not normalize to a [`KeyCode`].
    pub fn to_command(&self) -> Result<Option<DrawerCommand>, InputDecodeError> {
        let command = match self {
            Self::Key {
                phase,
                key,
                code,
                mods,
                repeat,
            } => {
                let modifiers = Modifiers::from_bits_truncate(*mods);
                let Some(key_code) = normalize_dom_key(key, code, modifiers) else {
                    return Ok(None);
                };
                let kind = match (phase, repeat) {
                    (KeyPhase::Up, _) => KeyEventKind::Release,
                    (KeyPhase::Down, true) => KeyEventKind::Repeat,
                    (KeyPhase::Down, false) => KeyEventKind::Press,
                };
                DrawerCommand::Event(Event::Key(
                    KeyEvent::new(key_code)
                        .with_modifiers(modifiers)
                        .with_kind(kind),
                ))
            }
            Self::Pointer {
                phase,
                pointer_id,
                pointer_type,
                button,
                client_y,
            } => DrawerCommand::Event(Event::Pointer(
                PointerEvent::new((*phase).into(), PointerId(*pointer_id), *client_y)
                    .with_type(PointerType::from_dom(pointer_type))
                    .with_button(PointerButton::from_dom(*button)),
            )),
            Self::Click {
                target,
                index,
                control,
            } => DrawerCommand::Click(match target {
                TargetKind::Backdrop => ClickTarget::Backdrop,
                TargetKind::Back => ClickTarget::Back,
                TargetKind::Item => ClickTarget::Item(index.ok_or(InputDecodeError::MissingIndex)?),
                TargetKind::Control => ClickTarget::Control(ControlId(
                    control.ok_or(InputDecodeError::MissingControl)?,
                )),
                other @ (TargetKind::Nothing | TargetKind::Trigger) => {
                    return Err(InputDecodeError::InvalidTarget(*other));
                }
            }),
            Self::Focus {
                target,
                index,
                control,
            } => DrawerCommand::Focus(match target {
                TargetKind::Nothing => FocusTarget::Nothing,
                TargetKind::Trigger => FocusTarget::Trigger,
                TargetKind::Back => FocusTarget::Back,
                TargetKind::Item => FocusTarget::Item(index.ok_or(InputDecodeError::MissingIndex)?),
                TargetKind::Control => FocusTarget::Control(ControlId(
                    control.ok_or(InputDecodeError::MissingControl)?,
                )),
                TargetKind::Backdrop => {
                    return Err(InputDecodeError::InvalidTarget(TargetKind::Backdrop));
                }
            }),
            Self::Frame => DrawerCommand::Event(Event::Frame),
            Self::Resize { height } => DrawerCommand::Event(Event::Resize { height: *height }),
            Self::Open { open } => DrawerCommand::SetOpen(*open),
            Self::Trigger { attached } => DrawerCommand::SetTrigger(*attached),
            Self::Navigate { path, open } => DrawerCommand::Navigate {
                path: path.clone(),
                open: *open,
            },
        };
        Ok(Some(command))
    }
}

/// Deterministic normalization of DOM key/code strings into a [`KeyCode`].
///
/// Returns `None` for keys the drawer never reacts to, such as bare
/// modifiers, function keys and paging or editing keys.
#[must_use]
pub fn normalize_dom_key(dom_key: &str, dom_code: &str, mods: Modifiers) -> Option<KeyCode> {
    // Shift+Tab should be represented explicitly.
    if dom_key == "Tab" && mods.contains(Modifiers::SHIFT) {
        return Some(KeyCode::BackTab);
    }

    // Prefer the logical `key` for printable characters (already includes shift).
    let mut chars = dom_key.chars();
    if let Some(first) = chars.next()
        && chars.next().is_none()
    {
        return Some(KeyCode::Char(first));
    }

    Some(match dom_key {
        "Enter" => KeyCode::Enter,
        "Escape" | "Esc" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "ArrowUp" | "Up" => KeyCode::Up,
        "ArrowDown" | "Down" => KeyCode::Down,
        "ArrowLeft" | "Left" => KeyCode::Left,
        "ArrowRight" | "Right" => KeyCode::Right,
        "Spacebar" => KeyCode::Char(' '),
        // Fallback to DOM `code` for non-printable keys.
        _ => return key_code_from_dom_code(dom_code, mods),
    })
}

fn key_code_from_dom_code(dom_code: &str, mods: Modifiers) -> Option<KeyCode> {
    if dom_code == "Tab" && mods.contains(Modifiers::SHIFT) {
        return Some(KeyCode::BackTab);
    }

    Some(match dom_code {
        "Enter" | "NumpadEnter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Space" => KeyCode::Char(' '),
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "ArrowUp" => KeyCode::Up,
        "ArrowDown" => KeyCode::Down,
        "ArrowLeft" => KeyCode::Left,
        "ArrowRight" => KeyCode::Right,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dom_keys_normalize() {
        let none = Modifiers::NONE;
        assert_eq!(normalize_dom_key("ArrowDown", "ArrowDown", none), Some(KeyCode::Down));
        assert_eq!(normalize_dom_key("Escape", "Escape", none), Some(KeyCode::Escape));
        assert_eq!(normalize_dom_key(" ", "Space", none), Some(KeyCode::Char(' ')));
        assert_eq!(normalize_dom_key("Shift", "ShiftLeft", none), None);
    }

    #[test]
    fn editing_and_paging_keys_are_unmapped() {
        let none = Modifiers::NONE;
        for (key, code) in [
            ("F5", "F5"),
            ("PageDown", "PageDown"),
            ("PageUp", "PageUp"),
            ("Backspace", "Backspace"),
            ("Delete", "Delete"),
        ] {
            assert_eq!(normalize_dom_key(key, code, none), None, "{key}");
        }
    }

    #[test]
    fn shift_tab_is_back_tab() {
        assert_eq!(
            normalize_dom_key("Tab", "Tab", Modifiers::SHIFT),
            Some(KeyCode::BackTab)
        );
    }

    #[test]
    fn unidentified_key_falls_back_to_code() {
        assert_eq!(
            normalize_dom_key("Unidentified", "ArrowLeft", Modifiers::NONE),
            Some(KeyCode::Left)
        );
    }

    #[test]
    fn key_message_decodes() {
        let json = r#"{"kind":"key","phase":"down","key":"ArrowRight","code":"ArrowRight","mods":0}"#;
        let command = InputEventJson::from_json_str(json)
            .unwrap()
            .to_command()
            .unwrap();
        assert_eq!(
            command,
            Some(DrawerCommand::Event(Event::Key(KeyEvent::new(KeyCode::Right))))
        );
    }

    #[test]
    fn key_up_is_release() {
        let json = r#"{"kind":"key","phase":"up","key":"Escape"}"#;
        let command = InputEventJson::from_json_str(json).unwrap().to_command().unwrap();
        let Some(DrawerCommand::Event(Event::Key(key))) = command else {
            panic!("expected key event, got {command:?}");
        };
        assert_eq!(key.kind, KeyEventKind::Release);
    }

    #[test]
    fn pointer_message_decodes() {
        let json = r#"{"kind":"pointer","phase":"down","pointer_id":3,"pointer_type":"touch","button":-1,"client_y":412.5}"#;
        let command = InputEventJson::from_json_str(json).unwrap().to_command().unwrap();
        let expected = PointerEvent::new(PointerEventKind::Down, PointerId(3), 412.5)
            .with_type(PointerType::Touch)
            .with_button(PointerButton::Other(-1));
        assert_eq!(command, Some(DrawerCommand::Event(Event::Pointer(expected))));
    }

    #[test]
    fn pointer_defaults_to_primary_mouse() {
        let json = r#"{"kind":"pointer","phase":"move","pointer_id":1,"client_y":5}"#;
        let command = InputEventJson::from_json_str(json).unwrap().to_command().unwrap();
        let Some(DrawerCommand::Event(Event::Pointer(pointer))) = command else {
            panic!("expected pointer event");
        };
        assert_eq!(pointer.pointer_type, PointerType::Mouse);
        assert_eq!(pointer.button, PointerButton::Primary);
    }

    #[test]
    fn click_item_requires_index() {
        let json = r#"{"kind":"click","target":"item"}"#;
        let err = InputEventJson::from_json_str(json)
            .unwrap()
            .to_command()
            .unwrap_err();
        assert!(matches!(err, InputDecodeError::MissingIndex));
    }

    #[test]
    fn click_trigger_is_invalid() {
        let json = r#"{"kind":"click","target":"trigger"}"#;
        let err = InputEventJson::from_json_str(json)
            .unwrap()
            .to_command()
            .unwrap_err();
        assert_eq!(err.to_string(), "target Trigger is not valid here");
    }

    #[test]
    fn navigate_defaults_to_closed() {
        let json = r#"{"kind":"navigate","path":["products","cloud"]}"#;
        let command = InputEventJson::from_json_str(json).unwrap().to_command().unwrap();
        assert_eq!(
            command,
            Some(DrawerCommand::Navigate {
                path: vec!["products".to_string(), "cloud".to_string()],
                open: false,
            })
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = InputEventJson::from_json_str(r#"{"kind":"warp"}"#).unwrap_err();
        assert!(err.to_string().starts_with("malformed input event"));
    }

    #[test]
    fn encodes_with_kind_tag() {
        let json = InputEventJson::Open { open: true }.to_json_string().unwrap();
        assert_eq!(json, r#"{"kind":"open","open":true}"#);
        let frame = InputEventJson::Frame.to_json_string().unwrap();
        assert_eq!(frame, r#"{"kind":"frame"}"#);
    }
}
