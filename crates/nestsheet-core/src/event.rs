#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native input (DOM events, crossterm events, test
//! scripts) into these types before handing them to the drawer.
//!
//! # Design Notes
//!
//! - Pointer positions are vertical only; the drawer tracks a single-axis drag.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish kinds.
//! - `Modifiers` use bitflags for easy combination.
//! - Terminal hosts report pointer rows as `client_y`; thresholds in
//!   `DrawerConfig` are then measured in rows rather than CSS pixels.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse, touch, pen) event.
    Pointer(PointerEvent),

    /// The viewport was resized.
    ///
    /// `None` means the host has no viewport (non-browser rendering).
    Resize {
        /// New viewport height in host units.
        height: Option<f64>,
    },

    /// The host is about to paint a frame.
    ///
    /// Deferred work (focus moves, drag resets) runs on this event.
    Frame,
}

impl Event {
    /// Convert a Crossterm event into a drawer [`Event`].
    ///
    /// Mouse rows become `client_y`; only the left button maps to the
    /// primary pointer button.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Event::Key),
            cte::Event::Mouse(mouse) => map_mouse_event(mouse).map(Event::Pointer),
            cte::Event::Resize(_, rows) => Some(Event::Resize {
                height: Some(f64::from(rows)),
            }),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Whether the key goes down (press or auto-repeat).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether this is a backwards Tab (`BackTab` or Shift+Tab).
    #[must_use]
    pub const fn is_back_tab(&self) -> bool {
        match self.code {
            KeyCode::BackTab => true,
            KeyCode::Tab => self.shift(),
            _ => false,
        }
    }

    /// Whether this key activates a button (Enter or Space).
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(self.code, KeyCode::Enter) || self.is_char(' ')
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Host-assigned pointer identity (DOM `pointerId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i32);

/// Pointer id used for the single terminal mouse.
pub const TERMINAL_POINTER_ID: PointerId = PointerId(1);

/// The kind of device behind a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerType {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A finger on a touch surface.
    Touch,
    /// A stylus.
    Pen,
}

impl PointerType {
    /// Parse a DOM `pointerType` string. Unknown strings map to `Mouse`.
    #[must_use]
    pub fn from_dom(value: &str) -> Self {
        match value {
            "touch" => Self::Touch,
            "pen" => Self::Pen,
            _ => Self::Mouse,
        }
    }
}

/// Pointer buttons, numbered as in DOM `PointerEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Main button (left mouse button, touch contact, pen contact).
    #[default]
    Primary,
    /// Auxiliary button (middle mouse button).
    Auxiliary,
    /// Secondary button (right mouse button).
    Secondary,
    /// Any other button index.
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `button` index.
    #[must_use]
    pub const fn from_dom(index: i16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer went down (`pointerdown`).
    Down,
    /// Pointer moved (`pointermove`).
    Move,
    /// Pointer was released (`pointerup`).
    Up,
    /// The platform aborted the gesture (`pointercancel`).
    Cancel,
}

/// A pointer event on the drag handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event phase.
    pub kind: PointerEventKind,
    /// Pointer identity.
    pub pointer_id: PointerId,
    /// Device kind.
    pub pointer_type: PointerType,
    /// Button that changed state.
    pub button: PointerButton,
    /// Vertical position in viewport coordinates.
    pub client_y: f64,
}

impl PointerEvent {
    /// Create a primary-button mouse pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, pointer_id: PointerId, client_y: f64) -> Self {
        Self {
            kind,
            pointer_id,
            pointer_type: PointerType::Mouse,
            button: PointerButton::Primary,
            client_y,
        }
    }

    /// Set the device kind.
    #[must_use]
    pub const fn with_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Whether this pointer may start a drag.
    ///
    /// Touch and pen contacts always qualify; a mouse only with its primary
    /// button.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        match self.pointer_type {
            PointerType::Mouse => matches!(self.button, PointerButton::Primary),
            PointerType::Touch | PointerType::Pen => true,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(event.code)?;
    let modifiers = map_modifiers(event.modifiers);
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers,
        kind,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_code(code: cte::KeyCode) -> Option<KeyCode> {
    match code {
        cte::KeyCode::Enter => Some(KeyCode::Enter),
        cte::KeyCode::Left => Some(KeyCode::Left),
        cte::KeyCode::Right => Some(KeyCode::Right),
        cte::KeyCode::Up => Some(KeyCode::Up),
        cte::KeyCode::Down => Some(KeyCode::Down),
        cte::KeyCode::Home => Some(KeyCode::Home),
        cte::KeyCode::End => Some(KeyCode::End),
        cte::KeyCode::Tab => Some(KeyCode::Tab),
        cte::KeyCode::BackTab => Some(KeyCode::BackTab),
        cte::KeyCode::Char(c) => Some(KeyCode::Char(c)),
        cte::KeyCode::Esc => Some(KeyCode::Escape),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.contains(cte::KeyModifiers::SUPER)
        || modifiers.contains(cte::KeyModifiers::HYPER)
        || modifiers.contains(cte::KeyModifiers::META)
    {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_button(button: cte::MouseButton) -> PointerButton {
    match button {
        cte::MouseButton::Left => PointerButton::Primary,
        cte::MouseButton::Middle => PointerButton::Auxiliary,
        cte::MouseButton::Right => PointerButton::Secondary,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> Option<PointerEvent> {
    let (kind, button) = match event.kind {
        cte::MouseEventKind::Down(button) => (PointerEventKind::Down, map_mouse_button(button)),
        cte::MouseEventKind::Drag(button) => (PointerEventKind::Move, map_mouse_button(button)),
        cte::MouseEventKind::Up(button) => (PointerEventKind::Up, map_mouse_button(button)),
        _ => return None,
    };
    Some(
        PointerEvent::new(kind, TERMINAL_POINTER_ID, f64::from(event.row)).with_button(button),
    )
}
