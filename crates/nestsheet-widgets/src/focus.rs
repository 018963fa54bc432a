#![forbid(unsafe_code)]

//! Focus targets, the dialog focus ring, and roving item navigation.
//!
//! The drawer never queries a live tree for focusable elements. Instead a
//! [`FocusRing`] is rebuilt whenever a level renders: optional leading host
//! controls, the back button when below the root, every visible item, then
//! trailing host controls. Focus guards are never part of the ring.
//!
//! # Invariants
//!
//! 1. Ring order is leading controls, back, items, trailing controls.
//! 2. [`FocusRing::trap_tab`] never returns a target outside the ring.
//! 3. [`rove`] only returns indices `< len`, and `None` only when `len == 0`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Focus outside the ring | Host focused something else | Tab enters at first/last |
//! | Stale item index | List shrank | Treated as nothing focused |
//! | Empty ring | No items, no back, no controls | Tab is not trapped |

use nestsheet_core::event::KeyCode;

/// Host-assigned identifier of an extra dialog control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u16);

/// An element that can hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    /// Nothing the drawer knows about has focus.
    #[default]
    Nothing,
    /// The host control that opens the drawer.
    Trigger,
    /// The back button.
    Back,
    /// The visible item at this index.
    Item(usize),
    /// A host-supplied dialog control.
    Control(ControlId),
}

impl FocusTarget {
    /// Item index, if this is an item.
    #[must_use]
    pub const fn item_index(self) -> Option<usize> {
        match self {
            Self::Item(index) => Some(index),
            _ => None,
        }
    }

    /// Whether this is a menu item.
    #[must_use]
    pub const fn is_item(self) -> bool {
        matches!(self, Self::Item(_))
    }
}

/// What a host control is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// An interactive control that joins the Tab ring.
    Button,
    /// A focus sentinel; never part of the ring.
    Guard,
}

/// Where a host control sits relative to the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPlacement {
    /// Before the back button (header).
    Leading,
    /// After the last item (footer).
    Trailing,
}

/// An extra focusable element rendered inside the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogControl {
    /// Identifier reported back in [`FocusTarget::Control`].
    pub id: ControlId,
    /// Button or guard.
    pub kind: ControlKind,
    /// Header or footer.
    pub placement: ControlPlacement,
}

impl DialogControl {
    /// A header button.
    #[must_use]
    pub const fn leading(id: u16) -> Self {
        Self {
            id: ControlId(id),
            kind: ControlKind::Button,
            placement: ControlPlacement::Leading,
        }
    }

    /// A footer button.
    #[must_use]
    pub const fn trailing(id: u16) -> Self {
        Self {
            id: ControlId(id),
            kind: ControlKind::Button,
            placement: ControlPlacement::Trailing,
        }
    }

    /// Turn this control into a focus guard.
    #[must_use]
    pub const fn as_guard(mut self) -> Self {
        self.kind = ControlKind::Guard;
        self
    }
}

/// Result of a Tab press inside the trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Focus wrapped around (or entered) the ring; the key must be consumed.
    Wrapped(FocusTarget),
    /// Focus moved one step; the platform may perform the move itself.
    Advanced(FocusTarget),
    /// The ring is empty; Tab is not trapped.
    Empty,
}

/// Ordered focusables of the rendered level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusRing {
    targets: Vec<FocusTarget>,
}

impl FocusRing {
    /// Build the ring for a rendered level.
    #[must_use]
    pub fn for_level(has_back: bool, item_count: usize, controls: &[DialogControl]) -> Self {
        let buttons = move |placement: ControlPlacement| {
            controls
                .iter()
                .filter(move |c| c.kind == ControlKind::Button && c.placement == placement)
                .map(|c| FocusTarget::Control(c.id))
        };
        let mut targets = Vec::with_capacity(item_count + controls.len() + 1);
        targets.extend(buttons(ControlPlacement::Leading));
        if has_back {
            targets.push(FocusTarget::Back);
        }
        targets.extend((0..item_count).map(FocusTarget::Item));
        targets.extend(buttons(ControlPlacement::Trailing));
        Self { targets }
    }

    /// Targets in Tab order.
    #[must_use]
    pub fn targets(&self) -> &[FocusTarget] {
        &self.targets
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether nothing in the dialog can take focus.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Whether `target` belongs to the ring.
    #[must_use]
    pub fn contains(&self, target: FocusTarget) -> bool {
        self.targets.contains(&target)
    }

    /// Apply a Tab (`backwards = false`) or Shift+Tab press.
    ///
    /// From the last target Tab wraps to the first, and from the first
    /// Shift+Tab wraps to the last. Between those ends the move is
    /// [`TabOutcome::Advanced`] and the platform may perform it.
    ///
    /// Focus outside the ring (nothing focused yet, or the trigger behind
    /// the modal) is not left to the platform: the press is
    /// [`TabOutcome::Wrapped`] into the first (Tab) or last (Shift+Tab)
    /// target, so focus can never leave an open dialog through Tab.
    #[must_use]
    pub fn trap_tab(&self, current: FocusTarget, backwards: bool) -> TabOutcome {
        let (Some(&first), Some(&last)) = (self.targets.first(), self.targets.last()) else {
            return TabOutcome::Empty;
        };
        let Some(pos) = self.targets.iter().position(|t| *t == current) else {
            return TabOutcome::Wrapped(if backwards { last } else { first });
        };
        match (backwards, pos) {
            (false, p) if p + 1 == self.targets.len() => TabOutcome::Wrapped(first),
            (true, 0) => TabOutcome::Wrapped(last),
            (false, p) => TabOutcome::Advanced(self.targets[p + 1]),
            (true, p) => TabOutcome::Advanced(self.targets[p - 1]),
        }
    }
}

/// Roving movement inside the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RovingMove {
    /// ArrowDown.
    Next,
    /// ArrowUp.
    Previous,
    /// Home.
    First,
    /// End.
    Last,
}

impl RovingMove {
    /// Map a key to a roving movement.
    #[must_use]
    pub const fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Down => Some(Self::Next),
            KeyCode::Up => Some(Self::Previous),
            KeyCode::Home => Some(Self::First),
            KeyCode::End => Some(Self::Last),
            _ => None,
        }
    }
}

/// Next focused item index for a list of `len` items.
///
/// Next/Previous wrap. With nothing focused (or a stale index), Next lands
/// on the first item and Previous on the last.
#[must_use]
pub fn rove(current: Option<usize>, len: usize, movement: RovingMove) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.filter(|&i| i < len);
    let index = match (movement, current) {
        (RovingMove::First, _) | (RovingMove::Next, None) => 0,
        (RovingMove::Last, _) | (RovingMove::Previous, None) => len - 1,
        (RovingMove::Next, Some(i)) => (i + 1) % len,
        (RovingMove::Previous, Some(i)) => (i + len - 1) % len,
    };
    Some(index)
}
