#![forbid(unsafe_code)]

//! Drag-to-dismiss gesture tracking.
//!
//! The [`GestureTracker`] follows a single pointer on the sheet's drag handle
//! and produces a vertical offset for presentation. On release it decides,
//! from distance alone, whether the sheet should close or snap back.
//!
//! # Invariants
//!
//! 1. At most one [`DragSession`] exists; other pointers are ignored while it
//!    is active.
//! 2. The offset always lies within the [`DragBounds`] in force when it was
//!    computed.
//! 3. Every release (end or cancel) tears the session down and resets the
//!    offset to 0, whatever the close decision.
//! 4. A release closes only when the final offset is strictly greater than
//!    the threshold.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Stale or foreign pointer id | Multi-touch, late events | Event ignored |
//! | Unknown viewport height | Non-browser host | Fallback downward bound |
//! | Non-finite coordinate | Host bug | Move ignored |

use nestsheet_core::event::{PointerEvent, PointerId};

use crate::config::{CancelPolicy, DrawerConfig};

/// Vertical clamp range for the sheet offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    /// Most negative (upward) offset.
    pub upward: f64,
    /// Most positive (downward) offset.
    pub downward: f64,
}

impl DragBounds {
    /// Bounds for a viewport of `viewport_height`, or the configured fallback
    /// when the height is unknown or unusable.
    #[must_use]
    pub fn for_viewport(config: &DrawerConfig, viewport_height: Option<f64>) -> Self {
        let downward = viewport_height
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(config.fallback_downward_limit_px);
        Self {
            upward: config.upward_limit_px,
            downward,
        }
    }

    /// Clamp a raw delta into the bounds.
    #[must_use]
    pub fn clamp(&self, delta: f64) -> f64 {
        delta.max(self.upward).min(self.downward)
    }
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the drag.
    pub pointer_id: PointerId,
    /// `client_y` that corresponds to offset 0.
    pub origin_y: f64,
    /// Latest clamped offset.
    pub current_offset_px: f64,
}

/// Why a drag start was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRejection {
    /// The drawer is closed.
    Closed,
    /// A mouse pressed something other than its primary button.
    NotPrimary,
    /// Another pointer already owns the drag.
    Busy,
}

/// How a drag finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseKind {
    /// The pointer was lifted (`pointerup`).
    End,
    /// The platform aborted the gesture (`pointercancel`).
    Cancel,
}

/// Result of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Pointer whose capture should be released.
    pub pointer_id: PointerId,
    /// Offset at the moment of release.
    pub final_offset_px: f64,
    /// End or cancel.
    pub kind: ReleaseKind,
    /// Whether the sheet should close.
    pub should_close: bool,
}

/// Single-pointer vertical drag tracker.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    session: Option<DragSession>,
    offset_px: f64,
}

impl GestureTracker {
    /// An idle tracker at offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current presentation offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset_px
    }

    /// Whether a pointer is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Begin tracking `event`'s pointer.
    ///
    /// The origin is chosen so that the current offset is preserved.
    pub fn drag_start(&mut self, open: bool, event: &PointerEvent) -> Result<(), DragRejection> {
        if !open {
            return Err(DragRejection::Closed);
        }
        if !event.is_primary() {
            return Err(DragRejection::NotPrimary);
        }
        if self.session.is_some() {
            return Err(DragRejection::Busy);
        }
        self.session = Some(DragSession {
            pointer_id: event.pointer_id,
            origin_y: event.client_y - self.offset_px,
            current_offset_px: self.offset_px,
        });
        Ok(())
    }

    /// Follow the owning pointer. Returns the new offset, or `None` when the
    /// event is ignored.
    pub fn drag_move(
        &mut self,
        pointer_id: PointerId,
        client_y: f64,
        bounds: DragBounds,
    ) -> Option<f64> {
        let session = self.session.as_mut()?;
        if session.pointer_id != pointer_id {
            return None;
        }
        let delta = client_y - session.origin_y;
        if !delta.is_finite() {
            return None;
        }
        let offset = bounds.clamp(delta);
        session.current_offset_px = offset;
        self.offset_px = offset;
        Some(offset)
    }

    /// Finish the drag owned by `pointer_id`.
    ///
    /// End and cancel share this path; `policy` decides whether a cancel may
    /// close. Returns `None` when the pointer does not own the drag.
    pub fn release(
        &mut self,
        pointer_id: PointerId,
        kind: ReleaseKind,
        threshold_px: f64,
        policy: CancelPolicy,
    ) -> Option<DragRelease> {
        if self.session.as_ref()?.pointer_id != pointer_id {
            return None;
        }
        let final_offset_px = self.offset_px;
        self.session = None;
        self.offset_px = 0.0;
        let past_threshold = final_offset_px > threshold_px;
        let should_close = match kind {
            ReleaseKind::End => past_threshold,
            ReleaseKind::Cancel => {
                past_threshold && policy == CancelPolicy::CloseIfPastThreshold
            }
        };
        Some(DragRelease {
            pointer_id,
            final_offset_px,
            kind,
            should_close,
        })
    }

    /// Drop any session and return to offset 0.
    ///
    /// Returns the pointer that was being tracked so its capture can be
    /// released.
    pub fn reset(&mut self) -> Option<PointerId> {
        self.offset_px = 0.0;
        self.session.take().map(|session| session.pointer_id)
    }
}
