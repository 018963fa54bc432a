#![forbid(unsafe_code)]

//! Page scroll lock held while the drawer is open.
//!
//! # Lifecycle Guarantees
//!
//! 1. **Acquire saves, release restores** - [`ScrollLock::acquire`] records
//!    the target's overflow value before writing `hidden`; release writes the
//!    recorded value back verbatim (an empty string clears the property).
//! 2. **Idempotent** - acquiring a held lock or releasing a free one does
//!    nothing.
//! 3. **Drop releases** - a lock dropped while held restores the saved value.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Overflow value written while the lock is held.
pub const LOCKED_OVERFLOW: &str = "hidden";

/// Something with a CSS-like `overflow` property (usually the document root).
pub trait OverflowTarget {
    /// Current value; empty when unset.
    fn overflow(&self) -> String;

    /// Replace the value; empty clears it.
    fn set_overflow(&mut self, value: &str);
}

/// Target for hosts without a scrollable page. Remembers the last value only.
#[derive(Debug, Clone, Default)]
pub struct DetachedOverflow {
    value: String,
}

impl OverflowTarget for DetachedOverflow {
    fn overflow(&self) -> String {
        self.value.clone()
    }

    fn set_overflow(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

/// Overflow cell shared between a lock and an observer.
///
/// Clones refer to the same value.
#[derive(Debug, Clone, Default)]
pub struct SharedOverflow {
    value: Rc<RefCell<String>>,
}

impl SharedOverflow {
    /// A shared cell starting at `initial`.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial.into())),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> String {
        self.value.borrow().clone()
    }
}

impl OverflowTarget for SharedOverflow {
    fn overflow(&self) -> String {
        self.get()
    }

    fn set_overflow(&mut self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

/// Scoped page scroll lock.
pub struct ScrollLock {
    target: Box<dyn OverflowTarget>,
    saved: Option<String>,
}

impl fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLock")
            .field("held", &self.is_held())
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new(Box::new(DetachedOverflow::default()))
    }
}

impl ScrollLock {
    /// A free lock over `target`.
    #[must_use]
    pub fn new(target: Box<dyn OverflowTarget>) -> Self {
        Self {
            target,
            saved: None,
        }
    }

    /// Whether the page is currently locked.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.saved.is_some()
    }

    /// Lock the page. Returns `false` if it was already locked.
    pub fn acquire(&mut self) -> bool {
        if self.saved.is_some() {
            return false;
        }
        self.saved = Some(self.target.overflow());
        self.target.set_overflow(LOCKED_OVERFLOW);
        true
    }

    /// Unlock the page. Returns `false` if it was not locked.
    pub fn release(&mut self) -> bool {
        let Some(previous) = self.saved.take() else {
            return false;
        };
        self.target.set_overflow(&previous);
        true
    }

    /// Swap the target, releasing the old one first.
    ///
    /// A held lock is re-acquired on the new target.
    pub fn retarget(&mut self, target: Box<dyn OverflowTarget>) {
        let held = self.release();
        self.target = target;
        if held {
            self.acquire();
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.release();
    }
}
