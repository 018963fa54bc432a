#![forbid(unsafe_code)]

//! Inline `overflow` writes on the page root.
//!
//! The scroll lock saves whatever inline value the page had and puts it
//! back on release. An empty saved value means there was no inline
//! declaration, so restoring it removes the property instead of writing an
//! empty string.

/// CSS property the scroll lock drives.
pub const OVERFLOW_PROPERTY: &str = "overflow";

/// One write to the inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleWrite<'a> {
    /// Drop the inline declaration.
    Remove,
    /// Set the inline declaration.
    Set(&'a str),
}

impl<'a> StyleWrite<'a> {
    /// The write that leaves `overflow` at `value`.
    #[must_use]
    pub fn for_value(value: &'a str) -> Self {
        if value.is_empty() {
            Self::Remove
        } else {
            Self::Set(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestsheet_widgets::scroll_lock::{LOCKED_OVERFLOW, ScrollLock, SharedOverflow};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_value_removes_declaration() {
        assert_eq!(StyleWrite::for_value(""), StyleWrite::Remove);
        assert_eq!(StyleWrite::for_value("auto"), StyleWrite::Set("auto"));
    }

    #[test]
    fn lock_cycle_on_unstyled_page_ends_in_removal() {
        let page = SharedOverflow::new("");
        let mut lock = ScrollLock::new(Box::new(page.clone()));
        lock.acquire();
        assert_eq!(StyleWrite::for_value(&page.get()), StyleWrite::Set(LOCKED_OVERFLOW));
        lock.release();
        assert_eq!(StyleWrite::for_value(&page.get()), StyleWrite::Remove);
    }
}
