#![forbid(unsafe_code)]

//! Accessibility description of the drawer.
//!
//! Hosts mirror this tree onto their platform (ARIA attributes on the web).
//! The dialog node is always present; while the drawer is closed it is marked
//! hidden so assistive technology skips the whole overlay.

use std::fmt::Write as _;

use crate::focus::FocusTarget;
use crate::menu::MenuNode;

/// Semantic role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The modal sheet.
    Dialog,
    /// The list of items for one level.
    Menu,
    /// One entry of a menu.
    MenuItem,
    /// A plain button (back, host controls).
    Button,
}

impl Role {
    /// ARIA role string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dialog => "dialog",
            Self::Menu => "menu",
            Self::MenuItem => "menuitem",
            Self::Button => "button",
        }
    }
}

/// One node of the accessibility tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A11yNode {
    /// Role.
    pub role: Role,
    /// Accessible name.
    pub label: String,
    /// Focus target this node corresponds to, if focusable.
    pub target: Option<FocusTarget>,
    /// Opens a submenu (`aria-haspopup`).
    pub has_popup: bool,
    /// Modal dialog (`aria-modal`).
    pub modal: bool,
    /// Hidden from assistive technology (`aria-hidden`).
    pub hidden: bool,
    /// Currently holds focus.
    pub focused: bool,
    /// Child nodes in document order.
    pub children: Vec<A11yNode>,
}

impl A11yNode {
    /// A bare node.
    #[must_use]
    pub fn new(role: Role, label: impl Into<String>) -> Self {
        Self {
            role,
            label: label.into(),
            target: None,
            has_popup: false,
            modal: false,
            hidden: false,
            focused: false,
            children: Vec::new(),
        }
    }

    /// Depth-first search for the node bound to `target`.
    #[must_use]
    pub fn find(&self, target: FocusTarget) -> Option<&A11yNode> {
        if self.target == Some(target) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(target))
    }

    /// Indented text outline, one node per line.
    ///
    /// ```text
    /// dialog "Navigation menu" [modal]
    ///   menu "Products"
    ///     menuitem "Software" [focused]
    /// ```
    #[must_use]
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let _ = write!(out, "{:indent$}{} {:?}", "", self.role.as_str(), self.label, indent = depth * 2);
        for (flag, on) in [
            ("modal", self.modal),
            ("hidden", self.hidden),
            ("haspopup", self.has_popup),
            ("focused", self.focused),
        ] {
            if on {
                let _ = write!(out, " [{flag}]");
            }
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

/// Inputs for [`dialog_tree`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct DialogDescription<'a> {
    pub open: bool,
    pub dialog_label: &'a str,
    pub back_label: Option<&'a str>,
    pub menu_label: &'a str,
    pub items: &'a [MenuNode],
    pub focus: FocusTarget,
}

/// Build the dialog subtree for the current state.
pub(crate) fn dialog_tree(desc: DialogDescription<'_>) -> A11yNode {
    let mut dialog = A11yNode::new(Role::Dialog, desc.dialog_label);
    dialog.modal = true;
    dialog.hidden = !desc.open;

    if let Some(back_label) = desc.back_label {
        let mut back = A11yNode::new(Role::Button, back_label);
        back.target = Some(FocusTarget::Back);
        back.focused = desc.focus == FocusTarget::Back;
        dialog.children.push(back);
    }

    let mut menu = A11yNode::new(Role::Menu, desc.menu_label);
    menu.children = desc
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let target = FocusTarget::Item(index);
            let mut node = A11yNode::new(Role::MenuItem, item.title());
            node.target = Some(target);
            node.has_popup = item.has_submenu();
            node.focused = desc.focus == target;
            node
        })
        .collect();
    dialog.children.push(menu);
    dialog
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MenuNode> {
        vec![
            MenuNode::new("software", "Software"),
            MenuNode::new("cloud", "Cloud").child(MenuNode::new("arch", "Architecture")),
        ]
    }

    #[test]
    fn open_dialog_outline() {
        let items = items();
        let tree = dialog_tree(DialogDescription {
            open: true,
            dialog_label: "Navigation menu",
            back_label: Some("Go back one level"),
            menu_label: "Products",
            items: &items,
            focus: FocusTarget::Item(0),
        });
        assert_eq!(
            tree.outline(),
            "dialog \"Navigation menu\" [modal]\n\
             \x20 button \"Go back one level\"\n\
             \x20 menu \"Products\"\n\
             \x20   menuitem \"Software\" [focused]\n\
             \x20   menuitem \"Cloud\" [haspopup]\n"
        );
    }

    #[test]
    fn closed_dialog_is_hidden() {
        let tree = dialog_tree(DialogDescription {
            open: false,
            dialog_label: "Navigation menu",
            back_label: None,
            menu_label: "Top-level navigation",
            items: &[],
            focus: FocusTarget::Trigger,
        });
        assert!(tree.hidden);
        assert!(tree.modal);
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn find_by_target() {
        let items = items();
        let tree = dialog_tree(DialogDescription {
            open: true,
            dialog_label: "d",
            back_label: Some("b"),
            menu_label: "m",
            items: &items,
            focus: FocusTarget::Nothing,
        });
        assert_eq!(tree.find(FocusTarget::Item(1)).map(|n| n.label.as_str()), Some("Cloud"));
        assert_eq!(tree.find(FocusTarget::Back).map(|n| n.role), Some(Role::Button));
        assert!(tree.find(FocusTarget::Item(5)).is_none());
    }
}
