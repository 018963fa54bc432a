#![forbid(unsafe_code)]

//! Breadcrumb navigation through a [`MenuTree`].
//!
//! The [`Navigator`] owns the path from the root to the visible level and the
//! direction of the last transition. The visible list is always derived from
//! `tree + path`; the tree is never mutated.
//!
//! # Invariants
//!
//! 1. Every crumb names a direct child of the level before it, at the time it
//!    was pushed.
//! 2. [`Navigator::invoke`] only pushes nodes that have children.
//! 3. [`Navigator::back`] at the root is a no-op.
//! 4. [`Navigator::reset`] always yields an empty path and `Forward`.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Crumb no longer resolves | Host swapped the tree | Empty visible list |
//! | Deep link names an unknown id | Stale link | `NavigationError`, path unchanged |

use std::fmt;

use crate::menu::{MenuNode, MenuTree, find_by_id};

/// Direction of the most recent level change (animation hint only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionDirection {
    /// Drilled into a submenu.
    #[default]
    Forward,
    /// Went back up a level.
    Back,
}

impl TransitionDirection {
    /// Stable string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Back => "back",
        }
    }
}

/// Ids of the submenus opened from the root, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BreadcrumbPath {
    ids: Vec<String>,
}

impl BreadcrumbPath {
    /// Crumb ids.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of crumbs (0 at the root).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the path is at the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Innermost crumb id.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.ids.last().map(String::as_str)
    }

    /// Display key for the level this path shows.
    #[must_use]
    pub fn level_key(&self) -> LevelKey {
        if self.ids.is_empty() {
            LevelKey("root".to_string())
        } else {
            LevelKey(self.ids.join("-"))
        }
    }
}

/// Label of a visible level: `"root"` or crumb ids joined by `-`.
///
/// Ids may themselves contain `-`, so two paths can share a key. Compare
/// [`BreadcrumbPath`]s to decide whether the level changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelKey(String);

impl LevelKey {
    /// The key as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of [`Navigator::invoke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The node had children; its level is now visible.
    Drilled,
    /// The node is a leaf; the host should be told it was selected.
    Leaf,
}

/// A deep link that does not describe a path of submenus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// `id` is not a child of the level at `depth`.
    UnknownItem {
        /// Level searched (0 = root).
        depth: usize,
        /// Id that was not found.
        id: String,
    },
    /// `id` exists but has no children to show.
    NotASubmenu {
        /// The leaf's id.
        id: String,
    },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem { depth, id } => {
                write!(f, "no menu item '{id}' at depth {depth}")
            }
            Self::NotASubmenu { id } => write!(f, "menu item '{id}' has no submenu"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Breadcrumb state machine.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    path: BreadcrumbPath,
    direction: TransitionDirection,
}

impl Navigator {
    /// A navigator at the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current breadcrumb path.
    #[must_use]
    pub fn path(&self) -> &BreadcrumbPath {
        &self.path
    }

    /// Direction of the last transition.
    #[must_use]
    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    /// Number of open submenus.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Whether the root level is visible.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Items of the visible level.
    ///
    /// The root list when the path is empty, else the children of the last
    /// crumb. Empty when the last crumb has no children or the path no
    /// longer resolves against `tree`.
    #[must_use]
    pub fn current_items<'t>(&self, tree: &'t MenuTree) -> &'t [MenuNode] {
        let mut level = tree.roots();
        for id in &self.path.ids {
            match find_by_id(level, id) {
                Some(node) => level = node.children(),
                None => return &[],
            }
        }
        level
    }

    /// Resolved crumb nodes, outermost first.
    #[must_use]
    pub fn crumbs<'t>(&self, tree: &'t MenuTree) -> Vec<&'t MenuNode> {
        tree.resolve(&self.path.ids)
    }

    /// Activate `item`, which must come from [`current_items`](Self::current_items).
    ///
    /// Nodes with children are pushed and set the direction to `Forward`;
    /// leaves leave the path untouched.
    pub fn invoke(&mut self, item: &MenuNode) -> Invocation {
        if item.has_submenu() {
            self.direction = TransitionDirection::Forward;
            self.path.ids.push(item.id().to_string());
            Invocation::Drilled
        } else {
            Invocation::Leaf
        }
    }

    /// Go up one level. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if self.path.ids.pop().is_none() {
            return false;
        }
        self.direction = TransitionDirection::Back;
        true
    }

    /// Return to the root with direction `Forward`.
    pub fn reset(&mut self) {
        self.path.ids.clear();
        self.direction = TransitionDirection::Forward;
    }

    /// Replace the path with a deep link resolved from the root.
    ///
    /// Every id must name a child of the preceding level that itself has
    /// children. On error the path is left unchanged.
    pub fn navigate_to<S: AsRef<str>>(
        &mut self,
        tree: &MenuTree,
        ids: &[S],
    ) -> Result<(), NavigationError> {
        let mut level = tree.roots();
        let mut resolved = Vec::with_capacity(ids.len());
        for (depth, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            let node = find_by_id(level, id).ok_or_else(|| NavigationError::UnknownItem {
                depth,
                id: id.to_string(),
            })?;
            if !node.has_submenu() {
                return Err(NavigationError::NotASubmenu { id: id.to_string() });
            }
            resolved.push(node.id().to_string());
            level = node.children();
        }
        self.path.ids = resolved;
        self.direction = TransitionDirection::Forward;
        Ok(())
    }

    /// Human-readable trail: crumb titles joined by `separator`, or
    /// `root_label` at the root. Crumbs that no longer resolve show their id.
    #[must_use]
    pub fn trail_label(&self, tree: &MenuTree, root_label: &str, separator: &str) -> String {
        if self.path.is_empty() {
            return root_label.to_string();
        }
        let crumbs = self.crumbs(tree);
        self.path
            .ids
            .iter()
            .enumerate()
            .map(|(i, id)| crumbs.get(i).map_or(id.as_str(), |node| node.title()))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Identity of the visible level.
    #[must_use]
    pub fn level_key(&self) -> LevelKey {
        self.path.level_key()
    }

    /// Innermost open submenu, if any.
    #[must_use]
    pub fn current_parent<'t>(&self, tree: &'t MenuTree) -> Option<&'t MenuNode> {
        let crumbs = self.crumbs(tree);
        if crumbs.len() == self.path.len() {
            crumbs.last().copied()
        } else {
            None
        }
    }
}
