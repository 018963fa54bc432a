#![forbid(unsafe_code)]

//! Menu data model.
//!
//! A [`MenuTree`] is an immutable, cheaply clonable list of top-level
//! [`MenuNode`]s. A node with at least one child is an *interior* node and
//! opens a submenu; every other node is a *leaf*.
//!
//! The tree is supplied by the host and never mutated by the drawer.
//! Acyclicity is guaranteed by construction (children are owned).
//!
//! # Example
//!
//! ```
//! use nestsheet_widgets::menu::{MenuNode, MenuTree};
//!
//! let tree = MenuTree::new(vec![
//!     MenuNode::new("home", "Home"),
//!     MenuNode::new("products", "Products")
//!         .child(MenuNode::new("software", "Software"))
//!         .child(MenuNode::new("cloud", "Cloud")
//!             .child(MenuNode::new("architecture", "Architecture"))),
//! ]);
//!
//! assert_eq!(tree.roots().len(), 2);
//! assert!(tree.roots()[1].has_submenu());
//! assert_eq!(tree.depth(), 3);
//! ```

use std::sync::Arc;

/// Opaque icon token (an emoji, an icon-font name, an asset key).
///
/// The drawer never interprets it; hosts render it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Icon(String);

impl Icon {
    /// Wrap an icon token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no icon was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A node in the menu hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuNode {
    id: String,
    title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    subtitle: String,
    #[cfg_attr(feature = "serde", serde(default))]
    icon: Icon,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    children: Option<Vec<MenuNode>>,
}

impl MenuNode {
    /// Create a leaf node.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            icon: Icon::default(),
            children: None,
        }
    }

    /// Set the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the icon token.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Icon::new(icon);
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: MenuNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(node);
        self
    }

    /// Set children from a vec.
    ///
    /// An empty vec is kept as "present but empty", which still makes the
    /// node a leaf for navigation purposes.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<MenuNode>) -> Self {
        self.children = Some(nodes);
        self
    }

    /// Identifier, unique among siblings.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Secondary line shown under the title.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Icon token.
    #[must_use]
    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    /// Children, empty when the node has none.
    #[must_use]
    pub fn children(&self) -> &[MenuNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether the node opens a submenu (has at least one child).
    #[must_use]
    pub fn has_submenu(&self) -> bool {
        !self.children().is_empty()
    }

    /// Whether the node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.has_submenu()
    }

    /// Find a direct child by id.
    #[must_use]
    pub fn find_child(&self, id: &str) -> Option<&MenuNode> {
        find_by_id(self.children(), id)
    }

    /// Depth of the subtree rooted here (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(MenuNode::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the subtree rooted here, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(MenuNode::node_count).sum::<usize>()
    }
}

/// Find a node by id in one level of the tree.
#[must_use]
pub fn find_by_id<'a>(level: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    level.iter().find(|node| node.id == id)
}

/// Immutable menu tree shared between the host and the drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuTree {
    roots: Arc<[MenuNode]>,
}

impl MenuTree {
    /// Create a tree from its top-level nodes.
    #[must_use]
    pub fn new(roots: Vec<MenuNode>) -> Self {
        Self {
            roots: roots.into(),
        }
    }

    /// Top-level nodes.
    #[must_use]
    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Whether the tree has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Maximum depth (0 for an empty tree).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.roots.iter().map(MenuNode::depth).max().unwrap_or(0)
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(MenuNode::node_count).sum()
    }

    /// Resolve an id path level by level from the root.
    ///
    /// Returns the nodes that resolved, stopping at the first id that is not
    /// a child of the preceding level.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&MenuNode> {
        let mut level = self.roots();
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(node) = find_by_id(level, id.as_ref()) else {
                break;
            };
            resolved.push(node);
            level = node.children();
        }
        resolved
    }
}

impl From<Vec<MenuNode>> for MenuTree {
    fn from(roots: Vec<MenuNode>) -> Self {
        Self::new(roots)
    }
}
