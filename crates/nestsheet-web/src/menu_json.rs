#![forbid(unsafe_code)]

//! Menu tree loading from JSON.
//!
//! The host ships the menu as an array of nodes:
//!
//! ```json
//! [
//!   { "id": "home", "title": "Home", "icon": "home" },
//!   { "id": "products", "title": "Products", "children": [
//!       { "id": "software", "title": "Software" }
//!   ] }
//! ]
//! ```
//!
//! `subtitle`, `icon` and `children` are optional. An empty `children` array
//! is accepted and behaves as a leaf for navigation purposes.
//!
//! # Validation
//!
//! | Check | Error |
//! |-------|-------|
//! | JSON shape | [`MenuSchemaError::Json`] |
//! | `id` is non-empty | [`MenuSchemaError::EmptyId`] |
//! | siblings have distinct ids | [`MenuSchemaError::DuplicateId`] |
//! | nesting depth `<= max_depth` | [`MenuSchemaError::TooDeep`] |
//!
//! Ids only need to be unique among siblings: paths are resolved level by
//! level, so `products/support` and `resources/support` may coexist.

use std::collections::HashSet;
use std::fmt;

use nestsheet_widgets::{MenuNode, MenuTree};

/// Deepest nesting accepted by [`load_menu`] callers that have no opinion.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// A menu document that cannot be used.
#[derive(Debug)]
pub enum MenuSchemaError {
    /// Not a JSON array of menu nodes.
    Json(serde_json::Error),
    /// A node has an empty id.
    EmptyId {
        /// Ids of the ancestors, root first.
        parent_path: Vec<String>,
        /// Position among its siblings.
        index: usize,
    },
    /// Two siblings share an id.
    DuplicateId {
        /// Ids of the ancestors, root first.
        parent_path: Vec<String>,
        /// The repeated id.
        id: String,
    },
    /// The tree nests deeper than allowed.
    TooDeep {
        /// Id of the first node found beyond the limit.
        id: String,
        /// The configured maximum.
        max_depth: usize,
    },
}

impl fmt::Display for MenuSchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed menu JSON: {err}"),
            Self::EmptyId { parent_path, index } => write!(
                f,
                "menu item {index} under '{}' has an empty id",
                display_path(parent_path)
            ),
            Self::DuplicateId { parent_path, id } => write!(
                f,
                "duplicate menu id '{id}' under '{}'",
                display_path(parent_path)
            ),
            Self::TooDeep { id, max_depth } => {
                write!(f, "menu item '{id}' nests deeper than {max_depth} levels")
            }
        }
    }
}

impl std::error::Error for MenuSchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MenuSchemaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.join("/")
    }
}

/// Parse and validate a menu document.
///
/// `max_depth` counts levels: a flat list has depth 1.
pub fn load_menu(json: &str, max_depth: usize) -> Result<MenuTree, MenuSchemaError> {
    let roots: Vec<MenuNode> = serde_json::from_str(json)?;
    let mut parent_path = Vec::new();
    validate_level(&roots, 1, max_depth, &mut parent_path)?;
    Ok(MenuTree::new(roots))
}

fn validate_level(
    level: &[MenuNode],
    depth: usize,
    max_depth: usize,
    parent_path: &mut Vec<String>,
) -> Result<(), MenuSchemaError> {
    let mut seen = HashSet::with_capacity(level.len());
    for (index, node) in level.iter().enumerate() {
        if node.id().is_empty() {
            return Err(MenuSchemaError::EmptyId {
                parent_path: parent_path.clone(),
                index,
            });
        }
        if depth > max_depth {
            return Err(MenuSchemaError::TooDeep {
                id: node.id().to_string(),
                max_depth,
            });
        }
        if !seen.insert(node.id()) {
            return Err(MenuSchemaError::DuplicateId {
                parent_path: parent_path.clone(),
                id: node.id().to_string(),
            });
        }
        if !node.children().is_empty() {
            parent_path.push(node.id().to_string());
            validate_level(node.children(), depth + 1, max_depth, parent_path)?;
            parent_path.pop();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL: &str = r#"[
        {"id": "home", "title": "Home", "icon": "home"},
        {"id": "products", "title": "Products", "subtitle": "What we sell", "children": [
            {"id": "software", "title": "Software"},
            {"id": "cloud", "title": "Cloud", "children": [
                {"id": "architecture", "title": "Architecture"}
            ]}
        ]}
    ]"#;

    #[test]
    fn loads_nested_tree() {
        let tree = load_menu(SMALL, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.roots()[0].icon().as_str(), "home");
        assert_eq!(tree.roots()[1].subtitle(), "What we sell");
        assert!(tree.roots()[1].has_submenu());
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let tree = load_menu(r#"[{"id": "a", "title": "A"}]"#, 1).unwrap();
        let node = &tree.roots()[0];
        assert_eq!(node.subtitle(), "");
        assert!(node.icon().is_empty());
        assert!(node.is_leaf());
    }

    #[test]
    fn empty_children_array_is_accepted() {
        let tree = load_menu(r#"[{"id": "a", "title": "A", "children": []}]"#, 1).unwrap();
        assert!(!tree.roots()[0].has_submenu());
    }

    #[test]
    fn rejects_syntax_errors() {
        let err = load_menu("[{", DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, MenuSchemaError::Json(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn rejects_empty_id() {
        let json = r#"[{"id": "p", "title": "P", "children": [
            {"id": "ok", "title": "Ok"},
            {"id": "", "title": "Blank"}
        ]}]"#;
        let err = load_menu(json, DEFAULT_MAX_DEPTH).unwrap_err();
        match err {
            MenuSchemaError::EmptyId { parent_path, index } => {
                assert_eq!(parent_path, vec!["p".to_string()]);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_siblings_only() {
        let cousins = r#"[
            {"id": "a", "title": "A", "children": [{"id": "x", "title": "X"}]},
            {"id": "b", "title": "B", "children": [{"id": "x", "title": "X"}]}
        ]"#;
        assert!(load_menu(cousins, DEFAULT_MAX_DEPTH).is_ok());

        let twins = r#"[{"id": "a", "title": "A"}, {"id": "a", "title": "Again"}]"#;
        let err = load_menu(twins, DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(err.to_string(), "duplicate menu id 'a' under '/'");
    }

    #[test]
    fn enforces_max_depth() {
        assert!(load_menu(SMALL, 3).is_ok());
        let err = load_menu(SMALL, 2).unwrap_err();
        match err {
            MenuSchemaError::TooDeep { id, max_depth } => {
                assert_eq!(id, "architecture");
                assert_eq!(max_depth, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
