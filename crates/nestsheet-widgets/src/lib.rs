#![forbid(unsafe_code)]

//! Headless nested navigation drawer.
//!
//! The [`NestedDrawer`] owns breadcrumb navigation through a [`MenuTree`],
//! drag-to-dismiss gesture tracking, and modal focus management. Hosts render
//! markup from its accessors and apply the [`DrawerEvent`]s it queues.
//!
//! ```
//! use nestsheet_core::event::{Event, KeyCode, KeyEvent};
//! use nestsheet_widgets::{MenuNode, MenuTree, NestedDrawer};
//!
//! let tree = MenuTree::new(vec![
//!     MenuNode::new("home", "Home"),
//!     MenuNode::new("products", "Products").child(MenuNode::new("software", "Software")),
//! ]);
//! let mut drawer = NestedDrawer::new(tree);
//! drawer.set_open(true);
//! drawer.on_frame();
//! drawer.handle_event(&Event::Key(KeyEvent::new(KeyCode::Down)));
//! drawer.handle_event(&Event::Key(KeyEvent::new(KeyCode::Right)));
//! assert_eq!(drawer.trail_label(), "Products");
//! ```

pub mod a11y;
pub mod config;
pub mod drawer;
pub mod focus;
pub mod gesture;
pub mod menu;
pub mod navigation;
pub mod scheduler;
pub mod scroll_lock;

pub use config::{CancelPolicy, ConfigError, DrawerConfig};
pub use drawer::{
    ClickTarget, DrawerEvent, EventResult, LevelHeading, NestedDrawer, SheetPresentation,
};
pub use focus::{ControlId, DialogControl, FocusTarget};
pub use menu::{Icon, MenuNode, MenuTree};
pub use navigation::{LevelKey, NavigationError, TransitionDirection};
