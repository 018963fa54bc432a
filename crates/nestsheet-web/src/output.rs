#![forbid(unsafe_code)]

//! JSON output schema: drawer notifications and session snapshots.

use nestsheet_widgets::{DrawerEvent, FocusTarget, MenuNode, SheetPresentation};
use serde::{Deserialize, Serialize};

use crate::input::TargetKind;

/// JSON encoding of a [`DrawerEvent`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputEventJson {
    OpenChange {
        open: bool,
    },
    LeafSelected {
        id: String,
        title: String,
    },
    FocusMoved {
        target: TargetKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        control: Option<u16>,
    },
    PointerCapture {
        pointer_id: i32,
    },
    PointerRelease {
        pointer_id: i32,
    },
    ScrollLock {
        locked: bool,
    },
    LevelChanged {
        key: String,
        direction: String,
    },
}

/// A focus target in JSON form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetJson {
    pub target: TargetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<u16>,
}

impl From<FocusTarget> for TargetJson {
    fn from(target: FocusTarget) -> Self {
        let (kind, index, control) = match target {
            FocusTarget::Nothing => (TargetKind::Nothing, None, None),
            FocusTarget::Trigger => (TargetKind::Trigger, None, None),
            FocusTarget::Back => (TargetKind::Back, None, None),
            FocusTarget::Item(i) => (TargetKind::Item, Some(i), None),
            FocusTarget::Control(id) => (TargetKind::Control, None, Some(id.0)),
        };
        Self {
            target: kind,
            index,
            control,
        }
    }
}

impl From<&DrawerEvent> for OutputEventJson {
    fn from(event: &DrawerEvent) -> Self {
        match event {
            DrawerEvent::OpenChange(open) => Self::OpenChange { open: *open },
            DrawerEvent::LeafSelected(node) => Self::LeafSelected {
                id: node.id().to_string(),
                title: node.title().to_string(),
            },
            DrawerEvent::FocusMoved(target) => {
                let TargetJson {
                    target,
                    index,
                    control,
                } = (*target).into();
                Self::FocusMoved {
                    target,
                    index,
                    control,
                }
            }
            DrawerEvent::PointerCapture(id) => Self::PointerCapture { pointer_id: id.0 },
            DrawerEvent::PointerRelease(id) => Self::PointerRelease { pointer_id: id.0 },
            DrawerEvent::ScrollLock(locked) => Self::ScrollLock { locked: *locked },
            DrawerEvent::LevelChanged { key, direction } => Self::LevelChanged {
                key: key.to_string(),
                direction: direction.as_str().to_string(),
            },
        }
    }
}

/// Result of feeding one input message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepResultJson {
    /// Whether the host should call `preventDefault()`.
    pub consumed: bool,
    /// Notifications produced by the step, in order.
    pub events: Vec<OutputEventJson>,
}

/// A visible menu item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemJson {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    pub has_submenu: bool,
}

impl From<&MenuNode> for ItemJson {
    fn from(node: &MenuNode) -> Self {
        Self {
            id: node.id().to_string(),
            title: node.title().to_string(),
            subtitle: node.subtitle().to_string(),
            icon: node.icon().as_str().to_string(),
            has_submenu: node.has_submenu(),
        }
    }
}

/// Sheet presentation hints.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PresentationJson {
    pub offset_px: f64,
    pub hidden: bool,
    pub tracking: bool,
    pub direction: &'static str,
}

impl From<SheetPresentation> for PresentationJson {
    fn from(p: SheetPresentation) -> Self {
        Self {
            offset_px: p.offset_px,
            hidden: p.hidden,
            tracking: p.tracking,
            direction: p.direction.as_str(),
        }
    }
}

/// Everything a host needs to render the drawer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotJson {
    pub open: bool,
    pub path: Vec<String>,
    pub level_key: String,
    pub trail_label: String,
    pub heading: String,
    pub subheading: String,
    pub dialog_label: String,
    pub back_label: Option<String>,
    pub items: Vec<ItemJson>,
    pub focus: TargetJson,
    pub presentation: PresentationJson,
    pub scroll_locked: bool,
    pub a11y_outline: String,
}
