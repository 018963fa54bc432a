#![forbid(unsafe_code)]

//! The nested navigation drawer controller.
//!
//! [`NestedDrawer`] composes the [`Navigator`], the [`GestureTracker`], the
//! focus ring, the frame scheduler and the scroll lock into one headless
//! state machine. Hosts feed it input ([`handle_event`](NestedDrawer::handle_event),
//! [`click`](NestedDrawer::click), [`set_open`](NestedDrawer::set_open)) and
//! apply the [`DrawerEvent`]s it queues, drained with
//! [`drain_events`](NestedDrawer::drain_events).
//!
//! # Lifecycle
//!
//! ```text
//!            set_open(true) / open_at
//!   Closed ─────────────────────────────▶ Open(path)
//!     ▲                                     │  invoke ▶ push
//!     │   close(): Escape, backdrop,        │  back   ▶ pop
//!     └── drag past threshold, host ◀───────┘
//! ```
//!
//! Opening schedules a next-frame focus move onto the first item; so does
//! every change of the visible level while open. Closing resets the path,
//! releases the scroll lock, returns focus to the trigger and schedules the
//! drag teardown for the next frame.
//!
//! # Invariants
//!
//! 1. Every [`close`](NestedDrawer::close) call queues exactly one
//!    `OpenChange(false)` and leaves the path empty.
//! 2. `LeafSelected` is queued once per leaf activation (click, Enter or
//!    Space), never for ArrowRight.
//! 3. The drag offset stays within the bounds for the current viewport.
//! 4. A drag teardown still pending when the drawer reopens runs before the
//!    open completes.
//! 5. The scroll lock is held exactly while the drawer is open.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Input while closed | Late events | Ignored (drag start rejected) |
//! | Item index out of range | Host rendered a stale list | Click ignored |
//! | Empty visible list | Leaf-only parent, stale path | No focus move; Escape and Tab still work |
//! | Invalid configuration | Host bug | [`ConfigError`] from [`NestedDrawer::with_config`] |

use nestsheet_core::event::{Event, KeyCode, KeyEvent, PointerEvent, PointerEventKind, PointerId};

use crate::a11y::{A11yNode, DialogDescription, dialog_tree};
use crate::config::{ConfigError, DrawerConfig};
use crate::focus::{
    ControlId, DialogControl, FocusRing, FocusTarget, RovingMove, TabOutcome, rove,
};
use crate::gesture::{DragBounds, GestureTracker, ReleaseKind};
use crate::menu::{MenuNode, MenuTree};
use crate::navigation::{
    BreadcrumbPath, Invocation, LevelKey, NavigationError, Navigator, TransitionDirection,
};
use crate::scheduler::{DeferredTask, FrameScheduler, TaskSlot};
use crate::scroll_lock::{OverflowTarget, ScrollLock};

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Notification for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerEvent {
    /// The drawer asks the host to change its open flag.
    OpenChange(bool),
    /// A leaf item was activated.
    LeafSelected(MenuNode),
    /// Focus should move to this target.
    FocusMoved(FocusTarget),
    /// Capture this pointer on the drag handle.
    PointerCapture(PointerId),
    /// Release the capture of this pointer.
    PointerRelease(PointerId),
    /// The page scroll lock was acquired (`true`) or released.
    ScrollLock(bool),
    /// The visible level changed.
    LevelChanged {
        /// Identity of the new level.
        key: LevelKey,
        /// Animation hint.
        direction: TransitionDirection,
    },
}

/// Whether the drawer handled an input.
///
/// `Consumed` maps to `preventDefault()` on the web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventResult {
    /// The host should apply its default behavior.
    Ignored,
    /// The drawer acted on the input.
    Consumed,
}

impl EventResult {
    /// Whether the input was consumed.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// The dimmed overlay behind the sheet.
    Backdrop,
    /// The back button.
    Back,
    /// A visible item.
    Item(usize),
    /// A host control.
    Control(ControlId),
}

/// Presentation hints for rendering the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetPresentation {
    /// Vertical translation in host units.
    pub offset_px: f64,
    /// Translated fully off-screen.
    pub hidden: bool,
    /// A pointer is dragging; transitions should be disabled.
    pub tracking: bool,
    /// Direction of the last level change.
    pub direction: TransitionDirection,
}

/// Header text for the visible level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelHeading {
    /// Main heading.
    pub title: String,
    /// Secondary line.
    pub subtitle: String,
}

// ---------------------------------------------------------------------------
// NestedDrawer
// ---------------------------------------------------------------------------

/// Headless nested navigation drawer.
#[derive(Debug)]
pub struct NestedDrawer {
    tree: MenuTree,
    config: DrawerConfig,
    open: bool,
    nav: Navigator,
    rendered_path: BreadcrumbPath,
    gesture: GestureTracker,
    viewport_height: Option<f64>,
    focus: FocusTarget,
    trigger_attached: bool,
    controls: Vec<DialogControl>,
    ring: FocusRing,
    scheduler: FrameScheduler,
    scroll_lock: ScrollLock,
    events: Vec<DrawerEvent>,
}

impl NestedDrawer {
    /// A closed drawer over `tree` with the default configuration.
    #[must_use]
    pub fn new(tree: MenuTree) -> Self {
        let nav = Navigator::new();
        let mut drawer = Self {
            tree,
            config: DrawerConfig::default(),
            open: false,
            rendered_path: nav.path().clone(),
            nav,
            gesture: GestureTracker::new(),
            viewport_height: None,
            focus: FocusTarget::Nothing,
            trigger_attached: false,
            controls: Vec::new(),
            ring: FocusRing::default(),
            scheduler: FrameScheduler::new(),
            scroll_lock: ScrollLock::default(),
            events: Vec::new(),
        };
        drawer.rebuild_ring();
        drawer
    }

    /// A closed drawer with a validated configuration.
    pub fn with_config(tree: MenuTree, config: DrawerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut drawer = Self::new(tree);
        drawer.config = config;
        Ok(drawer)
    }

    /// Lock scrolling on `target` while open.
    #[must_use]
    pub fn with_scroll_target(mut self, target: Box<dyn OverflowTarget>) -> Self {
        self.scroll_lock.retarget(target);
        self
    }

    /// Extra focusable controls rendered inside the dialog.
    #[must_use]
    pub fn with_controls(mut self, controls: Vec<DialogControl>) -> Self {
        self.set_controls(controls);
        self
    }

    // --- Accessors --------------------------------------------------------

    /// Whether the drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The menu tree.
    #[must_use]
    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// Breadcrumb path.
    #[must_use]
    pub fn path(&self) -> &BreadcrumbPath {
        self.nav.path()
    }

    /// Number of open submenus.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nav.depth()
    }

    /// Direction of the last level change.
    #[must_use]
    pub fn direction(&self) -> TransitionDirection {
        self.nav.direction()
    }

    /// Items of the visible level.
    #[must_use]
    pub fn current_items(&self) -> &[MenuNode] {
        self.nav.current_items(&self.tree)
    }

    /// Trail label (`Products → Cloud`, or the root label).
    #[must_use]
    pub fn trail_label(&self) -> String {
        self.nav.trail_label(
            &self.tree,
            &self.config.root_trail_label,
            &self.config.trail_separator,
        )
    }

    /// Identity of the visible level.
    #[must_use]
    pub fn level_key(&self) -> LevelKey {
        self.nav.level_key()
    }

    /// Heading for the visible level.
    #[must_use]
    pub fn heading(&self) -> LevelHeading {
        match self.nav.current_parent(&self.tree) {
            Some(parent) => LevelHeading {
                title: parent.title().to_string(),
                subtitle: parent.subtitle().to_string(),
            },
            None => LevelHeading {
                title: self.config.root_heading.clone(),
                subtitle: self.config.root_subheading.clone(),
            },
        }
    }

    /// Element the drawer believes holds focus.
    #[must_use]
    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// Focus ring of the rendered level.
    #[must_use]
    pub fn focus_ring(&self) -> &FocusRing {
        &self.ring
    }

    /// Current drag offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.gesture.offset()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether the page scroll lock is held.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_held()
    }

    /// Whether deferred work is waiting in `slot`.
    #[must_use]
    pub fn has_pending(&self, slot: TaskSlot) -> bool {
        self.scheduler.is_pending(slot)
    }

    /// Presentation hints for the sheet.
    #[must_use]
    pub fn presentation(&self) -> SheetPresentation {
        SheetPresentation {
            offset_px: self.gesture.offset(),
            hidden: !self.open,
            tracking: self.gesture.is_dragging(),
            direction: self.nav.direction(),
        }
    }

    /// Accessibility tree for the dialog.
    #[must_use]
    pub fn accessibility(&self) -> A11yNode {
        let menu_label = self.trail_label();
        dialog_tree(DialogDescription {
            open: self.open,
            dialog_label: &self.config.dialog_label,
            back_label: (!self.nav.is_root()).then_some(self.config.back_label.as_str()),
            menu_label: &menu_label,
            items: self.current_items(),
            focus: self.focus,
        })
    }

    /// Take the queued host notifications.
    pub fn drain_events(&mut self) -> Vec<DrawerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of queued host notifications.
    #[must_use]
    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    // --- Host inputs ------------------------------------------------------

    /// Mirror the host's open flag.
    ///
    /// Closing goes through [`close`](Self::close) and therefore also queues
    /// `OpenChange(false)`.
    pub fn set_open(&mut self, open: bool) {
        match (self.open, open) {
            (false, true) => self.open_transition(),
            (true, false) => self.close(),
            _ => {}
        }
    }

    /// Open directly at a submenu path.
    ///
    /// Queues `OpenChange(true)` when the drawer was closed. On error nothing
    /// changes.
    pub fn open_at<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), NavigationError> {
        self.navigate_to(ids)?;
        if !self.open {
            self.emit(DrawerEvent::OpenChange(true));
            self.open_transition();
        }
        Ok(())
    }

    /// Replace the path with a deep link.
    pub fn navigate_to<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), NavigationError> {
        self.nav.navigate_to(&self.tree, ids)?;
        self.after_navigation();
        Ok(())
    }

    /// Close the drawer.
    ///
    /// Every call queues `OpenChange(false)` and resets the path. The
    /// open-to-closed transition additionally releases the scroll lock,
    /// returns focus to the trigger and schedules the drag teardown.
    pub fn close(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "drawer_close",
            was_open = self.open,
            depth = self.nav.depth()
        )
        .entered();

        self.emit(DrawerEvent::OpenChange(false));
        self.nav.reset();
        let was_open = std::mem::replace(&mut self.open, false);
        self.sync_level();
        if !was_open {
            return;
        }
        self.scheduler.cancel(TaskSlot::Focus);
        self.scheduler.schedule(DeferredTask::ResetDrag);
        if self.scroll_lock.release() {
            self.emit(DrawerEvent::ScrollLock(false));
        }
        if self.trigger_attached {
            self.move_focus(FocusTarget::Trigger);
        } else {
            self.focus = FocusTarget::Nothing;
        }
    }

    /// Go up one level. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        if !self.nav.back() {
            return false;
        }
        self.after_navigation();
        true
    }

    /// Attach or detach the trigger control.
    pub fn set_trigger(&mut self, attached: bool) {
        self.trigger_attached = attached;
    }

    /// Update the viewport height used as the downward drag bound.
    pub fn set_viewport_height(&mut self, height: Option<f64>) {
        self.viewport_height = height;
    }

    /// Replace the menu tree.
    ///
    /// The path is kept; if it no longer resolves the visible list is empty.
    pub fn set_menu(&mut self, tree: MenuTree) {
        self.tree = tree;
        self.rebuild_ring();
        if !self.sync_level() && self.open {
            self.refocus_level();
        }
    }

    /// Replace the host controls.
    pub fn set_controls(&mut self, controls: Vec<DialogControl>) {
        self.controls = controls;
        self.rebuild_ring();
        self.reconcile_focus(false);
    }

    /// Record a focus move performed by the host.
    pub fn focus_changed(&mut self, target: FocusTarget) {
        self.focus = target;
    }

    /// Run deferred work for this frame.
    pub fn on_frame(&mut self) {
        for task in self.scheduler.take_due() {
            match task {
                DeferredTask::FocusFirstItem => {
                    if self.open && !self.current_items().is_empty() {
                        self.move_focus(FocusTarget::Item(0));
                    }
                }
                DeferredTask::ResetDrag => self.reset_drag(),
            }
        }
    }

    /// Drop all deferred work and resources (the host is unmounting).
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.reset_drag();
        if self.scroll_lock.release() {
            self.emit(DrawerEvent::ScrollLock(false));
        }
    }

    /// Handle a click on part of the drawer.
    pub fn click(&mut self, target: ClickTarget) -> EventResult {
        if !self.open {
            return EventResult::Ignored;
        }
        match target {
            ClickTarget::Backdrop => {
                self.close();
                EventResult::Consumed
            }
            ClickTarget::Back => {
                if self.back() {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            ClickTarget::Item(index) => self.activate_item(index),
            ClickTarget::Control(_) => EventResult::Ignored,
        }
    }

    /// Activate the focused control (Enter/Space semantics).
    pub fn activate(&mut self) -> EventResult {
        match self.focus {
            FocusTarget::Item(index) => self.click(ClickTarget::Item(index)),
            FocusTarget::Back => self.click(ClickTarget::Back),
            _ => EventResult::Ignored,
        }
    }

    /// Handle a canonical input event.
    ///
    /// Pointer events are expected to come from the drag handle.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Key(key) if key.is_down() => self.handle_key(key),
            Event::Key(_) => EventResult::Ignored,
            Event::Pointer(pointer) => self.handle_pointer(pointer),
            Event::Resize { height } => {
                self.set_viewport_height(*height);
                EventResult::Ignored
            }
            Event::Frame => {
                self.on_frame();
                EventResult::Ignored
            }
        }
    }

    // --- Keyboard ---------------------------------------------------------

    fn handle_key(&mut self, key: &KeyEvent) -> EventResult {
        if !self.open {
            return EventResult::Ignored;
        }
        match key.code {
            KeyCode::Escape => {
                self.close();
                return EventResult::Consumed;
            }
            KeyCode::Tab | KeyCode::BackTab => return self.trap_tab(key.is_back_tab()),
            _ => {}
        }
        if key.is_activation() {
            return self.activate();
        }
        match self.focus.item_index() {
            Some(index) => self.handle_list_key(index, key.code),
            None => EventResult::Ignored,
        }
    }

    fn trap_tab(&mut self, backwards: bool) -> EventResult {
        match self.ring.trap_tab(self.focus, backwards) {
            TabOutcome::Wrapped(target) => {
                self.move_focus(target);
                EventResult::Consumed
            }
            TabOutcome::Advanced(target) => {
                self.focus = target;
                EventResult::Ignored
            }
            TabOutcome::Empty => EventResult::Ignored,
        }
    }

    fn handle_list_key(&mut self, index: usize, code: KeyCode) -> EventResult {
        if let Some(movement) = RovingMove::from_key(code) {
            let len = self.current_items().len();
            return match rove(Some(index), len, movement) {
                Some(next) => {
                    self.move_focus(FocusTarget::Item(next));
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            };
        }
        match code {
            KeyCode::Left if self.back() => EventResult::Consumed,
            KeyCode::Right => {
                let drills = self
                    .current_items()
                    .get(index)
                    .is_some_and(MenuNode::has_submenu);
                if drills {
                    self.activate_item(index)
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    // --- Pointer ----------------------------------------------------------

    fn handle_pointer(&mut self, pointer: &PointerEvent) -> EventResult {
        match pointer.kind {
            PointerEventKind::Down => match self.gesture.drag_start(self.open, pointer) {
                Ok(()) => {
                    self.emit(DrawerEvent::PointerCapture(pointer.pointer_id));
                    EventResult::Consumed
                }
                Err(_reason) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(reason = ?_reason, pointer = pointer.pointer_id.0, "drag start rejected");
                    EventResult::Ignored
                }
            },
            PointerEventKind::Move => {
                let bounds = DragBounds::for_viewport(&self.config, self.viewport_height);
                match self.gesture.drag_move(pointer.pointer_id, pointer.client_y, bounds) {
                    Some(_) => EventResult::Consumed,
                    None => EventResult::Ignored,
                }
            }
            PointerEventKind::Up => self.release_drag(pointer.pointer_id, ReleaseKind::End),
            PointerEventKind::Cancel => self.release_drag(pointer.pointer_id, ReleaseKind::Cancel),
        }
    }

    fn release_drag(&mut self, pointer_id: PointerId, kind: ReleaseKind) -> EventResult {
        let Some(release) = self.gesture.release(
            pointer_id,
            kind,
            self.config.close_threshold_px,
            self.config.cancel_policy,
        ) else {
            return EventResult::Ignored;
        };

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "drag_release",
            pointer = release.pointer_id.0,
            offset = release.final_offset_px,
            cancel = matches!(release.kind, ReleaseKind::Cancel),
            close = release.should_close
        )
        .entered();

        self.emit(DrawerEvent::PointerRelease(release.pointer_id));
        if release.should_close {
            self.close();
        }
        EventResult::Consumed
    }

    // --- Internals --------------------------------------------------------

    fn open_transition(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "drawer_open",
            depth = self.nav.depth(),
            items = self.current_items().len()
        )
        .entered();

        if self.scheduler.flush(TaskSlot::DragReset).is_some() {
            self.reset_drag();
        }
        self.open = true;
        if self.scroll_lock.acquire() {
            self.emit(DrawerEvent::ScrollLock(true));
        }
        self.rebuild_ring();
        self.reconcile_focus(false);
        self.scheduler.schedule(DeferredTask::FocusFirstItem);
    }

    fn activate_item(&mut self, index: usize) -> EventResult {
        let tree = self.tree.clone();
        let Some(item) = self.nav.current_items(&tree).get(index) else {
            return EventResult::Ignored;
        };
        match self.nav.invoke(item) {
            Invocation::Drilled => self.after_navigation(),
            Invocation::Leaf => self.emit(DrawerEvent::LeafSelected(item.clone())),
        }
        EventResult::Consumed
    }

    fn after_navigation(&mut self) {
        if self.sync_level() && self.open {
            self.refocus_level();
        }
    }

    /// Queue `LevelChanged` if the visible level differs from the rendered one.
    fn sync_level(&mut self) -> bool {
        if self.nav.path() == &self.rendered_path {
            return false;
        }
        let key = self.nav.level_key();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "level_change",
            from = %self.rendered_path.level_key(),
            to = %key,
            direction = self.nav.direction().as_str()
        )
        .entered();

        self.rendered_path = self.nav.path().clone();
        self.rebuild_ring();
        self.emit(DrawerEvent::LevelChanged {
            key,
            direction: self.nav.direction(),
        });
        true
    }

    fn refocus_level(&mut self) {
        self.reconcile_focus(true);
        self.scheduler.schedule(DeferredTask::FocusFirstItem);
    }

    fn rebuild_ring(&mut self) {
        let items = self.current_items().len();
        self.ring = FocusRing::for_level(!self.nav.is_root(), items, &self.controls);
    }

    /// Forget focus on elements that are no longer rendered.
    fn reconcile_focus(&mut self, list_replaced: bool) {
        let stale = match self.focus {
            FocusTarget::Item(_) => list_replaced || !self.ring.contains(self.focus),
            FocusTarget::Back | FocusTarget::Control(_) => !self.ring.contains(self.focus),
            FocusTarget::Nothing | FocusTarget::Trigger => false,
        };
        if stale {
            self.focus = FocusTarget::Nothing;
        }
    }

    fn move_focus(&mut self, target: FocusTarget) {
        self.focus = target;
        self.emit(DrawerEvent::FocusMoved(target));
    }

    fn reset_drag(&mut self) {
        if let Some(pointer_id) = self.gesture.reset() {
            self.emit(DrawerEvent::PointerRelease(pointer_id));
        }
    }

    fn emit(&mut self, event: DrawerEvent) {
        self.events.push(event);
    }
}
