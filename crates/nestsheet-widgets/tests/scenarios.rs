//! End-to-end interaction scenarios for the nested drawer.

use nestsheet_core::event::{Event, KeyCode, KeyEvent, PointerEvent, PointerEventKind, PointerId, PointerType};
use nestsheet_widgets::config::{CancelPolicy, DrawerConfig};
use nestsheet_widgets::scroll_lock::SharedOverflow;
use nestsheet_widgets::{
    ClickTarget, DrawerEvent, FocusTarget, MenuNode, MenuTree, NestedDrawer, TransitionDirection,
};

fn sample_tree() -> MenuTree {
    MenuTree::new(vec![
        MenuNode::new("home", "Home"),
        MenuNode::new("products", "Products")
            .child(MenuNode::new("software", "Software"))
            .child(
                MenuNode::new("cloud", "Cloud")
                    .child(MenuNode::new("architecture", "Architecture")),
            ),
    ])
}

fn press(drawer: &mut NestedDrawer, code: KeyCode) {
    drawer.handle_event(&Event::Key(KeyEvent::new(code)));
    drawer.on_frame();
}

fn touch(kind: PointerEventKind, y: f64) -> Event {
    Event::Pointer(PointerEvent::new(kind, PointerId(11), y).with_type(PointerType::Touch))
}

fn item_ids(drawer: &NestedDrawer) -> Vec<&str> {
    drawer.current_items().iter().map(MenuNode::id).collect()
}

#[test]
fn keyboard_walk_to_architecture_and_escape() {
    let mut drawer = NestedDrawer::new(sample_tree());
    drawer.set_trigger(true);
    drawer.set_open(true);
    drawer.on_frame();
    assert_eq!(drawer.focus(), FocusTarget::Item(0));

    press(&mut drawer, KeyCode::Down);
    assert_eq!(drawer.focus(), FocusTarget::Item(1));

    press(&mut drawer, KeyCode::Right);
    assert_eq!(drawer.path().ids(), ["products"]);
    assert_eq!(item_ids(&drawer), ["software", "cloud"]);
    assert_eq!(drawer.focus(), FocusTarget::Item(0));

    press(&mut drawer, KeyCode::Down);
    press(&mut drawer, KeyCode::Right);
    assert_eq!(drawer.path().ids(), ["products", "cloud"]);
    assert_eq!(item_ids(&drawer), ["architecture"]);
    assert_eq!(drawer.focus(), FocusTarget::Item(0));
    assert_eq!(drawer.trail_label(), "Products → Cloud");

    press(&mut drawer, KeyCode::Escape);
    assert!(!drawer.is_open());
    assert!(drawer.path().is_empty());
    assert_eq!(drawer.focus(), FocusTarget::Trigger);

    let events = drawer.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| **e == DrawerEvent::OpenChange(false))
            .count(),
        1
    );
    assert!(!events.iter().any(|e| matches!(e, DrawerEvent::LeafSelected(_))));
}

#[test]
fn drag_down_150_closes() {
    let mut drawer = NestedDrawer::new(sample_tree());
    drawer.set_open(true);
    drawer.navigate_to(&["products"]).unwrap();
    drawer.handle_event(&touch(PointerEventKind::Down, 400.0));
    drawer.handle_event(&touch(PointerEventKind::Move, 480.0));
    drawer.handle_event(&touch(PointerEventKind::Move, 550.0));
    drawer.handle_event(&touch(PointerEventKind::Up, 550.0));
    assert!(!drawer.is_open());
    assert_eq!(drawer.offset(), 0.0);
    assert!(drawer.path().is_empty());
    assert!(drawer.presentation().hidden);
}

#[test]
fn drag_down_exactly_120_snaps_back() {
    let mut drawer = NestedDrawer::new(sample_tree());
    drawer.set_open(true);
    drawer.handle_event(&touch(PointerEventKind::Down, 400.0));
    drawer.handle_event(&touch(PointerEventKind::Move, 520.0));
    drawer.handle_event(&touch(PointerEventKind::Up, 520.0));
    assert!(drawer.is_open());
    assert_eq!(drawer.offset(), 0.0);
    assert!(!drawer.presentation().tracking);
}

#[test]
fn pointer_cancel_follows_policy() {
    let mut abort = NestedDrawer::new(sample_tree());
    abort.set_open(true);
    abort.handle_event(&touch(PointerEventKind::Down, 0.0));
    abort.handle_event(&touch(PointerEventKind::Move, 300.0));
    abort.handle_event(&touch(PointerEventKind::Cancel, 300.0));
    assert!(abort.is_open());

    let config = DrawerConfig::default().with_cancel_policy(CancelPolicy::CloseIfPastThreshold);
    let mut legacy = NestedDrawer::with_config(sample_tree(), config).unwrap();
    legacy.set_open(true);
    legacy.handle_event(&touch(PointerEventKind::Down, 0.0));
    legacy.handle_event(&touch(PointerEventKind::Move, 300.0));
    legacy.handle_event(&touch(PointerEventKind::Cancel, 300.0));
    assert!(!legacy.is_open());
}

#[test]
fn click_through_to_leaf() {
    let mut drawer = NestedDrawer::new(sample_tree());
    drawer.set_open(true);
    drawer.click(ClickTarget::Item(1));
    assert_eq!(drawer.direction(), TransitionDirection::Forward);
    drawer.click(ClickTarget::Item(0));
    let leaves: Vec<String> = drawer
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            DrawerEvent::LeafSelected(node) => Some(node.id().to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(leaves, ["software"]);
    assert!(drawer.is_open());

    drawer.click(ClickTarget::Back);
    assert_eq!(drawer.direction(), TransitionDirection::Back);
    assert!(drawer.path().is_empty());
}

#[test]
fn scroll_lock_follows_open_state() {
    let page = SharedOverflow::new("scroll");
    let mut drawer =
        NestedDrawer::new(sample_tree()).with_scroll_target(Box::new(page.clone()));
    drawer.set_open(true);
    assert_eq!(page.get(), "hidden");
    drawer.click(ClickTarget::Backdrop);
    assert_eq!(page.get(), "scroll");
    drawer.set_open(true);
    drop(drawer);
    assert_eq!(page.get(), "scroll");
}

#[test]
fn level_changes_are_reported() {
    let mut drawer = NestedDrawer::new(sample_tree());
    drawer.set_open(true);
    drawer.drain_events();
    drawer.open_at(&["products", "cloud"]).unwrap();
    drawer.back();
    let keys: Vec<String> = drawer
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            DrawerEvent::LevelChanged { key, .. } => Some(key.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(keys, ["products-cloud", "products"]);
}
