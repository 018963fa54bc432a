//! Host protocol scenarios against the full catalog menu.

use nestsheet_web::input::TargetKind;
use nestsheet_web::output::{OutputEventJson, StepResultJson};
use nestsheet_web::{DEFAULT_MAX_DEPTH, WebDrawerSession, load_menu};
use pretty_assertions::assert_eq;

const CATALOG: &str = include_str!("fixtures/catalog.json");

fn session() -> WebDrawerSession {
    WebDrawerSession::from_json(CATALOG, None).unwrap()
}

fn key(session: &mut WebDrawerSession, key: &str, mods: u8) -> StepResultJson {
    let json = format!(r#"{{"kind":"key","phase":"down","key":"{key}","code":"{key}","mods":{mods}}}"#);
    session.step(&json).unwrap()
}

fn pointer(session: &mut WebDrawerSession, phase: &str, y: f64) -> StepResultJson {
    let json = format!(
        r#"{{"kind":"pointer","phase":"{phase}","pointer_id":3,"pointer_type":"touch","client_y":{y}}}"#
    );
    session.step(&json).unwrap()
}

fn focus_item(index: usize) -> OutputEventJson {
    OutputEventJson::FocusMoved {
        target: TargetKind::Item,
        index: Some(index),
        control: None,
    }
}

fn level(key: &str, direction: &str) -> OutputEventJson {
    OutputEventJson::LevelChanged {
        key: key.to_string(),
        direction: direction.to_string(),
    }
}

#[test]
fn catalog_loads() {
    let tree = load_menu(CATALOG, DEFAULT_MAX_DEPTH).unwrap();
    assert_eq!(tree.roots().len(), 4);
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.node_count(), 25);
}

#[test]
fn keyboard_session_through_cloud() {
    let mut s = session();
    assert!(s.step(r#"{"kind":"trigger","attached":true}"#).unwrap().events.is_empty());

    let opened = s.step(r#"{"kind":"open","open":true}"#).unwrap();
    assert_eq!(opened.events, vec![OutputEventJson::ScrollLock { locked: true }]);
    assert_eq!(s.frame().events, vec![focus_item(0)]);

    let down = key(&mut s, "ArrowDown", 0);
    assert!(down.consumed);
    assert_eq!(down.events, vec![focus_item(1)]);

    let right = key(&mut s, "ArrowRight", 0);
    assert!(right.consumed);
    assert_eq!(right.events, vec![level("products", "forward")]);
    assert_eq!(s.frame().events, vec![focus_item(0)]);
    assert_eq!(s.snapshot().items.len(), 8);
    assert_eq!(s.snapshot().trail_label, "Products & Services");

    key(&mut s, "ArrowDown", 0);
    let enter = key(&mut s, "Enter", 0);
    assert!(enter.consumed);
    assert_eq!(enter.events, vec![level("products-cloud", "forward")]);
    assert_eq!(s.frame().events, vec![focus_item(0)]);
    assert_eq!(
        s.snapshot().trail_label,
        "Products & Services → Cloud & Infrastructure"
    );

    // Shift+Tab from the back button wraps to the last item.
    let moved = s.step(r#"{"kind":"focus","target":"back"}"#).unwrap();
    assert_eq!(moved, StepResultJson::default());
    let wrapped = key(&mut s, "Tab", 1);
    assert!(wrapped.consumed);
    assert_eq!(wrapped.events, vec![focus_item(2)]);

    let leaf = key(&mut s, "Enter", 0);
    assert!(leaf.consumed);
    assert_eq!(
        leaf.events,
        vec![OutputEventJson::LeafSelected {
            id: "security".to_string(),
            title: "Security Audits".to_string(),
        }]
    );
    assert!(s.snapshot().open);

    let left = key(&mut s, "ArrowLeft", 0);
    assert!(left.consumed);
    assert_eq!(left.events, vec![level("products", "back")]);
    assert_eq!(s.snapshot().presentation.direction, "back");

    let escape = key(&mut s, "Escape", 0);
    assert!(escape.consumed);
    assert_eq!(
        escape.events,
        vec![
            OutputEventJson::OpenChange { open: false },
            level("root", "forward"),
            OutputEventJson::ScrollLock { locked: false },
            OutputEventJson::FocusMoved {
                target: TargetKind::Trigger,
                index: None,
                control: None,
            },
        ]
    );
    let snap = s.snapshot();
    assert!(!snap.open);
    assert!(snap.path.is_empty());
    assert!(snap.presentation.hidden);
    assert!(snap.a11y_outline.starts_with("dialog \"Navigation menu\" [modal] [hidden]\n"));
}

#[test]
fn touch_drag_past_threshold_closes() {
    let mut s = session();
    s.step(r#"{"kind":"navigate","path":["company"],"open":true}"#)
        .unwrap();

    let down = pointer(&mut s, "down", 300.0);
    assert!(down.consumed);
    assert_eq!(down.events, vec![OutputEventJson::PointerCapture { pointer_id: 3 }]);

    pointer(&mut s, "move", 390.0);
    assert_eq!(s.snapshot().presentation.offset_px, 90.0);
    assert!(s.snapshot().presentation.tracking);

    pointer(&mut s, "move", 450.0);
    let up = pointer(&mut s, "up", 450.0);
    assert!(up.consumed);
    assert_eq!(up.events[0], OutputEventJson::PointerRelease { pointer_id: 3 });
    assert_eq!(up.events[1], OutputEventJson::OpenChange { open: false });

    let snap = s.snapshot();
    assert!(!snap.open);
    assert_eq!(snap.presentation.offset_px, 0.0);
    assert!(snap.path.is_empty());
}

#[test]
fn upward_drag_is_clamped_and_snaps_back() {
    let mut s = session();
    s.step(r#"{"kind":"open","open":true}"#).unwrap();
    pointer(&mut s, "down", 500.0);
    pointer(&mut s, "move", 100.0);
    assert_eq!(s.snapshot().presentation.offset_px, -80.0);
    pointer(&mut s, "up", 100.0);
    let snap = s.snapshot();
    assert!(snap.open);
    assert_eq!(snap.presentation.offset_px, 0.0);
}

#[test]
fn backdrop_click_closes_and_ignores_when_closed() {
    let mut s = session();
    let ignored = s.step(r#"{"kind":"click","target":"backdrop"}"#).unwrap();
    assert!(!ignored.consumed);
    assert!(ignored.events.is_empty());

    s.step(r#"{"kind":"open","open":true}"#).unwrap();
    let closed = s.step(r#"{"kind":"click","target":"backdrop"}"#).unwrap();
    assert!(closed.consumed);
    assert_eq!(closed.events[0], OutputEventJson::OpenChange { open: false });
}

#[test]
fn same_id_under_different_parents() {
    let mut s = session();
    s.step(r#"{"kind":"navigate","path":["resources"],"open":true}"#)
        .unwrap();
    let step = s.step(r#"{"kind":"click","target":"item","index":0}"#).unwrap();
    assert_eq!(
        step.events,
        vec![OutputEventJson::LeafSelected {
            id: "support".to_string(),
            title: "Support".to_string(),
        }]
    );
}
