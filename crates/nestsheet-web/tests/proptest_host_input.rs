#![cfg(not(target_arch = "wasm32"))]

//! Property-based checks for the host input protocol.
//!
//! # Invariants
//!
//! 1. Arbitrary text never panics the session; failures are reported, and the
//!    drawer state is unchanged by a rejected message.
//! 2. Pointer messages keep their id and coordinate through decoding.
//! 3. After any sequence of valid messages the drag offset stays within
//!    `[-80, 480]` and the focus target is rendered.

use nestsheet_core::event::{Event, PointerEventKind};
use nestsheet_web::input::{DrawerCommand, InputEventJson};
use nestsheet_web::WebDrawerSession;
use proptest::prelude::*;

const MENU: &str = r#"[
    {"id": "home", "title": "Home"},
    {"id": "products", "title": "Products", "children": [
        {"id": "software", "title": "Software"},
        {"id": "cloud", "title": "Cloud", "children": [
            {"id": "architecture", "title": "Architecture"}
        ]}
    ]}
]"#;

fn session() -> WebDrawerSession {
    WebDrawerSession::from_json(MENU, None).unwrap()
}

fn message() -> impl Strategy<Value = String> {
    prop_oneof![
        (
            prop::sample::select(vec![
                "Escape", "Tab", "Enter", " ", "ArrowUp", "ArrowDown", "ArrowLeft",
                "ArrowRight", "Home", "End", "a",
            ]),
            0u8..2
        )
            .prop_map(|(key, mods)| format!(
            r#"{{"kind":"key","phase":"down","key":"{key}","mods":{mods}}}"#
        )),
        (
            prop::sample::select(vec!["down", "move", "up", "cancel"]),
            1i32..3,
            -200.0f64..1200.0
        )
            .prop_map(|(phase, id, y)| format!(
                r#"{{"kind":"pointer","phase":"{phase}","pointer_id":{id},"pointer_type":"touch","client_y":{y}}}"#
            )),
        (0usize..4).prop_map(|i| format!(r#"{{"kind":"click","target":"item","index":{i}}}"#)),
        Just(r#"{"kind":"click","target":"back"}"#.to_string()),
        Just(r#"{"kind":"click","target":"backdrop"}"#.to_string()),
        Just(r#"{"kind":"open","open":true}"#.to_string()),
        Just(r#"{"kind":"open","open":false}"#.to_string()),
        Just(r#"{"kind":"frame"}"#.to_string()),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Robustness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_text_is_rejected_cleanly(text in "\\PC{0,64}") {
        let mut s = session();
        let before = s.snapshot();
        let out = s.step_json(&text);
        prop_assert!(out.starts_with('{'), "output is not a JSON object: {}", out);
        if out.starts_with(r#"{"error""#) {
            prop_assert_eq!(s.snapshot(), before);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Pointer decoding
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pointer_fields_survive_decoding(id in any::<i32>(), quarters in -4_000_000i32..4_000_000) {
        let y = f64::from(quarters) / 4.0;
        let json = format!(
            r#"{{"kind":"pointer","phase":"move","pointer_id":{id},"client_y":{y}}}"#
        );
        let command = InputEventJson::from_json_str(&json).unwrap().to_command().unwrap();
        let Some(DrawerCommand::Event(Event::Pointer(pointer))) = command else {
            panic!("expected pointer command, got {command:?}");
        };
        prop_assert_eq!(pointer.kind, PointerEventKind::Move);
        prop_assert_eq!(pointer.pointer_id.0, id);
        prop_assert_eq!(pointer.client_y, y);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. State invariants under message sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sequences_keep_offset_and_focus_valid(messages in prop::collection::vec(message(), 1..40)) {
        let mut s = session();
        for json in &messages {
            s.step(json).unwrap();
            let offset = s.drawer().offset();
            prop_assert!((-80.0..=480.0).contains(&offset), "offset {offset} after {json}");
            let focus = s.drawer().focus();
            if let Some(index) = focus.item_index() {
                prop_assert!(index < s.drawer().current_items().len());
            }
            if !s.drawer().is_open() {
                prop_assert!(!s.drawer().is_scroll_locked());
            }
        }
    }
}
