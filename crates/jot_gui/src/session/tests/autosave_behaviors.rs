use super::*;
use crate::session::EditorCommand;
use jot_core::HostError;

#[test]
fn continuous_typing_defers_the_idle_snapshot() {
    let mut h = Harness::new();
    for chunk in ["a", "b", "c", "d"] {
        h.type_text(chunk);
        h.advance(1_000);
        assert!(drafts(&h.sent()).is_empty(), "typing gap under idle delay");
    }

    h.advance(499);
    assert!(drafts(&h.sent()).is_empty());
    h.advance(1);
    assert_eq!(drafts(&h.sent()), vec!["abcd".to_string()]);

    h.advance(5_000);
    assert!(drafts(&h.sent()).is_empty(), "one snapshot per idle gap");
}

#[test]
fn crossing_each_hundred_chars_forces_a_snapshot() {
    let mut h = Harness::new();
    h.type_text(&"a".repeat(99));
    assert!(drafts(&h.sent()).is_empty());

    h.type_text("b");
    assert_eq!(drafts(&h.sent()).len(), 1, "99 -> 100 persists immediately");

    h.type_text(&"c".repeat(99));
    assert!(drafts(&h.sent()).is_empty());
    h.type_text("d");
    let cmds = h.sent();
    assert_eq!(drafts(&cmds).len(), 1, "199 -> 200 persists immediately");
    assert_eq!(drafts(&cmds)[0].chars().count(), 200);
}

#[test]
fn volume_steps_count_code_points_not_bytes() {
    let mut h = Harness::new();
    h.type_text(&"é".repeat(60));
    assert!(drafts(&h.sent()).is_empty(), "120 bytes but 60 chars");
    h.type_text(&"é".repeat(40));
    assert_eq!(drafts(&h.sent()).len(), 1);
}

#[test]
fn volume_snapshot_leaves_idle_timer_running() {
    let mut h = Harness::new();
    h.type_text(&"a".repeat(100));
    assert_eq!(drafts(&h.sent()).len(), 1);

    h.advance(1_500);
    assert_eq!(drafts(&h.sent()).len(), 1, "idle snapshot still fires");
}

#[test]
fn editor_blur_persists_after_grace_period() {
    let mut h = Harness::new();
    h.type_text("x");
    h.advance(100);
    let cmds = h.sent();
    h.ack_titles(&cmds);

    h.session.on_editor_focus_changed(false, h.now);
    h.advance(499);
    assert!(drafts(&h.sent()).is_empty());
    h.advance(1);
    assert_eq!(drafts(&h.sent()), vec!["x".to_string()]);

    h.advance(2_000);
    assert!(drafts(&h.sent()).is_empty(), "forced snapshot cancels idle timer");
}

#[test]
fn refocusing_within_grace_period_cancels_focus_out_snapshot() {
    let mut h = Harness::new();
    h.type_text("x");
    h.advance(100);
    h.session.on_editor_focus_changed(false, h.now);
    h.advance(200);
    h.session.on_editor_focus_changed(true, h.now);
    h.advance(800);
    assert!(drafts(&h.sent()).is_empty());
}

#[test]
fn window_blur_flushes_unsaved_text_immediately() {
    let mut h = Harness::new();
    h.type_text("x");
    h.session.on_window_focus_changed(false, h.now);
    assert!(h.session.is_modified(), "pending input is flushed first");
    assert_eq!(drafts(&h.sent()), vec!["x".to_string()]);

    h.advance(2_000);
    assert!(drafts(&h.sent()).is_empty());
}

#[test]
fn hiding_a_clean_document_writes_nothing() {
    let mut h = Harness::new();
    h.session.on_visibility_changed(false, h.now);
    h.session.on_window_focus_changed(false, h.now);
    h.advance(2_000);
    assert!(h.sent().is_empty());
}

#[test]
fn snapshot_failures_are_swallowed() {
    let mut h = Harness::new();
    h.type_text("x");
    h.advance(1_500);
    let cmds = h.sent();
    let id = id_of(&cmds, "auto_save_draft");
    h.reply(HostEvent::DraftSaved {
        id,
        result: Err(HostError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ))),
    });
    assert!(h.session.is_modified());
    assert!(h.sent().is_empty(), "no synchronous retry");

    h.type_text("y");
    h.advance(1_500);
    assert_eq!(drafts(&h.sent()), vec!["xy".to_string()]);
}

#[test]
fn manual_snapshot_ignores_clean_state() {
    let mut h = Harness::new();
    h.session.dispatch(EditorCommand::ForceAutoSave, h.now);
    assert_eq!(drafts(&h.sent()), vec![String::new()]);
}
