use super::*;
use crate::session::EditorCommand;
use jot_core::HostError;

#[test]
fn typing_then_idle_then_save_walks_through_dirty_and_clean() {
    let mut h = Harness::new();
    h.type_text("hello");

    h.advance(99);
    assert!(!h.session.is_modified(), "debounce still pending");
    assert!(h.sent().is_empty());

    h.advance(1);
    assert!(h.session.is_modified());
    let cmds = h.sent();
    assert_eq!(titles(&cmds), vec![(None, true)]);
    h.ack_titles(&cmds);

    h.advance(1_400);
    let cmds = h.sent();
    assert_eq!(drafts(&cmds), vec!["hello".to_string()]);
    assert_eq!(cmds.len(), 1);
    h.ack_drafts(&cmds);

    h.session.dispatch(EditorCommand::SaveFile, h.now);
    let cmds = h.sent();
    assert_eq!(names(&cmds), vec!["auto_save_draft"]);
    h.ack_drafts(&cmds);

    let cmds = h.sent();
    let save_id = id_of(&cmds, "save_file");
    assert_eq!(
        cmds[0],
        HostCmd::SaveFile {
            id: save_id,
            file_path: None,
            content: "hello".to_string(),
        }
    );
    h.reply(HostEvent::FileSaved {
        id: save_id,
        result: Ok(Some("/tmp/a.txt".to_string())),
    });

    assert_eq!(h.session.current_file_path(), Some("/tmp/a.txt"));
    assert!(!h.session.is_modified());
    assert_eq!(titles(&h.sent()), vec![(Some("a.txt".to_string()), false)]);
}

#[test]
fn only_the_clean_to_dirty_edge_syncs_the_title() {
    let mut h = Harness::new();
    h.type_text("a");
    h.advance(100);
    let cmds = h.sent();
    assert_eq!(titles(&cmds).len(), 1);
    h.ack_titles(&cmds);

    h.type_text("b");
    h.advance(100);
    h.type_text("c");
    h.advance(100);
    assert!(titles(&h.sent()).is_empty());
    assert!(h.session.is_modified());
}

#[test]
fn rapid_title_requests_in_one_frame_send_one_notification() {
    let mut h = Harness::new();
    for _ in 0..5 {
        h.session.sync_title(h.now);
    }
    h.advance(0);
    let cmds = h.sent();
    assert_eq!(titles(&cmds), vec![(None, false)]);

    for _ in 0..3 {
        h.session.sync_title(h.now);
    }
    h.advance(16);
    assert!(h.sent().is_empty(), "one notification in flight at a time");

    h.ack_titles(&cmds);
    let trailing = h.sent();
    assert_eq!(titles(&trailing).len(), 1);
    h.ack_titles(&trailing);
    h.advance(16);
    assert!(h.sent().is_empty());
}

#[test]
fn trailing_title_update_carries_latest_state() {
    let mut h = Harness::new();
    h.session.sync_title(h.now);
    h.advance(0);
    let first = h.sent();
    assert_eq!(titles(&first), vec![(None, false)]);

    h.type_text("x");
    h.advance(100);
    assert!(h.sent().is_empty());

    h.ack_titles(&first);
    assert_eq!(titles(&h.sent()), vec![(None, true)]);
}

#[test]
fn failed_title_update_frees_the_slot() {
    let mut h = Harness::new();
    h.session.sync_title(h.now);
    h.advance(0);
    let cmds = h.sent();
    let id = id_of(&cmds, "update_title");
    h.reply(HostEvent::TitleUpdated {
        id,
        result: Err(HostError::Window("no window".to_string())),
    });
    assert!(h.sent().is_empty(), "failures are not retried");

    h.type_text("x");
    h.advance(100);
    assert_eq!(titles(&h.sent()), vec![(None, true)]);
}

#[test]
fn late_save_ack_keeps_newer_edits_dirty() {
    let mut h = Harness::new();
    h.type_text("hello");
    h.advance(100);
    let cmds = h.sent();
    h.ack_titles(&cmds);

    h.session.dispatch(EditorCommand::SaveFile, h.now);
    let cmds = h.sent();
    h.ack_drafts(&cmds);
    let save_id = id_of(&h.sent(), "save_file");

    h.type_text(" world");
    h.reply(HostEvent::FileSaved {
        id: save_id,
        result: Ok(Some("/tmp/a.txt".to_string())),
    });

    assert!(h.session.is_modified());
    assert_eq!(h.session.current_file_path(), Some("/tmp/a.txt"));
    assert_eq!(titles(&h.sent()), vec![(Some("a.txt".to_string()), true)]);
}

#[test]
fn save_ack_during_debounce_window_marks_dirty_when_debounce_fires() {
    let mut h = Harness::new();
    h.session.dispatch(EditorCommand::SaveFile, h.now);
    let cmds = h.sent();
    h.ack_drafts(&cmds);
    let save_id = id_of(&h.sent(), "save_file");

    h.type_text("late");
    h.reply(HostEvent::FileSaved {
        id: save_id,
        result: Ok(Some("/tmp/b.txt".to_string())),
    });
    assert!(!h.session.is_modified());
    let cmds = h.sent();
    h.ack_titles(&cmds);

    h.advance(100);
    assert!(h.session.is_modified());
    assert_eq!(titles(&h.sent()), vec![(Some("b.txt".to_string()), true)]);
}
