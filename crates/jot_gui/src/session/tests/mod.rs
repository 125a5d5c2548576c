//! Scenario tests for the editor session.
//!
//! The worker is replaced by raw channel endpoints: tests read every command
//! the session sends and answer with hand-built completions.

mod autosave_behaviors;
mod modification_and_title;

use super::{EditorSession, SessionTimings};
use crate::backend::{HostCmd, HostEvent, HostHandle, RequestId};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::{Duration, Instant};

pub(super) struct Harness {
    pub(super) session: EditorSession,
    cmd_rx: Receiver<HostCmd>,
    evt_tx: Sender<HostEvent>,
    pub(super) now: Instant,
}

impl Harness {
    pub(super) fn new() -> Self {
        let (cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, evt_rx) = unbounded();
        let session = EditorSession::new(HostHandle { cmd_tx, evt_rx }, SessionTimings::default());
        Self {
            session,
            cmd_rx,
            evt_tx,
            now: Instant::now(),
        }
    }

    /// Move the clock forward and run one frame.
    pub(super) fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.session.tick(self.now);
    }

    pub(super) fn type_text(&mut self, text: &str) {
        self.session.text_mut().push_str(text);
        self.session.on_input(self.now);
    }

    /// Commands sent since the last call.
    pub(super) fn sent(&self) -> Vec<HostCmd> {
        self.cmd_rx.try_iter().collect()
    }

    /// Deliver `event` and run one frame.
    pub(super) fn reply(&mut self, event: HostEvent) {
        self.evt_tx.send(event).expect("session event channel");
        self.session.tick(self.now);
    }

    /// Acknowledge every title update in `cmds` successfully.
    pub(super) fn ack_titles(&mut self, cmds: &[HostCmd]) {
        for cmd in cmds {
            if let HostCmd::UpdateTitle { id, .. } = cmd {
                self.reply(HostEvent::TitleUpdated {
                    id: *id,
                    result: Ok(()),
                });
            }
        }
    }

    /// Acknowledge every snapshot write in `cmds` successfully.
    pub(super) fn ack_drafts(&mut self, cmds: &[HostCmd]) {
        for cmd in cmds {
            if let HostCmd::AutoSaveDraft { id, .. } = cmd {
                self.reply(HostEvent::DraftSaved {
                    id: *id,
                    result: Ok(()),
                });
            }
        }
    }
}

pub(super) fn titles(cmds: &[HostCmd]) -> Vec<(Option<String>, bool)> {
    cmds.iter()
        .filter_map(|cmd| match cmd {
            HostCmd::UpdateTitle {
                filename,
                is_modified,
                ..
            } => Some((filename.clone(), *is_modified)),
            _ => None,
        })
        .collect()
}

pub(super) fn drafts(cmds: &[HostCmd]) -> Vec<String> {
    cmds.iter()
        .filter_map(|cmd| match cmd {
            HostCmd::AutoSaveDraft { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

pub(super) fn names(cmds: &[HostCmd]) -> Vec<&'static str> {
    cmds.iter().map(HostCmd::name).collect()
}

/// Id of the single command named `name` in `cmds`.
pub(super) fn id_of(cmds: &[HostCmd], name: &str) -> RequestId {
    let matching: Vec<RequestId> = cmds
        .iter()
        .filter(|cmd| cmd.name() == name)
        .map(HostCmd::id)
        .collect();
    assert_eq!(matching.len(), 1, "expected one {} in {:?}", name, cmds);
    matching[0]
}
