//! User commands and their keyboard shortcuts.

use super::autosave::{AfterSnapshot, SnapshotReason};
use super::EditorSession;
use crate::backend::{HostCmd, OpenedFile, RequestId};
use jot_core::HostResult;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Explicit user intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    NewFile,
    OpenFile,
    SaveFile,
    SaveAsFile,
    ClearDocument,
    Quit,
    /// Persist the recovery snapshot now (debug shortcut).
    ForceAutoSave,
}

/// A key press with its modifiers, independent of the UI toolkit.
///
/// `command` is Ctrl, or Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
}

impl EditorCommand {
    /// Map a key chord to its command, if it is one of the editor shortcuts.
    pub fn from_chord(chord: KeyChord) -> Option<Self> {
        if !chord.command || chord.alt {
            return None;
        }
        match (chord.key.to_ascii_lowercase(), chord.shift) {
            ('n', false) => Some(Self::NewFile),
            ('n', true) => Some(Self::ClearDocument),
            ('o', false) => Some(Self::OpenFile),
            ('s', false) => Some(Self::SaveFile),
            ('s', true) => Some(Self::SaveAsFile),
            ('q', false) => Some(Self::Quit),
            ('a', true) => Some(Self::ForceAutoSave),
            _ => None,
        }
    }
}

impl EditorSession {
    /// Handle a key chord.
    ///
    /// # Returns
    /// `true` when the chord was an editor shortcut and must not reach the
    /// text widget.
    pub fn handle_shortcut(&mut self, chord: KeyChord, now: Instant) -> bool {
        match EditorCommand::from_chord(chord) {
            Some(command) => {
                self.dispatch(command, now);
                true
            }
            None => false,
        }
    }

    pub fn dispatch(&mut self, command: EditorCommand, now: Instant) {
        debug!(?command, "dispatching editor command");
        // Confirmation prompts get an exact unsaved-changes hint.
        self.flush_pending_input(now);
        match command {
            EditorCommand::NewFile => {
                let id = self.next_request_id();
                self.send(HostCmd::NewFile { id });
            }
            EditorCommand::OpenFile => {
                let id = self.next_request_id();
                let has_unsaved_changes = self.tracker.is_modified();
                self.send(HostCmd::OpenFile {
                    id,
                    has_unsaved_changes,
                });
            }
            EditorCommand::SaveFile => self.save_after_snapshot(AfterSnapshot::Save),
            EditorCommand::SaveAsFile => self.save_after_snapshot(AfterSnapshot::SaveAs),
            EditorCommand::ClearDocument => {
                let id = self.next_request_id();
                let has_unsaved_changes = self.tracker.is_modified();
                self.send(HostCmd::ClearDocument {
                    id,
                    has_unsaved_changes,
                });
            }
            EditorCommand::Quit => self.request_quit(now),
            EditorCommand::ForceAutoSave => {
                self.force_auto_save(SnapshotReason::Manual, None);
            }
        }
    }

    fn save_after_snapshot(&mut self, after: AfterSnapshot) {
        if self
            .force_auto_save(SnapshotReason::BeforeSave, Some(after))
            .is_none()
        {
            self.dispatch_save(after == AfterSnapshot::SaveAs);
        }
    }

    /// Send the save itself, with content read at this moment.
    pub(super) fn dispatch_save(&mut self, save_as: bool) {
        let id = self.next_request_id();
        let content = self.document.text().to_string();
        let revision = self.document.revision();
        let cmd = if save_as {
            HostCmd::SaveAsFile { id, content }
        } else {
            HostCmd::SaveFile {
                id,
                file_path: self.tracker.current_file_path().map(str::to_string),
                content,
            }
        };
        if self.send(cmd) {
            self.save_revisions.insert(id, revision);
        }
    }

    pub(super) fn on_file_saved(
        &mut self,
        id: RequestId,
        result: HostResult<Option<String>>,
        now: Instant,
    ) {
        let Some(revision) = self.save_revisions.remove(&id) else {
            debug!(request = %id, "ignoring unknown save completion");
            return;
        };
        match result {
            Ok(Some(path)) => {
                let clean =
                    self.tracker
                        .mark_clean(Some(path), revision, self.document.revision());
                self.sync_title(now);
                info!(path = ?self.tracker.current_file_path(), clean, "document saved");
            }
            Ok(None) => debug!(request = %id, "save cancelled"),
            Err(err) => warn!(request = %id, error = %err, "save failed; document left unsaved"),
        }
    }

    pub(super) fn on_file_opened(
        &mut self,
        id: RequestId,
        result: HostResult<Option<OpenedFile>>,
        now: Instant,
    ) {
        let opened = match result {
            Ok(Some(opened)) => opened,
            Ok(None) => {
                debug!(request = %id, "open cancelled");
                return;
            }
            Err(err) => {
                warn!(request = %id, error = %err, "open failed; treated as cancelled");
                return;
            }
        };
        let revision = self.document.replace(opened.content);
        self.input.cancel();
        self.autosave.cancel_pending();
        self.autosave.rebase(self.document.char_len());
        self.tracker.mark_clean(Some(opened.path), revision, revision);
        self.clear_recovery_snapshot();
        self.sync_title(now);
        self.focus_editor_next = true;
        info!(path = ?self.tracker.current_file_path(), "document opened");
    }

    pub(super) fn on_clear_answered(&mut self, id: RequestId, result: HostResult<bool>, now: Instant) {
        match result {
            Ok(true) => {}
            Ok(false) => {
                debug!(request = %id, "clear declined");
                return;
            }
            Err(err) => {
                warn!(request = %id, error = %err, "clear confirmation failed; treated as declined");
                return;
            }
        }
        let revision = self.document.replace(String::new());
        self.input.cancel();
        self.autosave.cancel_pending();
        self.autosave.rebase(0);
        self.tracker.reset(revision);
        self.clear_recovery_snapshot();
        self.sync_title(now);
        self.focus_editor_next = true;
        info!("document cleared");
    }

    pub(super) fn on_new_file_opened(&mut self, id: RequestId, result: HostResult<()>) {
        if let Err(err) = result {
            warn!(request = %id, error = %err, "new_file failed");
        }
    }
}
