//! Routing of host completions back into the session.

use super::EditorSession;
use crate::backend::HostEvent;
use std::time::Instant;

impl EditorSession {
    pub(super) fn apply_event(&mut self, event: HostEvent, now: Instant) {
        if !matches!(event, HostEvent::QuitRequested) {
            self.outstanding = self.outstanding.saturating_sub(1);
        }
        match event {
            HostEvent::TitleUpdated { id, result } => self.on_title_settled(id, result, now),
            HostEvent::NewFileOpened { id, result } => self.on_new_file_opened(id, result),
            HostEvent::FileOpened { id, result } => self.on_file_opened(id, result, now),
            HostEvent::FileSaved { id, result } => self.on_file_saved(id, result, now),
            HostEvent::ClearAnswered { id, result } => self.on_clear_answered(id, result, now),
            HostEvent::DraftSaved { id, result } => self.on_draft_saved(id, result),
            HostEvent::RecoveryLoaded { id, result } => self.on_recovery_loaded(id, result),
            HostEvent::RecoveryCleared { id, result } => self.on_recovery_cleared(id, result),
            HostEvent::RecoveryAnswered { id, accepted } => {
                self.on_recovery_answered(id, accepted, now)
            }
            HostEvent::QuitAnswered { id, result } => self.on_quit_answered(id, result),
            HostEvent::ExitIssued { id, result } => self.on_exit_issued(id, result),
            HostEvent::QuitRequested => self.request_quit(now),
        }
    }
}
