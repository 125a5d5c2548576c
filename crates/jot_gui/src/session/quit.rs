//! Quit sequence: flush the snapshot, confirm with the host, then exit.

use super::autosave::{AfterSnapshot, SnapshotReason};
use super::EditorSession;
use crate::backend::{HostCmd, RequestId};
use jot_core::HostResult;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Progress of a quit request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuitState {
    #[default]
    Idle,
    /// Waiting for the pre-quit recovery snapshot to settle.
    Flushing { request: RequestId },
    /// Waiting for the host's quit confirmation.
    Confirming { request: RequestId },
    /// Exit was issued; only the host ends the process.
    Exiting,
}

#[derive(Debug, Default)]
pub(crate) struct QuitOrchestrator {
    state: QuitState,
}

impl QuitOrchestrator {
    pub(crate) fn state(&self) -> QuitState {
        self.state
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state != QuitState::Idle
    }
}

impl EditorSession {
    /// Start the quit sequence. Requests made while one is running coalesce.
    pub(super) fn request_quit(&mut self, now: Instant) {
        if self.quit.is_active() {
            debug!(state = ?self.quit.state, "quit already in progress");
            return;
        }
        self.flush_pending_input(now);
        if self.has_unsaved_content() {
            if let Some(request) =
                self.force_auto_save(SnapshotReason::BeforeQuit, Some(AfterSnapshot::Quit))
            {
                self.quit.state = QuitState::Flushing { request };
                return;
            }
        }
        self.confirm_quit();
    }

    pub(super) fn run_after_snapshot(&mut self, after: AfterSnapshot) {
        match after {
            AfterSnapshot::Save => self.dispatch_save(false),
            AfterSnapshot::SaveAs => self.dispatch_save(true),
            AfterSnapshot::Quit => {
                if matches!(self.quit.state, QuitState::Flushing { .. }) {
                    self.confirm_quit();
                }
            }
        }
    }

    fn confirm_quit(&mut self) {
        let request = self.next_request_id();
        let has_unsaved_changes = self.tracker.is_modified();
        self.quit.state = if self.send(HostCmd::HandleQuitRequest {
            id: request,
            has_unsaved_changes,
        }) {
            QuitState::Confirming { request }
        } else {
            QuitState::Idle
        };
    }

    pub(super) fn on_quit_answered(&mut self, id: RequestId, result: HostResult<bool>) {
        if self.quit.state != (QuitState::Confirming { request: id }) {
            debug!(request = %id, "ignoring stale quit answer");
            return;
        }
        match result {
            Ok(true) => {
                let id = self.next_request_id();
                self.quit.state = if self.send(HostCmd::ExitApp { id }) {
                    info!("quit confirmed; exiting");
                    QuitState::Exiting
                } else {
                    QuitState::Idle
                };
            }
            Ok(false) => {
                info!("quit cancelled");
                self.quit.state = QuitState::Idle;
            }
            Err(err) => {
                warn!(error = %err, "handle_quit_request failed; staying open");
                self.quit.state = QuitState::Idle;
            }
        }
    }

    pub(super) fn on_exit_issued(&mut self, id: RequestId, result: HostResult<()>) {
        if let Err(err) = result {
            warn!(request = %id, error = %err, "exit_app failed; staying open");
            self.quit.state = QuitState::Idle;
        }
    }
}
