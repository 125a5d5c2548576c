//! Startup check for a recovery snapshot left by a previous session.

use super::EditorSession;
use crate::backend::{HostCmd, RequestId};
use jot_core::text::is_blank;
use jot_core::HostResult;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How the startup recovery check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// The host had no snapshot, or it was blank or unreadable.
    NoSnapshot,
    /// Recovery had already been accepted or declined this session.
    AlreadyHandled,
    /// The snapshot was loaded into the document.
    Recovered,
    /// The user declined and the snapshot was deleted.
    Discarded,
}

/// Recovery check progress. Runs at most once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum RecoveryFlow {
    #[default]
    Unchecked,
    Settling {
        deadline: Instant,
    },
    Checking {
        request: RequestId,
    },
    Prompting {
        request: RequestId,
        snapshot: String,
    },
    Resolved(RecoveryOutcome),
}

impl RecoveryFlow {
    pub(crate) fn outcome(&self) -> Option<RecoveryOutcome> {
        match self {
            Self::Resolved(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Whether the check has started but not resolved yet. The previous
    /// session's snapshot is still on disk and not yet offered.
    pub(crate) fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::Settling { .. } | Self::Checking { .. } | Self::Prompting { .. }
        )
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match self {
            Self::Settling { deadline } => Some(*deadline),
            _ => None,
        }
    }
}

impl EditorSession {
    pub(super) fn begin_recovery_check(&mut self, now: Instant) {
        if self.recovery != RecoveryFlow::Unchecked {
            debug!("recovery check already started; ignoring");
            return;
        }
        self.recovery = RecoveryFlow::Settling {
            deadline: now + self.timings.recovery_settle,
        };
    }

    pub(super) fn poll_recovery(&mut self, now: Instant) {
        let RecoveryFlow::Settling { deadline } = self.recovery else {
            return;
        };
        if now < deadline {
            return;
        }
        if self.tracker.has_recovered_content() {
            self.recovery = RecoveryFlow::Resolved(RecoveryOutcome::AlreadyHandled);
            return;
        }
        let request = self.next_request_id();
        self.recovery = if self.send(HostCmd::GetRecoveryContent { id: request }) {
            RecoveryFlow::Checking { request }
        } else {
            RecoveryFlow::Resolved(RecoveryOutcome::NoSnapshot)
        };
    }

    pub(super) fn on_recovery_loaded(&mut self, id: RequestId, result: HostResult<Option<String>>) {
        if self.recovery != (RecoveryFlow::Checking { request: id }) {
            debug!(request = %id, "ignoring stale recovery snapshot");
            return;
        }
        let snapshot = match result {
            Ok(Some(snapshot)) if !is_blank(&snapshot) => snapshot,
            Ok(_) => {
                self.recovery = RecoveryFlow::Resolved(RecoveryOutcome::NoSnapshot);
                return;
            }
            Err(err) => {
                warn!(error = %err, "get_recovery_content failed; assuming no snapshot");
                self.recovery = RecoveryFlow::Resolved(RecoveryOutcome::NoSnapshot);
                return;
            }
        };
        if self.tracker.has_recovered_content() {
            self.recovery = RecoveryFlow::Resolved(RecoveryOutcome::AlreadyHandled);
            return;
        }
        let request = self.next_request_id();
        self.recovery = if self.send(HostCmd::ConfirmRecovery { id: request }) {
            RecoveryFlow::Prompting { request, snapshot }
        } else {
            RecoveryFlow::Resolved(RecoveryOutcome::NoSnapshot)
        };
    }

    pub(super) fn on_recovery_answered(&mut self, id: RequestId, accepted: bool, now: Instant) {
        let snapshot = match &mut self.recovery {
            RecoveryFlow::Prompting { request, snapshot } if *request == id => {
                std::mem::take(snapshot)
            }
            _ => {
                debug!(request = %id, "ignoring stale recovery answer");
                return;
            }
        };
        if accepted {
            self.accept_recovery(snapshot, now);
        } else {
            self.decline_recovery();
        }
    }

    fn accept_recovery(&mut self, snapshot: String, now: Instant) {
        self.document.replace(snapshot);
        self.input.cancel();
        self.autosave.rebase(self.document.char_len());
        self.tracker.accept_recovery();
        self.sync_title(now);
        self.focus_editor_next = true;
        self.recovery = RecoveryFlow::Resolved(RecoveryOutcome::Recovered);
        info!(chars = self.document.char_len(), "recovered unsaved content");
    }

    fn decline_recovery(&mut self) {
        self.clear_recovery_snapshot();
        self.tracker.decline_recovery();
        self.recovery = RecoveryFlow::Resolved(RecoveryOutcome::Discarded);
        info!("recovery snapshot discarded");
    }

    /// Ask the host to delete the stored snapshot.
    pub(super) fn clear_recovery_snapshot(&mut self) {
        let id = self.next_request_id();
        self.send(HostCmd::ClearRecoveryFile { id });
    }

    pub(super) fn on_recovery_cleared(&mut self, id: RequestId, result: HostResult<()>) {
        if let Err(err) = result {
            warn!(request = %id, error = %err, "clear_recovery_file failed");
        }
    }
}
