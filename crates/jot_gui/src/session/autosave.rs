//! Recovery-snapshot scheduling: idle, volume, focus-out, and forced triggers.

use super::coalesce::Debouncer;
use super::EditorSession;
use crate::backend::{HostCmd, RequestId};
use jot_core::text::is_blank;
use jot_core::HostResult;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Why a snapshot is being written. Logged with each write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SnapshotReason {
    Idle,
    Volume,
    FocusOut,
    WindowBlur,
    Hidden,
    BeforeSave,
    BeforeQuit,
    Manual,
}

/// Work that waits for a forced snapshot to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AfterSnapshot {
    Save,
    SaveAs,
    Quit,
}

/// Timer state for automatic snapshots.
///
/// The idle timer restarts on every edit. The volume trigger is independent of
/// it: crossing a size step persists immediately and leaves the idle timer
/// running.
#[derive(Debug)]
pub(crate) struct AutoSaveScheduler {
    idle: Debouncer,
    focus_out: Debouncer,
    volume_step: usize,
    last_len: usize,
}

impl AutoSaveScheduler {
    pub(crate) fn new(idle_delay: Duration, focus_out_grace: Duration, volume_step: usize) -> Self {
        Self {
            idle: Debouncer::new(idle_delay),
            focus_out: Debouncer::new(focus_out_grace),
            volume_step,
            last_len: 0,
        }
    }

    /// Restart the idle timer and check the size steps.
    ///
    /// # Returns
    /// `true` when `char_len` crossed a multiple of the volume step upward.
    pub(crate) fn on_content_changed(&mut self, now: Instant, char_len: usize) -> bool {
        self.idle.trigger(now);
        let crossed =
            self.volume_step > 0 && char_len / self.volume_step > self.last_len / self.volume_step;
        self.last_len = char_len;
        crossed
    }

    /// Adopt `char_len` as the baseline after a wholesale replacement.
    pub(crate) fn rebase(&mut self, char_len: usize) {
        self.last_len = char_len;
    }

    pub(crate) fn take_idle_fire(&mut self, now: Instant) -> bool {
        self.idle.fire_if_due(now)
    }

    pub(crate) fn on_editor_blur(&mut self, now: Instant) {
        self.focus_out.trigger(now);
    }

    pub(crate) fn on_editor_focus(&mut self) {
        self.focus_out.cancel();
    }

    pub(crate) fn take_focus_out_fire(&mut self, now: Instant) -> bool {
        self.focus_out.fire_if_due(now)
    }

    /// Drop both pending timers; a forced snapshot supersedes them.
    pub(crate) fn cancel_pending(&mut self) {
        self.idle.cancel();
        self.focus_out.cancel();
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (self.idle.deadline(), self.focus_out.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

impl EditorSession {
    /// Send the current text to the host as the recovery snapshot.
    ///
    /// # Returns
    /// The request id, or `None` when the worker is unavailable.
    pub(super) fn persist_snapshot(
        &mut self,
        reason: SnapshotReason,
        after: Option<AfterSnapshot>,
    ) -> Option<RequestId> {
        if self.recovery.is_pending() && is_blank(self.document.text()) {
            // A blank write would delete the snapshot before it is offered.
            debug!(?reason, "recovery check pending; keeping previous snapshot");
            return None;
        }
        let id = self.next_request_id();
        let content = self.document.text().to_string();
        debug!(?reason, request = %id, chars = self.document.char_len(), "persisting recovery snapshot");
        if !self.send(HostCmd::AutoSaveDraft { id, content }) {
            return None;
        }
        if let Some(after) = after {
            self.snapshot_followups.insert(id, after);
        }
        Some(id)
    }

    /// Cancel pending timers and persist immediately.
    pub(crate) fn force_auto_save(
        &mut self,
        reason: SnapshotReason,
        after: Option<AfterSnapshot>,
    ) -> Option<RequestId> {
        self.autosave.cancel_pending();
        self.persist_snapshot(reason, after)
    }

    /// Forced snapshot that is skipped when nothing is unsaved.
    pub(super) fn force_auto_save_if_unsaved(&mut self, reason: SnapshotReason) {
        if self.has_unsaved_content() {
            self.force_auto_save(reason, None);
        } else {
            self.autosave.cancel_pending();
        }
    }

    pub(super) fn poll_auto_save_timers(&mut self, now: Instant) {
        if self.autosave.take_idle_fire(now) && self.has_unsaved_content() {
            self.persist_snapshot(SnapshotReason::Idle, None);
        }
        if self.autosave.take_focus_out_fire(now) {
            self.force_auto_save_if_unsaved(SnapshotReason::FocusOut);
        }
    }

    pub(super) fn on_draft_saved(&mut self, id: RequestId, result: HostResult<()>) {
        if let Err(err) = result {
            warn!(request = %id, error = %err, "auto_save_draft failed");
        }
        if let Some(after) = self.snapshot_followups.remove(&id) {
            self.run_after_snapshot(after);
        }
    }
}
