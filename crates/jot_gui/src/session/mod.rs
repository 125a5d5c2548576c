//! Editor session state machine.
//!
//! [`EditorSession`] owns the document buffer and every piece of state that
//! decides when the host is called: modification tracking, title sync,
//! recovery snapshots, the startup recovery check, explicit commands and the
//! quit sequence. It never blocks; host calls are sent to the worker as
//! [`HostCmd`] values and their completions are applied from [`tick`].
//!
//! Time is always passed in, so the whole state machine is deterministic
//! under test.
//!
//! [`tick`]: EditorSession::tick

mod autosave;
mod coalesce;
mod commands;
mod document;
mod events;
mod quit;
mod recovery;
mod title;
mod tracker;

#[cfg(test)]
mod tests;

use crate::backend::{HostCmd, HostHandle, RequestId};
use autosave::{AfterSnapshot, AutoSaveScheduler, SnapshotReason};
use coalesce::Debouncer;
use document::DocumentBuffer;
use jot_core::constants::{
    DEFAULT_AUTO_SAVE_IDLE_MS, DEFAULT_AUTO_SAVE_VOLUME_STEP, DEFAULT_FOCUS_OUT_GRACE_MS,
    DEFAULT_INPUT_DEBOUNCE_MS, DEFAULT_RECOVERY_SETTLE_MS,
};
use jot_core::Config;
use quit::QuitOrchestrator;
use recovery::RecoveryFlow;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use title::TitleSync;
use tracing::{debug, warn};

pub use commands::{EditorCommand, KeyChord};
pub use quit::QuitState;
pub use recovery::RecoveryOutcome;

/// Delays and thresholds that drive the session timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    pub input_debounce: Duration,
    pub auto_save_idle: Duration,
    pub auto_save_volume_step: usize,
    pub focus_out_grace: Duration,
    pub recovery_settle: Duration,
}

impl SessionTimings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_debounce: Duration::from_millis(config.input_debounce_ms),
            auto_save_idle: Duration::from_millis(config.auto_save_idle_ms),
            auto_save_volume_step: config.auto_save_volume_step,
            focus_out_grace: Duration::from_millis(config.focus_out_grace_ms),
            recovery_settle: Duration::from_millis(config.recovery_settle_ms),
        }
    }
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            input_debounce: Duration::from_millis(DEFAULT_INPUT_DEBOUNCE_MS),
            auto_save_idle: Duration::from_millis(DEFAULT_AUTO_SAVE_IDLE_MS),
            auto_save_volume_step: DEFAULT_AUTO_SAVE_VOLUME_STEP,
            focus_out_grace: Duration::from_millis(DEFAULT_FOCUS_OUT_GRACE_MS),
            recovery_settle: Duration::from_millis(DEFAULT_RECOVERY_SETTLE_MS),
        }
    }
}

/// The single open document and the state machine around it.
pub struct EditorSession {
    host: HostHandle,
    timings: SessionTimings,
    document: DocumentBuffer,
    tracker: tracker::ModificationTracker,
    input: Debouncer,
    title: TitleSync,
    autosave: AutoSaveScheduler,
    recovery: RecoveryFlow,
    quit: QuitOrchestrator,
    next_request: u64,
    outstanding: usize,
    snapshot_followups: HashMap<RequestId, AfterSnapshot>,
    save_revisions: HashMap<RequestId, u64>,
    focus_editor_next: bool,
}

impl EditorSession {
    pub fn new(host: HostHandle, timings: SessionTimings) -> Self {
        Self {
            host,
            timings,
            document: DocumentBuffer::default(),
            tracker: tracker::ModificationTracker::default(),
            input: Debouncer::new(timings.input_debounce),
            title: TitleSync::default(),
            autosave: AutoSaveScheduler::new(
                timings.auto_save_idle,
                timings.focus_out_grace,
                timings.auto_save_volume_step,
            ),
            recovery: RecoveryFlow::default(),
            quit: QuitOrchestrator::default(),
            next_request: 0,
            outstanding: 0,
            snapshot_followups: HashMap::new(),
            save_revisions: HashMap::new(),
            focus_editor_next: true,
        }
    }

    /// Publish the initial title and schedule the recovery check.
    pub fn start(&mut self, now: Instant) {
        self.sync_title(now);
        self.begin_recovery_check(now);
    }

    pub fn timings(&self) -> SessionTimings {
        self.timings
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    /// Buffer handed to the editing widget. Call [`on_input`](Self::on_input)
    /// after every change made through it.
    pub fn text_mut(&mut self) -> &mut String {
        self.document.text_mut()
    }

    /// Record a user-originated content change.
    pub fn on_input(&mut self, now: Instant) {
        self.document.note_edit();
        self.input.trigger(now);
        let char_len = self.document.char_len();
        if self.autosave.on_content_changed(now, char_len) && self.has_unsaved_content() {
            self.persist_snapshot(SnapshotReason::Volume, None);
        }
    }

    pub fn on_editor_focus_changed(&mut self, focused: bool, now: Instant) {
        if focused {
            self.autosave.on_editor_focus();
        } else {
            self.autosave.on_editor_blur(now);
        }
    }

    pub fn on_window_focus_changed(&mut self, focused: bool, now: Instant) {
        if !focused {
            self.flush_pending_input(now);
            self.force_auto_save_if_unsaved(SnapshotReason::WindowBlur);
        }
    }

    pub fn on_visibility_changed(&mut self, visible: bool, now: Instant) {
        if !visible {
            self.flush_pending_input(now);
            self.force_auto_save_if_unsaved(SnapshotReason::Hidden);
        }
    }

    /// Apply host completions and fire every timer that is due.
    ///
    /// Called once per rendered frame; the title notification goes out last
    /// so it reflects everything that changed during this frame.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(event) = self.host.evt_rx.try_recv() {
            self.apply_event(event, now);
        }
        if self.input.fire_if_due(now) {
            self.detect_modification(now);
        }
        self.poll_auto_save_timers(now);
        self.poll_recovery(now);
        self.flush_title_frame(now);
    }

    /// Earliest instant at which [`tick`](Self::tick) has timer work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.input.deadline(),
            self.title.next_deadline(),
            self.autosave.next_deadline(),
            self.recovery.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Whether any host command is still waiting for its completion.
    pub fn awaiting_host(&self) -> bool {
        self.outstanding > 0
    }

    /// Consume a pending request to move keyboard focus to the editor.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_editor_next)
    }

    pub fn is_modified(&self) -> bool {
        self.tracker.is_modified()
    }

    pub fn current_file_path(&self) -> Option<&str> {
        self.tracker.current_file_path()
    }

    pub fn has_recovered_content(&self) -> bool {
        self.tracker.has_recovered_content()
    }

    pub fn recovery_outcome(&self) -> Option<RecoveryOutcome> {
        self.recovery.outcome()
    }

    pub fn quit_state(&self) -> QuitState {
        self.quit.state()
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.is_active()
    }

    fn has_unsaved_content(&self) -> bool {
        self.tracker.has_unsaved_content(self.document.revision())
    }

    fn detect_modification(&mut self, now: Instant) {
        if self.document.revision() != self.tracker.clean_revision() && self.tracker.mark_modified()
        {
            self.sync_title(now);
        }
    }

    /// Run modification detection now instead of waiting for the debounce.
    fn flush_pending_input(&mut self, now: Instant) {
        if self.input.is_pending() {
            self.input.cancel();
            self.detect_modification(now);
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn send(&mut self, cmd: HostCmd) -> bool {
        let name = cmd.name();
        let id = cmd.id();
        match self.host.cmd_tx.send(cmd) {
            Ok(()) => {
                self.outstanding += 1;
                debug!(command = name, request = %id, "host command sent");
                true
            }
            Err(_) => {
                warn!(command = name, "host worker unavailable; command dropped");
                false
            }
        }
    }
}
