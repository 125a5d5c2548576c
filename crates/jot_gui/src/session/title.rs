//! Coalesced window-title notifications.

use super::coalesce::{Debouncer, InFlightSlot};
use super::EditorSession;
use crate::backend::{HostCmd, RequestId};
use jot_core::text::display_file_name;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Title sync state: one frame slot plus one in-flight slot.
///
/// Requests made while a frame is scheduled collapse into it. Requests made
/// while a notification is in flight re-arm a single trailing notification,
/// sent after the current one settles.
#[derive(Debug)]
pub(crate) struct TitleSync {
    frame: Debouncer,
    in_flight: InFlightSlot,
    rearm: bool,
}

impl Default for TitleSync {
    fn default() -> Self {
        Self {
            frame: Debouncer::new(Duration::ZERO),
            in_flight: InFlightSlot::default(),
            rearm: false,
        }
    }
}

impl TitleSync {
    pub(crate) fn request(&mut self, now: Instant) {
        if self.in_flight.is_busy() {
            self.rearm = true;
            return;
        }
        if !self.frame.is_pending() {
            self.frame.trigger(now);
        }
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.frame.deadline()
    }
}

impl EditorSession {
    /// Ask for the title to reflect current state on the next frame.
    pub(crate) fn sync_title(&mut self, now: Instant) {
        self.title.request(now);
    }

    pub(super) fn flush_title_frame(&mut self, now: Instant) {
        if !self.title.frame.fire_if_due(now) {
            return;
        }
        let id = self.next_request_id();
        if !self.title.in_flight.occupy(id) {
            self.title.rearm = true;
            return;
        }
        let filename = self
            .tracker
            .current_file_path()
            .and_then(display_file_name)
            .map(str::to_string);
        let is_modified = self.tracker.is_modified();
        if !self.send(HostCmd::UpdateTitle {
            id,
            filename,
            is_modified,
        }) {
            self.title.in_flight.release(id);
        }
    }

    pub(super) fn on_title_settled(
        &mut self,
        id: RequestId,
        result: jot_core::HostResult<()>,
        now: Instant,
    ) {
        if !self.title.in_flight.release(id) {
            debug!(request = %id, "ignoring stale title acknowledgement");
            return;
        }
        if let Err(err) = result {
            warn!(error = %err, "update_title failed");
        }
        if std::mem::take(&mut self.title.rearm) {
            self.title.frame.trigger(now);
        }
    }
}
