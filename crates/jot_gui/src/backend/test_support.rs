//! Scripted in-memory host shared by backend tests.

use crate::backend::{Host, OpenedFile};
use async_trait::async_trait;
use jot_core::{HostError, HostResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::broadcast;

type Reply<T> = Result<T, &'static str>;

fn reply<T: Clone>(slot: &Mutex<Reply<T>>) -> HostResult<T> {
    slot.lock()
        .expect("reply lock")
        .clone()
        .map_err(|message| HostError::Unavailable(message.to_string()))
}

/// Host double that records every call and answers from preset replies.
pub(crate) struct ScriptedHost {
    calls: Mutex<Vec<String>>,
    drafts: Mutex<Vec<String>>,
    draft_delays: Mutex<HashMap<String, Duration>>,
    titles: Mutex<Vec<(Option<String>, bool)>>,
    open_reply: Mutex<Reply<Option<OpenedFile>>>,
    save_reply: Mutex<Reply<Option<String>>>,
    clear_reply: Mutex<Reply<bool>>,
    recovery_snapshot: Mutex<Reply<Option<String>>>,
    recovery_dialog_reply: Mutex<Reply<bool>>,
    ask_reply: Mutex<Reply<bool>>,
    quit_reply: Mutex<Reply<bool>>,
    quit_tx: broadcast::Sender<()>,
}

impl ScriptedHost {
    pub(crate) fn new() -> Self {
        let (quit_tx, _) = broadcast::channel(4);
        Self {
            calls: Mutex::new(Vec::new()),
            drafts: Mutex::new(Vec::new()),
            draft_delays: Mutex::new(HashMap::new()),
            titles: Mutex::new(Vec::new()),
            open_reply: Mutex::new(Ok(None)),
            save_reply: Mutex::new(Ok(None)),
            clear_reply: Mutex::new(Ok(true)),
            recovery_snapshot: Mutex::new(Ok(None)),
            recovery_dialog_reply: Mutex::new(Ok(false)),
            ask_reply: Mutex::new(Ok(false)),
            quit_reply: Mutex::new(Ok(false)),
            quit_tx,
        }
    }

    fn record(&self, name: &str) {
        self.calls.lock().expect("calls lock").push(name.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn drafts(&self) -> Vec<String> {
        self.drafts.lock().expect("drafts lock").clone()
    }

    pub(crate) fn titles(&self) -> Vec<(Option<String>, bool)> {
        self.titles.lock().expect("titles lock").clone()
    }

    /// Hold the draft with exactly this content for `delay` before storing it.
    pub(crate) fn delay_draft(&self, content: &str, delay: Duration) {
        self.draft_delays
            .lock()
            .expect("delays lock")
            .insert(content.to_string(), delay);
    }

    pub(crate) fn set_open_reply(&self, value: Reply<Option<OpenedFile>>) {
        *self.open_reply.lock().expect("open lock") = value;
    }

    pub(crate) fn set_save_reply(&self, value: Reply<Option<String>>) {
        *self.save_reply.lock().expect("save lock") = value;
    }

    pub(crate) fn set_recovery_snapshot(&self, value: Reply<Option<String>>) {
        *self.recovery_snapshot.lock().expect("recovery lock") = value;
    }

    pub(crate) fn set_recovery_dialog_reply(&self, value: Reply<bool>) {
        *self.recovery_dialog_reply.lock().expect("dialog lock") = value;
    }

    pub(crate) fn set_ask_reply(&self, value: Reply<bool>) {
        *self.ask_reply.lock().expect("ask lock") = value;
    }

    pub(crate) fn set_quit_reply(&self, value: Reply<bool>) {
        *self.quit_reply.lock().expect("quit lock") = value;
    }

    /// Emit a host-originated quit request to every subscriber.
    pub(crate) fn emit_quit_request(&self) -> usize {
        self.quit_tx.send(()).unwrap_or(0)
    }

    pub(crate) fn quit_subscribers(&self) -> usize {
        self.quit_tx.receiver_count()
    }
}

#[async_trait]
impl Host for ScriptedHost {
    async fn update_title(&self, filename: Option<String>, is_modified: bool) -> HostResult<()> {
        self.record("update_title");
        self.titles
            .lock()
            .expect("titles lock")
            .push((filename, is_modified));
        Ok(())
    }

    async fn new_file(&self) -> HostResult<()> {
        self.record("new_file");
        Ok(())
    }

    async fn open_file_with_confirmation(
        &self,
        _has_unsaved_changes: bool,
    ) -> HostResult<Option<OpenedFile>> {
        self.record("open_file_with_confirmation");
        reply(&self.open_reply)
    }

    async fn save_file(
        &self,
        _file_path: Option<String>,
        _content: String,
    ) -> HostResult<Option<String>> {
        self.record("save_file");
        reply(&self.save_reply)
    }

    async fn save_as_file(&self, _content: String) -> HostResult<Option<String>> {
        self.record("save_as_file");
        reply(&self.save_reply)
    }

    async fn clear_document_with_confirmation(
        &self,
        _has_unsaved_changes: bool,
    ) -> HostResult<bool> {
        self.record("clear_document_with_confirmation");
        reply(&self.clear_reply)
    }

    async fn auto_save_draft(&self, content: String) -> HostResult<()> {
        self.record("auto_save_draft");
        let delay = self
            .draft_delays
            .lock()
            .expect("delays lock")
            .get(&content)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.drafts.lock().expect("drafts lock").push(content);
        Ok(())
    }

    async fn get_recovery_content(&self) -> HostResult<Option<String>> {
        self.record("get_recovery_content");
        reply(&self.recovery_snapshot)
    }

    async fn clear_recovery_file(&self) -> HostResult<()> {
        self.record("clear_recovery_file");
        *self.recovery_snapshot.lock().expect("recovery lock") = Ok(None);
        Ok(())
    }

    async fn show_recovery_dialog(&self) -> HostResult<bool> {
        self.record("show_recovery_dialog");
        reply(&self.recovery_dialog_reply)
    }

    async fn ask_confirmation(&self, _title: &str, _message: &str) -> HostResult<bool> {
        self.record("ask_confirmation");
        reply(&self.ask_reply)
    }

    async fn handle_quit_request(&self, _has_unsaved_changes: bool) -> HostResult<bool> {
        self.record("handle_quit_request");
        reply(&self.quit_reply)
    }

    async fn exit_app(&self) -> HostResult<()> {
        self.record("exit_app");
        Ok(())
    }

    fn subscribe_quit_requests(&self) -> broadcast::Receiver<()> {
        self.quit_tx.subscribe()
    }
}
