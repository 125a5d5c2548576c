//! The asynchronous host contract.

use crate::backend::OpenedFile;
use async_trait::async_trait;
use jot_core::HostResult;
use tokio::sync::broadcast;

/// Privileged collaborator that owns file access, dialogs, and the window.
///
/// Every method may fail; callers resolve failures to a conservative default
/// instead of surfacing them. Implementations must be safe to call
/// concurrently: the worker runs each command as an independent task.
#[async_trait]
pub trait Host: Send + Sync + 'static {
    /// Reflect the document name and modified flag in the window title.
    async fn update_title(&self, filename: Option<String>, is_modified: bool) -> HostResult<()>;

    /// Open a new, independent editor window.
    async fn new_file(&self) -> HostResult<()>;

    /// Confirm discarding changes (when `has_unsaved_changes`), then let the
    /// user pick a file and read it.
    ///
    /// # Returns
    /// `None` when the user declined or cancelled.
    async fn open_file_with_confirmation(
        &self,
        has_unsaved_changes: bool,
    ) -> HostResult<Option<OpenedFile>>;

    /// Write `content` to `file_path`, prompting for a path when it is `None`.
    ///
    /// # Returns
    /// The path written, or `None` when the user cancelled.
    async fn save_file(&self, file_path: Option<String>, content: String)
        -> HostResult<Option<String>>;

    /// Prompt for a path and write `content` there.
    async fn save_as_file(&self, content: String) -> HostResult<Option<String>>;

    /// Confirm discarding changes before the document is blanked.
    async fn clear_document_with_confirmation(&self, has_unsaved_changes: bool)
        -> HostResult<bool>;

    /// Persist the crash-recovery snapshot. Must be idempotent.
    async fn auto_save_draft(&self, content: String) -> HostResult<()>;

    /// Load the crash-recovery snapshot from a previous session.
    async fn get_recovery_content(&self) -> HostResult<Option<String>>;

    /// Delete the crash-recovery snapshot.
    async fn clear_recovery_file(&self) -> HostResult<()>;

    /// Rich recovery prompt. First tier of the recovery confirmation chain.
    async fn show_recovery_dialog(&self) -> HostResult<bool>;

    /// Plain yes/no question. Second tier of the recovery confirmation chain.
    async fn ask_confirmation(&self, title: &str, message: &str) -> HostResult<bool>;

    /// Confirm quitting, passing whether there are unsaved changes.
    async fn handle_quit_request(&self, has_unsaved_changes: bool) -> HostResult<bool>;

    /// Terminate the application.
    async fn exit_app(&self) -> HostResult<()>;

    /// Subscribe to host-originated quit requests.
    ///
    /// Dropping the receiver unsubscribes.
    fn subscribe_quit_requests(&self) -> broadcast::Receiver<()>;
}
