//! Desktop host backed by native dialogs, the local filesystem, and the
//! eframe root viewport.

use crate::backend::{ConfirmRequest, Host, LastResortConfirm, OpenedFile};
use async_trait::async_trait;
use eframe::egui;
use jot_core::constants::WINDOW_LABEL_ENV;
use jot_core::text::nonempty_path;
use jot_core::title::format_window_title;
use jot_core::{HostError, HostResult, RecoveryStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

const UNSAVED_TITLE: &str = "Unsaved Changes";
const DISCARD_MESSAGE: &str = "You have unsaved changes. Do you want to continue without saving?";
const QUIT_MESSAGE: &str = "You have unsaved changes. Are you sure you want to quit without saving?";
const QUIT_CHANNEL_CAPACITY: usize = 8;

/// Shared flag that lets the next window close through instead of turning it
/// into a quit request.
#[derive(Debug, Clone, Default)]
pub struct ExitGate(Arc<AtomicBool>);

impl ExitGate {
    pub fn open(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Sender half of the host's `quit-requested` signal.
#[derive(Debug, Clone)]
pub struct QuitSignal(broadcast::Sender<()>);

impl QuitSignal {
    /// Notify every subscriber that the user asked to quit.
    pub fn emit(&self) {
        if self.0.send(()).is_err() {
            warn!("quit requested with no subscriber attached");
        }
    }
}

/// Last-resort confirmation using a blocking native message box.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeMessageBox;

impl LastResortConfirm for NativeMessageBox {
    fn confirm(&self, request: &ConfirmRequest) -> bool {
        ask_yes_no(&request.title, &request.message)
    }
}

fn ask_yes_no(title: &str, message: &str) -> bool {
    let answer = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();
    matches!(answer, rfd::MessageDialogResult::Yes)
}

fn ask_ok_cancel(title: &str, message: &str) -> bool {
    let answer = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::OkCancel)
        .show();
    matches!(
        answer,
        rfd::MessageDialogResult::Ok | rfd::MessageDialogResult::Yes
    )
}

async fn blocking<T, F>(task: F) -> HostResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| HostError::Unavailable(format!("host task aborted: {}", err)))
}

/// Run a native dialog on a blocking thread.
async fn dialog<T, F>(task: F) -> HostResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| HostError::Dialog(format!("dialog aborted: {}", err)))
}

/// [`Host`] implementation for a native desktop window.
pub struct DesktopHost {
    ctx: egui::Context,
    recovery: RecoveryStore,
    quit_tx: broadcast::Sender<()>,
    exit_gate: ExitGate,
}

impl DesktopHost {
    /// Build a host that drives the viewport owned by `ctx` and stores
    /// recovery snapshots in `recovery`.
    pub fn new(ctx: egui::Context, recovery: RecoveryStore) -> Self {
        let (quit_tx, _) = broadcast::channel(QUIT_CHANNEL_CAPACITY);
        Self {
            ctx,
            recovery,
            quit_tx,
            exit_gate: ExitGate::default(),
        }
    }

    /// Handle used by the window shell to emit `quit-requested`.
    pub fn quit_signal(&self) -> QuitSignal {
        QuitSignal(self.quit_tx.clone())
    }

    /// Gate opened by [`Host::exit_app`].
    pub fn exit_gate(&self) -> ExitGate {
        self.exit_gate.clone()
    }

    async fn clear_recovery_quietly(&self) {
        if let Err(err) = self.clear_recovery_file().await {
            warn!(error = %err, "failed to clear recovery file");
        }
    }

    async fn write_document(&self, path: PathBuf, content: String) -> HostResult<Option<String>> {
        tokio::fs::write(&path, content).await?;
        self.clear_recovery_quietly().await;
        let path = path.to_string_lossy().to_string();
        info!(path = %path, "saved document");
        Ok(Some(path))
    }
}

#[async_trait]
impl Host for DesktopHost {
    async fn update_title(&self, filename: Option<String>, is_modified: bool) -> HostResult<()> {
        let title = format_window_title(filename.as_deref(), is_modified);
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        Ok(())
    }

    async fn new_file(&self) -> HostResult<()> {
        let exe = std::env::current_exe()
            .map_err(|err| HostError::Window(format!("cannot locate executable: {}", err)))?;
        let label = format!("notepad_{}", chrono::Utc::now().timestamp_millis());
        std::process::Command::new(exe)
            .env(WINDOW_LABEL_ENV, &label)
            .spawn()
            .map_err(|err| {
                HostError::Window(format!("failed to open window {}: {}", label, err))
            })?;
        info!(window = %label, "opened new window");
        Ok(())
    }

    async fn open_file_with_confirmation(
        &self,
        has_unsaved_changes: bool,
    ) -> HostResult<Option<OpenedFile>> {
        let picked = dialog(move || {
            if has_unsaved_changes && !ask_yes_no(UNSAVED_TITLE, DISCARD_MESSAGE) {
                return None;
            }
            rfd::FileDialog::new().pick_file()
        })
        .await?;
        let Some(path) = picked else {
            return Ok(None);
        };
        let content = tokio::fs::read_to_string(&path).await?;
        Ok(Some(OpenedFile {
            content,
            path: path.to_string_lossy().to_string(),
        }))
    }

    async fn save_file(
        &self,
        file_path: Option<String>,
        content: String,
    ) -> HostResult<Option<String>> {
        let path = match nonempty_path(file_path) {
            Some(path) => PathBuf::from(path),
            None => match dialog(|| rfd::FileDialog::new().save_file()).await? {
                Some(path) => path,
                None => return Ok(None),
            },
        };
        self.write_document(path, content).await
    }

    async fn save_as_file(&self, content: String) -> HostResult<Option<String>> {
        match dialog(|| rfd::FileDialog::new().save_file()).await? {
            Some(path) => self.write_document(path, content).await,
            None => Ok(None),
        }
    }

    async fn clear_document_with_confirmation(
        &self,
        has_unsaved_changes: bool,
    ) -> HostResult<bool> {
        if !has_unsaved_changes {
            return Ok(true);
        }
        dialog(|| ask_yes_no(UNSAVED_TITLE, DISCARD_MESSAGE)).await
    }

    async fn auto_save_draft(&self, content: String) -> HostResult<()> {
        let store = self.recovery.clone();
        blocking(move || store.write(&content)).await?
    }

    async fn get_recovery_content(&self) -> HostResult<Option<String>> {
        let store = self.recovery.clone();
        blocking(move || store.read()).await
    }

    async fn clear_recovery_file(&self) -> HostResult<()> {
        let store = self.recovery.clone();
        blocking(move || store.clear()).await??;
        Ok(())
    }

    async fn show_recovery_dialog(&self) -> HostResult<bool> {
        let request = ConfirmRequest::recovery();
        dialog(move || ask_yes_no(&request.title, &request.message)).await
    }

    async fn ask_confirmation(&self, title: &str, message: &str) -> HostResult<bool> {
        let title = title.to_string();
        let message = message.to_string();
        dialog(move || ask_ok_cancel(&title, &message)).await
    }

    async fn handle_quit_request(&self, has_unsaved_changes: bool) -> HostResult<bool> {
        if has_unsaved_changes && !dialog(|| ask_yes_no(UNSAVED_TITLE, QUIT_MESSAGE)).await? {
            return Ok(false);
        }
        self.clear_recovery_quietly().await;
        Ok(true)
    }

    async fn exit_app(&self) -> HostResult<()> {
        self.exit_gate.open();
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        Ok(())
    }

    fn subscribe_quit_requests(&self) -> broadcast::Receiver<()> {
        self.quit_tx.subscribe()
    }
}
