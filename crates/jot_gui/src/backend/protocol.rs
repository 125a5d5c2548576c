//! Protocol types exchanged between the editor session and the host worker.

use jot_core::HostResult;
use std::fmt;

/// Token identifying one host command and its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// File contents and location returned by a confirmed open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    pub content: String,
    pub path: String,
}

/// Commands issued by the UI thread for the host worker to execute.
///
/// Every command carries the [`RequestId`] echoed back by its completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCmd {
    /// Show `(filename, is_modified)` in the window title.
    UpdateTitle {
        id: RequestId,
        filename: Option<String>,
        is_modified: bool,
    },
    /// Open a fresh, independent editor window.
    NewFile { id: RequestId },
    /// Confirm discarding unsaved changes if needed, then pick and read a file.
    OpenFile {
        id: RequestId,
        has_unsaved_changes: bool,
    },
    /// Write `content` to `file_path`, asking for a path when there is none.
    SaveFile {
        id: RequestId,
        file_path: Option<String>,
        content: String,
    },
    /// Ask for a path and write `content` there.
    SaveAsFile { id: RequestId, content: String },
    /// Confirm discarding unsaved changes before blanking the document.
    ClearDocument {
        id: RequestId,
        has_unsaved_changes: bool,
    },
    /// Persist the crash-recovery snapshot.
    AutoSaveDraft { id: RequestId, content: String },
    /// Load the crash-recovery snapshot left by a previous session.
    GetRecoveryContent { id: RequestId },
    /// Delete the crash-recovery snapshot.
    ClearRecoveryFile { id: RequestId },
    /// Ask the user whether to restore the recovery snapshot.
    ConfirmRecovery { id: RequestId },
    /// Confirm quitting, passing whether there are unsaved changes.
    HandleQuitRequest {
        id: RequestId,
        has_unsaved_changes: bool,
    },
    /// Terminate the application.
    ExitApp { id: RequestId },
}

impl HostCmd {
    /// Request id carried by this command.
    pub fn id(&self) -> RequestId {
        match self {
            Self::UpdateTitle { id, .. }
            | Self::NewFile { id }
            | Self::OpenFile { id, .. }
            | Self::SaveFile { id, .. }
            | Self::SaveAsFile { id, .. }
            | Self::ClearDocument { id, .. }
            | Self::AutoSaveDraft { id, .. }
            | Self::GetRecoveryContent { id }
            | Self::ClearRecoveryFile { id }
            | Self::ConfirmRecovery { id }
            | Self::HandleQuitRequest { id, .. }
            | Self::ExitApp { id } => *id,
        }
    }

    /// Host command name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateTitle { .. } => "update_title",
            Self::NewFile { .. } => "new_file",
            Self::OpenFile { .. } => "open_file_with_confirmation",
            Self::SaveFile { .. } => "save_file",
            Self::SaveAsFile { .. } => "save_as_file",
            Self::ClearDocument { .. } => "clear_document_with_confirmation",
            Self::AutoSaveDraft { .. } => "auto_save_draft",
            Self::GetRecoveryContent { .. } => "get_recovery_content",
            Self::ClearRecoveryFile { .. } => "clear_recovery_file",
            Self::ConfirmRecovery { .. } => "show_recovery_dialog",
            Self::HandleQuitRequest { .. } => "handle_quit_request",
            Self::ExitApp { .. } => "exit_app",
        }
    }

    /// Whether the command reads or writes the recovery snapshot. These run
    /// one at a time in issue order.
    pub fn touches_recovery_file(&self) -> bool {
        matches!(
            self,
            Self::AutoSaveDraft { .. }
                | Self::GetRecoveryContent { .. }
                | Self::ClearRecoveryFile { .. }
        )
    }
}

/// Events produced by the host worker and polled by the UI thread.
#[derive(Debug)]
pub enum HostEvent {
    /// Completion of [`HostCmd::UpdateTitle`].
    TitleUpdated { id: RequestId, result: HostResult<()> },
    /// Completion of [`HostCmd::NewFile`].
    NewFileOpened { id: RequestId, result: HostResult<()> },
    /// Completion of [`HostCmd::OpenFile`]; `Ok(None)` means cancelled.
    FileOpened {
        id: RequestId,
        result: HostResult<Option<OpenedFile>>,
    },
    /// Completion of [`HostCmd::SaveFile`] or [`HostCmd::SaveAsFile`];
    /// `Ok(None)` means the user cancelled the path dialog.
    FileSaved {
        id: RequestId,
        result: HostResult<Option<String>>,
    },
    /// Completion of [`HostCmd::ClearDocument`].
    ClearAnswered { id: RequestId, result: HostResult<bool> },
    /// Completion of [`HostCmd::AutoSaveDraft`].
    DraftSaved { id: RequestId, result: HostResult<()> },
    /// Completion of [`HostCmd::GetRecoveryContent`].
    RecoveryLoaded {
        id: RequestId,
        result: HostResult<Option<String>>,
    },
    /// Completion of [`HostCmd::ClearRecoveryFile`].
    RecoveryCleared { id: RequestId, result: HostResult<()> },
    /// Completion of [`HostCmd::ConfirmRecovery`]. The confirmation chain
    /// always produces an answer, so there is no error case.
    RecoveryAnswered { id: RequestId, accepted: bool },
    /// Completion of [`HostCmd::HandleQuitRequest`].
    QuitAnswered { id: RequestId, result: HostResult<bool> },
    /// Completion of [`HostCmd::ExitApp`] when the host did not terminate.
    ExitIssued { id: RequestId, result: HostResult<()> },
    /// The host asked the application to quit (window close, OS quit).
    QuitRequested,
}
