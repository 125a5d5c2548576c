//! Authoritative modification state for the open document.

/// Tracks `isModified`, the current file path, and the recovery flag.
///
/// All state changes go through these methods; the session pairs every call
/// that returns `true` (or otherwise changes visible state) with a title sync.
#[derive(Debug, Default)]
pub(crate) struct ModificationTracker {
    is_modified: bool,
    current_file_path: Option<String>,
    has_recovered_content: bool,
    clean_revision: u64,
}

impl ModificationTracker {
    pub(crate) fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub(crate) fn current_file_path(&self) -> Option<&str> {
        self.current_file_path.as_deref()
    }

    pub(crate) fn has_recovered_content(&self) -> bool {
        self.has_recovered_content
    }

    pub(crate) fn clean_revision(&self) -> u64 {
        self.clean_revision
    }

    /// Whether the buffer at `revision` holds anything not yet persisted,
    /// including edits still inside the input debounce window.
    pub(crate) fn has_unsaved_content(&self, revision: u64) -> bool {
        self.is_modified || revision != self.clean_revision
    }

    /// Record a user edit.
    ///
    /// # Returns
    /// `true` only on the clean-to-modified edge.
    pub(crate) fn mark_modified(&mut self) -> bool {
        if self.is_modified {
            return false;
        }
        self.is_modified = true;
        true
    }

    /// Record a confirmed save or open of `saved_revision` at `path`.
    ///
    /// The document only becomes clean when nothing was typed after the
    /// persisted snapshot; a late acknowledgement for older content still
    /// moves the path but keeps the document modified.
    ///
    /// # Returns
    /// `true` when the document is now clean.
    pub(crate) fn mark_clean(
        &mut self,
        path: Option<String>,
        saved_revision: u64,
        current_revision: u64,
    ) -> bool {
        self.current_file_path = path;
        self.has_recovered_content = false;
        self.clean_revision = saved_revision;
        if saved_revision == current_revision {
            self.is_modified = false;
        }
        !self.is_modified
    }

    /// Back to the initial state for a blank document at `revision`.
    pub(crate) fn reset(&mut self, revision: u64) {
        self.is_modified = false;
        self.current_file_path = None;
        self.has_recovered_content = false;
        self.clean_revision = revision;
    }

    /// A recovery snapshot was loaded into the buffer.
    pub(crate) fn accept_recovery(&mut self) {
        self.is_modified = true;
        self.has_recovered_content = true;
    }

    /// The user declined the recovery snapshot.
    pub(crate) fn decline_recovery(&mut self) {
        self.has_recovered_content = true;
    }
}
