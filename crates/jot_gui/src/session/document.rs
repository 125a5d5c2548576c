//! Text buffer shared between the editor widget and the session.

use jot_core::text::char_len;

/// The document text plus a monotonic edit revision.
///
/// The widget edits the string in place; the session records each edit with
/// [`note_edit`](Self::note_edit). Host calls always read [`text`](Self::text)
/// at dispatch time rather than keeping a copy.
#[derive(Debug, Default)]
pub(crate) struct DocumentBuffer {
    text: String,
    revision: u64,
}

impl DocumentBuffer {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for the editing widget.
    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Record a user edit made through [`text_mut`](Self::text_mut).
    pub(crate) fn note_edit(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }

    /// Replace the whole text (open, clear, recovery).
    ///
    /// # Returns
    /// The revision of the new content.
    pub(crate) fn replace(&mut self, text: String) -> u64 {
        self.text = text;
        self.note_edit()
    }
}
