//! Caller-owned log of edits applied to a document.
//!
//! Header mutations append human readable descriptions here; the log is then
//! drained into a History header so the edits are persisted in the file.
//! Batch callers create one log per document (or call [`ChangeLog::reset`]
//! between documents) so entries never leak across files.

use crate::header::HistoryHeader;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    entries: Vec<String>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("Change logged: {}", message);
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move every entry into the history header's process list, in order,
    /// leaving the log empty
    pub fn drain_into(&mut self, history: &mut HistoryHeader) {
        for entry in self.entries.drain(..) {
            history.add_process(entry);
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
