//! # Document Store
//!
//! Single source of truth for the edited document and its linear history.
//!
//! The store holds the serialized markup string verbatim; it never parses or
//! validates it. Every commit appends to the history after truncating the
//! redo tail, so `history[current_index]` always equals the live document and
//! a new edit discards any undone future. Undo/redo are silent no-ops when
//! the cursor is at either end of the history.

use serde::{Deserialize, Serialize};

/// Minimal empty document every session starts from.
pub const DEFAULT_DOCUMENT: &str =
    "<!DOCTYPE html><html><head><title>Visual HTML Editor</title></head><body></body></html>";

/// Non-owned reference to one element in the live preview surface, keyed by
/// identity tag. Transient: set on click/focus, cleared explicitly, never
/// recorded in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedElement {
    pub element_id: String,
    pub tag_name: String,
}

/// Editor document store: markup, history, cursor, selection.
#[derive(Debug, Clone)]
pub struct EditorStore {
    html: String,
    history: Vec<String>,
    current_index: usize,
    selected_element: Option<SelectedElement>,
    version: u64,
}

impl EditorStore {
    /// Store initialized with the default empty document.
    pub fn new() -> Self {
        Self::with_document(DEFAULT_DOCUMENT)
    }

    /// Store initialized with the given document as its first history entry.
    pub fn with_document(html: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            history: vec![html.clone()],
            html,
            current_index: 0,
            selected_element: None,
            version: 0,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Monotonic change counter; consumers re-derive their views when it moves.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.history.len()
    }

    /// Commit a new document state. Truncates the redo tail, appends, and
    /// advances the cursor. The content is not validated; callers are
    /// responsible for producing well-formed markup.
    pub fn set_html(&mut self, html: impl Into<String>) {
        let html = html.into();
        self.history.truncate(self.current_index + 1);
        self.history.push(html.clone());
        self.current_index = self.history.len() - 1;
        self.html = html;
        self.version += 1;
    }

    /// Move the cursor back one entry. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.current_index -= 1;
        self.html = self.history[self.current_index].clone();
        self.version += 1;
        true
    }

    /// Move the cursor forward one entry. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.current_index += 1;
        self.html = self.history[self.current_index].clone();
        self.version += 1;
        true
    }

    pub fn selected_element(&self) -> Option<&SelectedElement> {
        self.selected_element.as_ref()
    }

    /// Pure assignment; selection is not a document change and does not move
    /// the version counter.
    pub fn set_selected_element(&mut self, selected: Option<SelectedElement>) {
        self.selected_element = selected;
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}
