//! # Editor Session
//!
//! Wires the store, the per-type locators, and the preview synchronizer into
//! one editing surface.
//!
//! The store is the single source of truth: whenever its document changes
//! (commit, undo, redo), every locator re-derives its element list from the
//! new markup and the preview surface is re-mounted from it. Selection and
//! hover are transient and leave the document alone.

use std::collections::HashMap;

use crate::locator::{ElementLocator, ElementRecord};
use crate::palette::ElementKind;
use crate::preview::PreviewSync;
use crate::store::{EditorStore, SelectedElement};

/// One editing session: store, preview surface, and a locator per palette type.
pub struct EditorSession {
    store: EditorStore,
    preview: PreviewSync,
    locators: HashMap<String, ElementLocator>,
}

impl EditorSession {
    /// Session over the default empty document.
    pub fn new() -> Self {
        Self::with_document(crate::store::DEFAULT_DOCUMENT)
    }

    /// Session over the given starting document.
    pub fn with_document(html: impl Into<String>) -> Self {
        let store = EditorStore::with_document(html);
        let mut locators = HashMap::new();
        for kind in ElementKind::ALL {
            locators.insert(
                kind.tag_name().to_string(),
                ElementLocator::new(kind.tag_name()),
            );
        }
        let mut session = Self {
            store,
            preview: PreviewSync::new(),
            locators,
        };
        session.refresh_derived();
        session
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    pub fn preview(&self) -> &PreviewSync {
        &self.preview
    }

    pub fn html(&self) -> &str {
        self.store.html()
    }

    pub fn selected_element(&self) -> Option<&SelectedElement> {
        self.store.selected_element()
    }

    /// Identity tag of the element most recently asked to scroll into view.
    pub fn take_pending_scroll(&mut self) -> Option<String> {
        self.preview.take_pending_scroll()
    }

    pub fn locator(&self, element_type: &str) -> Option<&ElementLocator> {
        self.locators.get(element_type)
    }

    pub fn element_records(&self, element_type: &str) -> Option<&[ElementRecord]> {
        self.locators.get(element_type).map(|l| l.records())
    }

    /// Commit a new document and re-derive all downstream views.
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.store.set_html(html);
        self.refresh_derived();
    }

    pub fn undo(&mut self) -> bool {
        if self.store.undo() {
            self.refresh_derived();
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.store.redo() {
            self.refresh_derived();
            true
        } else {
            false
        }
    }

    /// Click/focus on a list row: seed its edit buffer and highlight the
    /// corresponding live element.
    pub fn select_element(&mut self, element_type: &str, element_id: &str) -> bool {
        let Some(locator) = self.locators.get_mut(element_type) else {
            return false;
        };
        locator.begin_edit(element_id, &mut self.store, &mut self.preview)
    }

    /// Apply a text edit and propagate it store → locators → preview.
    pub fn edit_element_text(
        &mut self,
        element_type: &str,
        element_id: &str,
        new_text: &str,
    ) -> bool {
        let Some(locator) = self.locators.get_mut(element_type) else {
            return false;
        };
        let applied =
            locator.handle_text_edit(&mut self.store, &mut self.preview, element_id, new_text);
        if applied {
            self.refresh_derived();
        }
        applied
    }

    /// Blur on a list row: clear the editing flag, re-apply the buffer.
    pub fn end_edit(&mut self, element_type: &str) -> bool {
        let Some(locator) = self.locators.get_mut(element_type) else {
            return false;
        };
        let applied = locator.end_edit(&mut self.store, &mut self.preview);
        if applied {
            self.refresh_derived();
        }
        applied
    }

    pub fn hover_enter(&mut self, element_id: &str) -> bool {
        self.preview.hover_enter(element_id)
    }

    pub fn hover_leave(&mut self, element_id: &str) -> bool {
        self.preview.hover_leave(element_id)
    }

    /// Re-derive every locator list and re-mount the preview surface from
    /// the store's current markup.
    fn refresh_derived(&mut self) {
        for locator in self.locators.values_mut() {
            locator.refresh(self.store.html());
        }
        self.preview.mount(self.store.html());
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
