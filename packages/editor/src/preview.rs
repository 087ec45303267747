//! # Preview Synchronizer
//!
//! Mirrors locator actions into a separately rendered live surface.
//!
//! The live surface is an independently owned tree of the same content,
//! joined to the locator only by identity tags. It may be transiently absent
//! (not yet mounted); every operation here is a best-effort visual
//! affordance, so a missing surface or an unmatched identity tag is a silent
//! no-op, never an error.

use pagecraft_dom::{parse, serialize, Document};

use crate::locator::apply_content_rule;
use crate::store::{EditorStore, SelectedElement};

/// Class applied to the currently selected live element.
pub const HIGHLIGHT_CLASS: &str = "element-highlight";

/// Class applied while a list row is hovered.
pub const HOVER_CLASS: &str = "element-hover";

/// Keeps the live surface visually in sync with locator actions.
#[derive(Debug, Default)]
pub struct PreviewSync {
    surface: Option<Document>,
    pending_scroll: Option<String>,
}

impl PreviewSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount (or re-mount) the live surface from markup.
    pub fn mount(&mut self, html: &str) {
        self.surface = Some(parse(html));
    }

    pub fn unmount(&mut self) {
        self.surface = None;
        self.pending_scroll = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Current markup of the live surface, if mounted.
    pub fn surface_html(&self) -> Option<String> {
        self.surface.as_ref().map(serialize)
    }

    /// Identity tag of the element most recently requested to scroll into
    /// view, consumed by the rendering client.
    pub fn take_pending_scroll(&mut self) -> Option<String> {
        self.pending_scroll.take()
    }

    pub fn pending_scroll(&self) -> Option<&str> {
        self.pending_scroll.as_deref()
    }

    /// Clear any previous highlight, highlight the element bearing the given
    /// identity tag, request a scroll to it, and publish it as the store's
    /// selected element.
    pub fn highlight_and_scroll(&mut self, element_id: &str, store: &mut EditorStore) -> bool {
        let Some(doc) = self.surface.as_mut() else {
            return false;
        };
        doc.visit_elements_mut(&mut |el| el.remove_class(HIGHLIGHT_CLASS));

        let Some(el) = doc.find_by_element_id_mut(element_id) else {
            return false;
        };
        el.add_class(HIGHLIGHT_CLASS);
        let tag_name = el.tag_name.clone();

        self.pending_scroll = Some(element_id.to_string());
        store.set_selected_element(Some(SelectedElement {
            element_id: element_id.to_string(),
            tag_name,
        }));
        true
    }

    /// Apply a transient hover marker and bring the element into view.
    /// Does not touch selection or history.
    pub fn hover_enter(&mut self, element_id: &str) -> bool {
        let Some(doc) = self.surface.as_mut() else {
            return false;
        };
        let Some(el) = doc.find_by_element_id_mut(element_id) else {
            return false;
        };
        el.add_class(HOVER_CLASS);
        self.pending_scroll = Some(element_id.to_string());
        true
    }

    pub fn hover_leave(&mut self, element_id: &str) -> bool {
        let Some(doc) = self.surface.as_mut() else {
            return false;
        };
        let Some(el) = doc.find_by_element_id_mut(element_id) else {
            return false;
        };
        el.remove_class(HOVER_CLASS);
        true
    }

    /// Mirror a content change onto the live surface using the same per-type
    /// rule as the locator, then re-apply highlight and scroll.
    pub fn apply_text_change(
        &mut self,
        element_id: &str,
        new_text: &str,
        element_type: &str,
        store: &mut EditorStore,
    ) -> bool {
        {
            let Some(doc) = self.surface.as_mut() else {
                return false;
            };
            let Some(el) = doc.find_by_element_id_mut(element_id) else {
                return false;
            };
            apply_content_rule(el, element_type, new_text);
        }
        self.highlight_and_scroll(element_id, store)
    }
}
