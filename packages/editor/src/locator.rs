//! # Element Locator
//!
//! For one element-type token, derives an editable list of all matching
//! elements in the current document and propagates edits back into the store.
//!
//! The element list is never stored independently: it is recomputed from the
//! store's markup on every change, so it is always consistent with the store.
//! Identity tags (`data-element-id`) are assigned positionally on scan,
//! `{type}-{index}` by first-seen document order within the type, and are
//! the sole join key to the preview surface.
//!
//! Edits always resolve their target in a fresh parse of the current markup
//! by identity tag, never through a held element reference. Tag assignment is
//! deterministic, so re-running it on the fresh parse reproduces the same
//! tags even when the committed markup predates them.

use pagecraft_dom::{parse, serialize, Attribute, Document, Element, ELEMENT_ID_ATTR};
use serde::{Deserialize, Serialize};

use crate::preview::PreviewSync;
use crate::store::EditorStore;

/// Transient edit-marker attribute, stripped when copying attributes onto a
/// freshly located element.
pub const EDIT_MARKER_ATTR: &str = "contenteditable";

/// One row of the editable element list, derived from the document on scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub element_id: String,
    pub text: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone)]
struct EditBuffer {
    element_id: String,
    text: String,
}

/// Editable list of all elements of one type found in the document.
#[derive(Debug)]
pub struct ElementLocator {
    element_type: String,
    records: Vec<ElementRecord>,
    editing: Option<EditBuffer>,
}

/// Assign `{type}-{index}` identity tags to every element of the type that
/// lacks one, counting all elements of the type in document order.
///
/// Tags are positional, not content-addressed: removing or reordering an
/// earlier element of the same type rebinds later tags on the next scan.
pub fn assign_element_ids(doc: &mut Document, element_type: &str) {
    let tag = element_type.to_string();
    let mut index = 0usize;
    doc.visit_elements_mut(&mut |el| {
        if el.tag_name == tag {
            if el.element_id().is_none() {
                el.set_attr(ELEMENT_ID_ATTR, &format!("{}-{}", tag, index));
            }
            index += 1;
        }
    });
}

/// Per-type content-assignment rule, identical wherever content is written:
/// `img` captions live in the `alt` attribute, `button` content may include
/// markup, everything else is plain text.
pub fn apply_content_rule(element: &mut Element, element_type: &str, value: &str) {
    match element_type {
        "img" => element.set_attr("alt", value),
        "button" => element.set_inner_html(value),
        _ => element.set_text_content(value),
    }
}

/// Displayable text for a list row, mirroring the content rule.
pub fn display_text(element: &Element, element_type: &str) -> String {
    if element_type == "img" {
        element.attr("alt").unwrap_or_default().to_string()
    } else {
        element.text_content()
    }
}

impl ElementLocator {
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            records: Vec::new(),
            editing: None,
        }
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identity tag of the row currently being edited, if any.
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|b| b.element_id.as_str())
    }

    pub fn is_editing(&self, element_id: &str) -> bool {
        self.editing_id() == Some(element_id)
    }

    /// Shown instead of the list when no elements of the type exist.
    pub fn empty_message(&self) -> String {
        format!("No {} elements found", self.element_type)
    }

    /// Hint rendered in rows whose element has no usable text yet.
    pub fn placeholder_hint(&self) -> String {
        format!("Enter {} content...", self.element_type)
    }

    /// Re-derive the element list from the given markup: parse, collect all
    /// elements of the type in document order, assign missing identity tags.
    pub fn refresh(&mut self, html: &str) {
        let mut doc = parse(html);
        assign_element_ids(&mut doc, &self.element_type);

        let mut records = Vec::new();
        for el in doc.elements_by_tag(&self.element_type) {
            if let Some(element_id) = el.element_id() {
                records.push(ElementRecord {
                    element_id: element_id.to_string(),
                    text: display_text(el, &self.element_type),
                    attributes: el.attributes.clone(),
                });
            }
        }
        self.records = records;
    }

    /// Mark a row as being edited and seed its edit buffer with the current
    /// text. Highlights and scrolls the corresponding live element, and
    /// publishes it as the store's selection (best-effort).
    pub fn begin_edit(
        &mut self,
        element_id: &str,
        store: &mut EditorStore,
        preview: &mut PreviewSync,
    ) -> bool {
        let Some(record) = self.records.iter().find(|r| r.element_id == element_id) else {
            return false;
        };
        self.editing = Some(EditBuffer {
            element_id: element_id.to_string(),
            text: record.text.clone(),
        });
        preview.highlight_and_scroll(element_id, store);
        true
    }

    /// Apply a text edit to the element bearing the given identity tag.
    ///
    /// The target is located in a fresh parse of the store's current markup,
    /// the per-type content rule is applied, and every attribute captured on
    /// the scanned record (minus the edit marker) is copied over so edits
    /// never lose attributes set elsewhere. The mutated tree is then
    /// serialized and committed, the local list is updated in place, and the
    /// change is forwarded to the preview surface.
    ///
    /// Unknown identity tags are a silent no-op.
    pub fn handle_text_edit(
        &mut self,
        store: &mut EditorStore,
        preview: &mut PreviewSync,
        element_id: &str,
        new_text: &str,
    ) -> bool {
        if let Some(buffer) = self.editing.as_mut() {
            if buffer.element_id == element_id {
                buffer.text = new_text.to_string();
            }
        }

        let mut doc = parse(store.html());
        assign_element_ids(&mut doc, &self.element_type);

        let Some(el) = doc.find_by_element_id_mut(element_id) else {
            return false;
        };
        apply_content_rule(el, &self.element_type, new_text);

        if let Some(record) = self.records.iter().find(|r| r.element_id == element_id) {
            for attr in &record.attributes {
                if attr.name != EDIT_MARKER_ATTR {
                    el.set_attr(&attr.name, &attr.value);
                }
            }
        }

        let updated_text = display_text(el, &self.element_type);
        let updated_attributes = el.attributes.clone();

        store.set_html(serialize(&doc));

        if let Some(record) = self.records.iter_mut().find(|r| r.element_id == element_id) {
            record.text = updated_text;
            record.attributes = updated_attributes;
        }

        preview.apply_text_change(element_id, new_text, &self.element_type, store);
        true
    }

    /// Clear the editing flag and re-apply the buffered text one final time,
    /// so no keystroke is lost if the change handler and blur race.
    pub fn end_edit(&mut self, store: &mut EditorStore, preview: &mut PreviewSync) -> bool {
        let Some(buffer) = self.editing.take() else {
            return false;
        };
        self.handle_text_edit(store, preview, &buffer.element_id, &buffer.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_assigned_in_document_order() {
        let mut locator = ElementLocator::new("h1");
        locator.refresh("<html><body><h1>A</h1><h1>B</h1></body></html>");

        let records = locator.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].element_id, "h1-0");
        assert_eq!(records[0].text, "A");
        assert_eq!(records[1].element_id, "h1-1");
        assert_eq!(records[1].text, "B");
    }

    #[test]
    fn test_existing_ids_are_kept_and_counted() {
        let mut locator = ElementLocator::new("p");
        locator.refresh(r#"<p data-element-id="p-0">a</p><p>b</p>"#);

        let records = locator.records();
        assert_eq!(records[0].element_id, "p-0");
        assert_eq!(records[1].element_id, "p-1");
    }

    #[test]
    fn test_zero_matches_is_not_an_error() {
        let mut locator = ElementLocator::new("button");
        locator.refresh("<html><body><p>no buttons here</p></body></html>");

        assert!(locator.is_empty());
        assert_eq!(locator.empty_message(), "No button elements found");
    }

    #[test]
    fn test_edit_rewrites_target_and_grows_history_by_one() {
        let mut store = EditorStore::with_document(
            r#"<html><body><h1>A</h1><h1 class="hero" data-x="1">B</h1></body></html>"#,
        );
        let mut preview = PreviewSync::new();
        let mut locator = ElementLocator::new("h1");
        locator.refresh(store.html());

        assert!(locator.handle_text_edit(&mut store, &mut preview, "h1-1", "Hello"));

        assert_eq!(store.history().len(), 2);
        assert!(store.html().contains(">Hello</h1>"));
        assert!(store.html().contains(">A</h1>"));
        assert!(store.html().contains(r#"class="hero""#));
        assert!(store.html().contains(r#"data-x="1""#));
        assert!(store.html().contains(r#"data-element-id="h1-1""#));
    }

    #[test]
    fn test_img_edit_writes_alt_attribute() {
        let mut store =
            EditorStore::with_document(r#"<body><img src="cat.png" alt="old"></body>"#);
        let mut preview = PreviewSync::new();
        let mut locator = ElementLocator::new("img");
        locator.refresh(store.html());

        assert!(locator.handle_text_edit(&mut store, &mut preview, "img-0", "a cat"));
        assert!(store.html().contains(r#"alt="a cat""#));
        assert!(!store.html().contains("a cat</img>"));
        assert_eq!(locator.records()[0].text, "a cat");
    }

    #[test]
    fn test_button_edit_writes_inner_markup() {
        let mut store = EditorStore::with_document("<body><button>Old</button></body>");
        let mut preview = PreviewSync::new();
        let mut locator = ElementLocator::new("button");
        locator.refresh(store.html());

        assert!(locator.handle_text_edit(
            &mut store,
            &mut preview,
            "button-0",
            "<strong>Go</strong>",
        ));
        assert!(store
            .html()
            .contains("<button data-element-id=\"button-0\"><strong>Go</strong></button>"));
    }

    #[test]
    fn test_edit_marker_attribute_is_not_copied() {
        let mut store = EditorStore::with_document("<body><p>x</p></body>");
        let mut preview = PreviewSync::new();
        let mut locator = ElementLocator::new("p");
        locator.refresh(store.html());

        // Simulate a scan that captured the transient edit marker.
        locator.records[0]
            .attributes
            .push(Attribute::new(EDIT_MARKER_ATTR, "true"));

        assert!(locator.handle_text_edit(&mut store, &mut preview, "p-0", "y"));
        assert!(!store.html().contains(EDIT_MARKER_ATTR));
    }

    #[test]
    fn test_unknown_id_is_silent_noop() {
        let mut store = EditorStore::with_document("<body><p>x</p></body>");
        let mut preview = PreviewSync::new();
        let mut locator = ElementLocator::new("p");
        locator.refresh(store.html());

        assert!(!locator.handle_text_edit(&mut store, &mut preview, "p-9", "y"));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_blur_reapplies_buffered_text() {
        let mut store = EditorStore::with_document("<body><p>seed</p></body>");
        let mut preview = PreviewSync::new();
        let mut locator = ElementLocator::new("p");
        locator.refresh(store.html());

        assert!(locator.begin_edit("p-0", &mut store, &mut preview));
        assert!(locator.is_editing("p-0"));

        locator.handle_text_edit(&mut store, &mut preview, "p-0", "typed");
        assert!(locator.end_edit(&mut store, &mut preview));
        assert!(locator.editing_id().is_none());
        assert!(store.html().contains(">typed</p>"));
    }
}
