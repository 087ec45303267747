//! # Element Palette
//!
//! Static catalog of insertable element types. Each entry is a drag-source
//! token carrying its type tag as payload; drop-target handling and
//! insertion into the document are external collaborators.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Content element types the editor tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Button,
    Image,
}

impl ElementKind {
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Paragraph,
        ElementKind::Heading1,
        ElementKind::Heading2,
        ElementKind::Heading3,
        ElementKind::Button,
        ElementKind::Image,
    ];

    /// Tag name used for document scans and drag payloads.
    pub fn tag_name(self) -> &'static str {
        match self {
            ElementKind::Paragraph => "p",
            ElementKind::Heading1 => "h1",
            ElementKind::Heading2 => "h2",
            ElementKind::Heading3 => "h3",
            ElementKind::Button => "button",
            ElementKind::Image => "img",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Paragraph => "Paragraphs",
            ElementKind::Heading1 => "Heading 1",
            ElementKind::Heading2 => "Heading 2",
            ElementKind::Heading3 => "Heading 3",
            ElementKind::Button => "Buttons",
            ElementKind::Image => "Images",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag_name() == tag)
    }

    /// Seed markup a drop handler would insert for this type.
    pub fn starter_markup(self) -> &'static str {
        match self {
            ElementKind::Paragraph => "<p>New paragraph</p>",
            ElementKind::Heading1 => "<h1>New heading</h1>",
            ElementKind::Heading2 => "<h2>New heading</h2>",
            ElementKind::Heading3 => "<h3>New heading</h3>",
            ElementKind::Button => "<button>New button</button>",
            ElementKind::Image => r#"<img src="" alt="New image">"#,
        }
    }
}

/// One palette entry.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteItem {
    pub kind: ElementKind,
    pub tag_name: &'static str,
    pub label: &'static str,
}

/// The full palette, in display order.
pub fn catalog() -> Vec<PaletteItem> {
    ElementKind::ALL
        .into_iter()
        .map(|kind| PaletteItem {
            kind,
            tag_name: kind.tag_name(),
            label: kind.label(),
        })
        .collect()
}

/// Draggable palette token. The only state is a transient "currently being
/// dragged" flag.
#[derive(Debug, Clone)]
pub struct DragToken {
    kind: ElementKind,
    dragging: bool,
}

impl DragToken {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            dragging: false,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Transport payload: the type tag, JSON-encoded.
    pub fn payload(&self) -> String {
        json!({ "type": self.kind.tag_name() }).to_string()
    }
}
