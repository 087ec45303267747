//! # Pagecraft Editor
//!
//! Core editing engine for the visual HTML editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ palette: typed drag-source tokens           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: markup string + linear undo history  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ locator: per-type editable element lists    │
//! │  - re-derived from markup on every change   │
//! │  - identity tags assigned on scan           │
//! │  - edits resolve against a fresh parse      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ preview: live surface joined by identity tag│
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The markup string is source of truth**: element lists and the
//!    preview surface are derived views, rebuilt from it on every change
//! 2. **Resolve by identifier against latest state**: edits never trust a
//!    held element reference across turns
//! 3. **Degrade silently**: a missing surface, an unmatched identity tag, or
//!    an out-of-range undo is a no-op, never an error

pub mod locator;
pub mod palette;
pub mod preview;
pub mod session;
pub mod store;

pub use locator::{
    apply_content_rule, assign_element_ids, display_text, ElementLocator, ElementRecord,
    EDIT_MARKER_ATTR,
};
pub use palette::{catalog, DragToken, ElementKind, PaletteItem};
pub use preview::{PreviewSync, HIGHLIGHT_CLASS, HOVER_CLASS};
pub use session::EditorSession;
pub use store::{EditorStore, SelectedElement, DEFAULT_DOCUMENT};
