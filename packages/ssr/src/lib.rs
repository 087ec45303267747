//! # Pagecraft SSR
//!
//! Server-side rendering entry point: for a requested path, produce one
//! complete HTML document containing the rendered application shell (from a
//! default, empty editor state), a serialized snapshot of the per-request
//! query cache, and route-dependent SEO metadata.
//!
//! Rendering is a stateless, per-request computation: it never reads the
//! editor's document store, and no cache object outlives a request.

pub mod cache;
pub mod meta;
pub mod renderer;
pub mod shell;

pub use cache::{QueryCache, QueryEntry};
pub use meta::{meta_tag_lines, structured_data, EDITOR_ROUTE};
pub use renderer::{RenderOptions, SsrError, SsrRenderer};
pub use shell::render_app_shell;
