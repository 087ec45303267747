//! # Pagecraft DOM
//!
//! HTML document tree plus the tokenizer, parser, and serializer that move
//! documents between string and tree form.
//!
//! The parser is best-effort: it never fails, recovering from malformed
//! markup the way a forgiving browser parser would (unmatched end tags are
//! ignored, unterminated constructs run to end of input). The serializer is
//! the inverse boundary; a parse → serialize round trip is the only
//! normalization applied to edited documents.

pub mod node;
pub mod parser;
pub mod serializer;
pub mod tokenizer;

pub use node::{Attribute, Document, Element, Node, ELEMENT_ID_ATTR};
pub use parser::{parse, parse_fragment};
pub use serializer::{escape_attr, escape_text, serialize, Serializer};
pub use tokenizer::{tokenize, Token};
