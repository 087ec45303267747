use crate::node::{is_raw_text_element, Document, Element, Node};

/// Serializer converts a document tree back to markup.
///
/// Attributes are written in stored order with double-quoted values, void
/// elements get no closing tag, and raw-text element content is emitted
/// literally. Together with the parser this defines the round-trip
/// normalization edited documents go through.
pub struct Serializer {
    buffer: String,
}

/// Serialize a document to a markup string.
pub fn serialize(doc: &Document) -> String {
    let mut serializer = Serializer::new();
    serializer.serialize(doc)
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn serialize(&mut self, doc: &Document) -> String {
        if let Some(doctype) = &doc.doctype {
            self.buffer.push_str("<!");
            self.buffer.push_str(doctype);
            self.buffer.push('>');
        }
        for node in &doc.nodes {
            self.serialize_node(node, false);
        }
        std::mem::take(&mut self.buffer)
    }

    fn serialize_node(&mut self, node: &Node, raw: bool) {
        match node {
            Node::Text(text) => {
                if raw {
                    self.buffer.push_str(text);
                } else {
                    self.buffer.push_str(&escape_text(text));
                }
            }
            Node::Comment(content) => {
                self.buffer.push_str("<!--");
                self.buffer.push_str(content);
                self.buffer.push_str("-->");
            }
            Node::Element(el) => self.serialize_element(el),
        }
    }

    fn serialize_element(&mut self, el: &Element) {
        self.buffer.push('<');
        self.buffer.push_str(&el.tag_name);
        for attr in &el.attributes {
            self.buffer.push(' ');
            self.buffer.push_str(&attr.name);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&escape_attr(&attr.value));
            self.buffer.push('"');
        }
        self.buffer.push('>');

        if el.is_void() {
            return;
        }

        let raw = is_raw_text_element(&el.tag_name);
        for child in &el.children {
            self.serialize_node(child, raw);
        }

        self.buffer.push_str("</");
        self.buffer.push_str(&el.tag_name);
        self.buffer.push('>');
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text-node content.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape double-quoted attribute values.
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_round_trip_document() {
        let source = concat!(
            "<!DOCTYPE html><html><head><title>Visual HTML Editor</title></head>",
            "<body><h1 data-element-id=\"h1-0\">A</h1></body></html>",
        );
        assert_eq!(serialize(&parse(source)), source);
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let out = serialize(&parse("<p><img src=\"x.png\" alt=\"pic\"></p>"));
        assert_eq!(out, "<p><img src=\"x.png\" alt=\"pic\"></p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let out = serialize(&parse("<p>a &amp; b</p>"));
        assert_eq!(out, "<p>a &amp; b</p>");
    }

    #[test]
    fn test_attribute_quotes_are_escaped() {
        let mut doc = parse("<p>x</p>");
        doc.visit_elements_mut(&mut |el| el.set_attr("title", "say \"hi\""));
        assert_eq!(serialize(&doc), "<p title=\"say &quot;hi&quot;\">x</p>");
    }

    #[test]
    fn test_raw_text_content_not_escaped() {
        let source = "<script>if (a < b) { go(); }</script>";
        assert_eq!(serialize(&parse(source)), source);
    }

    #[test]
    fn test_comment_round_trip() {
        let source = "<div><!-- keep me --></div>";
        assert_eq!(serialize(&parse(source)), source);
    }
}
