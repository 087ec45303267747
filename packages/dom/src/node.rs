use serde::{Deserialize, Serialize};

/// Attribute correlating the same logical element across the document tree,
/// the editable element list, and the live preview surface. Must survive
/// every markup transformation verbatim.
pub const ELEMENT_ID_ATTR: &str = "data-element-id";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "title"];

/// Elements that never take children and serialize without a closing tag.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Elements whose content is literal text, consumed up to the matching end tag.
pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

/// Single attribute. Source order is preserved on the element so that
/// serialization is deterministic and attribute sets survive edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// Element node (tag, attributes in source order, children).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Element {
    pub tag_name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing one in place so that
    /// attribute order stays stable across edits.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.attributes.iter_mut().find(|a| a.name == name) {
            existing.value = value.to_string();
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
    }

    /// The identity tag of this element, if one has been assigned.
    pub fn element_id(&self) -> Option<&str> {
        self.attr(ELEMENT_ID_ATTR)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attr("class", &value);
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attr("class") else {
            return;
        };
        let remaining: Vec<&str> = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect();
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            let value = remaining.join(" ");
            self.set_attr("class", &value);
        }
    }

    /// Concatenated text of all descendant text nodes, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Replace all children with a single text node (empty text clears them).
    pub fn set_text_content(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Replace all children with a parsed markup fragment.
    pub fn set_inner_html(&mut self, markup: &str) {
        self.children = crate::parser::parse_fragment(markup);
    }

    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag_name)
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// Parsed document: optional doctype plus top-level nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub doctype: Option<String>,
    pub nodes: Vec<Node>,
}

impl Document {
    /// Find the element bearing the given identity tag.
    pub fn find_by_element_id(&self, element_id: &str) -> Option<&Element> {
        find_in_nodes(&self.nodes, element_id)
    }

    /// Mutable lookup by identity tag.
    pub fn find_by_element_id_mut(&mut self, element_id: &str) -> Option<&mut Element> {
        find_in_nodes_mut(&mut self.nodes, element_id)
    }

    /// All elements with the given tag name, in document (pre-)order.
    pub fn elements_by_tag(&self, tag_name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_by_tag(&self.nodes, tag_name, &mut found);
        found
    }

    /// Visit every element in document order with mutable access.
    pub fn visit_elements_mut(&mut self, visit: &mut dyn FnMut(&mut Element)) {
        walk_nodes_mut(&mut self.nodes, visit);
    }
}

fn find_in_nodes<'a>(nodes: &'a [Node], element_id: &str) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.element_id() == Some(element_id) {
                return Some(el);
            }
            if let Some(found) = find_in_nodes(&el.children, element_id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_nodes_mut<'a>(nodes: &'a mut [Node], element_id: &str) -> Option<&'a mut Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.element_id() == Some(element_id) {
                return Some(el);
            }
            if let Some(found) = find_in_nodes_mut(&mut el.children, element_id) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_by_tag<'a>(nodes: &'a [Node], tag_name: &str, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.tag_name == tag_name {
                found.push(el);
            }
            collect_by_tag(&el.children, tag_name, found);
        }
    }
}

fn walk_nodes_mut(nodes: &mut [Node], visit: &mut dyn FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(el) = node {
            visit(el);
            walk_nodes_mut(&mut el.children, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_preserves_order() {
        let mut el = Element::new("p");
        el.set_attr("class", "lead");
        el.set_attr("id", "intro");
        el.set_attr("class", "lead big");

        assert_eq!(el.attributes.len(), 2);
        assert_eq!(el.attributes[0].name, "class");
        assert_eq!(el.attributes[0].value, "lead big");
        assert_eq!(el.attributes[1].name, "id");
    }

    #[test]
    fn test_class_helpers() {
        let mut el = Element::new("div");
        el.add_class("element-highlight");
        assert!(el.has_class("element-highlight"));

        el.add_class("element-hover");
        el.add_class("element-hover");
        assert_eq!(el.attr("class"), Some("element-highlight element-hover"));

        el.remove_class("element-highlight");
        assert_eq!(el.attr("class"), Some("element-hover"));

        el.remove_class("element-hover");
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn test_text_content_is_recursive() {
        let mut inner = Element::new("em");
        inner.children.push(Node::Text("world".to_string()));

        let mut el = Element::new("p");
        el.children.push(Node::Text("hello ".to_string()));
        el.children.push(Node::Element(inner));

        assert_eq!(el.text_content(), "hello world");
    }

    #[test]
    fn test_lookup_by_identity_tag_and_tag_name() {
        let doc = crate::parser::parse(concat!(
            "<body><h1 data-element-id=\"h1-0\">A</h1>",
            "<div><h1 data-element-id=\"h1-1\">B</h1></div></body>",
        ));

        let found = doc.find_by_element_id("h1-1").unwrap();
        assert_eq!(found.text_content(), "B");
        assert!(doc.find_by_element_id("h1-9").is_none());

        let headings = doc.elements_by_tag("h1");
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].element_id(), Some("h1-0"));
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let mut el = Element::new("p");
        el.children.push(Node::Text("old".to_string()));
        el.children
            .push(Node::Element(Element::new("span")));

        el.set_text_content("new");
        assert_eq!(el.children, vec![Node::Text("new".to_string())]);

        el.set_text_content("");
        assert!(el.children.is_empty());
    }
}
