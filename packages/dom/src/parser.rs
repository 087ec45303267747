use crate::node::{is_void_element, Document, Element, Node};
use crate::tokenizer::{tokenize, Token};

/// Parse a complete document. Best-effort recovery, never fails:
/// unmatched end tags are dropped, elements left open at end of input are
/// closed implicitly, void elements never take children.
pub fn parse(source: &str) -> Document {
    let mut builder = TreeBuilder::default();
    for token in tokenize(source) {
        match token {
            Token::Doctype(content) => builder.doctype(content),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => builder.start(name, attributes, self_closing),
            Token::EndTag(name) => builder.end(&name),
            Token::Text(text) => builder.append(Node::Text(text)),
            Token::Comment(content) => builder.append(Node::Comment(content)),
        }
    }
    builder.finish()
}

/// Parse a markup fragment into a node list (no doctype expected).
pub fn parse_fragment(source: &str) -> Vec<Node> {
    parse(source).nodes
}

#[derive(Default)]
struct TreeBuilder {
    doctype: Option<String>,
    roots: Vec<Node>,
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn doctype(&mut self, content: String) {
        // Only the first top-level doctype counts; stray ones are dropped.
        if self.doctype.is_none() && self.stack.is_empty() {
            self.doctype = Some(content);
        }
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn start(&mut self, name: String, attributes: Vec<crate::node::Attribute>, self_closing: bool) {
        let element = Element {
            tag_name: name,
            attributes,
            children: Vec::new(),
        };
        if self_closing || is_void_element(&element.tag_name) {
            self.append(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }

    fn end(&mut self, name: &str) {
        let Some(open_index) = self.stack.iter().rposition(|el| el.tag_name == name) else {
            return;
        };
        // Pop through the match, implicitly closing anything nested inside it.
        while self.stack.len() > open_index {
            if let Some(el) = self.stack.pop() {
                self.append(Node::Element(el));
            }
        }
    }

    fn finish(mut self) -> Document {
        while let Some(el) = self.stack.pop() {
            self.append(Node::Element(el));
        }
        Document {
            doctype: self.doctype,
            nodes: self.roots,
        }
    }
}
