use crate::node::{is_raw_text_element, Attribute};

/// Flat token stream produced by scanning markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<!DOCTYPE html>` with the raw content between `<!` and `>`.
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
    Comment(String),
}

/// Tokenize markup. Never fails; anything unrecognizable is consumed as text.
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).run()
}

struct Tokenizer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'src> Tokenizer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.scan_text();
            } else if self.starts_with(b"<!--") {
                self.scan_comment();
            } else if self.starts_with(b"<!") {
                self.scan_doctype();
            } else if self.starts_with(b"</") {
                self.scan_end_tag();
            } else if self
                .bytes
                .get(self.pos + 1)
                .map(|b| b.is_ascii_alphabetic())
                .unwrap_or(false)
            {
                self.scan_start_tag();
            } else {
                // Stray '<' with no tag following it: literal text.
                let end = self.find(b'<', self.pos + 1).unwrap_or(self.bytes.len());
                self.tokens
                    .push(Token::Text(decode_entities(&self.source[self.pos..end])));
                self.pos = end;
            }
        }
        self.tokens
    }

    fn scan_text(&mut self) {
        let end = self.find(b'<', self.pos).unwrap_or(self.bytes.len());
        self.tokens
            .push(Token::Text(decode_entities(&self.source[self.pos..end])));
        self.pos = end;
    }

    fn scan_comment(&mut self) {
        let content_start = self.pos + 4;
        let end = self.source[content_start..]
            .find("-->")
            .map(|i| content_start + i);
        match end {
            Some(end) => {
                self.tokens
                    .push(Token::Comment(self.source[content_start..end].to_string()));
                self.pos = end + 3;
            }
            None => {
                // Unterminated comment runs to end of input.
                self.tokens
                    .push(Token::Comment(self.source[content_start..].to_string()));
                self.pos = self.bytes.len();
            }
        }
    }

    fn scan_doctype(&mut self) {
        let content_start = self.pos + 2;
        let end = self.find(b'>', content_start).unwrap_or(self.bytes.len());
        self.tokens
            .push(Token::Doctype(self.source[content_start..end].to_string()));
        self.pos = (end + 1).min(self.bytes.len());
    }

    fn scan_end_tag(&mut self) {
        self.pos += 2;
        self.skip_whitespace();
        let name = self.scan_tag_name();
        let end = self.find(b'>', self.pos).unwrap_or(self.bytes.len());
        self.pos = (end + 1).min(self.bytes.len());
        if !name.is_empty() {
            self.tokens.push(Token::EndTag(name));
        }
    }

    fn scan_start_tag(&mut self) {
        self.pos += 1;
        let name = self.scan_tag_name();
        let mut attributes = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.bytes.get(self.pos) {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') if self.bytes.get(self.pos + 1) == Some(&b'>') => {
                    self_closing = true;
                    self.pos += 2;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                }
                _ => {
                    if let Some(attr) = self.scan_attribute() {
                        attributes.push(attr);
                    }
                }
            }
        }

        let raw = is_raw_text_element(&name) && !self_closing;
        self.tokens.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if raw {
            self.scan_raw_text(&name);
        }
    }

    /// Literal content of script/style/title, up to the matching end tag.
    fn scan_raw_text(&mut self, name: &str) {
        let close = format!("</{}", name);
        let rest = &self.source[self.pos..];
        let end = rest
            .to_ascii_lowercase()
            .find(&close)
            .map(|i| self.pos + i)
            .unwrap_or(self.bytes.len());
        if end > self.pos {
            self.tokens
                .push(Token::Text(self.source[self.pos..end].to_string()));
        }
        self.pos = end;
    }

    fn scan_attribute(&mut self) -> Option<Attribute> {
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'=' || b == b'>' || b == b'/' {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            // No progress; skip the offending byte so the scan terminates.
            self.pos += 1;
            return None;
        }
        let name = self.source[start..self.pos].to_ascii_lowercase();

        self.skip_whitespace();
        if self.bytes.get(self.pos) != Some(&b'=') {
            return Some(Attribute::new(name, ""));
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.bytes.get(self.pos).copied() {
            Some(quote) if quote == b'"' || quote == b'\'' => {
                self.pos += 1;
                let value_start = self.pos;
                let end = self.find(quote, value_start).unwrap_or(self.bytes.len());
                let raw = &self.source[value_start..end];
                self.pos = (end + 1).min(self.bytes.len());
                decode_entities(raw)
            }
            _ => {
                let value_start = self.pos;
                while let Some(&b) = self.bytes.get(self.pos) {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                decode_entities(&self.source[value_start..self.pos])
            }
        };

        Some(Attribute::new(name, value))
    }

    fn scan_tag_name(&mut self) -> String {
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_alphanumeric() || b == b'-' {
                self.pos += 1;
            } else {
                break;
            }
        }
        self.source[start..self.pos].to_ascii_lowercase()
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .map(|b| b.is_ascii_whitespace())
            .unwrap_or(false)
        {
            self.pos += 1;
        }
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(prefix)
    }

    fn find(&self, byte: u8, from: usize) -> Option<usize> {
        self.bytes[from..]
            .iter()
            .position(|&b| b == byte)
            .map(|i| from + i)
    }
}

/// Decode the minimal entity set the serializer emits. Unknown entities are
/// left as literal text.
fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let mut matched = false;
        for (entity, ch) in [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
            ("&apos;", '\''),
        ] {
            if rest.starts_with(entity) {
                out.push(ch);
                rest = &rest[entity.len()..];
                matched = true;
                break;
            }
        }
        if !matched {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_start_tag_with_attributes() {
        let tokens = tokenize(r#"<img src="/a.png" alt="A picture">"#);
        assert_eq!(
            tokens,
            vec![Token::StartTag {
                name: "img".to_string(),
                attributes: vec![
                    Attribute::new("src", "/a.png"),
                    Attribute::new("alt", "A picture"),
                ],
                self_closing: false,
            }]
        );
    }

    #[test]
    fn test_tokenize_text_and_end_tag() {
        let tokens = tokenize("<p>Hello &amp; welcome</p>");
        assert_eq!(
            tokens,
            vec![
                Token::StartTag {
                    name: "p".to_string(),
                    attributes: vec![],
                    self_closing: false,
                },
                Token::Text("Hello & welcome".to_string()),
                Token::EndTag("p".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_doctype_and_comment() {
        let tokens = tokenize("<!DOCTYPE html><!-- note -->");
        assert_eq!(
            tokens,
            vec![
                Token::Doctype("DOCTYPE html".to_string()),
                Token::Comment(" note ".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_attribute_may_contain_gt() {
        let tokens = tokenize(r#"<p title="a > b">x</p>"#);
        match &tokens[0] {
            Token::StartTag { attributes, .. } => {
                assert_eq!(attributes[0].value, "a > b");
            }
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn test_raw_text_element_keeps_markup_literal() {
        let tokens = tokenize("<script>if (a < b) { go(); }</script>");
        assert_eq!(
            tokens[1],
            Token::Text("if (a < b) { go(); }".to_string())
        );
        assert_eq!(tokens[2], Token::EndTag("script".to_string()));
    }

    #[test]
    fn test_bare_and_unquoted_attributes() {
        let tokens = tokenize("<input disabled value=yes>");
        match &tokens[0] {
            Token::StartTag { attributes, .. } => {
                assert_eq!(attributes[0], Attribute::new("disabled", ""));
                assert_eq!(attributes[1], Attribute::new("value", "yes"));
            }
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn test_stray_lt_is_text() {
        let tokens = tokenize("a < b");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a ".to_string()),
                Token::Text("< b".to_string()),
            ]
        );
    }
}
