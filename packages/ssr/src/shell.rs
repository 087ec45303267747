//! Default application shell.
//!
//! Server rendering starts cold: the shell is produced from a default,
//! empty editor state and never reads a live document store. The client
//! hydrates over this markup after boot.

use pagecraft_dom::escape_attr;
use pagecraft_editor::{catalog, DEFAULT_DOCUMENT};

/// Render the application markup placed inside the root container.
pub fn render_app_shell() -> String {
    let mut out = String::new();

    out.push_str("<div class=\"editor-shell\">");
    out.push_str("<header class=\"editor-toolbar\">");
    out.push_str("<span class=\"editor-title\">Visual HTML Editor</span>");
    out.push_str("<span class=\"history-controls\">");
    out.push_str("<button disabled=\"\">Undo</button>");
    out.push_str("<button disabled=\"\">Redo</button>");
    out.push_str("</span>");
    out.push_str("</header>");

    out.push_str("<aside class=\"element-palette\">");
    out.push_str("<h3>Page Elements</h3>");
    out.push_str("<ul>");
    for item in catalog() {
        out.push_str(&format!(
            "<li draggable=\"true\" data-element-type=\"{}\">{}</li>",
            item.tag_name, item.label
        ));
    }
    out.push_str("</ul>");
    out.push_str("</aside>");

    out.push_str("<main class=\"editor-preview\">");
    out.push_str(&format!(
        "<iframe title=\"Preview\" srcdoc=\"{}\"></iframe>",
        escape_attr(DEFAULT_DOCUMENT)
    ));
    out.push_str("</main>");
    out.push_str("</div>");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_lists_every_palette_type() {
        let shell = render_app_shell();
        for tag in ["p", "h1", "h2", "h3", "button", "img"] {
            assert!(shell.contains(&format!("data-element-type=\"{}\"", tag)));
        }
    }

    #[test]
    fn test_shell_previews_default_document() {
        let shell = render_app_shell();
        assert!(shell.contains("srcdoc=\"&lt;!DOCTYPE html&gt;"));
    }
}
