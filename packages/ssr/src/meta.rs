//! Route-dependent SEO metadata.
//!
//! The editor route gets a minimal noindex block: editor pages are not meant
//! to be indexed or socially shared. Every other route gets the full default
//! metadata set plus a structured-data script describing the application.

use pagecraft_dom::escape_attr;
use serde_json::json;

/// Path of the editor page.
pub const EDITOR_ROUTE: &str = "/editor";

const TITLE: &str = "Visual HTML Editor - Modern Web Development Tool";
const DESCRIPTION: &str = "A cutting-edge, browser-based Visual HTML Editor that revolutionizes \
     web content creation through an innovative and powerful development environment.";
const SOCIAL_DESCRIPTION: &str = "Create stunning web content visually with our modern HTML \
     editor. Features include real-time preview, drag-and-drop interface, and responsive design \
     tools.";

/// Metadata block for a request path, one tag per line.
pub fn meta_tag_lines(path: &str, base_url: &str) -> Vec<String> {
    if path == EDITOR_ROUTE {
        return editor_meta_tag_lines();
    }
    default_meta_tag_lines(path, base_url)
}

fn default_meta_tag_lines(path: &str, base_url: &str) -> Vec<String> {
    let tags: Vec<(&str, String)> = vec![
        ("description", DESCRIPTION.to_string()),
        (
            "keywords",
            "HTML editor, visual editor, web development, drag and drop, modern UI".to_string(),
        ),
        ("author", "Visual HTML Editor Team".to_string()),
        ("og:type", "website".to_string()),
        ("og:url", format!("{}{}", base_url, path)),
        ("og:title", TITLE.to_string()),
        ("og:description", SOCIAL_DESCRIPTION.to_string()),
        ("og:image", format!("{}/og-image.png", base_url)),
        ("twitter:card", "summary_large_image".to_string()),
        ("twitter:title", "Visual HTML Editor".to_string()),
        (
            "twitter:description",
            "Create stunning web content visually with our modern HTML editor.".to_string(),
        ),
        ("twitter:image", format!("{}/twitter-card.png", base_url)),
    ];

    let mut lines = vec![format!("<title>{}</title>", TITLE)];
    for (key, value) in tags {
        // Open Graph and Twitter tags use `property`, the rest use `name`.
        let attribute = if key.starts_with("og:") || key.starts_with("twitter:") {
            "property"
        } else {
            "name"
        };
        lines.push(format!(
            "<meta {}=\"{}\" content=\"{}\">",
            attribute,
            key,
            escape_attr(&value)
        ));
    }
    lines
}

fn editor_meta_tag_lines() -> Vec<String> {
    vec![
        "<title>Visual HTML Editor - Web Editor</title>".to_string(),
        "<meta name=\"robots\" content=\"noindex,nofollow\">".to_string(),
        "<meta name=\"description\" content=\"Visual HTML Editor - Create and edit web content visually\">"
            .to_string(),
    ]
}

/// Structured-data script block, omitted on the editor route.
pub fn structured_data(path: &str) -> Option<String> {
    if path == EDITOR_ROUTE {
        return None;
    }

    let data = json!({
        "@context": "https://schema.org",
        "@type": "WebApplication",
        "name": "Visual HTML Editor",
        "applicationCategory": "DeveloperApplication",
        "description": "A cutting-edge, browser-based Visual HTML Editor that revolutionizes web content creation.",
        "operatingSystem": "Any",
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD"
        },
        "features": [
            "Real-time preview",
            "Drag and drop interface",
            "Responsive design tools",
            "Code export",
            "Theme customization"
        ]
    });

    Some(format!(
        "<script type=\"application/ld+json\">{}</script>",
        data
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_route_is_noindex_only() {
        let lines = meta_tag_lines(EDITOR_ROUTE, "https://example.com");
        let block = lines.join("\n");
        assert!(block.contains("noindex,nofollow"));
        assert!(!block.contains("og:"));
        assert!(structured_data(EDITOR_ROUTE).is_none());
    }

    #[test]
    fn test_default_route_has_full_set() {
        let lines = meta_tag_lines("/", "https://example.com");
        let block = lines.join("\n");
        assert!(block.contains("<title>Visual HTML Editor - Modern Web Development Tool</title>"));
        assert!(block.contains("<meta property=\"og:title\""));
        assert!(block.contains("<meta property=\"og:url\" content=\"https://example.com/\">"));
        assert!(block.contains("<meta name=\"author\""));
        assert!(block.contains("<meta property=\"twitter:card\""));
    }

    #[test]
    fn test_structured_data_describes_web_application() {
        let block = structured_data("/about").unwrap();
        assert!(block.starts_with("<script type=\"application/ld+json\">"));
        assert!(block.contains("\"@type\":\"WebApplication\""));
    }
}
