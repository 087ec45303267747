//! Per-request document rendering.
//!
//! One complete HTML document per request: rendered app shell, dehydrated
//! query cache, route-dependent metadata, inline critical styling, and the
//! client bootstrap. Stateless across requests; a fresh cache is created per
//! render.

use thiserror::Error;

use crate::cache::QueryCache;
use crate::meta::{meta_tag_lines, structured_data};
use crate::shell::render_app_shell;

#[derive(Error, Debug)]
pub enum SsrError {
    #[error("Failed to dehydrate query cache: {0}")]
    Dehydrate(#[from] serde_json::Error),
}

/// Options for document rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Absolute origin used for Open Graph URLs and social images.
    pub base_url: String,
    /// Indentation string for the emitted document.
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_url: "https://pagecraft.dev".to_string(),
            indent: "  ".to_string(),
        }
    }
}

struct Context {
    options: RenderOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: RenderOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    fn add_block(&mut self, text: &str) {
        for line in text.lines() {
            self.add_line(line);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Stateless renderer; one call per request.
#[derive(Debug, Clone, Default)]
pub struct SsrRenderer {
    options: RenderOptions,
}

impl SsrRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the document for a request path with a cold query cache.
    pub fn render(&self, path: &str) -> Result<String, SsrError> {
        // Fresh cache per request: no state is shared across renders.
        let cache = QueryCache::new();
        self.render_with_cache(path, &cache)
    }

    /// Render with a pre-populated cache (data fetched ahead of rendering).
    pub fn render_with_cache(&self, path: &str, cache: &QueryCache) -> Result<String, SsrError> {
        let dehydrated = cache.dehydrate()?;
        let app_html = render_app_shell();

        let mut ctx = Context::new(self.options.clone());
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html lang=\"en\">");
        ctx.indent();

        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
        for line in meta_tag_lines(path, &self.options.base_url) {
            ctx.add_line(&line);
        }
        if let Some(block) = structured_data(path) {
            ctx.add_line(&block);
        }
        self.add_critical_css(&mut ctx);
        ctx.add_line("<link rel=\"icon\" type=\"image/svg+xml\" href=\"/favicon.svg\">");
        self.add_bootstrap_script(&mut ctx, &dehydrated);
        ctx.dedent();
        ctx.add_line("</head>");

        ctx.add_line("<body>");
        ctx.indent();
        ctx.add_line(&format!("<div id=\"root\">{}</div>", app_html));
        ctx.add_line("<script type=\"module\" src=\"/assets/main.js\"></script>");
        ctx.dedent();
        ctx.add_line("</body>");

        ctx.dedent();
        ctx.add_line("</html>");

        Ok(ctx.get_output())
    }

    fn add_critical_css(&self, ctx: &mut Context) {
        ctx.add_line("<style>");
        ctx.indent();
        ctx.add_block(
            ":root {\n  color-scheme: light dark;\n}\n\
             body {\n  margin: 0;\n  font-family: system-ui, -apple-system, sans-serif;\n  \
             -webkit-font-smoothing: antialiased;\n  -moz-osx-font-smoothing: grayscale;\n}\n\
             #root {\n  min-height: 100vh;\n}\n\
             .preload * {\n  transition: none !important;\n}",
        );
        ctx.dedent();
        ctx.add_line("</style>");
    }

    fn add_bootstrap_script(&self, ctx: &mut Context, dehydrated: &str) {
        ctx.add_line("<script>");
        ctx.indent();
        ctx.add_line(&format!("window.__QUERY_STATE__ = {};", dehydrated));
        ctx.add_line(
            "const theme = localStorage.getItem(\"theme\") || \
             (window.matchMedia(\"(prefers-color-scheme: dark)\").matches ? \"dark\" : \"light\");",
        );
        ctx.add_line("document.documentElement.classList.add(theme);");
        ctx.dedent();
        ctx.add_line("</script>");
    }
}
