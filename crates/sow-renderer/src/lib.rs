//! Markdown rendering engine with SOW directive extensions.
//!
//! Statement-of-work documents are authored in a markdown dialect with
//! `{{variable}}` placeholders and four fenced directives:
//!
//! - `:::variables` - inline `key: value` definitions consumed before rendering
//! - `:::pricing` - pricing table with computed subtotal/discount/tax/total
//! - `:::timeline` - milestone list with a proportional Gantt visualization
//! - `:::signature` - signer blocks with labeled signature lines
//!
//! Everything outside directive syntax is plain CommonMark (with tables) and
//! is delegated to pulldown-cmark.
//!
//! # Pipeline
//!
//! 1. Extract `:::variables` blocks and remove them from the text.
//! 2. Substitute `{{name}}` placeholders (explicit variables override inline).
//! 3. Replace each directive region with its rendered HTML fragment.
//! 4. Render the resulting text as markdown; the injected fragments pass
//!    through the final pass as raw HTML.
//!
//! Malformed input degrades silently: unterminated directives, unparseable
//! amounts, and unresolved placeholders all pass through or default to zero
//! rather than erroring. The rendering is a pure function of its inputs, so a
//! single [`SowRenderer`] can be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use sow_renderer::SowRenderer;
//!
//! let vars = HashMap::from([("client_name".to_owned(), "Acme Corp".to_owned())]);
//! let html = SowRenderer::new().render("Hello {{client_name}}", &vars);
//! assert!(html.contains("Acme Corp"));
//! ```

mod blocks;
mod escape;
mod variables;

use std::collections::HashMap;

use pulldown_cmark::{Options, Parser};

pub use escape::escape_html;

/// Stateless rendering engine for SOW markdown.
///
/// Holds the one-time parser configuration (table support). Construct once at
/// startup and share by reference; every call to [`render`](Self::render)
/// depends only on its arguments.
pub struct SowRenderer {
    options: Options,
}

impl SowRenderer {
    /// Create a renderer with table support enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES,
        }
    }

    /// Render SOW markdown to HTML.
    ///
    /// Explicit `variables` override values defined in inline `:::variables`
    /// blocks. Unresolved `{{placeholders}}` are left verbatim in the output.
    #[must_use]
    pub fn render(&self, text: &str, variables: &HashMap<String, String>) -> String {
        let (text, inline_vars) = variables::extract_inline_variables(text);

        // Merge: explicit variables win on key collision.
        let mut merged = inline_vars;
        merged.extend(variables.iter().map(|(k, v)| (k.clone(), v.clone())));

        let text = variables::substitute(&text, &merged);
        let text = blocks::process(self, &text);
        self.render_fragment(&text)
    }

    /// Render a markdown fragment (also used for content inside directives).
    pub(crate) fn render_fragment(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, self.options);
        let mut html = String::with_capacity(text.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, parser);
        html
    }
}

impl Default for SowRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render SOW markdown to HTML with a freshly constructed engine.
///
/// Convenience entry point for one-shot rendering; long-lived callers should
/// construct a [`SowRenderer`] once and reuse it.
#[must_use]
pub fn render_markdown(text: &str, variables: Option<&HashMap<String, String>>) -> String {
    let engine = SowRenderer::new();
    match variables {
        Some(vars) => engine.render(text, vars),
        None => engine.render(text, &HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("# Hello World", None);
        assert!(html.contains("<h1>Hello World</h1>"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render_markdown("| A | B |\n|---|---|\n| 1 | 2 |\n", None);
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        // Directive renderers emit literal HTML that the final markdown pass
        // must not re-escape.
        let html = render_markdown("<div class=\"sow-pricing\">\nx\n</div>", None);
        assert!(html.contains("<div class=\"sow-pricing\">"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let md = ":::pricing\n| Dev | $100 |\n:::\n";
        assert_eq!(render_markdown(md, None), render_markdown(md, None));
    }
}
