//! Signature directive rendering.
//!
//! The block body splits on `---` separators into one sub-block per signer.
//! Within a sub-block, `label: value` lines render as labeled fields with a
//! signature underline; other lines render as plain text. Every piece of
//! author text is HTML-escaped before emission - this block renders
//! user-controlled strings directly into the document and was the historical
//! XSS surface.

use crate::escape::escape_html;

pub(crate) fn render(content: &str) -> String {
    let body: String = signer_blocks(content)
        .iter()
        .map(|lines| build_block(lines))
        .collect();
    format!("<div class=\"sow-signatures\">\n{body}</div>")
}

/// Split the content on `---` separators into per-signer line groups.
/// Sections containing only whitespace are dropped.
fn signer_blocks(content: &str) -> Vec<Vec<String>> {
    content
        .trim()
        .split("---")
        .map(|section| {
            section
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .filter(|lines| !lines.is_empty())
        .collect()
}

fn build_block(lines: &[String]) -> String {
    let fields: String = lines.iter().map(|line| render_line(line)).collect();
    format!("<div class=\"sig-block\">\n{fields}</div>\n")
}

fn render_line(line: &str) -> String {
    let Some((label, value)) = line.split_once(':') else {
        return format!("  <p>{}</p>\n", escape_html(line));
    };
    format!(
        "  <div class=\"sig-field\">\
         <span class=\"sig-label\">{}:</span> \
         <span class=\"sig-value\">{}</span>\
         <div class=\"sig-line\"></div>\
         </div>\n",
        escape_html(label.trim()),
        escape_html(value.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_signers_split_on_separator() {
        let html = render("Client: John Doe\nDate: 2026-01-01\n---\nConsultant: Jane Smith");
        assert_eq!(html.matches("sig-block").count(), 2);
        assert!(html.contains("John Doe"));
        assert!(html.contains("Jane Smith"));
    }

    #[test]
    fn test_label_value_field_shape() {
        let html = render("Client: John Doe");
        assert!(html.contains("<span class=\"sig-label\">Client:</span>"));
        assert!(html.contains("<span class=\"sig-value\">John Doe</span>"));
        assert!(html.contains("<div class=\"sig-line\"></div>"));
    }

    #[test]
    fn test_plain_line_renders_as_paragraph() {
        let html = render("Sign below to accept the terms.");
        assert!(html.contains("  <p>Sign below to accept the terms.</p>\n"));
    }

    #[test]
    fn test_value_split_on_first_colon_only() {
        let html = render("Time: 10:30");
        assert!(html.contains("<span class=\"sig-label\">Time:</span>"));
        assert!(html.contains("<span class=\"sig-value\">10:30</span>"));
    }

    #[test]
    fn test_empty_sections_dropped() {
        let html = render("Client: Jo\n---\n   \n---\nConsultant: Al");
        assert_eq!(html.matches("sig-block").count(), 2);
    }

    #[test]
    fn test_script_payload_is_escaped() {
        let html = render("Client: <script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_quotes_and_ampersands_escaped() {
        let html = render("Note: \"A & B\" <ok>");
        assert!(html.contains("&quot;A &amp; B&quot; &lt;ok&gt;"));
    }
}
