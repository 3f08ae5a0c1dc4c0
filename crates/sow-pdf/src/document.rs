//! Full-document HTML assembly for PDF conversion.
//!
//! The render service receives a complete HTML document. This module wraps
//! the pre-rendered SOW body in one of three document templates and appends
//! the `@page` rule for the requested paper size.

use std::fmt;
use std::str::FromStr;

/// Paper size for the exported PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// US Letter.
    #[default]
    Letter,
    /// ISO A4.
    A4,
    /// US Legal.
    Legal,
}

impl PageSize {
    /// CSS `size` declaration for the `@page` rule.
    #[must_use]
    pub fn css_size(self) -> &'static str {
        match self {
            Self::Letter => "size: letter;",
            Self::A4 => "size: A4;",
            Self::Legal => "size: legal;",
        }
    }
}

impl FromStr for PageSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Letter" => Ok(Self::Letter),
            "A4" => Ok(Self::A4),
            "Legal" => Ok(Self::Legal),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Letter => "Letter",
            Self::A4 => "A4",
            Self::Legal => "Legal",
        };
        f.write_str(name)
    }
}

/// Visual style applied to the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentTemplate {
    /// Sans-serif with a colored accent bar.
    #[default]
    Modern,
    /// Serif with centered headings.
    Classic,
    /// Unadorned, near-plain output.
    Minimal,
}

impl FromStr for DocumentTemplate {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modern" => Ok(Self::Modern),
            "classic" => Ok(Self::Classic),
            "minimal" => Ok(Self::Minimal),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DocumentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
        };
        f.write_str(name)
    }
}

impl DocumentTemplate {
    fn base_css(self, brand_color: &str) -> String {
        match self {
            Self::Modern => format!(
                "body {{ font-family: 'Helvetica Neue', Arial, sans-serif; \
                 color: #1f2937; line-height: 1.6; }}\n\
                 h1 {{ color: {brand_color}; border-bottom: 3px solid {brand_color}; \
                 padding-bottom: 0.3em; }}\n\
                 h2, h3 {{ color: {brand_color}; }}\n\
                 table {{ border-collapse: collapse; width: 100%; }}\n\
                 th {{ background: {brand_color}; color: #ffffff; padding: 6px 10px; }}\n\
                 td {{ border-bottom: 1px solid #e5e7eb; padding: 6px 10px; }}"
            ),
            Self::Classic => format!(
                "body {{ font-family: Georgia, 'Times New Roman', serif; \
                 color: #111111; line-height: 1.7; }}\n\
                 h1 {{ text-align: center; color: {brand_color}; }}\n\
                 h2 {{ border-bottom: 1px solid #999999; }}\n\
                 table {{ border-collapse: collapse; width: 100%; }}\n\
                 th, td {{ border: 1px solid #999999; padding: 6px 10px; }}"
            ),
            Self::Minimal => "body { font-family: Arial, sans-serif; color: #000000; \
                 line-height: 1.5; }\n\
                 table { border-collapse: collapse; width: 100%; }\n\
                 th, td { border-bottom: 1px solid #cccccc; padding: 4px 8px; }"
                .to_owned(),
        }
    }
}

/// Options for document assembly.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Visual style.
    pub template: DocumentTemplate,
    /// Paper size.
    pub page_size: PageSize,
    /// Primary brand color as a hex code.
    pub brand_color: String,
    /// Optional company logo URL rendered in the document header.
    pub logo_url: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            template: DocumentTemplate::default(),
            page_size: PageSize::default(),
            brand_color: "#2563eb".to_owned(),
            logo_url: None,
        }
    }
}

/// Wrap a pre-rendered SOW body in a complete HTML document.
#[must_use]
pub fn build_document(body: &str, options: &DocumentOptions) -> String {
    let page_css = format!(
        "@page {{ {} margin: 2cm; }}",
        options.page_size.css_size()
    );
    let base_css = options.template.base_css(&options.brand_color);
    let shared_css = "\
        .sow-gantt .gantt-row { margin: 2px 0; }\n\
        .gantt-bar { border-radius: 3px; }\n\
        .sig-line { border-bottom: 1px solid #000000; height: 2em; margin-top: 0.5em; }\n\
        .sig-block { margin: 1.5em 0; page-break-inside: avoid; }";
    let logo = options
        .logo_url
        .as_deref()
        .map(|url| format!("<img class=\"doc-logo\" src=\"{url}\" alt=\"logo\">\n"))
        .unwrap_or_default();
    let gantt_bar_css = format!(
        ".gantt-bar {{ background: {}; height: 1.2em; }}",
        options.brand_color
    );

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\n{page_css}\n{base_css}\n{shared_css}\n{gantt_bar_css}\n</style>\n\
         </head>\n<body>\n{logo}{body}\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_size_css() {
        assert_eq!(PageSize::Letter.css_size(), "size: letter;");
        assert_eq!(PageSize::A4.css_size(), "size: A4;");
        assert_eq!(PageSize::Legal.css_size(), "size: legal;");
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("A4".parse(), Ok(PageSize::A4));
        assert!("Tabloid".parse::<PageSize>().is_err());
    }

    #[test]
    fn test_template_parse() {
        assert_eq!("classic".parse(), Ok(DocumentTemplate::Classic));
        assert!("brutalist".parse::<DocumentTemplate>().is_err());
    }

    #[test]
    fn test_document_contains_body_and_page_rule() {
        let html = build_document("<h1>SOW</h1>", &DocumentOptions::default());
        assert!(html.contains("<h1>SOW</h1>"));
        assert!(html.contains("@page { size: letter; margin: 2cm; }"));
        assert!(html.contains("#2563eb"));
        assert!(!html.contains("doc-logo"));
    }

    #[test]
    fn test_document_includes_logo_when_set() {
        let options = DocumentOptions {
            logo_url: Some("https://example.com/logo.png".to_owned()),
            ..DocumentOptions::default()
        };
        let html = build_document("<p>body</p>", &options);
        assert!(html.contains("https://example.com/logo.png"));
    }
}
