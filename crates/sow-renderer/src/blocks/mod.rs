//! Custom `:::` directive dispatch.
//!
//! Each directive type is handled by an independent pattern-match-and-replace
//! pass over the text. Directives do not nest, so the passes are
//! order-independent across types; within a type, every occurrence renders
//! independently. An unterminated directive simply fails to match and flows
//! into the final markdown pass as literal text.

mod pricing;
mod signature;
mod timeline;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::SowRenderer;

static PRICING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):::pricing\s*\n(.*?)\n:::").unwrap());

static TIMELINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):::timeline\s*\n(.*?)\n:::").unwrap());

static SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):::signature\s*\n(.*?)\n:::").unwrap());

/// Replace every directive region with its rendered HTML fragment.
///
/// The `:::variables` directive is consumed earlier in the pipeline and is
/// not matched here.
pub(crate) fn process(engine: &SowRenderer, text: &str) -> String {
    let text = PRICING_RE.replace_all(text, |caps: &Captures<'_>| {
        pricing::render(engine, &caps[1])
    });
    let text = TIMELINE_RE.replace_all(&text, |caps: &Captures<'_>| {
        timeline::render(engine, &caps[1])
    });
    let text = SIGNATURE_RE.replace_all(&text, |caps: &Captures<'_>| signature::render(&caps[1]));
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_directive_passes_through() {
        let engine = SowRenderer::new();
        let out = process(&engine, ":::callout\nhello\n:::");
        assert_eq!(out, ":::callout\nhello\n:::");
    }

    #[test]
    fn test_unterminated_directive_passes_through() {
        let engine = SowRenderer::new();
        let out = process(&engine, ":::pricing\n| A | $1 |");
        assert_eq!(out, ":::pricing\n| A | $1 |");
    }

    #[test]
    fn test_repeated_blocks_render_independently() {
        let engine = SowRenderer::new();
        let out = process(
            &engine,
            ":::pricing\n| A | $10 |\n:::\n\n:::pricing\n| B | $20 |\n:::",
        );
        assert_eq!(out.matches("pricing-summary").count(), 2);
        assert!(out.contains("$10.00"));
        assert!(out.contains("$20.00"));
    }

    #[test]
    fn test_trailing_whitespace_after_directive_name() {
        let engine = SowRenderer::new();
        let out = process(&engine, ":::signature  \nClient: Jo\n:::");
        assert!(out.contains("sow-signatures"));
    }
}
