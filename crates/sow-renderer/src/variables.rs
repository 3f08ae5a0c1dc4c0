//! Inline variable extraction and placeholder substitution.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VARIABLES_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):::variables\s*\n(.*?)\n:::").unwrap());

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap());

/// Extract `:::variables` blocks, returning the text with the blocks removed
/// and the parsed `key: value` mapping.
///
/// Each non-empty content line containing `:` is split on the first colon,
/// both sides trimmed. Lines without a colon are ignored. When multiple
/// blocks define the same key, the last occurrence wins.
pub(crate) fn extract_inline_variables(text: &str) -> (String, HashMap<String, String>) {
    let mut vars = HashMap::new();

    let stripped = VARIABLES_BLOCK_RE.replace_all(text, |caps: &Captures<'_>| {
        for line in caps[1].lines() {
            if let Some((key, value)) = line.trim().split_once(':') {
                vars.insert(key.trim().to_owned(), value.trim().to_owned());
            }
        }
        ""
    });

    (stripped.into_owned(), vars)
}

/// Replace `{{name}}` placeholders with values from `variables`.
///
/// Unresolved placeholders are preserved verbatim, brace syntax included.
/// Substituted values are not re-scanned, so substitution never recurses.
pub(crate) fn substitute(text: &str, variables: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            variables
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned()
}
