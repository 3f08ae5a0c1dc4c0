//! Pricing directive rendering with computed totals.
//!
//! The block content is rendered as markdown (so the author's table becomes
//! an HTML table) and then re-scanned line by line in its raw form to compute
//! the summary: table rows contribute their trailing cell as a monetary
//! amount, `Discount:`/`Tax:` lines set percentages, and everything else is
//! ignored. Discount applies to the raw subtotal; tax applies to the
//! discounted amount.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::SowRenderer;

static DISCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^discount\s*:").unwrap());

static TAX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^tax\s*:").unwrap());

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").unwrap());

/// Table separator rows like `|---|---:|`.
static SEPARATOR_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|?[-:|\s]+\|?\s*$").unwrap());

pub(crate) fn render(engine: &SowRenderer, content: &str) -> String {
    let rendered = engine.render_fragment(content);
    let summary = build_summary(content);
    format!("<div class=\"sow-pricing\">\n{rendered}\n{summary}\n</div>")
}

struct PricingScan {
    subtotal: f64,
    discount_pct: f64,
    tax_pct: f64,
}

fn scan_values(content: &str) -> PricingScan {
    let mut scan = PricingScan {
        subtotal: 0.0,
        discount_pct: 0.0,
        tax_pct: 0.0,
    };

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if let Some(pct) = extract_percent(line, &DISCOUNT_RE) {
            scan.discount_pct = pct;
            continue;
        }
        if let Some(pct) = extract_percent(line, &TAX_RE) {
            scan.tax_pct = pct;
            continue;
        }
        if let Some(amount) = extract_table_amount(line) {
            scan.subtotal += amount;
        }
    }

    scan
}

/// Extract a percentage from a `discount:`/`tax:` line as the first numeric
/// token. A matching prefix without a number yields `None` and the line falls
/// through to row parsing.
fn extract_percent(line: &str, prefix: &Regex) -> Option<f64> {
    if !prefix.is_match(line) {
        return None;
    }
    NUMBER_RE.find(line)?.as_str().parse().ok()
}

/// Extract the monetary amount from a markdown table row.
///
/// Separator rows, rows with fewer than two cells, and rows whose first cell
/// contains "total" (case-insensitive, substring - "Subtotal" counts) are
/// skipped.
fn extract_table_amount(line: &str) -> Option<f64> {
    if !line.contains('|') || SEPARATOR_ROW_RE.is_match(line) {
        return None;
    }

    let cells: Vec<&str> = line
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();
    if cells.len() < 2 {
        return None;
    }
    if cells[0].to_lowercase().contains("total") {
        return None;
    }

    parse_money(cells[cells.len() - 1])
}

/// Parse a cell as money by stripping everything except digits, `.` and `-`.
fn parse_money(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Shortest percent representation: whole numbers drop the decimal point.
fn format_percent(pct: f64) -> String {
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        format!("{pct}")
    }
}

#[allow(clippy::float_cmp)]
fn build_summary(content: &str) -> String {
    let scan = scan_values(content);
    let discount_amount = scan.subtotal * (scan.discount_pct / 100.0);
    let discounted = scan.subtotal - discount_amount;
    let tax_amount = discounted * (scan.tax_pct / 100.0);
    let grand_total = discounted + tax_amount;

    let mut html = format!(
        "<div class=\"pricing-summary\"><div><strong>Subtotal:</strong> {}</div>",
        format_money(scan.subtotal)
    );
    if scan.discount_pct != 0.0 {
        let _ = write!(
            html,
            "<div><strong>Discount ({}%):</strong> -{}</div>",
            format_percent(scan.discount_pct),
            format_money(discount_amount)
        );
    }
    if scan.tax_pct != 0.0 {
        let _ = write!(
            html,
            "<div><strong>Tax ({}%):</strong> {}</div>",
            format_percent(scan.tax_pct),
            format_money(tax_amount)
        );
    }
    let _ = write!(
        html,
        "<div class=\"pricing-grand-total\"><strong>Total:</strong> {}</div></div>",
        format_money(grand_total)
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_money_strips_currency_noise() {
        assert_eq!(parse_money("$1,200.50"), Some(1200.50));
        assert_eq!(parse_money("USD 300"), Some(300.0));
        assert_eq!(parse_money("-$50"), Some(-50.0));
    }

    #[test]
    fn test_parse_money_unparseable_is_none() {
        assert_eq!(parse_money("TBD"), None);
        assert_eq!(parse_money(""), None);
        assert_eq!(parse_money("1.2.3"), None);
    }

    #[test]
    fn test_separator_rows_skipped() {
        assert_eq!(extract_table_amount("|------|------:|"), None);
        assert_eq!(extract_table_amount("| --- | --- |"), None);
    }

    #[test]
    fn test_total_rows_skipped_by_substring() {
        assert_eq!(extract_table_amount("| Total | $500 |"), None);
        assert_eq!(extract_table_amount("| Subtotal | $500 |"), None);
        assert_eq!(extract_table_amount("| TOTAL COST | $500 |"), None);
    }

    #[test]
    fn test_row_amount_from_last_cell() {
        assert_eq!(extract_table_amount("| Dev | 10 hrs | $1,500 |"), Some(1500.0));
    }

    #[test]
    fn test_single_cell_rows_skipped() {
        assert_eq!(extract_table_amount("| lonely |"), None);
    }

    #[test]
    fn test_extract_percent_case_insensitive() {
        assert_eq!(extract_percent("DISCOUNT: 12.5%", &DISCOUNT_RE), Some(12.5));
        assert_eq!(extract_percent("tax : 8", &TAX_RE), Some(8.0));
        assert_eq!(extract_percent("| Discount | 10 |", &DISCOUNT_RE), None);
    }

    #[test]
    fn test_format_percent_whole_vs_fractional() {
        assert_eq!(format_percent(10.0), "10");
        assert_eq!(format_percent(7.5), "7.5");
    }

    #[test]
    fn test_discount_then_tax_ordering() {
        let content = "| Discovery | $200 |\n| Build | $300 |\nDiscount: 10%\nTax: 8%";
        let summary = build_summary(content);
        assert!(summary.contains("<strong>Subtotal:</strong> $500.00"));
        assert!(summary.contains("Discount (10%):</strong> -$50.00"));
        assert!(summary.contains("Tax (8%):</strong> $36.00"));
        assert!(summary.contains("<strong>Total:</strong> $486.00"));
    }

    #[test]
    fn test_empty_block_renders_zero_summary() {
        let summary = build_summary("");
        assert!(summary.contains("<strong>Subtotal:</strong> $0.00"));
        assert!(summary.contains("<strong>Total:</strong> $0.00"));
        assert!(!summary.contains("Discount"));
        assert!(!summary.contains("Tax"));
    }

    #[test]
    fn test_unparseable_amount_contributes_nothing() {
        let summary = build_summary("| Dev | $100 |\n| Design | TBD |");
        assert!(summary.contains("<strong>Subtotal:</strong> $100.00"));
    }
}
