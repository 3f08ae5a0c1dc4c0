//! Timeline directive rendering with a proportional Gantt view.
//!
//! Bullet entries of the form `Week 1-2: Discovery` (or single-week
//! `Week 3: Launch`) are parsed from the raw content; each entry becomes a
//! horizontal bar positioned proportionally across the full min-to-max week
//! span. Lines that match neither pattern are skipped.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::SowRenderer;
use crate::escape::escape_html;

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+").unwrap());

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:week|wk)?\s*(\d+)\s*-\s*(\d+)\s*:\s*(.+)$").unwrap());

static POINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:week|wk)?\s*(\d+)\s*:\s*(.+)$").unwrap());

struct TimelineEntry {
    start: i64,
    end: i64,
    label: String,
}

pub(crate) fn render(engine: &SowRenderer, content: &str) -> String {
    let rendered = engine.render_fragment(content);
    let gantt = build_gantt(content);
    format!("<div class=\"sow-timeline\">\n<h3>Project Timeline</h3>\n{rendered}\n{gantt}\n</div>")
}

/// Parse a bullet entry, trying the week-range form before the single-week
/// form. `start > end` is not validated; out-of-order ranges keep their
/// authored values (and may render with negative widths).
fn parse_entry(entry: &str) -> Option<TimelineEntry> {
    if let Some(caps) = RANGE_RE.captures(entry) {
        return Some(TimelineEntry {
            start: caps[1].parse().ok()?,
            end: caps[2].parse().ok()?,
            label: caps[3].trim().to_owned(),
        });
    }

    let caps = POINT_RE.captures(entry)?;
    let week = caps[1].parse().ok()?;
    Some(TimelineEntry {
        start: week,
        end: week,
        label: caps[2].trim().to_owned(),
    })
}

fn parse_entries(content: &str) -> Vec<TimelineEntry> {
    let mut entries = Vec::new();
    for raw_line in content.lines() {
        let line = raw_line.trim();
        if !BULLET_RE.is_match(line) {
            continue;
        }
        let entry = BULLET_RE.replace(line, "");
        if let Some(parsed) = parse_entry(&entry) {
            entries.push(parsed);
        }
    }
    entries
}

/// Min start and total span, with the span clamped to at least 1 to guard
/// against division by zero.
fn timeline_span(entries: &[TimelineEntry]) -> (i64, i64) {
    let min_start = entries.iter().map(|e| e.start).min().unwrap_or(0);
    let max_end = entries.iter().map(|e| e.end).max().unwrap_or(0);
    (min_start, (max_end - min_start + 1).max(1))
}

#[allow(clippy::cast_precision_loss)]
fn render_gantt_row(entry: &TimelineEntry, min_start: i64, span: i64) -> String {
    let offset = ((entry.start - min_start) as f64 / span as f64) * 100.0;
    let width = ((entry.end - entry.start + 1) as f64 / span as f64) * 100.0;
    format!(
        "<div class=\"gantt-row\">\
         <div class=\"gantt-label\">{} <span class=\"muted\">(W{}-W{})</span></div>\
         <div class=\"gantt-track\">\
         <div class=\"gantt-bar\" style=\"margin-left:{offset:.2}%;width:{width:.2}%;\"></div>\
         </div>\
         </div>",
        escape_html(&entry.label),
        entry.start,
        entry.end
    )
}

/// Build the Gantt visualization, or an empty string when no entries parse.
fn build_gantt(content: &str) -> String {
    let entries = parse_entries(content);
    if entries.is_empty() {
        return String::new();
    }

    let (min_start, span) = timeline_span(&entries);

    let mut html = String::from("<div class=\"sow-gantt\"><h4>Gantt View</h4>");
    for entry in &entries {
        let _ = write!(html, "{}", render_gantt_row(entry, min_start, span));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(text: &str) -> TimelineEntry {
        parse_entry(text).expect("entry should parse")
    }

    #[test]
    fn test_parse_range_entry() {
        let e = entry("Week 1-2: Discovery");
        assert_eq!((e.start, e.end), (1, 2));
        assert_eq!(e.label, "Discovery");
    }

    #[test]
    fn test_parse_point_entry() {
        let e = entry("Week 3: Launch");
        assert_eq!((e.start, e.end), (3, 3));
        assert_eq!(e.label, "Launch");
    }

    #[test]
    fn test_parse_wk_prefix_and_no_prefix() {
        assert_eq!(entry("wk 4-6: Build").start, 4);
        assert_eq!(entry("2-3: QA").end, 3);
    }

    #[test]
    fn test_unparseable_entry_skipped() {
        assert!(parse_entry("sometime soon: Launch").is_none());
        let entries = parse_entries("- not a milestone\n- Week 1: Kickoff");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_non_bullet_lines_ignored() {
        let entries = parse_entries("Week 1: Kickoff\n- Week 2: Build");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start, 2);
    }

    #[test]
    fn test_span_guards_single_week() {
        let entries = parse_entries("- Week 3: Launch");
        assert_eq!(timeline_span(&entries), (3, 1));
    }

    #[test]
    fn test_proportional_offsets_and_widths() {
        let gantt = build_gantt("- Week 1-2: Discovery\n- Week 3-5: Build");
        assert!(gantt.contains("margin-left:0.00%;width:40.00%;"));
        assert!(gantt.contains("margin-left:40.00%;width:60.00%;"));
        assert!(gantt.contains("(W1-W2)"));
        assert!(gantt.contains("(W3-W5)"));
    }

    #[test]
    fn test_empty_timeline_emits_nothing() {
        assert_eq!(build_gantt("no bullets here"), "");
    }

    #[test]
    fn test_labels_are_escaped() {
        let gantt = build_gantt("- Week 1-2: <img src=x onerror=alert(1)>");
        assert!(gantt.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!gantt.contains("<img"));
    }

    #[test]
    fn test_out_of_order_range_preserved() {
        // start > end is not validated; the bar math yields a negative width
        // rather than a crash.
        let gantt = build_gantt("- Week 5-2: Backwards");
        assert!(gantt.contains("(W5-W2)"));
        assert!(gantt.contains("width:-"));
    }
}
