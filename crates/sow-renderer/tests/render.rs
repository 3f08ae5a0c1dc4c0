//! End-to-end tests for the SOW rendering pipeline.

use std::collections::HashMap;

use sow_renderer::{SowRenderer, render_markdown};

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

#[test]
fn test_basic_markdown() {
    let result = render_markdown("# Hello World", None);
    assert!(result.contains("<h1>Hello World</h1>"));
}

#[test]
fn test_variable_substitution() {
    let variables = vars(&[("client_name", "Acme Corp")]);
    let result = render_markdown("Hello {{client_name}}", Some(&variables));
    assert!(result.contains("Acme Corp"));
    assert!(!result.contains("{{client_name}}"));
}

#[test]
fn test_unresolved_variable_kept() {
    let result = render_markdown("Hello {{unknown_var}}", None);
    assert!(result.contains("{{unknown_var}}"));
}

#[test]
fn test_inline_variables_block() {
    let md = ":::variables\n\
              client_name: Test Corp\n\
              project_name: Big Project\n\
              :::\n\n\
              Hello {{client_name}}, welcome to {{project_name}}.";
    let result = render_markdown(md, None);
    assert!(result.contains("Test Corp"));
    assert!(result.contains("Big Project"));
}

#[test]
fn test_explicit_vars_override_inline() {
    let md = ":::variables\nclient_name: Inline Corp\n:::\n\nHello {{client_name}}.";
    let variables = vars(&[("client_name", "Override Corp")]);
    let result = render_markdown(md, Some(&variables));
    assert!(result.contains("Override Corp"));
    assert!(!result.contains("Inline Corp"));
}

#[test]
fn test_pricing_block() {
    let md = ":::pricing\n\
              | Item | Cost |\n\
              |------|------|\n\
              | Dev | $100 |\n\
              :::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("sow-pricing"));
    assert!(result.contains("Dev"));
}

#[test]
fn test_pricing_block_summary_calculations() {
    let md = ":::pricing\n\
              | Item | Total |\n\
              |------|------:|\n\
              | Discovery | $200 |\n\
              | Build | $300 |\n\
              Discount: 10%\n\
              Tax: 8%\n\
              :::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("pricing-summary"));
    assert!(result.contains("Subtotal:"));
    assert!(result.contains("Discount (10%)"));
    assert!(result.contains("Tax (8%)"));
    assert!(result.contains("Total:"));
    // $500 - 10% = $450, + 8% tax = $486.00
    assert!(result.contains("$500.00"));
    assert!(result.contains("-$50.00"));
    assert!(result.contains("$36.00"));
    assert!(result.contains("$486.00"));
}

#[test]
fn test_timeline_block() {
    let md = ":::timeline\n- Phase 1: Week 1\n- Phase 2: Week 2\n:::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("sow-timeline"));
    assert!(result.contains("Phase 1"));
}

#[test]
fn test_timeline_block_renders_gantt() {
    let md = ":::timeline\n- Week 1-2: Discovery\n- Week 3-5: Build\n:::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("sow-gantt"));
    assert!(result.contains("gantt-bar"));
    assert!(result.contains("(W1-W2)"));
    assert!(result.contains("(W3-W5)"));
    // Spans normalized across weeks 1-5.
    assert!(result.contains("margin-left:0.00%;width:40.00%;"));
    assert!(result.contains("margin-left:40.00%;width:60.00%;"));
}

#[test]
fn test_timeline_gantt_escapes_labels() {
    let md = ":::timeline\n- Week 1-2: <img src=x onerror=alert(1)>\n:::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn test_signature_block() {
    let md = ":::signature\n\
              Client: John Doe\n\
              Date: 2026-01-01\n\
              ---\n\
              Consultant: Jane Smith\n\
              Date: 2026-01-01\n\
              :::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("sow-signatures"));
    assert!(result.contains("sig-block"));
    assert!(result.contains("John Doe"));
    assert!(result.contains("Jane Smith"));
}

#[test]
fn test_signature_block_escapes_values() {
    let md = ":::signature\nClient: <script>alert(1)</script>\n:::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!result.contains("<script>alert(1)</script>"));
}

#[test]
fn test_tables() {
    let md = "| A | B |\n|---|---|\n| 1 | 2 |\n";
    let result = render_markdown(md, None);
    assert!(result.contains("<table>"));
    assert!(result.contains("<td>"));
}

#[test]
fn test_repeated_custom_blocks_render_independently() {
    let md = ":::pricing\n\
              | Item | Total |\n\
              |---|---:|\n\
              | A | $10 |\n\
              :::\n\n\
              :::pricing\n\
              | Item | Total |\n\
              |---|---:|\n\
              | B | $20 |\n\
              :::\n";
    let result = render_markdown(md, None);
    assert_eq!(result.matches("pricing-summary").count(), 2);
    assert!(result.contains("$10.00"));
    assert!(result.contains("$20.00"));
}

#[test]
fn test_shared_engine_matches_free_function() {
    let engine = SowRenderer::new();
    let md = "# Proposal for {{client_name}}";
    let variables = vars(&[("client_name", "Acme")]);
    assert_eq!(
        engine.render(md, &variables),
        render_markdown(md, Some(&variables))
    );
}

#[test]
fn test_full_document_pipeline() {
    let md = ":::variables\n\
              client_name: Globex\n\
              :::\n\n\
              # SOW for {{client_name}}\n\n\
              :::pricing\n\
              | Item | Total |\n\
              |---|---:|\n\
              | Build | $1000 |\n\
              Tax: 5%\n\
              :::\n\n\
              :::timeline\n\
              - Week 1-4: Build\n\
              :::\n\n\
              :::signature\n\
              Client: {{client_name}}\n\
              :::\n";
    let result = render_markdown(md, None);
    assert!(result.contains("<h1>SOW for Globex</h1>"));
    assert!(result.contains("Tax (5%)"));
    assert!(result.contains("$1050.00"));
    assert!(result.contains("Project Timeline"));
    assert!(result.contains("<span class=\"sig-value\">Globex</span>"));
    assert!(!result.contains(":::"));
}
