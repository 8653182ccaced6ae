//! HTML rendering for the accessibility report.
//!
//! Produces one self-contained document. Chart.js is the only external
//! reference; styles, chart specifications and violation detail are inline.

use super::stats::SeverityStats;
use super::violation::{AffectedNode, Impact, PageViolationGroup, ViolationRecord};
use chrono::{DateTime, TimeZone};
use serde_json::json;
use std::borrow::Cow;
use std::fmt::Display;

/// Nodes shown per violation
pub const MAX_NODES_SHOWN: usize = 3;

/// Markup snippets longer than this are cut
pub const SNIPPET_MAX_CHARS: usize = 150;

/// Appended to a cut snippet
pub const TRUNCATION_MARKER: &str = "...";

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";

const PAGE_BAR_COLOR: &str = "#5a67d8";

/// Escape `& < > " '` for HTML text and attribute values
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Cut a markup snippet to [`SNIPPET_MAX_CHARS`] characters.
///
/// Returns the (possibly shortened) text and whether it was cut.
#[must_use]
pub fn truncate_snippet(html: &str) -> (&str, bool) {
    match html.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((byte_index, _)) => (&html[..byte_index], true),
        None => (html, false),
    }
}

/// Colour used for an impact level in cards and charts
#[must_use]
pub const fn impact_color(impact: Impact) -> &'static str {
    match impact {
        Impact::Critical => "#e53e3e",
        Impact::Serious => "#dd6b20",
        Impact::Moderate => "#d69e2e",
        Impact::Minor => "#38a169",
    }
}

/// Chart.js configuration for the severity doughnut
#[must_use]
pub fn severity_chart_spec(stats: &SeverityStats) -> serde_json::Value {
    json!({
        "type": "doughnut",
        "data": {
            "labels": Impact::ALL.iter().map(|i| i.label()).collect::<Vec<_>>(),
            "datasets": [{
                "data": Impact::ALL.iter().map(|i| stats.count(*i)).collect::<Vec<_>>(),
                "backgroundColor": Impact::ALL.iter().map(|i| impact_color(*i)).collect::<Vec<_>>(),
                "borderWidth": 0
            }]
        },
        "options": {
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } }
        }
    })
}

/// Chart.js configuration for violations per page, in insertion order
#[must_use]
pub fn page_chart_spec(groups: &[PageViolationGroup]) -> serde_json::Value {
    json!({
        "type": "bar",
        "data": {
            "labels": groups.iter().map(|g| g.page.as_str()).collect::<Vec<_>>(),
            "datasets": [{
                "label": "Violations",
                "data": groups.iter().map(PageViolationGroup::len).collect::<Vec<_>>(),
                "backgroundColor": PAGE_BAR_COLOR,
                "borderRadius": 4
            }]
        },
        "options": {
            "responsive": true,
            "plugins": { "legend": { "display": false } },
            "scales": { "y": { "beginAtZero": true, "ticks": { "stepSize": 1 } } }
        }
    })
}

/// JSON safe to place inside a `<script>` element
fn script_json(value: &serde_json::Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Render the full report document
#[must_use]
pub fn render_report<Tz>(
    test_label: &str,
    groups: &[PageViolationGroup],
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stats = SeverityStats::from_groups(groups);
    let label = escape_html(test_label);
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("  <title>Accessibility Report - {label}</title>\n"));
    html.push_str(&format!("  <script src=\"{CHART_JS_CDN}\"></script>\n"));
    html.push_str("  <style>\n");
    html.push_str(STYLESHEET);
    html.push_str("  </style>\n</head>\n<body>\n");

    html.push_str(&format!(
        r#"  <header class="header">
    <h1>&#9855; Accessibility Report</h1>
    <div class="test-name">{label}</div>
    <div class="timestamp">Generated: {}</div>
  </header>
"#,
        generated_at.format("%B %-d, %Y %-I:%M:%S %p")
    ));

    html.push_str("  <main class=\"container\">\n");
    render_summary_cards(&mut html, &stats);

    if stats.is_clean() {
        html.push_str(
            r#"    <section class="no-violations">
      <div class="icon">&#9989;</div>
      <h2>No Accessibility Violations Found!</h2>
      <p>All scanned pages passed accessibility checks.</p>
    </section>
"#,
        );
    } else {
        html.push_str(
            r#"    <section class="charts-section">
      <div class="chart-container">
        <h2>Violations by Severity</h2>
        <canvas id="severityChart"></canvas>
      </div>
      <div class="chart-container">
        <h2>Violations by Page</h2>
        <canvas id="pageChart"></canvas>
      </div>
    </section>
    <section class="violations-section">
"#,
        );
        for group in groups {
            render_page(&mut html, group);
        }
        html.push_str("    </section>\n");
    }
    html.push_str("  </main>\n");

    html.push_str(
        r#"  <footer class="footer">
    Powered by axe-core | Learn more at <a href="https://www.deque.com/axe/" target="_blank" rel="noopener">deque.com/axe</a>
  </footer>
"#,
    );

    if !stats.is_clean() {
        html.push_str("  <script>\n");
        html.push_str(&format!(
            "    new Chart(document.getElementById('severityChart'), {});\n",
            script_json(&severity_chart_spec(&stats))
        ));
        html.push_str(&format!(
            "    new Chart(document.getElementById('pageChart'), {});\n",
            script_json(&page_chart_spec(groups))
        ));
        html.push_str("  </script>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_summary_cards(html: &mut String, stats: &SeverityStats) {
    html.push_str("    <section class=\"summary-grid\">\n");
    push_card(html, "total", "Total Violations", stats.total);
    for impact in Impact::ALL {
        push_card(html, impact.as_str(), impact.label(), stats.count(impact));
    }
    html.push_str("    </section>\n");
}

fn push_card(html: &mut String, class: &str, label: &str, value: usize) {
    html.push_str(&format!(
        r#"      <div class="summary-card {class}">
        <div class="label">{label}</div>
        <div class="value">{value}</div>
      </div>
"#
    ));
}

fn render_page(html: &mut String, group: &PageViolationGroup) {
    let count = group.len();
    let plural = if count == 1 { "" } else { "s" };
    html.push_str(&format!(
        r#"      <details class="page-block">
        <summary class="page-header">
          <h3>&#128196; {} <span class="page-badge">{count} violation{plural}</span></h3>
        </summary>
        <div class="page-content">
"#,
        escape_html(&group.page)
    ));
    for violation in &group.violations {
        render_violation(html, violation);
    }
    html.push_str("        </div>\n      </details>\n");
}

fn render_violation(html: &mut String, violation: &ViolationRecord) {
    let impact = violation.impact.as_str();
    html.push_str(&format!(
        r#"          <article class="violation-item">
            <div class="violation-header">
              <div class="violation-title">
                <h4>{help}</h4>
                <div class="violation-id">{id}</div>
              </div>
              <span class="impact-badge impact-{impact}">{impact}</span>
            </div>
            <div class="violation-description">{description}</div>
            <div class="violation-meta"><strong>Affected Elements:</strong> {node_count}</div>
            <a href="{url}" target="_blank" rel="noopener" class="learn-more">Learn more about this rule &rarr;</a>
"#,
        help = escape_html(&violation.help),
        id = escape_html(&violation.id),
        description = escape_html(&violation.description),
        node_count = violation.nodes.len(),
        url = escape_html(&violation.help_url),
    ));

    if !violation.nodes.is_empty() {
        let shown = violation.nodes.len().min(MAX_NODES_SHOWN);
        html.push_str(&format!(
            "            <div class=\"affected-elements\">\n              <h5>Affected Elements (showing first {shown})</h5>\n"
        ));
        for node in violation.nodes.iter().take(MAX_NODES_SHOWN) {
            render_node(html, node);
        }
        let hidden = violation.nodes.len() - shown;
        if hidden > 0 {
            html.push_str(&format!(
                "              <div class=\"more-elements\">&hellip; and {hidden} more not shown</div>\n"
            ));
        }
        html.push_str("            </div>\n");
    }
    html.push_str("          </article>\n");
}

fn render_node(html: &mut String, node: &AffectedNode) {
    let (snippet, cut) = truncate_snippet(&node.html);
    html.push_str(&format!(
        r#"              <div class="element-item">
                <div class="element-target">{}</div>
                <div class="element-html">{}{}</div>
              </div>
"#,
        escape_html(&node.target_path()),
        escape_html(snippet),
        if cut { TRUNCATION_MARKER } else { "" }
    ));
}

const STYLESHEET: &str = r"    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #2d3748; background: #f4f5f7; }
    .header { background: linear-gradient(135deg, #5a67d8 0%, #6b46c1 100%); color: #fff; padding: 2rem; }
    .header h1 { font-size: 2rem; }
    .header .test-name { font-size: 1.1rem; opacity: 0.9; }
    .header .timestamp { font-size: 0.9rem; opacity: 0.8; margin-top: 0.5rem; }
    .container { max-width: 1400px; margin: 0 auto; padding: 2rem; }
    .summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1.5rem; margin-bottom: 2rem; }
    .summary-card { background: #fff; padding: 1.5rem; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08); border-left: 4px solid #5a67d8; }
    .summary-card.critical { border-left-color: #e53e3e; }
    .summary-card.serious { border-left-color: #dd6b20; }
    .summary-card.moderate { border-left-color: #d69e2e; }
    .summary-card.minor { border-left-color: #38a169; }
    .summary-card .label { font-size: 0.875rem; text-transform: uppercase; letter-spacing: 0.05em; color: #718096; }
    .summary-card .value { font-size: 2.5rem; font-weight: bold; }
    .charts-section { display: grid; grid-template-columns: repeat(auto-fit, minmax(400px, 1fr)); gap: 2rem; margin-bottom: 2rem; }
    .chart-container { background: #fff; padding: 1.5rem; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08); }
    .page-block { background: #fff; border-radius: 8px; margin-bottom: 1.5rem; box-shadow: 0 2px 8px rgba(0,0,0,0.08); overflow: hidden; }
    .page-header { background: #f7fafc; padding: 1.5rem; cursor: pointer; border-bottom: 2px solid #e2e8f0; }
    .page-header h3 { display: inline-flex; align-items: center; gap: 0.75rem; font-size: 1.25rem; }
    .page-badge { background: #5a67d8; color: #fff; padding: 0.25rem 0.75rem; border-radius: 12px; font-size: 0.875rem; }
    .violation-item { padding: 1.5rem; border-bottom: 1px solid #e2e8f0; }
    .violation-header { display: flex; justify-content: space-between; align-items: start; margin-bottom: 1rem; }
    .violation-id, .element-target, .element-html { font-family: 'Courier New', monospace; }
    .violation-id { font-size: 0.875rem; color: #718096; }
    .impact-badge { padding: 0.375rem 0.75rem; border-radius: 4px; font-size: 0.875rem; font-weight: 600; text-transform: uppercase; }
    .impact-critical { background: #fed7d7; color: #c53030; }
    .impact-serious { background: #feebc8; color: #c05621; }
    .impact-moderate { background: #fefcbf; color: #b7791f; }
    .impact-minor { background: #c6f6d5; color: #22543d; }
    .violation-meta { font-size: 0.875rem; color: #718096; margin-top: 1rem; }
    .learn-more { display: inline-block; margin-top: 0.75rem; color: #5a67d8; font-size: 0.875rem; }
    .affected-elements { margin-top: 1rem; padding: 1rem; background: #f7fafc; border-left: 3px solid #cbd5e0; }
    .element-item { background: #fff; padding: 0.75rem; margin-bottom: 0.5rem; border: 1px solid #e2e8f0; border-radius: 4px; font-size: 0.875rem; }
    .element-target { color: #5a67d8; }
    .element-html { color: #718096; font-size: 0.8rem; word-break: break-all; }
    .more-elements { font-size: 0.8rem; color: #718096; font-style: italic; }
    .no-violations { background: #fff; padding: 3rem; border-radius: 8px; text-align: center; }
    .no-violations .icon { font-size: 4rem; }
    .footer { margin-top: 3rem; padding: 2rem; text-align: center; color: #718096; font-size: 0.875rem; }
    @media (max-width: 768px) { .summary-grid { grid-template-columns: repeat(2, 1fr); } .charts-section { grid-template-columns: 1fr; } }
";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn render(groups: &[PageViolationGroup]) -> String {
        let at = Utc.with_ymd_and_hms(2025, 7, 4, 15, 30, 0).unwrap();
        render_report("Guest Checkout", groups, &at)
    }

    fn page(name: &str, violations: Vec<ViolationRecord>) -> PageViolationGroup {
        PageViolationGroup {
            page: name.to_string(),
            violations,
        }
    }

    fn nodes(count: usize, html: &str) -> Vec<AffectedNode> {
        (0..count).map(|i| AffectedNode::new(format!("a:nth-child({i})"), html)).collect()
    }

    mod escape_tests {
        use super::*;

        #[test]
        fn test_escapes_all_five() {
            assert_eq!(
                escape_html(r#"<a href="x" title='y'>&</a>"#),
                "&lt;a href=&quot;x&quot; title=&#039;y&#039;&gt;&amp;&lt;/a&gt;"
            );
        }

        #[test]
        fn test_plain_text_borrowed() {
            assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
        }
    }

    mod truncate_tests {
        use super::*;

        #[test]
        fn test_short_snippet_untouched() {
            assert_eq!(truncate_snippet("<h3>Welcome</h3>"), ("<h3>Welcome</h3>", false));
        }

        #[test]
        fn test_exactly_limit_untouched() {
            let exact = "x".repeat(SNIPPET_MAX_CHARS);
            assert_eq!(truncate_snippet(&exact), (exact.as_str(), false));
        }

        #[test]
        fn test_counts_characters_not_bytes() {
            let long = "é".repeat(SNIPPET_MAX_CHARS + 10);
            let (cut, was_cut) = truncate_snippet(&long);
            assert!(was_cut);
            assert_eq!(cut.chars().count(), SNIPPET_MAX_CHARS);
        }
    }

    mod document_tests {
        use super::*;

        #[test]
        fn test_clean_report_has_no_charts() {
            let html = render(&[]);
            assert!(html.contains("class=\"no-violations\""));
            assert!(html.contains("No Accessibility Violations Found!"));
            assert!(!html.contains("new Chart("));
            assert!(!html.contains("id=\"severityChart\""));
            assert!(!html.contains("class=\"page-block\""));
            assert!(html.contains("<div class=\"value\">0</div>"));
        }

        #[test]
        fn test_header_carries_label_and_timestamp() {
            let html = render(&[]);
            assert!(html.contains("<div class=\"test-name\">Guest Checkout</div>"));
            assert!(html.contains("Generated: July 4, 2025 3:30:00 PM"));
        }

        #[test]
        fn test_sections_and_node_limits() {
            let groups = vec![
                page(
                    "Home Page",
                    vec![
                        ViolationRecord::new("frame-title", Impact::Serious)
                            .with_nodes(nodes(1, "<iframe></iframe>")),
                        ViolationRecord::new("heading-order", Impact::Moderate),
                    ],
                ),
                page(
                    "Order Confirmation Page",
                    vec![ViolationRecord::new("link-name", Impact::Serious)
                        .with_nodes(nodes(43, "<a href=\"#\"></a>"))],
                ),
            ];
            let html = render(&groups);

            assert_eq!(html.matches("class=\"page-block\"").count(), 2);
            assert_eq!(html.matches("class=\"violation-item\"").count(), 3);
            // 1 + 0 + min(3, 43)
            assert_eq!(html.matches("class=\"element-item\"").count(), 4);
            assert!(html.contains("and 40 more not shown"));
            assert!(html.contains("Affected Elements (showing first 3)"));
            assert!(html.contains("1 violation<"));
            assert!(html.contains("2 violations<"));
            assert!(html.contains("new Chart(document.getElementById('pageChart')"));
        }

        #[test]
        fn test_page_order_preserved_in_sections_and_chart() {
            let groups = vec![
                page("Zeta", vec![ViolationRecord::new("a", Impact::Minor)]),
                page("Alpha", vec![ViolationRecord::new("b", Impact::Minor)]),
            ];
            let html = render(&groups);
            let zeta = html.find("&#128196; Zeta").unwrap();
            let alpha = html.find("&#128196; Alpha").unwrap();
            assert!(zeta < alpha);

            let spec = page_chart_spec(&groups);
            assert_eq!(spec["data"]["labels"], json!(["Zeta", "Alpha"]));
            assert_eq!(spec["data"]["datasets"][0]["data"], json!([1, 1]));
        }

        #[test]
        fn test_long_snippet_truncated_with_marker() {
            let long = format!("<div class=\"{}\"></div>", "c".repeat(300));
            let groups = vec![page(
                "PDP",
                vec![ViolationRecord::new("region", Impact::Moderate)
                    .with_node(AffectedNode::new("div", long.clone()))],
            )];
            let html = render(&groups);
            let (cut, _) = truncate_snippet(&long);
            let expected = format!("{}{TRUNCATION_MARKER}</div>", escape_html(cut));
            assert!(html.contains(&expected));
            assert!(!html.contains(&"c".repeat(200)));
        }

        #[test]
        fn test_stored_markup_is_escaped() {
            let groups = vec![page(
                "<script>alert(1)</script>",
                vec![ViolationRecord::new("list", Impact::Serious)
                    .with_help("<ul> and <ol> must only directly contain <li>")
                    .with_node(AffectedNode::new(
                        "a[href=\"/products\"]",
                        "<a href=\"/products\">Tom & Jerry</a>",
                    ))],
            )];
            let html = render(&groups);
            assert!(html.contains("&lt;a href=&quot;/products&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"));
            assert!(html.contains("&lt;ul&gt; and &lt;ol&gt;"));
            assert!(!html.contains("<a href=\"/products\">"));
            assert!(!html.contains("<script>alert(1)</script>"));
        }

        #[test]
        fn test_chart_json_cannot_close_script() {
            let groups = vec![page(
                "</script><b>x</b>",
                vec![ViolationRecord::new("a", Impact::Critical)],
            )];
            let html = render(&groups);
            assert!(html.contains("\\u003c/script\\u003e"));
            assert_eq!(html.matches("</script>").count(), 2);
        }

        #[test]
        fn test_severity_spec_order() {
            let stats = SeverityStats::default()
                .record(Impact::Critical)
                .record(Impact::Minor)
                .record(Impact::Minor);
            let spec = severity_chart_spec(&stats);
            assert_eq!(
                spec["data"]["labels"],
                json!(["Critical", "Serious", "Moderate", "Minor"])
            );
            assert_eq!(spec["data"]["datasets"][0]["data"], json!([1, 0, 0, 2]));
        }
    }
}
