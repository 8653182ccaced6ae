//! Sample scan results from a guest air-fryer checkout run.
//!
//! Used by `storeprobe a11y-report --demo` to preview the report layout
//! without a browser.

use super::reporter::AccessibilityReporter;
use super::violation::{AffectedNode, Impact, PageViolationGroup, ViolationRecord};

/// Label the demo report is rendered under
pub const DEMO_LABEL: &str = "US Cuisinart Guest Air Fryer Checkout - Demo";

const AXE_DOCS: &str = "https://dequeuniversity.com/rules/axe/4.4";

const NO_ACCESSIBLE_NAME: &str = "aria-label attribute does not exist or is empty\n  \
    aria-labelledby attribute does not exist, references elements that do not exist \
    or references elements that are empty";

fn rule(id: &str, impact: Impact, help: &str, description: &str, tags: &[&str]) -> ViolationRecord {
    ViolationRecord::new(id, impact)
        .with_help(help)
        .with_description(description)
        .with_help_url(format!("{AXE_DOCS}/{id}"))
        .with_tags(tags.iter().copied())
}

fn node(target: &str, html: &str, summary: &str) -> AffectedNode {
    AffectedNode::new(target, html).with_failure_summary(summary)
}

fn link_name() -> ViolationRecord {
    rule(
        "link-name",
        Impact::Serious,
        "Links must have discernible text",
        "Ensures links have discernible text",
        &[
            "cat.name-role-value",
            "wcag2a",
            "wcag412",
            "wcag244",
            "section508",
            "section508.22.a",
            "ACT",
        ],
    )
}

fn home_page() -> Vec<ViolationRecord> {
    vec![
        rule(
            "frame-title",
            Impact::Serious,
            "Frames must have an accessible name",
            "Ensures <iframe> and <frame> elements have an accessible name",
            &[
                "cat.text-alternatives",
                "wcag2a",
                "wcag241",
                "wcag412",
                "section508",
                "section508.22.i",
            ],
        )
        .with_node(node(
            "iframe",
            r#"<iframe src="https://example.com" style="display:none;"></iframe>"#,
            &format!(
                "Fix any of the following:\n  Element does not have a title attribute\n  {NO_ACCESSIBLE_NAME}\n  \
                 Element's default semantics were not overridden with role=\"none\" or role=\"presentation\""
            ),
        )),
        rule(
            "heading-order",
            Impact::Moderate,
            "Heading levels should only increase by one",
            "Ensures the order of headings is semantically correct",
            &["cat.semantics", "best-practice"],
        )
        .with_node(node(
            "h3",
            "<h3>Welcome</h3>",
            "Fix any of the following:\n  Heading order invalid",
        )),
        rule(
            "landmark-unique",
            Impact::Moderate,
            "Landmarks should have a unique role or role/label/title (i.e. accessible name) combination",
            "Ensures landmarks are unique",
            &["cat.semantics", "best-practice"],
        )
        .with_node(node(
            "nav:nth-child(1)",
            "<nav></nav>",
            "Fix any of the following:\n  The landmark must have a unique aria-label, aria-labelledby, \
             or title to make landmarks distinguishable",
        )),
        link_name().with_node(node(
            r#"a[href="/products"]"#,
            r#"<a href="/products"></a>"#,
            &format!(
                "Fix any of the following:\n  Element does not have text that is visible to screen readers\n  \
                 {NO_ACCESSIBLE_NAME}\n  Element has no title attribute"
            ),
        )),
    ]
}

fn category_page() -> Vec<ViolationRecord> {
    vec![
        rule(
            "aria-prohibited-attr",
            Impact::Serious,
            "Elements must only use permitted ARIA attributes",
            "Ensures ARIA attributes are not prohibited for an element's role",
            &["cat.aria", "wcag2a", "wcag412"],
        )
        .with_nodes(["div", "span"].map(|tag| {
            node(
                &format!(r#"{tag}[role="button"]"#),
                &format!(r#"<{tag} role="button" aria-label="test"></{tag}>"#),
                &format!(
                    "Fix all of the following:\n  aria-label attribute cannot be used on a {tag} with role=\"button\""
                ),
            )
        })),
        rule(
            "scrollable-region-focusable",
            Impact::Serious,
            "Scrollable region must have keyboard access",
            "Ensures elements that have scrollable content are accessible by keyboard",
            &["cat.keyboard", "wcag2a", "wcag211"],
        )
        .with_node(node(
            r#"div[style*="overflow"]"#,
            r#"<div style="overflow:scroll"></div>"#,
            "Fix any of the following:\n  Element should have focusable content\n  Element should be focusable",
        )),
    ]
}

fn product_page() -> Vec<ViolationRecord> {
    vec![
        rule(
            "label-title-only",
            Impact::Serious,
            "Form elements should have a visible label",
            "Ensures that every form element has a visible label and is not solely labeled using hidden \
             labels, or the title or aria-describedby attributes",
            &["cat.forms", "best-practice"],
        )
        .with_node(node(
            r#"input[title="Quantity"]"#,
            r#"<input type="text" title="Quantity">"#,
            "Fix all of the following:\n  Form element does not have a visible label",
        )),
        rule(
            "list",
            Impact::Serious,
            "<ul> and <ol> must only directly contain <li>, <script> or <template> elements",
            "Ensures that lists are structured correctly",
            &["cat.structure", "wcag2a", "wcag131"],
        )
        .with_node(node(
            "ul",
            "<ul><div><li>Item</li></div></ul>",
            "Fix all of the following:\n  List element has direct children that are not allowed: div",
        )),
    ]
}

fn payment_form() -> Vec<ViolationRecord> {
    vec![rule(
        "select-name",
        Impact::Critical,
        "Select element must have an accessible name",
        "Ensures select element has an accessible name",
        &["cat.forms", "wcag2a", "wcag412", "section508", "section508.22.n", "ACT"],
    )
    .with_node(node(
        "#expirationMonth",
        "<select><option>Month</option></select>",
        &format!(
            "Fix any of the following:\n  Form element does not have an accessible name\n  {NO_ACCESSIBLE_NAME}\n  \
             Form element has no associated label element\n  Element has no title attribute"
        ),
    ))
    .with_node(node(
        "#expirationYear",
        "<select><option>Year</option></select>",
        "Fix any of the following:\n  Form element does not have an accessible name",
    ))]
}

fn confirmation_page() -> Vec<ViolationRecord> {
    let anchor = node(
        "a",
        r##"<a href="#"></a>"##,
        "Fix any of the following:\n  Element does not have text that is visible to screen readers",
    );
    vec![link_name().with_nodes(std::iter::repeat(anchor).take(43))]
}

/// Demo pages in checkout order
#[must_use]
pub fn demo_pages() -> Vec<PageViolationGroup> {
    [
        ("Home Page", home_page()),
        ("Air Fryers Category Page", category_page()),
        ("Product Details Page", product_page()),
        ("Payment Form", payment_form()),
        ("Order Confirmation Page", confirmation_page()),
    ]
    .into_iter()
    .map(|(page, violations)| PageViolationGroup {
        page: page.to_string(),
        violations,
    })
    .collect()
}

/// Reporter preloaded with the demo pages
#[must_use]
pub fn demo_reporter() -> AccessibilityReporter {
    let mut reporter = AccessibilityReporter::new();
    reporter.extend_pages(demo_pages());
    reporter
}
