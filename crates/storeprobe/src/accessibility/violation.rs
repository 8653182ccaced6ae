//! Violation records in the axe-core result shape.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Severity of an accessibility violation.
///
/// Ordered from least to most severe so `max()` picks the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Nice to fix
    #[default]
    Minor,
    /// Should be fixed
    Moderate,
    /// Blocks some users
    Serious,
    /// Blocks users entirely
    Critical,
}

impl Impact {
    /// All levels, most severe first
    pub const ALL: [Self; 4] = [Self::Critical, Self::Serious, Self::Moderate, Self::Minor];

    /// Lowercase name as used by axe-core
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Serious => "serious",
            Self::Moderate => "moderate",
            Self::Minor => "minor",
        }
    }

    /// Display label for report headings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Serious => "Serious",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
        }
    }

    /// Parse an axe-core impact.
    ///
    /// Only the exact lowercase names are recognised; anything else,
    /// including `None`, is minor.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value {
            Some("critical") => Self::Critical,
            Some("serious") => Self::Serious,
            Some("moderate") => Self::Moderate,
            _ => Self::Minor,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::parse_lenient(raw.as_ref().and_then(|v| v.as_str())))
    }
}

/// A DOM node a violation was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedNode {
    /// Selector path to the node (frames and shadow roots flattened)
    #[serde(default, deserialize_with = "deserialize_targets")]
    pub target: Vec<String>,
    /// Outer HTML of the node
    #[serde(default)]
    pub html: String,
    /// Human-readable fix summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,
}

impl AffectedNode {
    /// Create a node from a single selector and its markup
    #[must_use]
    pub fn new(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            target: vec![target.into()],
            html: html.into(),
            failure_summary: None,
        }
    }

    /// Add a fix summary
    #[must_use]
    pub fn with_failure_summary(mut self, summary: impl Into<String>) -> Self {
        self.failure_summary = Some(summary.into());
        self
    }

    /// Selector path joined for display
    #[must_use]
    pub fn target_path(&self) -> String {
        self.target.join(" > ")
    }
}

// axe-core reports nodes inside iframes or shadow roots as nested arrays.
fn deserialize_targets<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.iter().map(flatten_target).collect())
}

fn flatten_target(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(parts) => parts
            .iter()
            .map(flatten_target)
            .collect::<Vec<_>>()
            .join(" > "),
        other => other.to_string(),
    }
}

/// One accessibility rule failure on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    /// Rule identifier (e.g. `link-name`)
    pub id: String,
    /// Severity, minor when absent
    #[serde(default)]
    pub impact: Impact,
    /// What the rule checks
    #[serde(default)]
    pub description: String,
    /// Short human-readable help text
    #[serde(default)]
    pub help: String,
    /// Link to the rule documentation
    #[serde(default)]
    pub help_url: String,
    /// Rule tags (WCAG criteria, categories)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Nodes the rule failed on
    #[serde(default)]
    pub nodes: Vec<AffectedNode>,
}

impl ViolationRecord {
    /// Create a record with no text and no nodes
    #[must_use]
    pub fn new(id: impl Into<String>, impact: Impact) -> Self {
        Self {
            id: id.into(),
            impact,
            description: String::new(),
            help: String::new(),
            help_url: String::new(),
            tags: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the help text
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the documentation link
    #[must_use]
    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = url.into();
        self
    }

    /// Add tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add an affected node
    #[must_use]
    pub fn with_node(mut self, node: AffectedNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add several affected nodes
    #[must_use]
    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = AffectedNode>) -> Self {
        self.nodes.extend(nodes);
        self
    }
}

/// Violations found on one labelled page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageViolationGroup {
    /// Page label as given by the test
    pub page: String,
    /// Violations in scan order
    #[serde(default)]
    pub violations: Vec<ViolationRecord>,
}

impl PageViolationGroup {
    /// Number of violations on the page
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the page has no violations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}
