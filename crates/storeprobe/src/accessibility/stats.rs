//! Severity roll-up over collected violations.

use super::violation::{Impact, PageViolationGroup};
use serde::Serialize;

/// Violation counts per impact level.
///
/// Always derived from the stored groups; nothing keeps a running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeverityStats {
    /// Sum of the four buckets
    pub total: usize,
    /// Critical violations
    pub critical: usize,
    /// Serious violations
    pub serious: usize,
    /// Moderate violations
    pub moderate: usize,
    /// Minor (or unclassified) violations
    pub minor: usize,
}

impl SeverityStats {
    /// Fold every violation of every group into the buckets
    #[must_use]
    pub fn from_groups(groups: &[PageViolationGroup]) -> Self {
        groups
            .iter()
            .flat_map(|group| group.violations.iter())
            .fold(Self::default(), |stats, violation| stats.record(violation.impact))
    }

    /// Stats with one more violation of the given impact
    #[must_use]
    pub const fn record(mut self, impact: Impact) -> Self {
        match impact {
            Impact::Critical => self.critical += 1,
            Impact::Serious => self.serious += 1,
            Impact::Moderate => self.moderate += 1,
            Impact::Minor => self.minor += 1,
        }
        self.total = self.critical + self.serious + self.moderate + self.minor;
        self
    }

    /// Count for one impact level
    #[must_use]
    pub const fn count(&self, impact: Impact) -> usize {
        match impact {
            Impact::Critical => self.critical,
            Impact::Serious => self.serious,
            Impact::Moderate => self.moderate,
            Impact::Minor => self.minor,
        }
    }

    /// Whether nothing was found
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.total == 0
    }

    /// Most severe level present, if any
    #[must_use]
    pub fn worst(&self) -> Option<Impact> {
        Impact::ALL.into_iter().find(|impact| self.count(*impact) > 0)
    }
}
