//! Per-module ceilings that keep generation bounded.

use serde::{Deserialize, Serialize};

/// Ceilings checked before a module is allowed to generate.
///
/// Checked in order: pool size (`max_n`), group size (`max_k`), then the
/// estimated output cardinality (`max_groups_estimate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardrails {
    /// Largest accepted input size.
    pub max_n: usize,
    /// Largest accepted group size.
    pub max_k: usize,
    /// Largest accepted estimated output size.
    pub max_groups_estimate: u64,
}

impl Guardrails {
    pub const fn new(max_n: usize, max_k: usize, max_groups_estimate: u64) -> Self {
        Self {
            max_n,
            max_k,
            max_groups_estimate,
        }
    }

    /// Sentinel estimate meaning "over budget".
    pub fn over_budget(&self) -> u64 {
        self.max_groups_estimate.saturating_add(1)
    }

    /// Returns a copy with the given fields replaced.
    pub fn with_overrides(
        self,
        max_n: Option<usize>,
        max_k: Option<usize>,
        max_groups_estimate: Option<u64>,
    ) -> Self {
        Self {
            max_n: max_n.unwrap_or(self.max_n),
            max_k: max_k.unwrap_or(self.max_k),
            max_groups_estimate: max_groups_estimate.unwrap_or(self.max_groups_estimate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_budget_is_one_past_ceiling() {
        assert_eq!(Guardrails::new(10, 3, 500).over_budget(), 501);
        assert_eq!(Guardrails::new(10, 3, u64::MAX).over_budget(), u64::MAX);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let base = Guardrails::new(10, 6, 5000);
        let g = base.with_overrides(None, Some(3), None);
        assert_eq!(g, Guardrails::new(10, 3, 5000));
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Guardrails::new(10, 2, 100)).unwrap();
        assert_eq!(json["maxN"], 10);
        assert_eq!(json["maxK"], 2);
        assert_eq!(json["maxGroupsEstimate"], 100);
    }
}
