//! `digit-groups`: the general grouping generator.

use numform_core::digits::DigitSet;
use numform_core::enums::{DataKind, Mode};
use numform_core::guardrails::Guardrails;
use serde::Deserialize;

use crate::estimate;
use crate::filter;
use crate::generate;
use crate::module::{ComputeContext, ComputeModule, parse_params};
use crate::types::{EngineError, EstimateInfo, ParamSpec, Result};

pub const KEY: &str = "digit-groups";

pub const DEFAULT_GUARDRAILS: Guardrails = Guardrails::new(10, 6, 5000);

const SCHEMA: &[ParamSpec] = &[
    ParamSpec {
        name: "groupSize",
        kind: "integer",
        default: "2",
        description: "Length of each generated group",
    },
    ParamSpec {
        name: "mode",
        kind: "combination | permutation",
        default: "combination",
        description: "Whether digit order distinguishes groups",
    },
    ParamSpec {
        name: "allowRepeats",
        kind: "boolean",
        default: "false",
        description: "Allow a digit to appear more than once in a group",
    },
    ParamSpec {
        name: "excludeFront",
        kind: "digits",
        default: "",
        description: "Drop groups starting with any of these digits",
    },
    ParamSpec {
        name: "excludeBack",
        kind: "digits",
        default: "",
        description: "Drop groups ending with any of these digits",
    },
];

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct Params {
    group_size: usize,
    mode: Mode,
    #[serde(alias = "repeats")]
    allow_repeats: bool,
    exclude_front: String,
    exclude_back: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            group_size: 2,
            mode: Mode::Combination,
            allow_repeats: false,
            exclude_front: String::new(),
            exclude_back: String::new(),
        }
    }
}

fn params(ctx: &ComputeContext<'_>) -> Result<Params> {
    let p: Params = parse_params(KEY, ctx.params)?;
    if p.group_size == 0 {
        return Err(EngineError::invalid_parameter(KEY, "groupSize must be at least 1"));
    }
    Ok(p)
}

/// Combinations or permutations of the pool, with or without repeated
/// digits, filtered by front/back exclusions. Output follows the ascending
/// pool's scan order.
#[derive(Debug, Clone)]
pub struct DigitGroups {
    guardrails: Guardrails,
}

impl DigitGroups {
    pub fn new(guardrails: Guardrails) -> Self {
        Self { guardrails }
    }
}

impl Default for DigitGroups {
    fn default() -> Self {
        Self::new(DEFAULT_GUARDRAILS)
    }
}

impl ComputeModule for DigitGroups {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        "Digit groups"
    }

    fn description(&self) -> &'static str {
        "Combinations or permutations of the input digits"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::Alphabet
    }

    fn param_schema(&self) -> &'static [ParamSpec] {
        SCHEMA
    }

    fn guardrails(&self) -> Guardrails {
        self.guardrails
    }

    fn estimate(&self, ctx: &ComputeContext<'_>) -> Result<EstimateInfo> {
        let p = params(ctx)?;
        let n = ctx.pool().len();
        let estimated_groups =
            estimate::estimate_groups(n, p.group_size, p.mode, p.allow_repeats, &self.guardrails);
        let reason = (!p.allow_repeats && p.group_size > n)
            .then(|| format!("group size {} exceeds {} distinct digits", p.group_size, n));
        Ok(EstimateInfo {
            estimated_groups,
            input_size: n,
            group_size: p.group_size,
            reason,
        })
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> Result<Vec<String>> {
        let p = params(ctx)?;
        let pool = ctx.pool();
        let groups = generate::generate(pool.as_slice(), p.group_size, p.mode, p.allow_repeats);
        Ok(filter::exclude_edges(
            groups,
            &DigitSet::parse(&p.exclude_front),
            &DigitSet::parse(&p.exclude_back),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(digits: &str, params: serde_json::Value) -> Result<Vec<String>> {
        let registry = Registry::empty();
        let data = DigitSet::parse(digits).as_strings();
        DigitGroups::default().compute(&ComputeContext::new(&data, &params, &registry))
    }

    fn estimate(digits: &str, params: serde_json::Value) -> Result<EstimateInfo> {
        let registry = Registry::empty();
        let data = DigitSet::parse(digits).as_strings();
        DigitGroups::default().estimate(&ComputeContext::new(&data, &params, &registry))
    }

    #[test]
    fn combination_pairs_by_default() {
        assert_eq!(run("112233", serde_json::Value::Null).unwrap(), vec!["12", "13", "23"]);
    }

    #[test]
    fn permutation_pairs() {
        let out = run("112233", json!({"mode": "permutation"})).unwrap();
        assert_eq!(out, vec!["12", "13", "21", "23", "31", "32"]);
    }

    #[test]
    fn mode_short_form() {
        let out = run("12", json!({"mode": "perm"})).unwrap();
        assert_eq!(out, vec!["12", "21"]);
    }

    #[test]
    fn repeats_alias_and_exclusions() {
        let out = run(
            "123",
            json!({"groupSize": 2, "repeats": true, "excludeFront": "1", "excludeBack": "3"}),
        )
        .unwrap();
        assert_eq!(out, vec!["22"]);
    }

    #[test]
    fn scan_order_of_sorted_pool_is_lexicographic() {
        let out = run("9 0 5", json!({"groupSize": 2, "mode": "permutation"})).unwrap();
        let mut sorted = out.clone();
        sorted.sort();
        assert_eq!(out, sorted);
    }

    #[test]
    fn zero_group_size_is_invalid() {
        let err = run("123", json!({"groupSize": 0})).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn unknown_mode_is_invalid() {
        let err = estimate("123", json!({"mode": "shuffle"})).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn estimate_reports_pool_and_group_size() {
        let info = estimate("0123456789", json!({"groupSize": 3, "allowRepeats": true})).unwrap();
        assert_eq!(info.input_size, 10);
        assert_eq!(info.group_size, 3);
        assert_eq!(info.estimated_groups, 1000);
        assert!(info.reason.is_none());
    }

    #[test]
    fn estimate_notes_group_larger_than_pool() {
        let info = estimate("12", json!({"groupSize": 3})).unwrap();
        assert_eq!(info.estimated_groups, 0);
        assert!(info.reason.unwrap().contains("exceeds"));
    }
}
