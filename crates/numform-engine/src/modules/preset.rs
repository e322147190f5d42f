//! `static-preset`: fixed, named number lists restricted to the input pool.

use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use serde::Deserialize;

use crate::module::{ComputeContext, ComputeModule, parse_params};
use crate::types::{EstimateInfo, ParamSpec, Result};

pub const KEY: &str = "static-preset";

pub const DEFAULT_GUARDRAILS: Guardrails = Guardrails::new(10, 3, 1000);

const SCHEMA: &[ParamSpec] = &[ParamSpec {
    name: "preset",
    kind: "doubles | shifted-doubles | triples",
    default: "doubles",
    description: "Which preset list to look up",
}];

const DOUBLES: &[&str] = &["00", "11", "22", "33", "44", "55", "66", "77", "88", "99"];

const SHIFTED_DOUBLES: &[&str] = &["05", "50", "16", "61", "27", "72", "38", "83", "49", "94"];

const TRIPLES: &[&str] = &[
    "000", "111", "222", "333", "444", "555", "666", "777", "888", "999",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    Doubles,
    ShiftedDoubles,
    Triples,
}

impl Preset {
    pub fn entries(self) -> &'static [&'static str] {
        match self {
            Self::Doubles => DOUBLES,
            Self::ShiftedDoubles => SHIFTED_DOUBLES,
            Self::Triples => TRIPLES,
        }
    }

    fn group_size(self) -> usize {
        match self {
            Self::Doubles | Self::ShiftedDoubles => 2,
            Self::Triples => 3,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Params {
    preset: Preset,
}

#[derive(Debug, Clone)]
pub struct StaticPreset {
    guardrails: Guardrails,
}

impl StaticPreset {
    pub fn new(guardrails: Guardrails) -> Self {
        Self { guardrails }
    }
}

impl Default for StaticPreset {
    fn default() -> Self {
        Self::new(DEFAULT_GUARDRAILS)
    }
}

impl ComputeModule for StaticPreset {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        "Static preset"
    }

    fn description(&self) -> &'static str {
        "Named preset lists, keeping entries made only of input digits"
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
        let p: Params = parse_params(KEY, ctx.params)?;
        Ok(EstimateInfo {
            estimated_groups: p.preset.entries().len() as u64,
            input_size: ctx.pool().len(),
            group_size: p.preset.group_size(),
            reason: None,
        })
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> Result<Vec<String>> {
        let p: Params = parse_params(KEY, ctx.params)?;
        let pool = ctx.pool();
        Ok(p
            .preset
            .entries()
            .iter()
            .filter(|entry| entry.chars().all(|c| pool.contains(c)))
            .map(|entry| entry.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use numform_core::digits::DigitSet;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(digits: &str, params: serde_json::Value) -> Result<Vec<String>> {
        let registry = Registry::empty();
        let data = DigitSet::parse(digits).as_strings();
        StaticPreset::default().compute(&ComputeContext::new(&data, &params, &registry))
    }

    #[test]
    fn doubles_limited_to_pool() {
        assert_eq!(run("3 1 7", serde_json::Value::Null).unwrap(), vec!["11", "33", "77"]);
    }

    #[test]
    fn shifted_doubles_need_both_digits_and_keep_list_order() {
        let out = run("0156", json!({"preset": "shifted-doubles"})).unwrap();
        assert_eq!(out, vec!["05", "50", "16", "61"]);
    }

    #[test]
    fn empty_pool_gives_nothing() {
        assert!(run("", json!({"preset": "triples"})).unwrap().is_empty());
    }

    #[test]
    fn unknown_preset_is_invalid() {
        let err = run("12", json!({"preset": "quads"})).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("quads"));
    }

    #[test]
    fn every_preset_entry_has_its_group_size() {
        for preset in [Preset::Doubles, Preset::ShiftedDoubles, Preset::Triples] {
            assert!(preset.entries().iter().all(|e| e.len() == preset.group_size()));
        }
    }
}
