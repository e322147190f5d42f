//! `exclude-edges`: the exclusion filter as a pipeline step.

use numform_core::digits::DigitSet;
use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use serde::Deserialize;

use crate::filter;
use crate::module::{ComputeContext, ComputeModule, parse_params};
use crate::types::{EstimateInfo, ParamSpec, Result};

pub const KEY: &str = "exclude-edges";

pub const DEFAULT_GUARDRAILS: Guardrails = Guardrails::new(100_000, 1, 100_000);

const SCHEMA: &[ParamSpec] = &[
    ParamSpec {
        name: "excludeFront",
        kind: "digits",
        default: "",
        description: "Drop results starting with any of these digits",
    },
    ParamSpec {
        name: "excludeBack",
        kind: "digits",
        default: "",
        description: "Drop results ending with any of these digits",
    },
];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct Params {
    exclude_front: String,
    exclude_back: String,
}

#[derive(Debug, Clone)]
pub struct ExcludeEdges {
    guardrails: Guardrails,
}

impl ExcludeEdges {
    pub fn new(guardrails: Guardrails) -> Self {
        Self { guardrails }
    }
}

impl Default for ExcludeEdges {
    fn default() -> Self {
        Self::new(DEFAULT_GUARDRAILS)
    }
}

impl ComputeModule for ExcludeEdges {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        "Exclude edges"
    }

    fn description(&self) -> &'static str {
        "Filter results by their first and last digit"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::ResultSet
    }

    fn param_schema(&self) -> &'static [ParamSpec] {
        SCHEMA
    }

    fn guardrails(&self) -> Guardrails {
        self.guardrails
    }

    /// A filter never grows its input.
    fn estimate(&self, ctx: &ComputeContext<'_>) -> Result<EstimateInfo> {
        parse_params::<Params>(KEY, ctx.params)?;
        Ok(EstimateInfo {
            estimated_groups: ctx.data.len() as u64,
            input_size: ctx.data.len(),
            group_size: 0,
            reason: None,
        })
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> Result<Vec<String>> {
        let p: Params = parse_params(KEY, ctx.params)?;
        Ok(filter::exclude_edges(
            ctx.data.to_vec(),
            &DigitSet::parse(&p.exclude_front),
            &DigitSet::parse(&p.exclude_back),
        ))
    }
}
