//! `pipeline`: runs a nested list of steps as a single module.

use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use serde::Deserialize;

use crate::module::{ComputeContext, ComputeModule, parse_params};
use crate::pipeline;
use crate::types::{EstimateInfo, ParamSpec, PipelineStep, Result};

pub const KEY: &str = "pipeline";

pub const DEFAULT_GUARDRAILS: Guardrails = Guardrails::new(10, 1, 100_000);

const SCHEMA: &[ParamSpec] = &[ParamSpec {
    name: "steps",
    kind: "array of {stepId, moduleKey, params}",
    default: "[]",
    description: "Steps to run in order; each step's output feeds the next",
}];

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Params {
    steps: Vec<PipelineStep>,
}

#[derive(Debug, Clone)]
pub struct Chain {
    guardrails: Guardrails,
}

impl Chain {
    pub fn new(guardrails: Guardrails) -> Self {
        Self { guardrails }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(DEFAULT_GUARDRAILS)
    }
}

impl ComputeModule for Chain {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        "Pipeline"
    }

    fn description(&self) -> &'static str {
        "Chain other modules; every step is guarded against its own input"
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

    /// Validates the nested steps up front; their sizes are only known
    /// while running, so the estimate itself is deferred to each step.
    fn estimate(&self, ctx: &ComputeContext<'_>) -> Result<EstimateInfo> {
        let p: Params = parse_params(KEY, ctx.params)?;
        pipeline::validate(ctx.registry, &p.steps)?;
        Ok(EstimateInfo {
            estimated_groups: 0,
            input_size: ctx.pool().len(),
            group_size: 0,
            reason: Some(format!("{} nested steps, each checked on entry", p.steps.len())),
        })
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> Result<Vec<String>> {
        let p: Params = parse_params(KEY, ctx.params)?;
        pipeline::run_steps(ctx.registry, &p.steps, ctx.data.to_vec())
    }
}
