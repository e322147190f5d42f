//! `pair-permutations`: ordered two-digit numbers with leading-zero and
//! double filters.

use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use serde::Deserialize;

use crate::estimate;
use crate::generate;
use crate::module::{ComputeContext, ComputeModule, parse_params};
use crate::types::{EstimateInfo, ParamSpec, Result};

pub const KEY: &str = "pair-permutations";

pub const DEFAULT_GUARDRAILS: Guardrails = Guardrails::new(10, 2, 100);

const GROUP_SIZE: usize = 2;

const SCHEMA: &[ParamSpec] = &[
    ParamSpec {
        name: "allowLeadingZero",
        kind: "boolean",
        default: "true",
        description: "Keep pairs starting with 0",
    },
    ParamSpec {
        name: "allowDoubles",
        kind: "boolean",
        default: "false",
        description: "Keep pairs made of the same digit twice",
    },
];

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct Params {
    allow_leading_zero: bool,
    allow_doubles: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            allow_leading_zero: true,
            allow_doubles: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PairPermutations {
    guardrails: Guardrails,
}

impl PairPermutations {
    pub fn new(guardrails: Guardrails) -> Self {
        Self { guardrails }
    }
}

impl Default for PairPermutations {
    fn default() -> Self {
        Self::new(DEFAULT_GUARDRAILS)
    }
}

impl ComputeModule for PairPermutations {
    fn key(&self) -> &'static str {
        KEY
    }

    fn name(&self) -> &'static str {
        "Pair permutations"
    }

    fn description(&self) -> &'static str {
        "Ordered two-digit pairs with optional doubles and leading zeros"
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
        parse_params::<Params>(KEY, ctx.params)?;
        let n = ctx.pool().len();
        Ok(EstimateInfo {
            estimated_groups: estimate::with_repeats_estimate(n, GROUP_SIZE, &self.guardrails),
            input_size: n,
            group_size: GROUP_SIZE,
            reason: None,
        })
    }

    fn compute(&self, ctx: &ComputeContext<'_>) -> Result<Vec<String>> {
        let p: Params = parse_params(KEY, ctx.params)?;
        let pool = ctx.pool();
        let mut out = generate::permutations_with_repeats(pool.as_slice(), GROUP_SIZE);
        out.retain(|pair| {
            let mut chars = pair.chars();
            let (first, second) = (chars.next(), chars.next());
            let is_double = first == second;
            let leading_zero = first == Some('0');
            (p.allow_doubles || !is_double) && (p.allow_leading_zero || !leading_zero)
        });
        Ok(out)
    }
}
