//! `numform generate` -- run one compute module over a digit string.

use anyhow::Result;
use numform_engine::{ComputeRequest, Engine};

use crate::cli::{GenerateArgs, RequestArgs};
use crate::commands::{Blocked, parse_params};
use crate::context::RuntimeContext;
use crate::output::output_outcome;

/// Execute the `numform generate` command.
pub fn run(ctx: &RuntimeContext, args: &GenerateArgs) -> Result<()> {
    let engine = ctx.engine();
    let request = build_request(&engine, &args.request)?;

    let mut outcome = engine.compute(&request)?;
    if ctx.sort_output(args.no_sort) {
        outcome.data.sort();
    }
    output_outcome(&outcome, ctx.json);

    if outcome.is_blocked() {
        return Err(Blocked.into());
    }
    Ok(())
}

/// Turn the shared request flags into an engine request.
pub fn build_request(engine: &Engine, args: &RequestArgs) -> Result<ComputeRequest> {
    let schema = engine
        .registry()
        .get(&args.module)
        .map(|m| m.param_schema())
        .unwrap_or_default();
    Ok(ComputeRequest {
        raw_text: args.digits.clone(),
        module_key: args.module.clone(),
        params: parse_params(&args.params, schema)?,
    })
}
