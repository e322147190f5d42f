//! `numform run` -- run a pipeline recipe over a digit string.

use anyhow::{Context, Result};
use numform_engine::parser::{find_recipe, load_recipe};
use tracing::debug;

use crate::cli::RunArgs;
use crate::commands::Blocked;
use crate::context::RuntimeContext;
use crate::output::output_outcome;

/// Execute the `numform run` command.
pub fn run(ctx: &RuntimeContext, args: &RunArgs) -> Result<()> {
    let path = find_recipe(&args.recipe, &ctx.cwd)
        .or_else(|_| find_recipe(&args.recipe, &ctx.recipe_root()))?;
    let recipe = load_recipe(&path).with_context(|| format!("loading {}", path.display()))?;
    debug!(recipe = %recipe.recipe, source = %recipe.source, steps = recipe.steps.len(), "recipe loaded");

    let mut outcome = ctx.engine().run_pipeline(&recipe.request(args.digits.as_str()))?;
    if ctx.sort_output(args.no_sort) {
        outcome.data.sort();
    }
    output_outcome(&outcome, ctx.json);

    if outcome.is_blocked() {
        return Err(Blocked.into());
    }
    Ok(())
}
