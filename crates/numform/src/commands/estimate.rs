//! `numform estimate` -- show the admission decision without generating.

use anyhow::Result;
use numform_ui::styles::{render_fail, render_fail_icon, render_pass, render_pass_icon};

use crate::cli::EstimateArgs;
use crate::commands::Blocked;
use crate::commands::generate::build_request;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `numform estimate` command.
pub fn run(ctx: &RuntimeContext, args: &EstimateArgs) -> Result<()> {
    let engine = ctx.engine();
    let admission = engine.estimate(&build_request(&engine, &args.request)?)?;

    if ctx.json {
        output_json(&admission);
    } else {
        let g = &admission.guardrails;
        println!("Module:      {}", admission.module_key);
        if let Some(info) = &admission.estimate {
            println!("Input size:  {}", info.input_size);
            println!("Group size:  {}", info.group_size);
            println!("Estimate:    {}", info.estimated_groups);
            if let Some(note) = &info.reason {
                println!("Note:        {note}");
            }
        }
        println!(
            "Limits:      maxN {}, maxK {}, max groups {}",
            g.max_n, g.max_k, g.max_groups_estimate
        );
        match &admission.reason {
            None => println!("{} {}", render_pass_icon(), render_pass("Admitted")),
            Some(reason) => println!(
                "{} {}",
                render_fail_icon(),
                render_fail(&format!("Blocked: {reason}"))
            ),
        }
    }

    if !admission.admitted {
        return Err(Blocked.into());
    }
    Ok(())
}
