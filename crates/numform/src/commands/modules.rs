//! `numform modules` -- list the registered compute modules.

use anyhow::Result;
use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use numform_engine::module::ComputeModule;
use numform_engine::types::ParamSpec;
use numform_ui::styles::{render_category, render_muted};
use serde::Serialize;

use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};

/// JSON view of one registered module.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModuleView {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    input_kind: DataKind,
    output_kind: DataKind,
    guardrails: Guardrails,
    params: &'static [ParamSpec],
}

impl ModuleView {
    fn from_module(module: &dyn ComputeModule) -> Self {
        Self {
            key: module.key(),
            name: module.name(),
            description: module.description(),
            input_kind: module.input_kind(),
            output_kind: module.output_kind(),
            guardrails: module.guardrails(),
            params: module.param_schema(),
        }
    }
}

/// Execute the `numform modules` command.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let engine = ctx.engine();

    if ctx.json {
        let views: Vec<ModuleView> = engine
            .registry()
            .iter()
            .map(ModuleView::from_module)
            .collect();
        output_json(&views);
        return Ok(());
    }

    let rows: Vec<Vec<String>> = engine
        .registry()
        .iter()
        .map(|m| {
            let g = m.guardrails();
            vec![
                m.key().to_string(),
                format!("{} -> {}", m.input_kind(), m.output_kind()),
                g.max_n.to_string(),
                g.max_k.to_string(),
                g.max_groups_estimate.to_string(),
                m.description().to_string(),
            ]
        })
        .collect();
    output_table(&["KEY", "SHAPE", "MAX N", "MAX K", "MAX GROUPS", "DESCRIPTION"], &rows);

    if ctx.verbose {
        for m in engine.registry().iter() {
            println!();
            println!("{}", render_category(m.key()));
            for spec in m.param_schema() {
                println!(
                    "  {:<14} {:<26} {}",
                    spec.name,
                    spec.kind,
                    render_muted(&format!("default {:?}. {}", spec.default, spec.description))
                );
            }
        }
    }
    Ok(())
}
