//! Sequential pipeline runner.
//!
//! Every step is resolved and shape-checked before anything runs, so a typo
//! in step five never costs the work of steps one to four. Each step is then
//! admitted against its own guardrails using the data it actually receives.

use numform_core::digits::DigitSet;
use numform_core::enums::DataKind;
use tracing::{debug, warn};

use crate::engine::{execute, settle};
use crate::module::ComputeModule;
use crate::registry::Registry;
use crate::types::{ComputeOutcome, EngineError, PipelineStep, Result};

/// Resolve every step and check that each one accepts what the previous one
/// produces. The first step is fed raw digits.
pub fn validate<'r>(
    registry: &'r Registry,
    steps: &[PipelineStep],
) -> Result<Vec<&'r dyn ComputeModule>> {
    let mut modules = Vec::with_capacity(steps.len());
    let mut incoming = DataKind::Alphabet;
    for (index, step) in steps.iter().enumerate() {
        let module = registry.get(&step.module_key).ok_or_else(|| {
            warn!(step = %step.label(index), key = %step.module_key, "pipeline references unknown module");
            EngineError::unknown_module(&step.module_key)
        })?;
        if module.input_kind() != incoming {
            return Err(EngineError::ShapeMismatch {
                step: step.label(index),
                expected: module.input_kind(),
                found: incoming,
            });
        }
        incoming = module.output_kind();
        modules.push(module);
    }
    Ok(modules)
}

/// Run `steps` over `data`, feeding each step's output to the next.
///
/// Stops at the first rejection, tagging it with the step that raised it.
pub fn run_steps(registry: &Registry, steps: &[PipelineStep], data: Vec<String>) -> Result<Vec<String>> {
    if steps.is_empty() {
        return Ok(Vec::new());
    }
    let modules = validate(registry, steps)?;

    let mut current = data;
    for (index, (step, module)) in steps.iter().zip(modules).enumerate() {
        let label = step.label(index);
        debug!(step = %label, module = module.key(), input = current.len(), "running pipeline step");
        current = execute(registry, module, &current, &step.params).map_err(|e| match e {
            EngineError::Rejected(rejection) => EngineError::Rejected(rejection.at_step(label.clone())),
            other => other,
        })?;
    }
    Ok(current)
}

/// Run a pipeline over a normalized digit set and settle the result.
pub fn run(registry: &Registry, steps: &[PipelineStep], digits: &DigitSet) -> Result<ComputeOutcome> {
    settle(run_steps(registry, steps, digits.as_strings()))
}
