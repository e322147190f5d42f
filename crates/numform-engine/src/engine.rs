//! Request entry points.
//!
//! [`Engine`] is the function-call boundary used by the surrounding
//! application. It normalizes raw text, resolves the module, admits the
//! request against the module's guardrails and only then generates. Guardrail
//! and parameter problems come back as blocked outcomes; only configuration
//! errors are returned as `Err`.

use numform_core::digits::DigitSet;
use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::estimate;
use crate::module::{ComputeContext, ComputeModule};
use crate::pipeline;
use crate::registry::Registry;
use crate::types::{
    ComputeOutcome, ComputeRequest, EngineError, EstimateInfo, PipelineRequest, Rejection, Result,
};

/// Admission decision for one module invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub module_key: String,
    pub guardrails: Guardrails,
    pub admitted: bool,
    /// Absent when the parameters could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<EstimateInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip)]
    pub rejection: Option<Rejection>,
}

impl Admission {
    fn admitted(module: &dyn ComputeModule, info: EstimateInfo) -> Self {
        Self {
            module_key: module.key().to_string(),
            guardrails: module.guardrails(),
            admitted: true,
            estimate: Some(info),
            reason: None,
            rejection: None,
        }
    }

    fn rejected(module: &dyn ComputeModule, info: Option<EstimateInfo>, rejection: Rejection) -> Self {
        Self {
            module_key: module.key().to_string(),
            guardrails: module.guardrails(),
            admitted: false,
            estimate: info,
            reason: Some(rejection.reason.to_string()),
            rejection: Some(rejection),
        }
    }
}

/// Estimate a module invocation and run the guardrail checks on it.
pub fn assess(module: &dyn ComputeModule, ctx: &ComputeContext<'_>) -> Result<Admission> {
    let info = match module.estimate(ctx) {
        Ok(info) => info,
        Err(e) => return Ok(Admission::rejected(module, None, e.into_rejection()?)),
    };
    let guardrails = module.guardrails();
    match estimate::check(info.input_size, info.group_size, info.estimated_groups, &guardrails) {
        Ok(()) => Ok(Admission::admitted(module, info)),
        Err(rejection) => Ok(Admission::rejected(module, Some(info), rejection)),
    }
}

/// Admit and then run one module. Rejections surface as
/// [`EngineError::Rejected`] so pipelines can stop at the first one.
pub fn execute(
    registry: &Registry,
    module: &dyn ComputeModule,
    data: &[String],
    params: &serde_json::Value,
) -> Result<Vec<String>> {
    let ctx = ComputeContext::new(data, params, registry);
    let admission = assess(module, &ctx)?;
    if let Some(rejection) = admission.rejection {
        warn!(
            module = module.key(),
            reason = %rejection,
            estimate = ?rejection.estimate,
            "request blocked before generation"
        );
        return Err(EngineError::Rejected(rejection));
    }
    let out = module.compute(&ctx).map_err(|e| match e.into_rejection() {
        Ok(rejection) => EngineError::Rejected(rejection),
        Err(other) => other,
    })?;
    debug!(module = module.key(), input = data.len(), output = out.len(), "module computed");
    Ok(out)
}

/// Fold recoverable errors into a blocked outcome; configuration errors
/// pass through.
pub(crate) fn settle(result: Result<Vec<String>>) -> Result<ComputeOutcome> {
    match result {
        Ok(data) => Ok(ComputeOutcome::ok(data)),
        Err(e) => e.into_rejection().map(|r| ComputeOutcome::blocked(&r)),
    }
}

/// The compute engine: a registry plus the request entry points.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// An engine over the built-in modules with default guardrails.
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run a single module over the normalized digits of `raw_text`.
    pub fn compute(&self, request: &ComputeRequest) -> Result<ComputeOutcome> {
        let module = self.entry_module(&request.module_key)?;
        let data = DigitSet::parse(&request.raw_text).as_strings();
        info!(module = module.key(), pool = data.len(), "compute request");
        settle(execute(&self.registry, module, &data, &request.params))
    }

    /// Run a pipeline over the normalized digits of `raw_text`.
    pub fn run_pipeline(&self, request: &PipelineRequest) -> Result<ComputeOutcome> {
        let digits = DigitSet::parse(&request.raw_text);
        info!(steps = request.steps.len(), pool = digits.len(), "pipeline request");
        pipeline::run(&self.registry, &request.steps, &digits)
    }

    /// Report the admission decision for a request without generating.
    pub fn estimate(&self, request: &ComputeRequest) -> Result<Admission> {
        let module = self.entry_module(&request.module_key)?;
        let data = DigitSet::parse(&request.raw_text).as_strings();
        assess(module, &ComputeContext::new(&data, &request.params, &self.registry))
    }

    /// Resolve a module that is fed raw digits directly.
    fn entry_module(&self, key: &str) -> Result<&dyn ComputeModule> {
        let module = self.registry.get(key).ok_or_else(|| {
            warn!(key, "request references unknown module");
            EngineError::unknown_module(key)
        })?;
        if module.input_kind() != DataKind::Alphabet {
            return Err(EngineError::ShapeMismatch {
                step: key.to_string(),
                expected: module.input_kind(),
                found: DataKind::Alphabet,
            });
        }
        Ok(module)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builtin()
    }
}
