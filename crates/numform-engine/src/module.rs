//! The compute-module contract.
//!
//! A module is the unit of composability: a stable key, a documented
//! parameter schema, default guardrails, an estimator and a compute function.
//! Modules are immutable once registered.

use std::fmt;

use numform_core::digits::DigitSet;
use numform_core::enums::DataKind;
use numform_core::guardrails::Guardrails;
use serde::de::DeserializeOwned;

use crate::registry::Registry;
use crate::types::{EngineError, EstimateInfo, ParamSpec, Result};

/// Everything a module sees for one invocation.
#[derive(Clone, Copy)]
pub struct ComputeContext<'a> {
    /// Current data: the digit alphabet or a previous step's results.
    pub data: &'a [String],
    /// Raw parameter object for this invocation.
    pub params: &'a serde_json::Value,
    /// Registry the invocation was resolved against.
    pub registry: &'a Registry,
}

impl<'a> ComputeContext<'a> {
    pub fn new(data: &'a [String], params: &'a serde_json::Value, registry: &'a Registry) -> Self {
        Self {
            data,
            params,
            registry,
        }
    }

    /// The digit pool for alphabet-shaped data.
    pub fn pool(&self) -> DigitSet {
        DigitSet::from_items(self.data)
    }
}

pub trait ComputeModule: Send + Sync {
    /// Stable registry key.
    fn key(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// Shape of the data this module consumes.
    fn input_kind(&self) -> DataKind;

    /// Shape of the data this module produces.
    fn output_kind(&self) -> DataKind {
        DataKind::ResultSet
    }

    fn param_schema(&self) -> &'static [ParamSpec];

    /// Ceilings enforced before [`ComputeModule::compute`] may run.
    fn guardrails(&self) -> Guardrails;

    /// Predict the output size without generating anything.
    fn estimate(&self, ctx: &ComputeContext<'_>) -> Result<EstimateInfo>;

    /// Produce the output. Only called after the estimate was admitted.
    fn compute(&self, ctx: &ComputeContext<'_>) -> Result<Vec<String>>;
}

impl fmt::Debug for dyn ComputeModule + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComputeModule").field(&self.key()).finish()
    }
}

/// Deserialize a module's parameter object.
///
/// A missing (null) object means "all defaults". Anything present but
/// malformed is an [`EngineError::InvalidParameter`], never silently
/// replaced by a default.
pub fn parse_params<T>(module: &str, params: &serde_json::Value) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if params.is_null() {
        return Ok(T::default());
    }
    T::deserialize(params).map_err(|e| EngineError::invalid_parameter(module, e.to_string()))
}
