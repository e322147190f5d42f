//! Engine data model: requests, outcomes, estimates and errors.

use std::fmt;

use numform_core::enums::DataKind;
use serde::{Deserialize, Serialize};

/// Why a request was refused before (or instead of) generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The input pool exceeds `max_n`.
    InputTooLarge { size: usize, max: usize },
    /// The requested group size exceeds `max_k`.
    GroupSizeTooLarge { size: usize, max: usize },
    /// The estimated output exceeds `max_groups_estimate`.
    TooManyGroups { max: u64 },
    /// A parameter was present but malformed or out of range.
    InvalidParameter(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputTooLarge { .. } => f.write_str("Input too large"),
            Self::GroupSizeTooLarge { .. } => f.write_str("Group size too large"),
            Self::TooManyGroups { .. } => f.write_str("Too many groups"),
            Self::InvalidParameter(detail) => write!(f, "Invalid parameter: {detail}"),
        }
    }
}

/// A guardrail or parameter rejection. Expected, user-facing, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: RejectReason,
    pub estimate: Option<u64>,
    /// Pipeline step that was refused, when the request was a pipeline.
    pub step: Option<String>,
}

impl Rejection {
    pub fn new(reason: RejectReason) -> Self {
        Self {
            reason,
            estimate: None,
            step: None,
        }
    }

    pub fn with_estimate(mut self, estimate: u64) -> Self {
        self.estimate = Some(estimate);
        self
    }

    /// Attribute the rejection to a pipeline step unless a nested step
    /// already claimed it.
    pub fn at_step(mut self, step: impl Into<String>) -> Self {
        if self.step.is_none() {
            self.step = Some(step.into());
        }
        self
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if let Some(ref step) = self.step {
            write!(f, " (step {step})")?;
        }
        Ok(())
    }
}

/// Errors surfaced by the engine.
///
/// Only configuration errors are meant to escape [`crate::Engine`]; the
/// recoverable variants are folded into a blocked [`ComputeOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown compute module: {key}")]
    UnknownModule { key: String },

    #[error("step {step} expects {expected} input but receives {found}")]
    ShapeMismatch {
        step: String,
        expected: DataKind,
        found: DataKind,
    },

    #[error("invalid parameter for {module}: {message}")]
    InvalidParameter { module: String, message: String },

    #[error("blocked: {0}")]
    Rejected(Rejection),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the engine crate.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn unknown_module(key: impl Into<String>) -> Self {
        Self::UnknownModule { key: key.into() }
    }

    pub fn invalid_parameter(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for deployment defects (bad module key, incompatible
    /// pipeline shapes). These abort the request.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownModule { .. } | Self::ShapeMismatch { .. })
    }

    /// Returns `true` for errors that resolve into a blocked outcome.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. } | Self::Rejected(_))
    }

    /// Convert a recoverable error into a rejection; other errors are
    /// handed back unchanged.
    pub fn into_rejection(self) -> std::result::Result<Rejection, Self> {
        match self {
            Self::Rejected(rejection) => Ok(rejection),
            Self::InvalidParameter { message, .. } => {
                Ok(Rejection::new(RejectReason::InvalidParameter(message)))
            }
            other => Err(other),
        }
    }
}

/// Upper-bound prediction of a module's output, used only for admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateInfo {
    pub estimated_groups: u64,
    /// Size checked against `max_n` (pool size for generators, item count
    /// for filters).
    pub input_size: usize,
    /// Length of each output string; 0 for modules that do not generate.
    pub group_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Blocked,
}

/// Result of a compute or pipeline request, as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeOutcome {
    pub status: OutcomeStatus,
    pub data: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

impl ComputeOutcome {
    pub fn ok(data: Vec<String>) -> Self {
        Self {
            status: OutcomeStatus::Ok,
            data,
            reason: None,
            estimate: None,
            step: None,
        }
    }

    pub fn blocked(rejection: &Rejection) -> Self {
        Self {
            status: OutcomeStatus::Blocked,
            data: Vec::new(),
            reason: Some(rejection.reason.to_string()),
            estimate: rejection.estimate,
            step: rejection.step.clone(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == OutcomeStatus::Ok
    }

    pub fn is_blocked(&self) -> bool {
        self.status == OutcomeStatus::Blocked
    }
}

/// A single-module request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRequest {
    pub raw_text: String,
    pub module_key: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A multi-step request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRequest {
    pub raw_text: String,
    #[serde(default)]
    pub steps: Vec<PipelineStep>,
}

/// One step of a pipeline: a module reference plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    #[serde(default, rename = "stepId", alias = "id")]
    pub step_id: String,

    #[serde(rename = "moduleKey", alias = "module")]
    pub module_key: String,

    #[serde(default)]
    pub params: serde_json::Value,
}

impl PipelineStep {
    pub fn new(
        step_id: impl Into<String>,
        module_key: impl Into<String>,
        params: serde_json::Value,
    ) -> Self {
        Self {
            step_id: step_id.into(),
            module_key: module_key.into(),
            params,
        }
    }

    /// Display label: the step id, or its 1-based position when unnamed.
    pub fn label(&self, index: usize) -> String {
        if self.step_id.is_empty() {
            format!("#{}", index + 1)
        } else {
            self.step_id.clone()
        }
    }
}

/// Documentation for one module parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_outcome_shape() {
        let rejection = Rejection::new(RejectReason::TooManyGroups { max: 500 }).with_estimate(1000);
        let json = serde_json::to_value(ComputeOutcome::blocked(&rejection)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "blocked",
                "data": [],
                "reason": "Too many groups",
                "estimate": 1000,
            })
        );
    }

    #[test]
    fn ok_outcome_shape() {
        let json = serde_json::to_value(ComputeOutcome::ok(vec!["12".into()])).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok", "data": ["12"]}));
    }

    #[test]
    fn rejection_keeps_innermost_step() {
        let r = Rejection::new(RejectReason::InputTooLarge { size: 11, max: 10 })
            .at_step("inner")
            .at_step("outer");
        assert_eq!(r.step.as_deref(), Some("inner"));
        assert_eq!(r.to_string(), "Input too large (step inner)");
    }

    #[test]
    fn error_classification() {
        assert!(EngineError::unknown_module("nope").is_configuration());
        let invalid = EngineError::invalid_parameter("digit-groups", "groupSize must be at least 1");
        assert!(invalid.is_recoverable());
        assert!(!invalid.is_configuration());
        let rejection = invalid.into_rejection().unwrap();
        assert_eq!(
            rejection.reason.to_string(),
            "Invalid parameter: groupSize must be at least 1"
        );
        assert!(EngineError::unknown_module("nope").into_rejection().is_err());
    }

    #[test]
    fn pipeline_step_accepts_short_keys() {
        let step: PipelineStep =
            serde_json::from_str(r#"{"id": "gen", "module": "digit-groups"}"#).unwrap();
        assert_eq!(step.step_id, "gen");
        assert_eq!(step.module_key, "digit-groups");
        assert!(step.params.is_null());

        let unnamed = PipelineStep::new("", "exclude-edges", serde_json::Value::Null);
        assert_eq!(unnamed.label(1), "#2");
    }
}
