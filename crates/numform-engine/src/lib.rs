//! Formula compute engine.
//!
//! Turns a raw digit string plus module parameters into a filtered list of
//! fixed-length digit strings. Every request is admitted by the guardrail
//! estimator before any generator runs; modules are looked up in an immutable
//! [`registry::Registry`] and can be chained with the [`pipeline`] runner.

pub mod engine;
pub mod estimate;
pub mod filter;
pub mod generate;
pub mod module;
pub mod modules;
pub mod parser;
pub mod pipeline;
pub mod registry;
pub mod types;

pub use engine::Engine;
pub use registry::Registry;
pub use types::{ComputeOutcome, ComputeRequest, EngineError, PipelineRequest, PipelineStep};
