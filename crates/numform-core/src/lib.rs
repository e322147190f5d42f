//! Core types for the numform formula engine.
//!
//! Holds the data model shared by the engine, the configuration layer and the
//! CLI: normalized digit pools, guardrail ceilings, lifecycle enums, formula
//! versions and the capability resolver that gates what a version may do.

pub mod capability;
pub mod digits;
pub mod enums;
pub mod guardrails;
pub mod version;
