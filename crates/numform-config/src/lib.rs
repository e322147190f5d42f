//! Configuration management for numform.
//!
//! This crate handles loading and saving `.numform/config.yaml` files,
//! discovering `.numform/` directories in the filesystem, and turning the
//! per-module guardrail overrides into concrete [`numform_core::guardrails::Guardrails`].

pub mod config;
pub mod numform_dir;
