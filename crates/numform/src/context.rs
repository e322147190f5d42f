//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: global flags,
//! the loaded configuration and where recipes are looked up.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use numform_config::config::{NumformConfig, load_config};
use numform_config::numform_dir::{NUMFORM_DIR_NAME, find_numform_dir};
use numform_engine::{Engine, Registry};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Directory the configuration was loaded from, when one exists.
    pub config_dir: Option<PathBuf>,

    /// Working directory at startup.
    pub cwd: PathBuf,

    pub config: NumformConfig,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Configuration comes from `--config`, else the nearest `.numform/`
    /// above the working directory, else built-in defaults.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("cannot determine working directory")?;
        let config_dir = match &global.config {
            Some(dir) => Some(dir.clone()),
            None => find_numform_dir(&cwd),
        };

        let config = match &config_dir {
            Some(dir) => load_config(dir)
                .with_context(|| format!("loading configuration from {}", dir.display()))?,
            None => load_config(&cwd.join(NUMFORM_DIR_NAME))?,
        };
        debug!(config_dir = ?config_dir, "configuration loaded");

        Ok(Self {
            json: global.json || config.output.json,
            verbose: global.verbose,
            config_dir,
            cwd,
            config,
        })
    }

    /// An engine over the built-in modules with configured guardrail overrides.
    pub fn engine(&self) -> Engine {
        Engine::new(Registry::builtin_with(|key, defaults| {
            self.config.guardrails_for(key, defaults)
        }))
    }

    /// Directory recipes are resolved against: the project holding
    /// `.numform/`, or the working directory.
    pub fn recipe_root(&self) -> PathBuf {
        self.config_dir
            .as_deref()
            .and_then(|dir| dir.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Whether results should be sorted for display.
    pub fn sort_output(&self, no_sort: bool) -> bool {
        self.config.output.sort && !no_sort
    }
}
