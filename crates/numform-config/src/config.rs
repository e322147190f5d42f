//! Configuration types and loading for numform.
//!
//! The main entry point is [`NumformConfig`], which represents the contents of
//! `.numform/config.yaml`. Configuration is layered with `figment`: built-in
//! defaults, then the YAML file, then `NUMFORM_*` environment variables
//! (nested keys separated by `__`, single `_` read as `-`, e.g.
//! `NUMFORM_GUARDRAILS__DIGIT_GROUPS__MAX_K=3`).

use std::collections::HashMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use numform_core::guardrails::Guardrails;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file inside `.numform/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of the environment variables that override file settings.
pub const ENV_PREFIX: &str = "NUMFORM_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// One of the configuration layers could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Per-module guardrail override. Unset fields keep the module's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GuardrailOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_n: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_k: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_groups_estimate: Option<u64>,
}

impl GuardrailOverride {
    /// Apply this override on top of a module's default guardrails.
    pub fn apply(&self, defaults: Guardrails) -> Guardrails {
        defaults.with_overrides(self.max_n, self.max_k, self.max_groups_estimate)
    }

    fn validate(&self, module: &str) -> Result<()> {
        let zero = [
            ("max-n", self.max_n.map(|v| v as u64)),
            ("max-k", self.max_k.map(|v| v as u64)),
            ("max-groups-estimate", self.max_groups_estimate),
        ]
        .into_iter()
        .find(|(_, value)| *value == Some(0));
        if let Some((field, _)) = zero {
            return Err(ConfigError::InvalidValue {
                key: format!("guardrails.{module}.{field}"),
                reason: "must be greater than zero".to_string(),
            });
        }
        if let (Some(max_n), Some(max_k)) = (self.max_n, self.max_k) {
            if max_k > max_n {
                return Err(ConfigError::InvalidValue {
                    key: format!("guardrails.{module}.max-k"),
                    reason: format!("{max_k} is larger than max-n ({max_n})"),
                });
            }
        }
        Ok(())
    }
}

/// Output configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Sort results lexicographically before display.
    #[serde(default = "default_true")]
    pub sort: bool,

    /// Output JSON instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sort: true,
            json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full numform configuration, corresponding to `.numform/config.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly with sensible default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NumformConfig {
    /// Guardrail overrides keyed by compute module key.
    #[serde(default)]
    pub guardrails: HashMap<String, GuardrailOverride>,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

impl NumformConfig {
    /// Guardrails for `module`: its defaults with any configured override applied.
    pub fn guardrails_for(&self, module: &str, defaults: Guardrails) -> Guardrails {
        match self.guardrails.get(module) {
            Some(o) => {
                let tuned = o.apply(defaults);
                debug!(module, ?defaults, ?tuned, "applying guardrail override");
                tuned
            }
            None => defaults,
        }
    }

    /// Reject overrides that would make a module unusable or incoherent.
    pub fn validate(&self) -> Result<()> {
        let mut modules: Vec<&String> = self.guardrails.keys().collect();
        modules.sort();
        for module in modules {
            self.guardrails[module].validate(module)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The layered provider stack for a config file: defaults, file, environment.
pub fn figment(config_path: &Path) -> Figment {
    Figment::from(Serialized::defaults(NumformConfig::default()))
        .merge(Yaml::file(config_path))
        .merge(env())
}

fn env() -> Env {
    Env::prefixed(ENV_PREFIX)
        .split("__")
        .map(|key| key.as_str().replace('_', "-").into())
}

/// Load configuration from `config.yaml` inside the given `.numform/` directory.
///
/// A missing file yields the defaults (still subject to environment overrides).
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if a layer is malformed, or
/// [`ConfigError::InvalidValue`] if a guardrail override is not usable.
pub fn load_config(numform_dir: &Path) -> Result<NumformConfig> {
    load_config_file(&numform_dir.join(CONFIG_FILE))
}

/// Load configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<NumformConfig> {
    debug!(path = %path.display(), exists = path.is_file(), "loading configuration");
    // An empty file is valid and yields the defaults.
    if std::fs::read_to_string(path).is_ok_and(|c| c.trim().is_empty()) {
        debug!(path = %path.display(), "configuration file is empty");
        return extract(Figment::from(Serialized::defaults(NumformConfig::default())).merge(env()));
    }
    extract(figment(path))
}

fn extract(figment: Figment) -> Result<NumformConfig> {
    let config: NumformConfig = figment.extract().map_err(Box::new)?;
    config.validate()?;
    debug!(
        overrides = config.guardrails.len(),
        sort = config.output.sort,
        json = config.output.json,
        "configuration resolved"
    );
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.numform/` directory.
///
/// The directory is created if it does not exist.
pub fn save_config(numform_dir: &Path, config: &NumformConfig) -> Result<()> {
    config.validate()?;
    std::fs::create_dir_all(numform_dir)?;

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(numform_dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
