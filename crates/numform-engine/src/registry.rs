//! Compute-module registry.
//!
//! Built once at startup and read-only afterwards. There is no global
//! instance: callers own their registry, so tests can build as many as they
//! like.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use numform_core::guardrails::Guardrails;
use tracing::{debug, warn};

use crate::module::ComputeModule;
use crate::modules::{Chain, DigitGroups, ExcludeEdges, PairPermutations, StaticPreset};
use crate::modules::{chain, digit_groups, exclude, pairs, preset};

/// Immutable mapping from module key to module.
#[derive(Clone, Default)]
pub struct Registry {
    modules: BTreeMap<String, Arc<dyn ComputeModule>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// A registry with no modules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All built-in modules with their default guardrails.
    pub fn builtin() -> Self {
        Self::builtin_with(|_, defaults| defaults)
    }

    /// All built-in modules, letting `tune` adjust each module's guardrails.
    ///
    /// `tune` receives the module key and its default guardrails.
    pub fn builtin_with<F>(tune: F) -> Self
    where
        F: Fn(&str, Guardrails) -> Guardrails,
    {
        Self::builder()
            .register(DigitGroups::new(tune(
                digit_groups::KEY,
                digit_groups::DEFAULT_GUARDRAILS,
            )))
            .register(StaticPreset::new(tune(preset::KEY, preset::DEFAULT_GUARDRAILS)))
            .register(PairPermutations::new(tune(pairs::KEY, pairs::DEFAULT_GUARDRAILS)))
            .register(ExcludeEdges::new(tune(exclude::KEY, exclude::DEFAULT_GUARDRAILS)))
            .register(Chain::new(tune(chain::KEY, chain::DEFAULT_GUARDRAILS)))
            .build()
    }

    /// Look up a module; `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<&dyn ComputeModule> {
        self.modules.get(key).map(|m| m.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    /// Modules in key order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ComputeModule> {
        self.modules.values().map(|m| m.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.modules.keys()).finish()
    }
}

/// Collects modules before freezing them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    modules: BTreeMap<String, Arc<dyn ComputeModule>>,
}

impl RegistryBuilder {
    /// Add a module. A later registration under the same key replaces the
    /// earlier one.
    pub fn register<M: ComputeModule + 'static>(mut self, module: M) -> Self {
        let key = module.key().to_string();
        debug!(key = %key, guardrails = ?module.guardrails(), "registering compute module");
        if self.modules.insert(key.clone(), Arc::new(module)).is_some() {
            warn!(key = %key, "compute module registered twice; keeping the last one");
        }
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            modules: self.modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_keys() {
        let registry = Registry::builtin();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(
            keys,
            vec![
                "digit-groups",
                "exclude-edges",
                "pair-permutations",
                "pipeline",
                "static-preset",
            ]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn unknown_key_is_none() {
        let registry = Registry::builtin();
        assert!(registry.get("nope").is_none());
        assert!(!registry.contains("nope"));
        assert!(Registry::empty().is_empty());
    }

    #[test]
    fn builtin_with_tunes_guardrails() {
        let registry = Registry::builtin_with(|key, defaults| {
            if key == "digit-groups" {
                defaults.with_overrides(None, Some(3), Some(500))
            } else {
                defaults
            }
        });
        let g = registry.get("digit-groups").unwrap().guardrails();
        assert_eq!(g, Guardrails::new(10, 3, 500));
        assert_eq!(
            registry.get("pair-permutations").unwrap().guardrails(),
            pairs::DEFAULT_GUARDRAILS
        );
    }

    #[test]
    fn later_registration_wins() {
        let registry = Registry::builder()
            .register(DigitGroups::default())
            .register(DigitGroups::new(Guardrails::new(4, 2, 10)))
            .build();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("digit-groups").unwrap().guardrails(),
            Guardrails::new(4, 2, 10)
        );
    }

    #[test]
    fn debug_lists_keys() {
        let registry = Registry::builder().register(ExcludeEdges::default()).build();
        assert_eq!(format!("{registry:?}"), "[\"exclude-edges\"]");
    }
}
