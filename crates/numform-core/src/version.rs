//! Formula and formula-version records.
//!
//! A formula owns an ordered list of versions. Each version pins a compute
//! module key and its parameter values; its lifecycle status decides what
//! consumers may do with it (see [`crate::capability`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::capability::{self, FormulaCapabilities};
use crate::enums::LifecycleStatus;

/// Errors raised when parsing a version string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("version must have the form MAJOR.MINOR.PATCH (got '{0}')")]
    Malformed(String),

    #[error("invalid version component '{component}' in '{version}'")]
    InvalidComponent { version: String, component: String },
}

/// A `MAJOR.MINOR.PATCH` version, ordered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for SemVer {
    type Err = VersionError;

    /// Accepts an optional leading `v`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let parts: Vec<&str> = body.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::Malformed(s.to_string()));
        }
        let mut nums = [0u64; 3];
        for (slot, part) in nums.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| VersionError::InvalidComponent {
                    version: s.to_string(),
                    component: (*part).to_string(),
                })?;
        }
        Ok(Self::new(nums[0], nums[1], nums[2]))
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for SemVer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemVer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One published revision of a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaVersion {
    pub version: SemVer,

    #[serde(default)]
    pub status: LifecycleStatus,

    /// Registry key of the compute module this version runs.
    pub compute_key: String,

    /// Parameters handed to the compute module.
    #[serde(default = "empty_params")]
    pub param_values: serde_json::Value,

    #[serde(default)]
    pub is_locked: bool,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl FormulaVersion {
    pub fn capabilities(&self) -> FormulaCapabilities {
        capability::resolve(&self.status, self.is_locked)
    }
}

/// A formula and its version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub key: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub versions: Vec<FormulaVersion>,
}

impl Formula {
    /// The highest active version, if any.
    pub fn latest_active(&self) -> Option<&FormulaVersion> {
        self.versions
            .iter()
            .filter(|v| v.status == LifecycleStatus::Active)
            .max_by_key(|v| v.version)
    }

    pub fn find_version(&self, version: &SemVer) -> Option<&FormulaVersion> {
        self.versions.iter().find(|v| &v.version == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Severity;

    fn version(v: &str, status: &str) -> FormulaVersion {
        FormulaVersion {
            version: v.parse().unwrap(),
            status: LifecycleStatus::from(status),
            compute_key: "digit-groups".into(),
            param_values: empty_params(),
            is_locked: false,
        }
    }

    #[test]
    fn semver_parse_and_order() {
        let a: SemVer = "1.2.10".parse().unwrap();
        let b: SemVer = "v1.10.0".parse().unwrap();
        assert!(a < b);
        assert_eq!(b.to_string(), "1.10.0");
    }

    #[test]
    fn semver_rejects_bad_input() {
        assert_eq!(
            "1.2".parse::<SemVer>(),
            Err(VersionError::Malformed("1.2".into()))
        );
        assert!(matches!(
            "1.x.0".parse::<SemVer>(),
            Err(VersionError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn latest_active_skips_other_statuses() {
        let formula = Formula {
            key: "pairs".into(),
            name: "Pairs".into(),
            versions: vec![
                version("1.0.0", "active"),
                version("1.3.0", "draft"),
                version("1.2.0", "active"),
                version("2.0.0", "archived"),
            ],
        };
        let latest = formula.latest_active().unwrap();
        assert_eq!(latest.version, SemVer::new(1, 2, 0));
    }

    #[test]
    fn latest_active_none_without_active() {
        let formula = Formula {
            key: "pairs".into(),
            name: String::new(),
            versions: vec![version("0.1.0", "draft"), version("0.2.0", "deprecated")],
        };
        assert!(formula.latest_active().is_none());
    }

    #[test]
    fn version_capabilities_follow_status() {
        let mut v = version("1.0.0", "active");
        v.is_locked = true;
        let caps = v.capabilities();
        assert!(caps.can_copy);
        assert_eq!(caps.message.as_deref(), Some("Locked"));

        let archived = version("1.0.0", "archived");
        assert_eq!(archived.capabilities().severity, Severity::Block);
    }

    #[test]
    fn deserialize_version_defaults() {
        let json = r#"{"version": "1.0.0", "computeKey": "static-preset"}"#;
        let v: FormulaVersion = serde_json::from_str(json).unwrap();
        assert_eq!(v.status, LifecycleStatus::Draft);
        assert!(!v.is_locked);
        assert!(v.param_values.as_object().unwrap().is_empty());
        assert_eq!(serde_json::to_value(&v).unwrap()["version"], "1.0.0");
    }

    #[test]
    fn find_version_by_semver() {
        let formula = Formula {
            key: "k".into(),
            name: String::new(),
            versions: vec![version("1.0.0", "active"), version("1.1.0", "draft")],
        };
        let found = formula.find_version(&SemVer::new(1, 1, 0)).unwrap();
        assert_eq!(found.status, LifecycleStatus::Draft);
        assert!(formula.find_version(&SemVer::new(9, 0, 0)).is_none());
    }
}
