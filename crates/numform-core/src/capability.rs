//! Capability resolution for formula versions.
//!
//! Capabilities are never stored. They are recomputed from a version's
//! lifecycle status and lock flag every time a consumer asks, so a status
//! change takes effect immediately.

use serde::{Deserialize, Serialize};

use crate::enums::{LifecycleStatus, Severity};

pub const MSG_DRAFT: &str = "Testing / Preview only";
pub const MSG_ACTIVE: &str = "Active";
pub const MSG_LOCKED: &str = "Locked";
pub const MSG_DEPRECATED: &str = "Deprecated — consent required";
pub const MSG_ARCHIVED: &str = "Archived — panel disabled";

/// What a consumer may do with a formula version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaCapabilities {
    pub can_compute: bool,
    pub can_copy: bool,
    /// An explicit consent step must precede copying results.
    pub requires_consent: bool,
    /// The whole panel is disabled.
    pub is_blocked: bool,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Map a lifecycle status and lock flag to a capability set.
///
/// The lock flag only changes the message of an active version. Unknown
/// statuses get the permissive default.
pub fn resolve(status: &LifecycleStatus, is_locked: bool) -> FormulaCapabilities {
    match status {
        LifecycleStatus::Draft => FormulaCapabilities {
            can_compute: true,
            can_copy: false,
            requires_consent: false,
            is_blocked: false,
            severity: Severity::Warn,
            message: Some(MSG_DRAFT.to_string()),
        },
        LifecycleStatus::Active => FormulaCapabilities {
            can_compute: true,
            can_copy: true,
            requires_consent: false,
            is_blocked: false,
            severity: Severity::Info,
            message: Some(if is_locked { MSG_LOCKED } else { MSG_ACTIVE }.to_string()),
        },
        LifecycleStatus::Deprecated => FormulaCapabilities {
            can_compute: true,
            can_copy: false,
            requires_consent: true,
            is_blocked: false,
            severity: Severity::Warn,
            message: Some(MSG_DEPRECATED.to_string()),
        },
        LifecycleStatus::Archived => FormulaCapabilities {
            can_compute: false,
            can_copy: false,
            requires_consent: false,
            is_blocked: true,
            severity: Severity::Block,
            message: Some(MSG_ARCHIVED.to_string()),
        },
        LifecycleStatus::Other(_) => FormulaCapabilities {
            can_compute: true,
            can_copy: true,
            requires_consent: false,
            is_blocked: false,
            severity: Severity::Info,
            message: None,
        },
    }
}
