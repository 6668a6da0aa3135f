// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for suggestion rendering and rule audits.
//!
//! `AnnotationConfig` controls how missing rules are written back as declarative markers.
//! `AuditConfig` selects which patterns an audit of granted rules reports.
use serde::{Deserialize, Serialize};

/// Default prefix written in front of rendered `rbac:` markers.
pub const DEFAULT_MARKER_PREFIX: &str = "//+kubebuilder:";

/// Verbs reported by default when auditing granted rules.
pub const DEFAULT_DANGEROUS_VERBS: [&str; 4] =
    ["delete", "deletecollection", "escalate", "impersonate"];

/// Configuration parameters for rendering suggestions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Text written in front of `rbac:`, for example a comment marker.
    pub marker_prefix: String,
}

impl AnnotationConfig {
    /// Renders markers starting directly with `rbac:`.
    pub fn bare() -> Self {
        Self {
            marker_prefix: String::new(),
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
        }
    }
}

/// Configuration parameters for auditing granted rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Report `*` in API groups, resources or verbs.
    pub flag_wildcards: bool,

    /// Verbs which are worth a second look whenever they are granted.
    pub dangerous_verbs: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            flag_wildcards: true,
            dangerous_verbs: DEFAULT_DANGEROUS_VERBS
                .iter()
                .map(|verb| verb.to_string())
                .collect(),
        }
    }
}
