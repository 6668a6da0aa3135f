// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::rule::PolicyRule;

/// Errors returned when a role asks for permissions the granting actor does not hold.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The first rule of the role which is not covered by any granted rule.
    #[error("cannot create role {role}: missing permissions for {}", RuleSummary(.rule))]
    MissingPermissions { role: String, rule: PolicyRule },
}

impl ValidationError {
    /// Name of the role which failed validation.
    pub fn role(&self) -> &str {
        match self {
            ValidationError::MissingPermissions { role, .. } => role,
        }
    }

    /// The requested rule which is not covered.
    pub fn rule(&self) -> &PolicyRule {
        match self {
            ValidationError::MissingPermissions { rule, .. } => rule,
        }
    }
}

/// Errors which can occur when reading role manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "manifest")]
    #[error("invalid yaml manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "manifest")]
    #[error("invalid json manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a Role or ClusterRole manifest, got kind '{0}'")]
    UnexpectedKind(String),

    #[error("manifest {} not found in catalog", .0.display())]
    NotFound(PathBuf),
}

/// Renders the groups, resources and verbs of a rule for error messages.
struct RuleSummary<'a>(&'a PolicyRule);

impl fmt::Display for RuleSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "APIGroups:{} Resources:{} Verbs:{}",
            List(&self.0.api_groups),
            List(&self.0.resources),
            List(&self.0.verbs)
        )
    }
}

struct List<'a>(&'a [String]);

impl fmt::Display for List<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(" "))
    }
}
