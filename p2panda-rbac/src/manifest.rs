// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read `Role` and `ClusterRole` manifests from YAML or JSON.
//!
//! Only the parts relevant for validation are decoded: kind, name, namespace and rules. Every
//! other field of the manifest is ignored.
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ManifestError;
use crate::rule::{PolicyRule, Role};

/// Kinds of manifests carrying authorization rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleKind {
    Role,
    ClusterRole,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoleKind::Role => "Role",
            RoleKind::ClusterRole => "ClusterRole",
        };

        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A decoded `Role` or `ClusterRole` manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleManifest {
    #[serde(default)]
    pub api_version: String,

    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl RoleManifest {
    /// Kind of the manifest, fails for anything but `Role` and `ClusterRole`.
    pub fn role_kind(&self) -> Result<RoleKind, ManifestError> {
        match self.kind.as_str() {
            "Role" => Ok(RoleKind::Role),
            "ClusterRole" => Ok(RoleKind::ClusterRole),
            other => Err(ManifestError::UnexpectedKind(other.to_string())),
        }
    }

    pub fn into_role(self) -> Role {
        Role {
            name: self.metadata.name,
            namespace: self.metadata.namespace,
            rules: self.rules,
        }
    }
}

/// Decodes a manifest from a YAML document.
pub fn from_yaml_str(yaml: &str) -> Result<RoleManifest, ManifestError> {
    let manifest: RoleManifest = serde_yaml::from_str(yaml)?;
    manifest.role_kind()?;
    Ok(manifest)
}

/// Decodes a manifest from a JSON document.
pub fn from_json_str(json: &str) -> Result<RoleManifest, ManifestError> {
    let manifest: RoleManifest = serde_json::from_str(json)?;
    manifest.role_kind()?;
    Ok(manifest)
}

/// Reads a manifest from disk. Files ending in `.json` are decoded as JSON, everything else as
/// YAML.
pub fn from_path(path: impl AsRef<Path>) -> Result<RoleManifest, ManifestError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    let manifest = if is_json {
        from_json_str(&contents)?
    } else {
        from_yaml_str(&contents)?
    };

    debug!(
        path = %path.display(),
        kind = %manifest.kind,
        name = %manifest.metadata.name,
        rules = manifest.rules.len(),
        "loaded rbac manifest"
    );

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::error::ManifestError;
    use crate::rule::PolicyRule;

    use super::{RoleKind, from_json_str, from_yaml_str};

    const TOKEN_REQUEST_ROLE: &str = r#"
apiVersion: rbac.authorization.k8s.io/v1
kind: Role
metadata:
  name: cert-manager-tokenrequest
  namespace: cert-manager
  labels:
    app: cert-manager
rules:
  - apiGroups: [""]
    resources: ["serviceaccounts/token"]
    resourceNames: ["cert-manager"]
    verbs: ["create"]
"#;

    #[test]
    fn decode_yaml_role() {
        let manifest = from_yaml_str(TOKEN_REQUEST_ROLE).unwrap();
        assert_eq!(manifest.role_kind().unwrap(), RoleKind::Role);
        assert_eq!(manifest.api_version, "rbac.authorization.k8s.io/v1");

        let role = manifest.into_role();
        assert_eq!(role.name, "cert-manager-tokenrequest");
        assert_eq!(role.namespace.as_deref(), Some("cert-manager"));
        assert_eq!(
            role.rules,
            vec![
                PolicyRule::new([""], ["serviceaccounts/token"], ["create"])
                    .with_resource_names(["cert-manager"])
            ]
        );
    }

    #[test]
    fn decode_json_cluster_role() {
        let json = r#"{
            "apiVersion": "rbac.authorization.k8s.io/v1",
            "kind": "ClusterRole",
            "metadata": { "name": "cert-manager-operator-manager-role" },
            "rules": [
                { "apiGroups": [""], "resources": ["configmaps"], "verbs": ["get", "list"] }
            ]
        }"#;

        let manifest = from_json_str(json).unwrap();
        assert_eq!(manifest.role_kind().unwrap(), RoleKind::ClusterRole);
        assert_eq!(manifest.rules.len(), 1);
        assert_eq!(manifest.into_role().namespace, None);
    }

    #[test]
    fn cluster_role_without_rules() {
        let manifest = from_yaml_str("kind: ClusterRole\nmetadata:\n  name: aggregated\n").unwrap();
        assert!(manifest.rules.is_empty());
    }

    #[test]
    fn reject_other_kinds() {
        let yaml = "kind: RoleBinding\nmetadata:\n  name: binding\n";
        assert_matches!(
            from_yaml_str(yaml),
            Err(ManifestError::UnexpectedKind(kind)) if kind == "RoleBinding"
        );
    }

    #[test]
    fn reject_malformed_documents() {
        assert_matches!(from_yaml_str("rules: ["), Err(ManifestError::Yaml(_)));
        assert_matches!(from_json_str("{"), Err(ManifestError::Json(_)));
        assert_matches!(from_yaml_str("metadata: {}"), Err(ManifestError::Yaml(_)));
    }
}
