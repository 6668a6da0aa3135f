// SPDX-License-Identifier: MIT OR Apache-2.0

//! Privilege escalation checks for role-based access-control rule sets.
//!
//! An actor which creates roles for others, for example a Kubernetes operator deploying its
//! operands, can only hand out permissions it holds itself. This crate decides whether the rules
//! of an actor cover the rules of the roles it is about to create, reports every rule which is
//! missing and renders the declarative `rbac:` markers needed to request them.
//!
//! Matching follows role-based access-control semantics:
//!
//! - API groups, resources and verbs are flat sets; `*` on the granted side matches everything.
//! - Sub-resources like `serviceaccounts/token` are opaque, `serviceaccounts` does not imply
//!   them.
//! - Resource names are only compared when both the granted and the requested rule list some.
//!
//! ```
//! use p2panda_rbac::{PolicyRule, RbacValidator, Role};
//!
//! let operator = RbacValidator::new(vec![
//!     PolicyRule::new([""], ["serviceaccounts", "configmaps"], ["get", "list", "create"]),
//! ]);
//!
//! let roles = vec![
//!     Role::new(
//!         "cert-manager-tokenrequest",
//!         vec![
//!             PolicyRule::new([""], ["serviceaccounts/token"], ["create"])
//!                 .with_resource_names(["cert-manager"]),
//!         ],
//!     ),
//!     Role::new(
//!         "cert-manager-configmaps",
//!         vec![PolicyRule::new([""], ["configmaps"], ["get"])],
//!     ),
//! ];
//!
//! let report = operator.validate_all(&roles);
//! assert_eq!(report.failed_roles(), vec!["cert-manager-tokenrequest"]);
//!
//! let missing = operator.missing_permissions(&roles[0]);
//! assert_eq!(
//!     operator.suggest_annotations(&missing),
//!     vec![
//!         r#"//+kubebuilder:rbac:groups="",resources=serviceaccounts/token,verbs=create,resourceNames=cert-manager"#
//!     ],
//! );
//! ```
mod annotation;
pub mod audit;
pub mod config;
mod error;
#[cfg(feature = "manifest")]
pub mod manifest;
pub mod matching;
mod report;
mod rule;
pub mod source;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod validator;

pub use annotation::{Annotation, CORE_GROUP, render_annotations};
pub use audit::{Finding, Severity, audit_rules};
pub use config::{AnnotationConfig, AuditConfig};
pub use error::{ManifestError, ValidationError};
pub use matching::WILDCARD;
pub use report::{Remediation, ValidationReport};
pub use rule::{PolicyRule, Role};
pub use source::{RequestSource, RuleSource};
#[cfg(feature = "manifest")]
pub use source::{ManifestCatalog, ManifestFile};
pub use validator::RbacValidator;
