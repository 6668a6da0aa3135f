// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render rules back into declarative `rbac:` markers.
//!
//! A marker has the form
//!
//! ```text
//! rbac:groups=<g1;g2>,resources=<r1;r2>,verbs=<v1;v2>[,resourceNames=<n1;n2>]
//! ```
//!
//! Values keep their input order and are neither sorted nor deduplicated. The core API group is
//! written as `""` so it can be told apart from a missing value.
use std::fmt;

use crate::config::AnnotationConfig;
use crate::rule::PolicyRule;

/// Token standing in for an empty list of API groups.
pub const CORE_GROUP: &str = r#""""#;

/// A rule rendered as `rbac:` marker.
///
/// ```
/// use p2panda_rbac::{Annotation, PolicyRule};
///
/// let rule = PolicyRule::new([""], ["serviceaccounts/token"], ["create"]);
/// assert_eq!(
///     Annotation::new(&rule).to_string(),
///     r#"rbac:groups="",resources=serviceaccounts/token,verbs=create"#,
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Annotation<'a> {
    rule: &'a PolicyRule,
}

impl<'a> Annotation<'a> {
    pub fn new(rule: &'a PolicyRule) -> Self {
        Self { rule }
    }
}

impl fmt::Display for Annotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.rule.api_groups.join(";");
        let groups = if groups.is_empty() {
            CORE_GROUP
        } else {
            groups.as_str()
        };

        write!(
            f,
            "rbac:groups={},resources={},verbs={}",
            groups,
            self.rule.resources.join(";"),
            self.rule.verbs.join(";")
        )?;

        if self.rule.has_resource_names() {
            write!(f, ",resourceNames={}", self.rule.resource_names.join(";"))?;
        }

        Ok(())
    }
}

/// Renders one marker per rule, in input order, prefixed as configured.
pub fn render_annotations(rules: &[PolicyRule], config: &AnnotationConfig) -> Vec<String> {
    rules
        .iter()
        .map(|rule| format!("{}{}", config.marker_prefix, Annotation::new(rule)))
        .collect()
}
