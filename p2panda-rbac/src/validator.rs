// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::annotation::render_annotations;
use crate::config::AnnotationConfig;
use crate::error::ValidationError;
use crate::matching::rule_covers;
use crate::report::{Remediation, ValidationReport};
use crate::rule::{PolicyRule, Role};
use crate::source::RuleSource;

/// Checks if an actor holding a set of granted rules can create or delegate other roles without
/// escalating its privileges.
///
/// The granted rules are fixed on construction and never change afterwards, a validator can be
/// shared freely between threads. All methods are pure functions of the granted rules and their
/// arguments.
///
/// ```
/// use p2panda_rbac::{PolicyRule, RbacValidator, Role};
///
/// let validator = RbacValidator::new(vec![PolicyRule::new(
///     [""],
///     ["serviceaccounts", "configmaps"],
///     ["get", "list", "create"],
/// )]);
///
/// let role = Role::new(
///     "cert-manager-tokenrequest",
///     vec![PolicyRule::new([""], ["serviceaccounts/token"], ["create"])],
/// );
///
/// assert!(validator.validate_role(&role).is_err());
/// assert_eq!(validator.missing_permissions(&role), role.rules);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RbacValidator {
    granted: Vec<PolicyRule>,
    annotations: AnnotationConfig,
}

impl RbacValidator {
    /// Validator for an actor holding the given rules. An empty list grants nothing.
    pub fn new(granted: impl Into<Vec<PolicyRule>>) -> Self {
        Self {
            granted: granted.into(),
            annotations: AnnotationConfig::default(),
        }
    }

    /// Validator for the rules handed out by a rule source.
    pub fn from_source<S>(source: &S) -> Result<Self, S::Error>
    where
        S: RuleSource + ?Sized,
    {
        Ok(Self::new(source.granted_rules()?))
    }

    /// Use a custom configuration when rendering suggestions.
    pub fn with_annotation_config(mut self, config: AnnotationConfig) -> Self {
        self.annotations = config;
        self
    }

    /// Rules held by the granting actor.
    pub fn granted_rules(&self) -> &[PolicyRule] {
        &self.granted
    }

    /// Returns true if any granted rule covers the requested rule.
    pub fn can_grant(&self, rule: &PolicyRule) -> bool {
        self.granted.iter().any(|granted| rule_covers(granted, rule))
    }

    /// Checks that every rule of the role is covered.
    ///
    /// Fails on the first uncovered rule. Use [`RbacValidator::missing_permissions`] to learn
    /// about all of them.
    pub fn validate_role(&self, role: &Role) -> Result<(), ValidationError> {
        match role.rules.iter().find(|rule| !self.can_grant(rule)) {
            Some(rule) => Err(ValidationError::MissingPermissions {
                role: role.name.clone(),
                rule: rule.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Validates every role and collects one error per failing role, in input order.
    pub fn validate_all<'a, I>(&self, roles: I) -> ValidationReport
    where
        I: IntoIterator<Item = &'a Role>,
    {
        let mut report = ValidationReport::default();
        for role in roles {
            if let Err(err) = self.validate_role(role) {
                report.push(err);
            }
        }
        report
    }

    /// All rules of the role which are not covered, in their original order.
    ///
    /// Identical rules are reported once per occurrence.
    pub fn missing_permissions(&self, role: &Role) -> Vec<PolicyRule> {
        role.rules
            .iter()
            .filter(|rule| !self.can_grant(rule))
            .cloned()
            .collect()
    }

    /// Renders one `rbac:` marker per missing rule.
    ///
    /// This is a plain transcription of the given rules, the granted rules are not consulted.
    pub fn suggest_annotations(&self, missing: &[PolicyRule]) -> Vec<String> {
        render_annotations(missing, &self.annotations)
    }

    /// Missing rules of a role together with the markers needed to request them. Returns `None`
    /// if the role can be created.
    pub fn remediation(&self, role: &Role) -> Option<Remediation> {
        let missing = self.missing_permissions(role);
        if missing.is_empty() {
            return None;
        }

        let suggestions = self.suggest_annotations(&missing);
        Some(Remediation {
            role: role.name.clone(),
            missing,
            suggestions,
        })
    }

    /// Remediations for every role which can't be created, in input order.
    pub fn remediations<'a, I>(&self, roles: I) -> Vec<Remediation>
    where
        I: IntoIterator<Item = &'a Role>,
    {
        roles
            .into_iter()
            .filter_map(|role| self.remediation(role))
            .collect()
    }
}
