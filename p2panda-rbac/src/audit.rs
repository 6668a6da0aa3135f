// SPDX-License-Identifier: MIT OR Apache-2.0

//! Least-privilege audit of the rules held by an actor.
//!
//! Wildcards are reported as errors since they grant far more than any single role needs.
//! Dangerous verbs are reported as warnings: they might be required, but deserve a second look.
use std::fmt;

use crate::config::AuditConfig;
use crate::matching::has_wildcard;
use crate::rule::PolicyRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A pattern found in a granted rule, pointing at the rule by its index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    WildcardApiGroup { rule: usize },
    WildcardResource { rule: usize },
    WildcardVerb { rule: usize },
    DangerousVerb { rule: usize, verb: String },
}

impl Finding {
    pub fn rule_index(&self) -> usize {
        match self {
            Finding::WildcardApiGroup { rule }
            | Finding::WildcardResource { rule }
            | Finding::WildcardVerb { rule }
            | Finding::DangerousVerb { rule, .. } => *rule,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Finding::DangerousVerb { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::WildcardApiGroup { rule } => write!(
                f,
                "rule {rule} has wildcard API group '*', consider being more specific"
            ),
            Finding::WildcardResource { rule } => write!(
                f,
                "rule {rule} has wildcard resource '*', consider being more specific"
            ),
            Finding::WildcardVerb { rule } => write!(
                f,
                "rule {rule} has wildcard verb '*', consider the principle of least privilege"
            ),
            Finding::DangerousVerb { rule, verb } => write!(
                f,
                "rule {rule} has potentially dangerous permission '{verb}', verify this is needed"
            ),
        }
    }
}

/// Audits granted rules, returning findings ordered by rule index.
pub fn audit_rules(rules: &[PolicyRule], config: &AuditConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        if config.flag_wildcards {
            if has_wildcard(&rule.api_groups) {
                findings.push(Finding::WildcardApiGroup { rule: index });
            }
            if has_wildcard(&rule.resources) {
                findings.push(Finding::WildcardResource { rule: index });
            }
            if has_wildcard(&rule.verbs) {
                findings.push(Finding::WildcardVerb { rule: index });
            }
        }

        for verb in &rule.verbs {
            if config.dangerous_verbs.contains(verb) {
                findings.push(Finding::DangerousVerb {
                    rule: index,
                    verb: verb.clone(),
                });
            }
        }
    }

    findings
}
