// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rstest` fixtures which can be injected into tests.
//!
//! The rule sets model an operator which creates the roles of a cert-manager deployment: its
//! `ClusterRole` before and after it was granted `serviceaccounts/token`, and the role it failed
//! to create.
use rstest::fixture;

use crate::rule::{PolicyRule, Role};

const VERBS: [&str; 7] = ["create", "delete", "get", "list", "patch", "update", "watch"];

/// Core group resources granted to the operator, without any sub-resources.
#[fixture]
pub fn cert_manager_rules() -> Vec<PolicyRule> {
    vec![PolicyRule::new(
        [""],
        ["serviceaccounts", "configmaps"],
        ["get", "list", "create", "update", "patch", "delete"],
    )]
}

/// Operator rules lacking the `serviceaccounts/token` sub-resource.
#[fixture]
pub fn operator_rules_before_fix() -> Vec<PolicyRule> {
    vec![
        PolicyRule::new(
            [""],
            [
                "configmaps",
                "events",
                "namespaces",
                "pods",
                "secrets",
                "serviceaccounts",
                "services",
            ],
            VERBS,
        ),
        PolicyRule::new(
            ["rbac.authorization.k8s.io"],
            ["roles", "rolebindings", "clusterroles", "clusterrolebindings"],
            VERBS,
        ),
    ]
}

/// Operator rules including an explicit grant for `serviceaccounts/token`.
#[fixture]
pub fn operator_rules_after_fix(operator_rules_before_fix: Vec<PolicyRule>) -> Vec<PolicyRule> {
    let mut rules = operator_rules_before_fix;
    rules.insert(1, PolicyRule::new([""], ["serviceaccounts/token"], ["create"]));
    rules
}

/// Role allowing cert-manager to request tokens for its own service account.
#[fixture]
pub fn token_request_role() -> Role {
    Role::new(
        "cert-manager-tokenrequest",
        vec![
            PolicyRule::new([""], ["serviceaccounts/token"], ["create"])
                .with_resource_names(["cert-manager"]),
        ],
    )
    .with_namespace("cert-manager")
}

/// A single rule granting everything.
#[fixture]
pub fn wildcard_rules() -> Vec<PolicyRule> {
    vec![PolicyRule::new(["*"], ["*"], ["*"])]
}
