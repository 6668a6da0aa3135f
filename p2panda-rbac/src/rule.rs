// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// A single authorization rule, describing which verbs may be applied to which resources in which
/// API groups.
///
/// The four attributes are independent axes. A rule grants the cartesian product of
/// `api_groups × resources × verbs`, further narrowed to the named instances listed in
/// `resource_names` when that list is not empty.
///
/// The empty string is a valid API group and names the "core" group. This is different from an
/// empty `api_groups` list. Compound resource tokens like `serviceaccounts/token` name a
/// sub-resource and are treated as opaque strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    /// API groups the rule applies to, `*` for all.
    #[serde(default)]
    pub api_groups: Vec<String>,

    /// Resource types the rule applies to, `*` for all.
    #[serde(default)]
    pub resources: Vec<String>,

    /// Actions the rule allows, `*` for all.
    #[serde(default)]
    pub verbs: Vec<String>,

    /// Named instances the rule is restricted to. An empty list applies to all instances.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_names: Vec<String>,
}

impl PolicyRule {
    /// Rule for the given API groups, resources and verbs, applying to all instances.
    pub fn new<G, R, V>(api_groups: G, resources: R, verbs: V) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            api_groups: collect_strings(api_groups),
            resources: collect_strings(resources),
            verbs: collect_strings(verbs),
            resource_names: Vec::new(),
        }
    }

    /// Restrict the rule to the given named instances.
    pub fn with_resource_names<N>(mut self, resource_names: N) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
    {
        self.resource_names = collect_strings(resource_names);
        self
    }

    /// Returns true if the rule is restricted to named instances.
    pub fn has_resource_names(&self) -> bool {
        !self.resource_names.is_empty()
    }
}

/// A named collection of rules which an actor intends to create or delegate, for example a
/// `Role` manifest an operator is going to apply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Name identifying the role in error messages and reports.
    pub name: String,

    /// Namespace of the role, if it is namespaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Rules the role grants.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl Role {
    pub fn new(name: impl Into<String>, rules: Vec<PolicyRule>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            rules,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

fn collect_strings<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}
