// SPDX-License-Identifier: MIT OR Apache-2.0

//! Predicates deciding if one authorization rule covers another.
//!
//! Every attribute is compared as a flat list of strings. `*` is a literal sentinel value which
//! matches everything on the granted side, it is never expanded or interpreted anywhere else.
//! There is no hierarchy between resources: `pods` does not cover `pods/exec`.
use crate::rule::PolicyRule;

/// Sentinel value matching every API group, resource, verb or resource name.
pub const WILDCARD: &str = "*";

/// Returns true if the list contains the wildcard sentinel.
pub fn has_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value == WILDCARD)
}

/// Returns true if every required value is present in `available`, or `available` contains the
/// wildcard.
///
/// An empty `required` list is always covered.
pub fn covers_all(available: &[String], required: &[String]) -> bool {
    required
        .iter()
        .all(|req| available.iter().any(|avail| avail == WILDCARD || avail == req))
}

/// Returns true if the granted resource names allow the requested ones.
///
/// Names are only compared when both rules list some. A granted rule without resource names
/// covers any requested names, and a requested rule without names is covered by any granted
/// names.
pub fn resource_names_covered(granted: &PolicyRule, requested: &PolicyRule) -> bool {
    if !(granted.has_resource_names() && requested.has_resource_names()) {
        return true;
    }

    covers_all(&granted.resource_names, &requested.resource_names)
}

/// Returns true if the granted rule allows everything the requested rule asks for.
pub fn rule_covers(granted: &PolicyRule, requested: &PolicyRule) -> bool {
    covers_all(&granted.api_groups, &requested.api_groups)
        && covers_all(&granted.resources, &requested.resources)
        && covers_all(&granted.verbs, &requested.verbs)
        && resource_names_covered(granted, requested)
}
