// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use crate::error::ValidationError;
use crate::rule::PolicyRule;

/// Outcome of validating many roles at once.
///
/// Holds one error per failing role, in the order the roles were given. An empty report means
/// every role can be created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    failures: Vec<ValidationError>,
}

impl ValidationReport {
    pub(crate) fn push(&mut self, error: ValidationError) {
        self.failures.push(error);
    }

    /// Returns true if no role failed validation.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of failing roles.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[ValidationError] {
        &self.failures
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.failures.iter()
    }

    /// Names of the failing roles, in order.
    pub fn failed_roles(&self) -> Vec<&str> {
        self.failures.iter().map(ValidationError::role).collect()
    }

    /// Turns an empty report into `Ok`, any failure into `Err` carrying the full report.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_ok() { Ok(()) } else { Err(self) }
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} role(s) failed validation", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Everything needed to fix a role which can't be created yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remediation {
    /// Name of the role.
    pub role: String,

    /// Requested rules which are not covered, in the order they appear in the role.
    pub missing: Vec<PolicyRule>,

    /// One rendered marker per missing rule.
    pub suggestions: Vec<String>,
}
