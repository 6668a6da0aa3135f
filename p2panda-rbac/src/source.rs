// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces to the collaborators supplying granted rules and the roles to check.
//!
//! Granted rules usually come from the live authorization system or from a manifest on disk,
//! requested roles from a fixed catalog of manifests an actor is going to apply. The validator
//! accepts whatever they hand out and does not check where it came from.
use std::convert::Infallible;
use std::error::Error;
#[cfg(feature = "manifest")]
use std::io::ErrorKind;
#[cfg(feature = "manifest")]
use std::path::{Path, PathBuf};

#[cfg(feature = "manifest")]
use tracing::{debug, warn};

#[cfg(feature = "manifest")]
use crate::error::ManifestError;
#[cfg(feature = "manifest")]
use crate::manifest;
use crate::rule::{PolicyRule, Role};

/// Supplies the rules held by the granting actor.
pub trait RuleSource {
    type Error: Error;

    fn granted_rules(&self) -> Result<Vec<PolicyRule>, Self::Error>;
}

/// Supplies the roles which should be validated, in a stable order.
pub trait RequestSource {
    type Error: Error;

    fn grant_requests(&self) -> Result<Vec<Role>, Self::Error>;
}

impl RuleSource for [PolicyRule] {
    type Error = Infallible;

    fn granted_rules(&self) -> Result<Vec<PolicyRule>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl RuleSource for Vec<PolicyRule> {
    type Error = Infallible;

    fn granted_rules(&self) -> Result<Vec<PolicyRule>, Self::Error> {
        Ok(self.clone())
    }
}

impl RuleSource for Role {
    type Error = Infallible;

    fn granted_rules(&self) -> Result<Vec<PolicyRule>, Self::Error> {
        Ok(self.rules.clone())
    }
}

impl RequestSource for [Role] {
    type Error = Infallible;

    fn grant_requests(&self) -> Result<Vec<Role>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl RequestSource for Vec<Role> {
    type Error = Infallible;

    fn grant_requests(&self) -> Result<Vec<Role>, Self::Error> {
        Ok(self.clone())
    }
}

/// Granted rules read from a single `Role` or `ClusterRole` manifest.
#[cfg(feature = "manifest")]
#[derive(Clone, Debug)]
pub struct ManifestFile {
    path: PathBuf,
}

#[cfg(feature = "manifest")]
impl ManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(feature = "manifest")]
impl RuleSource for ManifestFile {
    type Error = ManifestError;

    fn granted_rules(&self) -> Result<Vec<PolicyRule>, Self::Error> {
        Ok(manifest::from_path(&self.path)?.rules)
    }
}

/// Ordered list of role manifests, resolved relative to a base directory.
///
/// With `skip_missing` set, entries which don't exist on disk are left out, otherwise they fail
/// the whole catalog. Any other read error always fails the catalog.
#[cfg(feature = "manifest")]
#[derive(Clone, Debug)]
pub struct ManifestCatalog {
    base: PathBuf,
    entries: Vec<PathBuf>,
    skip_missing: bool,
}

#[cfg(feature = "manifest")]
impl ManifestCatalog {
    pub fn new<I, P>(base: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            base: base.into(),
            entries: entries.into_iter().map(Into::into).collect(),
            skip_missing: false,
        }
    }

    pub fn skip_missing(mut self, skip_missing: bool) -> Self {
        self.skip_missing = skip_missing;
        self
    }

    /// Full paths of all catalog entries, in order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.entries.iter().map(|entry| self.base.join(entry))
    }
}

#[cfg(feature = "manifest")]
impl RequestSource for ManifestCatalog {
    type Error = ManifestError;

    fn grant_requests(&self) -> Result<Vec<Role>, Self::Error> {
        let mut roles = Vec::with_capacity(self.entries.len());

        for path in self.paths() {
            match manifest::from_path(&path) {
                Ok(manifest) => roles.push(manifest.into_role()),
                Err(ManifestError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    if self.skip_missing {
                        warn!(path = %path.display(), "skipping missing rbac manifest");
                        continue;
                    }
                    return Err(ManifestError::NotFound(path));
                }
                Err(err) => return Err(err),
            }
        }

        debug!(roles = roles.len(), "loaded rbac manifest catalog");
        Ok(roles)
    }
}
