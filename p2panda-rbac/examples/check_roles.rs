// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checks if an operator can create a set of roles without escalating its own privileges.
//!
//! ```text
//! cargo run --example check_roles -- \
//!     --operator config/rbac/role.yaml \
//!     --base manifests \
//!     controller/cert-manager-tokenrequest-role.yaml \
//!     webhook/cert-manager-webhook-dynamic-serving-role.yaml
//! ```
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use p2panda_rbac::{
    AnnotationConfig, AuditConfig, ManifestCatalog, ManifestFile, RbacValidator, RequestSource,
    RuleSource, Severity, audit_rules,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

#[derive(Parser)]
struct Args {
    /// Role or ClusterRole manifest holding the operator's own permissions.
    #[arg(short = 'o', long, value_name = "MANIFEST")]
    operator: PathBuf,

    /// Directory the role manifests are resolved against.
    #[arg(short = 'b', long, value_name = "DIR", default_value = ".")]
    base: PathBuf,

    /// Role manifests the operator is going to create.
    #[arg(value_name = "ROLES", required = true)]
    roles: Vec<PathBuf>,

    /// Skip role manifests which don't exist.
    #[arg(long, action)]
    skip_missing: bool,

    /// Also audit the operator's permissions for wildcards and dangerous verbs.
    #[arg(short = 'a', long, action)]
    audit: bool,

    /// Prefix written in front of suggested `rbac:` markers.
    #[arg(long, value_name = "PREFIX")]
    marker: Option<String>,
}

fn main() -> Result<ExitCode> {
    setup_logging();

    let args = Args::parse();

    let operator = ManifestFile::new(&args.operator);
    let granted = operator
        .granted_rules()
        .with_context(|| format!("load operator rules from {}", args.operator.display()))?;
    info!(rules = granted.len(), "loaded operator rules");

    let catalog = ManifestCatalog::new(&args.base, &args.roles).skip_missing(args.skip_missing);
    let roles = catalog.grant_requests().context("load role manifests")?;

    let mut annotations = AnnotationConfig::default();
    if let Some(marker) = args.marker {
        annotations.marker_prefix = marker;
    }

    let validator = RbacValidator::new(granted).with_annotation_config(annotations);
    let mut failed = false;

    if args.audit {
        for finding in audit_rules(validator.granted_rules(), &AuditConfig::default()) {
            match finding.severity() {
                Severity::Error => {
                    failed = true;
                    println!("error: {finding}");
                }
                Severity::Warning => println!("warning: {finding}"),
            }
        }
    }

    let report = validator.validate_all(&roles);
    if report.is_ok() {
        println!("operator can create all {} role(s)", roles.len());
    } else {
        failed = true;
        println!("rbac validation failed with {} error(s):", report.len());
        for failure in report.iter() {
            println!("  - {failure}");
        }

        for remediation in validator.remediations(&roles) {
            println!("missing permissions for role {}:", remediation.role);
            for suggestion in remediation.suggestions {
                println!("  add: {suggestion}");
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
