// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg(feature = "manifest")]

use std::path::PathBuf;

use assert_matches::assert_matches;
use p2panda_rbac::test_utils::setup_logging;
use p2panda_rbac::{
    AuditConfig, Finding, ManifestCatalog, ManifestError, ManifestFile, RbacValidator,
    RequestSource, RuleSource, Severity, audit_rules,
};

const CATALOG: [&str; 5] = [
    "roles/cert-manager-tokenrequest-role.yaml",
    "roles/cert-manager-leaderelection-role.yaml",
    "roles/cert-manager-webhook-dynamic-serving-role.yaml",
    "roles/cert-manager-istio-csr-role.yaml",
    "roles/cert-manager-istio-csr-leases-role.yaml",
];

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn catalog() -> ManifestCatalog {
    ManifestCatalog::new(fixtures(), CATALOG)
}

#[test]
fn catalog_keeps_order() {
    setup_logging();

    let roles = catalog().grant_requests().unwrap();
    let names: Vec<&str> = roles.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "cert-manager-tokenrequest",
            "cert-manager:leaderelection",
            "cert-manager-webhook:dynamic-serving",
            "cert-manager-istio-csr",
            "cert-manager-istio-csr-leases",
        ]
    );
    assert_eq!(roles[0].namespace.as_deref(), Some("cert-manager"));
}

#[test]
fn validate_catalog_before_fix() {
    setup_logging();

    let operator = ManifestFile::new(fixtures().join("operator-clusterrole.yaml"));
    let validator = RbacValidator::from_source(&operator).unwrap();
    let roles = catalog().grant_requests().unwrap();

    let report = validator.validate_all(&roles);
    assert_eq!(
        report.failed_roles(),
        vec!["cert-manager-tokenrequest", "cert-manager-istio-csr"]
    );
    for failure in report.iter() {
        assert!(failure.to_string().contains("missing permissions for"));
    }

    let remediations = validator.remediations(&roles);
    assert_eq!(remediations.len(), 2);
    assert_eq!(
        remediations[0].suggestions,
        vec![
            r#"//+kubebuilder:rbac:groups="",resources=serviceaccounts/token,verbs=create,resourceNames=cert-manager"#
        ]
    );

    // Only the first rule of the istio-csr role is missing, events are granted.
    assert_eq!(remediations[1].role, "cert-manager-istio-csr");
    assert_eq!(
        remediations[1].suggestions,
        vec![
            "//+kubebuilder:rbac:groups=cert-manager.io,resources=certificaterequests,\
             verbs=get;list;create;update;delete;watch"
        ]
    );
}

#[test]
fn validate_catalog_after_fix() {
    setup_logging();

    let operator = ManifestFile::new(fixtures().join("operator-clusterrole-fixed.json"));
    let validator = RbacValidator::from_source(&operator).unwrap();
    let roles = catalog().grant_requests().unwrap();

    let report = validator.validate_all(&roles);
    assert_eq!(report.failed_roles(), vec!["cert-manager-istio-csr"]);
    assert!(validator.validate_role(&roles[0]).is_ok());
}

#[test]
fn audit_operator_rules() {
    let operator = ManifestFile::new(fixtures().join("operator-clusterrole.yaml"));
    let rules = operator.granted_rules().unwrap();

    let findings = audit_rules(&rules, &AuditConfig::default());
    assert!(findings.iter().all(|f| f.severity() == Severity::Warning));
    assert_eq!(
        findings,
        vec![
            Finding::DangerousVerb {
                rule: 0,
                verb: "delete".into()
            },
            Finding::DangerousVerb {
                rule: 2,
                verb: "delete".into()
            },
        ]
    );
}

#[test]
fn missing_catalog_entries() {
    setup_logging();

    let entries = ["roles/does-not-exist.yaml", CATALOG[0]];
    let strict = ManifestCatalog::new(fixtures(), entries);
    assert_matches!(strict.grant_requests(), Err(ManifestError::NotFound(path)) if path.ends_with("roles/does-not-exist.yaml"));

    let lenient = ManifestCatalog::new(fixtures(), entries).skip_missing(true);
    let roles = lenient.grant_requests().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "cert-manager-tokenrequest");
}

#[test]
fn unreadable_catalog_entries_are_not_skipped() {
    setup_logging();

    // "roles" exists but is a directory, reading it fails with an error other than not found.
    let entries = ["roles", CATALOG[0]];
    let lenient = ManifestCatalog::new(fixtures(), entries).skip_missing(true);
    assert_matches!(
        lenient.grant_requests(),
        Err(ManifestError::Io { path, source })
            if path.ends_with("roles") && source.kind() != std::io::ErrorKind::NotFound
    );

    let strict = ManifestCatalog::new(fixtures(), entries);
    assert_matches!(strict.grant_requests(), Err(ManifestError::Io { .. }));
}

#[test]
fn catalog_rejects_bindings() {
    let catalog = ManifestCatalog::new(fixtures(), ["roles/binding.yaml"]);
    assert_matches!(
        catalog.grant_requests(),
        Err(ManifestError::UnexpectedKind(kind)) if kind == "RoleBinding"
    );

    let missing = ManifestFile::new(fixtures().join("nope.yaml"));
    assert_matches!(missing.granted_rules(), Err(ManifestError::Io { .. }));
}
