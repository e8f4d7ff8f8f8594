//! End-to-end test: validation limits loaded from TOML flow through the
//! authorizer's structural checks.

use std::io::Write;
use std::sync::Arc;

use metadata_authz::AuthzErrorKind;
use metadata_tests::{session, signers, Registry};
use metadata_types::{
    AuditFields, BasicValidator, Party, PartyType, PlainAddressCodec, ValidationLimits,
};

#[test]
fn audit_message_limit_comes_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_audit_message_length = 8").unwrap();
    let limits = ValidationLimits::load(file.path()).unwrap();

    let registry =
        Registry::with_validator(BasicValidator::new(Arc::new(PlainAddressCodec), limits));
    let scope = registry.put_scope(&["alice"]).unwrap();
    let cspec = registry
        .put_contract_spec("com.example.Note", vec![PartyType::Owner])
        .unwrap();

    let mut proposed = session(&scope, &cspec, vec![Party::owner("alice")]);
    proposed.audit = Some(AuditFields {
        message: "far too long for the limit".into(),
        ..AuditFields::default()
    });
    let err = registry
        .authorizer
        .validate_session_update(None, &proposed, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(err.kind(), AuthzErrorKind::Structural);
    assert_eq!(
        err.to_string(),
        "session audit message exceeds maximum length (expected < 8 got: 26)"
    );

    proposed.audit = Some(AuditFields {
        message: "short".into(),
        ..AuditFields::default()
    });
    registry
        .authorizer
        .validate_session_update(None, &proposed, &signers(&["alice"]))
        .expect("message within configured limit");
}

#[test]
fn class_name_limit_applies_to_contract_specs() {
    let limits = ValidationLimits::from_toml_str("max_class_name_length = 4").unwrap();
    let registry =
        Registry::with_validator(BasicValidator::new(Arc::new(PlainAddressCodec), limits));
    let cspec = metadata_tests::contract_spec("com.example.Note", vec![PartyType::Owner]);

    let err = registry
        .authorizer
        .validate_contract_spec_update(None, &cspec, &signers(&["spec-owner"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "class name exceeds maximum length (expected <= 4 got: 16)"
    );
}

#[test]
fn missing_config_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let limits = ValidationLimits::load(dir.path().join("limits.toml")).unwrap();
    assert_eq!(limits, ValidationLimits::default());
}
