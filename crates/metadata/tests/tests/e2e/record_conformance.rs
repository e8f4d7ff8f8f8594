//! End-to-end test: records written against their session's record
//! specifications, and record removal.

use metadata_authz::AuthzErrorKind;
use metadata_store::MetadataView;
use metadata_tests::{hash_input_spec, record, signers, Registry};
use metadata_types::{
    DefinitionType, InputSource, InputSpecification, MetadataAddress, Party, PartyType,
    Record, RecordInput, Scope, Session,
};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    registry: Registry,
    scope: Scope,
    session: Session,
}

/// A scope owned by alice with one session whose contract declares
/// `appraisal` (single output, hash input) and `payments` (list output).
fn fixture() -> Fixture {
    let registry = Registry::new();
    let scope = registry.put_scope(&["alice"]).unwrap();
    let contract_spec = registry
        .put_contract_spec("com.example.Servicing", vec![PartyType::Owner])
        .unwrap();
    registry
        .put_record_spec(
            &contract_spec,
            "appraisal",
            vec![hash_input_spec("property", "prop-hash")],
            DefinitionType::Record,
        )
        .unwrap();
    registry
        .put_record_spec(&contract_spec, "payments", vec![], DefinitionType::RecordList)
        .unwrap();
    let session = registry
        .put_session(&scope, &contract_spec, vec![Party::owner("alice")])
        .unwrap();
    Fixture {
        registry,
        scope,
        session,
    }
}

fn property_input() -> Vec<RecordInput> {
    vec![RecordInput::proposed("property", "string", "prop-hash")]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn conforming_record_is_accepted_and_stored() {
    let f = fixture();
    let appraisal = record(&f.session, "appraisal", property_input(), 1);
    f.registry
        .authorizer
        .validate_record_update(None, &appraisal, &signers(&["alice"]))
        .expect("record conforms to its specification");
    f.registry.keeper.set_record(&appraisal).unwrap();

    let stored = f.registry.keeper.records_in_scope(&f.scope.id).unwrap();
    assert_eq!(stored, vec![appraisal]);
}

#[test]
fn session_id_is_immutable() {
    let f = fixture();
    let existing = record(&f.session, "rec1", vec![], 1);
    let other_session = MetadataAddress::session(f.scope.id.primary_uuid(), Uuid::new_v4());
    let mut proposed = existing.clone();
    proposed.session_id = other_session;

    let err = f
        .registry
        .authorizer
        .validate_record_update(Some(&existing), &proposed, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "the SessionId field of records cannot be changed"
    );
    assert_eq!(err.kind(), AuthzErrorKind::IdentityImmutable);
}

#[test]
fn name_is_immutable() {
    let f = fixture();
    let existing = record(&f.session, "appraisal", property_input(), 1);
    let mut proposed = existing.clone();
    proposed.name = "payments".into();

    let err = f
        .registry
        .authorizer
        .validate_record_update(Some(&existing), &proposed, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(err.to_string(), "the Name field of records cannot be changed");
}

#[test]
fn lookups_fail_in_order() {
    let f = fixture();

    let foreign_scope = Uuid::new_v4();
    let mut orphan = record(&f.session, "appraisal", property_input(), 1);
    orphan.session_id = MetadataAddress::session(foreign_scope, Uuid::new_v4());
    let err = f
        .registry
        .authorizer
        .validate_record_update(None, &orphan, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("scope not found for scope uuid {foreign_scope}")
    );

    let mut sessionless = record(&f.session, "appraisal", property_input(), 1);
    sessionless.session_id = MetadataAddress::session(f.scope.id.primary_uuid(), Uuid::new_v4());
    let err = f
        .registry
        .authorizer
        .validate_record_update(None, &sessionless, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("session not found for session id {}", sessionless.session_id)
    );

    let unspecified = record(&f.session, "inspection", vec![], 1);
    let err = f
        .registry
        .authorizer
        .validate_record_update(None, &unspecified, &signers(&["alice"]))
        .unwrap_err();
    let contract_uuid = f.session.specification_id.primary_uuid();
    let record_spec_id =
        MetadataAddress::record_specification(contract_uuid, "inspection").unwrap();
    assert_eq!(
        err.to_string(),
        format!(
            "record specification not found for record specification id {record_spec_id} \
             (contract spec uuid {contract_uuid} and record name inspection)"
        )
    );
    assert_eq!(err.kind(), AuthzErrorKind::NotFound);
}

#[test]
fn scope_owners_must_sign_records() {
    let f = fixture();
    let appraisal = record(&f.session, "appraisal", property_input(), 1);

    let err = f
        .registry
        .authorizer
        .validate_record_update(None, &appraisal, &signers(&["mallory"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing signature from alice (PARTY_TYPE_OWNER)"
    );
}

#[test]
fn inputs_must_match_specification() {
    let f = fixture();
    let cases = [
        (vec![], "missing input property"),
        (
            vec![
                RecordInput::proposed("property", "string", "prop-hash"),
                RecordInput::proposed("survey", "string", "survey-hash"),
            ],
            "extra input survey",
        ),
        (
            vec![
                RecordInput::proposed("property", "string", "prop-hash"),
                RecordInput::proposed("property", "string", "prop-hash"),
            ],
            "input name property provided twice",
        ),
        (
            vec![RecordInput::proposed("property", "bytes", "prop-hash")],
            "input property has TypeName bytes but spec calls for string",
        ),
        (
            vec![RecordInput::proposed("property", "string", "other-hash")],
            "input property has source other-hash but spec calls for prop-hash",
        ),
    ];

    for (inputs, expected) in cases {
        let proposed = record(&f.session, "appraisal", inputs, 1);
        let err = f
            .registry
            .authorizer
            .validate_record_update(None, &proposed, &signers(&["alice"]))
            .unwrap_err();
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.kind(), AuthzErrorKind::SpecificationMismatch);
    }
}

#[test]
fn record_sourced_inputs_compare_by_record_id() {
    let registry = Registry::new();
    let scope = registry.put_scope(&["alice"]).unwrap();
    let contract_spec = registry
        .put_contract_spec("com.example.Servicing", vec![PartyType::Owner])
        .unwrap();
    let session = registry
        .put_session(&scope, &contract_spec, vec![Party::owner("alice")])
        .unwrap();
    let appraisal = record(&session, "appraisal", vec![], 1);
    registry.keeper.set_record(&appraisal).unwrap();
    let prior = appraisal.id().unwrap();
    registry
        .put_record_spec(
            &contract_spec,
            "valuation",
            vec![InputSpecification::new(
                "appraisal",
                "string",
                InputSource::Record(prior.clone()),
            )],
            DefinitionType::Record,
        )
        .unwrap();

    let conforming = record(
        &session,
        "valuation",
        vec![RecordInput::from_record("appraisal", "string", prior.clone())],
        1,
    );
    registry
        .authorizer
        .validate_record_update(None, &conforming, &signers(&["alice"]))
        .expect("record input matches by id");

    let unknown = MetadataAddress::record(scope.id.primary_uuid(), "survey").unwrap();
    let dangling = record(
        &session,
        "valuation",
        vec![RecordInput::from_record("appraisal", "string", unknown.clone())],
        1,
    );
    let err = registry
        .authorizer
        .validate_record_update(None, &dangling, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("input appraisal source record id {unknown} not found")
    );
    assert_eq!(err.kind(), AuthzErrorKind::NotFound);

    let hashed = record(
        &session,
        "valuation",
        vec![RecordInput::proposed("appraisal", "string", "h")],
        1,
    );
    let err = registry
        .authorizer
        .validate_record_update(None, &hashed, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "input appraisal has source type hash but spec calls for record"
    );
}

#[test]
fn specification_id_must_match_derived_id() {
    let f = fixture();
    let contract_uuid = f.session.specification_id.primary_uuid();
    let expected = MetadataAddress::record_specification(contract_uuid, "appraisal").unwrap();

    let mut declared = record(&f.session, "appraisal", property_input(), 1);
    declared.specification_id = Some(expected.clone());
    f.registry
        .authorizer
        .validate_record_update(None, &declared, &signers(&["alice"]))
        .expect("declared id matches the session's record spec");

    let foreign = MetadataAddress::record_specification(Uuid::new_v4(), "unrelated").unwrap();
    let mut mislabeled = declared.clone();
    mislabeled.specification_id = Some(foreign.clone());
    let err = f
        .registry
        .authorizer
        .validate_record_update(None, &mislabeled, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "proposed specification id {foreign} does not match expected specification id {expected}"
        )
    );
    assert_eq!(err.kind(), AuthzErrorKind::SpecificationMismatch);
}

#[test]
fn stored_specification_id_is_immutable() {
    let f = fixture();
    let mut existing = record(&f.session, "appraisal", property_input(), 1);
    existing.specification_id = Some(
        MetadataAddress::record_specification(Uuid::new_v4(), "appraisal").unwrap(),
    );
    let contract_uuid = f.session.specification_id.primary_uuid();
    let mut proposed = existing.clone();
    proposed.specification_id =
        Some(MetadataAddress::record_specification(contract_uuid, "appraisal").unwrap());

    let err = f
        .registry
        .authorizer
        .validate_record_update(Some(&existing), &proposed, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "the SpecificationId of records cannot be changed"
    );
    assert_eq!(err.kind(), AuthzErrorKind::IdentityImmutable);

    let unlabeled = Record {
        specification_id: None,
        ..existing.clone()
    };
    f.registry
        .authorizer
        .validate_record_update(Some(&unlabeled), &proposed, &signers(&["alice"]))
        .expect("an unlabeled record may gain its specification id");
}

#[test]
fn output_counts_follow_result_type() {
    let f = fixture();
    let alice = signers(&["alice"]);

    for count in [0, 2] {
        let proposed = record(&f.session, "appraisal", property_input(), count);
        let err = f
            .registry
            .authorizer
            .validate_record_update(None, &proposed, &alice)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("invalid output count (expected: 1, got: {count})")
        );
    }

    let empty_list = record(&f.session, "payments", vec![], 0);
    let err = f
        .registry
        .authorizer
        .validate_record_update(None, &empty_list, &alice)
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid output count (expected > 0, got: 0)");

    let payments = record(&f.session, "payments", vec![], 3);
    f.registry
        .authorizer
        .validate_record_update(None, &payments, &alice)
        .expect("record lists accept many outputs");
}

#[test]
fn removal_flow() {
    let f = fixture();
    let existing = record(&f.session, "appraisal", property_input(), 1);
    f.registry.keeper.set_record(&existing).unwrap();
    let id = existing.id().unwrap();

    let wrong = MetadataAddress::record(f.scope.id.primary_uuid(), "payments").unwrap();
    let err = f
        .registry
        .authorizer
        .validate_record_remove(&existing, &wrong, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("cannot remove record. expected {id}, got {wrong}")
    );

    let err = f
        .registry
        .authorizer
        .validate_record_remove(&existing, &id, &signers(&["bob"]))
        .unwrap_err();
    assert_eq!(err.kind(), AuthzErrorKind::SignatureMissing);

    f.registry
        .authorizer
        .validate_record_remove(&existing, &id, &signers(&["alice"]))
        .expect("owner removes record");
    f.registry.keeper.remove_record(&id).unwrap();
    assert!(f.registry.keeper.get_record(&id).unwrap().is_none());
}

#[test]
fn removal_reports_missing_scope() {
    let f = fixture();
    let mut existing = record(&f.session, "appraisal", property_input(), 1);
    let foreign_scope = Uuid::new_v4();
    existing.session_id = MetadataAddress::session(foreign_scope, Uuid::new_v4());

    let err = f
        .registry
        .authorizer
        .validate_record_remove(&existing, &existing.id().unwrap(), &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("unable to find scope {}", MetadataAddress::scope(foreign_scope))
    );
}

#[test]
fn removal_reports_session_without_scope_uuid() {
    let f = fixture();
    let mut existing = record(&f.session, "appraisal", property_input(), 1);
    existing.session_id = MetadataAddress::contract_specification(Uuid::new_v4());
    let proposed_id = MetadataAddress::record(f.scope.id.primary_uuid(), "appraisal").unwrap();

    let err = f
        .registry
        .authorizer
        .validate_record_remove(&existing, &proposed_id, &signers(&["alice"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot get scope uuid: this metadata address does not contain a scope uuid"
    );
    assert_eq!(err.kind(), AuthzErrorKind::Structural);
}
