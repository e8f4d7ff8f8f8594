//! Property tests: stored audit fields are immutable through session
//! updates.

use chrono::{DateTime, Duration, TimeZone, Utc};
use metadata_tests::{session, signers, Registry};
use metadata_types::{AuditFields, Party, PartyType, Session};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const FIELDS: [&str; 6] = [
    "message",
    "version",
    "updated-date",
    "updated-by",
    "created-by",
    "created-date",
];

fn arb_date() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop::option::of((0i64..4_000_000_000).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(|| Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }))
}

fn arb_audit() -> impl Strategy<Value = AuditFields> {
    (
        arb_date(),
        "[a-z]{0,8}",
        arb_date(),
        "[a-z]{0,8}",
        0u32..1000,
        "[a-z ]{0,40}",
    )
        .prop_map(
            |(created_date, created_by, updated_date, updated_by, version, message)| AuditFields {
                created_date,
                created_by,
                updated_date,
                updated_by,
                version,
                message,
            },
        )
}

fn shift(date: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match date {
        Some(date) => Some(date + Duration::seconds(1)),
        None => Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
    }
}

/// `audit` with exactly the field at `index` (in `FIELDS` order) changed.
fn change_field(mut audit: AuditFields, index: usize) -> AuditFields {
    match index {
        0 => audit.message.push('!'),
        1 => audit.version = audit.version.wrapping_add(1),
        2 => audit.updated_date = shift(audit.updated_date),
        3 => audit.updated_by.push('x'),
        4 => audit.created_by.push('x'),
        _ => audit.created_date = shift(audit.created_date),
    }
    audit
}

fn stored_session(registry: &Registry, audit: AuditFields) -> Session {
    let scope = registry.put_scope(&["alice"]).unwrap();
    let cspec = registry
        .put_contract_spec("com.example.Audit", vec![PartyType::Owner])
        .unwrap();
    let existing = session(&scope, &cspec, vec![Party::owner("alice")]).with_audit(audit);
    registry.keeper.set_session(&existing).unwrap();
    existing
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Re-proposing the stored audit fields always passes.
    #[test]
    fn identical_audit_is_accepted(audit in arb_audit()) {
        let registry = Registry::new();
        let existing = stored_session(&registry, audit);
        prop_assert!(registry
            .authorizer
            .validate_session_update(Some(&existing), &existing.clone(), &signers(&["alice"]))
            .is_ok());
    }

    /// Changing one subfield reports that subfield.
    #[test]
    fn single_field_change_is_named(audit in arb_audit(), index in 0usize..6) {
        let registry = Registry::new();
        let existing = stored_session(&registry, audit.clone());
        let proposed = existing.clone().with_audit(change_field(audit, index));

        let err = registry
            .authorizer
            .validate_session_update(Some(&existing), &proposed, &signers(&["alice"]))
            .unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!(
                "attempt to modify {} audit field, modification not allowed",
                FIELDS[index]
            )
        );
    }

    /// With several fields changed, the first in check order is reported.
    #[test]
    fn first_changed_field_wins(
        audit in arb_audit(),
        changed in prop::sample::subsequence((0usize..6).collect::<Vec<_>>(), 1..=6),
    ) {
        let registry = Registry::new();
        let existing = stored_session(&registry, audit.clone());
        let modified = changed.iter().fold(audit, |acc, index| change_field(acc, *index));
        let proposed = existing.clone().with_audit(modified);

        let err = registry
            .authorizer
            .validate_session_update(Some(&existing), &proposed, &signers(&["alice"]))
            .unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!(
                "attempt to modify {} audit field, modification not allowed",
                FIELDS[changed[0]]
            )
        );
    }
}
