//! Property tests: a record's inputs must name exactly its specification's
//! inputs, and its output count must suit the specification's result type.

use metadata_authz::AuthzErrorKind;
use metadata_tests::{hash_input_spec, record, signers, Registry};
use metadata_types::{DefinitionType, Party, PartyType, RecordInput, Session};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{2,8}", 1..6).prop_map(|set| set.into_iter().collect())
}

/// A registry holding one session whose record `entry` expects `names`.
fn registry_with(names: &[String], result_type: DefinitionType) -> (Registry, Session) {
    let registry = Registry::new();
    let scope = registry.put_scope(&["alice"]).unwrap();
    let cspec = registry
        .put_contract_spec("com.example.Ledger", vec![PartyType::Owner])
        .unwrap();
    registry
        .put_record_spec(
            &cspec,
            "entry",
            names.iter().map(|n| hash_input_spec(n, &format!("{n}-hash"))).collect(),
            result_type,
        )
        .unwrap();
    let session = registry
        .put_session(&scope, &cspec, vec![Party::owner("alice")])
        .unwrap();
    (registry, session)
}

fn input(name: &str) -> RecordInput {
    RecordInput::proposed(name, "string", format!("{name}-hash"))
}

fn check(
    registry: &Registry,
    session: &Session,
    inputs: Vec<RecordInput>,
    outputs: usize,
) -> Result<(), String> {
    let proposed = record(session, "entry", inputs, outputs);
    registry
        .authorizer
        .validate_record_update(None, &proposed, &signers(&["alice"]))
        .map_err(|e| {
            assert_eq!(e.kind(), AuthzErrorKind::SpecificationMismatch, "{e}");
            e.to_string()
        })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn any_order_of_exact_inputs_conforms(
        shuffled in arb_names().prop_flat_map(|names| Just(names).prop_shuffle()),
    ) {
        let (registry, session) = registry_with(&shuffled, DefinitionType::Record);
        let inputs = shuffled.iter().map(|n| input(n)).collect();
        prop_assert_eq!(check(&registry, &session, inputs, 1), Ok(()));
    }

    #[test]
    fn dropping_an_input_reports_it_missing(
        names in arb_names(),
        drop in any::<prop::sample::Index>(),
    ) {
        let (registry, session) = registry_with(&names, DefinitionType::Record);
        let dropped = drop.get(&names).clone();
        let inputs = names.iter().filter(|n| **n != dropped).map(|n| input(n)).collect();
        prop_assert_eq!(
            check(&registry, &session, inputs, 1),
            Err(format!("missing input {dropped}"))
        );
    }

    #[test]
    fn adding_an_input_reports_it_extra(names in arb_names(), extra in "[0-9]{2,4}") {
        let (registry, session) = registry_with(&names, DefinitionType::Record);
        let mut inputs: Vec<RecordInput> = names.iter().map(|n| input(n)).collect();
        inputs.push(input(&extra));
        prop_assert_eq!(
            check(&registry, &session, inputs, 1),
            Err(format!("extra input {extra}"))
        );
    }

    #[test]
    fn repeating_an_input_reports_it_twice(
        names in arb_names(),
        repeat in any::<prop::sample::Index>(),
    ) {
        let (registry, session) = registry_with(&names, DefinitionType::Record);
        let repeated = repeat.get(&names).clone();
        let mut inputs: Vec<RecordInput> = names.iter().map(|n| input(n)).collect();
        inputs.push(input(&repeated));
        prop_assert_eq!(
            check(&registry, &session, inputs, 1),
            Err(format!("input name {repeated} provided twice"))
        );
    }

    #[test]
    fn single_record_takes_exactly_one_output(outputs in 0usize..6) {
        let (registry, session) = registry_with(&[], DefinitionType::Record);
        let result = check(&registry, &session, vec![], outputs);
        if outputs == 1 {
            prop_assert_eq!(result, Ok(()));
        } else {
            prop_assert_eq!(
                result,
                Err(format!("invalid output count (expected: 1, got: {outputs})"))
            );
        }
    }

    #[test]
    fn record_list_takes_at_least_one_output(outputs in 0usize..6) {
        let (registry, session) = registry_with(&[], DefinitionType::RecordList);
        let result = check(&registry, &session, vec![], outputs);
        if outputs == 0 {
            prop_assert_eq!(
                result,
                Err("invalid output count (expected > 0, got: 0)".to_string())
            );
        } else {
            prop_assert_eq!(result, Ok(()));
        }
    }
}
