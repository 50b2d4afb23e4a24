//! Concurrent Determinism Tests
//!
//! The pipeline is pure: running it from many threads, or repeatedly, must
//! give identical results. Generated databases check first-seen-wins and
//! ordering against a simple model.

use crate::db_pipeline::{
    asyn_record, assert_concurrent_deterministic, load_fixture, run_pipeline,
};

use epics_db_rs::core::resolver::resolve;
use proptest::prelude::*;

#[test]
fn concurrent_empty_database() {
    assert_concurrent_deterministic("", 4);
}

#[test]
fn concurrent_fixture_database() {
    assert_concurrent_deterministic(&load_fixture("scope.db"), 8);
}

#[test]
fn concurrent_error_database() {
    assert_concurrent_deterministic("record(ai, X) {\n field(DTYP \"x\")\n}", 4);
}

#[test]
fn repeated_resolution_is_identical() {
    let result = run_pipeline(&load_fixture("scope.db")).expect("fixture parses");
    for _ in 0..3 {
        assert_eq!(resolve(&result.database.records), result.parameters);
    }
}

const DATA_TYPES: [&str; 4] = ["Int32", "Float64", "Octet", "Float64Array"];
const VERBS: [&str; 5] = ["", "In", "Out", "Read", "Write"];

prop_compose! {
    fn arb_record()(
        name in "[A-Z][a-z]{0,6}",
        rbv in any::<bool>(),
        ty in 0..DATA_TYPES.len(),
        verb in 0..VERBS.len(),
        drv in 0..6usize,
    ) -> (String, String, String) {
        let suffix = if rbv { "_RBV" } else { "" };
        (
            format!("$(P){name}{suffix}"),
            format!("asyn{}{}", DATA_TYPES[ty], VERBS[verb]),
            format!("PARAM_{drv}"),
        )
    }
}

proptest! {
    #[test]
    fn first_seen_wins_and_order(records in prop::collection::vec(arb_record(), 0..20)) {
        let text: String = records
            .iter()
            .map(|(name, dtyp, drv)| asyn_record("ai", name, dtyp, drv))
            .collect();
        let result = run_pipeline(&text).expect("generated database parses");

        // Model: the first record per drvInfo, in first-appearance order.
        let mut expected: Vec<(&str, String)> = Vec::new();
        for (name, _, drv) in &records {
            if !expected.iter().any(|(d, _)| d == drv) {
                let canonical = name.trim_start_matches("$(P)");
                let canonical = canonical.strip_suffix("_RBV").unwrap_or(canonical);
                expected.push((drv.as_str(), canonical.to_string()));
            }
        }

        let actual: Vec<(&str, String)> = result
            .parameters
            .iter()
            .map(|b| (b.drv_info.as_str(), b.param_name.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(&resolve(&result.database.records), &result.parameters);
    }
}
