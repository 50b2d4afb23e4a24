//! Fixture-Based Integration Tests
//!
//! Runs a realistic database through the whole pipeline and checks the
//! discovered parameters, aliases and registry.

use crate::db_pipeline::{binding_triples, load_fixture, run_pipeline};

use epics_db_rs::core::registry::{DataType, ParamRegistry};

fn triple(d: &str, n: &str, t: &str) -> (String, String, String) {
    (d.to_string(), n.to_string(), t.to_string())
}

#[test]
fn scope_database_parameters() {
    let result = run_pipeline(&load_fixture("scope.db")).expect("fixture parses");

    assert_eq!(result.database.len(), 11);
    assert_eq!(
        binding_triples(&result.parameters),
        vec![
            triple("SCOPE_RUN", "Run", "Int32"),
            triple("SCOPE_MAX_POINTS", "MaxPoints", "Int32"),
            triple("SCOPE_UPDATE_TIME", "refresh", "Float64"),
            triple("SCOPE_MIN_VALUE", "mini", "Float64"),
            triple("SCOPE_MAX_VALUE", "maxi", "Float64"),
            triple("SCOPE_WAVEFORM", "Waveform", "Float64Array"),
            triple("SCOPE_TIME_BASE", "TimeBase", "Float64Array"),
            triple("SCOPE_VERT_GAIN_SELECT", "gain_menu", "Int32"),
            triple("SCOPE_MODEL", "Model", "Octet"),
        ]
    );
}

#[test]
fn scope_database_aliases() {
    let result = run_pipeline(&load_fixture("scope.db")).expect("fixture parses");
    let db = &result.database;

    let run = db.records_named("$(P)$(R)Run").next().expect("Run record");
    assert_eq!(run.alias.as_deref(), Some("$(P)$(R)Start"));

    let wave = db
        .records_named("$(P)$(R)Waveform_RBV")
        .next()
        .expect("Waveform record");
    assert_eq!(wave.alias.as_deref(), Some("$(P)$(R)Trace"));
    assert_eq!(wave.field("NELM"), Some("$(NPOINTS)"));

    let unresolved: Vec<_> = db.unresolved_aliases().map(|a| a.alias.as_str()).collect();
    assert_eq!(unresolved, ["$(P)$(R)Elsewhere"]);
}

#[test]
fn scope_database_registry() {
    let result = run_pipeline(&load_fixture("scope.db")).expect("fixture parses");
    let registry = ParamRegistry::build(&result.parameters).expect("valid registry");

    assert_eq!(registry.len(), result.parameters.len());
    let wave = registry.by_name("Waveform").expect("registered");
    assert_eq!(wave.data_type, DataType::Float64Array);
    assert_eq!(wave.index, 5);
    assert_eq!(registry.by_drv_info("SCOPE_MODEL").map(|h| h.data_type), Some(DataType::Octet));
    for (i, handle) in registry.iter().enumerate() {
        assert_eq!(handle.index, i);
        assert_eq!(registry.by_reason(handle.reason), Some(handle));
    }
}

#[test]
fn pipeline_output_serializes() {
    let result = run_pipeline(&load_fixture("scope.db")).expect("fixture parses");

    let json = serde_json::to_value(&result.parameters).expect("serialize");
    let first = &json.as_array().expect("list of bindings")[0];
    assert_eq!(first["drv_info"], "SCOPE_RUN");
    assert_eq!(first["param_name"], "Run");

    let text = serde_json::to_string(&result.database).expect("serialize");
    let back: epics_db_rs::core::parser::Database =
        serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, result.database);
}
