//! Minimal Database Integration Tests
//!
//! Small inline databases covering the naming and linking conventions.

use crate::db_pipeline::run_pipeline;

#[test]
fn empty_and_whitespace_databases() {
    for input in ["", "   \n\t  \n  ", "# only a comment\n"] {
        let result = run_pipeline(input).expect("parses");
        assert!(result.database.is_empty());
        assert!(result.parameters.is_empty());
    }
}

#[test]
fn single_binding() {
    let result = run_pipeline(
        r#"record(ai, "X") { field(DTYP, "asynInt32In") field(INP, "@asyn(PORT,0,0)MYPARAM") }"#,
    )
    .expect("parses");
    assert_eq!(result.parameters.len(), 1);
    let binding = result.parameters.get("MYPARAM").expect("bound");
    assert_eq!(binding.param_name, "X");
    assert_eq!(binding.data_type_tag, "Int32");
}

#[test]
fn macros_and_readback_suffix_are_stripped() {
    let result = run_pipeline(
        r#"record(ai, "$(P)$(R)Foo_RBV") { field(DTYP, "asynFloat64") field(INP, "@asyn(P,0,1)FOO") }"#,
    )
    .expect("parses");
    assert_eq!(result.parameters.get("FOO").expect("bound").param_name, "Foo");
}

#[test]
fn pyname_info_names_the_parameter() {
    let result = run_pipeline(
        r#"record(ai, "$(P)Foo") {
            field(DTYP, "asynFloat64")
            field(INP, "@asyn(P,0,1)FOO")
            info(pyname, "bar")
        }"#,
    )
    .expect("parses");
    assert_eq!(result.parameters.get("FOO").expect("bound").param_name, "bar");
}

#[test]
fn first_seen_wins_across_records() {
    let result = run_pipeline(
        r#"
record(ao, "$(P)Gain")     { field(DTYP, "asynFloat64") field(OUT, "@asyn(P,0,1)GAIN") }
record(ai, "$(P)GainRead") { field(DTYP, "asynFloat64") field(INP, "@asyn(P,0,1)GAIN") }
"#,
    )
    .expect("parses");
    assert_eq!(result.parameters.len(), 1);
    assert_eq!(result.parameters.get("GAIN").expect("bound").param_name, "Gain");
}

#[test]
fn asyn_out_device_type_contributes_nothing() {
    let result = run_pipeline(
        r#"record(ao, X) { field(DTYP, "asynOut") field(OUT, "@asyn(P,0,1)X") }"#,
    )
    .expect("parses");
    assert_eq!(result.database.len(), 1);
    assert!(result.parameters.is_empty());
}

#[test]
fn device_type_without_link_contributes_nothing() {
    let result =
        run_pipeline(r#"record(ai, X) { field(DTYP, "asynInt32") field(SCAN, "1 second") }"#)
            .expect("parses");
    assert!(result.parameters.is_empty());
}

#[test]
fn names_may_be_bare_quoted_or_concatenated() {
    let result = run_pipeline(
        r#"
record(ai, $(P)Bare) {}
record(ai, "$(P)Quoted") {}
record(ai, "$(P)"Mixed"_RBV") {}
"#,
    )
    .expect("parses");
    let names: Vec<_> = result.database.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["$(P)Bare", "$(P)Quoted", "$(P)Mixed_RBV"]);
}

#[test]
fn escaped_quotes_stay_in_values() {
    let result =
        run_pipeline(r#"record(stringout, X) { field(VAL, "say \"hi\"") }"#).expect("parses");
    assert_eq!(result.database.records[0].field("VAL"), Some(r#"say \"hi\""#));
}
