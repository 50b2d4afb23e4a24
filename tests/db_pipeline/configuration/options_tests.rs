//! Parser and Loader Configuration Tests
//!
//! Duplicate key policies end to end, and options embedded in a caller's
//! configuration file.

use crate::db_pipeline::{run_pipeline, run_pipeline_with_options};

use epics_db_rs::core::Error;
use epics_db_rs::core::loader::LoaderConfig;
use epics_db_rs::core::parser::{DuplicateKeyPolicy, ParserOptions};

const DUPLICATES: &str = r#"
record(ai, "$(P)Temp") {
    field(DTYP, "asynFloat64")
    field(INP,  "@asyn(P,0,1)FIRST")
    field(INP,  "@asyn(P,0,1)SECOND")
    info(pyname, "a")
    info(pyname, "b")
}
"#;

fn with_policy(policy: DuplicateKeyPolicy) -> ParserOptions {
    ParserOptions::default().with_duplicate_keys(policy)
}

#[test]
fn first_wins_is_the_default() {
    let result = run_pipeline(DUPLICATES).expect("parses");
    let binding = result.parameters.get("FIRST").expect("bound");
    assert_eq!(binding.param_name, "a");
    assert!(!result.parameters.contains("SECOND"));
}

#[test]
fn last_wins_overrides() {
    let result =
        run_pipeline_with_options(DUPLICATES, &with_policy(DuplicateKeyPolicy::LastWins))
            .expect("parses");
    let binding = result.parameters.get("SECOND").expect("bound");
    assert_eq!(binding.param_name, "b");
    let record = &result.database.records[0];
    assert_eq!(record.fields.keys().collect::<Vec<_>>(), ["DTYP", "INP"]);
}

#[test]
fn reject_fails_at_the_repeat() {
    match run_pipeline_with_options(DUPLICATES, &with_policy(DuplicateKeyPolicy::Reject)) {
        Err(Error::Parse(err)) => {
            assert_eq!(err.line, 5);
            assert_eq!(err.expected, "unique field name");
            assert_eq!(err.found, "duplicate field 'INP'");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn options_deserialize_from_config() {
    let options: ParserOptions =
        serde_json::from_str(r#"{ "duplicate_keys": "last_wins" }"#).expect("valid");
    assert_eq!(options.duplicate_keys, DuplicateKeyPolicy::LastWins);

    let options: ParserOptions = serde_json::from_str("{}").expect("valid");
    assert_eq!(options, ParserOptions::default());

    assert!(serde_json::from_str::<ParserOptions>(r#"{ "duplicate_keys": "sometimes" }"#).is_err());
}

#[test]
fn loader_config_round_trips() {
    let config = LoaderConfig::default()
        .with_search_path("/ioc/db")
        .with_cwd(false)
        .with_parser(with_policy(DuplicateKeyPolicy::Reject));
    let json = serde_json::to_string(&config).expect("serialize");
    let back: LoaderConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}
