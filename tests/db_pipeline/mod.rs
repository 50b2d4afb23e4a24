//! Database Pipeline Integration Test Utilities
//!
//! Shared helpers for running text through scanner, parser and resolver
//! and for checking the results.

#![allow(dead_code)]

use std::fs;
use std::thread;

use epics_db_rs::core::parser::{Database, ParserOptions};
use epics_db_rs::core::resolver::{ResolvedParameters, resolve};
use epics_db_rs::core::{Error, parse_database_with_options};

/// Output of one end-to-end run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub database: Database,
    pub parameters: ResolvedParameters,
}

/// Run text through the full pipeline with default options.
pub fn run_pipeline(input: &str) -> Result<PipelineResult, Error> {
    run_pipeline_with_options(input, &ParserOptions::default())
}

/// Run text through the full pipeline.
pub fn run_pipeline_with_options(
    input: &str,
    options: &ParserOptions,
) -> Result<PipelineResult, Error> {
    let database = parse_database_with_options(input, options)?;
    let parameters = resolve(&database.records);
    Ok(PipelineResult {
        database,
        parameters,
    })
}

/// Load a database fixture from `tests/fixtures/db`.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {name}"))
}

/// Path of a database fixture.
pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/db/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Bindings as `(drv_info, param_name, data_type_tag)` triples in order.
pub fn binding_triples(params: &ResolvedParameters) -> Vec<(String, String, String)> {
    params
        .iter()
        .map(|b| {
            (
                b.drv_info.clone(),
                b.param_name.clone(),
                b.data_type_tag.clone(),
            )
        })
        .collect()
}

/// Assert that every thread sees the same pipeline result for `input`.
pub fn assert_concurrent_deterministic(input: &str, thread_count: usize) {
    let expected = run_pipeline(input);
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..thread_count)
            .map(|_| scope.spawn(|| run_pipeline(input)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("pipeline thread panicked"))
            .collect()
    });
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result, &expected, "thread {i} diverged");
    }
}

/// A record with an asyn input link.
pub fn asyn_record(rtype: &str, name: &str, dtyp: &str, drv_info: &str) -> String {
    format!(
        "record({rtype}, \"{name}\") {{\n    field(DTYP, \"{dtyp}\")\n    field(INP, \"@asyn(PORT,0,1){drv_info}\")\n}}\n"
    )
}
