//! Error Diagnostic Tests
//!
//! Lexical and grammatical errors abort the whole input and point at the
//! right line with a useful expected/found pair.

use crate::db_pipeline::run_pipeline;

use epics_db_rs::core::Error;
use epics_db_rs::core::parser::ParseError;

fn parse_error(input: &str) -> ParseError {
    match run_pipeline(input) {
        Err(Error::Parse(err)) => err,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_comma_in_field() {
    let err = parse_error(
        "record(ai, X)\n{\n    field(DTYP \"asynInt32In\")\n}\n",
    );
    assert_eq!(err.line, 3);
    assert_eq!(err.expected, "','");
    assert_eq!(err.found, "string \"asynInt32In\"");
    assert_eq!(
        err.to_string(),
        "parse error at line 3: expected ',', found string \"asynInt32In\""
    );
}

#[test]
fn unquoted_field_value() {
    let err = parse_error("record(ai, X) {\n  field(PREC, 3)\n}");
    assert_eq!(err.line, 2);
    assert_eq!(err.expected, "quoted value");
}

#[test]
fn end_of_input_inside_record() {
    let err = parse_error("record(ai, X) {\n  field(PREC, \"3\")\n");
    assert!(err.is_end_of_input());
    assert_eq!(err.line, 2);
    assert_eq!(err.expected, "'}'");
}

#[test]
fn end_of_input_inside_header() {
    let err = parse_error("record(ai,\n");
    assert!(err.is_end_of_input());
    assert_eq!(err.expected, "record name");
    assert_eq!(err.line, 1);
}

#[test]
fn alias_forms_are_positional() {
    let err = parse_error("record(ai, X) {\n  alias(X, Y)\n}");
    assert_eq!(err.line, 2);
    assert_eq!(err.expected, "')'");

    let err = parse_error("\n\nalias(Y)");
    assert_eq!(err.line, 3);
    assert_eq!(err.expected, "','");
}

#[test]
fn stray_tokens() {
    let err = parse_error("record(ai, X) {}\n\n\"loose\"");
    assert_eq!(err.line, 3);
    assert_eq!(err.expected, "record or alias");
    assert_eq!(err.found, "string \"loose\"");

    let err = parse_error("record(ai, X) {\n  grecord(ai, Y) {}\n}");
    assert_eq!(err.found, "name 'grecord'");
}

#[test]
fn unterminated_string_is_lexical() {
    match run_pipeline("record(ai, X) {\n\n  field(DESC, \"never closed)\n}") {
        Err(Error::Lex(err)) => {
            assert_eq!(err.line(), 3);
            assert!(err.message().contains("Unterminated string"));
        }
        other => panic!("expected a lexical error, got {other:?}"),
    }
}

#[test]
fn unexpected_character_is_lexical() {
    let err = run_pipeline("record(ai, X) {\n  field(A, \"b\") @\n}").expect_err("lex error");
    assert!(matches!(err, Error::Lex(_)));
    assert_eq!(err.line(), 2);
}

#[test]
fn unterminated_macro_is_lexical() {
    let err = run_pipeline("record(ai, $(P\n) {}").expect_err("lex error");
    assert!(matches!(err, Error::Lex(_)));
    assert_eq!(err.line(), 1);
}

#[test]
fn errors_leave_no_partial_result() {
    let input = r#"
record(ai, A) { field(DTYP, "asynInt32") field(INP, "@asyn(P,0,1)A") }
record(ai, B) { field(DTYP "asynInt32") }
"#;
    assert!(run_pipeline(input).is_err());
}
