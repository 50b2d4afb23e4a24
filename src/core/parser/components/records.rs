//! Parse a whole `record(type, name) { ... }` block.
//!
//! The body is a sequence of `field`, `info` and one-argument `alias`
//! clauses. Repeated keys are handled according to
//! `ParserOptions::duplicate_keys`; `fields` and `info` are checked
//! independently.

use tracing::warn;

use crate::core::parser::ast::{PropertyMap, Record};
use crate::core::parser::components::clauses::{
    AliasParser, PropertyClause, PropertyParser,
};
use crate::core::parser::components::primitives::RecordNameParser;
use crate::core::parser::config::{
    DuplicateKeyPolicy, ParseError, ParserOptions,
};
use crate::core::parser::stream::TokenStreamExt;
use crate::core::parser::traits::{Parser, TokenStream};

const BODY_ITEM: &str = "field, info, alias or '}'";

/// Parse `'record' '(' Name ',' RecordNameExpr ')' '{' body '}'`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordParser;

impl Parser<Record> for RecordParser {
    fn parse(
        &mut self,
        stream: &mut dyn TokenStream,
        options: &ParserOptions,
    ) -> Result<Record, ParseError> {
        let start = stream.expect_keyword("record")?;
        stream.expect_punct('(')?;
        let rtype = stream.expect_name("record type")?;
        stream.expect_punct(',')?;
        let name = RecordNameParser.parse(stream, options)?;
        stream.expect_punct(')')?;
        stream.expect_punct('{')?;

        let mut record =
            Record::new(rtype.text(), name.text, start.span().clone());
        let mut fields = PropertyParser::field();
        let mut info = PropertyParser::info();
        let mut alias = AliasParser::in_record();

        loop {
            if fields.can_parse(stream) {
                let clause = fields.parse(stream, options)?;
                store(&mut record.fields, clause, &record.name, "field", options)?;
            } else if info.can_parse(stream) {
                let clause = info.parse(stream, options)?;
                store(&mut record.info, clause, &record.name, "info", options)?;
            } else if alias.can_parse(stream) {
                let clause = alias.parse(stream, options)?;
                if record.alias.is_none() {
                    record.alias = Some(clause.alias);
                }
            } else if stream.check_punct('}') {
                let end = stream.expect_punct('}')?;
                record.span = start.span().to(end.span());
                return Ok(record);
            } else {
                stream.skip_comments();
                return Err(match stream.peek() {
                    Some(token) => ParseError::unexpected(BODY_ITEM, token),
                    None => ParseError::end_of_input("'}'", stream.end_line()),
                });
            }
        }
    }

    fn can_parse(&self, stream: &dyn TokenStream) -> bool {
        stream.check_keyword("record")
    }
}

/// Insert a clause into `map` honoring the duplicate-key policy.
fn store(
    map: &mut PropertyMap,
    clause: PropertyClause,
    record: &str,
    kind: &str,
    options: &ParserOptions,
) -> Result<(), ParseError> {
    if !map.contains_key(&clause.key) {
        map.insert(clause.key, clause.value);
        return Ok(());
    }
    match options.duplicate_keys {
        DuplicateKeyPolicy::FirstWins => {
            warn!(
                record,
                key = %clause.key,
                line = clause.key_line,
                "duplicate {kind} ignored"
            );
        }
        DuplicateKeyPolicy::LastWins => {
            warn!(
                record,
                key = %clause.key,
                line = clause.key_line,
                "duplicate {kind} overrides earlier value"
            );
            map.insert(clause.key, clause.value);
        }
        DuplicateKeyPolicy::Reject => {
            return Err(ParseError::new(
                clause.key_line,
                format!("unique {kind} name"),
                format!("duplicate {kind} '{}'", clause.key),
            ));
        }
    }
    Ok(())
}
