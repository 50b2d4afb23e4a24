//! Parse the clauses that appear inside and around record blocks.
//!
//! `field(KEY, "value")` and `info(KEY, "value")` share one shape and one
//! parser, keyed by the leading keyword. `alias` has two forms with
//! different legal positions: one argument inside a record body, two
//! arguments at top level. `AliasParser` is constructed for one position and
//! rejects the other form with an ordinary `ParseError`.

use crate::core::parser::components::primitives::RecordNameParser;
use crate::core::parser::config::{ParseError, ParserOptions};
use crate::core::parser::stream::TokenStreamExt;
use crate::core::parser::traits::{Parser, TokenStream};
use crate::core::scanner::tokens::SymbolSpan;

/// A parsed `field(...)` or `info(...)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyClause {
    pub key: String,
    pub value: String,
    /// Line of the key token; duplicate-key diagnostics point here.
    pub key_line: u32,
    pub span: SymbolSpan,
}

/// Parse `kw '(' Name ',' String ')'` for a fixed keyword.
#[derive(Debug, Clone, Copy)]
pub struct PropertyParser {
    keyword: &'static str,
}

impl PropertyParser {
    /// Parser for `field(NAME, "value")`.
    #[must_use]
    pub const fn field() -> Self {
        Self { keyword: "field" }
    }

    /// Parser for `info(NAME, "value")`.
    #[must_use]
    pub const fn info() -> Self {
        Self { keyword: "info" }
    }

    /// The keyword this parser accepts.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        self.keyword
    }
}

impl Parser<PropertyClause> for PropertyParser {
    fn parse(
        &mut self,
        stream: &mut dyn TokenStream,
        _options: &ParserOptions,
    ) -> Result<PropertyClause, ParseError> {
        let start = stream.expect_keyword(self.keyword)?;
        stream.expect_punct('(')?;
        let key = stream.expect_name(&format!("{} name", self.keyword))?;
        stream.expect_punct(',')?;
        let value = stream.expect_string("quoted value")?;
        let end = stream.expect_punct(')')?;

        Ok(PropertyClause {
            key: key.text().to_string(),
            value: value.text().to_string(),
            key_line: key.line(),
            span: start.span().to(end.span()),
        })
    }

    fn can_parse(&self, stream: &dyn TokenStream) -> bool {
        stream.check_keyword(self.keyword)
    }
}

/// A parsed `alias(...)` clause.
///
/// `record` is `None` for the in-body form, where the aliased record is the
/// enclosing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasClause {
    pub record: Option<String>,
    pub alias: String,
    pub span: SymbolSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AliasForm {
    InRecord,
    TopLevel,
}

/// Parse `alias '(' RecordNameExpr [',' RecordNameExpr] ')'`.
#[derive(Debug, Clone, Copy)]
pub struct AliasParser {
    form: AliasForm,
}

impl AliasParser {
    /// One-argument form: `alias(name)` inside a record body.
    #[must_use]
    pub const fn in_record() -> Self {
        Self {
            form: AliasForm::InRecord,
        }
    }

    /// Two-argument form: `alias(record, alias)` at top level.
    #[must_use]
    pub const fn top_level() -> Self {
        Self {
            form: AliasForm::TopLevel,
        }
    }
}

impl Parser<AliasClause> for AliasParser {
    fn parse(
        &mut self,
        stream: &mut dyn TokenStream,
        options: &ParserOptions,
    ) -> Result<AliasClause, ParseError> {
        let start = stream.expect_keyword("alias")?;
        stream.expect_punct('(')?;
        let first = RecordNameParser.parse(stream, options)?;

        let (record, alias) = match self.form {
            AliasForm::InRecord => (None, first.text),
            AliasForm::TopLevel => {
                stream.expect_punct(',')?;
                let second = RecordNameParser.parse(stream, options)?;
                (Some(first.text), second.text)
            }
        };
        let end = stream.expect_punct(')')?;

        Ok(AliasClause {
            record,
            alias,
            span: start.span().to(end.span()),
        })
    }

    fn can_parse(&self, stream: &dyn TokenStream) -> bool {
        stream.check_keyword("alias")
    }
}
