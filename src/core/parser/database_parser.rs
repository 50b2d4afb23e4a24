//! Parse a whole database file.
//!
//! The top level of a database is a sequence of comments, record blocks and
//! two-argument `alias(record, alias)` clauses. Once the input is consumed,
//! each top-level alias is attached to the records it names that do not
//! carry an alias yet. Aliases naming records that are not in this input are
//! kept on the `Database` for a caller that merges several files.

use tracing::debug;

use crate::core::parser::ast::{Database, Record, RecordAlias};
use crate::core::parser::components::clauses::AliasParser;
use crate::core::parser::components::records::RecordParser;
use crate::core::parser::config::{ParseError, ParserOptions};
use crate::core::parser::stream::{TokenStreamExt, VectorTokenStream};
use crate::core::parser::traits::{Parser, TokenStream};
use crate::core::scanner::tokens::Token;

/// Parser for complete databases.
///
/// ## Examples
/// ```
/// # use epics_db_rs::core::parser::DatabaseParser;
/// # use epics_db_rs::core::scanner::Lexer;
/// let toks = Lexer::collect_tokens(r#"
///     record(ai, "$(P)Temp") { field(DTYP, "asynFloat64") }
///     alias("$(P)Temp", "$(P)T")
/// "#).expect("scan ok");
/// let db = DatabaseParser::default().parse(toks)?;
/// assert_eq!(db.records.len(), 1);
/// assert_eq!(db.records[0].alias.as_deref(), Some("$(P)T"));
/// # Ok::<(), epics_db_rs::core::parser::config::ParseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatabaseParser {
    options: ParserOptions,
}

impl DatabaseParser {
    /// Create a parser with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a token sequence into a `Database`.
    ///
    /// # Errors
    /// Returns the first grammar violation.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Database, ParseError> {
        let mut stream = VectorTokenStream::new(tokens);
        self.parse_stream(&mut stream)
    }

    /// Parse a token sequence and return only the records.
    ///
    /// # Errors
    /// Returns the first grammar violation.
    pub fn parse_records(
        &self,
        tokens: Vec<Token>,
    ) -> Result<Vec<Record>, ParseError> {
        self.parse(tokens).map(|db| db.records)
    }

    /// Parse everything remaining in `stream`.
    ///
    /// # Errors
    /// Returns the first grammar violation.
    pub fn parse_stream(
        &self,
        stream: &mut dyn TokenStream,
    ) -> Result<Database, ParseError> {
        let mut records = RecordParser;
        let mut aliases = AliasParser::top_level();
        let mut db = Database::default();

        loop {
            stream.skip_comments();
            let Some(token) = stream.peek() else {
                break;
            };
            if records.can_parse(stream) {
                db.records.push(records.parse(stream, &self.options)?);
            } else if aliases.can_parse(stream) {
                let clause = aliases.parse(stream, &self.options)?;
                db.aliases.push(RecordAlias {
                    // Always set by the two-argument form.
                    record: clause.record.unwrap_or_default(),
                    alias: clause.alias,
                    span: clause.span,
                });
            } else {
                return Err(ParseError::unexpected("record or alias", token));
            }
        }

        attach_aliases(&mut db);
        debug!(
            records = db.records.len(),
            aliases = db.aliases.len(),
            "parsed database"
        );
        Ok(db)
    }
}

fn attach_aliases(db: &mut Database) {
    for alias in &db.aliases {
        let mut matched = false;
        for record in db.records.iter_mut().filter(|r| r.name == alias.record) {
            matched = true;
            if record.alias.is_none() {
                record.alias = Some(alias.alias.clone());
            }
        }
        if !matched {
            debug!(
                record = %alias.record,
                alias = %alias.alias,
                line = alias.span.start.line,
                "alias names a record outside this database"
            );
        }
    }
}
