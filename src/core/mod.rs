//! Pipeline stages, leaf-first: `scanner`, `parser`, `resolver`, then the
//! optional `registry` and the file-level `loader`.

pub mod error;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use error::Error;

use crate::core::parser::{Database, DatabaseParser, ParserOptions};
use crate::core::scanner::Lexer;

/// Scan and parse database text with default options.
///
/// # Errors
/// Returns the first lexical or grammatical error.
pub fn parse_database(text: &str) -> Result<Database, Error> {
    parse_database_with_options(text, &ParserOptions::default())
}

/// Scan and parse database text.
///
/// # Errors
/// Returns the first lexical or grammatical error.
pub fn parse_database_with_options(
    text: &str,
    options: &ParserOptions,
) -> Result<Database, Error> {
    let tokens = Lexer::collect_tokens(text)?;
    Ok(DatabaseParser::new(options.clone()).parse(tokens)?)
}
