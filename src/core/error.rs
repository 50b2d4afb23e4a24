//! Crate-level error for the text-to-database pipeline.

use crate::core::parser::config::ParseError;
use crate::core::scanner::lexer::LexError;

/// Failure while turning database text into records.
///
/// Both variants abort the whole input; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Line the failure points at.
    #[must_use]
    pub fn line(&self) -> u32 {
        match self {
            Self::Lex(err) => err.line(),
            Self::Parse(err) => err.line,
        }
    }
}
