//! Configure the database parser and report grammar violations.
//!
//! `ParserOptions` carries the knobs callers may tune. `ParseError` is the
//! single failure type of the grammar: it names the line, what the grammar
//! expected at that point, and what it found instead. Parsing is strict; the
//! first violation aborts the whole input.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::parser::config::*;
//! let opts = ParserOptions::default().with_duplicate_keys(DuplicateKeyPolicy::Reject);
//! assert_eq!(opts.duplicate_keys, DuplicateKeyPolicy::Reject);
//!
//! let err = ParseError::new(3, "','", "string \"asynInt32In\"");
//! assert_eq!(
//!     err.to_string(),
//!     "parse error at line 3: expected ',', found string \"asynInt32In\""
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::core::scanner::tokens::Token;

/// How repeated `field`/`info` keys inside one record body are handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    /// Keep the first value, drop later ones.
    #[default]
    FirstWins,
    /// Later values overwrite earlier ones in place.
    LastWins,
    /// Fail the parse at the repeated key.
    Reject,
}

/// Parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Policy for repeated keys within a record body.
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl ParserOptions {
    /// Set the duplicate key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }
}

/// Rendering used for `found` when the stream ran out.
pub const END_OF_INPUT: &str = "end of input";

/// A grammar violation.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error,
)]
#[error("parse error at line {line}: expected {expected}, found {found}")]
pub struct ParseError {
    /// Line of the offending token (or of the last token at end of input).
    pub line: u32,
    /// What the grammar wanted at this point.
    pub expected: String,
    /// What was there instead.
    pub found: String,
}

impl ParseError {
    /// Create a parse error.
    pub fn new(
        line: u32,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Error for an unexpected token.
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        Self::new(found.line(), expected, found.to_string())
    }

    /// Error for a construct left open at end of input.
    pub fn end_of_input(expected: impl Into<String>, line: u32) -> Self {
        Self::new(line, expected, END_OF_INPUT)
    }

    /// True if the input ended while the grammar expected more.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.found == END_OF_INPUT
    }
}
