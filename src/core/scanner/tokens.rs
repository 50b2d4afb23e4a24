//! Lexical token definitions for the EPICS database scanner.
//!
//! This module declares token kinds, source coordinates, spans, and the `Token`
//! container emitted by the lexer.
//!
//! # Model
//! - `TokenKind` enumerates the four classes the scanner distinguishes:
//!   bare names, quoted strings, punctuation, and `#` comments.
//! - `SymbolLocation` records a single position as `(line, column)`.
//! - `SymbolSpan` records a contiguous region `[start, end]` in the scanner's
//!   coordinate system.
//! - `Token` pairs a `TokenKind` and its text with a `SymbolSpan`.
//!
//! # Text payloads
//! `String` tokens carry their content with the surrounding quotes already
//! stripped; escape sequences are left untouched. `Comment` tokens carry the
//! text after `#` up to, but excluding, the end of the line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EnumKindName;

/// Lexical token kinds recognized by the scanner.
///
/// Keywords such as `record` or `field` are not distinguished here; they are
/// ordinary `Name` tokens and the parser decides what they mean.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumKindName,
)]
pub enum TokenKind {
    /// A bare word: keyword, record type, field name, or unquoted record name.
    Name,
    /// A double-quoted string, quotes stripped.
    String,
    /// One of `(`, `)`, `,`, `{`, `}`.
    Punctuation,
    /// A `#` line comment.
    Comment,
}

/// A position in the source text.
///
/// Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolLocation {
    /// Line number of the position.
    pub line: u32,
    /// Column number of the position.
    pub column: u32,
}

/// A contiguous range in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSpan {
    /// The start location of the span.
    pub start: SymbolLocation,
    /// The end location of the span.
    pub end: SymbolLocation,
}

impl SymbolSpan {
    /// Build a span from `(line, column)` pairs.
    #[must_use]
    pub fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: SymbolLocation {
                line: start.0,
                column: start.1,
            },
            end: SymbolLocation {
                line: end.0,
                column: end.1,
            },
        }
    }

    /// Build a zero-width span at a single position.
    #[must_use]
    pub fn point(line: u32, column: u32) -> Self {
        Self::new((line, column), (line, column))
    }

    /// Span covering `self` through `other`.
    #[must_use]
    pub fn to(&self, other: &SymbolSpan) -> Self {
        Self {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// A lexical token with its kind, text, and source span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    text: String,
    span: SymbolSpan,
}

impl Token {
    /// Constructs a new `Token` from a kind, its text, and start/end
    /// coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `start` does not precede or equal `end`.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        start: (u32, u32),
        end: (u32, u32),
    ) -> Self {
        assert!(start <= end);
        Self {
            kind,
            text: text.into(),
            span: SymbolSpan::new(start, end),
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the token text (quotes and `#` already removed).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the line the token starts on.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    /// Returns the span covered by the token.
    #[must_use]
    pub fn span(&self) -> &SymbolSpan {
        &self.span
    }

    /// Returns true if this is a `Name` token with exactly `text`.
    #[must_use]
    pub fn is_name(&self, text: &str) -> bool {
        self.kind == TokenKind::Name && self.text == text
    }

    /// Returns true if this is the punctuation character `ch`.
    #[must_use]
    pub fn is_punct(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation
            && self.text.len() == 1
            && self.text.starts_with(ch)
    }

    /// Returns true for `Comment` tokens.
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Name => write!(f, "name '{}'", self.text),
            TokenKind::String => write!(f, "string \"{}\"", self.text),
            TokenKind::Punctuation => write!(f, "'{}'", self.text),
            TokenKind::Comment => write!(f, "comment"),
        }
    }
}
