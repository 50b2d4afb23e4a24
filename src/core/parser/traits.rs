//! Core parser traits and interfaces.
//!
//! The parser is a set of narrow, composable traits. A `TokenStream` feeds
//! tokens sourced from the scanner. Each grammar production has a component
//! implementing `Parser<T>` that turns tokens into one value or fails with a
//! `ParseError`. The `DatabaseParser` composes the components.
//!
//! Comments are skippable between any two grammar elements; components skip
//! them before every decision. `can_parse` never consumes input.

use crate::core::parser::config::{ParseError, ParserOptions};
use crate::core::scanner::tokens::Token;

/// Read tokens for parser input.
///
/// `peek()` inspects the current token; `peek_ahead(n)` inspects future
/// tokens without changing the stream. `next()` consumes one token.
/// `previous()` returns the most recently consumed token, which anchors
/// end-of-input diagnostics. Streams only move forward.
pub trait TokenStream {
    /// Peek at the current token without consuming it.
    fn peek(&self) -> Option<&Token>;

    /// Peek ahead at the token at the given offset (0 = current, 1 = next, etc.).
    fn peek_ahead(&self, offset: usize) -> Option<&Token>;

    /// Consume and return the current token.
    fn next(&mut self) -> Option<Token>;

    /// The most recently consumed token, if any.
    fn previous(&self) -> Option<&Token>;

    /// Check if the stream is at end-of-input.
    fn is_at_end(&self) -> bool;

    /// Get the current position in the stream.
    fn position(&self) -> usize;
}

/// Parse one grammar production from tokens.
///
/// `can_parse` should be fast and conservative: it returns true only when
/// the production starts at the current position (after comments).
/// `parse` either consumes the whole production or fails.
pub trait Parser<T> {
    /// Parse the production from the token stream.
    ///
    /// # Errors
    /// Returns `ParseError` at the first token that violates the grammar,
    /// or when the stream ends inside the production.
    fn parse(
        &mut self,
        stream: &mut dyn TokenStream,
        options: &ParserOptions,
    ) -> Result<T, ParseError>;

    /// Check if this parser can handle the current token(s).
    fn can_parse(&self, stream: &dyn TokenStream) -> bool;
}
