//! Feed tokens to parsers with lookahead, comment skipping, and expectations.
//!
//! `VectorTokenStream` stores tokens in memory and offers O(1) lookahead.
//! `TokenStreamExt` adds the helpers every grammar
//! component uses: skip comments, peek past comments, and consume a token
//! of a required shape or fail with a `ParseError` naming what was expected.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::parser::stream::{TokenStreamExt, VectorTokenStream};
//! # use epics_db_rs::core::parser::traits::TokenStream;
//! # use epics_db_rs::core::scanner::Lexer;
//! let toks = Lexer::collect_tokens("# c\n( ai").expect("scan ok");
//! let mut s = VectorTokenStream::new(toks);
//! s.expect_punct('(')?;
//! let name = s.expect_name("record type")?;
//! assert_eq!(name.text(), "ai");
//! assert!(s.is_at_end());
//! # Ok::<(), epics_db_rs::core::parser::config::ParseError>(())
//! ```

use crate::core::parser::config::ParseError;
use crate::core::parser::traits::TokenStream;
use crate::core::scanner::tokens::{Token, TokenKind};

/// A token stream backed by a vector of tokens.
#[derive(Debug, Clone)]
pub struct VectorTokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl VectorTokenStream {
    /// Create a new token stream from a vector of tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Get the total number of tokens in this stream.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the stream is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get all remaining tokens from current position.
    #[must_use]
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position..]
    }
}

impl TokenStream for VectorTokenStream {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_ahead(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    fn previous(&self) -> Option<&Token> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// Extension methods for token streams used by the grammar components.
///
/// Every `expect_*` helper skips leading comments first, so comments may sit
/// between any two grammar elements.
pub trait TokenStreamExt: TokenStream {
    /// Consume any `Comment` tokens at the current position.
    fn skip_comments(&mut self) {
        while self.peek().is_some_and(Token::is_comment) {
            self.next();
        }
    }

    /// Peek at the current token, skipping comments.
    fn peek_non_comment(&self) -> Option<&Token> {
        let mut offset = 0;
        while let Some(token) = self.peek_ahead(offset) {
            if !token.is_comment() {
                return Some(token);
            }
            offset += 1;
        }
        None
    }

    /// True if the next significant token is the name `keyword`.
    fn check_keyword(&self, keyword: &str) -> bool {
        self.peek_non_comment().is_some_and(|t| t.is_name(keyword))
    }

    /// True if the next significant token is the punctuation `ch`.
    fn check_punct(&self, ch: char) -> bool {
        self.peek_non_comment().is_some_and(|t| t.is_punct(ch))
    }

    /// True if the next significant token has `kind`.
    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek_non_comment().is_some_and(|t| t.kind() == kind)
    }

    /// Line to blame when the input ends: the last consumed token's line.
    fn end_line(&self) -> u32 {
        self.previous().map_or(1, Token::line)
    }

    /// Consume the next significant token if `accept` holds for it.
    ///
    /// # Errors
    /// Fails with `expected` when the token is rejected or the input ended.
    fn expect_with(
        &mut self,
        expected: &str,
        accept: impl Fn(&Token) -> bool,
    ) -> Result<Token, ParseError> {
        self.skip_comments();
        match self.peek() {
            Some(token) if accept(token) => {}
            Some(token) => return Err(ParseError::unexpected(expected, token)),
            None => {
                return Err(ParseError::end_of_input(expected, self.end_line()));
            }
        }
        self.next()
            .ok_or_else(|| ParseError::end_of_input(expected, self.end_line()))
    }

    /// Consume the punctuation `ch`.
    ///
    /// # Errors
    /// Fails when the next significant token is anything else.
    fn expect_punct(&mut self, ch: char) -> Result<Token, ParseError> {
        self.expect_with(&format!("'{ch}'"), |t| t.is_punct(ch))
    }

    /// Consume the keyword `keyword`.
    ///
    /// # Errors
    /// Fails when the next significant token is anything else.
    fn expect_keyword(&mut self, keyword: &str) -> Result<Token, ParseError> {
        self.expect_with(&format!("'{keyword}'"), |t| t.is_name(keyword))
    }

    /// Consume a bare name; `what` describes its role for diagnostics.
    ///
    /// # Errors
    /// Fails when the next significant token is not a `Name`.
    fn expect_name(&mut self, what: &str) -> Result<Token, ParseError> {
        self.expect_with(what, |t| t.kind() == TokenKind::Name)
    }

    /// Consume a quoted string; `what` describes its role for diagnostics.
    ///
    /// # Errors
    /// Fails when the next significant token is not a `String`.
    fn expect_string(&mut self, what: &str) -> Result<Token, ParseError> {
        self.expect_with(what, |t| t.kind() == TokenKind::String)
    }
}

impl<T: ?Sized + TokenStream> TokenStreamExt for T {}
