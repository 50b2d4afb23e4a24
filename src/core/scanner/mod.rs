//! Scan EPICS database text into a deterministic stream of tokens.
//!
//! The scanner (lexer) is the first stage of the pipeline. It converts raw
//! database text into `Token` values with precise spans. Tokens are bare
//! names (keywords, record types, field names, unquoted record names),
//! quoted strings, the punctuation `( ) , { }`, and `#` comments.
//!
//! This module provides a small, extensible lexer (`lexer`) with pluggable
//! input sources and token recognizers, and token types and spans (`tokens`)
//! used across parsing and diagnostics. Common items are re-exported so
//! callers can import from
//! `epics_db_rs::core::scanner::{Lexer, Token, TokenKind, ...}`.
//!
//! All spans use 1-based line and column. Comments are kept as tokens so
//! the parser can skip them while line information stays intact.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::scanner::{Lexer, TokenKind};
//! let tokens = Lexer::collect_tokens("# note\nrecord").expect("scan ok");
//! assert_eq!(tokens[0].kind(), TokenKind::Comment);
//! assert_eq!(tokens[1].line(), 2);
//! ```
pub mod lexer;
pub mod tokens;

pub use lexer::*;
pub use tokens::*;
