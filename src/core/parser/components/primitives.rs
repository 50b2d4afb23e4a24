//! Parse record name expressions.
//!
//! A record name is written either bare (`$(P)Temp`) or quoted
//! (`"$(P)Temp"`). The grammar admits up to three adjacent parts in the
//! order String, Name, String, concatenated in order. A trailing String
//! only follows a Name, so two adjacent Strings end the name after the
//! first.

use crate::core::parser::config::{ParseError, ParserOptions};
use crate::core::parser::stream::TokenStreamExt;
use crate::core::parser::traits::{Parser, TokenStream};
use crate::core::scanner::tokens::{SymbolSpan, Token, TokenKind};

/// A record name with the span of all its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordName {
    pub text: String,
    pub span: SymbolSpan,
}

/// Parse `[String] Name [String]`.
///
/// ## Examples
/// ```
/// # use epics_db_rs::core::parser::components::primitives::RecordNameParser;
/// # use epics_db_rs::core::parser::traits::Parser;
/// # use epics_db_rs::core::parser::stream::VectorTokenStream;
/// # use epics_db_rs::core::parser::config::ParserOptions;
/// # use epics_db_rs::core::scanner::Lexer;
/// let toks = Lexer::collect_tokens(r#"$(P)Temp_RBV )"#).expect("scan ok");
/// let mut s = VectorTokenStream::new(toks);
/// let name = RecordNameParser.parse(&mut s, &ParserOptions::default())?;
/// assert_eq!(name.text, "$(P)Temp_RBV");
/// # Ok::<(), epics_db_rs::core::parser::config::ParseError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordNameParser;

impl Parser<RecordName> for RecordNameParser {
    fn parse(
        &mut self,
        stream: &mut dyn TokenStream,
        _options: &ParserOptions,
    ) -> Result<RecordName, ParseError> {
        let mut parts: Vec<Token> = Vec::with_capacity(3);
        parts.extend(take_part(stream, TokenKind::String)?);
        if let Some(name) = take_part(stream, TokenKind::Name)? {
            parts.push(name);
            parts.extend(take_part(stream, TokenKind::String)?);
        }

        let text: String = parts.iter().map(Token::text).collect();
        let first = parts.first().map(|t| t.span().clone());
        let last = parts.last().map(|t| t.span().clone());

        match (first, last) {
            (Some(first), Some(last)) => Ok(RecordName {
                text,
                span: first.to(&last),
            }),
            _ => Err(match stream.peek_non_comment() {
                Some(token) => ParseError::unexpected("record name", token),
                None => ParseError::end_of_input("record name", stream.end_line()),
            }),
        }
    }

    fn can_parse(&self, stream: &dyn TokenStream) -> bool {
        stream.check_kind(TokenKind::String) || stream.check_kind(TokenKind::Name)
    }
}

fn take_part(
    stream: &mut dyn TokenStream,
    kind: TokenKind,
) -> Result<Option<Token>, ParseError> {
    if !stream.check_kind(kind) {
        return Ok(None);
    }
    stream.expect_with("record name", |t| t.kind() == kind).map(Some)
}
