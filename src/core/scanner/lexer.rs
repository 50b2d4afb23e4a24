//! Tokenize EPICS database text into a stream of tokens.
//!
//! Input is read through a `CharacterStream` abstraction. The lexer delegates
//! token boundaries to an ordered set of `TokenRecognizer`s; the first
//! recognizer that can handle the current input wins. `Lexer` drives the
//! process and yields `Token`s with spans. For ergonomic use there is an
//! iterator adapter via `Lexer::tokenize`.
//!
//! Positions are 1-based (line, column) as reported by the active stream.
//! The lexer skips whitespace and keeps `#` comments as tokens so the parser
//! can skip them explicitly. There is no end-of-input token; the iterator
//! simply ends.
//!
//! Errors are terminal: once a `LexError` has been yielded the iterator is
//! finished and the remaining input is not scanned.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::scanner::{Lexer, TokenKind};
//! let toks = Lexer::collect_tokens("record(ai, \"X\") {}").expect("scan ok");
//! assert_eq!(toks.len(), 8);
//! assert_eq!(toks[4].kind(), TokenKind::String);
//! assert_eq!(toks[4].text(), "X");
//! ```

use crate::core::scanner::tokens::{SymbolSpan, Token, TokenKind};

/// Track the lexer's current location in the input.
///
/// Stores 1-based `line` and `column` and a stream-defined `offset`. Offsets
/// advance by characters as seen by the active stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

impl Position {
    /// Create a new position with explicit line, column, and offset.
    #[must_use]
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    fn to_span(&self) -> SymbolSpan {
        SymbolSpan::point(self.line, self.column)
    }
}

/// A lexical error with the span where scanning stopped.
///
/// ## Examples
/// ```
/// # use epics_db_rs::core::scanner::{LexError, SymbolSpan};
/// let err = LexError::new("oops".into(), SymbolSpan::point(4, 2));
/// assert_eq!(err.line(), 4);
/// assert!(err.to_string().contains("oops"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lexical error at line {line}: {message}", line = .span.start.line)]
pub struct LexError {
    message: String,
    span: SymbolSpan,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(message: String, span: SymbolSpan) -> Self {
        Self { message, span }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the span where the error occurred.
    #[must_use]
    pub fn span(&self) -> &SymbolSpan {
        &self.span
    }

    /// Returns the offending line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.span.start.line
    }
}

/// Navigate characters with position tracking.
///
/// Implementors expose read, peek, and advance operations and report
/// positions as `Position`. `peek(0)` is equivalent to `current()`.
/// `advance()` must return the same char that `current()` produced
/// immediately before.
pub trait CharacterStream: std::fmt::Debug + Send + Sync {
    /// Returns the current character without advancing,
    /// or `None` at end of input.
    fn current(&self) -> Option<char>;

    /// Advances by one character and returns the character that was current,
    /// or `None` at end.
    fn advance(&mut self) -> Option<char>;

    /// Returns the character `offset` positions ahead without advancing.
    fn peek(&self, offset: usize) -> Option<char>;

    /// Returns the current position
    /// (1-based line/column; stream-defined offset).
    fn position(&self) -> Position;

    /// Advances past consecutive whitespace characters.
    fn skip_whitespace(&mut self);
}

/// Provide a `CharacterStream` over a UTF-8 `&str`.
///
/// Tracks newlines and columns as Unicode scalar values are advanced.
///
/// ## Examples
/// ```
/// # use epics_db_rs::core::scanner::{CharacterStream, StringCharacterStream};
/// let mut s = StringCharacterStream::new("a\nb");
/// assert_eq!(s.current(), Some('a'));
/// s.advance(); // consume 'a'
/// s.advance(); // consume newline '\n'
/// assert_eq!(s.current(), Some('b'));
/// assert_eq!(s.position().line, 2);
/// ```
#[derive(Debug)]
pub struct StringCharacterStream {
    chars: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl StringCharacterStream {
    /// Creates a stream over `input`. A leading byte order mark is skipped
    /// and does not count toward columns.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }
}

impl CharacterStream for StringCharacterStream {
    fn current(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.position).copied()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, self.position)
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }
}

/// Recognize a token at the current position.
///
/// `can_handle` must not advance the stream; `consume` must advance exactly
/// the characters that form the token and return its kind and text.
///
/// ## Errors
/// `consume` returns `LexError` if input is invalid for the recognizer or
/// ends prematurely.
pub trait TokenRecognizer: std::fmt::Debug + Send + Sync {
    /// Returns `true` if a token of this kind can start at the current position.
    fn can_handle(&self, input: &dyn CharacterStream) -> bool;

    /// Consumes input forming a complete token.
    ///
    /// # Errors
    /// Returns `LexError` if input is invalid for the recognizer or
    /// ends prematurely.
    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<(TokenKind, String), LexError>;
}

/// Drive tokenization using a character stream and recognizers.
#[derive(Debug)]
pub struct Lexer {
    scanner: Box<dyn CharacterStream>,
    recognizers: Vec<Box<dyn TokenRecognizer>>,
}

impl Lexer {
    /// Create a lexer from a stream and recognizer list.
    #[must_use]
    pub fn new(
        scanner: Box<dyn CharacterStream>,
        recognizers: Vec<Box<dyn TokenRecognizer>>,
    ) -> Self {
        Self {
            scanner,
            recognizers,
        }
    }

    /// Create a lexer for `input` with the default recognizers.
    #[must_use]
    pub fn default_for_input(input: &str) -> Self {
        Self::new(
            Box::new(StringCharacterStream::new(input)),
            default_recognizers(),
        )
    }

    /// Scan and return the next token, or `None` at end of input.
    ///
    /// ## Errors
    /// Returns `LexError` for unrecognized characters and unterminated
    /// strings or macro placeholders.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.scanner.skip_whitespace();
        let start = self.scanner.position();

        let Some(ch) = self.scanner.current() else {
            return Ok(None);
        };

        let Some(recognizer) = self
            .recognizers
            .iter()
            .find(|r| r.can_handle(self.scanner.as_ref()))
        else {
            return Err(LexError::new(
                format!("Unexpected character: '{ch}'"),
                start.to_span(),
            ));
        };

        let (kind, text) = recognizer.consume(self.scanner.as_mut())?;
        let end = self.scanner.position();
        Ok(Some(Token::new(
            kind,
            text,
            (start.line, start.column),
            (end.line, end.column),
        )))
    }

    /// Return an iterator that tokenizes `input`.
    ///
    /// ## Examples
    /// ```
    /// # use epics_db_rs::core::scanner::Lexer;
    /// for tok in Lexer::tokenize("field(DTYP, \"asynInt32\")") {
    ///     let _tok = tok?;
    /// }
    /// # Ok::<(), epics_db_rs::core::scanner::LexError>(())
    /// ```
    #[must_use]
    pub fn tokenize(input: &str) -> LexerIterator {
        LexerIterator::new(Self::default_for_input(input))
    }

    /// Tokenize all of `input`, stopping at the first error.
    ///
    /// ## Errors
    /// Returns the first `LexError` encountered.
    pub fn collect_tokens(input: &str) -> Result<Vec<Token>, LexError> {
        Self::tokenize(input).collect()
    }
}

/// Return the default recognizers in priority order.
#[must_use]
pub fn default_recognizers() -> Vec<Box<dyn TokenRecognizer>> {
    vec![
        Box::new(PunctuationRecognizer),
        Box::new(StringLiteralRecognizer),
        Box::new(CommentRecognizer),
        Box::new(NameRecognizer),
    ]
}

/// Recognize the single-character punctuation `( ) , { }`.
#[derive(Debug, Default)]
pub struct PunctuationRecognizer;

impl TokenRecognizer for PunctuationRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        matches!(input.current(), Some('(' | ')' | ',' | '{' | '}'))
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<(TokenKind, String), LexError> {
        let pos = input.position();
        match input.advance() {
            Some(ch @ ('(' | ')' | ',' | '{' | '}')) => {
                Ok((TokenKind::Punctuation, ch.to_string()))
            }
            Some(ch) => Err(LexError::new(
                format!("Unexpected punctuation: '{ch}'"),
                pos.to_span(),
            )),
            None => Err(LexError::new(
                "Unexpected end of input".to_string(),
                pos.to_span(),
            )),
        }
    }
}

/// Recognize double-quoted strings.
///
/// The returned text is the content without surrounding quotes. A quote is
/// treated as escaped when preceded by an odd number of backslashes; the
/// backslashes themselves are kept. Strings may not span lines.
///
/// ## Errors
/// Returns `LexError` if a newline or end of input comes before the closing
/// quote. The error points at the opening quote.
///
/// ## Examples
/// - `"abc"` -> `abc`
/// - `"a\"b"` -> `a\"b`
#[derive(Debug, Default)]
pub struct StringLiteralRecognizer;

impl TokenRecognizer for StringLiteralRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        input.current() == Some('"')
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<(TokenKind, String), LexError> {
        let start = input.position();
        let mut content = String::new();
        let mut backslash_run: usize = 0;

        input.advance(); // opening quote

        while let Some(ch) = input.current() {
            if ch == '\n' {
                break;
            }
            if ch == '"' && backslash_run.is_multiple_of(2) {
                input.advance(); // closing quote
                return Ok((TokenKind::String, content));
            }
            content.push(ch);
            backslash_run = if ch == '\\' { backslash_run + 1 } else { 0 };
            input.advance();
        }

        Err(LexError::new(
            "Unterminated string literal".to_string(),
            start.to_span(),
        ))
    }
}

/// Recognize `#` comments running to the end of the line.
#[derive(Debug, Default)]
pub struct CommentRecognizer;

impl TokenRecognizer for CommentRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        input.current() == Some('#')
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<(TokenKind, String), LexError> {
        input.advance(); // '#'

        let mut content = String::new();
        while let Some(ch) = input.current() {
            if ch == '\n' {
                break;
            }
            content.push(ch);
            input.advance();
        }
        if content.ends_with('\r') {
            content.pop();
        }
        Ok((TokenKind::Comment, content))
    }
}

/// Recognize bare words.
///
/// A bare word is a run of ASCII alphanumerics and `_ - + : . [ ] < > ;`,
/// optionally interleaved with macro placeholders `$(NAME)` or `${NAME}`.
/// Placeholders are kept verbatim and may nest.
#[derive(Debug, Default)]
pub struct NameRecognizer;

impl NameRecognizer {
    fn is_name_char(ch: char) -> bool {
        ch.is_ascii_alphanumeric()
            || matches!(ch, '_' | '-' | '+' | ':' | '.' | '[' | ']' | '<' | '>' | ';')
    }

    fn at_placeholder(input: &dyn CharacterStream) -> bool {
        input.current() == Some('$')
            && matches!(input.peek(1), Some('(' | '{'))
    }

    fn consume_placeholder(
        input: &mut dyn CharacterStream,
        word: &mut String,
    ) -> Result<(), LexError> {
        let start = input.position();
        let mut closers = Vec::new();

        while let Some(ch) = input.current() {
            if ch == '\n' {
                break;
            }
            if Self::at_placeholder(input) {
                let open = input.peek(1);
                closers.push(if open == Some('(') { ')' } else { '}' });
                word.push('$');
                input.advance();
            } else if closers.last() == Some(&ch) {
                closers.pop();
                if closers.is_empty() {
                    word.push(ch);
                    input.advance();
                    return Ok(());
                }
            }
            if let Some(ch) = input.advance() {
                word.push(ch);
            }
        }

        Err(LexError::new(
            "Unterminated macro placeholder".to_string(),
            start.to_span(),
        ))
    }
}

impl TokenRecognizer for NameRecognizer {
    fn can_handle(&self, input: &dyn CharacterStream) -> bool {
        input.current().is_some_and(Self::is_name_char)
            || Self::at_placeholder(input)
    }

    fn consume(
        &self,
        input: &mut dyn CharacterStream,
    ) -> Result<(TokenKind, String), LexError> {
        let mut word = String::new();

        loop {
            if Self::at_placeholder(input) {
                Self::consume_placeholder(input, &mut word)?;
            } else if let Some(ch) = input.current()
                && Self::is_name_char(ch)
            {
                word.push(ch);
                input.advance();
            } else {
                break;
            }
        }

        Ok((TokenKind::Name, word))
    }
}

/// Iterate over tokens produced by a `Lexer`.
///
/// Yields `Result<Token, LexError>` and terminates at end of input or right
/// after the first error.
#[derive(Debug)]
pub struct LexerIterator {
    lexer: Lexer,
    finished: bool,
}

impl LexerIterator {
    /// Create an iterator from a lexer.
    #[must_use]
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            finished: false,
        }
    }
}

impl Iterator for LexerIterator {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.lexer.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
