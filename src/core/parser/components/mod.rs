//! Grammar components for EPICS database parsing.
//!
//! Each component covers one production and implements `Parser<T>`:
//!
//! - `primitives`: `RecordNameExpr := [String] Name [String]`.
//! - `clauses`: `field(...)`, `info(...)`, and both `alias(...)` forms.
//! - `records`: a whole `record(type, name) { ... }` block.
//!
//! Components skip comments before every decision and fail with a
//! `ParseError` at the first token that does not fit. None of them recover;
//! the database parser aborts on the first error.
//!
//! ## Examples
//! Parse a single `field` clause.
//! ```
//! # use epics_db_rs::core::parser::components::clauses::PropertyParser;
//! # use epics_db_rs::core::parser::traits::Parser;
//! # use epics_db_rs::core::parser::stream::VectorTokenStream;
//! # use epics_db_rs::core::parser::config::ParserOptions;
//! # use epics_db_rs::core::scanner::Lexer;
//! let toks = Lexer::collect_tokens(r#"field(SCAN, "I/O Intr")"#).expect("scan ok");
//! let mut s = VectorTokenStream::new(toks);
//! let clause = PropertyParser::field().parse(&mut s, &ParserOptions::default())?;
//! assert_eq!(clause.key, "SCAN");
//! assert_eq!(clause.value, "I/O Intr");
//! # Ok::<(), epics_db_rs::core::parser::config::ParseError>(())
//! ```

pub mod clauses;
pub mod primitives;
pub mod records;
