//! Turn scanner tokens into a `Database` of records.
//!
//! The grammar is split into one component per production (see
//! `components`), composed by `DatabaseParser`. Parsing is strict: the first
//! violation aborts with a `ParseError` naming the line, what was expected
//! and what was found.

pub mod ast;
pub mod components;
pub mod config;
pub mod database_parser;
pub mod stream;
pub mod traits;

pub use ast::{Database, PropertyMap, Record, RecordAlias};
pub use config::{DuplicateKeyPolicy, ParseError, ParserOptions};
pub use database_parser::DatabaseParser;
pub use stream::{TokenStreamExt, VectorTokenStream};
pub use traits::{Parser, TokenStream};
