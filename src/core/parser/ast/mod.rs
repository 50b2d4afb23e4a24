//! Parsed representation of an EPICS database.
//!
//! The parser produces a `Database`: the records in textual order plus the
//! top-level `alias(record, alias)` clauses. Every node exposes the source
//! `SymbolSpan` it was parsed from and a stable node kind via `AstNode`.
//!
//! Record bodies are stored as `PropertyMap`s, an insertion-ordered string
//! map with unique keys. `fields` and `info` are separate namespaces.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::parser::ast::*;
//! # use epics_db_rs::core::scanner::tokens::SymbolSpan;
//! let mut record = Record::new("ai", "$(P)Temp", SymbolSpan::new((1, 1), (4, 1)));
//! record.fields.insert("DTYP", "asynFloat64");
//! record.fields.insert("INP", "@asyn(PORT,0,1)TEMP");
//! assert_eq!(record.field("DTYP"), Some("asynFloat64"));
//! assert_eq!(record.fields.keys().collect::<Vec<_>>(), ["DTYP", "INP"]);
//! assert_eq!(record.node_type(), "Record");
//! ```

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::AstNode;
use crate::core::scanner::tokens::SymbolSpan;

/// Types that carry a source span.
pub trait HasSpan {
    /// Return the source span covered by this value.
    fn span(&self) -> &SymbolSpan;
}

/// Types that have a node type name.
pub trait HasNodeType {
    /// Return a stable node-kind name for debugging.
    fn node_type(&self) -> &'static str;
}

/// Common interface for all parsed nodes.
pub trait AstNode: Debug + HasSpan + HasNodeType {}

/// An insertion-ordered string map with unique keys.
///
/// `insert` replaces the value of an existing key in place, keeping its
/// original position. Callers decide beforehand whether a repeat is
/// allowed; see `DuplicateKeyPolicy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: Vec<(String, String)>,
}

impl PropertyMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace; returns the previous value for `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) =
            self.entries.iter_mut().find(|(k, _)| *k == key)
        {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// One `record(type, name) { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AstNode)]
pub struct Record {
    /// Record type, e.g. `ai`, `waveform`.
    pub rtype: String,
    /// Record name, possibly with unresolved `$(MACRO)` placeholders.
    pub name: String,
    /// `field(NAME, "value")` entries.
    pub fields: PropertyMap,
    /// `info(NAME, "value")` entries.
    pub info: PropertyMap,
    /// Alias attached in the body or by a top-level `alias` clause.
    pub alias: Option<String>,
    /// Span from `record` to the closing brace.
    pub span: SymbolSpan,
}

impl Record {
    /// Create a record with an empty body.
    pub fn new(
        rtype: impl Into<String>,
        name: impl Into<String>,
        span: SymbolSpan,
    ) -> Self {
        Self {
            rtype: rtype.into(),
            name: name.into(),
            fields: PropertyMap::new(),
            info: PropertyMap::new(),
            alias: None,
            span,
        }
    }

    /// Value of field `key`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    /// Value of info tag `key`.
    #[must_use]
    pub fn info_tag(&self, key: &str) -> Option<&str> {
        self.info.get(key)
    }
}

/// A top-level `alias(record, alias)` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AstNode)]
pub struct RecordAlias {
    /// Name of the aliased record (may be defined in another file).
    pub record: String,
    /// The alternative name.
    pub alias: String,
    pub span: SymbolSpan,
}

/// A parsed database: records and top-level aliases in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub records: Vec<Record>,
    pub aliases: Vec<RecordAlias>,
}

impl Database {
    /// Records whose name is exactly `name`, in textual order.
    pub fn records_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.name == name)
    }

    /// Top-level aliases whose target record is not part of this database.
    pub fn unresolved_aliases(&self) -> impl Iterator<Item = &RecordAlias> {
        self.aliases
            .iter()
            .filter(|a| !self.records.iter().any(|r| r.name == a.record))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
