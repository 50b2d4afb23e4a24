//! Naming and link conventions as compiled patterns.
//!
//! The patterns are process-wide statics compiled on first use and shared
//! read-only between threads.

use std::sync::LazyLock;

use regex::Regex;

/// A `$(NAME)` macro placeholder.
#[expect(clippy::expect_used, reason = "pattern is a literal")]
static MACRO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\([^)]*\)").expect("valid macro pattern"));

/// `asyn<Type><Verb>`; the lazy middle leaves the verb to the suffix group.
#[expect(clippy::expect_used, reason = "pattern is a literal")]
static DTYP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^asyn(.*?)(In|Out|Read|Write)?$").expect("valid DTYP pattern")
});

/// `@asyn(<address>)<drvInfo>`; the address ends at the first `)` that does
/// not close a `$(...)` placeholder. Placeholders may nest one level, as in
/// `$(PORT=$(X))`.
#[expect(clippy::expect_used, reason = "pattern is a literal")]
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^@asyn\((?:\$\((?:\$\([^)]*\)|[^)])*\)|[^)])*\)\s*(.*)$",
    )
    .expect("valid link pattern")
});

const READBACK_SUFFIX: &str = "_RBV";

/// Strip every `$(...)` placeholder, then one trailing `_RBV`.
///
/// ## Examples
/// ```
/// # use epics_db_rs::core::resolver::patterns::canonical_name;
/// assert_eq!(canonical_name("$(P)$(R)Foo_RBV"), "Foo");
/// assert_eq!(canonical_name("Gain"), "Gain");
/// ```
#[must_use]
pub fn canonical_name(name: &str) -> String {
    let stripped = MACRO_RE.replace_all(name, "");
    stripped
        .strip_suffix(READBACK_SUFFIX)
        .unwrap_or(&stripped)
        .to_string()
}

/// The data-type tag of an asyn `DTYP`, or `None` when the value does not
/// follow the convention or names no type.
#[must_use]
pub fn data_type_tag(dtyp: &str) -> Option<&str> {
    DTYP_RE
        .captures(dtyp)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|tag| !tag.is_empty())
}

/// The driver-info suffix of an asyn link, or `None` when the link is
/// malformed or the suffix is empty.
#[must_use]
pub fn drv_info(link: &str) -> Option<&str> {
    LINK_RE
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|info| !info.is_empty())
}
