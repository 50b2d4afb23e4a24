#![deny(clippy::expect_used)] // using deny so that test code can use it
#![deny(clippy::style)]
#![deny(clippy::unwrap_used)] // using deny so that test code can use it
#![deny(unsafe_code)]
// deny rather than forbid: serde and thiserror derives emit `#[allow]`s
#![deny(clippy::allow_attributes)]
#![deny(clippy::complexity)]
#![deny(clippy::correctness)]
#![deny(clippy::pedantic)]
#![deny(clippy::perf)]
#![deny(clippy::suspicious)]
#![deny(future_incompatible)]

//! Parse EPICS database (`.db` / `.template`) text and discover the asyn
//! driver parameters its records bind to.
//!
//! The pipeline runs leaf-first: the scanner turns text into tokens, the
//! database parser turns tokens into records, and the resolver folds the
//! records into an ordered `drvInfo -> ParameterBinding` mapping. The
//! registry and loader sit on top for callers wiring a driver.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::{parse_database, resolver::resolve};
//! let db = parse_database(
//!     r#"record(ai, "X") {
//!         field(DTYP, "asynInt32In")
//!         field(INP, "@asyn(PORT,0,0)MYPARAM")
//!     }"#,
//! )?;
//! let params = resolve(&db.records);
//! let binding = params.get("MYPARAM").expect("bound");
//! assert_eq!(binding.param_name, "X");
//! assert_eq!(binding.data_type_tag, "Int32");
//! # Ok::<(), epics_db_rs::core::Error>(())
//! ```

pub mod core;

// Re-export proc macros for AST derivation
pub use compiler_macros::{AstNode, EnumKindName};
