//! Derive asyn parameter bindings from parsed records.
//!
//! A record contributes a binding when its `DTYP` follows the
//! `asyn<Type>[In|Out|Read|Write]` convention and its `INP` (or, failing
//! that, `OUT`) link has the form `@asyn(<address>)<drvInfo>` with a
//! non-empty driver-info suffix. The parameter is named by the record's
//! `pyname` info tag when set, otherwise by the record name with macro
//! placeholders and a trailing `_RBV` removed.
//!
//! Resolution is a pure fold over the records in order. The first record to
//! claim a driver-info string wins; later ones are ignored silently.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::parse_database;
//! # use epics_db_rs::core::resolver::resolve;
//! let db = parse_database(r#"
//!     record(ai, "$(P)Gain_RBV") {
//!         field(DTYP, "asynFloat64")
//!         field(INP,  "@asyn($(PORT),0,1)GAIN")
//!     }
//!     record(ao, "$(P)Gain") {
//!         field(DTYP, "asynFloat64")
//!         field(OUT,  "@asyn($(PORT),0,1)GAIN")
//!     }
//! "#)?;
//! let params = resolve(&db.records);
//! assert_eq!(params.len(), 1);
//! let gain = params.get("GAIN").expect("bound");
//! assert_eq!(gain.param_name, "Gain");
//! assert_eq!(gain.data_type_tag, "Float64");
//! # Ok::<(), epics_db_rs::core::Error>(())
//! ```

pub mod patterns;
pub mod types;

pub use types::{ParameterBinding, ResolvedParameters, SkipReason};

use tracing::{debug, trace};

use crate::core::parser::ast::Record;

/// Info tag overriding the derived parameter name.
pub const NAME_OVERRIDE_TAG: &str = "pyname";

/// Resolve one record.
///
/// # Errors
/// Returns why the record contributes no binding.
pub fn resolve_record(record: &Record) -> Result<ParameterBinding, SkipReason> {
    let dtyp = record.field("DTYP").unwrap_or_default();
    let tag = patterns::data_type_tag(dtyp).ok_or_else(|| {
        SkipReason::UnrecognizedDeviceType {
            dtyp: dtyp.to_string(),
        }
    })?;

    let link = record
        .field("INP")
        .or_else(|| record.field("OUT"))
        .ok_or(SkipReason::MissingLink)?;
    let drv_info =
        patterns::drv_info(link).ok_or_else(|| SkipReason::MalformedLink {
            link: link.to_string(),
        })?;

    let param_name = match record.info_tag(NAME_OVERRIDE_TAG) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => patterns::canonical_name(&record.name),
    };

    Ok(ParameterBinding {
        drv_info: drv_info.to_string(),
        param_name,
        data_type_tag: tag.to_string(),
    })
}

/// Resolve all records, first-seen-wins per driver-info string.
#[must_use]
pub fn resolve(records: &[Record]) -> ResolvedParameters {
    let mut params = ResolvedParameters::new();
    for record in records {
        match resolve_record(record) {
            Ok(binding) => {
                let drv_info = binding.drv_info.clone();
                if !params.insert(binding) {
                    trace!(
                        record = %record.name,
                        drv_info = %drv_info,
                        "driver info already bound by an earlier record"
                    );
                }
            }
            Err(reason) => {
                trace!(record = %record.name, %reason, "record skipped");
            }
        }
    }
    debug!(
        records = records.len(),
        parameters = params.len(),
        "resolved parameters"
    );
    params
}
