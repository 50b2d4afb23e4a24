//! Build a static table of typed parameter handles from resolved bindings.
//!
//! `ParamRegistry` is the explicit build step between parameter discovery
//! and a driver: every binding's type tag is mapped onto `DataType`, every
//! parameter name must address exactly one handle, and each handle gets a
//! reason number. With `build_with` the reasons come from a `ParamBackend`
//! that creates the parameter in the driver layer; `build` numbers them by
//! position.
//!
//! The registry is validated as a whole before the backend is called, so a
//! failing build never creates a partial set of parameters.
//!
//! ## Examples
//! ```
//! # use epics_db_rs::core::parse_database;
//! # use epics_db_rs::core::resolver::resolve;
//! # use epics_db_rs::core::registry::{DataType, ParamRegistry};
//! let db = parse_database(r#"
//!     record(ai, "$(P)Temp_RBV") {
//!         field(DTYP, "asynFloat64")
//!         field(INP,  "@asyn($(PORT),0,1)TEMP")
//!     }
//! "#)?;
//! let registry = ParamRegistry::build(&resolve(&db.records))?;
//! let temp = registry.by_name("Temp").expect("registered");
//! assert_eq!(temp.drv_info, "TEMP");
//! assert_eq!(temp.data_type, DataType::Float64);
//! assert_eq!(registry.by_reason(temp.reason), Some(temp));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod data_type;

pub use data_type::{DataType, UnknownDataType};

use std::collections::HashMap;
use std::convert::Infallible;

use serde::Serialize;
use tracing::debug;

use crate::core::resolver::ResolvedParameters;

/// Creates parameters in the driver layer.
///
/// The returned reason identifies the parameter in later read, write and
/// notify calls, which this crate does not perform.
pub trait ParamBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create one parameter and return its reason.
    ///
    /// # Errors
    /// Implementation-defined.
    fn create_param(
        &mut self,
        drv_info: &str,
        data_type: DataType,
    ) -> Result<usize, Self::Error>;
}

/// Numbers parameters 0, 1, 2, ... in creation order.
#[derive(Debug, Default, Clone)]
pub struct SequentialBackend {
    next: usize,
}

impl ParamBackend for SequentialBackend {
    type Error = Infallible;

    fn create_param(
        &mut self,
        _drv_info: &str,
        _data_type: DataType,
    ) -> Result<usize, Self::Error> {
        let reason = self.next;
        self.next += 1;
        Ok(reason)
    }
}

/// Failure to build a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("parameter '{drv_info}': unknown data type '{tag}'")]
    UnknownDataType { tag: String, drv_info: String },
    #[error("parameter name '{name}' is bound by both '{first}' and '{second}'")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error("backend failed to create parameter '{drv_info}'")]
    Backend {
        drv_info: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// One registered parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamHandle {
    /// Position in resolution order.
    pub index: usize,
    pub drv_info: String,
    pub name: String,
    pub data_type: DataType,
    /// Identifier assigned by the backend.
    pub reason: usize,
}

/// Ordered, immutable table of parameter handles.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParamRegistry {
    handles: Vec<ParamHandle>,
    #[serde(skip)]
    by_drv_info: HashMap<String, usize>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
    #[serde(skip)]
    by_reason: HashMap<usize, usize>,
}

impl ParamRegistry {
    /// Build with reasons numbered by position.
    ///
    /// # Errors
    /// `UnknownDataType` or `DuplicateName`; see `build_with`.
    pub fn build(params: &ResolvedParameters) -> Result<Self, RegistryError> {
        Self::build_with(params, &mut SequentialBackend::default())
    }

    /// Build, creating every parameter through `backend` in order.
    ///
    /// # Errors
    /// `UnknownDataType` when a type tag is outside `DataType`,
    /// `DuplicateName` when two bindings share a parameter name, and
    /// `Backend` when the backend rejects a parameter. The backend is not
    /// called unless the whole table is valid.
    pub fn build_with<B: ParamBackend>(
        params: &ResolvedParameters,
        backend: &mut B,
    ) -> Result<Self, RegistryError> {
        let mut typed: Vec<(usize, &str, DataType)> =
            Vec::with_capacity(params.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (index, binding) in params.iter().enumerate() {
            let data_type = binding.data_type_tag.parse::<DataType>().map_err(
                |err| RegistryError::UnknownDataType {
                    tag: err.tag,
                    drv_info: binding.drv_info.clone(),
                },
            )?;
            if let Some(&first) = by_name.get(&binding.param_name) {
                let (_, first, _) = typed[first];
                return Err(RegistryError::DuplicateName {
                    name: binding.param_name.clone(),
                    first: first.to_string(),
                    second: binding.drv_info.clone(),
                });
            }
            by_name.insert(binding.param_name.clone(), index);
            typed.push((index, binding.drv_info.as_str(), data_type));
        }

        let mut registry = Self {
            by_name,
            ..Self::default()
        };
        for (binding, (index, drv_info, data_type)) in params.iter().zip(typed) {
            let reason =
                backend.create_param(drv_info, data_type).map_err(|err| {
                    RegistryError::Backend {
                        drv_info: drv_info.to_string(),
                        source: Box::new(err),
                    }
                })?;
            registry.by_drv_info.insert(drv_info.to_string(), index);
            registry.by_reason.insert(reason, index);
            registry.handles.push(ParamHandle {
                index,
                drv_info: drv_info.to_string(),
                name: binding.param_name.clone(),
                data_type,
                reason,
            });
        }

        debug!(parameters = registry.len(), "built parameter registry");
        Ok(registry)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ParamHandle> {
        self.handles.get(index)
    }

    #[must_use]
    pub fn by_drv_info(&self, drv_info: &str) -> Option<&ParamHandle> {
        self.by_drv_info.get(drv_info).and_then(|&i| self.get(i))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&ParamHandle> {
        self.by_name.get(name).and_then(|&i| self.get(i))
    }

    #[must_use]
    pub fn by_reason(&self, reason: usize) -> Option<&ParamHandle> {
        self.by_reason.get(&reason).and_then(|&i| self.get(i))
    }

    /// Handles in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamHandle> {
        self.handles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
