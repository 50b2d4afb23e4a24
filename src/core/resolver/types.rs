//! Resolver output types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One discovered parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    /// Driver-info string from the record's asyn link.
    pub drv_info: String,
    /// Name the parameter is exposed under.
    pub param_name: String,
    /// Raw type tag from `DTYP`, e.g. `Int32` or `Float64Array`.
    pub data_type_tag: String,
}

/// Why a record contributed no binding.
///
/// Skips are expected for most records of a real database and are not
/// errors.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error,
)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("DTYP '{dtyp}' is not an asyn device type")]
    UnrecognizedDeviceType { dtyp: String },
    #[error("no INP or OUT link")]
    MissingLink,
    #[error("link '{link}' has no asyn driver info")]
    MalformedLink { link: String },
}

/// Bindings keyed by `drv_info`, in discovery order.
///
/// Insertion is first-seen-wins: a binding whose `drv_info` is already
/// present is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ParameterBinding>", into = "Vec<ParameterBinding>")]
pub struct ResolvedParameters {
    bindings: Vec<ParameterBinding>,
    index: HashMap<String, usize>,
}

impl ResolvedParameters {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `drv_info` is taken; returns whether it was inserted.
    pub fn insert(&mut self, binding: ParameterBinding) -> bool {
        if self.index.contains_key(&binding.drv_info) {
            return false;
        }
        self.index
            .insert(binding.drv_info.clone(), self.bindings.len());
        self.bindings.push(binding);
        true
    }

    /// Binding for `drv_info`.
    #[must_use]
    pub fn get(&self, drv_info: &str) -> Option<&ParameterBinding> {
        self.index.get(drv_info).and_then(|&i| self.bindings.get(i))
    }

    #[must_use]
    pub fn contains(&self, drv_info: &str) -> bool {
        self.index.contains_key(drv_info)
    }

    /// Bindings in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterBinding> {
        self.bindings.iter()
    }

    /// Driver-info keys in discovery order.
    pub fn drv_infos(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.drv_info.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in discovery order, by value.
    #[must_use]
    pub fn into_vec(self) -> Vec<ParameterBinding> {
        self.bindings
    }
}

impl From<Vec<ParameterBinding>> for ResolvedParameters {
    fn from(bindings: Vec<ParameterBinding>) -> Self {
        bindings.into_iter().collect()
    }
}

impl From<ResolvedParameters> for Vec<ParameterBinding> {
    fn from(params: ResolvedParameters) -> Self {
        params.into_vec()
    }
}

impl FromIterator<ParameterBinding> for ResolvedParameters {
    fn from_iter<I: IntoIterator<Item = ParameterBinding>>(iter: I) -> Self {
        let mut params = Self::new();
        for binding in iter {
            params.insert(binding);
        }
        params
    }
}

impl<'a> IntoIterator for &'a ResolvedParameters {
    type Item = &'a ParameterBinding;
    type IntoIter = std::slice::Iter<'a, ParameterBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}
