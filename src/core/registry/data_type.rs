//! The fixed set of asyn parameter data types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EnumKindName;

/// Parameter data type, as named by the `DTYP` type tag.
///
/// ## Examples
/// ```
/// # use epics_db_rs::core::registry::DataType;
/// let ty: DataType = "Float64Array".parse()?;
/// assert_eq!(ty, DataType::Float64Array);
/// assert!(ty.is_array());
/// assert!("UInt32Digital".parse::<DataType>().is_err());
/// # Ok::<(), epics_db_rs::core::registry::UnknownDataType>(())
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumKindName,
)]
pub enum DataType {
    Int32,
    Float64,
    Octet,
    Int8Array,
    Int16Array,
    Int32Array,
    Float32Array,
    Float64Array,
}

impl DataType {
    /// Every data type, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Int32,
        Self::Float64,
        Self::Octet,
        Self::Int8Array,
        Self::Int16Array,
        Self::Int32Array,
        Self::Float32Array,
        Self::Float64Array,
    ];

    /// True for the waveform-style array types.
    #[must_use]
    pub fn is_array(self) -> bool {
        matches!(
            self,
            Self::Int8Array
                | Self::Int16Array
                | Self::Int32Array
                | Self::Float32Array
                | Self::Float64Array
        )
    }
}

/// A type tag outside the fixed enumeration.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error,
)]
#[error("unknown data type '{tag}'")]
pub struct UnknownDataType {
    pub tag: String,
}

impl FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == tag)
            .ok_or_else(|| UnknownDataType {
                tag: tag.to_string(),
            })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
