//! Strongly typed identifier wrappers.
//!
//! Every entity on the wire (cars, roads, junctions, lanes) is named by an
//! opaque string of 1..=64 bytes.  The wrappers keep those namespaces apart
//! at the type level — a `CarId` can never be used to look up a road — and
//! enforce the length bound at construction, including during
//! deserialization via `serde(try_from = "String")`.
//!
//! IDs implement `Borrow<str>` so hash maps keyed by an ID type can be
//! probed with a plain `&str` without cloning.

use std::borrow::Borrow;
use std::fmt;

use crate::{TdError, TdResult};

/// Maximum identifier length in bytes.
pub const MAX_ID_LEN: usize = 64;

/// Generate a typed ID wrapper around a validated opaque string.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(try_from = "String", into = "String")
        )]
        $vis struct $name(Box<str>);

        impl $name {
            /// Validate and wrap an identifier string.
            pub fn new(id: impl Into<String>) -> TdResult<Self> {
                let id = id.into();
                if id.is_empty() || id.len() > MAX_ID_LEN {
                    return Err(TdError::InvalidId(format!(
                        "{} must be 1..={MAX_ID_LEN} bytes, got {}",
                        stringify!($name),
                        id.len()
                    )));
                }
                Ok(Self(id.into_boxed_str()))
            }

            /// The raw identifier string.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TdError;
            fn try_from(id: String) -> TdResult<Self> {
                Self::new(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0.into_string()
            }
        }

        impl Borrow<str> for $name {
            #[inline]
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier of a car, unique within one simulation run.
    pub struct CarId;
}

typed_id! {
    /// Identifier of a road in the topology.
    pub struct RoadId;
}

typed_id! {
    /// Identifier of a junction in the topology.
    pub struct JunctionId;
}

typed_id! {
    /// Identifier of a lane within a road.  Lanes are opaque to the
    /// dispatcher and carried through untouched.
    pub struct LaneId;
}
