//! Unique identifiers for matrix entities
//!
//! Each entity type has its own ID type to provide type safety and prevent
//! mixing up different kinds of identifiers. IDs are string-backed because
//! they round-trip through the JSON exchange format (`"v1"`, `"z2"`, `"sg3"`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a Parameter within a matrix
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamId(pub String);

/// Unique identifier for a Version (scenario)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub String);

/// Unique identifier for a Zone (market)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

/// Unique identifier for a ScalingGroup
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl ParamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl VersionId {
    /// The id for the nth version, 1-based: `v1`, `v2`, ...
    #[must_use]
    pub fn numbered(n: u32) -> Self {
        Self(format!("v{n}"))
    }

    /// Parse the numeric suffix out of a `vN` id
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix('v').and_then(|s| s.parse().ok())
    }
}

impl ZoneId {
    /// The id for the nth zone, 1-based: `z1`, `z2`, ...
    #[must_use]
    pub fn numbered(n: u32) -> Self {
        Self(format!("z{n}"))
    }

    /// Parse the numeric suffix out of a `zN` id
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix('z').and_then(|s| s.parse().ok())
    }
}

impl GroupId {
    /// The id for the nth allocated group: `sg1`, `sg2`, ...
    #[must_use]
    pub fn numbered(n: u32) -> Self {
        Self(format!("sg{n}"))
    }

    /// Parse the numeric suffix out of a `sgN` id
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix("sg").and_then(|s| s.parse().ok())
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        })*
    };
}

impl_display!(ParamId, VersionId, ZoneId, GroupId);
