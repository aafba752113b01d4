//! Optimistic concurrency version stamps.
//!
//! Every versioned entity starts at [`Version::INITIAL`] and moves forward by
//! exactly one on each guarded mutation. Versions are never decremented.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Monotonic version counter carried by versioned entities.
///
/// # Examples
/// ```
/// use agora::domain::Version;
///
/// let first = Version::INITIAL;
/// assert_eq!(first.get(), 1);
/// assert_eq!(first.checked_next().map(Version::get), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(u32);

impl Version {
    /// Version assigned to every entity at creation.
    pub const INITIAL: Self = Self(1);

    /// Wrap a raw version number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw version number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The version that follows this one, or `None` once the counter is spent.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for Version {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Entity kinds guarded by the version gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A post published in a room.
    Post,
    /// A community room.
    Room,
}

impl EntityKind {
    /// Lower-case name used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Room => "room",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability shared by entities that carry an optimistic concurrency stamp.
pub trait Versioned {
    /// Kind reported in conflict and not-found errors.
    const KIND: EntityKind;

    /// Current version of the entity.
    fn version(&self) -> Version;
}
