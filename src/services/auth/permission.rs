//! Bitmask permissions.
//!
//! A role is a set of permission bits; a route demands a mask. What each bit
//! means is configuration (`ROLE_ADMIN` etc.), not something this module knows.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionMask(u32);

impl PermissionMask {
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// True when every bit of `required` is also set in `self`.
    ///
    /// Overlap is not enough: a mask with two bits demands both.
    pub const fn covers(self, required: PermissionMask) -> bool {
        self.0 & required.0 == required.0
    }
}

/// Admission rule for the role gate: `(role & required) == required`.
pub const fn is_admitted(role: PermissionMask, required: PermissionMask) -> bool {
    role.covers(required)
}

impl fmt::Display for PermissionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

impl FromStr for PermissionMask {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

/// A role column holding a negative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("role value must be non-negative, got {0}")]
pub struct NegativeRole(pub i32);

impl TryFrom<i32> for PermissionMask {
    type Error = NegativeRole;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| NegativeRole(value))
    }
}
