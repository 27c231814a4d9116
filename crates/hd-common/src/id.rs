//! Person identity types.
//!
//! Individuals are stored in an arena; a `PersonId` is their position in it.
//! Parent links are resolved to `PersonId`s once at load time so the
//! inference loops never look names up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arena index of an individual within a pedigree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl PersonId {
    /// Position of the individual in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask selecting this individual in a 64-bit set.
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for PersonId {
    fn from(index: usize) -> Self {
        PersonId(index as u32)
    }
}
