//! The gene count domain.
//!
//! Every individual carries exactly 0, 1, or 2 copies of the modeled gene.
//! `GeneCount` doubles as an index into fixed-size `[f64; 3]` tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of copies of the gene an individual carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum GeneCount {
    Zero = 0,
    One = 1,
    Two = 2,
}

impl GeneCount {
    /// All gene counts in ascending order.
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Slot of this count in a `[_; 3]` table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`GeneCount::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GeneCount::Zero),
            1 => Some(GeneCount::One),
            2 => Some(GeneCount::Two),
            _ => None,
        }
    }

    /// The next count in odometer order, wrapping 2 → 0.
    ///
    /// Returns the new count and whether the digit wrapped (a carry).
    #[inline]
    pub fn increment(self) -> (Self, bool) {
        match self {
            GeneCount::Zero => (GeneCount::One, false),
            GeneCount::One => (GeneCount::Two, false),
            GeneCount::Two => (GeneCount::Zero, true),
        }
    }

    /// Parse the textual form used in pedigree files ("0", "1", "2").
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "0" => Some(GeneCount::Zero),
            "1" => Some(GeneCount::One),
            "2" => Some(GeneCount::Two),
            _ => None,
        }
    }
}

impl From<GeneCount> for u8 {
    fn from(count: GeneCount) -> Self {
        count as u8
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GeneCount::from_index(value as usize)
            .ok_or_else(|| format!("gene count must be 0, 1, or 2 (got {value})"))
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for count in GeneCount::ALL {
            assert_eq!(GeneCount::from_index(count.index()), Some(count));
        }
        assert_eq!(GeneCount::from_index(3), None);
    }

    #[test]
    fn increment_wraps_with_carry() {
        assert_eq!(GeneCount::Zero.increment(), (GeneCount::One, false));
        assert_eq!(GeneCount::One.increment(), (GeneCount::Two, false));
        assert_eq!(GeneCount::Two.increment(), (GeneCount::Zero, true));
    }

    #[test]
    fn parse_accepts_digits_only() {
        assert_eq!(GeneCount::parse("2"), Some(GeneCount::Two));
        assert_eq!(GeneCount::parse(" 1 "), Some(GeneCount::One));
        assert_eq!(GeneCount::parse("3"), None);
        assert_eq!(GeneCount::parse(""), None);
    }

    #[test]
    fn serde_as_integer() {
        let json = serde_json::to_string(&GeneCount::Two).unwrap();
        assert_eq!(json, "2");
        let back: GeneCount = serde_json::from_str("1").unwrap();
        assert_eq!(back, GeneCount::One);
        assert!(serde_json::from_str::<GeneCount>("7").is_err());
    }
}
