//! FeatureVector and Phone - the encoded form of a phonetic segment.
//!
//! A [`FeatureVector`] packs all 23 feature fields of one segment into the low
//! 46 bits of a `u64`. A [`Phone`] is one element of a tokenized string: either
//! a known vector or the marker for a codepoint the table does not cover.
//!
//! # Examples
//!
//! ```
//! use phonetic_features::{DecodeMode, Feature, FeatureTable, FeatureValue, Phone};
//!
//! let table = FeatureTable::global();
//! let m = table.lookup("m").unwrap();
//!
//! assert_eq!(m.value(Feature::Nasal, DecodeMode::Ternary), FeatureValue::Plus);
//! assert_eq!(m.value(Feature::Syllabic, DecodeMode::Ternary), FeatureValue::Minus);
//!
//! assert_eq!(Phone::Unknown.to_raw(), -1);
//! assert_eq!(Phone::from_raw(m.bits() as i64), Phone::Known(m));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::feature::{DecodeMode, Feature, FeatureValue, FEATURE_COUNT, VECTOR_BITS};

/// Raw integer used for [`Phone::Unknown`] in the integer interface
pub const UNKNOWN_SENTINEL: i64 = -1;

/// Bit-packed feature fields of one segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(u64);

impl FeatureVector {
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Raw two-bit field for `feature` (`0b00`, `0b01` or `0b10`).
    #[inline(always)]
    pub const fn field(self, feature: Feature) -> u64 {
        feature.field(self.0)
    }

    #[inline]
    pub fn value(self, feature: Feature, mode: DecodeMode) -> FeatureValue {
        feature.decode(self.0, mode)
    }

    /// Decoded value of every feature, in field order.
    pub fn profile(self, mode: DecodeMode) -> [(Feature, FeatureValue); FEATURE_COUNT] {
        Feature::ALL.map(|feature| (feature, self.value(feature, mode)))
    }
}

impl From<u64> for FeatureVector {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<FeatureVector> for u64 {
    fn from(vector: FeatureVector) -> Self {
        vector.0
    }
}

impl fmt::Binary for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.0, width = VECTOR_BITS)
    }
}

/// Feature bundle written as `[+consonantal -sonorant ...]`, neutral
/// features omitted.
impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut first = true;
        for (feature, value) in self.profile(DecodeMode::Ternary) {
            if value == FeatureValue::Zero {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{value}{feature}")?;
            first = false;
        }
        f.write_str("]")
    }
}

/// One tokenized segment: a known feature vector or an unrecognized codepoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phone {
    Known(FeatureVector),
    Unknown,
}

impl Phone {
    /// Integer form: the vector bits, or [`UNKNOWN_SENTINEL`].
    #[inline]
    pub const fn to_raw(self) -> i64 {
        match self {
            Phone::Known(vector) => vector.bits() as i64,
            Phone::Unknown => UNKNOWN_SENTINEL,
        }
    }

    /// Inverse of [`to_raw`](Self::to_raw); any negative value is unknown.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Phone::Unknown
        } else {
            Phone::Known(FeatureVector::new(raw as u64))
        }
    }

    #[inline]
    pub const fn vector(self) -> Option<FeatureVector> {
        match self {
            Phone::Known(vector) => Some(vector),
            Phone::Unknown => None,
        }
    }

    /// True when the phone carries a feature vector.
    pub const fn is_known(self) -> bool {
        matches!(self, Phone::Known(_))
    }

    /// Decode one feature; unknown phones are `Undefined` in every mode.
    #[inline]
    pub fn value(self, feature: Feature, mode: DecodeMode) -> FeatureValue {
        match self {
            Phone::Known(vector) => vector.value(feature, mode),
            Phone::Unknown => FeatureValue::Undefined,
        }
    }
}

impl From<FeatureVector> for Phone {
    fn from(vector: FeatureVector) -> Self {
        Phone::Known(vector)
    }
}

impl From<Option<FeatureVector>> for Phone {
    fn from(vector: Option<FeatureVector>) -> Self {
        vector.map_or(Phone::Unknown, Phone::Known)
    }
}
