//! Phonological features, their bit fields, and decoded feature values.
//!
//! Every [`FeatureVector`](crate::FeatureVector) is split into 23 two-bit
//! fields, one per [`Feature`], ordered from the most significant field
//! (`consonantal`) to the least significant one (`nasal`):
//!
//! ```text
//! bit 45                                                      bit 0
//! | cons | son | syl | lab | ... | lat | del_rel | nasal |
//!   11     11    11    11          11     11        11      <- masks
//! ```
//!
//! Within a field, `00` is neutral, `01` is present (+) and `10` is absent
//! (-). The lower bit of each field is the "positive" bit.
//!
//! # Examples
//!
//! ```
//! use phonetic_features::{DecodeMode, Feature, FeatureValue};
//!
//! let voice: Feature = "voice".parse().unwrap();
//! assert_eq!(voice, Feature::Voice);
//! assert_eq!(voice.mask(), 0b11 << 14);
//! assert_eq!(voice.positive_bit(), 0b01 << 14);
//!
//! assert_eq!(voice.decode(0b01 << 14, DecodeMode::Ternary), FeatureValue::Plus);
//! assert_eq!(voice.decode(0b10 << 14, DecodeMode::Ternary), FeatureValue::Minus);
//! assert_eq!(voice.decode(0b10 << 14, DecodeMode::Binary), FeatureValue::Zero);
//! ```

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PhoneticError, Result};

/// Number of phonological features encoded in a vector
pub const FEATURE_COUNT: usize = 23;

/// Bits per feature field
pub const FIELD_BITS: usize = 2;

/// Number of meaningful bits in a feature vector
pub const VECTOR_BITS: usize = FEATURE_COUNT * FIELD_BITS;

/// All bits a feature vector may legally use
pub const VECTOR_MASK: u64 = (1 << VECTOR_BITS) - 1;

/// Field pattern for "feature present"
pub const FIELD_PLUS: u64 = 0b01;

/// Field pattern for "feature absent"
pub const FIELD_MINUS: u64 = 0b10;

/// Field pattern that never appears in valid data
pub const FIELD_RESERVED: u64 = 0b11;

/// A phonological feature, one per two-bit field of a feature vector.
///
/// Variants are declared in field order, most significant first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Consonantal,
    Sonorant,
    Syllabic,
    Labial,
    Round,
    Coronal,
    Anterior,
    Distributed,
    Dorsal,
    High,
    Low,
    Back,
    Tense,
    Pharyngeal,
    #[serde(rename = "ATR")]
    Atr,
    Voice,
    SpreadGlottis,
    ConstrictedGlottis,
    Continuant,
    Strident,
    Lateral,
    DelayedRelease,
    Nasal,
}

impl Feature {
    /// Every feature in field order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Consonantal,
        Feature::Sonorant,
        Feature::Syllabic,
        Feature::Labial,
        Feature::Round,
        Feature::Coronal,
        Feature::Anterior,
        Feature::Distributed,
        Feature::Dorsal,
        Feature::High,
        Feature::Low,
        Feature::Back,
        Feature::Tense,
        Feature::Pharyngeal,
        Feature::Atr,
        Feature::Voice,
        Feature::SpreadGlottis,
        Feature::ConstrictedGlottis,
        Feature::Continuant,
        Feature::Strident,
        Feature::Lateral,
        Feature::DelayedRelease,
        Feature::Nasal,
    ];

    /// Canonical (case-sensitive) name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Feature::Consonantal => "consonantal",
            Feature::Sonorant => "sonorant",
            Feature::Syllabic => "syllabic",
            Feature::Labial => "labial",
            Feature::Round => "round",
            Feature::Coronal => "coronal",
            Feature::Anterior => "anterior",
            Feature::Distributed => "distributed",
            Feature::Dorsal => "dorsal",
            Feature::High => "high",
            Feature::Low => "low",
            Feature::Back => "back",
            Feature::Tense => "tense",
            Feature::Pharyngeal => "pharyngeal",
            Feature::Atr => "ATR",
            Feature::Voice => "voice",
            Feature::SpreadGlottis => "spread_glottis",
            Feature::ConstrictedGlottis => "constricted_glottis",
            Feature::Continuant => "continuant",
            Feature::Strident => "strident",
            Feature::Lateral => "lateral",
            Feature::DelayedRelease => "delayed_release",
            Feature::Nasal => "nasal",
        }
    }

    /// Position of the field, 0 being the most significant.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Right shift that moves this feature's field to bits 1..0.
    #[inline(always)]
    pub const fn shift(self) -> u32 {
        ((FEATURE_COUNT - 1 - self.index()) * FIELD_BITS) as u32
    }

    /// Two-bit mask selecting this feature's field.
    #[inline(always)]
    pub const fn mask(self) -> u64 {
        FIELD_RESERVED << self.shift()
    }

    /// Lower bit of the field, set when the feature is present.
    #[inline(always)]
    pub const fn positive_bit(self) -> u64 {
        FIELD_PLUS << self.shift()
    }

    /// Raw two-bit field of `bits` for this feature.
    #[inline(always)]
    pub const fn field(self, bits: u64) -> u64 {
        (bits & self.mask()) >> self.shift()
    }

    /// Decode this feature from a vector's bits.
    #[inline]
    pub fn decode(self, bits: u64, mode: DecodeMode) -> FeatureValue {
        decode_masked(bits, self.mask(), mode)
    }
}

/// Decode the two-bit field selected by `mask` from `bits`.
///
/// The positive bit is the lowest set bit of the mask.
#[inline]
pub fn decode_masked(bits: u64, mask: u64, mode: DecodeMode) -> FeatureValue {
    let masked = bits & mask;
    if masked == 0 {
        FeatureValue::Zero
    } else if masked & (mask & mask.wrapping_neg()) != 0 {
        FeatureValue::Plus
    } else if mode.is_binary() {
        FeatureValue::Zero
    } else {
        FeatureValue::Minus
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = PhoneticError;

    fn from_str(name: &str) -> Result<Self> {
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == name)
            .ok_or_else(|| {
                debug!(name, "rejected unknown feature name");
                PhoneticError::InvalidFeatureName {
                    name: name.to_string(),
                    expected: feature_names().iter().join(", "),
                }
            })
    }
}

/// Canonical feature names in field order.
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    Feature::ALL.map(Feature::name)
}

/// Decoded value of one feature for one phone.
///
/// `Zero` means the feature is neutral for the phone (or absent, in binary
/// mode); `Undefined` means the phone itself was not recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureValue {
    Plus,
    Minus,
    Zero,
    Undefined,
}

impl FeatureValue {
    /// Numeric value, `None` for `Undefined`.
    pub const fn as_i8(self) -> Option<i8> {
        match self {
            FeatureValue::Plus => Some(1),
            FeatureValue::Minus => Some(-1),
            FeatureValue::Zero => Some(0),
            FeatureValue::Undefined => None,
        }
    }

    /// Numeric value with `Undefined` mapped to NaN.
    pub fn as_f64(self) -> f64 {
        self.as_i8().map_or(f64::NAN, f64::from)
    }

    /// False only for `Undefined`.
    pub const fn is_defined(self) -> bool {
        !matches!(self, FeatureValue::Undefined)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeatureValue::Plus => "+",
            FeatureValue::Minus => "-",
            FeatureValue::Zero => "0",
            FeatureValue::Undefined => "?",
        };
        f.write_str(s)
    }
}

/// How absent features are reported.
///
/// `Ternary` keeps the +/-/0 distinction; `Binary` flattens "absent" to
/// `Zero` so only the presence of a feature is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    #[default]
    Ternary,
    Binary,
}

impl DecodeMode {
    #[inline(always)]
    pub const fn is_binary(self) -> bool {
        matches!(self, DecodeMode::Binary)
    }
}

impl From<bool> for DecodeMode {
    fn from(binary: bool) -> Self {
        if binary {
            DecodeMode::Binary
        } else {
            DecodeMode::Ternary
        }
    }
}
