//! FeatureTable - the closed inventory of IPA segments and their vectors.
//!
//! The inventory is compiled in and never changes at runtime. It is validated
//! once, the first time [`FeatureTable::global`] is called, against the
//! structural invariants the tokenizer and decoder rely on:
//!
//! - feature masks are pairwise disjoint and together cover every vector bit
//! - no vector sets bits outside [`VECTOR_MASK`] or uses the reserved `11`
//!   field pattern
//! - every key is 1 to [`MAX_SEGMENT_LEN`] codepoints, lowercase and NFC, so
//!   that normalized input can reach it
//! - every multi-codepoint key decomposes into single-codepoint keys, so the
//!   greedy tokenizer always has a fallback when the longer match fails
//!
//! # Examples
//!
//! ```
//! use phonetic_features::FeatureTable;
//!
//! let table = FeatureTable::global();
//! assert!(table.contains("pf"));
//! assert!(table.contains("p"));
//! assert_eq!(table.lookup("q!"), None);
//!
//! // Labiodental and bilabial fricatives share a vector
//! assert_eq!(table.segments_for(table.lookup("f").unwrap()), vec!["f", "ɸ"]);
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::{PhoneticError, Result};
use crate::feature::{Feature, FEATURE_COUNT, FIELD_RESERVED, VECTOR_MASK};
use crate::vector::FeatureVector;

/// Longest segment spelling, in codepoints
pub const MAX_SEGMENT_LEN: usize = 3;

/// Segment spellings and their feature vectors, in inventory order.
#[rustfmt::skip]
pub const SEGMENTS: &[(&str, u64)] = &[
    // obstruents
    ("t", 0b0110101000010110100000000010001010101010101010),
    ("d", 0b0110101000010110100000000010000110101010101010),
    ("s", 0b0110101000010110100000000010001010100101101010),
    ("z", 0b0110101000010110100000000010000110100101101010),
    ("ɬ", 0b0110101000010110100000000010001001100110011010),
    ("ɮ", 0b0110101000010110100000000010000110100110011010),
    ("θ", 0b0110101000010110100000000010001010100110101010),
    ("ð", 0b0110101000010110100000000010000110100110101010),
    ("ʃ", 0b0110101000011001100000000010001010100101101010),
    ("ʒ", 0b0110101000011001100000000010000110100101101010),
    ("c", 0b0110101000011001010110101010001010101010101010),
    ("ɟ", 0b0110101000011001010110101010000110101010101010),
    ("ç", 0b0110101000011001010110101010001010100110101010),
    ("ʝ", 0b0110101000011001010110101010000110100110101010),
    ("p", 0b0110100110100000100000000010001010101010101010),
    ("b", 0b0110100110100000100000000010000110101010101010),
    ("f", 0b0110100110100000100000000010001010100110101010),
    ("v", 0b0110100110100000100000000010000110100110101010),
    ("ɸ", 0b0110100110100000100000000010001010100110101010),
    ("β", 0b0110100110100000100000000010000110100110101010),
    ("k", 0b0110101000100000010110011010001010101010101010),
    ("g", 0b0110101000100000010110011010000110101010101010),
    ("x", 0b0110101000100000010110011010001010100110101010),
    ("ɣ", 0b0110101000100000010110011010000110100110101010),
    ("q", 0b0110101000100000011010011010001010101010101010),
    ("ɢ", 0b0110101000100000011010011010000110101010101010),
    ("χ", 0b0110101000100000011010011010001010100110101010),
    ("ʁ", 0b0110101000100000011010011010000110100110101010),
    ("ħ", 0b0110101000100000100000000001101010100110101010),
    ("ʕ", 0b0110101000100000100000000001101010100110101010),
    ("h", 0b1010101000100000100000000010001001100110101010),
    ("ɦ", 0b1010101000100000100000000010000101100110101010),
    ("ʔ", 0b1010101000100000100000000010001010011010101010),
    // affricates
    ("tʃ", 0b0110101000011001010110101010001010101001100110),
    ("dʒ", 0b0110101000011001010110101010000110101001100110),
    ("ts", 0b0110101000010110100000000010001010101001100110),
    ("dz", 0b0110101000010110100000000010000110101001100110),
    ("kx", 0b0110101000100000010110011010001010101010100110),
    ("pf", 0b0110100110100000100000000010001010101001100110),
    // nasals
    ("m", 0b0101100110100000100000000010000110101010101001),
    ("n", 0b0101101000010110100000000010000110101010101001),
    ("ŋ", 0b0101101000100000010110011010000110101010101001),
    ("ɳ", 0b0101101000011010011010101010000110101010101001),
    ("ɲ", 0b0101101000100000010110101010000110101010101001),
    ("ɴ", 0b0101101000100000011010011010000110101010101001),
    // liquids
    ("l", 0b0101101000010110100000000010000110100110011010),
    ("ʎ", 0b0101101000100000010110101010000110100110011010),
    ("r", 0b0101101000010110100000000010000110100110101010),
    ("ɹ", 0b0101101000010110100000000010000110100110101010),
    ("ʀ", 0b0101101000100000011010011010000110100110101010),
    // glides
    ("j", 0b1001100110100000010110101010000110100110101010),
    ("w", 0b1001100101100000010110011010000110100110101010),
    ("ɥ", 0b1001100101100000010110101010000110100110101010),
    ("ɰ", 0b1001100110100000010110011010000110100110101010),
    // vowels
    ("i", 0b1001010110100000010110100101010110100110101010),
    ("ɪ", 0b1001010110100000010110101001100110100110101010),
    ("u", 0b1001010101100000010110010101010110100110101010),
    ("ʊ", 0b1001010101100000010110011001100110100110101010),
    ("e", 0b1001010110100000011010100101010110100110101010),
    ("ɛ", 0b1001010110100000011010101001100110100110101010),
    ("o", 0b1001010101100000011010010101010110100110101010),
    ("ɔ", 0b1001010101100000011010011001100110100110101010),
    ("a", 0b1001010110100000011001101001100110100110101010),
    ("æ", 0b1001010110100000011001100101100110100110101010),
    ("y", 0b1001010101100000010110100101010110100110101010),
    ("ʏ", 0b1001010101100000010110101001100110100110101010),
    ("ø", 0b1001010101100000011010100101010110100110101010),
    ("œ", 0b1001010110100000011010101001100110100110101010),
    ("ə", 0b1001010101100000011010011001100110100110101010),
    ("ɯ", 0b1001010101100000010110010101100110100110101010),
    // labialized velars
    ("kw", 0b0110100101100000010110011010001010101010101010),
    ("gw", 0b0110100101100000010110011010000110101010101010),
];

/// Immutable, validated segment inventory.
#[derive(Clone, Debug, Serialize)]
pub struct FeatureTable {
    /// Entries in inventory order
    entries: Vec<(&'static str, FeatureVector)>,

    /// Spelling -> position in `entries`
    #[serde(skip)]
    index: HashMap<&'static str, usize>,

    /// Longest key in codepoints
    max_segment_len: usize,
}

impl FeatureTable {
    /// Build and validate the compiled-in inventory.
    pub fn new() -> Result<Self> {
        let table = Self::from_entries(SEGMENTS)?;
        debug!(
            segments = table.len(),
            features = FEATURE_COUNT,
            max_segment_len = table.max_segment_len,
            "feature table validated"
        );
        Ok(table)
    }

    /// Process-wide table, built and validated on first use.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in inventory fails validation, which the test
    /// suite rules out.
    pub fn global() -> &'static FeatureTable {
        static TABLE: OnceLock<FeatureTable> = OnceLock::new();
        TABLE.get_or_init(|| match FeatureTable::new() {
            Ok(table) => table,
            Err(e) => panic!("compiled-in feature table is invalid: {e}"),
        })
    }

    pub(crate) fn from_entries(entries: &[(&'static str, u64)]) -> Result<Self> {
        validate_masks()?;

        let mut index = HashMap::with_capacity(entries.len());
        let mut max_segment_len = 0;
        for (pos, &(segment, bits)) in entries.iter().enumerate() {
            let len = validate_segment(segment, bits)?;
            max_segment_len = max_segment_len.max(len);
            if index.insert(segment, pos).is_some() {
                return Err(PhoneticError::InvalidTable(format!(
                    "duplicate segment '{segment}'"
                )));
            }
        }

        for &(segment, _) in entries {
            if segment.chars().count() < 2 {
                continue;
            }
            let mut buf = [0u8; 4];
            for c in segment.chars() {
                if !index.contains_key(&*c.encode_utf8(&mut buf)) {
                    return Err(PhoneticError::InvalidTable(format!(
                        "segment '{segment}' contains '{c}', which is not a segment on its own"
                    )));
                }
            }
        }

        Ok(Self {
            entries: entries
                .iter()
                .map(|&(segment, bits)| (segment, FeatureVector::new(bits)))
                .collect(),
            index,
            max_segment_len,
        })
    }

    /// Vector for an exact (already normalized) spelling.
    #[inline]
    pub fn lookup(&self, segment: &str) -> Option<FeatureVector> {
        self.index.get(segment).map(|&pos| self.entries[pos].1)
    }

    /// Feature for a name, rejecting anything outside the enumerated set.
    pub fn feature(&self, name: &str) -> Result<Feature> {
        name.parse()
    }

    /// Field mask for a feature name.
    pub fn lookup_mask(&self, name: &str) -> Result<u64> {
        self.feature(name).map(Feature::mask)
    }

    #[inline]
    pub fn contains(&self, segment: &str) -> bool {
        self.index.contains_key(segment)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest key in codepoints (never above [`MAX_SEGMENT_LEN`]).
    pub fn max_segment_len(&self) -> usize {
        self.max_segment_len
    }

    /// All entries in inventory order.
    pub fn segments(&self) -> impl Iterator<Item = (&'static str, FeatureVector)> + '_ {
        self.entries.iter().copied()
    }

    /// Every spelling whose vector equals `vector`, in inventory order.
    pub fn segments_for(&self, vector: FeatureVector) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v == vector)
            .map(|(segment, _)| *segment)
            .collect()
    }
}

fn validate_masks() -> Result<()> {
    let mut union = 0u64;
    for feature in Feature::ALL {
        let mask = feature.mask();
        if mask.count_ones() != 2 {
            return Err(PhoneticError::InvalidTable(format!(
                "mask for '{feature}' has {} bits set",
                mask.count_ones()
            )));
        }
        if union & mask != 0 {
            return Err(PhoneticError::InvalidTable(format!(
                "mask for '{feature}' overlaps an earlier feature"
            )));
        }
        union |= mask;
    }
    if union != VECTOR_MASK {
        return Err(PhoneticError::InvalidTable(format!(
            "masks cover {union:#x}, expected {VECTOR_MASK:#x}"
        )));
    }
    Ok(())
}

/// Check one entry and return its length in codepoints.
fn validate_segment(segment: &str, bits: u64) -> Result<usize> {
    let len = segment.chars().count();
    if len == 0 || len > MAX_SEGMENT_LEN {
        return Err(PhoneticError::InvalidTable(format!(
            "segment '{segment}' has {len} codepoints, expected 1..={MAX_SEGMENT_LEN}"
        )));
    }
    if segment.to_lowercase() != segment || !segment.nfc().eq(segment.chars()) {
        return Err(PhoneticError::InvalidTable(format!(
            "segment '{segment}' is not lowercase NFC and can never match"
        )));
    }
    if bits & !VECTOR_MASK != 0 {
        return Err(PhoneticError::InvalidTable(format!(
            "segment '{segment}' sets bits outside the feature fields: {:#x}",
            bits & !VECTOR_MASK
        )));
    }
    if let Some(feature) = Feature::ALL
        .iter()
        .find(|feature| feature.field(bits) == FIELD_RESERVED)
    {
        return Err(PhoneticError::InvalidTable(format!(
            "segment '{segment}' uses the reserved pattern for '{feature}'"
        )));
    }
    Ok(len)
}
