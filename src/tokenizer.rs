//! SegmentTokenizer - greedy longest-match segmentation of IPA text.
//!
//! Input is lowercased and NFC-composed, then scanned left to right. At each
//! position the tokenizer tries the longest spelling first (3 codepoints, then
//! 2, then 1) and emits the first table hit. A codepoint with no hit becomes
//! [`Phone::Unknown`] and the scan moves on by one, so every codepoint of the
//! normalized text is consumed by exactly one token.
//!
//! # Examples
//!
//! ```
//! use phonetic_features::{FeatureTable, Phone, SegmentTokenizer};
//!
//! let tokenizer = SegmentTokenizer::new(FeatureTable::global());
//!
//! let tokens = tokenizer.tokenize("Pfø!");
//! let spellings: Vec<&str> = tokens.iter().map(|t| t.segment.as_str()).collect();
//! assert_eq!(spellings, vec!["pf", "ø", "!"]);
//! assert_eq!(tokens[2].phone, Phone::Unknown);
//! ```

use std::iter;

use serde::{Deserialize, Serialize};
use tracing::trace;
use unicode_normalization::UnicodeNormalization;

use crate::table::FeatureTable;
use crate::vector::Phone;

/// One segment of the normalized input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Matched spelling, or the single unmatched codepoint
    pub segment: String,
    pub phone: Phone,
    /// Offset in codepoints into the normalized text
    pub start: usize,
    /// Length in codepoints
    pub len: usize,
}

/// Greedy tokenizer over a [`FeatureTable`].
///
/// Stateless apart from the borrowed table; one instance can be shared freely.
#[derive(Clone, Copy, Debug)]
pub struct SegmentTokenizer<'a> {
    table: &'a FeatureTable,
}

impl<'a> SegmentTokenizer<'a> {
    pub fn new(table: &'a FeatureTable) -> Self {
        Self { table }
    }

    /// Lowercase, then compose to NFC.
    pub fn normalize(text: &str) -> String {
        text.to_lowercase().nfc().collect()
    }

    /// Segment `text` into tokens covering the whole normalized string.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.scan(&Self::normalize(text), |segment, phone, start, len| {
            tokens.push(Token {
                segment: segment.to_string(),
                phone,
                start,
                len,
            });
        });
        tokens
    }

    /// Segment `text` and keep only the phones.
    pub fn encode(&self, text: &str) -> Vec<Phone> {
        let mut phones = Vec::new();
        self.scan(&Self::normalize(text), |_, phone, _, _| phones.push(phone));
        phones
    }

    /// Core scan over already normalized text.
    ///
    /// `emit` receives the segment slice, its phone, and the codepoint span.
    fn scan<F>(&self, normalized: &str, mut emit: F)
    where
        F: FnMut(&str, Phone, usize, usize),
    {
        // Byte offset of every codepoint, plus the end of the string
        let bounds: Vec<usize> = normalized
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(normalized.len()))
            .collect();
        let num_chars = bounds.len() - 1;
        let longest = self.table.max_segment_len().max(1);

        let mut pos = 0;
        while pos < num_chars {
            let max_len = longest.min(num_chars - pos);
            let hit = (1..=max_len).rev().find_map(|len| {
                let segment = &normalized[bounds[pos]..bounds[pos + len]];
                self.table.lookup(segment).map(|vector| (segment, vector, len))
            });

            match hit {
                Some((segment, vector, len)) => {
                    emit(segment, Phone::Known(vector), pos, len);
                    pos += len;
                }
                None => {
                    let segment = &normalized[bounds[pos]..bounds[pos + 1]];
                    trace!(segment, position = pos, "unknown segment");
                    emit(segment, Phone::Unknown, pos, 1);
                    pos += 1;
                }
            }
        }
    }
}
