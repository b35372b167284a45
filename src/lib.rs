//! Phonetic Features - IPA Segmentation and Phonological Feature Vectors
//!
//! Converts strings of International Phonetic Alphabet symbols into compact
//! bit-packed feature vectors, and reads back the ternary (+/-/0) value of any
//! of 23 phonological features from those vectors.
//!
//! # Architecture
//!
//! - **FeatureTable**: the compiled-in inventory mapping 1 to 3 codepoint
//!   segments to 46-bit vectors, validated once at first use
//! - **SegmentTokenizer**: greedy longest-match segmentation of normalized text
//! - **FeatureDecoder**: masks one feature out of each vector
//!
//! Text flows `&str -> SegmentTokenizer -> [Phone] -> FeatureDecoder ->
//! [FeatureValue]`. Everything is pure and the table is immutable, so all of it
//! can be used from any number of threads without locking.
//!
//! # Examples
//!
//! ## Encoding and decoding
//!
//! ```
//! use phonetic_features::{has_feature, ipa_to_features, FeatureValue, Phone};
//!
//! let phones = ipa_to_features("pfa0");
//! assert_eq!(phones.len(), 3); // "pf" is one affricate
//! assert_eq!(phones[2], Phone::Unknown);
//!
//! let cont = has_feature(&phones, "continuant", false).unwrap();
//! assert_eq!(cont, vec![FeatureValue::Minus, FeatureValue::Plus, FeatureValue::Undefined]);
//!
//! let cont = has_feature(&phones, "continuant", true).unwrap();
//! assert_eq!(cont, vec![FeatureValue::Zero, FeatureValue::Plus, FeatureValue::Undefined]);
//!
//! assert!(has_feature(&phones, "not_a_feature", false).is_err());
//! ```
//!
//! ## Integer interface
//!
//! ```
//! use phonetic_features::{has_feature_raw, ipa_to_features_raw};
//!
//! let raw = ipa_to_features_raw("m?");
//! assert_eq!(raw[1], -1);
//!
//! let nasal: Vec<f64> = has_feature_raw(&raw, "nasal", false)
//!     .unwrap()
//!     .into_iter()
//!     .map(|v| v.as_f64())
//!     .collect();
//! assert_eq!(nasal[0], 1.0);
//! assert!(nasal[1].is_nan());
//! ```

// Module declarations
pub mod error;
pub mod feature;
pub mod vector;
pub mod table;
pub mod tokenizer;
pub mod decoder;

#[cfg(feature = "wasm")]
pub mod wasm_interface;

// Re-exports for convenient access
pub use decoder::FeatureDecoder;
pub use error::{PhoneticError, Result};
pub use feature::{
    feature_names, DecodeMode, Feature, FeatureValue, FEATURE_COUNT, VECTOR_BITS, VECTOR_MASK,
};
pub use table::{FeatureTable, MAX_SEGMENT_LEN};
pub use tokenizer::{SegmentTokenizer, Token};
pub use vector::{FeatureVector, Phone, UNKNOWN_SENTINEL};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Phonetic Features";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}

/// Segment IPA text against the global table.
///
/// Never fails: codepoints with no table entry become [`Phone::Unknown`].
pub fn ipa_to_features(text: &str) -> Vec<Phone> {
    SegmentTokenizer::new(FeatureTable::global()).encode(text)
}

/// [`ipa_to_features`] as raw integers, [`UNKNOWN_SENTINEL`] for unknown
/// codepoints.
pub fn ipa_to_features_raw(text: &str) -> Vec<i64> {
    ipa_to_features(text).into_iter().map(Phone::to_raw).collect()
}

/// Decode the named feature for every phone.
///
/// `binary` flattens "absent" to [`FeatureValue::Zero`]. Fails with
/// [`PhoneticError::InvalidFeatureName`] before producing any output if
/// `feature` is not one of [`feature_names`].
pub fn has_feature(phones: &[Phone], feature: &str, binary: bool) -> Result<Vec<FeatureValue>> {
    FeatureDecoder::new(FeatureTable::global()).decode_named(phones, feature, binary.into())
}

/// [`has_feature`] over raw integers; negative values decode as
/// [`FeatureValue::Undefined`].
pub fn has_feature_raw(vectors: &[i64], feature: &str, binary: bool) -> Result<Vec<FeatureValue>> {
    let phones: Vec<Phone> = vectors.iter().copied().map(Phone::from_raw).collect();
    has_feature(&phones, feature, binary)
}
