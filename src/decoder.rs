//! FeatureDecoder - per-phone extraction of a single feature.
//!
//! For each phone the feature's mask is applied to the vector:
//!
//! 1. masked bits are zero -> `Zero` (neutral)
//! 2. the positive (lower) bit is set -> `Plus`
//! 3. otherwise -> `Minus`, or `Zero` in [`DecodeMode::Binary`]
//!
//! Unknown phones decode to `Undefined` in both modes. A feature name is
//! checked before any phone is looked at, so a bad name never yields partial
//! output.

use crate::error::Result;
use crate::feature::{decode_masked, DecodeMode, Feature, FeatureValue};
use crate::table::FeatureTable;
use crate::vector::{FeatureVector, Phone};

/// Decodes feature values from phones produced against a [`FeatureTable`].
#[derive(Clone, Copy, Debug)]
pub struct FeatureDecoder<'a> {
    table: &'a FeatureTable,
}

impl<'a> FeatureDecoder<'a> {
    pub fn new(table: &'a FeatureTable) -> Self {
        Self { table }
    }

    /// Decode `feature` for every phone.
    ///
    /// # Examples
    ///
    /// ```
    /// use phonetic_features::{
    ///     DecodeMode, Feature, FeatureDecoder, FeatureTable, FeatureValue, Phone,
    /// };
    ///
    /// let table = FeatureTable::global();
    /// let decoder = FeatureDecoder::new(table);
    /// let phones = [
    ///     Phone::Known(table.lookup("b").unwrap()),
    ///     Phone::Known(table.lookup("p").unwrap()),
    ///     Phone::Unknown,
    /// ];
    ///
    /// let voice = decoder.decode(&phones, Feature::Voice, DecodeMode::Ternary);
    /// assert_eq!(voice, vec![FeatureValue::Plus, FeatureValue::Minus, FeatureValue::Undefined]);
    ///
    /// let voice = decoder.decode(&phones, Feature::Voice, DecodeMode::Binary);
    /// assert_eq!(voice, vec![FeatureValue::Plus, FeatureValue::Zero, FeatureValue::Undefined]);
    /// ```
    pub fn decode(&self, phones: &[Phone], feature: Feature, mode: DecodeMode) -> Vec<FeatureValue> {
        phones
            .iter()
            .map(|phone| phone.value(feature, mode))
            .collect()
    }

    /// Like [`decode`](Self::decode), with the feature given by name and its
    /// mask taken from the table.
    ///
    /// Fails with [`InvalidFeatureName`](crate::PhoneticError::InvalidFeatureName)
    /// before decoding anything if the name is not recognized.
    pub fn decode_named(
        &self,
        phones: &[Phone],
        name: &str,
        mode: DecodeMode,
    ) -> Result<Vec<FeatureValue>> {
        let mask = self.table.lookup_mask(name)?;
        Ok(phones
            .iter()
            .map(|phone| match phone.vector() {
                Some(vector) => decode_masked(vector.bits(), mask, mode),
                None => FeatureValue::Undefined,
            })
            .collect())
    }

    #[inline]
    pub fn decode_vector(&self, vector: FeatureVector, feature: Feature, mode: DecodeMode) -> FeatureValue {
        vector.value(feature, mode)
    }
}
