//! Tests for the crate-level encode/decode functions.

use phonetic_features::{
    feature_names, has_feature, has_feature_raw, ipa_to_features, ipa_to_features_raw,
    FeatureTable, FeatureValue, Phone, PhoneticError, UNKNOWN_SENTINEL,
};
use proptest::prelude::*;

// =============================================================================
// ipa_to_features
// =============================================================================

#[test]
fn test_stored_value_for_every_segment() {
    for (segment, vector) in FeatureTable::global().segments() {
        assert_eq!(ipa_to_features_raw(segment), vec![vector.bits() as i64], "{segment}");
    }
}

#[test]
fn test_unrecognized_input_returns_sentinel() {
    assert_eq!(ipa_to_features("0"), vec![Phone::Unknown]);
    assert_eq!(ipa_to_features_raw("0"), vec![UNKNOWN_SENTINEL]);
}

#[test]
fn test_empty_input() {
    assert!(ipa_to_features("").is_empty());
    assert!(ipa_to_features_raw("").is_empty());
}

#[test]
fn test_pf_is_single_vector() {
    let raw = ipa_to_features_raw("pf");
    assert_eq!(raw.len(), 1);
    let pf = FeatureTable::global().lookup("pf").unwrap();
    assert_eq!(raw[0], pf.bits() as i64);
}

// =============================================================================
// has_feature
// =============================================================================

#[test]
fn test_has_feature_ternary_and_binary() {
    let phones = ipa_to_features("mba");
    assert_eq!(
        has_feature(&phones, "nasal", false).unwrap(),
        vec![FeatureValue::Plus, FeatureValue::Minus, FeatureValue::Minus]
    );
    assert_eq!(
        has_feature(&phones, "nasal", true).unwrap(),
        vec![FeatureValue::Plus, FeatureValue::Zero, FeatureValue::Zero]
    );
}

#[test]
fn test_has_feature_uppercase_atr() {
    let phones = ipa_to_features("i");
    assert!(has_feature(&phones, "ATR", false).is_ok());
    assert!(has_feature(&phones, "atr", false).is_err());
}

#[test]
fn test_invalid_feature_name() {
    let phones = ipa_to_features("pa");
    let err = has_feature(&phones, "not_a_feature", false).unwrap_err();
    assert!(matches!(err, PhoneticError::InvalidFeatureName { .. }));

    // Rejected regardless of the vectors passed in
    assert!(has_feature(&[], "not_a_feature", true).is_err());
    assert!(has_feature_raw(&[-1], "not_a_feature", false).is_err());
}

#[test]
fn test_raw_sentinel_is_undefined_in_binary_mode() {
    let values = has_feature_raw(&[UNKNOWN_SENTINEL], "voice", true).unwrap();
    assert_eq!(values, vec![FeatureValue::Undefined]);
    assert!(values[0].as_f64().is_nan());
}

#[test]
fn test_feature_names() {
    let names = feature_names();
    assert_eq!(names.len(), 23);
    assert_eq!(names[0], "consonantal");
    assert_eq!(names[14], "ATR");
    assert_eq!(names[22], "nasal");
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| ipa_to_features_raw("tʃɛkwa")))
        .collect();
    let results: Vec<Vec<i64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for result in &results {
        assert_eq!(result, &results[0]);
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_never_panics_on_arbitrary_text(text in "\\PC{0,60}") {
        let phones = ipa_to_features(&text);
        for name in feature_names() {
            let values = has_feature(&phones, name, false).unwrap();
            prop_assert_eq!(values.len(), phones.len());
        }
    }

    #[test]
    fn prop_raw_round_trip(text in "\\PC{0,30}") {
        let raw = ipa_to_features_raw(&text);
        let phones: Vec<Phone> = raw.iter().copied().map(Phone::from_raw).collect();
        prop_assert_eq!(phones, ipa_to_features(&text));
    }
}
