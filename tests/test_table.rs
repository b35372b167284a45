//! Tests for the compiled-in segment inventory.
//!
//! These tests validate:
//! - Structural invariants of masks and vectors
//! - Lookup of every inventory entry
//! - Known phonological facts encoded in the data

use std::collections::HashSet;

use phonetic_features::{
    ipa_to_features_raw, DecodeMode, Feature, FeatureTable, FeatureValue, FEATURE_COUNT,
    MAX_SEGMENT_LEN, VECTOR_MASK,
};

fn value(segment: &str, feature: Feature) -> FeatureValue {
    FeatureTable::global()
        .lookup(segment)
        .unwrap()
        .value(feature, DecodeMode::Ternary)
}

// =============================================================================
// Masks
// =============================================================================

#[test]
fn test_masks_are_disjoint_and_cover_vector() {
    let mut union = 0u64;
    for feature in Feature::ALL {
        assert_eq!(feature.mask().count_ones(), 2, "{feature}");
        assert_eq!(union & feature.mask(), 0, "{feature} overlaps");
        union |= feature.mask();
    }
    assert_eq!(union, VECTOR_MASK);
    assert_eq!(Feature::ALL.len(), FEATURE_COUNT);
}

#[test]
fn test_positive_bit_is_lower_bit_of_field() {
    for feature in Feature::ALL {
        let pos = feature.positive_bit();
        assert_eq!(pos.count_ones(), 1);
        assert_eq!(pos & feature.mask(), pos);
        assert_eq!(pos << 1 | pos, feature.mask());
    }
}

#[test]
fn test_lookup_mask_by_name() {
    let table = FeatureTable::global();
    for feature in Feature::ALL {
        assert_eq!(table.lookup_mask(feature.name()).unwrap(), feature.mask());
    }
    assert!(table.lookup_mask("not_a_feature").is_err());
}

// =============================================================================
// Vectors
// =============================================================================

#[test]
fn test_vectors_stay_inside_fields() {
    for (segment, vector) in FeatureTable::global().segments() {
        assert_eq!(vector.bits() & !VECTOR_MASK, 0, "{segment}");
        for feature in Feature::ALL {
            assert_ne!(vector.field(feature), 0b11, "{segment} {feature}");
        }
    }
}

#[test]
fn test_every_segment_looks_up_to_itself() {
    let table = FeatureTable::global();
    let mut seen = HashSet::new();
    for (segment, vector) in table.segments() {
        assert!(seen.insert(segment), "duplicate {segment}");
        assert_eq!(table.lookup(segment), Some(vector));
        assert!(table.contains(segment));
        let len = segment.chars().count();
        assert!((1..=MAX_SEGMENT_LEN).contains(&len));
    }
    assert_eq!(seen.len(), table.len());
    assert!(!table.is_empty());
}

#[test]
fn test_lookup_misses() {
    let table = FeatureTable::global();
    assert_eq!(table.lookup(""), None);
    assert_eq!(table.lookup("0"), None);
    assert_eq!(table.lookup("P"), None);
    assert_eq!(table.lookup("pff"), None);
}

#[test]
fn test_shared_vectors() {
    let table = FeatureTable::global();
    let f = table.lookup("f").unwrap();
    assert_eq!(table.segments_for(f), vec!["f", "ɸ"]);
    let r = table.lookup("r").unwrap();
    assert_eq!(table.segments_for(r), vec!["r", "ɹ"]);
    let tsh = table.lookup("tʃ").unwrap();
    assert_eq!(table.segments_for(tsh), vec!["tʃ"]);
}

// =============================================================================
// Inventory contents
// =============================================================================

const INVENTORY: [&str; 72] = [
    "t", "d", "s", "z", "ɬ", "ɮ", "θ", "ð", "ʃ", "ʒ", "c", "ɟ", "ç", "ʝ", "p", "b", "f",
    "v", "ɸ", "β", "k", "g", "x", "ɣ", "q", "ɢ", "χ", "ʁ", "ħ", "ʕ", "h", "ɦ", "ʔ", "tʃ",
    "dʒ", "ts", "dz", "kx", "pf", "m", "n", "ŋ", "ɳ", "ɲ", "ɴ", "l", "ʎ", "r", "ɹ", "ʀ",
    "j", "w", "ɥ", "ɰ", "i", "ɪ", "u", "ʊ", "e", "ɛ", "o", "ɔ", "a", "æ", "y", "ʏ", "ø",
    "œ", "ə", "ɯ", "kw", "gw",
];

#[test]
fn test_inventory_spellings_in_order() {
    let spellings: Vec<&str> = FeatureTable::global().segments().map(|(s, _)| s).collect();
    assert_eq!(spellings, INVENTORY);
}

#[test]
fn test_digraphs_encode_to_single_vectors() {
    let digraphs: [(&str, i64); 8] = [
        ("tʃ", 0b0110101000011001010110101010001010101001100110),
        ("dʒ", 0b0110101000011001010110101010000110101001100110),
        ("ts", 0b0110101000010110100000000010001010101001100110),
        ("dz", 0b0110101000010110100000000010000110101001100110),
        ("kx", 0b0110101000100000010110011010001010101010100110),
        ("pf", 0b0110100110100000100000000010001010101001100110),
        ("kw", 0b0110100101100000010110011010001010101010101010),
        ("gw", 0b0110100101100000010110011010000110101010101010),
    ];
    for (segment, bits) in digraphs {
        assert_eq!(ipa_to_features_raw(segment), vec![bits], "{segment}");
    }
}

// =============================================================================
// Phonological sanity
// =============================================================================

#[test]
fn test_voicing_pairs() {
    for (voiceless, voiced) in [("p", "b"), ("t", "d"), ("k", "g"), ("s", "z"), ("ts", "dz")] {
        assert_eq!(value(voiceless, Feature::Voice), FeatureValue::Minus, "{voiceless}");
        assert_eq!(value(voiced, Feature::Voice), FeatureValue::Plus, "{voiced}");
    }
}

#[test]
fn test_affricates_have_delayed_release() {
    for segment in ["tʃ", "dʒ", "ts", "dz", "kx", "pf"] {
        assert_eq!(value(segment, Feature::DelayedRelease), FeatureValue::Plus, "{segment}");
    }
    for segment in ["p", "t", "k"] {
        assert_eq!(value(segment, Feature::DelayedRelease), FeatureValue::Minus, "{segment}");
    }
}

#[test]
fn test_vowels_are_syllabic() {
    for segment in ["i", "ɪ", "u", "ʊ", "e", "ɛ", "o", "ɔ", "a", "æ", "y", "ʏ", "ø", "œ", "ə", "ɯ"] {
        assert_eq!(value(segment, Feature::Syllabic), FeatureValue::Plus, "{segment}");
        assert_eq!(value(segment, Feature::Consonantal), FeatureValue::Minus, "{segment}");
    }
}

#[test]
fn test_nasals() {
    for segment in ["m", "n", "ŋ", "ɳ", "ɲ", "ɴ"] {
        assert_eq!(value(segment, Feature::Nasal), FeatureValue::Plus, "{segment}");
    }
    assert_eq!(value("b", Feature::Nasal), FeatureValue::Minus);
}

#[test]
fn test_labialized_velars_are_round() {
    assert_eq!(value("kw", Feature::Round), FeatureValue::Plus);
    assert_eq!(value("gw", Feature::Round), FeatureValue::Plus);
    assert_eq!(value("k", Feature::Round), FeatureValue::Zero);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_table_serializes_in_inventory_order() {
    let json = serde_json::to_value(FeatureTable::global()).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 72);
    assert_eq!(entries[0][0], "t");
    assert_eq!(entries[0][1], 0b0110101000010110100000000010001010101010101010u64);
    assert_eq!(json["max_segment_len"], 2);
}
