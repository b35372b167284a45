//! WebAssembly interface for encoding IPA text in the browser.
//!
//! JavaScript has no 64-bit integers in plain arrays, so vectors cross the
//! boundary as `f64` (46-bit values are exact). Unknown segments are `-1` on the
//! way out, and undefined feature values are `NaN`.

use wasm_bindgen::prelude::*;

use crate::{feature_names, has_feature_raw, ipa_to_features_raw};

fn init_panic_hook() {
    // Enable panic messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Encode IPA text as feature vectors.
///
/// # Example (JavaScript)
/// ```javascript
/// const vectors = ipaToFeatures("pfa"); // Float64Array of length 2
/// ```
#[wasm_bindgen(js_name = ipaToFeatures)]
pub fn ipa_to_features_js(text: &str) -> Vec<f64> {
    init_panic_hook();
    ipa_to_features_raw(text)
        .into_iter()
        .map(|raw| raw as f64)
        .collect()
}

/// Decode one feature: `1`, `-1`, `0`, or `NaN` for unknown segments.
///
/// Throws if `feature` is not a known feature name.
///
/// # Example (JavaScript)
/// ```javascript
/// const voice = hasFeature(ipaToFeatures("ba"), "voice", false);
/// ```
#[wasm_bindgen(js_name = hasFeature)]
pub fn has_feature_js(vectors: &[f64], feature: &str, binary: bool) -> Result<Vec<f64>, JsValue> {
    init_panic_hook();
    let raw: Vec<i64> = vectors
        .iter()
        .map(|&v| if v.is_finite() && v >= 0.0 { v as i64 } else { -1 })
        .collect();
    has_feature_raw(&raw, feature, binary)
        .map(|values| values.into_iter().map(|v| v.as_f64()).collect())
        .map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

/// The accepted feature names, in field order.
#[wasm_bindgen(js_name = featureNames)]
pub fn feature_names_js() -> Vec<JsValue> {
    feature_names().iter().map(|name| JsValue::from_str(name)).collect()
}
