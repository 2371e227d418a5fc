//! WASM bindings for chemtex
//!
//! This module provides JavaScript-accessible functions for `\ce{}` and `\pu{}` translation.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::Mode;

/// Translation result returned to JavaScript
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct TranslateResult {
    /// The TeX output
    pub output: String,
    /// Whether the translation was successful
    pub success: bool,
    /// Error message if translation failed
    pub error: Option<String>,
}

#[cfg(feature = "wasm")]
impl From<crate::ChemResult<String>> for TranslateResult {
    fn from(result: crate::ChemResult<String>) -> Self {
        match result {
            Ok(output) => TranslateResult {
                output,
                success: true,
                error: None,
            },
            Err(e) => TranslateResult {
                output: String::new(),
                success: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Translate the body of a `\ce{}` command
///
/// # Arguments
/// * `input` - mhchem equation (without the `\ce{` wrapper)
///
/// # Returns
/// TeX math code
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "ceToTex")]
pub fn ce_to_tex_wasm(input: &str) -> Result<String, JsError> {
    crate::ce_to_tex(input).map_err(|e| JsError::new(&e.to_string()))
}

/// Translate the body of a `\pu{}` command
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "puToTex")]
pub fn pu_to_tex_wasm(input: &str) -> Result<String, JsError> {
    crate::pu_to_tex(input).map_err(|e| JsError::new(&e.to_string()))
}

/// Translate with the mode given as a string (`ce`, `pu` or `tex`)
///
/// Never throws; failures are reported in the `error` field.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "toTex")]
pub fn to_tex_wasm(input: &str, mode: &str) -> JsValue {
    let result = match mode.parse::<Mode>() {
        Ok(mode) => TranslateResult::from(crate::translate(input, mode)),
        Err(message) => TranslateResult {
            output: String::new(),
            success: false,
            error: Some(message),
        },
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Parse without rendering and return the node tree
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "toAst")]
pub fn to_ast_wasm(input: &str, mode: &str) -> Result<JsValue, JsError> {
    let mode: Mode = mode.parse().map_err(|e: String| JsError::new(&e))?;
    let nodes = crate::parse(input, mode.machine()).map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&nodes).map_err(|e| JsError::new(&e.to_string()))
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
