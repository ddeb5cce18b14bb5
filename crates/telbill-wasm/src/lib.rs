//! WASM bindings for Thai telecom bill text extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use telbill_core::{BillParser, StructuredBill, TelecomBillParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert to a plain JS object. Maps become objects, not `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract a structured bill from recognized text.
#[wasm_bindgen]
pub fn parse_bill(text: &str) -> Result<JsValue, JsValue> {
    to_js(&telbill_core::build_bill(text))
}

/// Extract a structured bill and return it as a JSON string.
#[wasm_bindgen]
pub fn parse_bill_json(text: &str) -> Result<String, JsValue> {
    serde_json::to_string(&telbill_core::build_bill(text))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Translate a bilingual label into its ASCII key.
#[wasm_bindgen]
pub fn derive_key(label: &str) -> String {
    telbill_core::derive_key(label)
}

/// Split raw text into clean lines.
#[wasm_bindgen]
pub fn normalize_lines(text: &str) -> js_sys::Array {
    telbill_core::normalize_lines(text)
        .iter()
        .map(|line| JsValue::from_str(line))
        .collect()
}

/// Bill extractor class for browser use.
#[wasm_bindgen]
pub struct BillExtractor {
    parser: TelecomBillParser,
}

#[wasm_bindgen]
impl BillExtractor {
    /// Create a new bill extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: TelecomBillParser::new(),
        }
    }

    /// Number of lines after the address heading read as the address.
    #[wasm_bindgen]
    pub fn set_address_window(&mut self, window: usize) {
        self.parser = self.parser.clone().with_address_window(window);
    }

    /// Number of lines after the bank marker read as payment fields.
    #[wasm_bindgen]
    pub fn set_payment_window(&mut self, window: usize) {
        self.parser = self.parser.clone().with_payment_window(window);
    }

    /// Extract bill from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text).bill)
    }

    /// Extract bill from a byte payload, which must be UTF-8.
    #[wasm_bindgen]
    pub fn extract_bytes(&self, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let result = self
            .parser
            .parse_bytes(bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&result.bill)
    }

    /// Get extraction result with warnings.
    #[wasm_bindgen]
    pub fn extract_with_warnings(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self.parser.parse(text);

        for warning in &result.warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }

        #[derive(Serialize)]
        struct ExtractResult {
            bill: StructuredBill,
            warnings: Vec<String>,
        }

        to_js(&ExtractResult {
            bill: result.bill,
            warnings: result.warnings,
        })
    }

    /// One Thai summary line per call detail record.
    #[wasm_bindgen]
    pub fn call_detail_summary(&self, text: &str) -> String {
        self.parser.parse(text).bill.call_detail_summary()
    }
}

impl Default for BillExtractor {
    fn default() -> Self {
        Self::new()
    }
}
