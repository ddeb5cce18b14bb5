//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bill::rules::balances::BALANCE_SCAN_WINDOW;
use crate::bill::rules::header::ADDRESS_WINDOW;
use crate::bill::rules::payment::{PAYMENT_WINDOW, REFERENCE_WINDOW};
use crate::error::{BillError, Result};

/// Main configuration for telbill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelbillConfig {
    /// Extraction window configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Fixed line windows of the known bill layout.
///
/// The defaults describe the one layout the parser understands; they are
/// exposed only so a drifted print run can be accommodated without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines following the address heading that form the address.
    pub address_window: usize,

    /// Lines after the brought-forward heading searched for the balance row.
    pub balance_scan_window: usize,

    /// Lines after the bank marker read as payment fields.
    pub payment_window: usize,

    /// Lines after the payment fields read as reference fields.
    pub reference_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            address_window: ADDRESS_WINDOW,
            balance_scan_window: BALANCE_SCAN_WINDOW,
            payment_window: PAYMENT_WINDOW,
            reference_window: REFERENCE_WINDOW,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,

    /// Keep the most recent result in the last-result store.
    pub store_last_result: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            store_last_result: true,
        }
    }
}

impl TelbillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BillError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
