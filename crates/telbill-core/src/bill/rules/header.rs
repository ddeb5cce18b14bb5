//! Invoice header fields and the recipient address block.

use tracing::debug;

use super::keys::KeyValueExtractor;
use super::patterns::{ADDRESS_HEADING, HEADER_PREFIXES};
use super::BlockExtractor;
use crate::models::bill::{FieldMap, LineSequence};

/// Number of lines after the address heading that hold the address.
pub const ADDRESS_WINDOW: usize = 5;

/// Header field extractor.
pub struct HeaderExtractor;

impl HeaderExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for HeaderExtractor {
    type Output = FieldMap;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        let header_lines =
            lines.filtered(|l| HEADER_PREFIXES.iter().any(|prefix| l.starts_with(prefix)));

        KeyValueExtractor::new().extract(&header_lines)
    }
}

/// Address block extractor.
pub struct AddressExtractor {
    window: usize,
}

impl AddressExtractor {
    pub fn new() -> Self {
        Self {
            window: ADDRESS_WINDOW,
        }
    }

    /// Set the number of address lines.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for AddressExtractor {
    type Output = String;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        let Some(start) = lines.find_containing(ADDRESS_HEADING) else {
            debug!("Address heading not found");
            return String::new();
        };

        lines
            .window(start + 1, self.window)
            .join(" ")
            .trim()
            .to_string()
    }
}

/// Extract the header field map.
pub fn extract_header(lines: &LineSequence) -> FieldMap {
    HeaderExtractor::new().extract(lines)
}

/// Extract the joined address.
pub fn extract_address(lines: &LineSequence) -> String {
    AddressExtractor::new().extract(lines)
}
