//! Call detail record table.

use tracing::{debug, trace};

use super::patterns::CDR_HEADER_PARTS;
use super::BlockExtractor;
use crate::models::bill::{CallDetailRecord, LineSequence};

/// Minimum tokens in a usable call detail row.
const MIN_ROW_TOKENS: usize = 6;

/// Consumes whitespace tokens from either end of a row.
///
/// Fixed fields are taken from the front and back; whatever is left in the
/// middle is the variable-length part.
#[derive(Debug, Clone)]
pub struct TokenPeeler<'a> {
    tokens: Vec<&'a str>,
    front: usize,
    back: usize,
}

impl<'a> TokenPeeler<'a> {
    pub fn new(row: &'a str) -> Self {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        let back = tokens.len();
        Self {
            tokens,
            front: 0,
            back,
        }
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.back - self.front
    }

    /// First unconsumed token, without consuming it.
    pub fn peek_front(&self) -> Option<&'a str> {
        (self.front < self.back).then(|| self.tokens[self.front])
    }

    pub fn take_front(&mut self) -> Option<&'a str> {
        let token = self.peek_front()?;
        self.front += 1;
        Some(token)
    }

    pub fn take_back(&mut self) -> Option<&'a str> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.tokens[self.back])
    }

    /// Remaining middle tokens joined by single spaces.
    pub fn remainder(&self) -> String {
        self.tokens[self.front..self.back].join(" ")
    }
}

/// Call detail table extractor.
pub struct CallDetailExtractor;

impl CallDetailExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parse one table row; `None` for rows with too few tokens.
    pub fn parse_row(&self, row: &str) -> Option<CallDetailRecord> {
        let mut peeler = TokenPeeler::new(row);
        if peeler.remaining() < MIN_ROW_TOKENS {
            return None;
        }

        let amount = peeler.take_back()?;
        let units = peeler.take_back()?;
        let call_type = peeler.take_back()?;

        let service_number = peeler.take_front()?;
        let time = peeler.take_front()?;
        let date = peeler.take_front()?;

        Some(CallDetailRecord {
            service_number: service_number.to_string(),
            timestamp: format!("{} {}", time, date),
            destination: peeler.remainder(),
            call_type: call_type.to_string(),
            units: units.to_string(),
            amount: amount.to_string(),
        })
    }
}

impl Default for CallDetailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for CallDetailExtractor {
    type Output = Vec<CallDetailRecord>;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        let Some(header_idx) = lines.position(|l| CDR_HEADER_PARTS.iter().all(|p| l.contains(p))) else {
            debug!("Call detail header not found");
            return Vec::new();
        };

        let header_token = lines[header_idx].split_whitespace().next().unwrap_or_default();
        let mut records = Vec::new();

        for row in &lines[header_idx + 1..] {
            if row.split_whitespace().next() == Some(header_token) {
                trace!("Repeated call detail header skipped");
                continue;
            }

            match self.parse_row(row) {
                Some(record) => records.push(record),
                None => trace!("Not a call detail row: {}", row),
            }
        }

        debug!("Parsed {} call detail records", records.len());
        records
    }
}

/// Extract all call detail records.
pub fn extract_call_details(lines: &LineSequence) -> Vec<CallDetailRecord> {
    CallDetailExtractor::new().extract(lines)
}
