//! Bill cycle period and brought-forward balance row.
//!
//! The balance row is located by its token shape, not by the labels printed
//! above it: the heading columns wrap unpredictably under OCR, but the row of
//! five amounts and a due date survives intact.

use tracing::{debug, trace};

use super::patterns::{
    BALANCE_AMOUNT, BALANCE_DATE, BILL_CYCLE_PERIOD, BILL_CYCLE_PREFIX, BROUGHT_FORWARD_HEADING,
};
use super::BlockExtractor;
use crate::models::bill::{Balances, BillCycle, LineSequence};

/// Lines after the brought-forward heading searched for the balance row.
pub const BALANCE_SCAN_WINDOW: usize = 15;

/// Bill cycle and balance extractor.
pub struct BalanceExtractor {
    scan_window: usize,
}

impl BalanceExtractor {
    pub fn new() -> Self {
        Self {
            scan_window: BALANCE_SCAN_WINDOW,
        }
    }

    /// Set the number of lines scanned for the balance row.
    pub fn with_scan_window(mut self, scan_window: usize) -> Self {
        self.scan_window = scan_window;
        self
    }

    fn extract_period(&self, lines: &LineSequence) -> String {
        lines
            .iter()
            .find(|l| l.starts_with(BILL_CYCLE_PREFIX))
            .and_then(|l| BILL_CYCLE_PERIOD.captures(l))
            .map(|caps| caps[1].to_string())
            .unwrap_or_default()
    }

    fn extract_balances(&self, lines: &LineSequence) -> Balances {
        let Some(heading) = lines.find_containing(BROUGHT_FORWARD_HEADING) else {
            debug!("Brought-forward heading not found");
            return Balances::default();
        };

        for line in lines.window(heading + 1, self.scan_window) {
            if let Some(tokens) = parse_balance_row(line) {
                debug!("Balance row found: {}", line);
                return Balances::from_row(tokens);
            }
            trace!("Not a balance row: {}", line);
        }

        debug!(
            "No balance row within {} lines of the brought-forward heading",
            self.scan_window
        );
        Balances::default()
    }
}

impl Default for BalanceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for BalanceExtractor {
    type Output = BillCycle;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        BillCycle {
            period: self.extract_period(lines),
            balances: self.extract_balances(lines),
        }
    }
}

/// Match a row of exactly five amounts followed by a due date.
fn parse_balance_row(line: &str) -> Option<[&str; 6]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let tokens: [&str; 6] = tokens.try_into().ok()?;

    let amounts_ok = tokens[..5].iter().all(|t| BALANCE_AMOUNT.is_match(t));
    if amounts_ok && BALANCE_DATE.is_match(tokens[5]) {
        Some(tokens)
    } else {
        None
    }
}

/// Extract the bill cycle period and balances.
pub fn extract_bill_cycle(lines: &LineSequence) -> BillCycle {
    BalanceExtractor::new().extract(lines)
}
