//! Bank payment slip block.

use tracing::debug;

use super::keys::collect_kv;
use super::patterns::{BANK_MARKER, DUE_DATE_MARKER};
use super::BlockExtractor;
use crate::models::bill::{BankPayment, LineSequence};

/// Lines after the bank marker that hold the payment fields.
pub const PAYMENT_WINDOW: usize = 7;

/// Lines after the payment fields that hold the reference fields.
pub const REFERENCE_WINDOW: usize = 4;

/// Bank payment extractor.
pub struct BankPaymentExtractor {
    payment_window: usize,
    reference_window: usize,
}

impl BankPaymentExtractor {
    pub fn new() -> Self {
        Self {
            payment_window: PAYMENT_WINDOW,
            reference_window: REFERENCE_WINDOW,
        }
    }

    /// Set the payment field window.
    pub fn with_payment_window(mut self, window: usize) -> Self {
        self.payment_window = window;
        self
    }

    /// Set the reference field window.
    pub fn with_reference_window(mut self, window: usize) -> Self {
        self.reference_window = window;
        self
    }

    fn extract_due_date(&self, lines: &LineSequence) -> String {
        lines
            .iter()
            .find(|l| l.contains(DUE_DATE_MARKER))
            .and_then(|l| l.split_once(':'))
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_default()
    }
}

impl Default for BankPaymentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for BankPaymentExtractor {
    type Output = BankPayment;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        let mut payment = BankPayment {
            due_date: self.extract_due_date(lines),
            ..Default::default()
        };

        let Some(marker) = lines.find_containing(BANK_MARKER) else {
            debug!("Bank payment marker not found");
            return payment;
        };

        let fields_start = marker + 1;
        let reference_start = fields_start + self.payment_window;

        payment.fields = collect_kv(lines.window(fields_start, self.payment_window));
        payment.reference = collect_kv(lines.window(reference_start, self.reference_window));

        for key in BankPayment::RESERVED_KEYS {
            if payment.fields.remove(key).is_some() {
                debug!("Dropped payment field with reserved key {:?}", key);
            }
        }

        payment
    }
}

/// Extract the bank payment block.
pub fn extract_bank_payment(lines: &LineSequence) -> BankPayment {
    BankPaymentExtractor::new().extract(lines)
}
