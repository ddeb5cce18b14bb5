//! Line-oriented extraction stages for the telecom bill layout.

pub mod lines;
pub mod keys;
pub mod header;
pub mod balances;
pub mod charges;
pub mod payment;
pub mod cdr;
pub mod patterns;

pub use lines::{normalize_lines, LineNormalizer};
pub use keys::{collect_kv, derive_key, split_kv, KeyValueExtractor};
pub use header::{extract_address, extract_header, AddressExtractor, HeaderExtractor};
pub use balances::{extract_bill_cycle, BalanceExtractor};
pub use charges::{extract_charge_summary, ChargeSummaryOutcome, ChargeSummaryParser, SectionTag};
pub use payment::{extract_bank_payment, BankPaymentExtractor};
pub use cdr::{extract_call_details, CallDetailExtractor, TokenPeeler};

use crate::models::bill::LineSequence;

/// Trait for stages that read a block out of the normalized lines.
pub trait BlockExtractor {
    /// The type of value this stage produces.
    type Output;

    /// Extract the block. Absent landmarks yield an empty output.
    fn extract(&self, lines: &LineSequence) -> Self::Output;
}
