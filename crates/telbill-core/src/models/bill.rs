//! Structured bill data model.

use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Mapping from a stable key to a field value.
///
/// Ordered so that identical input always serializes identically.
pub type FieldMap = BTreeMap<String, String>;

/// Charge rows grouped by section key (e.g. `ISDN_PRI`).
pub type ChargeSummary = BTreeMap<String, Vec<ChargeRow>>;

/// Ordered, trimmed, non-empty content lines of a document.
///
/// Only the line normalizer builds one, so every element is guaranteed to be
/// non-empty and free of line breaks. Position is significant: several
/// fields are identified purely by their offset from a landmark line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineSequence(Vec<String>);

impl LineSequence {
    pub(crate) fn from_normalized(lines: Vec<String>) -> Self {
        Self(lines)
    }

    /// Borrow the lines.
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Up to `len` lines starting at `start`, clipped at the sequence end.
    pub fn window(&self, start: usize, len: usize) -> &[String] {
        let start = start.min(self.0.len());
        let end = start.saturating_add(len).min(self.0.len());
        &self.0[start..end]
    }

    /// Index of the first line satisfying `pred`.
    pub fn position<P>(&self, pred: P) -> Option<usize>
    where
        P: FnMut(&String) -> bool,
    {
        self.0.iter().position(pred)
    }

    /// Index of the first line containing `needle`.
    pub fn find_containing(&self, needle: &str) -> Option<usize> {
        self.position(|l| l.contains(needle))
    }

    /// The lines satisfying `pred`, in order.
    pub fn filtered<P>(&self, mut pred: P) -> LineSequence
    where
        P: FnMut(&str) -> bool,
    {
        Self(self.0.iter().filter(|l| pred(l.as_str())).cloned().collect())
    }

    /// Consume into the underlying vector.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for LineSequence {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One itemized line of a charge section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRow {
    /// Service description, as printed.
    pub service_label: String,
    /// Charge before discount (two fraction digits).
    pub service_charge: String,
    /// Discount (two fraction digits).
    pub discount: String,
    /// Net amount (two fraction digits).
    pub amount: String,
}

/// A single row of the call detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDetailRecord {
    pub service_number: String,
    /// `HH:MM:SS DD/MM/YY`.
    pub timestamp: String,
    /// Called destination; may span several words.
    pub destination: String,
    pub call_type: String,
    pub units: String,
    pub amount: String,
}

impl CallDetailRecord {
    /// Render as one human-readable Thai summary line, numbered from 1.
    pub fn summary_line(&self, ordinal: usize) -> String {
        format!(
            "({}) {} โทรไปยัง {} เวลา {} ประเภท {} จำนวน {} หน่วย คิดเป็นเงิน {} บาท",
            ordinal,
            self.service_number,
            self.destination,
            self.timestamp,
            self.call_type,
            self.units,
            self.amount
        )
    }
}

/// The brought-forward balance row.
///
/// Either all six fields are set or none are; an absent row serializes as
/// an empty object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balances {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_charge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_outstanding_balance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_due_date: Option<String>,
}

impl Balances {
    /// Build from the six row tokens, in printed order.
    pub fn from_row(tokens: [&str; 6]) -> Self {
        let [previous, paid, adjustment, current, total, due] = tokens.map(|t| Some(t.to_string()));
        Self {
            previous_balance: previous,
            paid_amount: paid,
            adjustment,
            current_charge: current,
            total_outstanding_balance: total,
            current_due_date: due,
        }
    }

    /// Check if no balance row was found.
    pub fn is_empty(&self) -> bool {
        self.previous_balance.is_none()
            && self.paid_amount.is_none()
            && self.adjustment.is_none()
            && self.current_charge.is_none()
            && self.total_outstanding_balance.is_none()
            && self.current_due_date.is_none()
    }
}

/// Bill cycle period plus the balance row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCycle {
    /// `DD/MM/YYYY - DD/MM/YYYY`, or empty.
    pub period: String,
    pub balances: Balances,
}

/// The bank payment slip block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankPayment {
    /// Payment fields, flattened into the enclosing object.
    #[serde(flatten)]
    pub fields: FieldMap,
    /// Reference fields (service code, ref 1, ref 2, ...).
    #[serde(default)]
    pub reference: FieldMap,
    #[serde(default)]
    pub due_date: String,
}

impl BankPayment {
    /// Keys that the flattened `fields` map must never contain.
    pub const RESERVED_KEYS: [&'static str; 2] = ["reference", "dueDate"];

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.reference.is_empty() && self.due_date.is_empty()
    }
}

/// The root record produced by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredBill {
    /// Recipient name and address, joined into one line.
    pub address: String,

    /// Invoice header fields (service no., account no., invoice no., ...).
    pub header: FieldMap,

    pub bill_cycle: BillCycle,

    pub charge_summary: ChargeSummary,

    pub bank_payment: BankPayment,

    pub call_detail_records: Vec<CallDetailRecord>,
}

impl StructuredBill {
    /// Check if nothing at all was recovered.
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
            && self.header.is_empty()
            && self.bill_cycle.period.is_empty()
            && self.bill_cycle.balances.is_empty()
            && self.charge_summary.is_empty()
            && self.bank_payment.is_empty()
            && self.call_detail_records.is_empty()
    }

    /// Numbered summary lines for every call detail record.
    pub fn call_detail_summary(&self) -> String {
        self.call_detail_records
            .iter()
            .enumerate()
            .map(|(i, record)| record.summary_line(i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total number of charge rows across all sections.
    pub fn charge_row_count(&self) -> usize {
        self.charge_summary.values().map(Vec::len).sum()
    }
}
