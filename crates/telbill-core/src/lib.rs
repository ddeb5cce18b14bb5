//! Core library for Thai telecom bill text extraction.
//!
//! This crate provides:
//! - Line normalization for raw OCR text (escaped and literal line breaks)
//! - Bilingual label translation into stable ASCII keys
//! - Landmark-driven extraction of header, address, balances, charge
//!   summary, bank payment block, and call detail records
//! - The `StructuredBill` data model and pipeline configuration

pub mod error;
pub mod models;
pub mod bill;

pub use error::{BillError, Result};
pub use models::bill::{
    Balances, BankPayment, BillCycle, CallDetailRecord, ChargeRow, ChargeSummary, FieldMap,
    LineSequence, StructuredBill,
};
pub use models::config::TelbillConfig;
pub use bill::{build_bill, BillParser, ExtractionResult, TelecomBillParser};
pub use bill::rules::{derive_key, normalize_lines};
