//! Telecom bill extraction module.

mod parser;
pub mod rules;

pub use parser::{build_bill, BillParser, ExtractionResult, TelecomBillParser};
