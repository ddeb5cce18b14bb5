//! Landmarks and regex patterns of the Thai telecom bill layout.
//!
//! Landmark strings are reproduced exactly as the recognizer emits them,
//! including its stray `ำา` vowel sequences.

use lazy_static::lazy_static;
use regex::Regex;

/// Line prefixes that identify the five header fields.
pub const HEADER_PREFIXES: [&str; 5] = [
    "หมายเลขบริการ",
    "รหัสลูกค้า",
    "เลขที่ใบแจ้งค่าใช้บริการ",
    "วันที่ออกใบแจ้งค่าใช้บริการ",
    "รหัสกลุ่มลูกค้า",
];

/// Heading above the recipient name and address.
pub const ADDRESS_HEADING: &str = "ชื่อและที่อยู่สำาหรับจัดส่งเอกสาร";

/// Prefix of the bill cycle line.
pub const BILL_CYCLE_PREFIX: &str = "รอบค่าใช้บริการ";

/// Brought-forward balance heading.
pub const BROUGHT_FORWARD_HEADING: &str = "ยอดยกมา";

/// Heading of the current charge summary.
pub const SUMMARY_HEADING: &str = "สรุปค่าใช้บริการรอบปัจจุบัน";

/// Prefix shared by charge section headings.
pub const SERVICE_SECTION_PREFIX: &str = "บริการ";

/// Bank payment slip marker.
pub const BANK_MARKER: &str = "ผ่านธนาคาร";

/// Marker of the due date line in the payment slip.
pub const DUE_DATE_MARKER: &str = "(Due Date)";

/// Substrings that must all appear in the call detail header row.
pub const CDR_HEADER_PARTS: [&str; 3] = ["หมายเลข", "เวลา ว/ด/ป", "เรียกไป"];

lazy_static! {
    // Bill cycle: "... : 26/01/2568 - 25/02/2568 (...)"
    pub static ref BILL_CYCLE_PERIOD: Regex = Regex::new(
        r": ([0-9/]+ - [0-9/]+)"
    ).unwrap();

    // Balance row tokens
    pub static ref BALANCE_AMOUNT: Regex = Regex::new(
        r"^[0-9,]+\.[0-9]{2}$"
    ).unwrap();

    pub static ref BALANCE_DATE: Regex = Regex::new(
        r"^[0-9]{2}/[0-9]{2}/(?:[0-9]{2}|[0-9]{4})$"
    ).unwrap();

    // Charge row: label followed by three two-decimal amounts
    pub static ref CHARGE_ROW: Regex = Regex::new(
        r"^(.+?)\s+([0-9,]+\.[0-9]{2})\s+([0-9,]+\.[0-9]{2})\s+([0-9,]+\.[0-9]{2})$"
    ).unwrap();

    // Any two-decimal amount inside a line
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"[0-9]\.[0-9]{2}"
    ).unwrap();

    // End of the charge summary (payee or bank transfer block)
    pub static ref SUMMARY_END: Regex = Regex::new(
        r"ผู้รับเงิน|ผ่านธนาคาร"
    ).unwrap();

    // Parenthesized English gloss in a bilingual label
    pub static ref LABEL_GLOSS: Regex = Regex::new(
        r"\(([^)]+)\)"
    ).unwrap();

    // Separators collapsed to underscores in fallback keys
    pub static ref KEY_SEPARATORS: Regex = Regex::new(
        r"[\s\-/().]+"
    ).unwrap();

    pub static ref UNDERSCORE_RUN: Regex = Regex::new(
        r"_+"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_date_years() {
        assert!(BALANCE_DATE.is_match("10/03/68"));
        assert!(BALANCE_DATE.is_match("10/03/2568"));
        assert!(!BALANCE_DATE.is_match("10/03/568"));
        assert!(!BALANCE_DATE.is_match("1/03/2568"));
    }

    #[test]
    fn test_balance_amount() {
        assert!(BALANCE_AMOUNT.is_match("1,655,171.50"));
        assert!(BALANCE_AMOUNT.is_match("0.00"));
        assert!(!BALANCE_AMOUNT.is_match("-12.00"));
        assert!(!BALANCE_AMOUNT.is_match("12.5"));
    }

    #[test]
    fn test_ascii_digits_only() {
        // Thai digits are not amounts
        assert!(!BALANCE_AMOUNT.is_match("๑๒.๐๐"));
    }
}
