//! Telecom bill parser composing the extraction stages.

use tracing::{debug, info};

use crate::error::{BillError, Result};
use crate::models::bill::{BillCycle, StructuredBill};
use crate::models::config::ExtractionConfig;

use super::rules::{
    balances::{BalanceExtractor, BALANCE_SCAN_WINDOW},
    cdr::CallDetailExtractor,
    charges::ChargeSummaryParser,
    header::{AddressExtractor, HeaderExtractor, ADDRESS_WINDOW},
    lines::LineNormalizer,
    payment::{BankPaymentExtractor, PAYMENT_WINDOW, REFERENCE_WINDOW},
    BlockExtractor,
};

/// Result of bill extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Extracted bill data.
    pub bill: StructuredBill,
    /// Landmarks that were not found and headings that were not recognized.
    pub warnings: Vec<String>,
}

/// Trait for bill parsing.
pub trait BillParser {
    /// Parse a bill from recognized text. Never fails: missing parts of the
    /// document yield empty fields and a warning.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Parse a bill from a raw payload, which must be UTF-8 text.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<ExtractionResult> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| BillError::InvalidInput(format!("payload is not UTF-8 text: {}", e)))?;
        Ok(self.parse(text))
    }
}

/// Parser for the Thai/English telecom bill layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelecomBillParser {
    /// Lines after the address heading that form the address.
    address_window: usize,
    /// Lines scanned for the balance row.
    balance_scan_window: usize,
    /// Lines after the bank marker read as payment fields.
    payment_window: usize,
    /// Lines after the payment fields read as reference fields.
    reference_window: usize,
}

impl TelecomBillParser {
    /// Create a new parser with the layout's default windows.
    pub fn new() -> Self {
        Self {
            address_window: ADDRESS_WINDOW,
            balance_scan_window: BALANCE_SCAN_WINDOW,
            payment_window: PAYMENT_WINDOW,
            reference_window: REFERENCE_WINDOW,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_address_window(config.address_window)
            .with_balance_scan_window(config.balance_scan_window)
            .with_payment_window(config.payment_window)
            .with_reference_window(config.reference_window)
    }

    /// Set the address window.
    pub fn with_address_window(mut self, window: usize) -> Self {
        self.address_window = window;
        self
    }

    /// Set the balance scan window.
    pub fn with_balance_scan_window(mut self, window: usize) -> Self {
        self.balance_scan_window = window;
        self
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
}

impl Default for TelecomBillParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BillParser for TelecomBillParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let mut warnings = Vec::new();

        info!("Parsing bill from {} characters of text", text.chars().count());

        let lines = LineNormalizer::new().normalize(text);
        debug!("Normalized into {} lines", lines.len());

        let address = AddressExtractor::new()
            .with_window(self.address_window)
            .extract(&lines);
        if address.is_empty() {
            warnings.push("Could not extract recipient address".to_string());
        }

        let header = HeaderExtractor::new().extract(&lines);
        if header.is_empty() {
            warnings.push("Could not extract header fields".to_string());
        }

        let bill_cycle: BillCycle = BalanceExtractor::new()
            .with_scan_window(self.balance_scan_window)
            .extract(&lines);
        if bill_cycle.period.is_empty() {
            warnings.push("Could not extract bill cycle period".to_string());
        }
        if bill_cycle.balances.is_empty() {
            warnings.push("Could not extract balance row".to_string());
        }

        let summary = ChargeSummaryParser::new().extract(&lines);
        if !summary.heading_found {
            warnings.push("Could not find charge summary".to_string());
        }
        for heading in &summary.unrecognized_headings {
            warnings.push(format!("Unrecognized charge section: {}", heading));
        }

        let bank_payment = BankPaymentExtractor::new()
            .with_payment_window(self.payment_window)
            .with_reference_window(self.reference_window)
            .extract(&lines);
        if bank_payment.fields.is_empty() && bank_payment.reference.is_empty() {
            warnings.push("Could not extract bank payment block".to_string());
        }
        if bank_payment.due_date.is_empty() {
            warnings.push("Could not extract due date".to_string());
        }

        let call_detail_records = CallDetailExtractor::new().extract(&lines);
        if call_detail_records.is_empty() {
            warnings.push("Could not extract call detail records".to_string());
        }

        let bill = StructuredBill {
            address,
            header,
            bill_cycle,
            charge_summary: summary.sections,
            bank_payment,
            call_detail_records,
        };

        info!(
            "Extracted bill with {} header fields, {} charge rows, {} call records",
            bill.header.len(),
            bill.charge_row_count(),
            bill.call_detail_records.len()
        );

        ExtractionResult { bill, warnings }
    }
}

/// Parse raw bill text with the default parser.
pub fn build_bill(raw: &str) -> StructuredBill {
    TelecomBillParser::new().parse(raw).bill
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::rules::derive_key;
    use crate::models::bill::{Balances, ChargeRow};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "ใบแจ้งค่าใช้บริการ/ใบกำกับภาษี\n\
        หมายเลขบริการ (Service No.) : 021236000\n\
        รหัสลูกค้า (Account No.) : 104532043063 (BIZ)\n\
        เลขที่ใบแจ้งค่าใช้บริการ (Invoice No.) : 0000898488223\n\
        วันที่ออกใบแจ้งค่าใช้บริการ (Issue Date) : 02/03/2568\n\
        รหัสกลุ่มลูกค้า (Group No.) : F050398\n\
        ชื่อและที่อยู่สำาหรับจัดส่งเอกสาร\n\
        บริษัท ตัวอย่าง จำกัด\n\
        99 ถนนพระราม 4\n\
        แขวงสีลม เขตบางรัก\n\
        กรุงเทพมหานคร\n\
        10500\n\
        รอบค่าใช้บริการ (Bill Cycle) : 26/01/2568 - 25/02/2568 (ประจำาเดือนกุมภาพันธ์ 2568)\n\
        ยอดยกมา ยอดเงินที่ชำระแล้ว ยอดปรับปรุง ยอดค่าใช้บริการรอบปัจจุบัน ยอดรวมที่ต้องชำระทั้งสิ้น\n\
        (Previous Balance) (Paid Amount) (Adjustment) (Current Charge) (Total Outstanding Balance)\n\
        1,200.00 1,200.00 0.00 3,450.50 3,450.50 10/03/2568\n\
        สรุปค่าใช้บริการรอบปัจจุบัน\n\
        บริการ ISDN-PRI 2 เลขหมายหลัก\n\
        ค่าบริการรายเดือน 2,000.00 0.00 2,000.00\n\
        ค่าโทรในประเทศ 150.50 0.00 150.50\n\
        บริการ SIP Trunk 1 Trunk\n\
        ค่าบริการรายเดือน 1,300.00 0.00 1,300.00\n\
        ผู้รับเงิน (Payee)\n\
        สำหรับชำระเงินผ่านธนาคาร (For Bank Payment)\n\
        หมายเลขบริการ (Service No.) : 021236000\n\
        รหัสลูกค้า (Account No.) : 104532043063 (BIZ)\n\
        เลขที่ใบแจ้ง (Invoice No.) : 0000898488223\n\
        ชื่อลูกค้า (Customer Name) : บริษัท ตัวอย่าง จำกัด\n\
        ที่อยู่ (Address) : 99 ถนนพระราม 4\n\
        จำนวนเงิน (Amount) : 3,450.50\n\
        สาขา (Branch) : 00000\n\
        ส่วนลด (Discount) : 0.00\n\
        รหัสบริการ (Service Code) : NTTOT\n\
        Ref.1 : 91104532043063\n\
        Ref.2 : 20000898488223\n\
        วันครบกำหนดชำระ (Due Date) : 10/03/2568\n\
        รายละเอียดการใช้บริการ\n\
        หมายเลข เวลา ว/ด/ป เรียกไป ประเภท จำนวน ค่าบริการ\n\
        0814435901 09:08:34 26/01/68 BKK CENTRAL AIS3G 1 0.50\n\
        021236000 10:15:00 27/01/68 CHIANG MAI PSTN 3 9.00\n\
        หมายเลข เวลา ว/ด/ป เรียกไป ประเภท จำนวน ค่าบริการ\n\
        021236000 11:00:00 28/01/68 HATYAI PSTN 2 6.00";

    fn row(label: &str, charge: &str, discount: &str, amount: &str) -> ChargeRow {
        ChargeRow {
            service_label: label.to_string(),
            service_charge: charge.to_string(),
            discount: discount.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_parse_full_bill() {
        let result = TelecomBillParser::new().parse(SAMPLE);
        let bill = result.bill;

        assert_eq!(
            bill.address,
            "บริษัท ตัวอย่าง จำกัด 99 ถนนพระราม 4 แขวงสีลม เขตบางรัก กรุงเทพมหานคร 10500"
        );

        assert_eq!(bill.header.len(), 5);
        assert_eq!(bill.header["serviceNo"], "021236000");
        assert_eq!(bill.header["accountNo"], "104532043063 (BIZ)");
        assert_eq!(bill.header["groupNo"], "F050398");

        assert_eq!(bill.bill_cycle.period, "26/01/2568 - 25/02/2568");
        assert_eq!(
            bill.bill_cycle.balances,
            Balances::from_row([
                "1,200.00", "1,200.00", "0.00", "3,450.50", "3,450.50", "10/03/2568",
            ])
        );

        assert_eq!(
            bill.charge_summary["ISDN_PRI"],
            vec![
                row("ค่าบริการรายเดือน", "2,000.00", "0.00", "2,000.00"),
                row("ค่าโทรในประเทศ", "150.50", "0.00", "150.50"),
            ]
        );
        assert_eq!(
            bill.charge_summary["SIP_Trunk"],
            vec![row("ค่าบริการรายเดือน", "1,300.00", "0.00", "1,300.00")]
        );

        assert_eq!(bill.bank_payment.fields.len(), 7);
        assert_eq!(bill.bank_payment.fields["amount"], "3,450.50");
        assert_eq!(bill.bank_payment.reference["serviceCode"], "NTTOT");
        assert_eq!(bill.bank_payment.reference["ref_2"], "20000898488223");
        assert_eq!(bill.bank_payment.due_date, "10/03/2568");

        assert_eq!(bill.call_detail_records.len(), 3);
        assert_eq!(bill.call_detail_records[0].destination, "BKK CENTRAL");
        assert_eq!(bill.call_detail_records[1].destination, "CHIANG MAI");

        assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(build_bill(SAMPLE)).unwrap();

        assert_eq!(json["billCycle"]["balances"]["totalOutstandingBalance"], "3,450.50");
        assert_eq!(json["chargeSummary"]["ISDN_PRI"][0]["serviceLabel"], "ค่าบริการรายเดือน");
        assert_eq!(json["bankPayment"]["customerName"], "บริษัท ตัวอย่าง จำกัด");
        assert_eq!(json["bankPayment"]["reference"]["ref_1"], "91104532043063");
        assert_eq!(json["bankPayment"]["dueDate"], "10/03/2568");
        assert_eq!(json["callDetailRecords"][0]["callType"], "AIS3G");
        assert_eq!(json["callDetailRecords"][0]["timestamp"], "09:08:34 26/01/68");
    }

    #[test]
    fn test_escaped_line_breaks() {
        let escaped = SAMPLE.replace('\n', "\\r\\n");
        assert_eq!(build_bill(&escaped), build_bill(SAMPLE));

        let double_escaped = SAMPLE.replace('\n', "\\\\r\\\\n");
        assert_eq!(build_bill(&double_escaped), build_bill(SAMPLE));

        let crlf = SAMPLE.replace('\n', "\r\n");
        assert_eq!(build_bill(&crlf), build_bill(SAMPLE));
    }

    #[test]
    fn test_header_only_document() {
        let text = "หมายเลขบริการ (Service No.) : 021236000\n\
            รหัสลูกค้า (Account No.) : 104532043063";

        let result = TelecomBillParser::new().parse(text);
        let bill = &result.bill;

        assert_eq!(bill.header.len(), 2);
        assert_eq!(bill.address, "");
        assert_eq!(bill.bill_cycle.period, "");
        assert!(bill.bill_cycle.balances.is_empty());
        assert!(bill.charge_summary.is_empty());
        assert!(bill.bank_payment.is_empty());
        assert!(bill.call_detail_records.is_empty());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let result = TelecomBillParser::new().parse("");
        assert!(result.bill.is_empty());
        assert_eq!(result.bill, StructuredBill::default());
    }

    #[test]
    fn test_deterministic() {
        let parser = TelecomBillParser::new();
        let first = parser.parse(SAMPLE);

        parser.parse("หมายเลขบริการ (Service No.) : 1");
        let second = parser.parse(SAMPLE);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.bill).unwrap(),
            serde_json::to_string(&second.bill).unwrap()
        );
    }

    #[test]
    fn test_unrecognized_section_warning() {
        let text = "สรุปค่าใช้บริการรอบปัจจุบัน\nบริการ Internet 1 Gbps\nค่าบริการ 100.00 0.00 100.00";
        let result = TelecomBillParser::new().parse(text);

        assert!(result.bill.charge_summary.is_empty());
        assert!(result
            .warnings
            .contains(&"Unrecognized charge section: บริการ Internet 1 Gbps".to_string()));
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let parser = TelecomBillParser::new();

        let err = parser.parse_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, BillError::InvalidInput(_)));

        let ok = parser.parse_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ok.bill, build_bill(SAMPLE));
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            address_window: 2,
            ..Default::default()
        };

        let bill = TelecomBillParser::from_config(&config).parse(SAMPLE).bill;
        assert_eq!(bill.address, "บริษัท ตัวอย่าง จำกัด 99 ถนนพระราม 4");
    }

    #[test]
    fn test_key_stability_across_runs() {
        let label = "หมายเลขบริการ (Service No.)";
        assert_eq!(derive_key(label), derive_key(label));
        assert_eq!(derive_key(label), "serviceNo");
    }
}
