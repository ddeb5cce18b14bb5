//! Current charge summary parser.
//!
//! A small state machine walks the lines after the summary heading:
//!
//! ```text
//! Searching --heading--> NoSection --section heading--> InSection(tag)
//!                            |                              |   ^
//!                            |                              |   +-- section heading
//!                            +------ payee/bank marker -----+--> Done
//! ```
//!
//! Only exact, known section headings open a section. Rows seen outside a
//! section are dropped.

use tracing::{debug, trace};

use super::patterns::{AMOUNT_TOKEN, CHARGE_ROW, SERVICE_SECTION_PREFIX, SUMMARY_END, SUMMARY_HEADING};
use super::BlockExtractor;
use crate::models::bill::{ChargeRow, ChargeSummary, LineSequence};

/// Known charge section headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionTag {
    /// "บริการ ISDN-PRI 2 เลขหมายหลัก"
    IsdnPri,
    /// "บริการ SIP Trunk 1 Trunk"
    SipTrunk,
}

impl SectionTag {
    /// All known sections.
    pub const ALL: [SectionTag; 2] = [SectionTag::IsdnPri, SectionTag::SipTrunk];

    /// Exact heading text as printed on the bill.
    pub fn heading(self) -> &'static str {
        match self {
            SectionTag::IsdnPri => "บริการ ISDN-PRI 2 เลขหมายหลัก",
            SectionTag::SipTrunk => "บริการ SIP Trunk 1 Trunk",
        }
    }

    /// Key used in the charge summary map.
    pub fn key(self) -> &'static str {
        match self {
            SectionTag::IsdnPri => "ISDN_PRI",
            SectionTag::SipTrunk => "SIP_Trunk",
        }
    }

    /// Look up a line that exactly equals a known heading.
    pub fn from_heading(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.heading() == line)
    }
}

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    /// Summary heading not yet seen.
    Searching,
    /// Past the heading, no section open.
    NoSection,
    /// Accumulating rows for a section.
    InSection(SectionTag),
    /// Payee/bank marker reached.
    Done,
}

/// Result of the charge summary stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChargeSummaryOutcome {
    /// Rows per section key; sections with no rows are still present.
    pub sections: ChargeSummary,
    /// Section-like headings that are not in the known set.
    pub unrecognized_headings: Vec<String>,
    /// Whether the summary heading was found at all.
    pub heading_found: bool,
}

/// Charge summary parser.
pub struct ChargeSummaryParser;

impl ChargeSummaryParser {
    pub fn new() -> Self {
        Self
    }

    fn step(&self, state: SummaryState, line: &str, outcome: &mut ChargeSummaryOutcome) -> SummaryState {
        match state {
            SummaryState::Searching => {
                if line.contains(SUMMARY_HEADING) {
                    debug!("Charge summary heading found");
                    outcome.heading_found = true;
                    SummaryState::NoSection
                } else {
                    state
                }
            }
            SummaryState::NoSection | SummaryState::InSection(_) => {
                if let Some(tag) = SectionTag::from_heading(line) {
                    debug!("Opening charge section {}", tag.key());
                    outcome.sections.insert(tag.key().to_string(), Vec::new());
                    return SummaryState::InSection(tag);
                }

                if SUMMARY_END.is_match(line) {
                    debug!("Charge summary ends at: {}", line);
                    return SummaryState::Done;
                }

                match (state, parse_charge_row(line)) {
                    (SummaryState::InSection(tag), Some(row)) => {
                        outcome.sections.entry(tag.key().to_string()).or_default().push(row);
                    }
                    (_, Some(_)) => {
                        trace!("Charge row outside any section dropped: {}", line);
                    }
                    (_, None) if is_heading_like(line) => {
                        debug!("Unrecognized section heading: {}", line);
                        outcome.unrecognized_headings.push(line.to_string());
                    }
                    (_, None) => {
                        trace!("Not a charge row: {}", line);
                    }
                }
                state
            }
            SummaryState::Done => state,
        }
    }
}

impl Default for ChargeSummaryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for ChargeSummaryParser {
    type Output = ChargeSummaryOutcome;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        let mut outcome = ChargeSummaryOutcome::default();
        let mut state = SummaryState::Searching;

        for line in lines.iter() {
            state = self.step(state, line, &mut outcome);
            if state == SummaryState::Done {
                break;
            }
        }

        if !outcome.heading_found {
            debug!("Charge summary heading not found");
        }

        outcome
    }
}

/// A service-prefixed line carrying no amounts. Lines with amounts are
/// malformed rows, not headings.
fn is_heading_like(line: &str) -> bool {
    line.starts_with(SERVICE_SECTION_PREFIX) && !AMOUNT_TOKEN.is_match(line)
}

fn parse_charge_row(line: &str) -> Option<ChargeRow> {
    CHARGE_ROW.captures(line).map(|caps| ChargeRow {
        service_label: caps[1].trim().to_string(),
        service_charge: caps[2].to_string(),
        discount: caps[3].to_string(),
        amount: caps[4].to_string(),
    })
}

/// Extract the charge summary.
pub fn extract_charge_summary(lines: &LineSequence) -> ChargeSummaryOutcome {
    ChargeSummaryParser::new().extract(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::rules::normalize_lines;

    fn summary(text: &str) -> ChargeSummaryOutcome {
        extract_charge_summary(&normalize_lines(text))
    }

    #[test]
    fn test_section_isolation() {
        let outcome = summary(
            "สรุปค่าใช้บริการรอบปัจจุบัน\n\
             ค่าธรรมเนียม 10.00 0.00 10.00\n\
             บริการ ISDN-PRI 2 เลขหมายหลัก\n\
             ค่าบริการรายเดือน 2,000.00 0.00 2,000.00\n\
             ค่าโทรในประเทศ 150.50 0.00 150.50\n\
             ค่าโทรต่างประเทศ 300.00 0.00 300.00\n\
             บริการ SIP Trunk 1 Trunk\n\
             ค่าบริการรายเดือน 1,000.00 0.00 1,000.00\n\
             ค่าโทร 0.00 0.00 0.00",
        );

        assert!(outcome.heading_found);
        assert_eq!(outcome.sections.len(), 2);
        assert_eq!(outcome.sections["ISDN_PRI"].len(), 3);
        assert_eq!(outcome.sections["SIP_Trunk"].len(), 2);
        assert_eq!(
            outcome.sections["ISDN_PRI"][1],
            ChargeRow {
                service_label: "ค่าโทรในประเทศ".to_string(),
                service_charge: "150.50".to_string(),
                discount: "0.00".to_string(),
                amount: "150.50".to_string(),
            }
        );
    }

    #[test]
    fn test_stops_at_payee_marker() {
        let outcome = summary(
            "สรุปค่าใช้บริการรอบปัจจุบัน\n\
             บริการ SIP Trunk 1 Trunk\n\
             ค่าบริการรายเดือน 1,000.00 0.00 1,000.00\n\
             ผู้รับเงิน (Payee)\n\
             ค่าอื่น 5.00 0.00 5.00\n\
             บริการ ISDN-PRI 2 เลขหมายหลัก",
        );

        assert_eq!(outcome.sections.len(), 1);
        assert_eq!(outcome.sections["SIP_Trunk"].len(), 1);
    }

    #[test]
    fn test_heading_missing() {
        let outcome = summary("บริการ SIP Trunk 1 Trunk\nค่าบริการรายเดือน 1,000.00 0.00 1,000.00");
        assert!(!outcome.heading_found);
        assert!(outcome.sections.is_empty());
    }

    #[test]
    fn test_empty_section_kept() {
        let outcome = summary("สรุปค่าใช้บริการรอบปัจจุบัน\nบริการ ISDN-PRI 2 เลขหมายหลัก\nชำระผ่านธนาคาร");
        assert_eq!(outcome.sections["ISDN_PRI"], Vec::<ChargeRow>::new());
    }

    #[test]
    fn test_unrecognized_heading_reported() {
        let outcome = summary(
            "สรุปค่าใช้บริการรอบปัจจุบัน\n\
             บริการ Internet 1 Gbps\n\
             ค่าบริการรายเดือน 500.00 0.00 500.00",
        );

        assert!(outcome.sections.is_empty());
        assert_eq!(outcome.unrecognized_headings, vec!["บริการ Internet 1 Gbps"]);
    }

    #[test]
    fn test_malformed_service_row_not_a_heading() {
        let outcome = summary(
            "สรุปค่าใช้บริการรอบปัจจุบัน\n\
             บริการ SIP Trunk 1 Trunk\n\
             บริการเสริม 10.00 -5.00 5.00\n\
             ค่าบริการรายเดือน 1,000.00 0.00 1,000.00",
        );

        assert!(outcome.unrecognized_headings.is_empty());
        assert_eq!(outcome.sections["SIP_Trunk"].len(), 1);
        assert!(is_heading_like("บริการ Internet 1 Gbps"));
        assert!(!is_heading_like("บริการเสริม 10.00 -5.00 5.00"));
    }

    #[test]
    fn test_heading_requires_exact_match() {
        assert_eq!(SectionTag::from_heading("บริการ SIP Trunk 1 Trunk"), Some(SectionTag::SipTrunk));
        assert_eq!(SectionTag::from_heading("บริการ SIP Trunk 2 Trunk"), None);
        assert_eq!(SectionTag::from_heading("บริการ SIP Trunk 1 Trunk (ต่อ)"), None);
    }

    #[test]
    fn test_negative_amounts_not_rows() {
        assert!(parse_charge_row("ส่วนลด -100.00 0.00 -100.00").is_none());
        assert!(parse_charge_row("ค่าบริการ 1.00 2.00").is_none());
    }
}
