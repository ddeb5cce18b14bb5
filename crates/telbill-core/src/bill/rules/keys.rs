//! Key-value splitting and bilingual label translation.

use tracing::debug;

use super::patterns::{KEY_SEPARATORS, LABEL_GLOSS, UNDERSCORE_RUN};
use super::BlockExtractor;
use crate::models::bill::{FieldMap, LineSequence};

/// Split a line on its first colon into trimmed `(label, value)`.
pub fn split_kv(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(label, value)| (label.trim(), value.trim()))
}

/// Translate a raw, possibly Thai, label into a stable ASCII key.
///
/// `"หมายเลขบริการ (Service No.)"` becomes `serviceNo`; a label without an
/// English gloss such as `"Ref.1"` becomes `ref_1`.
pub fn derive_key(raw_label: &str) -> String {
    if let Some(caps) = LABEL_GLOSS.captures(raw_label) {
        let key = camel_case_gloss(&caps[1]);
        if !key.is_empty() && key.is_ascii() {
            return key;
        }
        debug!("Gloss in {:?} gives no ASCII key, using fallback", raw_label);
    }

    fallback_key(raw_label)
}

/// "Service No." -> "serviceNo", "Bill-Cycle/Period" -> "billCyclePeriod".
fn camel_case_gloss(gloss: &str) -> String {
    gloss
        .replace('.', "")
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Drop non-ASCII, collapse separators to `_`, trim underscores, lowercase.
fn fallback_key(raw_label: &str) -> String {
    let ascii: String = raw_label.chars().filter(char::is_ascii).collect();
    let separated = KEY_SEPARATORS.replace_all(&ascii, "_");
    let collapsed = UNDERSCORE_RUN.replace_all(&separated, "_");
    collapsed.trim_matches('_').to_lowercase()
}

/// Collect `label: value` lines into a field map keyed by derived key.
///
/// Lines without a colon contribute nothing. When two labels derive the same
/// key the later line wins.
pub fn collect_kv<S: AsRef<str>>(lines: &[S]) -> FieldMap {
    let mut fields = FieldMap::new();

    for line in lines {
        let Some((label, value)) = split_kv(line.as_ref()) else {
            continue;
        };

        let key = derive_key(label);
        if let Some(previous) = fields.insert(key.clone(), value.to_string()) {
            debug!("Key {:?} from {:?} replaces value {:?}", key, label, previous);
        }
    }

    fields
}

/// Key-value extractor over a whole line sequence.
pub struct KeyValueExtractor;

impl KeyValueExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtractor for KeyValueExtractor {
    type Output = FieldMap;

    fn extract(&self, lines: &LineSequence) -> Self::Output {
        collect_kv(lines.lines())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_kv() {
        assert_eq!(
            split_kv("หมายเลขบริการ (Service No.) : 021236000"),
            Some(("หมายเลขบริการ (Service No.)", "021236000"))
        );
        assert_eq!(split_kv("Time : 10:30:00"), Some(("Time", "10:30:00")));
        assert_eq!(split_kv("no colon here"), None);
        assert_eq!(split_kv(": value"), Some(("", "value")));
    }

    #[test]
    fn test_gloss_key_stability() {
        for label in [
            "หมายเลขบริการ (Service No.)",
            "หมายเลขบริการ (SERVICE NO.)",
            "หมายเลขบริการ (service  no.)",
            "หมายเลขบริการ ( Service No. )",
        ] {
            assert_eq!(derive_key(label), "serviceNo", "label {label:?}");
        }
    }

    #[test]
    fn test_gloss_separators() {
        assert_eq!(derive_key("รอบค่าใช้บริการ (Bill Cycle)"), "billCycle");
        assert_eq!(derive_key("x (Bill-Cycle/Period)"), "billCyclePeriod");
        assert_eq!(derive_key("ยอดรวม (Total Outstanding Balance)"), "totalOutstandingBalance");
    }

    #[test]
    fn test_fallback_key() {
        assert_eq!(derive_key("Ref.1"), "ref_1");
        assert_eq!(derive_key("Ref. 2"), "ref_2");
        assert_eq!(derive_key("ชื่อ Customer  Name"), "customer_name");
        assert_eq!(derive_key("ยอดรวม"), "");
    }

    #[test]
    fn test_non_ascii_gloss_falls_back() {
        assert_eq!(derive_key("Amount (บาท)"), "amount");
    }

    #[test]
    fn test_collect_kv_last_write_wins() {
        let lines = [
            "รหัสลูกค้า (Account No.) : 104532043063 (BIZ)",
            "no colon",
            "เลขที่บัญชี (ACCOUNT NO.) : 999",
        ];

        let fields = collect_kv(&lines);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["accountNo"], "999");
    }

    #[test]
    fn test_key_value_extractor_over_lines() {
        let lines = crate::bill::rules::normalize_lines(
            "ใบแจ้งค่าใช้บริการ\nRef.1 : 911\\r\\nรหัสบริการ (Service Code) : NTTOT",
        );

        let fields = KeyValueExtractor::new().extract(&lines);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["ref_1"], "911");
        assert_eq!(fields["serviceCode"], "NTTOT");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let fields = collect_kv(&["เวลา (Time) : 10:30:00"]);
        assert_eq!(fields["time"], "10:30:00");
    }
}
