//! Line normalization for raw recognizer output.

use crate::models::bill::LineSequence;

/// Escaped line-break encodings, broadest first. All end in `n`, so a
/// completed escape is recognized when its last character arrives.
const ESCAPED_BREAKS: [&[char]; 3] = [
    &['\\', '\\', 'r', '\\', '\\', 'n'],
    &['\\', 'r', '\\', 'n'],
    &['\\', 'n'],
];

/// Literal control marker the recognizer leaks (escaped form `\u0001`).
const ESCAPED_CONTROL_MARKER: &[char] = &['\\', 'u', '0', '0', '0', '1'];

/// Line normalizer stage.
pub struct LineNormalizer;

impl LineNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize raw text into trimmed, non-empty lines.
    pub fn normalize(&self, raw: &str) -> LineSequence {
        let text = canonicalize(raw);

        let lines = text
            .split('\n')
            .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        LineSequence::from_normalized(lines)
    }
}

impl Default for LineNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize raw text into a line sequence.
pub fn normalize_lines(raw: &str) -> LineSequence {
    LineNormalizer::new().normalize(raw)
}

/// Resolve line breaks and strip control noise in one left-to-right scan.
///
/// The output buffer never contains a complete escape, marker or stripped
/// control. Each pushed character can only complete a pattern at the end of
/// the buffer, so checking that suffix after every push is enough. Removing a
/// control or marker can join the halves of an outer escape (`\`, U+0001,
/// `n`); the outer one is then caught when its last character is pushed.
/// Every input character is pushed and removed at most once.
fn canonicalize(raw: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            // CR LF and lone CR both end a line; the extra LF is an empty line
            '\r' => out.push('\n'),
            c if is_stripped_control(c) => {}
            c => {
                out.push(c);
                reduce_suffix(&mut out);
            }
        }
    }

    out.into_iter().collect()
}

fn reduce_suffix(out: &mut Vec<char>) {
    if out.ends_with(ESCAPED_CONTROL_MARKER) {
        out.truncate(out.len() - ESCAPED_CONTROL_MARKER.len());
        return;
    }

    if let Some(pattern) = ESCAPED_BREAKS.iter().copied().find(|p| out.ends_with(p)) {
        out.truncate(out.len() - pattern.len());
        out.push('\n');
    }
}

/// U+0000-U+0008, U+000B-U+001F and U+007F. Tab and line feed survive.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}'..='\u{1f}' | '\u{7f}')
}
