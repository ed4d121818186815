//! Deriving an alphabet from sample text.

use std::collections::BTreeSet;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};

/// How far above U+0020 to look for an unused padding symbol.
const PADDING_SCAN_LIMIT: u32 = 0x0400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Stop collecting after this many distinct symbols.
    pub max_size: usize,
    /// Append one unused printable symbol when the count is odd.
    pub add_padding: bool,
    /// Skip control characters other than newline and tab.
    pub exclude_control: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            max_size: 1000,
            add_padding: true,
            exclude_control: true,
        }
    }
}

/// Unify line endings to `\n` and trim surrounding whitespace.
///
/// This is the exact text [`detect`] looks at, so callers that want to
/// encrypt their sample with the detected alphabet should encrypt this.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

/// Build the smallest alphabet covering `text`, sorted by code point.
pub fn detect(text: &str, options: &DetectOptions) -> EnigmaResult<Alphabet> {
    if text.is_empty() {
        return Err(EnigmaError::EmptyInput);
    }

    let normalized = normalize(text);
    let mut found = BTreeSet::new();
    for c in normalized.chars() {
        if found.len() >= options.max_size {
            break;
        }
        if options.exclude_control && is_excluded_control(c) {
            continue;
        }
        found.insert(c);
    }

    if found.is_empty() {
        return Err(EnigmaError::NoValidCharacters);
    }

    let mut symbols: Vec<char> = found.iter().copied().collect();
    if options.add_padding && symbols.len() % 2 == 1 {
        symbols.push(padding_symbol(&found)?);
    }

    Alphabet::new(&symbols)
}

fn is_excluded_control(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}

fn padding_symbol(used: &BTreeSet<char>) -> EnigmaResult<char> {
    (0x20..0x20 + PADDING_SCAN_LIMIT)
        .filter_map(char::from_u32)
        .find(|c| !c.is_control() && !used.contains(c))
        .ok_or(EnigmaError::PaddingExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_default(text: &str) -> EnigmaResult<Alphabet> {
        detect(text, &DetectOptions::default())
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        let alphabet = detect_default("HELLO").unwrap();
        assert_eq!(alphabet.as_string(), "EHLO");
    }

    #[test]
    fn test_odd_count_gets_padding() {
        // D, E, H, L, O, R, W: seven symbols, space is the first unused
        let alphabet = detect_default("HELLOWORLD").unwrap();
        assert_eq!(alphabet.size(), 8);
        assert_eq!(alphabet.symbols()[7], ' ');
    }

    #[test]
    fn test_padding_skips_used_symbols() {
        let alphabet = detect_default("A B").unwrap();
        assert_eq!(alphabet.as_string(), " AB!");
    }

    #[test]
    fn test_padding_disabled() {
        let options = DetectOptions {
            add_padding: false,
            ..DetectOptions::default()
        };
        assert_eq!(detect("ABC", &options).unwrap().size(), 3);
    }

    #[test]
    fn test_is_deterministic() {
        let text = "Ünïcödé text, with ∑ymbols!";
        assert_eq!(detect_default(text).unwrap(), detect_default(text).unwrap());
        assert_eq!(detect_default(text).unwrap().size() % 2, 0);
    }

    #[test]
    fn test_line_endings_and_trim() {
        let alphabet = detect_default("  AB\r\nCD\rE  ").unwrap();
        assert_eq!(alphabet.as_string(), "\nABCDE");
        assert_eq!(normalize("  AB\r\nCD\rE  "), "AB\nCD\nE");
    }

    #[test]
    fn test_control_characters_excluded() {
        let alphabet = detect_default("A\u{7}B").unwrap();
        assert!(!alphabet.contains('\u{7}'));

        let options = DetectOptions {
            exclude_control: false,
            add_padding: false,
            ..DetectOptions::default()
        };
        assert!(detect("A\u{7}B", &options).unwrap().contains('\u{7}'));
    }

    #[test]
    fn test_max_size() {
        let options = DetectOptions {
            max_size: 4,
            add_padding: false,
            ..DetectOptions::default()
        };
        assert_eq!(detect("ABCDEFGH", &options).unwrap().as_string(), "ABCD");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(detect_default(""), Err(EnigmaError::EmptyInput)));
        assert!(matches!(
            detect_default("   \r\n  "),
            Err(EnigmaError::NoValidCharacters)
        ));
        assert!(matches!(
            detect_default("\u{1}\u{2}"),
            Err(EnigmaError::NoValidCharacters)
        ));
    }

    #[test]
    fn test_padding_exhausted() {
        let used: BTreeSet<char> = (0x20..0x20 + PADDING_SCAN_LIMIT)
            .filter_map(char::from_u32)
            .collect();
        assert!(matches!(
            padding_symbol(&used),
            Err(EnigmaError::PaddingExhausted)
        ));
    }
}
