//! Ordered symbol sets with constant-time symbol/index lookup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EnigmaError, EnigmaResult};

/// The character set a machine operates over.
///
/// Symbols keep the order they were supplied in; that order defines the index
/// space every rotor, reflector and plugboard works in. An `Alphabet` is
/// immutable once built and is shared between components through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    indices: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet, rejecting empty input and duplicate symbols.
    pub fn new(symbols: &[char]) -> EnigmaResult<Self> {
        if symbols.is_empty() {
            return Err(EnigmaError::EmptyAlphabet);
        }

        let mut indices = HashMap::with_capacity(symbols.len());
        for (i, &symbol) in symbols.iter().enumerate() {
            if indices.insert(symbol, i).is_some() {
                return Err(EnigmaError::DuplicateSymbol(symbol));
            }
        }

        Ok(Self {
            symbols: symbols.to_vec(),
            indices,
        })
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }

    pub fn index_of(&self, symbol: char) -> EnigmaResult<usize> {
        self.indices
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::SymbolNotInAlphabet(symbol))
    }

    pub fn symbol_at(&self, index: usize) -> EnigmaResult<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Return the first symbol of `text` that is not part of the alphabet.
    pub fn validate(&self, text: &str) -> Option<char> {
        text.chars().find(|c| !self.contains(*c))
    }

    /// Convert text to indices, failing on the first unknown symbol.
    pub fn encode(&self, text: &str) -> EnigmaResult<Vec<usize>> {
        text.chars().map(|c| self.index_of(c)).collect()
    }

    /// Convert indices back to text.
    pub fn decode(&self, indices: &[usize]) -> EnigmaResult<String> {
        indices.iter().map(|&i| self.symbol_at(i)).collect()
    }

    /// The symbols as a single string, in alphabet order.
    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }
}

impl FromStr for Alphabet {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        Self::new(&symbols)
    }
}

impl TryFrom<&str> for Alphabet {
    type Error = EnigmaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preserves_order() {
        let alphabet = Alphabet::new(&['C', 'A', 'B']).unwrap();
        assert_eq!(alphabet.symbols(), &['C', 'A', 'B']);
        assert_eq!(alphabet.index_of('C').unwrap(), 0);
        assert_eq!(alphabet.index_of('B').unwrap(), 2);
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Alphabet::new(&[]),
            Err(EnigmaError::EmptyAlphabet)
        ));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        assert!(matches!(
            Alphabet::new(&['A', 'B', 'A']),
            Err(EnigmaError::DuplicateSymbol('A'))
        ));
    }

    #[test]
    fn test_unicode_symbols() {
        let alphabet: Alphabet = "αβγδ日本".parse().unwrap();
        assert_eq!(alphabet.size(), 6);
        assert_eq!(alphabet.index_of('日').unwrap(), 4);
        assert_eq!(alphabet.symbol_at(1).unwrap(), 'β');
    }

    #[test]
    fn test_symbol_at_out_of_range() {
        let alphabet: Alphabet = "AB".parse().unwrap();
        assert!(matches!(
            alphabet.symbol_at(2),
            Err(EnigmaError::IndexOutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn test_encode_fails_on_first_invalid_symbol() {
        let alphabet: Alphabet = "ABC".parse().unwrap();
        assert_eq!(alphabet.encode("CAB").unwrap(), vec![2, 0, 1]);
        assert!(matches!(
            alphabet.encode("AxBy"),
            Err(EnigmaError::SymbolNotInAlphabet('x'))
        ));
        assert_eq!(alphabet.validate("AxBy"), Some('x'));
        assert_eq!(alphabet.validate("ABBA"), None);
    }

    #[test]
    fn test_decode() {
        let alphabet: Alphabet = "ABC".parse().unwrap();
        assert_eq!(alphabet.decode(&[2, 1, 0]).unwrap(), "CBA");
        assert!(alphabet.decode(&[0, 3]).is_err());
        assert_eq!(alphabet.decode(&[]).unwrap(), "");
    }

    #[test]
    fn test_display_roundtrip() {
        let alphabet: Alphabet = "ZYX".parse().unwrap();
        assert_eq!(alphabet.to_string(), "ZYX");
        assert_eq!(Alphabet::try_from("ZYX").unwrap(), alphabet);
    }
}
