use thiserror::Error;

/// Errors produced by the cipher engine.
///
/// Construction-time failures are grouped first, followed by per-call input
/// failures, snapshot (de)serialization failures and randomness failures.
#[derive(Error, Debug)]
pub enum EnigmaError {
    #[error("Alphabet cannot be empty")]
    EmptyAlphabet,

    #[error("Duplicate symbol in alphabet: {0:?}")]
    DuplicateSymbol(char),

    #[error("Symbol {0:?} not found in alphabet")]
    SymbolNotInAlphabet(char),

    #[error("Index {index} out of bounds [0, {size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Mapping length ({actual}) must match alphabet size ({expected})")]
    MappingLength { expected: usize, actual: usize },

    #[error("Invalid symbol {symbol:?} in mapping at position {position}")]
    InvalidMappingSymbol { position: usize, symbol: char },

    #[error("Duplicate output symbol in rotor mapping: {0:?}")]
    NonBijective(char),

    #[error("Invalid notch symbol: {0:?}")]
    InvalidNotch(char),

    #[error("Symbol {0:?} cannot map to itself in a reflector")]
    SelfMapping(char),

    #[error("Symbol {0:?} is used multiple times in reflector mapping")]
    DuplicateTarget(char),

    #[error("Non-reciprocal mapping: {from:?}->{to:?} but {to:?}->{back:?}")]
    NonReciprocal { from: char, to: char, back: char },

    #[error("Alphabet size must be even for a reflector ({0} is odd)")]
    OddAlphabetSize(usize),

    #[error("Cannot pair symbol {0:?} with itself")]
    SelfPair(char),

    #[error("Symbol {0:?} is already paired")]
    AlreadyPaired(char),

    #[error("Symbol {0:?} is not paired")]
    NotPaired(char),

    #[error("Cannot create {requested} pairs with alphabet size {size} (max {max})")]
    TooManyPairs {
        requested: usize,
        size: usize,
        max: usize,
    },

    #[error("Non-reciprocal plugboard pair: {from:?}->{to:?}")]
    NonReciprocalPair { from: char, to: char },

    #[error("Position count ({actual}) must match rotor count ({expected})")]
    PositionCount { expected: usize, actual: usize },

    #[error("Machine is missing a required component: {0}")]
    MissingComponent(&'static str),

    #[error("At least one rotor must be configured")]
    NoRotors,

    #[error("Component '{0}' was built over a different alphabet")]
    AlphabetMismatch(String),

    #[error("Unsupported schema version: expected {expected}, got {actual}")]
    UnsupportedSchemaVersion { expected: u32, actual: u32 },

    #[error("Malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text cannot be empty for alphabet detection")]
    EmptyInput,

    #[error("No valid characters found in text")]
    NoValidCharacters,

    #[error("No unused padding symbol available to make the alphabet even")]
    PaddingExhausted,

    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Unknown security level: {0}")]
    UnknownSecurityLevel(String),

    #[error("Unknown alphabet: {0}")]
    UnknownAlphabet(String),
}

pub type EnigmaResult<T> = Result<T, EnigmaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_index_out_of_range() {
        let err = EnigmaError::IndexOutOfRange { index: 7, size: 6 };
        assert_eq!(err.to_string(), "Index 7 out of bounds [0, 6)");
    }

    #[test]
    fn test_display_non_reciprocal() {
        let err = EnigmaError::NonReciprocal {
            from: 'A',
            to: 'B',
            back: 'C',
        };
        assert_eq!(
            err.to_string(),
            "Non-reciprocal mapping: 'A'->'B' but 'B'->'C'"
        );
    }

    #[test]
    fn test_display_schema_version() {
        let err = EnigmaError::UnsupportedSchemaVersion {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported schema version: expected 1, got 2"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: EnigmaError = json_err.into();
        assert!(matches!(err, EnigmaError::Json(_)));
    }
}
