//! Predefined symbol sets.
//!
//! Every set here has an even number of distinct symbols, so each one can
//! carry a reflector.

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};

pub const LATIN_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const LATIN_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

pub const DIGITS: &str = "0123456789";

pub const ALPHANUMERIC: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// U+0020 through U+007E, then newline.
pub const ASCII_PRINTABLE: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@\
ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~\n";

pub const GREEK: &str = "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ";

/// Russian uppercase without Ё.
pub const CYRILLIC: &str = "АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";

pub const PORTUGUESE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ\
abcdefghijklmnopqrstuvwxyz\
áàâãéêíóôõúç\
ÁÀÂÃÉÊÍÓÔÕÚÇ\
0123456789 .,!?;:-";

/// Names accepted by [`by_name`], with their symbol sets.
pub const NAMED: &[(&str, &str)] = &[
    ("latin", LATIN_UPPER),
    ("lower", LATIN_LOWER),
    ("digits", DIGITS),
    ("alphanumeric", ALPHANUMERIC),
    ("ascii", ASCII_PRINTABLE),
    ("greek", GREEK),
    ("cyrillic", CYRILLIC),
    ("portuguese", PORTUGUESE),
];

/// Resolve a predefined set by name (case-insensitive).
///
/// `latin-upper` and `latin-lower` are accepted as aliases.
pub fn by_name(name: &str) -> EnigmaResult<Alphabet> {
    let key = name.trim().to_ascii_lowercase();
    let key = match key.as_str() {
        "latin-upper" => "latin",
        "latin-lower" => "lower",
        other => other,
    };
    NAMED
        .iter()
        .find(|(n, _)| *n == key)
        .ok_or_else(|| EnigmaError::UnknownAlphabet(name.to_string()))
        .and_then(|(_, symbols)| symbols.parse())
}
