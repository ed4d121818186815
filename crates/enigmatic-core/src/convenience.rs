//! One-call constructors and helpers for common setups.

use crate::alphabets::LATIN_UPPER;
use crate::detect::{detect, normalize, DetectOptions};
use crate::error::EnigmaResult;
use crate::machine::{Machine, SecurityLevel};
use crate::random::RandomSource;

impl Machine {
    /// Detect the alphabet of `text` and generate random settings for it.
    ///
    /// The detected alphabet covers [`normalize`]`(text)`, so surrounding
    /// whitespace and `\r` in `text` itself may not be encryptable.
    pub fn from_text<R: RandomSource + ?Sized>(
        text: &str,
        level: SecurityLevel,
        rng: &mut R,
    ) -> EnigmaResult<Self> {
        let alphabet = detect(text, &DetectOptions::default())?;
        Machine::builder()
            .alphabet(alphabet.symbols())?
            .random_settings(level, rng)?
            .build()
    }

    /// Latin uppercase with [`SecurityLevel::Low`] settings.
    pub fn classic<R: RandomSource + ?Sized>(rng: &mut R) -> EnigmaResult<Self> {
        let symbols: Vec<char> = LATIN_UPPER.chars().collect();
        Machine::builder()
            .alphabet(&symbols)?
            .random_settings(SecurityLevel::Low, rng)?
            .build()
    }

    /// `symbols` with [`SecurityLevel::Medium`] settings.
    pub fn simple<R: RandomSource + ?Sized>(symbols: &[char], rng: &mut R) -> EnigmaResult<Self> {
        Machine::builder()
            .alphabet(symbols)?
            .random_settings(SecurityLevel::Medium, rng)?
            .build()
    }
}

/// Encrypt `text` on a fresh machine fitted to it.
///
/// Returns the ciphertext and the settings JSON captured before encryption,
/// which is what [`decrypt_with_config`] needs. The text is normalized first
/// (see [`normalize`]).
pub fn quick_encrypt<R: RandomSource + ?Sized>(
    text: &str,
    level: SecurityLevel,
    rng: &mut R,
) -> EnigmaResult<(String, String)> {
    let text = normalize(text);
    let mut machine = Machine::from_text(&text, level, rng)?;
    let config = machine.to_json()?;
    let ciphertext = machine.encrypt(&text)?;
    Ok((ciphertext, config))
}

pub fn decrypt_with_config(ciphertext: &str, config_json: &str) -> EnigmaResult<String> {
    let mut machine = Machine::from_json(config_json)?;
    machine.decrypt(ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnigmaError;
    use crate::random::SeededRandom;

    #[test]
    fn test_quick_roundtrip() {
        let mut rng = SeededRandom::new(1);
        let text = "Hoje eu fui almoçar na casa da vovó.";
        let (cipher, config) = quick_encrypt(text, SecurityLevel::High, &mut rng).unwrap();
        assert_ne!(cipher, text);
        assert_eq!(decrypt_with_config(&cipher, &config).unwrap(), text);
    }

    #[test]
    fn test_quick_encrypt_normalizes() {
        let mut rng = SeededRandom::new(2);
        let (cipher, config) =
            quick_encrypt("  line one\r\nline two\n", SecurityLevel::Low, &mut rng).unwrap();
        assert_eq!(decrypt_with_config(&cipher, &config).unwrap(), "line one\nline two");
    }

    #[test]
    fn test_quick_encrypt_empty() {
        assert!(matches!(
            quick_encrypt("", SecurityLevel::Low, &mut SeededRandom::new(3)),
            Err(EnigmaError::EmptyInput)
        ));
    }

    #[test]
    fn test_from_text_covers_input() {
        let machine =
            Machine::from_text("ΑΒΓ abc", SecurityLevel::Medium, &mut SeededRandom::new(4)).unwrap();
        assert_eq!(machine.alphabet_size() % 2, 0);
        assert_eq!(machine.alphabet().validate("ΑΒΓ abc"), None);
        assert_eq!(machine.rotor_count(), 5);
    }

    #[test]
    fn test_classic_and_simple() {
        let mut rng = SeededRandom::new(5);
        let classic = Machine::classic(&mut rng).unwrap();
        assert_eq!(classic.alphabet_size(), 26);
        assert_eq!(classic.rotor_count(), 3);

        let simple = Machine::simple(&['0', '1', '2', '3'], &mut rng).unwrap();
        assert_eq!(simple.plugboard_pair_count(), 2);
    }
}
