//! # enigmatic-core: A Unicode Enigma Machine
//!
//! This crate simulates a rotor cipher machine in the style of the wartime
//! Enigma, generalized to any finite set of Unicode symbols.
//!
//! ## Features
//!
//! - **Any alphabet**: Latin, Greek, Cyrillic, emoji, or a set detected from sample text
//! - **Classical mechanics**: ring settings, notches and double stepping
//! - **Reciprocal**: the same machine state encrypts and decrypts
//! - **Key files**: versioned JSON snapshots of the full machine state
//! - **Injected randomness**: OS-backed by default, seeded for reproducible tests
//!
//! ## Example: Historical M3
//!
//! ```rust
//! use enigmatic_core::historical;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut m3 = historical::enigma_m3()?;
//! assert_eq!(m3.encrypt("AAAAA")?, "BDZGO");
//!
//! m3.reset();
//! assert_eq!(m3.decrypt("BDZGO")?, "AAAAA");
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Key Files
//!
//! ```rust
//! use enigmatic_core::{Machine, SecureRandom, SecurityLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sender = Machine::from_text("Привет, мир!", SecurityLevel::High, &mut SecureRandom)?;
//! let key = sender.to_json()?;
//! let ciphertext = sender.encrypt("Привет, мир!")?;
//!
//! let mut receiver = Machine::from_json(&key)?;
//! assert_eq!(receiver.decrypt(&ciphertext)?, "Привет, мир!");
//! # Ok(())
//! # }
//! ```
//!
//! ## Security
//!
//! This is a historical cipher. It is broken by well-known techniques and
//! must not protect anything that matters.

pub mod alphabet;
pub mod alphabets;
pub mod convenience;
pub mod detect;
pub mod error;
pub mod historical;
pub mod machine;
pub mod plugboard;
pub mod random;
pub mod reflector;
pub mod rotor;
pub mod settings;

// Re-exports for convenience
pub use alphabet::Alphabet;
pub use convenience::{decrypt_with_config, quick_encrypt};
pub use detect::{detect, DetectOptions};
pub use error::{EnigmaError, EnigmaResult};
pub use machine::{Baseline, Machine, MachineBuilder, SecurityLevel};
pub use plugboard::Plugboard;
pub use random::{RandomSource, SecureRandom, SeededRandom};
pub use reflector::{Reflector, ReflectorSpec};
pub use rotor::{Rotor, RotorSpec};
pub use settings::{Metadata, Settings, SCHEMA_VERSION};
