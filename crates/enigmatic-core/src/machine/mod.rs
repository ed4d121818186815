//! The cipher engine: rotor stack, reflector and plugboard driven as one
//! stateful character transform.

mod builder;
mod security;

pub use builder::MachineBuilder;
pub use security::SecurityLevel;

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;

/// Rotor positions a machine returns to on [`Machine::reset`].
///
/// Captured when the machine is built or restored from settings and never
/// changed by stepping or by [`Machine::set_rotor_positions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    positions: Vec<usize>,
}

impl Baseline {
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

/// A fully assembled cipher machine.
///
/// Encryption and decryption are the same operation: from the same rotor
/// positions, processing a ciphertext yields the plaintext back. Cloning
/// produces an independent machine that shares only the immutable alphabet.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Plugboard,
    baseline: Baseline,
}

impl Machine {
    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    /// Validate and assemble parts, capturing the current rotor positions as
    /// the baseline.
    pub(crate) fn assemble(
        alphabet: Arc<Alphabet>,
        rotors: Vec<Rotor>,
        reflector: Reflector,
        plugboard: Plugboard,
    ) -> EnigmaResult<Self> {
        if rotors.is_empty() {
            return Err(EnigmaError::NoRotors);
        }
        for rotor in &rotors {
            if !same_alphabet(rotor.alphabet(), &alphabet) {
                return Err(EnigmaError::AlphabetMismatch(format!("rotor {}", rotor.id())));
            }
        }
        if !same_alphabet(reflector.alphabet(), &alphabet) {
            return Err(EnigmaError::AlphabetMismatch(format!(
                "reflector {}",
                reflector.id()
            )));
        }
        if !same_alphabet(plugboard.alphabet(), &alphabet) {
            return Err(EnigmaError::AlphabetMismatch("plugboard".into()));
        }

        let baseline = Baseline {
            positions: rotors.iter().map(Rotor::position).collect(),
        };
        Ok(Self {
            alphabet,
            rotors,
            reflector,
            plugboard,
            baseline,
        })
    }

    pub fn encrypt(&mut self, plaintext: &str) -> EnigmaResult<String> {
        self.process_text(plaintext)
    }

    pub fn decrypt(&mut self, ciphertext: &str) -> EnigmaResult<String> {
        self.process_text(ciphertext)
    }

    fn process_text(&mut self, text: &str) -> EnigmaResult<String> {
        // Encode first so an invalid symbol fails before any rotor moves
        let indices = self.alphabet.encode(text)?;
        let alphabet = Arc::clone(&self.alphabet);
        let symbols = alphabet.symbols();

        let mut out = String::with_capacity(text.len());
        for index in indices {
            out.push(symbols[self.process_index(index)]);
        }
        Ok(out)
    }

    fn process_index(&mut self, input: usize) -> usize {
        self.step_rotors();

        let mut signal = self.plugboard.process(input);
        for rotor in self.rotors.iter().rev() {
            signal = rotor.forward(signal);
        }
        signal = self.reflector.reflect(signal);
        for rotor in &self.rotors {
            signal = rotor.backward(signal);
        }
        self.plugboard.process(signal)
    }

    fn step_rotors(&mut self) {
        let len = self.rotors.len();
        if len == 0 {
            return;
        }

        // Second-from-right rotor sitting on its notch steps again with its
        // left neighbour (the historical double step).
        let double_step = len >= 2 && self.rotors[len - 2].is_at_notch();

        self.rotors[len - 1].step();

        for i in (0..len - 1).rev() {
            if self.rotors[i + 1].is_at_notch() || (i == len - 2 && double_step) {
                self.rotors[i].step();
            } else {
                break;
            }
        }
    }

    /// Return rotor positions to the baseline. Wiring, ring settings and the
    /// plugboard are untouched.
    pub fn reset(&mut self) {
        for (rotor, &position) in self.rotors.iter_mut().zip(&self.baseline.positions) {
            rotor.set_position(position as i64);
        }
    }

    pub fn current_rotor_positions(&self) -> Vec<usize> {
        self.rotors.iter().map(Rotor::position).collect()
    }

    /// Move every rotor; the count must match the rotor count.
    pub fn set_rotor_positions(&mut self, positions: &[i64]) -> EnigmaResult<()> {
        if positions.len() != self.rotors.len() {
            return Err(EnigmaError::PositionCount {
                expected: self.rotors.len(),
                actual: positions.len(),
            });
        }
        for (rotor, &position) in self.rotors.iter_mut().zip(positions) {
            rotor.set_position(position);
        }
        Ok(())
    }

    pub fn rotor_count(&self) -> usize {
        self.rotors.len()
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.size()
    }

    pub fn plugboard_pair_count(&self) -> usize {
        self.plugboard.pair_count()
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }
}

fn same_alphabet(a: &Arc<Alphabet>, b: &Arc<Alphabet>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}
