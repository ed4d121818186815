use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Machine, SecurityLevel};
use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};
use crate::plugboard::Plugboard;
use crate::random::RandomSource;
use crate::reflector::{Reflector, ReflectorSpec};
use crate::rotor::{Rotor, RotorSpec};

/// Step-by-step construction of a [`Machine`].
///
/// Steps run in call order. Anything built from specs or from randomness
/// needs the alphabet to be set first; steps that can fail return
/// `EnigmaResult<Self>` so chains read with `?`.
///
/// ```
/// use enigmatic_core::{Machine, SecurityLevel, SeededRandom};
///
/// # fn main() -> Result<(), enigmatic_core::EnigmaError> {
/// let symbols: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZ".chars().collect();
/// let mut machine = Machine::builder()
///     .alphabet(&symbols)?
///     .random_settings(SecurityLevel::Medium, &mut SeededRandom::new(7))?
///     .build()?;
///
/// let ciphertext = machine.encrypt("HELLO")?;
/// machine.reset();
/// assert_eq!(machine.decrypt(&ciphertext)?, "HELLO");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MachineBuilder {
    alphabet: Option<Arc<Alphabet>>,
    rotors: Vec<Rotor>,
    reflector: Option<Reflector>,
    plugboard: Option<Plugboard>,
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the alphabet from `symbols`, in the given order.
    pub fn alphabet(self, symbols: &[char]) -> EnigmaResult<Self> {
        let alphabet = Alphabet::new(symbols)?;
        Ok(self.shared_alphabet(Arc::new(alphabet)))
    }

    /// Use an alphabet that prebuilt components already share.
    pub fn shared_alphabet(mut self, alphabet: Arc<Alphabet>) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Use prebuilt rotors, leftmost first.
    pub fn rotors(mut self, rotors: Vec<Rotor>) -> Self {
        self.rotors = rotors;
        self
    }

    pub fn reflector(mut self, reflector: Reflector) -> Self {
        self.reflector = Some(reflector);
        self
    }

    pub fn plugboard(mut self, plugboard: Plugboard) -> Self {
        self.plugboard = Some(plugboard);
        self
    }

    /// Build rotors from specs, leftmost first.
    pub fn rotor_specs(mut self, specs: &[RotorSpec]) -> EnigmaResult<Self> {
        let alphabet = self.require_alphabet()?;
        self.rotors = specs
            .iter()
            .map(|spec| Rotor::from_spec(spec, alphabet.clone()))
            .collect::<EnigmaResult<_>>()?;
        Ok(self)
    }

    pub fn reflector_spec(mut self, spec: &ReflectorSpec) -> EnigmaResult<Self> {
        let alphabet = self.require_alphabet()?;
        self.reflector = Some(Reflector::from_spec(spec, alphabet)?);
        Ok(self)
    }

    /// Wire the plugboard from a map listing both directions of each pair.
    pub fn plugboard_pairs(mut self, pairs: &BTreeMap<char, char>) -> EnigmaResult<Self> {
        let alphabet = self.require_alphabet()?;
        let mut plugboard = Plugboard::new(alphabet);
        plugboard.set_pairs_from_map(pairs)?;
        self.plugboard = Some(plugboard);
        Ok(self)
    }

    /// Set the starting position of every rotor configured so far.
    pub fn rotor_positions(mut self, positions: &[i64]) -> EnigmaResult<Self> {
        if positions.len() != self.rotors.len() {
            return Err(EnigmaError::PositionCount {
                expected: self.rotors.len(),
                actual: positions.len(),
            });
        }
        for (rotor, &position) in self.rotors.iter_mut().zip(positions) {
            rotor.set_position(position);
        }
        Ok(self)
    }

    pub fn random_rotor_positions<R: RandomSource + ?Sized>(
        mut self,
        rng: &mut R,
    ) -> EnigmaResult<Self> {
        let size = self.require_alphabet()?.size();
        for rotor in &mut self.rotors {
            rotor.set_position(rng.below(size)? as i64);
        }
        Ok(self)
    }

    /// Replace rotors, reflector and plugboard with random components sized
    /// by `level`. Rotor positions and ring settings are random too.
    pub fn random_settings<R: RandomSource + ?Sized>(
        self,
        level: SecurityLevel,
        rng: &mut R,
    ) -> EnigmaResult<Self> {
        let size = self.require_alphabet()?.size();
        let pairs = level.plugboard_pairs().min(size / 2);
        self.random_components(level.rotor_count(), pairs, rng)
    }

    /// Like [`random_settings`](Self::random_settings) with explicit counts.
    /// Asking for more than `size / 2` plugboard pairs is an error here.
    pub fn random_components<R: RandomSource + ?Sized>(
        mut self,
        rotor_count: usize,
        plugboard_pairs: usize,
        rng: &mut R,
    ) -> EnigmaResult<Self> {
        let alphabet = self.require_alphabet()?;
        let size = alphabet.size();
        if rotor_count == 0 {
            return Err(EnigmaError::NoRotors);
        }

        let mut rotors = Vec::with_capacity(rotor_count);
        for i in 0..rotor_count {
            let mut rotor = Rotor::random(format!("R{}", i + 1), alphabet.clone(), rng)?;
            rotor.set_position(rng.below(size)? as i64);
            rotor.set_ring_setting(rng.below(size)? as i64);
            rotors.push(rotor);
        }

        let reflector = Reflector::random("UKW", alphabet.clone(), rng)?;

        let mut plugboard = Plugboard::new(alphabet);
        plugboard.random_pairs(plugboard_pairs, rng)?;

        self.rotors = rotors;
        self.reflector = Some(reflector);
        self.plugboard = Some(plugboard);
        Ok(self)
    }

    pub fn build(self) -> EnigmaResult<Machine> {
        let alphabet = self.require_alphabet()?;
        if self.rotors.is_empty() {
            return Err(EnigmaError::NoRotors);
        }
        let reflector = self
            .reflector
            .ok_or(EnigmaError::MissingComponent("reflector"))?;
        let plugboard = self
            .plugboard
            .unwrap_or_else(|| Plugboard::new(alphabet.clone()));

        Machine::assemble(alphabet, self.rotors, reflector, plugboard)
    }

    fn require_alphabet(&self) -> EnigmaResult<Arc<Alphabet>> {
        self.alphabet
            .clone()
            .ok_or(EnigmaError::MissingComponent("alphabet"))
    }
}
