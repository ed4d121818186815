//! Rotating substitution stages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};
use crate::random::{shuffle, RandomSource};

/// Serializable description of a rotor: wiring, notches and state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotorSpec {
    pub id: String,
    pub forward_mapping: String,
    #[serde(default)]
    pub notches: Vec<char>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub ring_setting: i64,
}

/// A single rotor: a fixed wiring permutation read through a moving offset.
///
/// The wiring maps contact `i` to `forward[i]`; `backward` is its inverse.
/// Position and ring setting shift which contact a given input meets, the
/// same way turning a physical rotor does.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Rotor {
    #[zeroize(skip)]
    id: String,
    #[zeroize(skip)]
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    backward: Vec<usize>,
    notches: Vec<usize>,
    position: usize,
    ring_setting: usize,
}

impl Rotor {
    /// Create a rotor from a mapping string.
    ///
    /// The i-th symbol of `forward_mapping` is where `alphabet[i]` is wired
    /// to. The mapping must be a permutation of the alphabet and every notch
    /// must be an alphabet symbol.
    pub fn new(
        id: impl Into<String>,
        alphabet: Arc<Alphabet>,
        forward_mapping: &str,
        notches: &[char],
    ) -> EnigmaResult<Self> {
        let size = alphabet.size();
        let mapping: Vec<char> = forward_mapping.chars().collect();
        if mapping.len() != size {
            return Err(EnigmaError::MappingLength {
                expected: size,
                actual: mapping.len(),
            });
        }

        let mut forward = vec![0; size];
        let mut backward = vec![0; size];
        let mut used = vec![false; size];
        for (i, &symbol) in mapping.iter().enumerate() {
            let out = alphabet
                .index_of(symbol)
                .map_err(|_| EnigmaError::InvalidMappingSymbol {
                    position: i,
                    symbol,
                })?;
            if used[out] {
                return Err(EnigmaError::NonBijective(symbol));
            }
            used[out] = true;
            forward[i] = out;
            backward[out] = i;
        }

        let notches = notches
            .iter()
            .map(|&n| alphabet.index_of(n).map_err(|_| EnigmaError::InvalidNotch(n)))
            .collect::<EnigmaResult<Vec<_>>>()?;

        Ok(Self {
            id: id.into(),
            alphabet,
            forward,
            backward,
            notches,
            position: 0,
            ring_setting: 0,
        })
    }

    /// Generate a rotor with a uniformly random wiring and 1-3 notches.
    pub fn random<R: RandomSource + ?Sized>(
        id: impl Into<String>,
        alphabet: Arc<Alphabet>,
        rng: &mut R,
    ) -> EnigmaResult<Self> {
        let mut mapping = alphabet.symbols().to_vec();
        shuffle(&mut mapping, rng)?;

        let size = alphabet.size();
        let notch_count = (rng.below(3)? + 1).min(size);
        let mut notch_positions: Vec<usize> = Vec::with_capacity(notch_count);
        while notch_positions.len() < notch_count {
            let pos = rng.below(size)?;
            if !notch_positions.contains(&pos) {
                notch_positions.push(pos);
            }
        }
        let notches: Vec<char> = notch_positions
            .iter()
            .map(|&p| alphabet.symbols()[p])
            .collect();

        let mapping: String = mapping.into_iter().collect();
        Self::new(id, alphabet, &mapping, &notches)
    }

    /// Build a rotor from its spec, applying position and ring setting.
    pub fn from_spec(spec: &RotorSpec, alphabet: Arc<Alphabet>) -> EnigmaResult<Self> {
        let mut rotor = Self::new(
            spec.id.clone(),
            alphabet,
            &spec.forward_mapping,
            &spec.notches,
        )?;
        rotor.set_position(spec.position);
        rotor.set_ring_setting(spec.ring_setting);
        Ok(rotor)
    }

    /// Reconstruct the spec, turning index tables back into symbols.
    pub fn to_spec(&self) -> RotorSpec {
        let symbols = self.alphabet.symbols();
        RotorSpec {
            id: self.id.clone(),
            forward_mapping: self.forward.iter().map(|&i| symbols[i]).collect(),
            notches: self.notches.iter().map(|&i| symbols[i]).collect(),
            position: self.position as i64,
            ring_setting: self.ring_setting as i64,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn size(&self) -> usize {
        self.forward.len()
    }

    pub fn notches(&self) -> &[usize] {
        &self.notches
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn ring_setting(&self) -> usize {
        self.ring_setting
    }

    /// Pass a signal from the entry side towards the reflector.
    pub fn forward(&self, input: usize) -> usize {
        self.through(&self.forward, input)
    }

    /// Pass a signal from the reflector side back out.
    pub fn backward(&self, input: usize) -> usize {
        self.through(&self.backward, input)
    }

    fn through(&self, table: &[usize], input: usize) -> usize {
        let n = self.size();
        if input >= n {
            return input;
        }
        let contact = (input + self.position + n - self.ring_setting) % n;
        (table[contact] + n - self.position + self.ring_setting) % n
    }

    pub fn is_at_notch(&self) -> bool {
        self.notches.contains(&self.position)
    }

    pub fn step(&mut self) {
        self.position = (self.position + 1) % self.size();
    }

    /// Set the position, wrapping any integer (negative included) into range.
    pub fn set_position(&mut self, position: i64) {
        self.position = normalize(position, self.size());
    }

    /// Set the ring setting, wrapping any integer (negative included) into range.
    pub fn set_ring_setting(&mut self, ring_setting: i64) {
        self.ring_setting = normalize(ring_setting, self.size());
    }
}

pub(crate) fn normalize(value: i64, size: usize) -> usize {
    value.rem_euclid(size as i64) as usize
}
