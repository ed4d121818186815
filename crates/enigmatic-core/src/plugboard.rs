//! The plugboard (Steckerbrett): symmetric symbol swaps around the rotor stack.

use std::collections::BTreeMap;
use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};
use crate::random::{shuffle, RandomSource};

/// A partial involution over alphabet indices.
///
/// `wiring[i]` holds the partner of `i` when it is plugged. Wiring is always
/// kept symmetric and no index is ever its own partner.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Plugboard {
    #[zeroize(skip)]
    alphabet: Arc<Alphabet>,
    wiring: Vec<Option<usize>>,
}

impl Plugboard {
    /// Create a plugboard with no connections.
    pub fn new(alphabet: Arc<Alphabet>) -> Self {
        let wiring = vec![None; alphabet.size()];
        Self { alphabet, wiring }
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Connect `a` and `b`.
    pub fn add_pair(&mut self, a: char, b: char) -> EnigmaResult<()> {
        let ia = self.alphabet.index_of(a)?;
        let ib = self.alphabet.index_of(b)?;
        if ia == ib {
            return Err(EnigmaError::SelfPair(a));
        }
        if self.wiring[ia].is_some() {
            return Err(EnigmaError::AlreadyPaired(a));
        }
        if self.wiring[ib].is_some() {
            return Err(EnigmaError::AlreadyPaired(b));
        }

        self.wiring[ia] = Some(ib);
        self.wiring[ib] = Some(ia);
        Ok(())
    }

    /// Disconnect the pair that `symbol` belongs to.
    pub fn remove_pair(&mut self, symbol: char) -> EnigmaResult<()> {
        let idx = self.alphabet.index_of(symbol)?;
        let partner = self.wiring[idx].ok_or(EnigmaError::NotPaired(symbol))?;
        self.wiring[idx] = None;
        self.wiring[partner] = None;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.wiring.fill(None);
    }

    /// Swap `input` with its partner; unplugged and out-of-range indices pass through.
    pub fn process(&self, input: usize) -> usize {
        match self.wiring.get(input) {
            Some(Some(partner)) => *partner,
            _ => input,
        }
    }

    /// Replace all connections with `count` random pairs.
    pub fn random_pairs<R: RandomSource + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> EnigmaResult<()> {
        let size = self.wiring.len();
        let max = size / 2;
        if count > max {
            return Err(EnigmaError::TooManyPairs {
                requested: count,
                size,
                max,
            });
        }

        let mut order: Vec<usize> = (0..size).collect();
        shuffle(&mut order, rng)?;

        let mut wiring = vec![None; size];
        for pair in order.chunks_exact(2).take(count) {
            wiring[pair[0]] = Some(pair[1]);
            wiring[pair[1]] = Some(pair[0]);
        }
        self.wiring = wiring;
        Ok(())
    }

    /// Replace all connections from a symbol map.
    ///
    /// The map must list both directions of every pair (`a->b` and `b->a`).
    pub fn set_pairs_from_map(&mut self, pairs: &BTreeMap<char, char>) -> EnigmaResult<()> {
        let mut staged = Self::new(self.alphabet.clone());
        for (&a, &b) in pairs {
            if pairs.get(&b) != Some(&a) {
                return Err(EnigmaError::NonReciprocalPair { from: a, to: b });
            }
            let ia = staged.alphabet.index_of(a)?;
            let ib = staged.alphabet.index_of(b)?;
            // Already added from the other direction
            if staged.wiring[ia] == Some(ib) {
                continue;
            }
            staged.add_pair(a, b)?;
        }
        self.wiring = std::mem::take(&mut staged.wiring);
        Ok(())
    }

    pub fn pair_count(&self) -> usize {
        self.wiring.iter().flatten().count() / 2
    }

    /// Partner of `symbol`, if it is plugged.
    pub fn partner_of(&self, symbol: char) -> EnigmaResult<Option<char>> {
        let idx = self.alphabet.index_of(symbol)?;
        Ok(self.wiring[idx].map(|p| self.alphabet.symbols()[p]))
    }

    /// Each pair once, ordered by the position of its first symbol.
    pub fn pairs(&self) -> Vec<(char, char)> {
        let symbols = self.alphabet.symbols();
        self.wiring
            .iter()
            .enumerate()
            .filter_map(|(i, partner)| match partner {
                Some(p) if i < *p => Some((symbols[i], symbols[*p])),
                _ => None,
            })
            .collect()
    }

    /// Both directions of every pair, as stored in settings snapshots.
    pub fn pairs_map(&self) -> BTreeMap<char, char> {
        let symbols = self.alphabet.symbols();
        self.wiring
            .iter()
            .enumerate()
            .filter_map(|(i, partner)| partner.map(|p| (symbols[i], symbols[p])))
            .collect()
    }
}
