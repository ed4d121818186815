//! The fixed reflecting stage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, EnigmaResult};
use crate::random::{shuffle, RandomSource};

/// Serializable description of a reflector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectorSpec {
    pub id: String,
    pub mapping: String,
}

/// A reflector: a fixed-point-free involution over alphabet indices.
///
/// Every symbol is wired to a different symbol and the wiring is symmetric,
/// which is what makes the whole machine self-reciprocal.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Reflector {
    #[zeroize(skip)]
    id: String,
    #[zeroize(skip)]
    alphabet: Arc<Alphabet>,
    mapping: Vec<usize>,
}

impl Reflector {
    pub fn new(id: impl Into<String>, alphabet: Arc<Alphabet>, mapping: &str) -> EnigmaResult<Self> {
        let table = parse_mapping(&alphabet, mapping)?;
        Ok(Self {
            id: id.into(),
            alphabet,
            mapping: table,
        })
    }

    /// Generate a random reflector by pairing shuffled indices.
    pub fn random<R: RandomSource + ?Sized>(
        id: impl Into<String>,
        alphabet: Arc<Alphabet>,
        rng: &mut R,
    ) -> EnigmaResult<Self> {
        let size = alphabet.size();
        if size % 2 != 0 {
            return Err(EnigmaError::OddAlphabetSize(size));
        }

        let mut order: Vec<usize> = (0..size).collect();
        shuffle(&mut order, rng)?;

        let symbols = alphabet.symbols();
        let mut mapping = vec![' '; size];
        for pair in order.chunks_exact(2) {
            mapping[pair[0]] = symbols[pair[1]];
            mapping[pair[1]] = symbols[pair[0]];
        }

        let mapping: String = mapping.into_iter().collect();
        Self::new(id, alphabet, &mapping)
    }

    pub fn from_spec(spec: &ReflectorSpec, alphabet: Arc<Alphabet>) -> EnigmaResult<Self> {
        Self::new(spec.id.clone(), alphabet, &spec.mapping)
    }

    pub fn to_spec(&self) -> ReflectorSpec {
        let symbols = self.alphabet.symbols();
        ReflectorSpec {
            id: self.id.clone(),
            mapping: self.mapping.iter().map(|&i| symbols[i]).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn size(&self) -> usize {
        self.mapping.len()
    }

    pub fn reflect(&self, input: usize) -> usize {
        self.mapping.get(input).copied().unwrap_or(input)
    }
}

/// Check that `mapping` describes a valid reflector over `alphabet`.
pub fn validate_mapping(alphabet: &Alphabet, mapping: &str) -> EnigmaResult<()> {
    parse_mapping(alphabet, mapping).map(|_| ())
}

// Checks run in a fixed order: length, membership, self-mapping, duplicate
// targets, reciprocity. The last is needed because a permutation without
// fixed points is not necessarily an involution.
fn parse_mapping(alphabet: &Alphabet, mapping: &str) -> EnigmaResult<Vec<usize>> {
    let size = alphabet.size();
    let chars: Vec<char> = mapping.chars().collect();
    if chars.len() != size {
        return Err(EnigmaError::MappingLength {
            expected: size,
            actual: chars.len(),
        });
    }

    let symbols = alphabet.symbols();
    let mut table = vec![0; size];
    let mut used = vec![false; size];
    for (i, &symbol) in chars.iter().enumerate() {
        let out = alphabet
            .index_of(symbol)
            .map_err(|_| EnigmaError::InvalidMappingSymbol {
                position: i,
                symbol,
            })?;
        if out == i {
            return Err(EnigmaError::SelfMapping(symbol));
        }
        if used[out] {
            return Err(EnigmaError::DuplicateTarget(symbol));
        }
        used[out] = true;
        table[i] = out;
    }

    for (i, &out) in table.iter().enumerate() {
        if table[out] != i {
            return Err(EnigmaError::NonReciprocal {
                from: symbols[i],
                to: symbols[out],
                back: symbols[table[out]],
            });
        }
    }

    Ok(table)
}
