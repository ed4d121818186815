//! Wirings of the wartime Enigma rotors and reflectors, and the M3 and M4
//! machines built from them.

use crate::alphabets::LATIN_UPPER;
use crate::error::EnigmaResult;
use crate::machine::Machine;
use crate::reflector::ReflectorSpec;
use crate::rotor::RotorSpec;

/// A fixed wiring over the Latin uppercase alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    pub id: &'static str,
    pub mapping: &'static str,
    pub notches: &'static [char],
}

impl Wiring {
    /// Rotor spec at position A, ring setting A.
    pub fn rotor_spec(&self) -> RotorSpec {
        RotorSpec {
            id: self.id.to_string(),
            forward_mapping: self.mapping.to_string(),
            notches: self.notches.to_vec(),
            position: 0,
            ring_setting: 0,
        }
    }

    pub fn reflector_spec(&self) -> ReflectorSpec {
        ReflectorSpec {
            id: self.id.to_string(),
            mapping: self.mapping.to_string(),
        }
    }
}

pub const ROTOR_I: Wiring = Wiring {
    id: "I",
    mapping: "EKMFLGDQVZNTOWYHXUSPAIBRCJ",
    notches: &['Q'],
};
pub const ROTOR_II: Wiring = Wiring {
    id: "II",
    mapping: "AJDKSIRUXBLHWTMCQGZNPYFVOE",
    notches: &['E'],
};
pub const ROTOR_III: Wiring = Wiring {
    id: "III",
    mapping: "BDFHJLCPRTXVZNYEIWGAKMUSQO",
    notches: &['V'],
};
pub const ROTOR_IV: Wiring = Wiring {
    id: "IV",
    mapping: "ESOVPZJAYQUIRHXLNFTGKDCMWB",
    notches: &['J'],
};
pub const ROTOR_V: Wiring = Wiring {
    id: "V",
    mapping: "VZBRGITYUPSDNHLXAWMJQOFECK",
    notches: &['Z'],
};
pub const ROTOR_VI: Wiring = Wiring {
    id: "VI",
    mapping: "JPGVOUMFYQBENHZRDKASXLICTW",
    notches: &['Z', 'M'],
};
pub const ROTOR_VII: Wiring = Wiring {
    id: "VII",
    mapping: "NZJHGRCXMYSWBOUFAIVLPEKQDT",
    notches: &['Z', 'M'],
};
pub const ROTOR_VIII: Wiring = Wiring {
    id: "VIII",
    mapping: "FKQHTLXOCBJSPDZRAMEWNIUYGV",
    notches: &['Z', 'M'],
};

// Naval thin rotors never drive a neighbour
pub const ROTOR_BETA: Wiring = Wiring {
    id: "Beta",
    mapping: "LEYJVCNIXWPBQMDRTAKZGFUHOS",
    notches: &[],
};
pub const ROTOR_GAMMA: Wiring = Wiring {
    id: "Gamma",
    mapping: "FSOKANUERHMBTIYCWLQPZXVGJD",
    notches: &[],
};

pub const REFLECTOR_A: Wiring = Wiring {
    id: "A",
    mapping: "EJMZALYXVBWFCRQUONTSPIKHGD",
    notches: &[],
};
pub const REFLECTOR_B: Wiring = Wiring {
    id: "B",
    mapping: "YRUHQSLDPXNGOKMIEBFZCWVJAT",
    notches: &[],
};
pub const REFLECTOR_C: Wiring = Wiring {
    id: "C",
    mapping: "FVPJIAOYEDRZXWGCTKUQSBNMHL",
    notches: &[],
};
pub const REFLECTOR_B_THIN: Wiring = Wiring {
    id: "B-Thin",
    mapping: "ENKQAUYWJICOPBLMDXZVFTHRGS",
    notches: &[],
};
pub const REFLECTOR_C_THIN: Wiring = Wiring {
    id: "C-Thin",
    mapping: "RDOBJNTKVEHMLFCWZAXGYIPSUQ",
    notches: &[],
};

pub const ROTORS: &[Wiring] = &[
    ROTOR_I,
    ROTOR_II,
    ROTOR_III,
    ROTOR_IV,
    ROTOR_V,
    ROTOR_VI,
    ROTOR_VII,
    ROTOR_VIII,
    ROTOR_BETA,
    ROTOR_GAMMA,
];

pub const REFLECTORS: &[Wiring] = &[
    REFLECTOR_A,
    REFLECTOR_B,
    REFLECTOR_C,
    REFLECTOR_B_THIN,
    REFLECTOR_C_THIN,
];

/// Build a Latin-uppercase machine from historical wirings, leftmost rotor first.
pub fn machine(rotors: &[Wiring], reflector: &Wiring) -> EnigmaResult<Machine> {
    let symbols: Vec<char> = LATIN_UPPER.chars().collect();
    let specs: Vec<RotorSpec> = rotors.iter().map(Wiring::rotor_spec).collect();
    Machine::builder()
        .alphabet(&symbols)?
        .rotor_specs(&specs)?
        .reflector_spec(&reflector.reflector_spec())?
        .build()
}

/// Army/Navy M3: rotors I, II, III with reflector B, all at A.
pub fn enigma_m3() -> EnigmaResult<Machine> {
    machine(&[ROTOR_I, ROTOR_II, ROTOR_III], &REFLECTOR_B)
}

/// Naval M4: Beta, I, II, III with the thin B reflector, all at A.
pub fn enigma_m4() -> EnigmaResult<Machine> {
    machine(&[ROTOR_BETA, ROTOR_I, ROTOR_II, ROTOR_III], &REFLECTOR_B_THIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::reflector::validate_mapping;

    #[test]
    fn test_m3_known_answer() {
        let mut m3 = enigma_m3().unwrap();
        assert_eq!(m3.encrypt("AAAAA").unwrap(), "BDZGO");
        assert_eq!(m3.current_rotor_positions(), vec![0, 0, 5]);
    }

    #[test]
    fn test_m3_reciprocal() {
        let mut m3 = enigma_m3().unwrap();
        let cipher = m3.encrypt("HELLOWORLD").unwrap();
        assert_eq!(cipher, "ILBDAAMTAZ");
        m3.reset();
        assert_eq!(m3.decrypt(&cipher).unwrap(), "HELLOWORLD");
    }

    #[test]
    fn test_m4_roundtrip() {
        let mut m4 = enigma_m4().unwrap();
        assert_eq!(m4.rotor_count(), 4);
        let cipher = m4.encrypt("WETTERBERICHT").unwrap();
        m4.reset();
        assert_eq!(m4.decrypt(&cipher).unwrap(), "WETTERBERICHT");
    }

    #[test]
    fn test_all_reflectors_valid() {
        let alphabet: Alphabet = LATIN_UPPER.parse().unwrap();
        for reflector in REFLECTORS {
            assert!(
                validate_mapping(&alphabet, reflector.mapping).is_ok(),
                "{}",
                reflector.id
            );
        }
    }

    #[test]
    fn test_all_rotors_build() {
        for rotor in ROTORS {
            assert!(machine(&[*rotor], &REFLECTOR_B).is_ok(), "{}", rotor.id);
        }
    }
}
