//! Injected randomness for key generation.
//!
//! Everything that draws random numbers takes a [`RandomSource`] argument.
//! [`SecureRandom`] reads the operating system generator and is the default
//! for real keys; [`SeededRandom`] is a separate, reproducible generator for
//! tests and fixed demo configurations.

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{EnigmaError, EnigmaResult};

/// A source of uniformly distributed bounded integers.
pub trait RandomSource {
    /// Produce the next raw 64-bit value.
    fn next_u64(&mut self) -> EnigmaResult<u64>;

    /// Produce a value uniformly distributed in `[0, upper)`.
    ///
    /// Uses rejection sampling so every value is equally likely.
    fn below(&mut self, upper: usize) -> EnigmaResult<usize> {
        if upper == 0 {
            return Err(EnigmaError::RandomSource(
                "upper bound must be positive".into(),
            ));
        }

        let upper = upper as u64;
        // 2^64 mod upper: values at or above 2^64 - rem would bias the result
        let rem = (u64::MAX % upper + 1) % upper;
        loop {
            let value = self.next_u64()?;
            if rem == 0 || value <= u64::MAX - rem {
                return Ok((value % upper) as usize);
            }
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> EnigmaResult<u64> {
        (**self).next_u64()
    }
}

/// Operating-system backed generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureRandom;

impl RandomSource for SecureRandom {
    fn next_u64(&mut self) -> EnigmaResult<u64> {
        let mut buf = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| EnigmaError::RandomSource(e.to_string()))?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Deterministic generator for reproducible configurations.
///
/// NOT SUITABLE FOR REAL KEYS: anyone who knows the seed can rebuild the
/// machine.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_u64(&mut self) -> EnigmaResult<u64> {
        Ok(self.rng.next_u64())
    }
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) -> EnigmaResult<()> {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}
