//! Seeded Gaussian noise augmentation.
//!
//! Each raw draw `mu` is expanded into several synthetic draws from
//! `Normal(mu, σ)`, smoothing the discreteness of the raw sample set before it
//! is binned.

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic noise generation.
///
/// A 128-bit seed initialising the PCG32 generator behind
/// [`NoiseAugmenter`]. The same seed over the same input reproduces every
/// output bit for bit.
///
/// Seeds are written as 32 lowercase hex digits. Parsing accepts 1 to 32 hex
/// digits, so short seeds like `2a` are valid on the command line.
///
/// # Example
///
/// ```
/// use enrich_stats::noise::NoiseSeed;
/// use rand::Rng as _;
///
/// let seed: NoiseSeed = rand::rng().random();
/// let parsed: NoiseSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
///
/// let short: NoiseSeed = "2a".parse().unwrap();
/// assert_eq!(short.to_string(), "0000000000000000000000000000002a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseSeed([u8; 16]);

impl From<u128> for NoiseSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl fmt::Display for NoiseSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed {input:?}: expected 1 to 32 hex digits")]
    InvalidHex { input: String },
}

impl FromStr for NoiseSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSeedError::InvalidHex {
            input: s.to_owned(),
        };
        if s.is_empty() || s.len() > 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| invalid())?;
        Ok(Self::from(num))
    }
}

impl Serialize for NoiseSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoiseSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `NoiseSeed` values with `rng.random()`.
impl Distribution<NoiseSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NoiseSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        NoiseSeed(seed)
    }
}

/// Generates the noise-augmented pool for one column of draws.
#[derive(Debug, Clone)]
pub struct NoiseAugmenter {
    rng: Pcg32,
    std_dev: f64,
}

impl NoiseAugmenter {
    /// Creates an augmenter drawing noise with standard deviation `std_dev`.
    #[must_use]
    pub fn new(seed: NoiseSeed, std_dev: f64) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            std_dev,
        }
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Replaces the contents of `pool` with `factor` noisy draws per sample.
    ///
    /// Draws are appended sample by sample, so the pool holds
    /// `factor * samples.len()` values afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_stats::noise::{NoiseAugmenter, NoiseSeed};
    ///
    /// let mut augmenter = NoiseAugmenter::new(NoiseSeed::from(7), 1.0);
    /// let mut pool = vec![];
    /// augmenter.augment_into(&[10.0, 20.0], 100, &mut pool);
    /// assert_eq!(pool.len(), 200);
    /// assert!(pool[..100].iter().all(|v| (v - 10.0).abs() < 10.0));
    /// assert!(pool[100..].iter().all(|v| (v - 20.0).abs() < 10.0));
    /// ```
    pub fn augment_into(&mut self, samples: &[f64], factor: usize, pool: &mut Vec<f64>) {
        pool.clear();
        pool.reserve(samples.len() * factor);
        for &mu in samples {
            pool.extend((0..factor).map(|_| {
                let z: f64 = self.rng.sample(StandardNormal);
                mu + self.std_dev * z
            }));
        }
    }
}
