//! Trial runner: encode, transmit, decode, record.
//!
//! Each trial draws a uniform information word, encodes it, pushes the
//! codeword through a `BitFlipChannel` at the full codeword width and decodes
//! what arrives. Trials share nothing except the random stream and the
//! returned `TrialStats`.

use crate::channel::{validate_probability, BitFlipChannel};
use crate::decoder::decode;
use crate::encoder::{check_bits, encode};
use crate::error::{ConfigError, Result};
use crate::poly::Gf2Poly;
use crate::stats::TrialStats;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Parameters of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialParams {
    /// Number of transmissions
    pub trials: u64,

    /// Generator polynomial shared by encoder and decoder
    pub generator: Gf2Poly,

    /// Information word width in bits
    pub word_bits: u32,

    /// Probability that a single bit arrives unchanged
    pub success_probability: f64,
}

impl TrialParams {
    /// Check every parameter before any trial runs.
    ///
    /// # Errors
    /// - `ConfigError::InvalidTrialCount` for zero trials
    /// - `ConfigError::ZeroGenerator` for a zero generator
    /// - `ConfigError::InvalidWordBits` for zero-width words
    /// - `ConfigError::WidthOverflow` if codewords exceed 64 bits
    /// - `ConfigError::InvalidProbability` outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrialCount.into());
        }
        self.codeword_width()?;
        validate_probability(self.success_probability)
    }

    /// Width of a codeword: information bits plus check bits.
    pub fn codeword_width(&self) -> Result<u32> {
        let r = check_bits(&self.generator)?;
        if self.word_bits == 0 {
            return Err(ConfigError::InvalidWordBits.into());
        }
        self.word_bits
            .checked_add(r)
            .filter(|width| *width <= 64)
            .ok_or_else(|| {
                ConfigError::WidthOverflow {
                    word_bits: self.word_bits,
                    check_bits: r,
                }
                .into()
            })
    }
}

impl Default for TrialParams {
    /// 1000 transmissions of 4-bit words under x^3 + x + 1 at p = 0.9.
    fn default() -> Self {
        Self {
            trials: 1000,
            generator: Gf2Poly::from_int(0b1011),
            word_bits: 4,
            success_probability: 0.9,
        }
    }
}

/// Run all trials drawing from `rng`.
///
/// Pass `&mut rng` to keep using the generator afterwards.
pub fn run_trials<R: Rng>(params: &TrialParams, rng: R) -> Result<TrialStats> {
    params.validate()?;
    let width = params.codeword_width()?;

    info!(
        "running {} trials: generator {}, {}-bit codewords, success probability {}",
        params.trials, params.generator, width, params.success_probability
    );

    let mut channel = BitFlipChannel::with_rng(params.success_probability, rng)?;
    let mut stats = TrialStats::new();

    for _ in 0..params.trials {
        let information_word = random_word(channel.rng_mut(), params.word_bits);
        let codeword = encode(&params.generator, information_word)?;
        let transmission = channel.transmit(codeword, width)?;
        let decoded = decode(&params.generator, transmission.word)?;
        stats.record(&transmission, &decoded);
    }

    let channel_stats = channel.stats();
    info!(
        "finished: {} of {} words corrupted, {} detected, bit error rate {:.4}",
        channel_stats.words_corrupted,
        channel_stats.words_sent,
        stats.errors_detected,
        stats.bit_error_rate()
    );

    Ok(stats)
}

/// Run all trials with a ChaCha8 RNG seeded from `seed`.
pub fn run_seeded(params: &TrialParams, seed: u64) -> Result<TrialStats> {
    run_trials(params, ChaCha8Rng::seed_from_u64(seed))
}

/// Uniform word in `[0, 2^bits)`.
fn random_word<R: Rng>(rng: &mut R, bits: u32) -> u64 {
    if bits >= 64 {
        rng.gen()
    } else {
        rng.gen_range(0..1u64 << bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, StatsError};

    #[test]
    fn test_default_params_valid() {
        let params = TrialParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.codeword_width().unwrap(), 7);
    }

    #[test]
    fn test_noiseless_run() {
        let params = TrialParams {
            success_probability: 1.0,
            ..TrialParams::default()
        };
        let stats = run_seeded(&params, 42).unwrap();

        assert_eq!(stats.trials, 1000);
        assert_eq!(stats.errors_sent, 0);
        assert_eq!(stats.errors_detected, 0);
        assert!(matches!(
            stats.detection_rate(),
            Err(Error::Stats(StatsError::NoErrorsSent))
        ));
    }

    #[test]
    fn test_noisy_run() {
        let stats = run_seeded(&TrialParams::default(), 7).unwrap();

        // P(at least one flip in 7 bits) = 1 - 0.9^7 ~ 0.52
        assert!(stats.errors_sent > 400 && stats.errors_sent < 650);
        assert!(stats.errors_detected <= stats.errors_sent);
        assert_eq!(
            stats.errors_sent,
            stats.errors_detected + stats.undetected_errors
        );
        let rate = stats.detection_rate().unwrap();
        assert!(rate > 0.5 && rate <= 1.0);
    }

    #[test]
    fn test_determinism() {
        let params = TrialParams::default();
        assert_eq!(run_seeded(&params, 99).unwrap(), run_seeded(&params, 99).unwrap());
    }

    #[test]
    fn test_borrowed_rng() {
        let params = TrialParams {
            trials: 10,
            ..TrialParams::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let first = run_trials(&params, &mut rng).unwrap();
        let second = run_trials(&params, &mut rng).unwrap();
        assert_eq!(first.trials + second.trials, 20);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let zero_trials = TrialParams {
            trials: 0,
            ..TrialParams::default()
        };
        assert!(matches!(
            run_seeded(&zero_trials, 0),
            Err(Error::Config(ConfigError::InvalidTrialCount))
        ));

        let zero_generator = TrialParams {
            generator: Gf2Poly::zero(),
            ..TrialParams::default()
        };
        assert!(matches!(
            run_seeded(&zero_generator, 0),
            Err(Error::Config(ConfigError::ZeroGenerator))
        ));

        let bad_probability = TrialParams {
            success_probability: 1.2,
            ..TrialParams::default()
        };
        assert!(matches!(
            run_seeded(&bad_probability, 0),
            Err(Error::Config(ConfigError::InvalidProbability(_)))
        ));

        let too_wide = TrialParams {
            word_bits: 62,
            ..TrialParams::default()
        };
        assert!(matches!(
            run_seeded(&too_wide, 0),
            Err(Error::Config(ConfigError::WidthOverflow { .. }))
        ));

        let huge_width = TrialParams {
            word_bits: u32::MAX,
            ..TrialParams::default()
        };
        assert!(matches!(
            huge_width.validate(),
            Err(Error::Config(ConfigError::WidthOverflow {
                word_bits: u32::MAX,
                check_bits: 3
            }))
        ));

        let zero_width = TrialParams {
            word_bits: 0,
            ..TrialParams::default()
        };
        assert!(matches!(
            run_seeded(&zero_width, 0),
            Err(Error::Config(ConfigError::InvalidWordBits))
        ));
    }

    #[test]
    fn test_full_width_words() {
        let params = TrialParams {
            trials: 50,
            generator: Gf2Poly::from_int(1),
            word_bits: 64,
            success_probability: 1.0,
        };
        let stats = run_seeded(&params, 3).unwrap();
        assert_eq!(stats.trials, 50);
        assert_eq!(stats.errors_detected, 0);
    }
}
