//! Binary symmetric channel simulator.
//!
//! Every bit of a transmitted word is flipped independently: for each bit a
//! uniform draw in `[0, 1)` is taken, and a draw at or above the success
//! probability flips the bit.
//!
//! # Width
//!
//! The number of bits exposed to noise is passed explicitly on every call
//! and is never re-derived from the value. A codeword whose top bits happen
//! to be zero is still transmitted at full width, so its leading zeros can be
//! corrupted like any other bit.
//!
//! # Determinism
//!
//! `BitFlipChannel::new` seeds a ChaCha8 RNG from the configuration. Given
//! the same seed and inputs, outputs are bit-identical. Any other RNG can be
//! injected with `BitFlipChannel::with_rng`.

use crate::error::{ChannelError, ConfigError, Result};
use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration for channel simulation.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Probability that a single bit arrives unchanged [0.0, 1.0]
    pub success_probability: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// Create a configuration that never flips a bit.
    pub fn noiseless(seed: u64) -> Self {
        Self {
            success_probability: 1.0,
            seed,
        }
    }

    /// Check the success probability lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        validate_probability(self.success_probability)
    }
}

/// Reject probabilities outside [0, 1], NaN included.
pub fn validate_probability(probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability(probability).into())
    }
}

/// Outcome of pushing one word through the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transmission {
    /// Word as seen by the receiver
    pub word: u64,

    /// Number of bits the channel flipped
    pub flipped_bits: u32,

    /// Number of bits exposed to noise
    pub width: u32,
}

impl Transmission {
    /// Whether the channel introduced at least one bit error.
    pub fn any_flipped(&self) -> bool {
        self.flipped_bits > 0
    }
}

/// Channel simulator flipping bits independently.
///
/// # Thread Safety
/// Not thread-safe; use one instance per thread and merge the statistics.
#[derive(Debug)]
pub struct BitFlipChannel<R = ChaCha8Rng> {
    success_probability: f64,
    rng: R,

    // Statistics
    words_sent: u64,
    words_corrupted: u64,
}

impl BitFlipChannel<ChaCha8Rng> {
    /// Create a channel with a ChaCha8 RNG seeded from the configuration.
    pub fn new(config: ChannelConfig) -> Result<Self> {
        Self::with_rng(
            config.success_probability,
            ChaCha8Rng::seed_from_u64(config.seed),
        )
    }
}

impl<R: Rng> BitFlipChannel<R> {
    /// Create a channel drawing from the given random source.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidProbability` outside [0, 1].
    pub fn with_rng(success_probability: f64, rng: R) -> Result<Self> {
        validate_probability(success_probability)?;

        Ok(Self {
            success_probability,
            rng,
            words_sent: 0,
            words_corrupted: 0,
        })
    }

    /// Send a word of `width` bits through the channel.
    ///
    /// Bits are visited most-significant first, one draw per bit.
    ///
    /// # Errors
    /// - `ChannelError::InvalidWidth` if `width` is not in 1..=64
    /// - `ChannelError::WordTooWide` if `codeword` has bits set at or above `width`
    pub fn transmit(&mut self, codeword: u64, width: u32) -> Result<Transmission> {
        if width == 0 || width > 64 {
            return Err(ChannelError::InvalidWidth(width).into());
        }
        if width < 64 && codeword >> width != 0 {
            return Err(ChannelError::WordTooWide {
                word: codeword,
                width,
            }
            .into());
        }

        let mut word = codeword;
        let mut flipped_bits = 0;

        for bit in (0..width).rev() {
            let roll: f64 = self.rng.gen();
            if roll >= self.success_probability {
                word ^= 1u64 << bit;
                flipped_bits += 1;
                trace!("flipped bit {} of {:#x}", bit, codeword);
            }
        }

        self.words_sent += 1;
        if flipped_bits > 0 {
            self.words_corrupted += 1;
        }

        Ok(Transmission {
            word,
            flipped_bits,
            width,
        })
    }

    /// Mutable access to the random source, for callers sharing one stream.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            words_sent: self.words_sent,
            words_corrupted: self.words_corrupted,
        }
    }
}

/// Statistics about channel simulator behavior.
///
/// Bit-level counts live in `TrialStats`, built from each `Transmission`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Words pushed through the channel
    pub words_sent: u64,

    /// Words with at least one flipped bit
    pub words_corrupted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_noiseless_channel() {
        let mut channel = BitFlipChannel::new(ChannelConfig::noiseless(42)).unwrap();

        for word in 0..128 {
            let tx = channel.transmit(word, 7).unwrap();
            assert_eq!(tx.word, word);
            assert!(!tx.any_flipped());
        }

        let stats = channel.stats();
        assert_eq!(stats.words_sent, 128);
        assert_eq!(stats.words_corrupted, 0);
    }

    #[test]
    fn test_always_flip() {
        let config = ChannelConfig {
            success_probability: 0.0,
            seed: 7,
        };
        let mut channel = BitFlipChannel::new(config).unwrap();

        // Leading zeros are inside the width and get flipped too.
        let tx = channel.transmit(0b0000101, 7).unwrap();
        assert_eq!(tx.word, 0b1111010);
        assert_eq!(tx.flipped_bits, 7);
        assert!(tx.any_flipped());
    }

    #[test]
    fn test_full_width_word() {
        let config = ChannelConfig {
            success_probability: 0.0,
            seed: 1,
        };
        let mut channel = BitFlipChannel::new(config).unwrap();
        let tx = channel.transmit(u64::MAX, 64).unwrap();
        assert_eq!(tx.word, 0);
    }

    #[test]
    fn test_bit_error_rate() {
        let config = ChannelConfig {
            success_probability: 0.9,
            seed: 42,
        };
        let mut channel = BitFlipChannel::new(config).unwrap();

        let mut flipped = 0u64;
        for _ in 0..2000 {
            flipped += u64::from(channel.transmit(0, 10).unwrap().flipped_bits);
        }

        // 20000 bits at 10% flip probability
        let ber = flipped as f64 / 20000.0;
        assert!(ber > 0.08 && ber < 0.12, "bit error rate {}", ber);
    }

    #[test]
    fn test_determinism() {
        let config = ChannelConfig {
            success_probability: 0.7,
            seed: 12345,
        };

        let mut channel1 = BitFlipChannel::new(config).unwrap();
        let mut channel2 = BitFlipChannel::new(config).unwrap();

        for word in 0..50 {
            let tx1 = channel1.transmit(word, 8).unwrap();
            let tx2 = channel2.transmit(word, 8).unwrap();
            assert_eq!(tx1, tx2);
        }

        assert_eq!(channel1.stats(), channel2.stats());
    }

    #[test]
    fn test_invalid_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            let config = ChannelConfig {
                success_probability: p,
                seed: 0,
            };
            assert!(config.validate().is_err());
            assert!(matches!(
                BitFlipChannel::new(config),
                Err(Error::Config(ConfigError::InvalidProbability(_)))
            ));
        }
    }

    #[test]
    fn test_invalid_width() {
        let mut channel = BitFlipChannel::new(ChannelConfig::noiseless(0)).unwrap();

        assert!(matches!(
            channel.transmit(0, 0),
            Err(Error::Channel(ChannelError::InvalidWidth(0)))
        ));
        assert!(matches!(
            channel.transmit(0, 65),
            Err(Error::Channel(ChannelError::InvalidWidth(65)))
        ));
        assert!(matches!(
            channel.transmit(0b1000, 3),
            Err(Error::Channel(ChannelError::WordTooWide { .. }))
        ));
        assert_eq!(channel.stats().words_sent, 0);
    }
}
