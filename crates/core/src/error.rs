//! Error types for the crc-sim system.
//!
//! All operations return structured errors rather than panicking, and every
//! configuration problem is reported before the first trial runs.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Polynomial: GF(2) arithmetic preconditions
/// - Codec: bit string and integer conversions
/// - Config: generator, probability and width validation
/// - Channel: transmission width problems
/// - Stats: rates that are undefined for the collected counts
#[derive(Debug, Error)]
pub enum Error {
    /// GF(2) polynomial arithmetic failed (e.g., division by zero)
    #[error("polynomial error: {0}")]
    Polynomial(#[from] PolynomialError),

    /// Bit conversion failed (e.g., malformed bit string)
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Invalid simulation configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Channel could not transmit the word as requested
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Statistic is undefined for the accumulated counts
    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),
}

/// GF(2) polynomial errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// Divisor has no terms
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// Polynomial would need more coefficients than the 64-bit representation holds
    #[error("polynomial with {terms} coefficients exceeds the maximum of 64")]
    TooManyTerms { terms: usize },
}

/// Bit conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Character other than '0', '1' or '_' in a bit string
    #[error("invalid character {ch:?} at position {position} in bit string")]
    InvalidBitChar { ch: char, position: usize },

    /// Bit string contained no bits
    #[error("empty bit string")]
    Empty,

    /// More bits than fit in a u64
    #[error("{bits} bits do not fit in a 64-bit word")]
    TooManyBits { bits: usize },
}

/// Configuration errors, all fatal before any trial runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Generator polynomial is zero (degree -1)
    #[error("generator polynomial must have at least one term")]
    ZeroGenerator,

    /// Probability outside [0, 1] or NaN
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// Trial count must be at least 1
    #[error("number of transmissions must be at least 1")]
    InvalidTrialCount,

    /// Information words need at least one bit
    #[error("information word width must be at least 1 bit")]
    InvalidWordBits,

    /// Information word plus check bits exceed 64 bits
    #[error("{word_bits} information bits plus {check_bits} check bits exceed 64 bits")]
    WidthOverflow { word_bits: u32, check_bits: u32 },

    /// Too many information bits to enumerate every codeword
    #[error("cannot enumerate codewords of {word_bits} information bits (max {max})")]
    WordBitsTooLarge { word_bits: u32, max: u32 },
}

/// Channel errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Width outside 1..=64
    #[error("invalid transmission width {0} (must be 1-64)")]
    InvalidWidth(u32),

    /// Word has set bits above the transmission width
    #[error("word {word:#x} does not fit in {width} bits")]
    WordTooWide { word: u64, width: u32 },
}

/// Statistics errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Detection rate requested with no corrupted transmissions
    #[error("detection rate undefined: division by zero (no errors were sent)")]
    NoErrorsSent,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
