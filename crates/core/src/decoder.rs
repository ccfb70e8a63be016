//! Syndrome decoding.
//!
//! The received word is divided by the generator; a non-zero remainder (the
//! syndrome) means the word is not a codeword and an error was detected.
//! Decoding only detects. The information word is always recovered by
//! dropping the check bits, whether or not the syndrome is zero.

use crate::encoder::check_bits;
use crate::error::Result;
use crate::poly::Gf2Poly;
use log::debug;

/// Result of decoding a received word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Received word with the check bits stripped
    pub information_word: u64,

    /// Whether the syndrome was non-zero
    pub error_detected: bool,

    /// Remainder of the received word modulo the generator
    pub syndrome: Gf2Poly,
}

/// Decode a received word.
///
/// # Errors
/// Returns `ConfigError::ZeroGenerator` if the generator has no terms.
pub fn decode(generator: &Gf2Poly, received_word: u64) -> Result<Decoded> {
    let r = check_bits(generator)?;
    let syndrome = Gf2Poly::from_int(received_word).modulo(generator)?;
    let error_detected = !syndrome.is_zero();

    if error_detected {
        debug!(
            "error detected in {:#b}: syndrome {}",
            received_word, syndrome
        );
    }

    Ok(Decoded {
        information_word: received_word >> r,
        error_detected,
        syndrome,
    })
}
