//! CRC encoding by polynomial division.
//!
//! The information word is shifted left by `r` (the generator's degree) to
//! make room for the check bits, divided by the generator over GF(2), and the
//! remainder is ORed into the freed low bits:
//!
//! ```text
//! codeword = (info << r) | ((info << r) mod g)
//! ```
//!
//! Every codeword is therefore a multiple of the generator, which is what the
//! decoder's syndrome check relies on.

use crate::codec::bit_length;
use crate::error::{ConfigError, Result};
use crate::poly::Gf2Poly;

/// Largest information width for which `minimum_distance` enumerates codewords.
pub const MAX_ENUMERABLE_WORD_BITS: u32 = 20;

/// Number of check bits `r` contributed by a generator.
///
/// # Errors
/// Returns `ConfigError::ZeroGenerator` for the zero polynomial.
pub fn check_bits(generator: &Gf2Poly) -> Result<u32> {
    let degree = generator.degree();
    if degree < 0 {
        return Err(ConfigError::ZeroGenerator.into());
    }
    Ok(degree as u32)
}

/// Encode an information word into a codeword.
///
/// # Errors
/// - `ConfigError::ZeroGenerator` if the generator has no terms
/// - `ConfigError::WidthOverflow` if the codeword would not fit in 64 bits
pub fn encode(generator: &Gf2Poly, information_word: u64) -> Result<u64> {
    let r = check_bits(generator)?;
    let word_bits = bit_length(information_word);
    if word_bits + r > 64 {
        return Err(ConfigError::WidthOverflow {
            word_bits,
            check_bits: r,
        }
        .into());
    }

    // Low r bits of `padded` are zero; the remainder has degree < r.
    let padded = information_word << r;
    let remainder = Gf2Poly::from_int(padded).modulo(generator)?;

    Ok(padded | remainder.to_int())
}

/// Minimum Hamming distance of the code over `word_bits`-bit information words.
///
/// The code is linear, so this equals the smallest weight of any non-zero
/// codeword. Enumerates all `2^word_bits - 1` non-zero words.
///
/// # Errors
/// - `ConfigError::InvalidWordBits` if `word_bits` is zero
/// - `ConfigError::WordBitsTooLarge` above `MAX_ENUMERABLE_WORD_BITS`
/// - `ConfigError::WidthOverflow` if codewords would exceed 64 bits
pub fn minimum_distance(generator: &Gf2Poly, word_bits: u32) -> Result<u32> {
    if word_bits == 0 {
        return Err(ConfigError::InvalidWordBits.into());
    }
    if word_bits > MAX_ENUMERABLE_WORD_BITS {
        return Err(ConfigError::WordBitsTooLarge {
            word_bits,
            max: MAX_ENUMERABLE_WORD_BITS,
        }
        .into());
    }

    let mut min_weight = u32::MAX;
    for word in 1..(1u64 << word_bits) {
        let codeword = encode(generator, word)?;
        min_weight = min_weight.min(codeword.count_ones());
    }

    Ok(min_weight)
}
