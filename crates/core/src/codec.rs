//! Conversions between integers, bit sequences and GF(2) polynomials.
//!
//! Bit sequences are `Vec<bool>` in MSB-first order, the order they are
//! displayed and transmitted in. Polynomials keep the little-endian mapping
//! (bit `i` of the integer is the coefficient of `x^i`), so converting
//! between the two is always one of the named functions below and never an
//! implicit reversal.
//!
//! # Padding Rules
//! - `int_to_bits` and `poly_to_bits` use the minimum width; zero renders as
//!   a single `0` bit, never an empty sequence
//! - Callers that need a fixed width pad explicitly with `int_to_bits_width`
//!
//! # Example
//! ```
//! use crc_sim_core::codec::{bits_to_int, format_bits, int_to_bits};
//!
//! let bits = int_to_bits(0b1011);
//! assert_eq!(format_bits(&bits), "1011");
//! assert_eq!(bits_to_int(&bits).unwrap(), 0b1011);
//! ```

use crate::error::{CodecError, Result};
use crate::poly::Gf2Poly;

/// Number of bits needed to represent `value` (0 for zero).
pub const fn bit_length(value: u64) -> u32 {
    64 - value.leading_zeros()
}

/// Convert an integer to MSB-first bits of minimal width.
///
/// `0` yields `[false]`.
pub fn int_to_bits(value: u64) -> Vec<bool> {
    int_to_bits_width(value, bit_length(value).max(1))
}

/// Convert an integer to exactly `width` MSB-first bits.
///
/// Bits of `value` above `width` are dropped; missing high bits are zero.
pub fn int_to_bits_width(value: u64, width: u32) -> Vec<bool> {
    (0..width)
        .rev()
        .map(|i| i < 64 && (value >> i) & 1 == 1)
        .collect()
}

/// Interpret MSB-first bits as a big-endian integer.
///
/// # Errors
/// Returns `CodecError::TooManyBits` if more than 64 bits are given. An empty
/// slice is zero.
pub fn bits_to_int(bits: &[bool]) -> Result<u64> {
    if bits.len() > 64 {
        return Err(CodecError::TooManyBits { bits: bits.len() }.into());
    }

    Ok(bits
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
}

/// Render a polynomial as MSB-first bits, `degree + 1` long.
///
/// The zero polynomial renders as `[false]`.
pub fn poly_to_bits(poly: &Gf2Poly) -> Vec<bool> {
    let degree = poly.degree();
    if degree < 0 {
        return vec![false];
    }

    (0..=degree as u32).rev().map(|i| poly.coeff(i)).collect()
}

/// Build a polynomial from MSB-first bits.
///
/// The last bit is the constant term.
pub fn bits_to_poly(bits: &[bool]) -> Result<Gf2Poly> {
    let le: Vec<bool> = bits.iter().rev().copied().collect();
    Gf2Poly::from_le_bits(&le)
}

/// Parse a textual bit string such as `1011`, `0b1011` or `1_0011`.
///
/// # Errors
/// - `CodecError::InvalidBitChar` for anything other than `0`, `1` or `_`
/// - `CodecError::Empty` if no bits remain after the prefix and separators
pub fn parse_bit_string(text: &str) -> Result<Vec<bool>> {
    let trimmed = text.trim();
    let (offset, digits) = match trimmed.strip_prefix("0b") {
        Some(rest) => (2, rest),
        None => (0, trimmed),
    };

    let mut bits = Vec::with_capacity(digits.len());
    for (i, ch) in digits.chars().enumerate() {
        match ch {
            '0' => bits.push(false),
            '1' => bits.push(true),
            '_' => {}
            _ => {
                return Err(CodecError::InvalidBitChar {
                    ch,
                    position: i + offset,
                }
                .into())
            }
        }
    }

    if bits.is_empty() {
        return Err(CodecError::Empty.into());
    }

    Ok(bits)
}

/// Format MSB-first bits as a string of `0`/`1`.
pub fn format_bits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
