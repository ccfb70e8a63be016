//! Polynomials over GF(2).
//!
//! A polynomial is stored as the bit pattern of a `u64`: bit `i` holds the
//! coefficient of `x^i`. Addition is XOR and every coefficient is already
//! reduced modulo 2, so there is nothing to normalize after an operation.
//!
//! # Example
//! ```
//! use crc_sim_core::poly::Gf2Poly;
//!
//! let generator = Gf2Poly::from_int(0b1011); // x^3 + x + 1
//! let word = Gf2Poly::from_int(0b0110000);
//! let remainder = word.modulo(&generator).unwrap();
//!
//! assert_eq!(generator.degree(), 3);
//! assert_eq!(remainder.to_int(), 0b001);
//! ```

use crate::error::{PolynomialError, Result};
use core::fmt;
use core::ops::Add;

/// Maximum number of coefficients a polynomial can carry.
pub const MAX_TERMS: usize = 64;

/// Polynomial with coefficients in GF(2).
///
/// Immutable: every operation returns a new polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gf2Poly {
    bits: u64,
}

impl Gf2Poly {
    /// The zero polynomial (degree -1).
    pub const fn zero() -> Self {
        Self { bits: 0 }
    }

    /// Create a polynomial from the bit pattern of an integer.
    pub const fn from_int(value: u64) -> Self {
        Self { bits: value }
    }

    /// Create a polynomial from little-endian coefficients.
    ///
    /// `bits[i]` is the coefficient of `x^i`. Zero coefficients past index 63
    /// are accepted and ignored.
    ///
    /// # Errors
    /// Returns `PolynomialError::TooManyTerms` if a set coefficient lies at
    /// index 64 or above.
    pub fn from_le_bits(bits: &[bool]) -> Result<Self> {
        let mut value = 0u64;
        for (i, &bit) in bits.iter().enumerate() {
            if !bit {
                continue;
            }
            if i >= MAX_TERMS {
                return Err(PolynomialError::TooManyTerms { terms: i + 1 }.into());
            }
            value |= 1u64 << i;
        }
        Ok(Self { bits: value })
    }

    /// Bit pattern of the coefficients.
    pub const fn to_int(self) -> u64 {
        self.bits
    }

    /// Highest exponent with a non-zero coefficient, or -1 for the zero polynomial.
    pub const fn degree(&self) -> i32 {
        if self.bits == 0 {
            -1
        } else {
            63 - self.bits.leading_zeros() as i32
        }
    }

    /// Whether every coefficient is zero.
    pub const fn is_zero(&self) -> bool {
        self.bits == 0
    }

    /// Coefficient of `x^exponent`.
    pub const fn coeff(&self, exponent: u32) -> bool {
        exponent < MAX_TERMS as u32 && (self.bits >> exponent) & 1 == 1
    }

    /// Number of non-zero coefficients.
    pub const fn weight(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Remainder of long division by `divisor`.
    ///
    /// While the dividend's degree is at least the divisor's, the divisor is
    /// shifted to line up with the leading term and XORed in. The dividend's
    /// degree strictly decreases each step, so the loop terminates.
    ///
    /// # Errors
    /// Returns `PolynomialError::DivisionByZero` if `divisor` is zero.
    pub fn modulo(&self, divisor: &Gf2Poly) -> Result<Gf2Poly> {
        let divisor_degree = divisor.degree();
        if divisor_degree < 0 {
            return Err(PolynomialError::DivisionByZero.into());
        }

        let mut remainder = *self;
        while remainder.degree() >= divisor_degree {
            let shift = remainder.degree() - divisor_degree;
            remainder.bits ^= divisor.bits << shift;
        }

        Ok(remainder)
    }
}

impl Add for Gf2Poly {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            bits: self.bits ^ rhs.bits,
        }
    }
}

impl fmt::Display for Gf2Poly {
    /// Renders highest degree first, e.g. `x^3 + x + 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for exponent in (0..=self.degree() as u32).rev() {
            if !self.coeff(exponent) {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match exponent {
                0 => write!(f, "1")?,
                1 => write!(f, "x")?,
                _ => write!(f, "x^{}", exponent)?,
            }
        }
        Ok(())
    }
}
