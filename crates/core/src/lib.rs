//! crc-sim-core: CRC error detection over a simulated noisy channel
//!
//! This library provides the core components for an experiment that:
//! - Encodes information words with a cyclic redundancy code over GF(2)
//! - Sends the codewords through a binary symmetric channel
//! - Checks each received word's syndrome to detect errors
//! - Compares the empirical detection rate with a closed-form bound
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `poly`: GF(2) polynomial arithmetic
//! - `codec`: integer, bit sequence and polynomial conversions
//! - `encoder`: codeword construction by polynomial division
//! - `channel`: bit-flip channel with seeded randomness
//! - `decoder`: syndrome check
//! - `stats`: trial counters, theoretical bound and report
//! - `sim`: trial runner tying the pipeline together
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Fail fast**: Configuration is validated before the first trial
//! - **Deterministic**: Seeded randomness makes runs reproducible
//! - **No globals**: Counters are returned to the caller, never shared state

pub mod channel;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod poly;
pub mod sim;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result};
pub use poly::Gf2Poly;
