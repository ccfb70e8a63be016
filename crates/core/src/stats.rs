//! Detection statistics, the theoretical bound and the run report.
//!
//! `TrialStats` is a plain accumulator: each trial records into it, and
//! partial results from independent runs combine with `merge`. Nothing is
//! global, so runs are reproducible and could be split across workers.

use crate::channel::{validate_probability, Transmission};
use crate::decoder::Decoded;
use crate::error::{Result, StatsError};
use crate::poly::Gf2Poly;

/// Counters accumulated over a series of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialStats {
    /// Trials run
    pub trials: u64,

    /// Trials where the channel flipped at least one bit
    pub errors_sent: u64,

    /// Trials where the syndrome was non-zero
    pub errors_detected: u64,

    /// Corrupted trials whose syndrome was zero
    pub undetected_errors: u64,

    /// Bits exposed to noise
    pub bits_sent: u64,

    /// Bits flipped by the channel
    pub bits_flipped: u64,
}

impl TrialStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one trial.
    pub fn record(&mut self, transmission: &Transmission, decoded: &Decoded) {
        self.trials += 1;
        self.bits_sent += u64::from(transmission.width);
        self.bits_flipped += u64::from(transmission.flipped_bits);

        if transmission.any_flipped() {
            self.errors_sent += 1;
            if !decoded.error_detected {
                self.undetected_errors += 1;
            }
        }
        if decoded.error_detected {
            self.errors_detected += 1;
        }
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &TrialStats) {
        self.trials += other.trials;
        self.errors_sent += other.errors_sent;
        self.errors_detected += other.errors_detected;
        self.undetected_errors += other.undetected_errors;
        self.bits_sent += other.bits_sent;
        self.bits_flipped += other.bits_flipped;
    }

    /// Fraction of corrupted transmissions that were detected.
    ///
    /// # Errors
    /// Returns `StatsError::NoErrorsSent` when no transmission was corrupted,
    /// instead of producing NaN.
    pub fn detection_rate(&self) -> Result<f64> {
        if self.errors_sent == 0 {
            return Err(StatsError::NoErrorsSent.into());
        }
        Ok(self.errors_detected as f64 / self.errors_sent as f64)
    }

    /// Observed bit error rate (flipped / sent).
    pub fn bit_error_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}

/// Closed-form bound on error detection.
///
/// Sums, for `i` in `1..hamming_distance`, the term
/// `number_of_bits * p^i * (1-p)^(n-i) + i * p^i * (1-p)^(n-i)` with
/// `n = number_of_bits`. A distance of 0 or 1 gives an empty sum.
///
/// A word of `n` bits cannot hold more than `n` errors, so terms with
/// `i > n` are left out and every exponent stays non-negative.
pub fn theoretical_bound(probability: f64, hamming_distance: u32, number_of_bits: u32) -> f64 {
    let last = hamming_distance.saturating_sub(1).min(number_of_bits);
    let mut total = 0.0;

    for i in 1..=last {
        let term = probability.powf(f64::from(i))
            * (1.0 - probability).powf(f64::from(number_of_bits - i));
        total += f64::from(number_of_bits) * term + f64::from(i) * term;
    }

    total
}

/// Arguments of the theoretical bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundParams {
    pub probability: f64,
    pub hamming_distance: u32,
    pub number_of_bits: u32,
}

impl BoundParams {
    /// Check the probability lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        validate_probability(self.probability)
    }

    pub fn value(&self) -> f64 {
        theoretical_bound(self.probability, self.hamming_distance, self.number_of_bits)
    }
}

/// Everything printed at the end of a run.
#[derive(Debug, Clone)]
pub struct Report {
    pub generator: Gf2Poly,
    pub word_bits: u32,
    pub codeword_width: u32,
    pub success_probability: f64,
    pub stats: TrialStats,
    pub bound: BoundParams,
}

impl Report {
    /// Human-readable detection rate, `undefined` when no errors were sent.
    fn detection_rate_text(&self) -> String {
        match self.stats.detection_rate() {
            Ok(rate) => format!("{}", rate),
            Err(e) => format!("undefined ({})", e),
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Simulation Summary ===");
        println!(
            "Generator: {} ({} check bits, {}-bit codewords)",
            self.generator,
            self.codeword_width - self.word_bits,
            self.codeword_width
        );
        println!(
            "Based on {} random transmissions with a success probability of {} yielded an error detection rate of {}",
            self.stats.trials,
            self.success_probability,
            self.detection_rate_text()
        );
        println!("Total errors sent: {}", self.stats.errors_sent);
        println!("Total errors detected: {}", self.stats.errors_detected);
        println!("Undetected errors: {}", self.stats.undetected_errors);
        println!(
            "Bits flipped: {} of {} ({:.4})",
            self.stats.bits_flipped,
            self.stats.bits_sent,
            self.stats.bit_error_rate()
        );
        println!();
        println!(
            "Lower theoretical bound for error detection (p={}, d={}, n={}): {}",
            self.bound.probability,
            self.bound.hamming_distance,
            self.bound.number_of_bits,
            self.bound.value()
        );
    }

    /// Export the report as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        let rate = match self.stats.detection_rate() {
            Ok(rate) => format!("{:.6}", rate),
            Err(_) => "undefined".to_string(),
        };

        format!(
            "trials={}\n\
             success_probability={}\n\
             codeword_width={}\n\
             errors_sent={}\n\
             errors_detected={}\n\
             undetected_errors={}\n\
             detection_rate={}\n\
             bits_flipped={}\n\
             theoretical_bound={:e}\n",
            self.stats.trials,
            self.success_probability,
            self.codeword_width,
            self.stats.errors_sent,
            self.stats.errors_detected,
            self.stats.undetected_errors,
            rate,
            self.stats.bits_flipped,
            self.bound.value(),
        )
    }
}
