//! Configuration for the crc-sim application.
//!
//! Handles parsing command-line arguments. With zero arguments the run uses
//! the reference experiment: 1000 transmissions of 4-bit words protected by
//! x^3 + x + 1 over a channel that keeps each bit with probability 0.9.
//!
//! The seed is always resolved and printed so any run can be repeated.

use crc_sim_core::codec::{bits_to_poly, format_bits, parse_bit_string, poly_to_bits};
use crc_sim_core::sim::TrialParams;
use crc_sim_core::stats::BoundParams;

/// Complete configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Simulation ===
    /// Trial count, generator, word width and channel quality
    pub params: TrialParams,

    /// Random seed for determinism
    pub seed: u64,

    // === Bound ===
    /// Hamming distance for the bound (None = computed from the code)
    pub hamming_distance: Option<u32>,

    /// Probability for the bound (None = success probability)
    pub bound_probability: Option<f64>,

    /// Bit count for the bound (None = codeword width)
    pub bound_bits: Option<u32>,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print key=value lines instead of the summary
    pub export: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// Values are only parsed here; range checks happen in
    /// `TrialParams::validate` before the run starts.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut params = TrialParams::default();
        let mut seed: Option<u64> = None;
        let mut hamming_distance: Option<u32> = None;
        let mut bound_probability: Option<f64> = None;
        let mut bound_bits: Option<u32> = None;
        let mut print_config = false;
        let mut export = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--trials" | "-n" => {
                    params.trials = parse_value(args, &mut i, "--trials", "a number")?;
                }
                "--generator" | "-g" => {
                    let text: String = parse_value(args, &mut i, "--generator", "a bit string")?;
                    let bits = parse_bit_string(&text).map_err(|e| format!("invalid generator: {}", e))?;
                    params.generator = bits_to_poly(&bits).map_err(|e| format!("invalid generator: {}", e))?;
                }
                "--word-bits" => {
                    params.word_bits = parse_value(args, &mut i, "--word-bits", "a number")?;
                }
                "--success-probability" | "-p" => {
                    params.success_probability =
                        parse_value(args, &mut i, "--success-probability", "a probability")?;
                }
                "--seed" => {
                    seed = Some(parse_value(args, &mut i, "--seed", "a number")?);
                }
                "--hamming-distance" => {
                    hamming_distance = Some(parse_value(args, &mut i, "--hamming-distance", "a number")?);
                }
                "--bound-probability" => {
                    bound_probability = Some(parse_value(args, &mut i, "--bound-probability", "a probability")?);
                }
                "--bound-bits" => {
                    bound_bits = Some(parse_value(args, &mut i, "--bound-bits", "a number")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--export" => {
                    export = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            params,
            seed,
            hamming_distance,
            bound_probability,
            bound_bits,
            print_config,
            export,
        })
    }

    /// Resolve the bound arguments, filling unset ones from the run.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidProbability` if the bound probability is
    /// outside [0, 1].
    pub fn bound_params(
        &self,
        codeword_width: u32,
        hamming_distance: u32,
    ) -> crc_sim_core::Result<BoundParams> {
        let bound = BoundParams {
            probability: self
                .bound_probability
                .unwrap_or(self.params.success_probability),
            hamming_distance,
            number_of_bits: self.bound_bits.unwrap_or(codeword_width),
        };
        bound.validate()?;
        Ok(bound)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Transmissions: {}", self.params.trials);
        println!(
            "Generator: {} ({})",
            format_bits(&poly_to_bits(&self.params.generator)),
            self.params.generator
        );
        println!("Information word: {} bits", self.params.word_bits);
        println!("Success probability: {}", self.params.success_probability);
        println!("Seed: {}", self.seed);
        println!();
        println!("=== Bound ===");
        match self.hamming_distance {
            Some(d) => println!("Hamming distance: {}", d),
            None => println!("Hamming distance: (computed)"),
        }
        match self.bound_probability {
            Some(p) => println!("Probability: {}", p),
            None => println!("Probability: (success probability)"),
        }
        match self.bound_bits {
            Some(n) => println!("Bits: {}", n),
            None => println!("Bits: (codeword width)"),
        }
        println!();
    }
}

/// Consume the value following the flag at `args[*i]` and parse it.
fn parse_value<T: std::str::FromStr>(
    args: &[String],
    i: &mut usize,
    flag: &str,
    what: &str,
) -> Result<T, String> {
    *i += 1;
    let raw = args
        .get(*i)
        .ok_or_else(|| format!("{} requires {}", flag, what))?;
    raw.parse()
        .map_err(|_| format!("invalid value for {}: {}", flag, raw))
}

fn print_help() {
    println!("crc-sim: CRC error detection over a simulated noisy channel");
    println!();
    println!("USAGE:");
    println!("    crc-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --trials <N>                 Number of transmissions (default: 1000)");
    println!("    -g, --generator <BITS>           Generator polynomial bits, MSB first (default: 1011)");
    println!("        --word-bits <N>              Information word width (default: 4)");
    println!("    -p, --success-probability <P>    Per-bit success probability 0.0-1.0 (default: 0.9)");
    println!("        --seed <N>                   Random seed for determinism (default: time based)");
    println!();
    println!("        --hamming-distance <D>       Distance for the bound (default: computed)");
    println!("        --bound-probability <P>      Probability for the bound (default: success probability)");
    println!("        --bound-bits <N>             Bit count for the bound (default: codeword width)");
    println!();
    println!("        --print-config               Print resolved configuration");
    println!("        --export                     Print key=value lines instead of the summary");
    println!("    -h, --help                       Print this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG=debug                   Log every detected syndrome");
    println!();
    println!("EXAMPLES:");
    println!("    crc-sim                                   # Reference run");
    println!("    crc-sim --seed 42                         # Deterministic run");
    println!("    crc-sim -g 100000111 --word-bits 16       # CRC-8 over 16-bit words");
    println!("    crc-sim -p 1.0                            # Noiseless channel");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crc_sim_core::error::{ConfigError, Error};
    use crc_sim_core::Gf2Poly;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&[]).unwrap();
        assert_eq!(config.params, TrialParams::default());
        assert!(config.hamming_distance.is_none());
        assert!(!config.print_config);
        assert!(!config.export);
    }

    #[test]
    fn test_all_options() {
        let config = Config::from_args(&args(&[
            "--trials",
            "50",
            "--generator",
            "0b1_0011",
            "--word-bits",
            "8",
            "-p",
            "0.75",
            "--seed",
            "42",
            "--hamming-distance",
            "2",
            "--bound-probability",
            "0.1",
            "--bound-bits",
            "12",
            "--print-config",
            "--export",
        ]))
        .unwrap();

        assert_eq!(config.params.trials, 50);
        assert_eq!(config.params.generator, Gf2Poly::from_int(0b10011));
        assert_eq!(config.params.word_bits, 8);
        assert_eq!(config.params.success_probability, 0.75);
        assert_eq!(config.seed, 42);
        assert_eq!(config.hamming_distance, Some(2));
        assert_eq!(config.bound_probability, Some(0.1));
        assert_eq!(config.bound_bits, Some(12));
        assert!(config.print_config);
        assert!(config.export);
    }

    #[test]
    fn test_missing_value() {
        let err = Config::from_args(&args(&["--trials"])).unwrap_err();
        assert_eq!(err, "--trials requires a number");
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_args(&args(&["--trials", "many"])).is_err());
        assert!(Config::from_args(&args(&["--generator", "10x1"])).is_err());
        assert!(Config::from_args(&args(&["--unknown"])).is_err());
    }

    #[test]
    fn test_bound_params_defaults() {
        let config = Config::from_args(&[]).unwrap();
        let bound = config.bound_params(7, 3).unwrap();
        assert_eq!(bound.probability, 0.9);
        assert_eq!(bound.hamming_distance, 3);
        assert_eq!(bound.number_of_bits, 7);
    }

    #[test]
    fn test_bound_probability_rejected() {
        for value in ["1.5", "-0.1", "NaN"] {
            let config = Config::from_args(&args(&["--bound-probability", value])).unwrap();
            assert!(matches!(
                config.bound_params(7, 3),
                Err(Error::Config(ConfigError::InvalidProbability(_)))
            ));
        }
    }

    #[test]
    fn test_out_of_range_probability_parses() {
        // Range checks are left to TrialParams::validate.
        let config = Config::from_args(&args(&["-p", "1.5"])).unwrap();
        assert!(config.params.validate().is_err());
    }
}
