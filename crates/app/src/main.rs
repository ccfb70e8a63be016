//! crc-sim: run the CRC error-detection experiment and report the results.

mod config;

use config::Config;
use crc_sim_core::encoder::minimum_distance;
use crc_sim_core::sim::run_seeded;
use crc_sim_core::stats::Report;
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    if let Err(e) = run(&config) {
        error!("simulation aborted: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> crc_sim_core::Result<()> {
    let params = &config.params;
    params.validate()?;
    let codeword_width = params.codeword_width()?;

    let hamming_distance = match config.hamming_distance {
        Some(d) => d,
        None => {
            let d = minimum_distance(&params.generator, params.word_bits)?;
            info!("computed minimum Hamming distance {}", d);
            d
        }
    };

    let bound = config.bound_params(codeword_width, hamming_distance)?;

    let stats = run_seeded(params, config.seed)?;

    let report = Report {
        generator: params.generator,
        word_bits: params.word_bits,
        codeword_width,
        success_probability: params.success_probability,
        stats,
        bound,
    };

    if config.export {
        println!("seed={}", config.seed);
        print!("{}", report.export_text());
    } else {
        println!("Seed: {}", config.seed);
        report.print_summary();
    }

    Ok(())
}
