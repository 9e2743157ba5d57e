//! gapscope - command-line entry point
//!
//! Prints one JSON response per formula (or a text report with `--report`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use gapscope::utils::{logger, report};
use gapscope::{Config, PredictionResponse, Predictor};

/// Command-line arguments for gapscope
#[derive(Parser, Debug)]
#[command(name = "gapscope")]
#[command(about = "Predict band gap and electronic score from a chemical formula")]
#[command(version)]
struct Args {
    /// Settings file (defaults to the per-user config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding features.json, gatekeeper.json and specialist.json
    #[arg(short, long)]
    models: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print readiness and exit
    #[arg(long)]
    health: bool,

    /// Print a readable report instead of JSON
    #[arg(long)]
    report: bool,

    /// Chemical formulas, e.g. Fe2O3 NaCl
    #[arg(required_unless_present = "health")]
    formulas: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (mut config, config_msg) = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if let Some(dir) = &args.models {
        config.models_dir = dir.clone();
    }

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level.into()
    };
    if let Err(e) = logger::init(level) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::info!("{}", config_msg);
    log::debug!("Models directory: {}", config.models_dir.display());

    let predictor = Predictor::load(&config);

    if args.health {
        let health = predictor.health();
        match serde_json::to_string(&health) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode health: {}", e),
        }
        return exit_code(health.is_ready());
    }

    let results = predictor.predict_batch(&args.formulas);
    for (formula, outcome) in args.formulas.iter().zip(results) {
        if args.report {
            println!("{}", report::prediction_summary(formula, &outcome));
        } else {
            println!("{}", PredictionResponse::from(outcome).to_json());
        }
    }

    exit_code(predictor.is_ready())
}

fn exit_code(ready: bool) -> ExitCode {
    if ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
