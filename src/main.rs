use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cic_compensator::DesignOutcome;
use cic_compensator::config::{DesignConfig, FilterOverrides, StimulusOverrides, WindowKind};
use cic_compensator::output::{CoeffFormat, create_formatter, write_stimulus, write_text};

#[derive(Parser, Debug)]
#[command(name = "cic-compensator")]
#[command(about = "Design a CIC droop compensation FIR and generate a chirp test vector", long_about = None)]
struct Args {
    /// TOML design configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CIC decimation factor R
    #[arg(long)]
    decimation: Option<u32>,

    /// CIC order N
    #[arg(long)]
    order: Option<u32>,

    /// FIR tap count (odd)
    #[arg(long)]
    taps: Option<usize>,

    /// Coefficient bit width
    #[arg(long)]
    bits: Option<u32>,

    /// Passband edge as a fraction of Nyquist
    #[arg(long)]
    passband: Option<f64>,

    /// Points on the desired-gain grid
    #[arg(long)]
    grid_points: Option<usize>,

    /// Tapering window: hamming, hann, blackman, rectangular
    #[arg(long, value_enum)]
    window: Option<WindowKind>,

    /// Stimulus length in samples
    #[arg(long)]
    samples: Option<usize>,

    /// Stimulus output file
    #[arg(long, default_value = "../data/isop_input_chirp.txt")]
    stimulus_out: PathBuf,

    /// Coefficient table output file (stdout if omitted)
    #[arg(long)]
    coeffs_out: Option<PathBuf>,

    /// Coefficient table format: verilog, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "verilog")]
    format: CoeffFormat,

    /// Write a JSON design report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn build_config(args: &Args) -> Result<DesignConfig> {
    let base = match args.config {
        Some(ref path) => DesignConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DesignConfig::default(),
    };

    let filter = FilterOverrides {
        decimation: args.decimation,
        order: args.order,
        num_taps: args.taps,
        bit_width: args.bits,
        passband_edge: args.passband,
        grid_points: args.grid_points,
        window: args.window,
    }
    .apply(&base.filter)
    .context("Invalid filter parameters")?;

    let stimulus = StimulusOverrides {
        num_samples: args.samples,
        ..Default::default()
    }
    .apply(&base.stimulus)
    .context("Invalid stimulus parameters")?;

    Ok(DesignConfig { filter, stimulus })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    let outcome = DesignOutcome::run(&config).context("Compensator design failed")?;

    let table = create_formatter(args.format).format(&outcome.design.quantized);
    match args.coeffs_out {
        Some(ref path) => {
            write_text(path, &table).context("Failed to write coefficient table")?;
            eprintln!("Coefficients written to: {}", path.display());
        }
        None => print!("{}", table),
    }

    write_stimulus(&args.stimulus_out, &outcome.stimulus.samples)
        .context("Failed to write stimulus")?;
    eprintln!(
        "Stimulus ({} samples) written to: {}",
        outcome.stimulus.len(),
        args.stimulus_out.display()
    );

    if let Some(ref path) = args.report {
        let json = serde_json::to_string_pretty(&outcome.report())
            .context("Failed to serialize report")?;
        write_text(path, &json).context("Failed to write report")?;
        eprintln!("Report written to: {}", path.display());
    }

    let report = &outcome.verification.report;
    eprintln!(
        "Passband droop error: {:.2}% before, {:.2}% after compensation (max deviation {:.2}%)",
        report.droop_error_before * 100.0,
        report.droop_error_after * 100.0,
        report.max_passband_deviation * 100.0
    );
    if report.droop_error_after >= report.droop_error_before {
        log::warn!("Compensation did not reduce passband droop");
    }

    Ok(())
}
