//! Value every row of an input CSV and write one result row per input
//!
//! Usage: value_batch --input companies.csv [--output valuation_output.csv]
//! Paths can also come from DCF_INPUT / DCF_OUTPUT.
//!
//! Input rows are validated all-or-nothing: a malformed or invalid row fails
//! the load before anything is valued. Once loaded, a row that fails
//! valuation (e.g. equal discount and growth rates) is reported in its
//! `error` column without stopping the rest.

use anyhow::{Context, Result};
use clap::Parser;
use dcf_valuation::input::load_inputs;
use dcf_valuation::{BatchRunner, ValuationConfig};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(version, about = "Batch DCF valuation from CSV")]
struct Args {
    /// Input CSV with camelCase headers and an optional `id` column
    #[arg(short, long, env = "DCF_INPUT")]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, env = "DCF_OUTPUT", default_value = "valuation_output.csv")]
    output: PathBuf,

    /// Return non-finite results instead of failing rows where discount rate equals growth rate
    #[arg(long)]
    allow_degenerate: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    println!("Loading inputs from {}...", args.input.display());
    let inputs = load_inputs(&args.input)
        .with_context(|| format!("Failed to load inputs from {}", args.input.display()))?;
    println!("Loaded {} inputs in {:?}", inputs.len(), start.elapsed());

    let config = if args.allow_degenerate {
        ValuationConfig::propagating()
    } else {
        ValuationConfig::default()
    };
    let runner = BatchRunner::new(config);
    let outcomes = runner.run(&inputs);

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create output file {}", args.output.display()))?;
    BatchRunner::write_csv(&outcomes, file)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Output written to {}", args.output.display());

    let failed: Vec<_> = outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (&o.id, e))).collect();
    let total_value: f64 = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|r| r.total_valuation)
        .sum();

    println!("\nBatch Summary:");
    println!("  Inputs:          {}", outcomes.len());
    println!("  Valued:          {}", outcomes.len() - failed.len());
    println!("  Failed:          {}", failed.len());
    println!("  Sum of Totals:   {:.2}", total_value);
    for (id, err) in &failed {
        println!("    {}: {}", id, err);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
