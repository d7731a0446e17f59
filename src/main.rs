//! DCF Valuation CLI
//!
//! Values a single business from command-line flags or a JSON input file

use anyhow::{Context, Result};
use clap::Parser;
use dcf_valuation::{ValuationConfig, ValuationEngine, ValuationInput, ValuationResult};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, allow_negative_numbers = true)]
struct Cli {
    /// JSON file holding a ValuationInput record (replaces the field flags)
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(long, required_unless_present = "input")]
    revenue: Option<f64>,

    #[arg(long, required_unless_present = "input")]
    operating_expenses: Option<f64>,

    /// Reported EBITDA (recorded, not used; EBITDA is derived)
    #[arg(long, default_value_t = 0.0)]
    ebitda: f64,

    /// Reported net income (recorded, not used)
    #[arg(long, default_value_t = 0.0)]
    net_income: f64,

    /// Fractional growth rate, e.g. 0.03
    #[arg(long, required_unless_present = "input")]
    growth_rate: Option<f64>,

    /// Fractional discount rate, e.g. 0.10
    #[arg(long, required_unless_present = "input")]
    discount_rate: Option<f64>,

    #[arg(long, required_unless_present = "input")]
    tax_rate: Option<f64>,

    #[arg(long, required_unless_present = "input")]
    working_capital: Option<f64>,

    #[arg(long, required_unless_present = "input")]
    capex: Option<f64>,

    /// Return non-finite results instead of failing when discount rate equals growth rate
    #[arg(long)]
    allow_degenerate: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn valuation_input(&self) -> Result<ValuationInput> {
        let input = match &self.input {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read input file: {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse input file: {}", path.display()))?
            }
            None => ValuationInput {
                revenue: required(self.revenue, "revenue")?,
                operating_expenses: required(self.operating_expenses, "operating-expenses")?,
                ebitda: self.ebitda,
                net_income: self.net_income,
                growth_rate: required(self.growth_rate, "growth-rate")?,
                discount_rate: required(self.discount_rate, "discount-rate")?,
                tax_rate: required(self.tax_rate, "tax-rate")?,
                working_capital: required(self.working_capital, "working-capital")?,
                capex: required(self.capex, "capex")?,
            },
        };

        input.validate()?;
        Ok(input)
    }

    fn config(&self) -> ValuationConfig {
        if self.allow_degenerate {
            ValuationConfig::propagating()
        } else {
            ValuationConfig::default()
        }
    }
}

/// clap already requires these flags unless `--input` is given
fn required(value: Option<f64>, flag: &str) -> Result<f64> {
    value.with_context(|| format!("Missing required flag --{}", flag))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let input = cli.valuation_input()?;

    let engine = ValuationEngine::new(cli.config());
    let result = engine
        .calculate_valuation(&input)
        .context("Valuation failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table(&input, &result);
    }

    Ok(())
}

fn print_table(input: &ValuationInput, result: &ValuationResult) {
    println!("DCF Valuation");
    println!("=============\n");

    println!("  Growth Rate:   {:.2}%", input.growth_rate * 100.0);
    println!("  Discount Rate: {:.2}%", input.discount_rate * 100.0);
    println!("  Tax Rate:      {:.2}%", input.tax_rate * 100.0);
    println!();

    println!("  EBITDA:        {:>16.2}", result.ebitda);
    println!("  Initial FCF:   {:>16.2}", result.initial_fcf);
    println!();

    println!("{:>6} {:>16} {:>16}", "Year", "FCF", "Discounted FCF");
    println!("{}", "-".repeat(40));
    for row in &result.yearly_calculations {
        println!("{:>6} {:>16.2} {:>16.2}", row.year, row.fcf, row.discounted_fcf);
    }
    println!();

    let summary = result.summary();
    println!("Summary:");
    println!("  PV of Projected FCF:       {:>16.2}", summary.pv_explicit_period);
    println!("  Terminal Value:            {:>16.2}", result.terminal_value);
    println!("  Discounted Terminal Value: {:>16.2}", summary.discounted_terminal_value);
    println!("  Total Valuation:           {:>16.2}", summary.total_valuation);
    if let Some(share) = summary.terminal_value_share {
        println!("  Terminal Value Share:      {:>15.1}%", share * 100.0);
    }
}
