//! Price a batch of calculation parameter rows from CSV
//!
//! Outputs one row per input for rate-sheet comparison across terms and
//! financing types, plus an aggregated summary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use auto_finance::{
    AnnuityCalculator, CalculationParameters, CalculationResult, Calculator, FinancingType,
    Vehicle, VehicleCategory,
};

#[derive(Debug, Parser)]
#[command(about = "Batch pricing over CSV parameter rows")]
struct Args {
    /// Input CSV with one parameter set per row
    input: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "batch_pricing_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    financing_type: FinancingType,
    category: VehicleCategory,
    #[serde(default)]
    brand: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    year: i32,
    price: f64,
    initial_payment: f64,
    months: u32,
    #[serde(default = "default_true")]
    insurance_included: bool,
    #[serde(default)]
    life_insurance: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct OutputRow {
    row: usize,
    financing_type: FinancingType,
    category: VehicleCategory,
    price: f64,
    months: u32,
    base_rate: f64,
    monthly_payment: f64,
    total_payment: f64,
    overpayment: f64,
    effective_rate: f64,
    error: String,
}

fn price_row(calculator: &AnnuityCalculator, row: &BatchRow) -> Result<CalculationResult, String> {
    let vehicle = Vehicle {
        brand: row.brand.clone(),
        model: row.model.clone(),
        year: row.year,
        price: row.price,
        vin: String::new(),
        category: row.category,
    };
    let params = CalculationParameters {
        financing_type: row.financing_type,
        amount: row.price,
        initial_payment: row.initial_payment,
        months: row.months,
        vehicle: Some(vehicle),
        insurance_included: row.insurance_included,
        life_insurance: row.life_insurance,
    };

    calculator
        .validate_parameters(&params)
        .map_err(|e| e.to_string())?;
    calculator.calculate(&params).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading parameter rows from {}...", args.input.display());

    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let rows: Vec<BatchRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .context("malformed batch row")?;
    println!("Loaded {} rows in {:?}", rows.len(), start.elapsed());

    println!("Pricing...");
    let pricing_start = Instant::now();

    let calculator = AnnuityCalculator::new();
    let results: Vec<Result<CalculationResult, String>> = rows
        .par_iter()
        .map(|row| price_row(&calculator, row))
        .collect();

    println!("Pricing complete in {:?}", pricing_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut priced = 0usize;
    let mut failed = 0usize;
    let mut payment_sum = 0.0;

    for (i, (row, result)) in rows.iter().zip(&results).enumerate() {
        let output = match result {
            Ok(result) => {
                priced += 1;
                payment_sum += result.monthly_payment;
                OutputRow {
                    row: i + 1,
                    financing_type: row.financing_type,
                    category: row.category,
                    price: row.price,
                    months: row.months,
                    base_rate: result.conditions.base_rate,
                    monthly_payment: result.monthly_payment,
                    total_payment: result.total_payment,
                    overpayment: result.overpayment,
                    effective_rate: result.effective_rate,
                    error: String::new(),
                }
            }
            Err(err) => {
                failed += 1;
                log::warn!("row {}: {}", i + 1, err);
                OutputRow {
                    row: i + 1,
                    financing_type: row.financing_type,
                    category: row.category,
                    price: row.price,
                    months: row.months,
                    base_rate: 0.0,
                    monthly_payment: 0.0,
                    total_payment: 0.0,
                    overpayment: 0.0,
                    effective_rate: 0.0,
                    error: err.clone(),
                }
            }
        };
        writer.serialize(output)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    println!("  Rows priced: {}", priced);
    println!("  Rows failed: {}", failed);
    if priced > 0 {
        println!("  Average monthly payment: {:.2}", payment_sum / priced as f64);
    }
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
