//! Price a single financing quote from a JSON request document
//!
//! Prints the calculation, the scoring verdict, and alternative product
//! offers; optionally persists the result for the client's history.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use auto_finance::{
    ApprovalStatus, FileStore, FinanceSession, FinancingQuote, ProductCatalog, QuoteRequest,
};

#[derive(Debug, Parser)]
#[command(about = "Vehicle financing quote calculator")]
struct Args {
    /// Quote request JSON document: { client, vehicle, parameters }
    request: PathBuf,

    /// Product catalog configuration; the built-in catalog is used when
    /// omitted or absent
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Persist the result and update the client's history
    #[arg(long)]
    save: bool,

    /// Directory for persisted calculations
    #[arg(long, default_value = "calculations")]
    store_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = fs::read_to_string(&args.request)
        .with_context(|| format!("failed to read request {}", args.request.display()))?;
    let request: QuoteRequest =
        serde_json::from_str(&raw).context("malformed quote request document")?;

    let catalog = match &args.catalog {
        Some(path) => ProductCatalog::load(path)?,
        None => ProductCatalog::default(),
    };

    let session = FinanceSession::with_catalog(catalog);
    let quote = session.quote(&request).context("quote failed")?;

    print_quote(&request, &quote);

    if quote.result.approval_status == ApprovalStatus::Rejected {
        println!("\nThe application cannot be approved.");
        println!("Consider increasing the initial payment or choosing a different vehicle.");
        return Ok(());
    }

    if args.save {
        let store = FileStore::new(&args.store_dir);
        let path = store.save(
            &request.client,
            request.parameters.financing_type,
            request.parameters.amount,
            &quote.result,
        )?;
        println!("\nResult saved to {}", path.display());

        let history = store.client_history(&request.client.client_hash())?;
        println!("Client history: {} saved calculation(s)", history.len());
    }

    Ok(())
}

fn print_quote(request: &QuoteRequest, quote: &FinancingQuote) {
    let result = &quote.result;

    println!("{}", "=".repeat(50));
    println!("QUOTE RESULT");
    println!("{}", "=".repeat(50));
    println!("Monthly payment:  {:.2}", result.monthly_payment);
    println!("Total payment:    {:.2}", result.total_payment);
    println!("Overpayment:      {:.2}", result.overpayment);
    println!("Effective rate:   {:.2}%", result.effective_rate);
    println!("Base rate:        {:.1}%", result.conditions.base_rate);
    if let Some(residual) = result.conditions.residual_value {
        println!("Buyout amount:    {:.2}", residual);
    }
    println!("Calculation id:   {}", result.calculation_id);

    println!("\nPre-approval: {} (score {:.1}/100)",
             status_description(result.approval_status),
             quote.assessment.score);
    for reason in &quote.assessment.reasons {
        println!("  - {}", reason);
    }

    println!("\nPayment schedule (first 6 months):");
    println!("{:<8} {:<12} {:>14} {:>16}", "Month", "Date", "Payment", "Balance");
    for entry in result.schedule.iter().take(6) {
        println!(
            "{:<8} {:<12} {:>14.2} {:>16.2}",
            entry.month, entry.date, entry.payment, entry.balance
        );
    }
    if result.schedule.len() > 6 {
        println!("... and {} more months", result.schedule.len() - 6);
    }

    println!("\nAvailable products for {} {}:", request.vehicle.brand, request.vehicle.model);
    if quote.offers.is_empty() {
        println!("  none match the vehicle");
    }
    for offer in &quote.offers {
        println!(
            "  {} ({:?}): {:.2}/month at {:.1}% - {}",
            offer.product.name,
            offer.financing_type,
            offer.monthly_payment,
            offer.rate,
            offer.recommendation
        );
    }
}

fn status_description(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::Pending => "pending",
        ApprovalStatus::PreApproved => "pre-approved",
        ApprovalStatus::ConditionalApproval => "approved with conditions",
        ApprovalStatus::Rejected => "rejected",
    }
}
