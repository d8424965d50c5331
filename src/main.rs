//! Orchard System CLI
//!
//! Runs the 15-year venture projection and prints the corporate horizon,
//! the investor cash-flow table, and per-investor wealth summaries.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use orchard_system::assumptions::loader;
use orchard_system::{Assumptions, Investor, ProjectionConfig, ProjectionEngine};

#[derive(Parser, Debug)]
#[command(name = "orchard_system", about = "Phased orchard venture projection")]
struct Args {
    /// CSV file of `field,value` assumption overrides
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Write the full year rows to this CSV file
    #[arg(long, default_value = "projection_output.csv")]
    output: PathBuf,

    /// Print the full projection result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let plan = match &args.assumptions {
        Some(path) => loader::load_plan(path)
            .map_err(|e| anyhow::anyhow!("loading overrides from {}: {e}", path.display()))?,
        None => Assumptions::default_plan(),
    };

    let config = ProjectionConfig::default();
    info!(
        "projecting {} years from {}",
        config.horizon_years, config.base_year
    );

    let engine = ProjectionEngine::new(plan.clone(), config);
    let result = engine.project();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Orchard System v0.1.0");
    println!("=====================\n");

    // Corporate horizon
    println!("Corporate P&L and Cash Flow:");
    println!(
        "{:>6} {:>8} {:>14} {:>14} {:>14} {:>14}",
        "Year", "Ha", "Rev (TND)", "OPEX (TND)", "CAPEX (TND)", "Profit (EUR)"
    );
    println!("{}", "-".repeat(76));
    for row in &result.rows {
        println!(
            "{:>6} {:>8} {:>14.0} {:>14.0} {:>14.0} {:>14.0}",
            row.year,
            format!("{:.0} Ha", row.active_hectares),
            row.revenue_tnd,
            row.opex_tnd,
            row.capex_tnd,
            row.net_profit_eur,
        );
    }

    // Investor cash flow
    println!("\nInvestor Cash Flow (post tax, EUR):");
    println!(
        "{:>6} {:>11} {:>14} {:>14}",
        "Year", "Phase", "A Net", "B Net"
    );
    println!("{}", "-".repeat(48));
    for row in &result.rows {
        let phase = if row.is_cash_call_year {
            "CASH CALL"
        } else {
            "DIVIDEND"
        };
        let marker = if row.is_factory_year { " *factory*" } else { "" };
        println!(
            "{:>6} {:>11} {:>14.0} {:>14.0}{}",
            row.year, phase, row.investor_a_share, row.investor_b_share, marker
        );
    }

    // Summaries
    for investor in [Investor::A, Investor::B] {
        let summary = result.summary(investor);
        println!("\nInvestor {:?}:", investor);
        println!("  Total Cash Invested:  -{:.0} EUR", summary.cumulative_invested);
        println!("  Net Cash Extracted:   +{:.0} EUR", summary.cumulative_extracted);
        println!("  Asset Share (50%):     {:.0} EUR", summary.asset_share_eur);
        println!("  Total Wealth:          {:.0} EUR", summary.total_wealth_eur);
        match summary.roi_multiple {
            Some(roi) => println!("  ROI: {roi:.1}x"),
            None => println!("  ROI: n/a (no cash invested)"),
        }
    }

    if let Some(terminal) = &result.terminal {
        println!("\nTerminal Valuation ({}):", result.rows.last().map_or(0, |r| r.year));
        println!("  Business Goodwill:  {:.0} EUR", terminal.business_value_eur);
        println!("  Tangible Assets:    {:.0} EUR", terminal.tangible_assets_eur);
        println!("  Total:              {:.0} EUR", terminal.total_eur());
    }

    // Write full rows to CSV
    let mut file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writeln!(
        file,
        "Year,ActiveHa,RevenueTND,OpexTND,CapexTND,NetProfitEUR,InvestorA,InvestorB,CashCall,FactoryYear"
    )?;
    for row in &result.rows {
        writeln!(
            file,
            "{},{},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{},{}",
            row.year,
            row.active_hectares,
            row.revenue_tnd,
            row.opex_tnd,
            row.capex_tnd,
            row.net_profit_eur,
            row.investor_a_share,
            row.investor_b_share,
            row.is_cash_call_year,
            row.is_factory_year,
        )?;
    }
    println!("\nFull results written to: {}", args.output.display());

    Ok(())
}
