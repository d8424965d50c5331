//! Sweep oil and gum prices across a grid and tabulate investor outcomes
//!
//! Each grid point is an independent projection run; runs execute in
//! parallel.

use std::time::Instant;

use rayon::prelude::*;

use orchard_system::{Assumptions, Investor, ProjectionConfig, ProjectionEngine};

struct SweepPoint {
    oil_price: f64,
    gum_price: f64,
    wealth_a_eur: f64,
    wealth_b_eur: f64,
    roi_a: Option<f64>,
}

fn main() {
    env_logger::init();

    let oil_prices = [8.0, 9.6, 11.2, 12.8, 14.4];
    let gum_prices = [40.0, 53.0, 66.0, 79.0];

    let grid: Vec<(f64, f64)> = oil_prices
        .iter()
        .flat_map(|&oil| gum_prices.iter().map(move |&gum| (oil, gum)))
        .collect();

    println!("Sweeping {} price scenarios...", grid.len());
    let start = Instant::now();

    let points: Vec<SweepPoint> = grid
        .par_iter()
        .map(|&(oil_price, gum_price)| {
            let mut plan = Assumptions::default_plan();
            plan.olive_oil_price_bulk = oil_price;
            plan.carob_gum_price = gum_price;

            let engine = ProjectionEngine::new(plan, ProjectionConfig::default());
            let result = engine.project();

            let summary_a = result.summary(Investor::A);
            let summary_b = result.summary(Investor::B);
            SweepPoint {
                oil_price,
                gum_price,
                wealth_a_eur: summary_a.total_wealth_eur,
                wealth_b_eur: summary_b.total_wealth_eur,
                roi_a: summary_a.roi_multiple,
            }
        })
        .collect();

    println!("Sweep complete in {:?}\n", start.elapsed());

    println!(
        "{:>10} {:>10} {:>14} {:>14} {:>8}",
        "Oil (TND)", "Gum (TND)", "Wealth A (EUR)", "Wealth B (EUR)", "ROI A"
    );
    println!("{}", "-".repeat(62));
    for p in &points {
        let roi = p
            .roi_a
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.1}x"));
        println!(
            "{:>10.1} {:>10.1} {:>14.0} {:>14.0} {:>8}",
            p.oil_price, p.gum_price, p.wealth_a_eur, p.wealth_b_eur, roi
        );
    }
}
