//! Output structures for projection runs: year rows, investor ledgers,
//! terminal valuation

use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;

/// Net-profit multiple used for terminal business goodwill.
pub const BUSINESS_VALUE_MULTIPLE: f64 = 4.0;

/// Fixed land and mature-tree valuation at the terminal year (TND).
pub const LAND_AND_TREES_VALUE_TND: f64 = 500_000.0;

/// The two co-investors. A and B hold equal 50% stakes but are taxed under
/// different regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Investor {
    A,
    B,
}

/// A single row of projection output for one simulated year.
///
/// Monetary fields are rounded to whole currency units at construction; this
/// is output-boundary granularity only. The engine threads full-precision
/// values across years internally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    pub active_hectares: f64,
    pub revenue_tnd: f64,
    pub opex_tnd: f64,
    pub capex_tnd: f64,
    pub net_profit_eur: f64,
    /// Investor A's post-tax/post-friction pocket cash for the year
    pub investor_a_share: f64,
    /// Investor B's post-tax/post-friction pocket cash for the year
    pub investor_b_share: f64,
    pub is_cash_call_year: bool,
    pub is_factory_year: bool,
}

/// Running cash position of one investor across the scan.
///
/// `record` is the only mutation point; each component only ever increases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestorLedger {
    /// Sum of absolute cash injections, after transfer friction
    pub cumulative_invested: f64,
    /// Sum of dividends received, after personal tax
    pub cumulative_extracted: f64,
}

impl InvestorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one year's signed pocket value into the ledger. Negative pockets
    /// accumulate as investment, positive as extraction; an exactly-zero
    /// pocket touches neither side.
    pub fn record(&mut self, pocket_eur: f64) {
        if pocket_eur < 0.0 {
            self.cumulative_invested += pocket_eur.abs();
        } else if pocket_eur > 0.0 {
            self.cumulative_extracted += pocket_eur;
        }
    }

    /// Total wealth outcome: extracted cash plus the investor's terminal
    /// asset share.
    pub fn total_wealth(&self, asset_share_eur: f64) -> f64 {
        self.cumulative_extracted + asset_share_eur
    }

    /// Wealth as a multiple of cash invested. `None` when the investor never
    /// injected cash, in which case the ratio is undefined.
    pub fn roi_multiple(&self, asset_share_eur: f64) -> Option<f64> {
        if self.cumulative_invested > 0.0 {
            Some(self.total_wealth(asset_share_eur) / self.cumulative_invested)
        } else {
            None
        }
    }
}

/// One-time venture appraisal taken at the terminal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalValuation {
    /// Goodwill: terminal-year net profit times a fixed multiple
    pub business_value_eur: f64,
    /// Factory replacement cost plus land and mature trees, in EUR
    pub tangible_assets_eur: f64,
}

impl TerminalValuation {
    /// Appraise the venture from the terminal year's (unrounded) net profit.
    pub fn appraise(net_profit_eur: f64, plan: &Assumptions) -> Self {
        Self {
            business_value_eur: net_profit_eur * BUSINESS_VALUE_MULTIPLE,
            tangible_assets_eur: (plan.factory_cost + LAND_AND_TREES_VALUE_TND)
                / plan.exchange_rate,
        }
    }

    pub fn total_eur(&self) -> f64 {
        self.business_value_eur + self.tangible_assets_eur
    }
}

/// Complete projection result: the ordered year rows, both investor ledgers,
/// and the terminal valuation (present iff the terminal year was simulated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub rows: Vec<YearRow>,
    pub ledger_a: InvestorLedger,
    pub ledger_b: InvestorLedger,
    pub terminal: Option<TerminalValuation>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            ledger_a: InvestorLedger::new(),
            ledger_b: InvestorLedger::new(),
            terminal: None,
        }
    }

    pub fn add_row(&mut self, row: YearRow) {
        self.rows.push(row);
    }

    /// Each investor's equal claim on the terminal valuation; zero when no
    /// terminal year was simulated.
    pub fn asset_share_eur(&self) -> f64 {
        self.terminal.as_ref().map_or(0.0, |t| t.total_eur() / 2.0)
    }

    /// Wealth summary for one investor.
    pub fn summary(&self, investor: Investor) -> InvestorSummary {
        let ledger = match investor {
            Investor::A => &self.ledger_a,
            Investor::B => &self.ledger_b,
        };
        let asset_share_eur = self.asset_share_eur();

        InvestorSummary {
            investor,
            cumulative_invested: ledger.cumulative_invested,
            cumulative_extracted: ledger.cumulative_extracted,
            asset_share_eur,
            total_wealth_eur: ledger.total_wealth(asset_share_eur),
            roi_multiple: ledger.roi_multiple(asset_share_eur),
        }
    }
}

impl Default for ProjectionResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Wealth outcome for one investor over the full horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorSummary {
    pub investor: Investor,
    pub cumulative_invested: f64,
    pub cumulative_extracted: f64,
    pub asset_share_eur: f64,
    pub total_wealth_eur: f64,
    /// `None` when nothing was ever invested (ratio undefined)
    pub roi_multiple: Option<f64>,
}
