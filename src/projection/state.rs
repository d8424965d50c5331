//! Projection state carried across the year-by-year scan

use super::cashflows::InvestorLedger;

/// State threaded through a single projection run: the year cursor and the
/// two investor ledgers. Everything else is derived fresh each year from the
/// assumption set; nothing survives past the run.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current simulated calendar year
    pub year: i32,

    /// Investor A's running ledger
    pub ledger_a: InvestorLedger,

    /// Investor B's running ledger
    pub ledger_b: InvestorLedger,
}

impl ProjectionState {
    /// Initialize state at the first simulated year.
    pub fn new(base_year: i32) -> Self {
        Self {
            year: base_year,
            ledger_a: InvestorLedger::new(),
            ledger_b: InvestorLedger::new(),
        }
    }

    /// Fold one year's pocket values into both ledgers.
    pub fn record_pockets(&mut self, pocket_a_eur: f64, pocket_b_eur: f64) {
        self.ledger_a.record(pocket_a_eur);
        self.ledger_b.record(pocket_b_eur);
    }

    /// Advance to the next simulated year.
    pub fn advance_year(&mut self) {
        self.year += 1;
    }
}
