//! Orchard System - multi-year projection engine for a phased orchard venture
//!
//! This library provides:
//! - A year-by-year projection of land development, harvest ramp-up, and
//!   downstream processing economics
//! - Phase scheduling, agronomic, capex, revenue, and opex models driven by a
//!   single editable assumption set
//! - A two-investor cash-flow waterfall with asymmetric tax and transfer
//!   friction treatment
//! - Terminal valuation and per-investor wealth summaries
//! - A scenario runner for batch sweeps over assumption variants

pub mod assumptions;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{AssumptionError, Assumptions, YieldCurve};
pub use projection::{
    Investor, InvestorLedger, ProjectionConfig, ProjectionEngine, ProjectionResult, YearRow,
};
pub use scenario::ScenarioRunner;
