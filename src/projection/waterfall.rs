//! Tax and cash-flow allocation waterfall
//!
//! Converts one year's operating result and capex into a currency-converted
//! net profit, decides cash call versus dividend, splits the flow 50/50
//! between the two investors, and applies each investor's asymmetric
//! tax/friction treatment.

use crate::assumptions::Assumptions;

/// Last year of the corporate tax holiday; the assumed export margin is
/// taxed only in later years.
pub const TAX_HOLIDAY_LAST_YEAR: i32 = 2029;

/// Share of revenue treated as the internally taxable export margin.
pub const TAXABLE_MARGIN_OF_REVENUE: f64 = 0.10;

/// Forced founding-year cash call (EUR). Overrides the computed financing
/// decision in the first simulated year, whatever the other inputs say.
pub const SEED_CAPITAL_CALL_EUR: f64 = -15_000.0;

/// Outcome of the financing decision for one year. At most one side is
/// nonzero: `cash_call_eur <= 0.0 <= dividend_eur`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancingDecision {
    pub cash_call_eur: f64,
    pub dividend_eur: f64,
}

/// Full allocation of one year's result to the two investors.
#[derive(Debug, Clone, Copy)]
pub struct Allocation {
    pub net_profit_tnd: f64,
    pub net_profit_eur: f64,
    pub capex_eur: f64,
    pub cash_call_eur: f64,
    pub dividend_eur: f64,
    /// Investor A's signed pocket cash (post tax / post friction)
    pub pocket_a_eur: f64,
    /// Investor B's signed pocket cash (post tax / post friction)
    pub pocket_b_eur: f64,
}

/// Decide cash call versus dividend for a year.
///
/// In a capex year the profit first offsets the capital spend: a residual
/// deficit becomes the cash call in full, a residual surplus the dividend in
/// full. In a non-capex year a positive profit is distributed entirely and a
/// non-positive one is called in entirely.
pub fn decide_financing(net_profit_eur: f64, capex_eur: f64) -> FinancingDecision {
    if capex_eur > 0.0 {
        let net_cash_position = net_profit_eur - capex_eur;
        if net_cash_position < 0.0 {
            FinancingDecision {
                cash_call_eur: net_cash_position,
                dividend_eur: 0.0,
            }
        } else {
            FinancingDecision {
                cash_call_eur: 0.0,
                dividend_eur: net_cash_position,
            }
        }
    } else if net_profit_eur > 0.0 {
        FinancingDecision {
            cash_call_eur: 0.0,
            dividend_eur: net_profit_eur,
        }
    } else {
        FinancingDecision {
            cash_call_eur: net_profit_eur,
            dividend_eur: 0.0,
        }
    }
}

/// An investor's half of the year's flow, before their own tax or friction.
pub fn pre_split_share(decision: FinancingDecision) -> f64 {
    if decision.cash_call_eur < 0.0 {
        decision.cash_call_eur / 2.0
    } else {
        decision.dividend_eur / 2.0
    }
}

/// Apply one investor's treatment to their pre-split share: cash injections
/// are inflated by transfer friction, dividends reduced by the personal tax
/// rate. A zero share stays zero.
pub fn pocket(share_eur: f64, tax_rate: f64, transfer_friction: f64) -> f64 {
    if share_eur < 0.0 {
        share_eur * (1.0 + transfer_friction)
    } else if share_eur > 0.0 {
        share_eur * (1.0 - tax_rate)
    } else {
        0.0
    }
}

/// Run the full waterfall for one year.
///
/// `is_founding_year` marks the first simulated year, whose financing is
/// always the fixed seed cash call regardless of the computed position.
pub fn allocate(
    year: i32,
    is_founding_year: bool,
    revenue_tnd: f64,
    opex_tnd: f64,
    capex_tnd: f64,
    plan: &Assumptions,
) -> Allocation {
    let operating_result_tnd = revenue_tnd - opex_tnd;

    // Corporate tax hits only the assumed export margin, and only once the
    // holiday has lapsed.
    let taxable_income_tnd = if year > TAX_HOLIDAY_LAST_YEAR {
        revenue_tnd * TAXABLE_MARGIN_OF_REVENUE
    } else {
        0.0
    };
    let corp_tax_tnd = taxable_income_tnd * plan.tax_rate_corp_export;

    let net_profit_tnd = operating_result_tnd - corp_tax_tnd;
    let net_profit_eur = net_profit_tnd / plan.exchange_rate;
    let capex_eur = capex_tnd / plan.exchange_rate;

    let decision = if is_founding_year {
        FinancingDecision {
            cash_call_eur: SEED_CAPITAL_CALL_EUR,
            dividend_eur: 0.0,
        }
    } else {
        decide_financing(net_profit_eur, capex_eur)
    };

    let share = pre_split_share(decision);
    let pocket_a_eur = pocket(share, plan.tax_rate_investor_a, plan.transfer_friction);
    let pocket_b_eur = pocket(share, plan.tax_rate_investor_b, plan.transfer_friction);

    Allocation {
        net_profit_tnd,
        net_profit_eur,
        capex_eur,
        cash_call_eur: decision.cash_call_eur,
        dividend_eur: decision.dividend_eur,
        pocket_a_eur,
        pocket_b_eur,
    }
}
