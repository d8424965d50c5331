//! Planning assumptions: the editable parameter table, yield curves, and loaders

mod fields;
mod yields;
pub mod loader;

pub use fields::{AssumptionError, FIELD_NAMES};
pub use yields::{YieldCurve, YieldTables};

use serde::{Deserialize, Serialize};

/// Complete assumption set driving a projection run.
///
/// Every field is an independently editable number; `default_plan()` is the
/// canonical plan. Callers replace the whole value on each edit (see
/// `with_overrides`) so the engine never observes a half-applied change.
/// No cross-field invariant is enforced; in particular the olive/carob land
/// splits are NOT required to sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assumptions {
    // Macro
    /// TND per 1 EUR
    pub exchange_rate: f64,
    /// Annual cost inflation (carried on the plan surface, not yet applied by the engine)
    pub inflation_rate: f64,

    // Phasing & land use
    pub phase1_year: i32,
    pub phase2_year: i32,
    pub phase3_year: i32,
    /// Hectares brought into development per phase
    pub ha_per_phase: f64,
    /// Share of each phase's land planted with olive
    pub olive_ha_percent: f64,
    /// Share of each phase's land planted with carob
    pub carob_ha_percent: f64,

    // Tree density (trees/ha)
    pub olive_density_shd: f64,
    pub carob_density: f64,

    // CAPEX - infrastructure (TND)
    /// Well depth in meters
    pub well_depth: f64,
    pub well_cost_per_meter: f64,
    /// Per well
    pub pump_cost: f64,
    pub irrigation_per_ha: f64,
    pub soil_prep_per_ha: f64,
    /// One-off, recognized in the first phase's start year
    pub tractor_cost: f64,

    // CAPEX - plants (TND per tree)
    pub tree_olive_cost: f64,
    pub tree_carob_cost: f64,

    // CAPEX - factory (TND)
    /// Commissioning year of the gum processing facility
    pub factory_year: i32,
    pub factory_cost: f64,

    // OPEX - variable (TND)
    /// Annual, per active well
    pub electricity_per_well: f64,
    /// High due to soil salinity
    pub fertilizer_per_ha: f64,
    /// Free from wells; electricity covers pumping
    pub water_cost: f64,
    /// Annual land rent per hectare
    pub land_lease_per_ha: f64,

    // OPEX - labor (TND)
    /// Monthly
    pub engineer_salary: f64,
    /// Monthly, per guardian
    pub guardian_salary: f64,
    /// Per kg harvested
    pub harvest_labor_olive: f64,
    /// Per kg harvested
    pub harvest_labor_carob: f64,
    /// Per tree, annualized flat rate
    pub pruning_olive: f64,
    /// Per tree, annualized flat rate
    pub pruning_carob: f64,

    // OPEX - logistics & admin (TND)
    /// Per 1000 L of oil
    pub packaging_ibc: f64,
    pub logistics_per_kg: f64,
    pub admin_legal_tnd: f64,

    // Revenue prices (TND)
    pub olive_oil_price_bulk: f64,
    pub carob_seed_price: f64,
    /// Processed price, post factory commissioning
    pub carob_gum_price: f64,

    // Taxes & friction
    /// Export company rate, applied after the tax holiday
    pub tax_rate_corp_export: f64,
    /// Agricultural rate during the holiday
    pub tax_rate_corp_agri: f64,
    /// Investor A dividend tax
    pub tax_rate_investor_a: f64,
    /// Investor B dividend tax
    pub tax_rate_investor_b: f64,
    /// Share lost when wiring cash into the venture
    pub transfer_friction: f64,
}

impl Assumptions {
    /// Canonical default plan. Returns a fresh value on every call so a
    /// "reset" can never alias live editing state.
    pub fn default_plan() -> Self {
        Self {
            exchange_rate: 3.3,
            inflation_rate: 0.02,

            phase1_year: 2027,
            phase2_year: 2029,
            phase3_year: 2031,
            ha_per_phase: 16.0,
            olive_ha_percent: 0.50,
            carob_ha_percent: 0.50,

            olive_density_shd: 1250.0,
            carob_density: 100.0,

            well_depth: 250.0,
            well_cost_per_meter: 500.0,
            pump_cost: 50_000.0,
            irrigation_per_ha: 5_000.0,
            soil_prep_per_ha: 2_500.0,
            tractor_cost: 150_000.0,

            tree_olive_cost: 12.0,
            tree_carob_cost: 25.0,

            factory_year: 2035,
            factory_cost: 1_000_000.0,

            electricity_per_well: 5_000.0,
            fertilizer_per_ha: 1_200.0,
            water_cost: 0.0,
            land_lease_per_ha: 800.0,

            engineer_salary: 1_500.0,
            guardian_salary: 1_000.0,
            harvest_labor_olive: 0.25,
            harvest_labor_carob: 0.15,
            pruning_olive: 2.0,
            pruning_carob: 3.0,

            packaging_ibc: 200.0,
            logistics_per_kg: 0.5,
            admin_legal_tnd: 16_500.0,

            olive_oil_price_bulk: 11.2,
            carob_seed_price: 16.0,
            carob_gum_price: 66.0,

            tax_rate_corp_export: 0.20,
            tax_rate_corp_agri: 0.00,
            tax_rate_investor_a: 0.40,
            tax_rate_investor_b: 0.30,
            transfer_friction: 0.03,
        }
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_plan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_fresh_each_call() {
        let mut a = Assumptions::default_plan();
        a.exchange_rate = 99.0;

        let b = Assumptions::default_plan();
        assert_eq!(b.exchange_rate, 3.3);
    }

    #[test]
    fn test_default_plan_values() {
        let a = Assumptions::default_plan();

        assert_eq!(a.phase1_year, 2027);
        assert_eq!(a.phase3_year, 2031);
        assert_eq!(a.ha_per_phase, 16.0);
        assert_eq!(a.factory_year, 2035);
        assert_eq!(a.carob_gum_price, 66.0);
        assert_eq!(a.transfer_friction, 0.03);
    }
}
