//! Named-field input boundary for the assumption table
//!
//! The editing surface addresses assumptions by field name. Updates go
//! through `with_overrides`, which returns a complete replacement copy, so a
//! projection run never sees a partially edited set.

use std::collections::HashMap;

use thiserror::Error;

use super::Assumptions;

/// Errors raised at the assumption input boundary.
#[derive(Debug, Error)]
pub enum AssumptionError {
    #[error("unknown assumption field: {0}")]
    UnknownField(String),
    #[error("non-finite value {value} for assumption field: {field}")]
    NonFiniteValue { field: String, value: f64 },
}

/// All editable field names, in plan order.
pub const FIELD_NAMES: &[&str] = &[
    "exchange_rate",
    "inflation_rate",
    "phase1_year",
    "phase2_year",
    "phase3_year",
    "ha_per_phase",
    "olive_ha_percent",
    "carob_ha_percent",
    "olive_density_shd",
    "carob_density",
    "well_depth",
    "well_cost_per_meter",
    "pump_cost",
    "irrigation_per_ha",
    "soil_prep_per_ha",
    "tractor_cost",
    "tree_olive_cost",
    "tree_carob_cost",
    "factory_year",
    "factory_cost",
    "electricity_per_well",
    "fertilizer_per_ha",
    "water_cost",
    "land_lease_per_ha",
    "engineer_salary",
    "guardian_salary",
    "harvest_labor_olive",
    "harvest_labor_carob",
    "pruning_olive",
    "pruning_carob",
    "packaging_ibc",
    "logistics_per_kg",
    "admin_legal_tnd",
    "olive_oil_price_bulk",
    "carob_seed_price",
    "carob_gum_price",
    "tax_rate_corp_export",
    "tax_rate_corp_agri",
    "tax_rate_investor_a",
    "tax_rate_investor_b",
    "transfer_friction",
];

impl Assumptions {
    /// Set a single field by name. Year-valued fields truncate to whole years.
    pub fn set_field(&mut self, name: &str, value: f64) -> Result<(), AssumptionError> {
        if !value.is_finite() {
            return Err(AssumptionError::NonFiniteValue {
                field: name.to_string(),
                value,
            });
        }

        match name {
            "exchange_rate" => self.exchange_rate = value,
            "inflation_rate" => self.inflation_rate = value,
            "phase1_year" => self.phase1_year = value as i32,
            "phase2_year" => self.phase2_year = value as i32,
            "phase3_year" => self.phase3_year = value as i32,
            "ha_per_phase" => self.ha_per_phase = value,
            "olive_ha_percent" => self.olive_ha_percent = value,
            "carob_ha_percent" => self.carob_ha_percent = value,
            "olive_density_shd" => self.olive_density_shd = value,
            "carob_density" => self.carob_density = value,
            "well_depth" => self.well_depth = value,
            "well_cost_per_meter" => self.well_cost_per_meter = value,
            "pump_cost" => self.pump_cost = value,
            "irrigation_per_ha" => self.irrigation_per_ha = value,
            "soil_prep_per_ha" => self.soil_prep_per_ha = value,
            "tractor_cost" => self.tractor_cost = value,
            "tree_olive_cost" => self.tree_olive_cost = value,
            "tree_carob_cost" => self.tree_carob_cost = value,
            "factory_year" => self.factory_year = value as i32,
            "factory_cost" => self.factory_cost = value,
            "electricity_per_well" => self.electricity_per_well = value,
            "fertilizer_per_ha" => self.fertilizer_per_ha = value,
            "water_cost" => self.water_cost = value,
            "land_lease_per_ha" => self.land_lease_per_ha = value,
            "engineer_salary" => self.engineer_salary = value,
            "guardian_salary" => self.guardian_salary = value,
            "harvest_labor_olive" => self.harvest_labor_olive = value,
            "harvest_labor_carob" => self.harvest_labor_carob = value,
            "pruning_olive" => self.pruning_olive = value,
            "pruning_carob" => self.pruning_carob = value,
            "packaging_ibc" => self.packaging_ibc = value,
            "logistics_per_kg" => self.logistics_per_kg = value,
            "admin_legal_tnd" => self.admin_legal_tnd = value,
            "olive_oil_price_bulk" => self.olive_oil_price_bulk = value,
            "carob_seed_price" => self.carob_seed_price = value,
            "carob_gum_price" => self.carob_gum_price = value,
            "tax_rate_corp_export" => self.tax_rate_corp_export = value,
            "tax_rate_corp_agri" => self.tax_rate_corp_agri = value,
            "tax_rate_investor_a" => self.tax_rate_investor_a = value,
            "tax_rate_investor_b" => self.tax_rate_investor_b = value,
            "transfer_friction" => self.transfer_friction = value,
            _ => return Err(AssumptionError::UnknownField(name.to_string())),
        }

        Ok(())
    }

    /// Read a single field by name.
    pub fn get_field(&self, name: &str) -> Option<f64> {
        let value = match name {
            "exchange_rate" => self.exchange_rate,
            "inflation_rate" => self.inflation_rate,
            "phase1_year" => self.phase1_year as f64,
            "phase2_year" => self.phase2_year as f64,
            "phase3_year" => self.phase3_year as f64,
            "ha_per_phase" => self.ha_per_phase,
            "olive_ha_percent" => self.olive_ha_percent,
            "carob_ha_percent" => self.carob_ha_percent,
            "olive_density_shd" => self.olive_density_shd,
            "carob_density" => self.carob_density,
            "well_depth" => self.well_depth,
            "well_cost_per_meter" => self.well_cost_per_meter,
            "pump_cost" => self.pump_cost,
            "irrigation_per_ha" => self.irrigation_per_ha,
            "soil_prep_per_ha" => self.soil_prep_per_ha,
            "tractor_cost" => self.tractor_cost,
            "tree_olive_cost" => self.tree_olive_cost,
            "tree_carob_cost" => self.tree_carob_cost,
            "factory_year" => self.factory_year as f64,
            "factory_cost" => self.factory_cost,
            "electricity_per_well" => self.electricity_per_well,
            "fertilizer_per_ha" => self.fertilizer_per_ha,
            "water_cost" => self.water_cost,
            "land_lease_per_ha" => self.land_lease_per_ha,
            "engineer_salary" => self.engineer_salary,
            "guardian_salary" => self.guardian_salary,
            "harvest_labor_olive" => self.harvest_labor_olive,
            "harvest_labor_carob" => self.harvest_labor_carob,
            "pruning_olive" => self.pruning_olive,
            "pruning_carob" => self.pruning_carob,
            "packaging_ibc" => self.packaging_ibc,
            "logistics_per_kg" => self.logistics_per_kg,
            "admin_legal_tnd" => self.admin_legal_tnd,
            "olive_oil_price_bulk" => self.olive_oil_price_bulk,
            "carob_seed_price" => self.carob_seed_price,
            "carob_gum_price" => self.carob_gum_price,
            "tax_rate_corp_export" => self.tax_rate_corp_export,
            "tax_rate_corp_agri" => self.tax_rate_corp_agri,
            "tax_rate_investor_a" => self.tax_rate_investor_a,
            "tax_rate_investor_b" => self.tax_rate_investor_b,
            "transfer_friction" => self.transfer_friction,
            _ => return None,
        };

        Some(value)
    }

    /// Build a replacement copy with the named overrides applied on top of
    /// `self`. The original is untouched.
    pub fn with_overrides(
        &self,
        overrides: &HashMap<String, f64>,
    ) -> Result<Assumptions, AssumptionError> {
        let mut next = self.clone();
        for (name, &value) in overrides {
            next.set_field(name, value)?;
        }
        Ok(next)
    }
}
