//! Per-tree annual yield curves by plantation age
//!
//! Yields are piecewise constant per age-year. Both species produce nothing
//! for the first three seasons; beyond the last tabulated age the yield
//! plateaus at the final entry rather than extrapolating.

/// Annual yield schedule for one species, kg per tree indexed by age.
#[derive(Debug, Clone)]
pub struct YieldCurve {
    kg_per_tree: Vec<f64>,
}

impl YieldCurve {
    /// Super-high-density olive curve. First crop in season 4.
    pub fn olive_shd() -> Self {
        Self {
            kg_per_tree: vec![0.0, 0.0, 0.0, 2.0, 5.0, 8.0, 12.0, 15.0, 18.0],
        }
    }

    /// Carob curve. Slow to establish, then heavy bearing.
    pub fn carob() -> Self {
        Self {
            kg_per_tree: vec![0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 15.0, 30.0, 50.0],
        }
    }

    /// Build a curve from explicit per-age entries.
    pub fn from_entries(kg_per_tree: Vec<f64>) -> Self {
        Self { kg_per_tree }
    }

    /// Yield in kg/tree for a plantation of the given age. Ages beyond the
    /// table clamp to the mature plateau; negative ages (not yet planted)
    /// yield nothing.
    pub fn kg_per_tree(&self, age: i32) -> f64 {
        if age < 0 {
            return 0.0;
        }
        let idx = (age as usize).min(self.kg_per_tree.len() - 1);
        self.kg_per_tree[idx]
    }

    /// Number of tabulated age-years before the plateau.
    pub fn curve_years(&self) -> usize {
        self.kg_per_tree.len()
    }
}

/// The two species curves used by the projection engine.
#[derive(Debug, Clone)]
pub struct YieldTables {
    pub olive: YieldCurve,
    pub carob: YieldCurve,
}

impl Default for YieldTables {
    fn default() -> Self {
        Self {
            olive: YieldCurve::olive_shd(),
            carob: YieldCurve::carob(),
        }
    }
}
