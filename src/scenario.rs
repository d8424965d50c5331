//! Scenario runner for batch projections
//!
//! Holds a base assumption set once, then runs many projections with
//! assumption variants or alternate configs. Runs are fully independent:
//! nothing is cached or shared between them.

use crate::assumptions::Assumptions;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Pre-built scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for price in [10.0, 11.2, 14.0] {
///     let mut plan = runner.assumptions().clone();
///     plan.olive_oil_price_bulk = price;
///     let result = runner.run_with(plan, ProjectionConfig::default());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Base assumptions cloned into each run
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create a runner seeded with the canonical default plan.
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_plan(),
        }
    }

    /// Create a runner with pre-built assumptions.
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection of the base assumptions with the given config.
    pub fn run(&self, config: ProjectionConfig) -> ProjectionResult {
        let engine = ProjectionEngine::new(self.base_assumptions.clone(), config);
        engine.project()
    }

    /// Run a projection of a specific assumption set.
    pub fn run_with(&self, assumptions: Assumptions, config: ProjectionConfig) -> ProjectionResult {
        let engine = ProjectionEngine::new(assumptions, config);
        engine.project()
    }

    /// Run projections for multiple assumption variants with the same config.
    pub fn run_scenarios(
        &self,
        variants: &[Assumptions],
        config: ProjectionConfig,
    ) -> Vec<ProjectionResult> {
        variants
            .iter()
            .map(|plan| {
                let engine = ProjectionEngine::new(plan.clone(), config.clone());
                engine.project()
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection/modification.
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization.
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
