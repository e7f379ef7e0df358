use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::UnitCategory;
use crate::planner::constants::*;

/// Inclusive (min, max) range for a portion gene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortionBounds {
    pub min: f64,
    pub max: f64,
}

impl PortionBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Whether `other` lies entirely within these bounds.
    pub fn covers(&self, other: &PortionBounds) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Runtime-configurable genetic algorithm settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub population_size: usize,
    pub generations: usize,
    pub tournament_size: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    /// Hard clamp for base-unit genes after mutation.
    pub base_bounds: PortionBounds,
    /// Range base-unit genes are drawn from at initialization.
    pub base_init: PortionBounds,
    /// Serving multiplier range for discrete-unit genes.
    pub discrete_bounds: PortionBounds,
    /// Multiplicative perturbation range for base-unit mutation.
    pub mutation_factor: PortionBounds,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: POPULATION_SIZE,
            generations: GENERATIONS,
            tournament_size: TOURNAMENT_SIZE,
            crossover_rate: CROSSOVER_RATE,
            mutation_rate: MUTATION_RATE,
            base_bounds: PortionBounds::new(MIN_PORTION, MAX_PORTION),
            base_init: PortionBounds::new(INIT_MIN_PORTION, MAX_PORTION),
            discrete_bounds: PortionBounds::new(MIN_SERVINGS, MAX_SERVINGS),
            mutation_factor: PortionBounds::new(MUTATION_FACTOR_MIN, MUTATION_FACTOR_MAX),
        }
    }
}

impl GaConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: GaConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hard bounds for genes of the given category.
    pub fn bounds(&self, category: UnitCategory) -> PortionBounds {
        match category {
            UnitCategory::BaseUnit => self.base_bounds,
            UnitCategory::DiscreteUnit => self.discrete_bounds,
        }
    }

    /// Range genes of the given category are drawn from at initialization.
    pub fn init_range(&self, category: UnitCategory) -> PortionBounds {
        match category {
            UnitCategory::BaseUnit => self.base_init,
            UnitCategory::DiscreteUnit => self.discrete_bounds,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(PlanError::InvalidConfig(
                "population_size must be at least 2".to_string(),
            ));
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(PlanError::InvalidConfig(format!(
                "tournament_size must be in 1..={}",
                self.population_size
            )));
        }
        for (name, p) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(PlanError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        for (name, b) in [
            ("base_bounds", self.base_bounds),
            ("base_init", self.base_init),
            ("discrete_bounds", self.discrete_bounds),
            ("mutation_factor", self.mutation_factor),
        ] {
            if !b.is_valid() {
                return Err(PlanError::InvalidConfig(format!(
                    "{} must have finite min <= max",
                    name
                )));
            }
        }
        if self.discrete_bounds.min.fract() != 0.0 || self.discrete_bounds.max.fract() != 0.0 {
            return Err(PlanError::InvalidConfig(
                "discrete_bounds must be whole numbers".to_string(),
            ));
        }
        if self.discrete_bounds.min < MIN_SERVINGS {
            return Err(PlanError::InvalidConfig(format!(
                "discrete_bounds.min must be at least {}",
                MIN_SERVINGS
            )));
        }
        if !self.base_bounds.covers(&self.base_init) {
            return Err(PlanError::InvalidConfig(
                "base_init must lie within base_bounds".to_string(),
            ));
        }
        if self.mutation_factor.min <= 0.0 {
            return Err(PlanError::InvalidConfig(
                "mutation_factor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Format settings as a compact string for display.
    pub fn display(&self) -> String {
        format!(
            "pop={} gens={} tourn={} cx={:.2} mut={:.2} base=[{}, {}] init=[{}, {}] servings=[{}, {}]",
            self.population_size,
            self.generations,
            self.tournament_size,
            self.crossover_rate,
            self.mutation_rate,
            self.base_bounds.min,
            self.base_bounds.max,
            self.base_init.min,
            self.base_init.max,
            self.discrete_bounds.min,
            self.discrete_bounds.max
        )
    }
}
