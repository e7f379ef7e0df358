use std::fs;
use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{DayPlan, MealOutcome, MealResult, NutrientTarget, UserProfile};
use crate::planner::calculations::decode_meal;
use crate::planner::config::GaConfig;
use crate::planner::constants::{DEFAULT_MEAL_SHARES, SHARE_TOLERANCE};
use crate::planner::genetic::PortionOptimizer;
use crate::planner::normalizer::normalize_selection;
use crate::store::FoodDatabase;

/// Foods chosen for one named meal and the meal's share of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSelection {
    pub name: String,
    pub share: f64,
    #[serde(default)]
    pub foods: Vec<String>,
}

impl MealSelection {
    pub fn new(name: &str, share: f64, foods: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            share,
            foods: foods.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Everything needed to plan a day.
///
/// Explicit `targets` take precedence over targets derived from `profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub targets: Option<NutrientTarget>,
    pub meals: Vec<MealSelection>,
}

impl PlanRequest {
    /// Load a request from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Daily nutrient targets for the request.
    pub fn daily_target(&self) -> Result<NutrientTarget> {
        let target = match (&self.targets, &self.profile) {
            (Some(targets), _) => *targets,
            (None, Some(profile)) => {
                profile.validate()?;
                profile.daily_targets()
            }
            (None, None) => {
                return Err(PlanError::InvalidInput(
                    "Plan request needs a profile or explicit targets".to_string(),
                ));
            }
        };

        if !target.is_valid() {
            return Err(PlanError::InvalidInput(
                "Daily targets must be finite and non-negative".to_string(),
            ));
        }
        Ok(target)
    }

    /// Meal shares must be within [0, 1] and sum to 1.
    pub fn validate_shares(&self) -> Result<()> {
        validate_shares(&self.meals)
    }
}

/// Default meals (breakfast/lunch/dinner) with no foods selected.
pub fn default_meals() -> Vec<MealSelection> {
    DEFAULT_MEAL_SHARES
        .iter()
        .map(|(name, share)| MealSelection::new(name, *share, &[]))
        .collect()
}

pub fn validate_shares(meals: &[MealSelection]) -> Result<()> {
    if meals.is_empty() {
        return Err(PlanError::InvalidInput("No meals requested".to_string()));
    }
    if let Some(bad) = meals
        .iter()
        .find(|m| !(m.share.is_finite() && (0.0..=1.0).contains(&m.share)))
    {
        return Err(PlanError::InvalidInput(format!(
            "Share for {} must be within [0, 1], got {}",
            bad.name, bad.share
        )));
    }

    let total: f64 = meals.iter().map(|m| m.share).sum();
    if (total - 1.0).abs() > SHARE_TOLERANCE {
        return Err(PlanError::InvalidInput(format!(
            "Meal shares must add up to 100%, got {:.1}%",
            total * 100.0
        )));
    }
    Ok(())
}

/// Builds meal plans from database foods using the portion optimizer.
pub struct MealGenerator<'a> {
    db: &'a FoodDatabase,
    config: &'a GaConfig,
    seed: Option<u64>,
}

impl<'a> MealGenerator<'a> {
    pub fn new(db: &'a FoodDatabase, config: &'a GaConfig) -> Self {
        Self {
            db,
            config,
            seed: None,
        }
    }

    /// Seed the per-meal generators. Meal `i` uses `seed + i`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Plan one meal against its share of the daily target.
    ///
    /// A meal with no usable foods is returned as skipped rather than as an error.
    pub fn generate_meal(
        &self,
        selection: &MealSelection,
        daily: &NutrientTarget,
        index: usize,
    ) -> Result<MealResult> {
        let normalized = normalize_selection(&selection.foods, self.db)?;
        let target = daily.scaled(selection.share);

        let items = match normalized.non_empty(&selection.name) {
            Ok(items) => items,
            Err(PlanError::EmptyInput(_)) => {
                info!("{}: no food items selected, skipping", selection.name);
                return Ok(MealResult {
                    meal: selection.name.clone(),
                    share: selection.share,
                    outcome: MealOutcome::skipped(),
                    missing: normalized.missing.clone(),
                });
            }
            Err(e) => return Err(e),
        };

        let optimizer = PortionOptimizer::new(items, target, self.config)?;
        let solution = match self.seed {
            Some(seed) => optimizer.run_seeded(seed.wrapping_add(index as u64)),
            None => optimizer.run_unseeded(),
        };

        info!(
            "{}: optimized {} foods, fitness = {:.4}",
            selection.name,
            items.len(),
            solution.fitness
        );

        let plan = decode_meal(items, &solution.portions, target, solution.fitness);

        Ok(MealResult {
            meal: selection.name.clone(),
            share: selection.share,
            outcome: MealOutcome::Planned(plan),
            missing: normalized.missing,
        })
    }

    /// Plan every meal of a request. Meals are optimized in parallel and
    /// returned in request order.
    pub fn generate_day(&self, request: &PlanRequest) -> Result<DayPlan> {
        request.validate_shares()?;
        let daily_target = request.daily_target()?;

        let meals = request
            .meals
            .par_iter()
            .enumerate()
            .map(|(i, selection)| self.generate_meal(selection, &daily_target, i))
            .collect::<Result<Vec<_>>>()?;

        Ok(DayPlan {
            daily_target,
            meals,
        })
    }
}
