pub mod calculations;
pub mod config;
pub mod constants;
pub mod generator;
pub mod genetic;
pub mod normalizer;

pub use calculations::{calculate_nutrients, decode_meal, fitness, item_macros};
pub use config::{GaConfig, PortionBounds};
pub use constants::*;
pub use generator::{default_meals, validate_shares, MealGenerator, MealSelection, PlanRequest};
pub use genetic::{GenerationStats, PortionOptimizer, PortionVector, Solution};
pub use normalizer::{normalize_record, normalize_selection, NormalizedMeal};
