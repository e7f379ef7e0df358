mod food;
mod nutrients;
mod plan;
mod profile;

pub use food::{FoodItem, FoodRecord, UnitCategory};
pub use nutrients::{MacroTotals, NutrientTarget, TargetDeviation};
pub use plan::{
    DayPlan, MealOutcome, MealPlan, MealPlanItem, MealResult, MissingFood, NO_ITEMS_MESSAGE,
};
pub use profile::{ActivityLevel, UserProfile};
