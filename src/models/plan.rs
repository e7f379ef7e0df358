use serde::{Deserialize, Serialize};

use crate::models::{MacroTotals, NutrientTarget, TargetDeviation, UnitCategory};

/// Marker message for a meal with no usable foods.
pub const NO_ITEMS_MESSAGE: &str = "No food items selected.";

/// One food in a decoded meal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanItem {
    /// Name of the food.
    pub name: String,

    /// Display quantity, e.g. "51.40 g" or "2*(1 BAR)".
    pub quantity: String,

    /// Raw gene value the quantity was decoded from.
    pub portion: f64,

    pub unit_category: UnitCategory,

    /// Macros contributed by this portion.
    pub macros: MacroTotals,
}

/// An optimized meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub items: Vec<MealPlanItem>,
    pub macros: MacroTotals,
    pub target: NutrientTarget,
    pub fitness_score: f64,
}

impl MealPlan {
    /// Semicolon-joined "quantity of name" list, as written to the plan log.
    pub fn item_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} of {}", item.quantity, item.name))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MealOutcome {
    Planned(MealPlan),
    Skipped { message: String },
}

impl MealOutcome {
    pub fn skipped() -> Self {
        MealOutcome::Skipped {
            message: NO_ITEMS_MESSAGE.to_string(),
        }
    }

    pub fn plan(&self) -> Option<&MealPlan> {
        match self {
            MealOutcome::Planned(plan) => Some(plan),
            MealOutcome::Skipped { .. } => None,
        }
    }
}

/// A selected food that was not found in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFood {
    pub name: String,
    /// Closest database name, if any is similar enough.
    pub suggestion: Option<String>,
}

/// Result for one named meal of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealResult {
    pub meal: String,
    pub share: f64,
    pub outcome: MealOutcome,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MissingFood>,
}

/// A full day's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub daily_target: NutrientTarget,
    pub meals: Vec<MealResult>,
}

impl DayPlan {
    /// Macro totals across all planned meals.
    pub fn totals(&self) -> MacroTotals {
        self.planned().map(|(_, plan)| plan.macros).sum()
    }

    /// Day totals relative to the daily target, in percent.
    pub fn deviation(&self) -> TargetDeviation {
        TargetDeviation::between(&self.totals(), &self.daily_target)
    }

    /// Iterate over planned meals with their names.
    pub fn planned(&self) -> impl Iterator<Item = (&str, &MealPlan)> {
        self.meals
            .iter()
            .filter_map(|m| m.outcome.plan().map(|p| (m.meal.as_str(), p)))
    }

    pub fn is_empty(&self) -> bool {
        self.planned().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: &str, calories: f64) -> MealPlanItem {
        MealPlanItem {
            name: name.to_string(),
            quantity: quantity.to_string(),
            portion: 1.0,
            unit_category: UnitCategory::DiscreteUnit,
            macros: MacroTotals {
                calories,
                ..Default::default()
            },
        }
    }

    fn plan(calories: f64) -> MealPlan {
        MealPlan {
            items: vec![
                item("Bar", "2*(1 BAR)", calories / 2.0),
                item("Bagel", "1*(1 BAGEL)", calories / 2.0),
            ],
            macros: MacroTotals {
                calories,
                ..Default::default()
            },
            target: NutrientTarget::default(),
            fitness_score: 0.0,
        }
    }

    #[test]
    fn test_item_summary() {
        assert_eq!(plan(650.0).item_summary(), "2*(1 BAR) of Bar; 1*(1 BAGEL) of Bagel");
    }

    #[test]
    fn test_day_totals_skip_unplanned() {
        let day = DayPlan {
            daily_target: NutrientTarget::new(2000.0, 0.0, 0.0, 0.0),
            meals: vec![
                MealResult {
                    meal: "Breakfast".to_string(),
                    share: 0.3,
                    outcome: MealOutcome::Planned(plan(600.0)),
                    missing: vec![],
                },
                MealResult {
                    meal: "Lunch".to_string(),
                    share: 0.4,
                    outcome: MealOutcome::skipped(),
                    missing: vec![],
                },
                MealResult {
                    meal: "Dinner".to_string(),
                    share: 0.3,
                    outcome: MealOutcome::Planned(plan(800.0)),
                    missing: vec![],
                },
            ],
        };

        assert_eq!(day.totals().calories, 1400.0);
        assert_eq!(day.planned().count(), 2);
        assert!((day.deviation().calories + 30.0).abs() < 1e-9);
        assert!(!day.is_empty());
    }

    #[test]
    fn test_skipped_serializes_with_marker() {
        let json = serde_json::to_value(MealOutcome::skipped()).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["message"], NO_ITEMS_MESSAGE);
    }
}
