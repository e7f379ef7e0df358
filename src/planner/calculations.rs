use crate::models::{FoodItem, MacroTotals, MealPlan, MealPlanItem, NutrientTarget};

/// Macros contributed by one item at a given portion.
///
/// This is the single scaling rule shared by fitness evaluation and reporting.
pub fn item_macros(item: &FoodItem, portion: f64) -> MacroTotals {
    let factor = item.scale_factor(portion);
    MacroTotals {
        calories: item.calories * factor,
        protein: item.protein_g * factor,
        carbs: item.carbs_g * factor,
        fats: item.fats_g * factor,
        sugars: item.sugars_g * factor,
        fiber: item.fiber_g * factor,
    }
}

/// Total macros of a portion vector. `portions` is aligned with `items` by index.
pub fn calculate_nutrients(items: &[FoodItem], portions: &[f64]) -> MacroTotals {
    items
        .iter()
        .zip(portions)
        .map(|(item, &portion)| item_macros(item, portion))
        .sum()
}

/// Euclidean distance in (calories, protein, carbs, fats) space. Lower is better.
///
/// Calories are not rescaled, so they dominate the objective.
pub fn fitness(items: &[FoodItem], portions: &[f64], target: &NutrientTarget) -> f64 {
    let mut calories = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fats = 0.0;

    for (item, &portion) in items.iter().zip(portions) {
        let factor = item.scale_factor(portion);
        calories += item.calories * factor;
        protein += item.protein_g * factor;
        carbs += item.carbs_g * factor;
        fats += item.fats_g * factor;
    }

    let dc = calories - target.calories;
    let dp = protein - target.protein_g;
    let dh = carbs - target.carbs_g;
    let df = fats - target.fats_g;

    (dc * dc + dp * dp + dh * dh + df * df).sqrt()
}

/// Decode an optimized portion vector into display quantities and macro totals.
///
/// Meal totals are the sum of the per-item values, so sugars and fiber are
/// aggregated after the fact and never feed back into the objective.
pub fn decode_meal(
    items: &[FoodItem],
    portions: &[f64],
    target: NutrientTarget,
    fitness_score: f64,
) -> MealPlan {
    let plan_items: Vec<MealPlanItem> = items
        .iter()
        .zip(portions)
        .map(|(item, &portion)| MealPlanItem {
            name: item.name.clone(),
            quantity: item.display_quantity(portion),
            portion,
            unit_category: item.unit_category,
            macros: item_macros(item, portion),
        })
        .collect();

    let macros = plan_items.iter().map(|i| i.macros).sum();

    MealPlan {
        items: plan_items,
        macros,
        target,
        fitness_score,
    }
}
