use crate::models::{DayPlan, FoodRecord, MealOutcome, MealResult};

/// Display a day plan in a formatted table.
pub fn display_day_plan(plan: &DayPlan) {
    println!();
    println!("=== Meal Plan ===");

    for meal in &plan.meals {
        display_meal(meal);
    }

    if plan.is_empty() {
        println!();
        println!("No meals planned (no food items selected).");
        println!();
        return;
    }

    let daily = &plan.daily_target;
    let totals = plan.totals();
    let deviation = plan.deviation();

    println!();
    println!("--- Summary ---");
    println!(
        "{:<10} {:>9} {:>9} {:>8}",
        "", "Planned", "Target", "Dev"
    );
    for (label, actual, target, dev) in [
        ("Calories", totals.calories, daily.calories, deviation.calories),
        ("Protein", totals.protein, daily.protein_g, deviation.protein),
        ("Carbs", totals.carbs, daily.carbs_g, deviation.carbs),
        ("Fats", totals.fats, daily.fats_g, deviation.fats),
    ] {
        println!(
            "{:<10} {:>9.1} {:>9.1} {:>+7.1}%",
            label, actual, target, dev
        );
    }
    println!("Sugars: {:.1} g, Fiber: {:.1} g", totals.sugars, totals.fiber);
    println!("Largest deviation: {}", deviation.critical_nutrient());
    println!();
}

fn display_meal(meal: &MealResult) {
    println!();
    println!("--- {} ({:.0}%) ---", meal.meal, meal.share * 100.0);

    for missing in &meal.missing {
        match &missing.suggestion {
            Some(s) => println!("  ! '{}' not found (did you mean '{}'?)", missing.name, s),
            None => println!("  ! '{}' not found", missing.name),
        }
    }

    let plan = match &meal.outcome {
        MealOutcome::Planned(plan) => plan,
        MealOutcome::Skipped { message } => {
            println!("  {}", message);
            return;
        }
    };

    let width = plan.items.iter().map(|i| i.name.len()).max().unwrap_or(10);
    let qty_width = plan.items.iter().map(|i| i.quantity.len()).max().unwrap_or(8);

    for (i, item) in plan.items.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {:>qty$}  - {:>6.1} kcal | P {:>5.1} C {:>5.1} F {:>5.1}",
            i + 1,
            item.name,
            item.quantity,
            item.macros.calories,
            item.macros.protein,
            item.macros.carbs,
            item.macros.fats,
            width = width,
            qty = qty_width
        );
    }

    println!(
        "     Total: {:.1} kcal, P {:.1} g, C {:.1} g, F {:.1} g (target {:.0} kcal, P {:.1} C {:.1} F {:.1})",
        plan.macros.calories,
        plan.macros.protein,
        plan.macros.carbs,
        plan.macros.fats,
        plan.target.calories,
        plan.target.protein_g,
        plan.target.carbs_g,
        plan.target.fats_g
    );
    println!("     Fitness: {:.4}", plan.fitness_score);
}

/// Display a simple list of foods with their details.
pub fn display_food_list(foods: &[&FoodRecord], title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title, foods.len());
    println!();

    for food in foods {
        println!(
            "  {} [{}] - {} {} : {} kcal, P:{} C:{} F:{} ({})",
            food.name,
            food.category.as_deref().unwrap_or("-"),
            food.quantity.as_deref().unwrap_or("?"),
            food.unit_label(),
            food.calories.as_deref().unwrap_or("?"),
            food.protein.as_deref().unwrap_or("?"),
            food.carbs.as_deref().unwrap_or("?"),
            food.fats.as_deref().unwrap_or("?"),
            food.unit_category().as_label()
        );
    }

    println!();
}
