use dialoguer::{Confirm, Input, Select};

use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, UserProfile};
use crate::planner::generator::{default_meals, validate_shares, MealSelection, PlanRequest};
use crate::store::FoodDatabase;

/// Fuzzy candidates offered when a typed food has no exact match.
const MAX_CANDIDATES: usize = 5;

fn parse_number<T: std::str::FromStr>(input: &str) -> Result<T> {
    input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number: '{}'", input.trim())))
}

/// Prompt for the user's profile.
pub fn prompt_profile() -> Result<UserProfile> {
    let name: String = Input::new()
        .with_prompt("What is your name?")
        .interact_text()?;

    let age: String = Input::new()
        .with_prompt("Age (years)")
        .default("30".to_string())
        .interact_text()?;

    let weight: String = Input::new()
        .with_prompt("Weight (kg)")
        .default("70".to_string())
        .interact_text()?;

    let height: String = Input::new()
        .with_prompt("Height (cm)")
        .default("175".to_string())
        .interact_text()?;

    let options: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(1)
        .interact()?;

    let profile = UserProfile {
        name: name.trim().to_string(),
        age: parse_number(&age)?,
        weight: parse_number(&weight)?,
        height: parse_number(&height)?,
        activity_level: ActivityLevel::ALL[selection],
    };
    profile.validate()?;

    Ok(profile)
}

/// Prompt for each meal's share of the day, in percent.
///
/// Keeps the default split unless the user asks to change it; re-asks until
/// the shares add up to 100%.
pub fn prompt_meal_shares() -> Result<Vec<MealSelection>> {
    let mut meals = default_meals();

    let split: Vec<String> = meals
        .iter()
        .map(|m| format!("{} {:.0}%", m.name, m.share * 100.0))
        .collect();
    if !prompt_yes_no(&format!("Change the meal split ({})?", split.join(", ")), false)? {
        return Ok(meals);
    }

    loop {
        for meal in meals.iter_mut() {
            meal.share = prompt_share(&meal.name, meal.share)?;
        }

        match validate_shares(&meals) {
            Ok(()) => return Ok(meals),
            Err(e) => println!("{}", e),
        }
    }
}

/// Prompt for one meal's share in percent, re-asking on non-numeric input.
fn prompt_share(meal: &str, current: f64) -> Result<f64> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("{} share (%)", meal))
            .default(format!("{:.0}", current * 100.0))
            .interact_text()?;

        match parse_share(&input) {
            Ok(share) => return Ok(share),
            Err(e) => println!("{}", e),
        }
    }
}

/// Percent text to a fraction of the day.
fn parse_share(input: &str) -> Result<f64> {
    let percent: f64 = parse_number(input.trim().trim_end_matches('%'))?;
    if !percent.is_finite() {
        return Err(PlanError::InvalidInput(format!("Invalid share: '{}'", input.trim())));
    }
    Ok(percent / 100.0)
}

/// Prompt for the foods of one meal with fuzzy matching.
pub fn prompt_meal_foods(meal: &str, db: &FoodDatabase) -> Result<Vec<String>> {
    let mut foods: Vec<String> = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt(format!("{}: add a food (or press Enter to finish)", meal))
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        // Try exact match first (case-insensitive)
        if let Some(food) = db.get(input) {
            add_food(&mut foods, &food.name);
            continue;
        }

        let candidates = db.fuzzy_matches(input, MAX_CANDIDATES);

        if candidates.is_empty() {
            println!("No matching food found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let name = &candidates[0].name;
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", name))
                .default(true)
                .interact()?;

            if confirm {
                add_food(&mut foods, name);
            }
        } else {
            let mut options: Vec<String> = candidates.iter().map(|f| f.name.clone()).collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            if selection < candidates.len() {
                add_food(&mut foods, &candidates[selection].name);
            }
        }
    }

    Ok(foods)
}

fn add_food(foods: &mut Vec<String>, name: &str) {
    if foods.iter().any(|f| f.eq_ignore_ascii_case(name)) {
        println!("Already added: {}", name);
    } else {
        foods.push(name.to_string());
        println!("Added: {}", name);
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a full plan request interactively.
pub fn collect_plan_request(db: &FoodDatabase) -> Result<PlanRequest> {
    let profile = prompt_profile()?;
    let targets = profile.daily_targets();
    println!(
        "Daily targets: {:.0} kcal, {:.1} g protein, {:.1} g carbs, {:.1} g fats",
        targets.calories, targets.protein_g, targets.carbs_g, targets.fats_g
    );
    println!();

    let mut meals = prompt_meal_shares()?;
    for meal in meals.iter_mut() {
        println!();
        meal.foods = prompt_meal_foods(&meal.name, db)?;
    }

    Ok(PlanRequest {
        profile: Some(profile),
        targets: None,
        meals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u32>(" 42 ").unwrap(), 42);
        assert_eq!(parse_number::<f64>("70.5").unwrap(), 70.5);
        assert!(parse_number::<u32>("forty").is_err());
        assert!(parse_number::<u32>("-3").is_err());
    }

    #[test]
    fn test_parse_share() {
        assert_eq!(parse_share("40").unwrap(), 0.4);
        assert_eq!(parse_share(" 25% ").unwrap(), 0.25);
        assert!(matches!(parse_share("lots"), Err(PlanError::InvalidInput(_))));
        assert!(parse_share("inf").is_err());
    }

    #[test]
    fn test_add_food_skips_repeats() {
        let mut foods = Vec::new();
        add_food(&mut foods, "Oats");
        add_food(&mut foods, "oats");
        add_food(&mut foods, "Milk");
        assert_eq!(foods, vec!["Oats", "Milk"]);
    }
}
