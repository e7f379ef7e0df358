use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::Result;
use crate::models::{DayPlan, FoodRecord, UserProfile};
use crate::store::FoodDatabase;

/// Header of the plan log CSV.
pub const PLAN_LOG_HEADER: [&str; 15] = [
    "Name",
    "Age",
    "Weight",
    "Height",
    "Activity Level",
    "Calories",
    "Protein",
    "Carbs",
    "Fats",
    "Meal",
    "Food Items",
    "Calories per Meal",
    "Protein per Meal",
    "Carbs per Meal",
    "Fats per Meal",
];

/// Load the food database from a CSV file.
///
/// Cells and headers are trimmed; numeric cells are validated later by the normalizer.
pub fn load_database<P: AsRef<Path>>(path: P) -> Result<FoodDatabase> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let records = reader
        .deserialize::<FoodRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(FoodDatabase::new(records))
}

/// Save a day plan as pretty-printed JSON.
pub fn save_plan_json<P: AsRef<Path>>(path: P, plan: &DayPlan) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

/// Append one row per planned meal to the plan log, writing the header when
/// the file is new or empty. Skipped meals are not logged.
pub fn append_plan_log<P: AsRef<Path>>(
    path: P,
    profile: Option<&UserProfile>,
    plan: &DayPlan,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let is_new = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if is_new {
        wtr.write_record(PLAN_LOG_HEADER)?;
    }

    let (name, age, weight, height, activity) = match profile {
        Some(p) => (
            p.name.clone(),
            p.age.to_string(),
            format!("{}", p.weight),
            format!("{}", p.height),
            p.activity_level.to_string(),
        ),
        None => Default::default(),
    };
    let daily = &plan.daily_target;

    for (meal, details) in plan.planned() {
        wtr.write_record([
            name.clone(),
            age.clone(),
            weight.clone(),
            height.clone(),
            activity.clone(),
            format!("{:.1}", daily.calories),
            format!("{:.1}", daily.protein_g),
            format!("{:.1}", daily.carbs_g),
            format!("{:.1}", daily.fats_g),
            meal.to_string(),
            details.item_summary(),
            format!("{:.1}", details.macros.calories),
            format!("{:.1}", details.macros.protein),
            format!("{:.1}", details.macros.carbs),
            format!("{:.1}", details.macros.fats),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
