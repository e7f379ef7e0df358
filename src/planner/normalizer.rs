use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{PlanError, Result};
use crate::models::{FoodItem, FoodRecord, MissingFood};
use crate::store::FoodDatabase;

/// Candidate foods for one meal, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedMeal {
    pub items: Vec<FoodItem>,
    /// Selected names with no database row. They are left out of `items`.
    pub missing: Vec<MissingFood>,
}

impl NormalizedMeal {
    /// The items, or `EmptyInput` when nothing usable was selected.
    pub fn non_empty(&self, meal: &str) -> Result<&[FoodItem]> {
        if self.items.is_empty() {
            Err(PlanError::EmptyInput(meal.to_string()))
        } else {
            Ok(&self.items)
        }
    }
}

/// Look up and validate the selected foods for a meal.
///
/// Unknown names are skipped with a warning and reported in `missing`;
/// repeated names keep their first position. A matched row with bad numeric
/// data fails the whole meal with `DataError`.
pub fn normalize_selection(names: &[String], db: &FoodDatabase) -> Result<NormalizedMeal> {
    let mut meal = NormalizedMeal::default();
    let mut seen = HashSet::new();

    for name in names {
        let Some(record) = db.get(name) else {
            let suggestion = db.closest_match(name).map(str::to_string);
            match &suggestion {
                Some(s) => warn!("Food '{}' not found in database (did you mean '{}'?)", name, s),
                None => warn!("Food '{}' not found in database", name),
            }
            meal.missing.push(MissingFood {
                name: name.clone(),
                suggestion,
            });
            continue;
        };

        if !seen.insert(record.key()) {
            warn!("Food '{}' selected more than once; keeping the first", record.name);
            continue;
        }

        let item = normalize_record(record)?;
        debug!("{}", item.debug_string());
        meal.items.push(item);
    }

    Ok(meal)
}

/// Convert a database row into a validated `FoodItem`.
pub fn normalize_record(record: &FoodRecord) -> Result<FoodItem> {
    let name = record.name.trim();

    let reference_quantity = parse_required(name, "QUANTITY", record.quantity.as_deref())?;
    if reference_quantity <= 0.0 {
        return Err(PlanError::data(name, "QUANTITY must be greater than zero"));
    }

    Ok(FoodItem {
        name: name.to_string(),
        unit_category: record.unit_category(),
        unit: record.unit_label(),
        reference_quantity,
        calories: parse_required(name, "CALORIES", record.calories.as_deref())?,
        protein_g: parse_required(name, "PROTEIN", record.protein.as_deref())?,
        carbs_g: parse_required(name, "NET CARBS", record.carbs.as_deref())?,
        fats_g: parse_required(name, "FATS", record.fats.as_deref())?,
        sugars_g: parse_optional(name, "TOTAL SUGARS", record.sugars.as_deref())?,
        fiber_g: parse_optional(name, "DIETARY FIBRE", record.fiber.as_deref())?,
    })
}

/// Strip whitespace and a trailing gram suffix ("12.5 g").
fn clean_numeric(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(['g', 'G'])
        .map(str::trim_end)
        .unwrap_or(trimmed)
}

fn parse_value(food: &str, field: &str, raw: &str) -> Result<f64> {
    let value: f64 = clean_numeric(raw)
        .parse()
        .map_err(|_| PlanError::data(food, format!("{} is not numeric: '{}'", field, raw)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PlanError::data(
            food,
            format!("{} must be a finite non-negative number, got {}", field, value),
        ));
    }
    Ok(value)
}

fn parse_required(food: &str, field: &str, raw: Option<&str>) -> Result<f64> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => parse_value(food, field, v),
        _ => Err(PlanError::data(food, format!("{} is missing", field))),
    }
}

/// Secondary nutrients default to zero when absent.
fn parse_optional(food: &str, field: &str, raw: Option<&str>) -> Result<f64> {
    match raw.map(str::trim) {
        Some(v) if !v.is_empty() => parse_value(food, field, v),
        _ => Ok(0.0),
    }
}
