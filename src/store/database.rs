use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::models::FoodRecord;
use crate::planner::constants::SUGGESTION_THRESHOLD;

/// In-memory food database keyed by lowercase name.
///
/// Holds one row per name; when the source has duplicates the first row wins.
pub struct FoodDatabase {
    foods: HashMap<String, FoodRecord>,
    /// Keys in source order, for stable listings.
    order: Vec<String>,
}

impl FoodDatabase {
    /// Create a database from raw rows.
    pub fn new(records: Vec<FoodRecord>) -> Self {
        let mut foods = HashMap::new();
        let mut order = Vec::new();

        for record in records {
            let key = record.key();
            if key.is_empty() || foods.contains_key(&key) {
                continue;
            }
            order.push(key.clone());
            foods.insert(key, record);
        }

        Self { foods, order }
    }

    /// Get a food by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FoodRecord> {
        self.foods.get(&name.trim().to_lowercase())
    }

    /// Closest food name by Jaro-Winkler similarity, if above the suggestion threshold.
    pub fn closest_match(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.ranked_matches(&needle)
            .into_iter()
            .next()
            .map(|(record, _)| record.name.as_str())
    }

    /// Foods similar to `name`, best first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<&FoodRecord> {
        let needle = name.trim().to_lowercase();
        self.ranked_matches(&needle)
            .into_iter()
            .take(limit)
            .map(|(record, _)| record)
            .collect()
    }

    fn ranked_matches(&self, needle: &str) -> Vec<(&FoodRecord, f64)> {
        let mut candidates: Vec<(&FoodRecord, f64)> = self
            .all_foods()
            .into_iter()
            .map(|f| (f, jaro_winkler(&f.key(), needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }

    /// Foods whose name or category contains `filter` (case-insensitive).
    pub fn search(&self, filter: &str) -> Vec<&FoodRecord> {
        let needle = filter.trim().to_lowercase();
        self.all_foods()
            .into_iter()
            .filter(|f| {
                f.key().contains(&needle)
                    || f
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// All foods in source order.
    pub fn all_foods(&self) -> Vec<&FoodRecord> {
        self.order.iter().filter_map(|k| self.foods.get(k)).collect()
    }

    /// Count of foods in the database.
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Check if the database has no foods.
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str, calories: &str) -> FoodRecord {
        FoodRecord {
            name: name.to_string(),
            category: Some(category.to_string()),
            quantity: Some("100".to_string()),
            unit: Some("G".to_string()),
            calories: Some(calories.to_string()),
            ..Default::default()
        }
    }

    fn sample_db() -> FoodDatabase {
        FoodDatabase::new(vec![
            record("Rolled Oats", "Grains", "389"),
            record("Banana", "Fruit", "89"),
            record("Greek Yogurt", "Dairy", "97"),
            record("banana", "Fruit", "1000"),
        ])
    }

    #[test]
    fn test_get_case_insensitive() {
        let db = sample_db();
        assert!(db.get("rolled oats").is_some());
        assert!(db.get("ROLLED OATS").is_some());
        assert!(db.get("  Banana ").is_some());
        assert!(db.get("Apple").is_none());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let db = sample_db();
        assert_eq!(db.len(), 3);
        assert_eq!(db.get("banana").unwrap().calories.as_deref(), Some("89"));
    }

    #[test]
    fn test_names_keep_source_order() {
        let db = sample_db();
        let names: Vec<&str> = db.all_foods().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Rolled Oats", "Banana", "Greek Yogurt"]);
    }

    #[test]
    fn test_closest_match() {
        let db = sample_db();
        assert_eq!(db.closest_match("Rolled Oat"), Some("Rolled Oats"));
        assert_eq!(db.closest_match("Bananna"), Some("Banana"));
        assert_eq!(db.closest_match("xyz"), None);
    }

    #[test]
    fn test_search_by_category() {
        let db = sample_db();
        let dairy = db.search("dairy");
        assert_eq!(dairy.len(), 1);
        assert_eq!(dairy[0].name, "Greek Yogurt");
        assert_eq!(db.search("an").len(), 1);
    }
}
