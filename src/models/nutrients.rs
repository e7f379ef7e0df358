use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// The four-nutrient vector a meal should approximate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTarget {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl NutrientTarget {
    pub fn new(calories: f64, protein_g: f64, carbs_g: f64, fats_g: f64) -> Self {
        Self {
            calories,
            protein_g,
            carbs_g,
            fats_g,
        }
    }

    /// Target for a meal that takes `share` of the daily total.
    pub fn scaled(&self, share: f64) -> Self {
        Self {
            calories: self.calories * share,
            protein_g: self.protein_g * share,
            carbs_g: self.carbs_g * share,
            fats_g: self.fats_g * share,
        }
    }

    /// All components finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein_g, self.carbs_g, self.fats_g]
            .into_iter()
            .all(|v| v.is_finite() && v >= 0.0)
    }
}

/// Realized macro totals, including the reporting-only secondary nutrients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub sugars: f64,
    pub fiber: f64,
}

impl MacroTotals {
    /// Euclidean distance to a target over the four optimized nutrients.
    pub fn distance_to(&self, target: &NutrientTarget) -> f64 {
        let dc = self.calories - target.calories;
        let dp = self.protein - target.protein_g;
        let dh = self.carbs - target.carbs_g;
        let df = self.fats - target.fats_g;
        (dc * dc + dp * dp + dh * dh + df * df).sqrt()
    }
}

impl Add for MacroTotals {
    type Output = MacroTotals;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fats += rhs.fats;
        self.sugars += rhs.sugars;
        self.fiber += rhs.fiber;
    }
}

impl std::iter::Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroTotals::default(), Add::add)
    }
}

/// Percentage over (+) or under (-) the target, per optimized nutrient.
///
/// A zero target component reports 0.0 rather than dividing by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetDeviation {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl TargetDeviation {
    pub fn between(totals: &MacroTotals, target: &NutrientTarget) -> Self {
        fn pct(actual: f64, target: f64) -> f64 {
            if target > 0.0 {
                100.0 * (actual - target) / target
            } else {
                0.0
            }
        }

        Self {
            calories: pct(totals.calories, target.calories),
            protein: pct(totals.protein, target.protein_g),
            carbs: pct(totals.carbs, target.carbs_g),
            fats: pct(totals.fats, target.fats_g),
        }
    }

    /// Nutrient with the largest absolute deviation.
    pub fn critical_nutrient(&self) -> &'static str {
        [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ]
        .into_iter()
        .fold(("calories", f64::NEG_INFINITY), |best, (name, v)| {
            if v.abs() > best.1 { (name, v.abs()) } else { best }
        })
        .0
    }
}
