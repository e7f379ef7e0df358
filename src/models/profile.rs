use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::NutrientTarget;

/// Daily activity level used to scale basal metabolic rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Multiplier applied to BMR.
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Active => 1.55,
            ActivityLevel::VeryActive => 1.75,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(PlanError::InvalidInput(format!(
                "Unknown activity level: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's physiological profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Body weight in kg.
    pub weight: f64,
    /// Height in cm.
    pub height: f64,
    pub activity_level: ActivityLevel,
}

impl UserProfile {
    /// Basal metabolic rate (Mifflin-St Jeor).
    pub fn bmr(&self) -> f64 {
        10.0 * self.weight + 6.25 * self.height - 5.0 * self.age as f64 + 5.0
    }

    /// Daily macro targets.
    ///
    /// Protein is 2 g per kg, fats supply 25% of calories, carbs take the rest.
    pub fn daily_targets(&self) -> NutrientTarget {
        let calories = self.bmr() * self.activity_level.factor();
        let protein_g = 2.0 * self.weight;
        let fats_g = 0.25 * calories / 9.0;
        let carbs_g = (calories - (protein_g * 4.0 + fats_g * 9.0)) / 4.0;

        NutrientTarget {
            calories,
            protein_g,
            carbs_g,
            fats_g,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(PlanError::InvalidInput("Weight must be positive".to_string()));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(PlanError::InvalidInput("Height must be positive".to_string()));
        }
        if !self.daily_targets().is_valid() {
            return Err(PlanError::InvalidInput(
                "Profile yields negative nutrient targets".to_string(),
            ));
        }
        Ok(())
    }
}
