use serde::{Deserialize, Serialize};

/// A raw food database row as read from the CSV file.
///
/// Numeric columns are kept as text; the normalizer owns parsing and validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "FOOD ITEM")]
    pub name: String,

    #[serde(rename = "CATEGORY", default)]
    pub category: Option<String>,

    #[serde(rename = "QUANTITY", default)]
    pub quantity: Option<String>,

    #[serde(rename = "UNIT", default)]
    pub unit: Option<String>,

    #[serde(rename = "PROTEIN", default)]
    pub protein: Option<String>,

    #[serde(rename = "NET CARBS", default)]
    pub carbs: Option<String>,

    #[serde(rename = "DIETARY FIBRE", default)]
    pub fiber: Option<String>,

    #[serde(rename = "TOTAL SUGARS", default)]
    pub sugars: Option<String>,

    #[serde(rename = "FATS", default)]
    pub fats: Option<String>,

    #[serde(rename = "CALORIES", default)]
    pub calories: Option<String>,

    #[serde(rename = "unit_category", default)]
    pub unit_category: Option<String>,
}

impl FoodRecord {
    /// Canonical key for lookups (lowercase, trimmed name).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Display unit, falling back to "unit" when the row has none.
    pub fn unit_label(&self) -> String {
        match self.unit.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => u.to_string(),
            _ => "unit".to_string(),
        }
    }

    /// Resolve the unit category from the explicit label or the raw unit.
    pub fn unit_category(&self) -> UnitCategory {
        match self.unit_category.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => UnitCategory::from_label(label),
            _ => UnitCategory::from_unit(self.unit.as_deref().unwrap_or("")),
        }
    }
}

/// How a food is portioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    /// Continuous mass/volume (g, ml). Genes are grams.
    BaseUnit,
    /// Countable servings. Genes are serving multipliers.
    DiscreteUnit,
}

impl UnitCategory {
    /// Category label used in the food database.
    pub const BASE_LABEL: &'static str = "Base Units";
    pub const DISCRETE_LABEL: &'static str = "Discrete Units";

    /// Categorize a raw unit string (G/ML are base units, everything else is countable).
    pub fn from_unit(unit: &str) -> Self {
        match unit.trim().to_uppercase().as_str() {
            "G" | "ML" => UnitCategory::BaseUnit,
            _ => UnitCategory::DiscreteUnit,
        }
    }

    /// Map a database `unit_category` label to a category.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(Self::BASE_LABEL) {
            UnitCategory::BaseUnit
        } else {
            UnitCategory::DiscreteUnit
        }
    }

    /// Multiplier applied to per-reference nutrient values for a given portion.
    #[inline]
    pub fn scale_factor(self, portion: f64, reference_quantity: f64) -> f64 {
        match self {
            UnitCategory::BaseUnit => portion / reference_quantity,
            UnitCategory::DiscreteUnit => portion,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            UnitCategory::BaseUnit => Self::BASE_LABEL,
            UnitCategory::DiscreteUnit => Self::DISCRETE_LABEL,
        }
    }

    pub fn is_discrete(self) -> bool {
        matches!(self, UnitCategory::DiscreteUnit)
    }
}

/// A validated candidate food for one meal.
///
/// Nutrient values are per `reference_quantity` of the food's native unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub unit_category: UnitCategory,
    pub unit: String,
    pub reference_quantity: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    #[serde(default)]
    pub sugars_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
}

impl FoodItem {
    /// Scale factor for a portion of this item.
    #[inline]
    pub fn scale_factor(&self, portion: f64) -> f64 {
        self.unit_category
            .scale_factor(portion, self.reference_quantity)
    }

    /// Human-readable quantity for a portion.
    ///
    /// Base units print grams with two decimals; discrete units print the
    /// multiplier against the whole-number reference serving.
    pub fn display_quantity(&self, portion: f64) -> String {
        match self.unit_category {
            UnitCategory::BaseUnit => format!("{:.2} g", portion),
            UnitCategory::DiscreteUnit => format!(
                "{}*({} {})",
                portion.round() as i64,
                self.reference_quantity.trunc() as i64,
                self.unit
            ),
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} [{:?}, {} {}]: {} cal, P:{} C:{} F:{}",
            self.name,
            self.unit_category,
            self.reference_quantity,
            self.unit,
            self.calories,
            self.protein_g,
            self.carbs_g,
            self.fats_g
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats() -> FoodItem {
        FoodItem {
            name: "Oats".to_string(),
            unit_category: UnitCategory::BaseUnit,
            unit: "g".to_string(),
            reference_quantity: 100.0,
            calories: 389.0,
            protein_g: 16.9,
            carbs_g: 66.3,
            fats_g: 6.9,
            sugars_g: 0.0,
            fiber_g: 10.6,
        }
    }

    #[test]
    fn test_from_unit() {
        assert_eq!(UnitCategory::from_unit("g"), UnitCategory::BaseUnit);
        assert_eq!(UnitCategory::from_unit("ML"), UnitCategory::BaseUnit);
        assert_eq!(UnitCategory::from_unit("BAR"), UnitCategory::DiscreteUnit);
        assert_eq!(UnitCategory::from_unit("CUP"), UnitCategory::DiscreteUnit);
        assert_eq!(UnitCategory::from_unit(""), UnitCategory::DiscreteUnit);
    }

    #[test]
    fn test_record_prefers_explicit_label() {
        let record = FoodRecord {
            name: "Protein Bar".to_string(),
            unit: Some("G".to_string()),
            unit_category: Some("Count Units".to_string()),
            ..Default::default()
        };
        assert_eq!(record.unit_category(), UnitCategory::DiscreteUnit);

        let record = FoodRecord {
            name: "Milk".to_string(),
            unit: Some("ml".to_string()),
            ..Default::default()
        };
        assert_eq!(record.unit_category(), UnitCategory::BaseUnit);
    }

    #[test]
    fn test_scale_factor() {
        let item = oats();
        assert!((item.scale_factor(50.0) - 0.5).abs() < 1e-12);

        let bar = FoodItem {
            unit_category: UnitCategory::DiscreteUnit,
            reference_quantity: 45.0,
            ..oats()
        };
        assert_eq!(bar.scale_factor(3.0), 3.0);
    }

    #[test]
    fn test_display_quantity() {
        let item = oats();
        assert_eq!(item.display_quantity(51.4037), "51.40 g");

        let bar = FoodItem {
            name: "Bar".to_string(),
            unit_category: UnitCategory::DiscreteUnit,
            unit: "BAR".to_string(),
            reference_quantity: 1.0,
            ..oats()
        };
        assert_eq!(bar.display_quantity(2.0), "2*(1 BAR)");
    }
}
