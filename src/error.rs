use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Data error for '{food}': {reason}")]
    DataError { food: String, reason: String },

    #[error("No food items selected for {0}")]
    EmptyInput(String),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid optimizer config: {0}")]
    InvalidConfig(String),
}

impl PlanError {
    pub fn data(food: &str, reason: impl Into<String>) -> Self {
        PlanError::DataError {
            food: food.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
