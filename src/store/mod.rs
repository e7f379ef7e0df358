mod database;
mod persistence;

pub use database::FoodDatabase;
pub use persistence::{append_plan_log, load_database, save_plan_json, PLAN_LOG_HEADER};
