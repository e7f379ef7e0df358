pub mod prompts;
pub mod render;

pub use prompts::{
    collect_plan_request, prompt_meal_foods, prompt_meal_shares, prompt_profile, prompt_yes_no,
};
pub use render::{display_day_plan, display_food_list};
