use clap::Parser;
use log::info;
use std::path::Path;

use portion_planner_rs::cli::{Cli, Command};
use portion_planner_rs::error::{PlanError, Result};
use portion_planner_rs::interface::{
    collect_plan_request, display_day_plan, display_food_list, prompt_yes_no,
};
use portion_planner_rs::models::DayPlan;
use portion_planner_rs::planner::{normalize_record, GaConfig, MealGenerator, PlanRequest};
use portion_planner_rs::store::{append_plan_log, load_database, save_plan_json, FoodDatabase};

const DEFAULT_LOG: &str = "logs/meal_plans.csv";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let config = match &cli.config {
        Some(path) => GaConfig::load(path)?,
        None => GaConfig::default(),
    };
    info!("Optimizer settings: {}", config.display());

    match command {
        Command::Plan { log } => cmd_plan(&cli.db, &config, cli.seed, log.as_deref()),
        Command::Generate { request, out, log } => cmd_generate(
            &cli.db,
            &config,
            cli.seed,
            &request,
            out.as_deref(),
            log.as_deref(),
        ),
        Command::Foods { filter } => cmd_foods(&cli.db, filter.as_deref()),
        Command::Show { name } => cmd_show(&cli.db, &name),
    }
}

fn open_database(db_path: &str) -> Result<FoodDatabase> {
    if !Path::new(db_path).exists() {
        return Err(PlanError::InvalidInput(format!(
            "Food database not found: {}",
            db_path
        )));
    }

    let db = load_database(db_path)?;
    info!("Loaded {} foods from {}", db.len(), db_path);
    Ok(db)
}

/// Plan a day interactively.
fn cmd_plan(db_path: &str, config: &GaConfig, seed: Option<u64>, log: Option<&str>) -> Result<()> {
    let db = open_database(db_path)?;
    if db.is_empty() {
        println!("The food database is empty.");
        return Ok(());
    }

    println!("Loaded {} foods", db.len());
    println!();

    let request = collect_plan_request(&db)?;

    println!();
    println!("Optimizing portions...");
    let plan = MealGenerator::new(&db, config)
        .with_seed(seed)
        .generate_day(&request)?;

    display_day_plan(&plan);

    if plan.is_empty() {
        return Ok(());
    }

    let log_path = match log {
        Some(path) => Some(path),
        None if prompt_yes_no("Save this plan to the log?", true)? => Some(DEFAULT_LOG),
        None => None,
    };
    if let Some(path) = log_path {
        append_plan_log(path, request.profile.as_ref(), &plan)?;
        println!("Plan saved to {}", path);
    }

    Ok(())
}

/// Plan a day from a JSON request.
fn cmd_generate(
    db_path: &str,
    config: &GaConfig,
    seed: Option<u64>,
    request_path: &str,
    out: Option<&str>,
    log: Option<&str>,
) -> Result<()> {
    let db = open_database(db_path)?;
    let request = PlanRequest::load(request_path)?;

    let plan: DayPlan = MealGenerator::new(&db, config)
        .with_seed(seed)
        .generate_day(&request)?;

    match out {
        Some(path) => {
            save_plan_json(path, &plan)?;
            info!("Plan written to {}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    if let Some(path) = log {
        append_plan_log(path, request.profile.as_ref(), &plan)?;
        info!("Plan appended to {}", path);
    }

    Ok(())
}

/// List database foods, optionally filtered.
fn cmd_foods(db_path: &str, filter: Option<&str>) -> Result<()> {
    let db = open_database(db_path)?;

    match filter {
        Some(f) => display_food_list(&db.search(f), &format!("Foods matching '{}'", f)),
        None => display_food_list(&db.all_foods(), "Foods"),
    }

    Ok(())
}

/// Show a single food after validation.
fn cmd_show(db_path: &str, name: &str) -> Result<()> {
    let db = open_database(db_path)?;

    let record = db.get(name).ok_or_else(|| match db.closest_match(name) {
        Some(s) => PlanError::FoodNotFound(format!("{} (did you mean '{}'?)", name, s)),
        None => PlanError::FoodNotFound(name.to_string()),
    })?;
    let item = normalize_record(record)?;

    println!("{}", item.debug_string());
    println!(
        "Portions: {} (sugars {} g, fiber {} g per reference)",
        item.unit_category.as_label(),
        item.sugars_g,
        item.fiber_g
    );

    Ok(())
}
