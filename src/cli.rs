use clap::{Parser, Subcommand};

/// Portion Planner: a meal planning CLI that optimizes portion sizes toward macro targets.
#[derive(Parser, Debug)]
#[command(name = "portion_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food database CSV file.
    #[arg(short, long, global = true, default_value = "food_data.csv")]
    pub db: String,

    /// Optimizer settings JSON file. Defaults are used when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Seed for reproducible plans.
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a day interactively.
    Plan {
        /// Append the plan to this CSV log without asking.
        #[arg(long)]
        log: Option<String>,
    },

    /// Plan a day from a JSON request file.
    Generate {
        /// Plan request JSON file.
        #[arg(short, long)]
        request: String,

        /// Write the plan JSON here instead of stdout.
        #[arg(short, long)]
        out: Option<String>,

        /// Append the plan to this CSV log.
        #[arg(long)]
        log: Option<String>,
    },

    /// List foods in the database.
    Foods {
        /// Only show foods whose name or category contains this text.
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show one food as the optimizer sees it.
    Show {
        /// Food name (case-insensitive).
        name: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan { log: None }
    }
}
