mod config_cmd;
mod goal;
mod meal;
mod measure;
mod profile;
mod steps;
mod sync_cmd;
mod weight;
mod workout;

pub use config_cmd::ConfigCommand;
pub use goal::{GoalCommand, GoalSubcommand};
pub use meal::{MealCommand, MealSubcommand};
pub use measure::{MeasureCommand, MeasureSubcommand};
pub use profile::{ProfileCommand, ProfileSubcommand};
pub use steps::{StepsCommand, StepsSubcommand};
pub use sync_cmd::SyncCommand;
pub use weight::{WeightCommand, WeightSubcommand};
pub use workout::{WorkoutCommand, WorkoutSubcommand};

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use uuid::Uuid;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses a YYYY-MM-DD argument, defaulting to today.
fn parse_date(arg: &Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", s).into()),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_id(arg: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    Uuid::parse_str(arg).map_err(|_| format!("Invalid id: {}", arg).into())
}
