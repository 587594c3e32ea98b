use clap::{Args, Subcommand};
use std::str::FromStr;

use fitsync_core::{MealLog, MealType};

use super::{parse_date, parse_id, OutputFormat};
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Log a meal
    Log {
        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: String,

        /// Calories
        #[arg(long)]
        calories: Option<i32>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Notes about the meal
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show meal history
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a meal log
    Remove {
        /// Meal log id (UUID)
        id: String,
    },
}

impl MealCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            MealSubcommand::Log {
                meal_type,
                calories,
                date,
                notes,
            } => {
                let meal_type = MealType::from_str(meal_type)?;
                let mut log = MealLog::new(owner, parse_date(date)?, meal_type);
                if let Some(calories) = calories {
                    log = log.with_calories(*calories);
                }
                if let Some(notes) = notes {
                    log = log.with_notes(notes);
                }
                managers.meals.create(&log).await?;
                println!("Logged {} on {} ({})", meal_type, log.date, log.id);
                Ok(())
            }

            MealSubcommand::List { format } => {
                let mut logs = managers.meals.list(owner).await?;
                logs.sort_by_key(|l| l.date);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&logs)?),
                    OutputFormat::Text => {
                        if logs.is_empty() {
                            println!("No meal logs.");
                        }
                        for log in logs {
                            println!("{}  {}", log, log.id);
                        }
                    }
                }
                Ok(())
            }

            MealSubcommand::Remove { id } => {
                let id = parse_id(id)?;
                let log = managers.meals.get(owner, id).await?;
                managers.meals.delete(&log).await?;
                println!("Removed meal log {}", id);
                Ok(())
            }
        }
    }
}
