use chrono::NaiveDate;
use clap::{Args, Subcommand};

use fitsync_core::WeightGoal;

use super::OutputFormat;
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub command: GoalSubcommand,
}

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// Set a weight goal (replaces the current one)
    Set {
        /// Target weight in kilograms
        target_kg: f64,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        by: String,

        /// Starting weight, defaults to the latest logged weight
        #[arg(long)]
        start_kg: Option<f64>,
    },

    /// Show the current goal and progress
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Drop the current goal
    Clear,
}

impl GoalCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            GoalSubcommand::Set {
                target_kg,
                by,
                start_kg,
            } => {
                let target_date = NaiveDate::parse_from_str(by, "%Y-%m-%d")
                    .map_err(|_| format!("Invalid date '{}' (expected YYYY-MM-DD)", by))?;

                let start_kg = match start_kg {
                    Some(kg) => *kg,
                    None => latest_weight(managers, owner)
                        .await?
                        .ok_or("No weight logged yet; pass --start-kg")?,
                };

                // A new goal supersedes any existing one.
                for old in managers.goals.list(owner).await? {
                    managers.goals.delete(&old).await?;
                }

                let goal = WeightGoal::new(owner, start_kg, *target_kg, target_date);
                managers.goals.create(&goal).await?;
                println!(
                    "Goal set: {:.1} kg -> {:.1} kg by {}",
                    start_kg, target_kg, target_date
                );
                Ok(())
            }

            GoalSubcommand::Show { format } => {
                let goals = managers.goals.list(owner).await?;
                let Some(goal) = goals.last() else {
                    println!("No goal set.");
                    return Ok(());
                };

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(goal)?),
                    OutputFormat::Text => {
                        println!(
                            "Goal: {:.1} kg -> {:.1} kg by {}",
                            goal.start_kg, goal.target_kg, goal.target_date
                        );
                        if let Some(current) = latest_weight(managers, owner).await? {
                            println!(
                                "Current: {:.1} kg ({:.0}% of the way)",
                                current,
                                goal.progress(current) * 100.0
                            );
                        }
                    }
                }
                Ok(())
            }

            GoalSubcommand::Clear => {
                let goals = managers.goals.list(owner).await?;
                if goals.is_empty() {
                    println!("No goal set.");
                    return Ok(());
                }
                for goal in goals {
                    managers.goals.delete(&goal).await?;
                }
                println!("Goal cleared.");
                Ok(())
            }
        }
    }
}

async fn latest_weight(
    managers: &Managers,
    owner: &str,
) -> Result<Option<f64>, Box<dyn std::error::Error>> {
    let mut entries = managers.weights.list(owner).await?;
    entries.sort_by_key(|e| e.recorded_on);
    Ok(entries.last().map(|e| e.weight_kg))
}
