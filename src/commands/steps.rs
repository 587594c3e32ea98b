use clap::{Args, Subcommand};

use fitsync_core::{Steps, SyncedEntity};

use super::{parse_date, OutputFormat};
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct StepsCommand {
    #[command(subcommand)]
    pub command: StepsSubcommand,
}

#[derive(Subcommand)]
pub enum StepsSubcommand {
    /// Record the step count for a day (replaces any existing count)
    Add {
        /// Number of steps
        count: i64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Show step history
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl StepsCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            StepsSubcommand::Add { count, date } => {
                let date = parse_date(date)?;

                // One entry per day: a second count for the same day is an
                // update, not a new entity.
                let existing = managers
                    .steps
                    .list(owner)
                    .await?
                    .into_iter()
                    .find(|s| s.date == date);

                match existing {
                    Some(mut entry) => {
                        entry.count = *count;
                        entry.touch();
                        managers.steps.update(&entry).await?;
                    }
                    None => {
                        managers.steps.create(&Steps::new(owner, date, *count)).await?;
                    }
                }
                println!("Recorded {} steps on {}", count, date);
                Ok(())
            }

            StepsSubcommand::List { format } => {
                let mut entries = managers.steps.list(owner).await?;
                entries.sort_by_key(|e| e.date);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No step entries.");
                        }
                        for entry in entries {
                            println!("{}", entry);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
