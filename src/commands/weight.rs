use clap::{Args, Subcommand};

use fitsync_core::WeightEntry;

use super::{parse_date, parse_id, OutputFormat};
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct WeightCommand {
    #[command(subcommand)]
    pub command: WeightSubcommand,
}

#[derive(Subcommand)]
pub enum WeightSubcommand {
    /// Log a weight measurement
    Add {
        /// Weight in kilograms
        kg: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },

    /// Show weight history
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a weight entry
    Remove {
        /// Entry id (UUID)
        id: String,
    },
}

impl WeightCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            WeightSubcommand::Add { kg, date, note } => {
                let mut entry = WeightEntry::new(owner, *kg, parse_date(date)?);
                if let Some(note) = note {
                    entry = entry.with_note(note);
                }
                managers.weights.create(&entry).await?;
                println!("Logged {:.1} kg on {} ({})", kg, entry.recorded_on, entry.id);
                Ok(())
            }

            WeightSubcommand::List { format } => {
                let mut entries = managers.weights.list(owner).await?;
                entries.sort_by_key(|e| e.recorded_on);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No weight entries.");
                        }
                        for entry in entries {
                            println!("{}  {}", entry, entry.id);
                        }
                    }
                }
                Ok(())
            }

            WeightSubcommand::Remove { id } => {
                let id = parse_id(id)?;
                let entry = managers.weights.get(owner, id).await?;
                managers.weights.delete(&entry).await?;
                println!("Removed weight entry {}", id);
                Ok(())
            }
        }
    }
}
