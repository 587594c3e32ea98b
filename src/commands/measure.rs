use clap::{Args, Subcommand};
use std::str::FromStr;

use fitsync_core::{BodyMeasurementEntry, MeasurementSite};

use super::{parse_date, OutputFormat};
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct MeasureCommand {
    #[command(subcommand)]
    pub command: MeasureSubcommand,
}

#[derive(Subcommand)]
pub enum MeasureSubcommand {
    /// Record a tape measurement
    Add {
        /// Body site (neck, chest, waist, hips, thigh, arm)
        site: String,

        /// Measurement in centimeters
        cm: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Show measurement history
    List {
        /// Only show one body site
        #[arg(long)]
        site: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl MeasureCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            MeasureSubcommand::Add { site, cm, date } => {
                let site = MeasurementSite::from_str(site)?;
                let entry = BodyMeasurementEntry::new(owner, site, *cm, parse_date(date)?);
                managers.measurements.create(&entry).await?;
                println!("Recorded {}: {:.1} cm on {}", site, cm, entry.recorded_on);
                Ok(())
            }

            MeasureSubcommand::List { site, format } => {
                let site = site.as_deref().map(MeasurementSite::from_str).transpose()?;
                let mut entries = managers.measurements.list(owner).await?;
                if let Some(site) = site {
                    entries.retain(|e| e.site == site);
                }
                entries.sort_by_key(|e| e.recorded_on);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No measurements.");
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
