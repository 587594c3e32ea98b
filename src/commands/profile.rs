use clap::{Args, Subcommand};
use std::path::PathBuf;

use fitsync_core::GymProfile;

use super::{parse_id, OutputFormat};
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Create a gym profile
    Create {
        /// Gym name
        name: String,

        /// Equipment available (can be repeated)
        #[arg(long = "equipment", value_name = "ITEM")]
        equipment: Vec<String>,
    },

    /// List gym profiles
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Attach a photo to a gym profile
    Photo {
        /// Profile id (UUID)
        id: String,

        /// Path to the image file
        file: PathBuf,
    },

    /// Delete a gym profile
    Remove {
        /// Profile id (UUID)
        id: String,
    },
}

impl ProfileCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            ProfileSubcommand::Create { name, equipment } => {
                let profile =
                    GymProfile::new(owner, name).with_equipment(equipment.clone());
                managers.profiles.create(&profile).await?;
                println!("Created gym profile '{}' ({})", name, profile.id);
                Ok(())
            }

            ProfileSubcommand::List { format } => {
                let profiles = managers.profiles.list(owner).await?;

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profiles)?),
                    OutputFormat::Text => {
                        if profiles.is_empty() {
                            println!("No gym profiles.");
                        }
                        for profile in profiles {
                            println!("{}  {}", profile, profile.id);
                        }
                    }
                }
                Ok(())
            }

            ProfileSubcommand::Photo { id, file } => {
                let id = parse_id(id)?;
                let bytes = std::fs::read(file)
                    .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;

                let profile = managers.profiles.get(owner, id).await?;
                let saved = managers.profiles.save_with_photo(&profile, &bytes).await?;

                match saved.photo_url {
                    Some(url) => println!("Photo uploaded: {}", url),
                    None => println!("Photo upload failed; profile saved without it."),
                }
                Ok(())
            }

            ProfileSubcommand::Remove { id } => {
                let id = parse_id(id)?;
                let profile = managers.profiles.get(owner, id).await?;
                managers.profiles.delete(&profile).await?;
                println!("Removed gym profile {}", id);
                Ok(())
            }
        }
    }
}
