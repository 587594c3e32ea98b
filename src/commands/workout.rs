use chrono::Utc;
use clap::{Args, Subcommand};

use fitsync_core::WorkoutSession;

use super::{parse_id, OutputFormat};
use crate::config::Config;
use crate::sync::Managers;

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// Log a completed workout session
    Log {
        /// Session title (e.g. "Push day")
        title: String,

        /// Duration in minutes
        #[arg(long, short)]
        duration: i32,

        /// Gym profile id (UUID) the session took place at
        #[arg(long)]
        gym: Option<String>,

        /// Notes about the session
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show workout history
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a workout session
    Remove {
        /// Session id (UUID)
        id: String,
    },
}

impl WorkoutCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let owner = &config.owner.value;

        match &self.command {
            WorkoutSubcommand::Log {
                title,
                duration,
                gym,
                notes,
            } => {
                let mut session = WorkoutSession::new(owner, title, Utc::now(), *duration);
                if let Some(gym) = gym {
                    let gym_id = parse_id(gym)?;
                    // Validate the reference so typos surface now, not at sync.
                    managers.profiles.get(owner, gym_id).await?;
                    session = session.with_gym_profile_id(gym_id);
                }
                if let Some(notes) = notes {
                    session = session.with_notes(notes);
                }
                managers.workouts.create(&session).await?;
                println!("Logged workout '{}' ({})", title, session.id);
                Ok(())
            }

            WorkoutSubcommand::List { format } => {
                let mut sessions = managers.workouts.list(owner).await?;
                sessions.sort_by_key(|s| s.started_at);

                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sessions)?),
                    OutputFormat::Text => {
                        if sessions.is_empty() {
                            println!("No workout sessions.");
                        }
                        for session in sessions {
                            println!("{}  {}", session, session.id);
                        }
                    }
                }
                Ok(())
            }

            WorkoutSubcommand::Remove { id } => {
                let id = parse_id(id)?;
                let session = managers.workouts.get(owner, id).await?;
                managers.workouts.delete(&session).await?;
                println!("Removed workout session {}", id);
                Ok(())
            }
        }
    }
}
