//! Sync CLI commands.

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::sync::Managers;

/// Sync with remote server
#[derive(Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Subcommand)]
enum SyncSubcommand {
    /// Show sync configuration
    Status,
}

impl SyncCommand {
    pub async fn run(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            None => self.sync(managers, config).await,
            Some(SyncSubcommand::Status) => self.status(config),
        }
    }

    async fn sync(
        &self,
        managers: &Managers,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !config.sync.is_configured() {
            return Err("Sync not configured. Add server_url and api_key to config.".into());
        }

        println!("Syncing with server...");
        println!();

        let mut any_failed = false;
        for sync in managers.sync_all(&config.owner.value).await {
            match sync.result {
                Ok((reconciled, 0)) => {
                    println!("  ✓ {} ({} reconciled)", sync.collection, reconciled);
                }
                Ok((reconciled, failed)) => {
                    any_failed = true;
                    println!(
                        "  ✗ {} ({} reconciled, {} failed - will retry next sync)",
                        sync.collection, reconciled, failed
                    );
                }
                Err(e) => {
                    any_failed = true;
                    println!("  ✗ {} - {}", sync.collection, e);
                }
            }
        }

        println!();
        if any_failed {
            println!("Sync finished with failures; run again once the server is reachable.");
        } else {
            println!("Sync complete.");
        }
        Ok(())
    }

    fn status(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        println!("Sync Configuration");
        println!("==================");
        println!();

        if !config.sync.is_configured() {
            println!("Not configured. Add server_url and api_key to config.");
            return Ok(());
        }

        if let Some(url) = &config.sync.server_url {
            println!("Server: {}", url);
        }
        println!(
            "Auto-sync: {}",
            if config.sync.auto_sync { "on" } else { "off" }
        );
        Ok(())
    }
}
