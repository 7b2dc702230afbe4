//! `cache` commands: inspect or clear the local post cache.

use clap::{Args, Subcommand};

use postfeed_core::LocalStore;

use super::OutputFormat;
use crate::db::PostRepository;

#[derive(Args)]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand)]
pub enum CacheSubcommand {
    /// List cached post records
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Remove every cached post
    Clear,
}

impl CacheCommand {
    pub async fn run(&self, repo: &PostRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            CacheSubcommand::List { format } => {
                let records = repo.read_all().await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    }
                    OutputFormat::Text => {
                        if records.is_empty() {
                            println!("Cache is empty.");
                            return Ok(());
                        }
                        println!(
                            "{:>6}  {:>6}  {:>6}  {:>6}  FAV  TITLE",
                            "ROW", "ID", "USER", "VIEWS"
                        );
                        for record in &records {
                            println!(
                                "{:>6}  {:>6}  {:>6}  {:>6}  {:<3}  {}",
                                record.row_id.unwrap_or_default(),
                                record.id,
                                record.user_id,
                                record.view_count,
                                if record.favorite { "yes" } else { "no" },
                                record.title
                            );
                        }
                    }
                }
                Ok(())
            }
            CacheSubcommand::Clear => {
                let count = repo.count().await?;
                repo.delete_all().await?;
                tracing::info!("Cleared {} cached post(s)", count);
                println!(
                    "Removed {} cached post{}.",
                    count,
                    if count == 1 { "" } else { "s" }
                );
                Ok(())
            }
        }
    }
}
