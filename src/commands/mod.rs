mod cache;
mod config_cmd;
mod feed;

use clap::ValueEnum;

pub use cache::CacheCommand;
pub use config_cmd::ConfigCommand;
pub use feed::FeedCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
