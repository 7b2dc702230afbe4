//! `feed` command: load the post feed through the sync policy.

use std::sync::Arc;

use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};
use clap::Args;

use postfeed_core::{
    FeedState, HttpRemoteSource, NetworkError, PostSync, RemoteSource, Strategy,
    UnconfiguredRemote,
};

use super::OutputFormat;
use crate::config::Config;
use crate::db::PostRepository;

/// Show the post feed
#[derive(Args)]
pub struct FeedCommand {
    /// Fetch strategy (defaults to config)
    #[arg(long, short, value_parser = strategy_parser())]
    pub strategy: Option<Strategy>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl FeedCommand {
    pub async fn run(
        &self,
        repo: PostRepository,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let strategy = self.strategy.unwrap_or(config.strategy.value);
        let remote = build_remote(config)?;

        tracing::info!("Loading feed ({})", strategy);
        let sync = Arc::new(PostSync::new(repo, remote));
        let handle = sync.spawn(strategy);

        if matches!(self.format, OutputFormat::Text) {
            eprintln!("{}", render_text(&FeedState::Loading, strategy));
        }
        let state = FeedState::from_result(handle.await?);

        match (&state, &self.format) {
            (FeedState::Error(message), _) => Err(message.clone().into()),
            (_, OutputFormat::Json) => {
                println!("{}", serde_json::to_string_pretty(&state)?);
                Ok(())
            }
            (_, OutputFormat::Text) => {
                println!("{}", render_text(&state, strategy));
                Ok(())
            }
        }
    }
}

fn strategy_parser() -> impl TypedValueParser<Value = Strategy> {
    PossibleValuesParser::new([
        PossibleValue::new("offline-first").alias("local"),
        PossibleValue::new("offline-last").alias("remote"),
    ])
    .try_map(|s| s.parse::<Strategy>())
}

/// Renders a feed state for the terminal.
fn render_text(state: &FeedState, strategy: Strategy) -> String {
    match state {
        FeedState::Loading => format!("Loading posts ({})...", strategy),
        FeedState::Error(message) => message.clone(),
        FeedState::Success(posts) => {
            let heading = format!("Posts ({})", strategy);
            let mut out = format!("{}\n{}\n\n", heading, "=".repeat(heading.len()));
            for post in posts {
                out.push_str(&format!("{}\n", post));
            }
            out.push_str(&format!(
                "\n{} post{}",
                posts.len(),
                if posts.len() == 1 { "" } else { "s" }
            ));
            out
        }
    }
}

/// Builds the remote source from config. Without a base URL the feed is
/// served from the cache only.
fn build_remote(config: &Config) -> Result<Box<dyn RemoteSource>, NetworkError> {
    match config.remote.base_url() {
        Some(url) => Ok(Box::new(HttpRemoteSource::new(
            url,
            config.remote.timeout(),
        )?)),
        None => {
            tracing::info!("No remote configured, serving from cache only");
            Ok(Box::new(UnconfiguredRemote))
        }
    }
}
