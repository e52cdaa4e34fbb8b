//! IoTeX transaction-history fetcher CLI.
//!
//! Retrieves one wallet's complete on-chain history from the analyser and
//! explorer APIs, merges it into a single raw-action list, and optionally
//! writes it to a JSON file.
//!
//! # Usage
//!
//! ```bash
//! # Fetch a wallet's history and write it to a file
//! iotex-history-fetcher fetch io1wallet... --out history.json
//!
//! # Capture a run for later replay, then replay it without any network
//! iotex-history-fetcher fetch io1wallet... --replay
//! iotex-history-fetcher fetch io1wallet... --replay
//!
//! # Print item counts and a duration estimate only
//! iotex-history-fetcher estimate io1wallet...
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use iotex_history::source::ActionSource;
use iotex_history_fetcher::client::{
    DEFAULT_GRAPHQL_URL, DEFAULT_SCAN_URL, GraphQlClient, ScanClient,
};
use iotex_history_fetcher::config::Config;
use iotex_history_fetcher::estimate;
use iotex_history_fetcher::fetcher::{CachedReplay, HistorySource, LiveFetch};
use iotex_history_fetcher::progress::LogProgress;
use iotex_history_fetcher::replay::ReplayCache;

/// IoTeX wallet transaction-history fetcher.
#[derive(Debug, Parser)]
#[command(name = "iotex-history-fetcher", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the wallet's merged transaction history.
    Fetch {
        /// The wallet address (e.g. `io1...`).
        wallet: String,

        /// Directory holding replay captures.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Override the configured transaction-count limit.
        #[arg(long)]
        limit: Option<usize>,

        /// Replay mode: reuse an existing capture, or capture this run.
        #[arg(long)]
        replay: bool,

        /// Write the merged raw-action list to this JSON file.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Configuration file path.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,

        /// Override the analyser GraphQL endpoint.
        #[arg(long, default_value = DEFAULT_GRAPHQL_URL)]
        graphql_url: String,

        /// Override the explorer API endpoint.
        #[arg(long, default_value = DEFAULT_SCAN_URL)]
        scan_url: String,
    },

    /// Print item counts and a run-duration estimate for a wallet.
    Estimate {
        /// The wallet address (e.g. `io1...`).
        wallet: String,

        /// Override the analyser GraphQL endpoint.
        #[arg(long, default_value = DEFAULT_GRAPHQL_URL)]
        graphql_url: String,

        /// Override the explorer API endpoint.
        #[arg(long, default_value = DEFAULT_SCAN_URL)]
        scan_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch {
            wallet,
            data_dir,
            limit,
            replay,
            out,
            config,
            graphql_url,
            scan_url,
        } => {
            cmd_fetch(
                &wallet,
                &data_dir,
                limit,
                replay,
                out.as_deref(),
                &config,
                graphql_url,
                scan_url,
            )
            .await
        }
        Command::Estimate {
            wallet,
            graphql_url,
            scan_url,
        } => cmd_estimate(&wallet, graphql_url, scan_url).await,
    }
}

/// Execute the `fetch` subcommand.
#[allow(clippy::too_many_arguments)]
async fn cmd_fetch(
    wallet: &str,
    data_dir: &std::path::Path,
    limit_override: Option<usize>,
    replay_flag: bool,
    out: Option<&std::path::Path>,
    config_path: &std::path::Path,
    graphql_url: String,
    scan_url: String,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let limit = limit_override.unwrap_or(config.limit);
    let replay = replay_flag || config.replay;

    let cache = ReplayCache::for_wallet(data_dir, wallet);

    let actions = GraphQlClient::new(graphql_url)?;
    if !actions.account_exists(wallet).await? {
        bail!("wallet {wallet} does not exist on chain");
    }
    let stakes = ScanClient::new(scan_url)?;

    let mut source: Box<dyn HistorySource> = if replay && cache.exists() {
        tracing::info!(path = %cache.path().display(), "replaying from capture");
        Box::new(CachedReplay::new(cache))
    } else {
        let live = LiveFetch::new(actions, stakes, LogProgress, limit);
        Box::new(if replay {
            live.with_capture(cache)
        } else {
            live
        })
    };

    let history = source.fetch_history(wallet).await?;
    tracing::info!(wallet, transactions = history.len(), "fetch complete");

    if let Some(path) = out {
        let data = serde_json::to_string_pretty(&history)?;
        std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote history");
    }

    Ok(())
}

/// Execute the `estimate` subcommand.
#[allow(clippy::print_stdout)]
async fn cmd_estimate(wallet: &str, graphql_url: String, scan_url: String) -> Result<()> {
    let actions = GraphQlClient::new(graphql_url)?;
    let stakes = ScanClient::new(scan_url)?;

    let est = estimate::estimate(&actions, &stakes, wallet).await?;

    println!("{:<20} {}", "Actions", est.num_actions);
    println!("{:<20} {}", "Stake actions", est.num_stake_actions);
    println!("{:<20} {}", "Total", est.num_txs);
    println!("{:<20} {:.0}s", "Estimated duration", est.duration_secs());

    Ok(())
}
