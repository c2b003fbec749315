//! CLI argument definitions for Tickerlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Resolve a ticker and print the full chart payload |
//! | `quote` | Resolve a ticker and print the raw session quote |
//! | `search` | Search instruments by symbol or name |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |
//! | `--cookie` | env `TICKERLENS_YAHOO_COOKIE` | Yahoo session cookie |
//! | `--crumb` | env `TICKERLENS_YAHOO_CRUMB` | Yahoo crumb token |
//!
//! # Examples
//!
//! ```bash
//! # Full chart payload for an NSE listing
//! tickerlens chart RELIANCE --pretty
//!
//! # Reproducible fabricated history
//! tickerlens chart TCS --seed 42
//!
//! # Just the resolved session quote
//! tickerlens quote INFY
//! ```

use clap::{Args, Parser, Subcommand};

/// Tickerlens - candlestick dashboard data, one ticker at a time
///
/// Resolves a ticker against Yahoo Finance (NSE listing first, then BSE),
/// fetches the latest session quote, fabricates a 30-trading-day history
/// around it, and prints the chart payload with derived
/// support/resistance/target levels.
#[derive(Debug, Parser)]
#[command(
    name = "tickerlens",
    author,
    version,
    about = "Candlestick dashboard data CLI"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Yahoo session cookie; falls back to TICKERLENS_YAHOO_COOKIE.
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    /// Yahoo crumb token; falls back to TICKERLENS_YAHOO_CRUMB.
    #[arg(long, global = true)]
    pub crumb: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a ticker and print the full chart payload.
    ///
    /// The payload contains parallel arrays (dates, open, high, low, close)
    /// over a fabricated 30-trading-day history ending in the real session
    /// quote, plus supports, resistances, and price targets.
    Chart(ChartArgs),

    /// Resolve a ticker and print the raw session quote.
    Quote(QuoteArgs),

    /// Search instruments by symbol or company name.
    Search(SearchArgs),
}

/// Arguments for the `chart` command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Ticker to chart (e.g. RELIANCE, TCS).
    pub symbol: String,

    /// Seed for the fabricated history; same seed, same series.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `quote` command.
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Ticker to resolve.
    pub symbol: String,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form search query (symbol or company name).
    pub query: String,

    /// Maximum number of results to print.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
