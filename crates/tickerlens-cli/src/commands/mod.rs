mod chart;
mod quote;
mod search;

use std::sync::Arc;

use tickerlens_core::{
    LookupConfig, MarketProfile, QuoteLookup, QuoteSource, ReqwestHttpClient, YahooConfig,
    YahooQuoteSource,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let source: Arc<dyn QuoteSource> = Arc::new(build_source(cli));

    match &cli.command {
        Command::Chart(args) => {
            let lookup = build_lookup(source);
            chart::run(args, &lookup, cli.pretty).await
        }
        Command::Quote(args) => {
            let lookup = build_lookup(source);
            quote::run(args, &lookup, cli.pretty).await
        }
        Command::Search(args) => search::run(args, source.as_ref(), cli.pretty).await,
    }
}

fn build_source(cli: &Cli) -> YahooQuoteSource {
    // Explicit flags win over the TICKERLENS_* environment fallbacks.
    let config = YahooConfig {
        session_cookie: cli
            .cookie
            .clone()
            .or_else(|| std::env::var("TICKERLENS_YAHOO_COOKIE").ok()),
        crumb: cli
            .crumb
            .clone()
            .or_else(|| std::env::var("TICKERLENS_YAHOO_CRUMB").ok()),
        timeout_ms: cli.timeout_ms,
        ..YahooConfig::default()
    };

    YahooQuoteSource::new(Arc::new(ReqwestHttpClient::new()), config)
}

fn build_lookup(source: Arc<dyn QuoteSource>) -> QuoteLookup {
    QuoteLookup::new(source, MarketProfile::INDIA, LookupConfig::default())
}
