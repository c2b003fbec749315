//! # Tickerlens Core
//!
//! Quote resolution and derived candlestick-chart payloads for the
//! tickerlens dashboard tooling.
//!
//! ## Overview
//!
//! One lookup does three things:
//!
//! - **Resolve** the requested ticker against the quote provider, trying
//!   exchange-suffix variants in sequence (NSE listing first, then
//!   market-flagged search matches, the BSE listing, and finally the bare
//!   symbol).
//! - **Fetch** the latest session quote for the winning variant.
//! - **Fabricate** a 30-trading-day OHLC history anchored on that quote and
//!   derive support/resistance levels and price targets from it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | Quote-to-series pipeline (dates, synthesis, levels) |
//! | [`domain`] | Validated value types (Symbol, SessionQuote, ChartData) |
//! | [`error`] | Core error types |
//! | [`http_client`] | Transport abstraction (reqwest or no-op) |
//! | [`lookup`] | Variant resolution, backoff, and supersession |
//! | [`provider`] | Quote source trait and the Yahoo adapter |
//! | [`throttling`] | Local request budget (governor) |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickerlens_core::{
//!     chart, LookupConfig, MarketProfile, QuoteLookup, ReqwestHttpClient, Symbol,
//!     YahooConfig, YahooQuoteSource,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(YahooQuoteSource::new(
//!         Arc::new(ReqwestHttpClient::new()),
//!         YahooConfig::default(),
//!     ));
//!     let lookup = QuoteLookup::new(source, MarketProfile::INDIA, LookupConfig::default());
//!
//!     let resolved = lookup.lookup(&Symbol::parse("RELIANCE")?).await?;
//!     let payload = chart::generate(&resolved.quote);
//!     println!("{}", serde_json::to_string_pretty(&payload)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Lookups surface exactly one of three kinds:
//!
//! ```rust
//! use tickerlens_core::LookupError;
//!
//! fn describe(error: &LookupError) -> &'static str {
//!     match error {
//!         LookupError::NotFound { .. } => "no variant had quote data",
//!         LookupError::RateLimited => "wait and retry",
//!         LookupError::Cancelled => "superseded; show nothing",
//!     }
//! }
//! ```
//!
//! Per-variant transient failures are swallowed, logged, and folded into the
//! eventual `NotFound` detail; the chart pipeline itself never fails.
//!
//! ## Security
//!
//! - Provider credentials are constructor-injected configuration, never read
//!   from the process environment inside this crate, and never logged.
//! - All upstream calls go through the injected transport, so tests run
//!   fully offline.

pub mod chart;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod lookup;
pub mod provider;
pub mod throttling;

// Re-export commonly used types at crate root for convenience

// Chart pipeline
pub use chart::{generate, generate_with, SERIES_LEN};

// Domain models
pub use domain::{
    format_calendar_date, parse_calendar_date, ChartData, DailyBar, PriceLevels, SessionQuote,
    Symbol,
};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Lookup types
pub use lookup::{
    LookupConfig, LookupError, MarketProfile, QuoteLookup, ResolvedQuote, VariantFailure,
};

// Provider types
pub use provider::{
    QuoteSource, SourceError, SourceErrorKind, SymbolMatch, YahooConfig, YahooQuoteSource,
};

// Throttling
pub use throttling::RateGate;
