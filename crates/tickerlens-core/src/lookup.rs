//! Symbol resolution over exchange-suffix variants.
//!
//! The resolution policy is an explicit loop over an ordered candidate list:
//! primary-suffix variant, market-flagged search matches, secondary-suffix
//! variant, bare symbol. Candidates are tried strictly sequentially; a
//! rate-limited candidate is retried after a fixed interval, every other
//! failure is recorded and the loop advances. Only when all candidates are
//! exhausted does the accumulated detail surface as
//! [`LookupError::NotFound`].
//!
//! A newer lookup supersedes any in-flight one: each lookup takes a ticket
//! from a generation counter, and older tickets observe the bump between
//! awaits (and via `select!` during sleeps and requests), resolving to
//! [`LookupError::Cancelled`] without touching visible state.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::{SessionQuote, Symbol};
use crate::provider::{QuoteSource, SourceErrorKind};

/// Exchange profile the resolver targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketProfile {
    /// Suffix of the preferred listing (tried first).
    pub primary_suffix: &'static str,
    /// Suffix of the fallback listing.
    pub secondary_suffix: &'static str,
    /// Exchange codes that mark a search match as belonging to this market.
    pub exchange_codes: &'static [&'static str],
}

impl MarketProfile {
    /// NSE-first Indian listings, the market the dashboard serves.
    pub const INDIA: Self = Self {
        primary_suffix: ".NS",
        secondary_suffix: ".BO",
        exchange_codes: &["NSI", "BSE"],
    };
}

/// Pacing knobs for the resolution loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupConfig {
    /// Fixed spacing between retries of a rate-limited candidate.
    pub retry_interval: Duration,
    /// Rate-limit retries per candidate before the lookup short-circuits.
    pub max_rate_limit_retries: u32,
    /// Cap on search-derived candidates inserted into the variant list.
    pub max_search_candidates: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            retry_interval: Duration::from_secs(2),
            max_rate_limit_retries: 2,
            max_search_candidates: 3,
        }
    }
}

/// One failed variant attempt, kept for the final not-found report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantFailure {
    pub symbol: String,
    pub reason: String,
}

/// Lookup failure taxonomy surfaced to consumers.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no quote data for '{symbol}'; {}", format_attempts(.attempts))]
    NotFound {
        symbol: String,
        attempts: Vec<VariantFailure>,
    },

    #[error("quote API rate limit hit; wait a moment and retry")]
    RateLimited,

    #[error("lookup superseded before completion")]
    Cancelled,
}

fn format_attempts(attempts: &[VariantFailure]) -> String {
    if attempts.is_empty() {
        return String::from("no variants could be attempted");
    }
    let detail = attempts
        .iter()
        .map(|attempt| format!("{}: {}", attempt.symbol, attempt.reason))
        .collect::<Vec<_>>()
        .join("; ");
    format!("tried {} variant(s) ({detail})", attempts.len())
}

/// A quote plus the exchange variant that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedQuote {
    pub variant: Symbol,
    pub quote: SessionQuote,
}

enum Attempt {
    Resolved(SessionQuote),
    Failed(String),
}

/// Resolves a requested ticker to a real session quote.
///
/// One instance serves the whole consumer; starting a lookup supersedes any
/// lookup still in flight, and [`cancel_all`](QuoteLookup::cancel_all) aborts
/// without starting a new one (consumer teardown).
pub struct QuoteLookup {
    source: Arc<dyn QuoteSource>,
    market: MarketProfile,
    config: LookupConfig,
    generation: watch::Sender<u64>,
}

impl QuoteLookup {
    pub fn new(source: Arc<dyn QuoteSource>, market: MarketProfile, config: LookupConfig) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            source,
            market,
            config,
            generation,
        }
    }

    /// Abort any in-flight lookup without starting a new one.
    pub fn cancel_all(&self) {
        self.generation.send_modify(|generation| *generation += 1);
    }

    /// Resolve `symbol` through the variant policy and return the first
    /// quote found.
    pub async fn lookup(&self, symbol: &Symbol) -> Result<ResolvedQuote, LookupError> {
        let ticket = self.begin();
        let mut attempts = Vec::new();

        for candidate in self.candidates(symbol, &ticket).await? {
            match self.try_candidate(&candidate, &ticket).await? {
                Attempt::Resolved(quote) => {
                    ticket.ensure_current()?;
                    debug!(variant = %candidate, "symbol resolved");
                    return Ok(ResolvedQuote {
                        variant: candidate,
                        quote,
                    });
                }
                Attempt::Failed(reason) => {
                    debug!(variant = %candidate, %reason, "variant yielded no quote; advancing");
                    attempts.push(VariantFailure {
                        symbol: candidate.as_str().to_owned(),
                        reason,
                    });
                }
            }
        }

        Err(LookupError::NotFound {
            symbol: symbol.as_str().to_owned(),
            attempts,
        })
    }

    fn begin(&self) -> Ticket {
        let mut token = 0;
        self.generation.send_modify(|generation| {
            *generation += 1;
            token = *generation;
        });
        Ticket {
            token,
            rx: self.generation.subscribe(),
        }
    }

    /// Ordered, deduplicated candidate list per the resolution policy.
    async fn candidates(
        &self,
        symbol: &Symbol,
        ticket: &Ticket,
    ) -> Result<Vec<Symbol>, LookupError> {
        let mut ordered = Vec::new();
        push_candidate(&mut ordered, symbol.with_suffix(self.market.primary_suffix).ok());

        let search = tokio::select! {
            result = self.source.search(symbol.as_str()) => result,
            _ = ticket.superseded() => return Err(LookupError::Cancelled),
        };
        match search {
            Ok(matches) => {
                let flagged = matches
                    .into_iter()
                    .filter(|found| {
                        found
                            .exchange
                            .as_deref()
                            .is_some_and(|code| self.market.exchange_codes.contains(&code))
                    })
                    .take(self.config.max_search_candidates);
                for found in flagged {
                    push_candidate(&mut ordered, Some(found.symbol));
                }
            }
            Err(error) => {
                debug!(reason = %error, "symbol search failed; continuing with suffix variants");
            }
        }

        push_candidate(
            &mut ordered,
            symbol.with_suffix(self.market.secondary_suffix).ok(),
        );
        push_candidate(&mut ordered, Some(symbol.clone()));
        Ok(ordered)
    }

    /// Try one candidate, retrying through rate limits with fixed spacing.
    async fn try_candidate(
        &self,
        candidate: &Symbol,
        ticket: &Ticket,
    ) -> Result<Attempt, LookupError> {
        let mut rate_limit_retries = 0;
        loop {
            ticket.ensure_current()?;

            let result = tokio::select! {
                result = self.source.quote(candidate) => result,
                _ = ticket.superseded() => return Err(LookupError::Cancelled),
            };

            match result {
                Ok(quote) => return Ok(Attempt::Resolved(quote)),
                Err(error) if error.kind() == SourceErrorKind::RateLimited => {
                    if rate_limit_retries >= self.config.max_rate_limit_retries {
                        warn!(variant = %candidate, "rate limit persisted through retries");
                        return Err(LookupError::RateLimited);
                    }
                    rate_limit_retries += 1;
                    debug!(
                        variant = %candidate,
                        retry = rate_limit_retries,
                        "rate limited; sleeping before retrying this variant"
                    );
                    tokio::select! {
                        _ = sleep(self.config.retry_interval) => {}
                        _ = ticket.superseded() => return Err(LookupError::Cancelled),
                    }
                }
                Err(error) => return Ok(Attempt::Failed(error.message().to_owned())),
            }
        }
    }
}

/// Generation token held by one lookup.
struct Ticket {
    token: u64,
    rx: watch::Receiver<u64>,
}

impl Ticket {
    fn ensure_current(&self) -> Result<(), LookupError> {
        if *self.rx.borrow() == self.token {
            Ok(())
        } else {
            Err(LookupError::Cancelled)
        }
    }

    /// Resolves once a newer lookup (or teardown) has bumped the generation.
    async fn superseded(&self) {
        let mut rx = self.rx.clone();
        let _ = rx.wait_for(|generation| *generation != self.token).await;
    }
}

fn push_candidate(ordered: &mut Vec<Symbol>, candidate: Option<Symbol>) {
    let Some(candidate) = candidate else {
        return;
    };
    if !ordered.contains(&candidate) {
        ordered.push(candidate);
    }
}
