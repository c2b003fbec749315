//! Quote-lookup collaborator contract and its error taxonomy.
//!
//! A [`QuoteSource`] answers two questions: the latest session quote for an
//! exact symbol, and the instruments matching a free-form query. The lookup
//! state machine in [`crate::lookup`] drives a source through the
//! exchange-variant resolution policy; it only ever sees the structured
//! [`SourceError`] classification, never transport details.

mod yahoo;

pub use yahoo::{YahooConfig, YahooQuoteSource};

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::domain::{SessionQuote, Symbol};

/// Upstream failure classification used by the lookup state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The variant resolved but the upstream has no quote data for it.
    NoData,
    /// The upstream (or the local budget) signaled rate limiting.
    RateLimited,
    /// Network-level failure; worth trying the next variant.
    Transport,
    /// The upstream answered with something we could not decode.
    InvalidResponse,
    /// The request was malformed before it left the process.
    InvalidRequest,
}

/// Structured source error: classification plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NoData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SourceError {}

/// One instrument returned by the provider's search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: Symbol,
    pub name: String,
    pub exchange: Option<String>,
}

/// Quote-lookup collaborator contract.
///
/// Implementations must be `Send + Sync`; the lookup service shares one
/// source across sequential lookups.
pub trait QuoteSource: Send + Sync {
    /// Latest session quote for an exact symbol variant.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] classified per [`SourceErrorKind`]; the lookup
    /// loop advances, retries, or short-circuits based on the kind alone.
    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<SessionQuote, SourceError>> + Send + 'a>>;

    /// Instruments matching a free-form query.
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolMatch>, SourceError>> + Send + 'a>>;
}
