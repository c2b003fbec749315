use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{SessionQuote, Symbol};
use crate::http_client::{HttpClient, HttpRequest};
use crate::throttling::RateGate;

use super::{QuoteSource, SourceError, SymbolMatch};

/// Explicit provider configuration. Nothing here is read from the process
/// environment; callers own credential plumbing.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub quote_url: String,
    pub search_url: String,
    /// Session cookie for the unofficial API, when the caller has one.
    pub session_cookie: Option<String>,
    /// Crumb token appended to quote requests, when the caller has one.
    pub crumb: Option<String>,
    pub timeout_ms: u64,
    /// Local request budget guarding the upstream free tier.
    pub quota_window: Duration,
    pub quota_limit: u32,
    /// Fixed spacing suggested to callers when the budget is exhausted.
    pub retry_interval: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            quote_url: String::from("https://query1.finance.yahoo.com/v7/finance/quote"),
            search_url: String::from("https://query2.finance.yahoo.com/v1/finance/search"),
            session_cookie: None,
            crumb: None,
            timeout_ms: 10_000,
            quota_window: Duration::from_secs(60),
            quota_limit: 30,
            retry_interval: Duration::from_secs(2),
        }
    }
}

/// Yahoo Finance adapter over an injected transport.
pub struct YahooQuoteSource {
    http_client: Arc<dyn HttpClient>,
    config: YahooConfig,
    rate_gate: RateGate,
}

impl YahooQuoteSource {
    pub fn new(http_client: Arc<dyn HttpClient>, config: YahooConfig) -> Self {
        let rate_gate = RateGate::new(
            config.quota_window,
            config.quota_limit,
            config.retry_interval,
        );
        Self {
            http_client,
            config,
            rate_gate,
        }
    }

    fn quote_endpoint(&self, symbol: &Symbol) -> String {
        let mut endpoint = format!(
            "{}?symbols={}&fields=regularMarketOpen,regularMarketDayHigh,regularMarketDayLow,regularMarketPrice,regularMarketVolume",
            self.config.quote_url,
            urlencoding::encode(symbol.as_str())
        );
        if let Some(crumb) = &self.config.crumb {
            endpoint.push_str("&crumb=");
            endpoint.push_str(&urlencoding::encode(crumb));
        }
        endpoint
    }

    fn search_endpoint(&self, query: &str) -> String {
        format!(
            "{}?q={}&quotesCount=10",
            self.config.search_url,
            urlencoding::encode(query)
        )
    }

    async fn execute(&self, endpoint: String) -> Result<String, SourceError> {
        if let Err(delay) = self.rate_gate.acquire() {
            return Err(SourceError::rate_limited(format!(
                "local request budget exhausted; retry in {:.1}s",
                delay.as_secs_f64()
            )));
        }

        let mut request = HttpRequest::get(endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.config.timeout_ms);
        if let Some(cookie) = &self.config.session_cookie {
            request = request.with_header("cookie", cookie.clone());
        }

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::transport(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::invalid_request(format!("yahoo request rejected: {}", error.message()))
            }
        })?;

        debug!(status = response.status, "yahoo response received");

        if response.status == 429 || response.body.to_ascii_lowercase().contains("too many requests")
        {
            return Err(SourceError::rate_limited("yahoo rate limit hit (429)"));
        }
        if response.status == 404 {
            return Err(SourceError::no_data("yahoo has no data for this symbol"));
        }
        if !response.is_success() {
            return Err(SourceError::transport(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }
}

impl QuoteSource for YahooQuoteSource {
    fn quote<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<SessionQuote, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.execute(self.quote_endpoint(symbol)).await?;
            parse_quote(symbol, &body)
        })
    }

    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SymbolMatch>, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.execute(self.search_endpoint(query)).await?;
            parse_search(&body)
        })
    }
}

fn parse_quote(symbol: &Symbol, body: &str) -> Result<SessionQuote, SourceError> {
    let response: QuoteResponse = serde_json::from_str(body).map_err(|error| {
        SourceError::invalid_response(format!("failed to parse yahoo quote: {error}"))
    })?;

    if let Some(error) = &response.quote_response.error {
        if !error.is_empty() {
            return Err(SourceError::no_data(format!("yahoo quote error: {error}")));
        }
    }

    let Some(raw) = response.quote_response.result.into_iter().next() else {
        return Err(SourceError::no_data(format!("no quote data for {symbol}")));
    };

    let (Some(open), Some(high), Some(low), Some(close)) =
        (raw.open, raw.high, raw.low, raw.price)
    else {
        return Err(SourceError::no_data(format!(
            "incomplete session data for {symbol}"
        )));
    };

    let volume = raw.volume.unwrap_or(0).max(0) as u64;
    SessionQuote::new(symbol.clone(), open, high, low, close, volume).map_err(|error| {
        SourceError::invalid_response(format!("yahoo quote failed validation: {error}"))
    })
}

fn parse_search(body: &str) -> Result<Vec<SymbolMatch>, SourceError> {
    let response: SearchResponse = serde_json::from_str(body).map_err(|error| {
        SourceError::invalid_response(format!("failed to parse yahoo search: {error}"))
    })?;

    let matches = response
        .quotes
        .into_iter()
        .filter_map(|raw| {
            let name = raw
                .short_name
                .clone()
                .unwrap_or_else(|| raw.symbol.clone());
            let symbol = Symbol::parse(&raw.symbol).ok()?;
            Some(SymbolMatch {
                symbol,
                name,
                exchange: raw.exchange,
            })
        })
        .collect();

    Ok(matches)
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponseData,
}

#[derive(Debug, Deserialize)]
struct QuoteResponseData {
    result: Vec<RawQuote>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(rename = "regularMarketOpen")]
    open: Option<f64>,
    #[serde(rename = "regularMarketDayHigh")]
    high: Option<f64>,
    #[serde(rename = "regularMarketDayLow")]
    low: Option<f64>,
    #[serde(rename = "regularMarketPrice")]
    price: Option<f64>,
    #[serde(rename = "regularMarketVolume")]
    volume: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    quotes: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    symbol: String,
    #[serde(rename = "shortname")]
    short_name: Option<String>,
    exchange: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::NoopHttpClient;
    use crate::provider::SourceErrorKind;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn parses_regular_market_fields() {
        let body = r#"{
            "quoteResponse": {
                "result": [{
                    "regularMarketOpen": 100.0,
                    "regularMarketDayHigh": 105.0,
                    "regularMarketDayLow": 95.0,
                    "regularMarketPrice": 102.0,
                    "regularMarketVolume": 1000
                }],
                "error": null
            }
        }"#;

        let quote = parse_quote(&symbol("RELIANCE.NS"), body).expect("must parse");
        assert_eq!(quote.open, 100.0);
        assert_eq!(quote.high, 105.0);
        assert_eq!(quote.low, 95.0);
        assert_eq!(quote.close, 102.0);
        assert_eq!(quote.volume, 1_000);
    }

    #[test]
    fn empty_result_maps_to_no_data() {
        let body = r#"{"quoteResponse": {"result": [], "error": null}}"#;
        let error = parse_quote(&symbol("ZZZZINVALID"), body).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NoData);
    }

    #[test]
    fn missing_session_fields_map_to_no_data() {
        let body = r#"{"quoteResponse": {"result": [{"regularMarketPrice": 102.0}], "error": null}}"#;
        let error = parse_quote(&symbol("TCS.NS"), body).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NoData);
    }

    #[test]
    fn garbage_body_maps_to_invalid_response() {
        let error = parse_quote(&symbol("TCS.NS"), "<html>nope</html>").expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::InvalidResponse);
    }

    #[test]
    fn search_results_keep_exchange_codes() {
        let body = r#"{
            "quotes": [
                {"symbol": "TATAMOTORS.NS", "shortname": "Tata Motors Limited", "exchange": "NSI"},
                {"symbol": "TTM", "shortname": "Tata Motors ADR", "exchange": "NYQ"},
                {"symbol": "", "shortname": "broken", "exchange": "NSI"}
            ]
        }"#;

        let matches = parse_search(body).expect("must parse");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].symbol.as_str(), "TATAMOTORS.NS");
        assert_eq!(matches[0].exchange.as_deref(), Some("NSI"));
    }

    #[test]
    fn quote_endpoint_appends_crumb_when_configured() {
        let config = YahooConfig {
            crumb: Some(String::from("abc/123")),
            ..YahooConfig::default()
        };
        let source = YahooQuoteSource::new(Arc::new(NoopHttpClient), config);

        let endpoint = source.quote_endpoint(&symbol("RELIANCE.NS"));
        assert!(endpoint.contains("symbols=RELIANCE.NS"));
        assert!(endpoint.contains("&crumb=abc%2F123"));
    }
}
