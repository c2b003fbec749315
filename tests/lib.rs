// Shared prelude for tickerlens behavior tests
pub use std::sync::Arc;
pub use tickerlens_core::{
    chart, ChartData, LookupConfig, LookupError, MarketProfile, QuoteLookup, QuoteSource,
    SessionQuote, SourceError, Symbol, SymbolMatch,
};
