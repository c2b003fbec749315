use tickerlens_core::{QuoteLookup, Symbol};

use crate::cli::QuoteArgs;
use crate::error::CliError;
use crate::output;

pub async fn run(args: &QuoteArgs, lookup: &QuoteLookup, pretty: bool) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let resolved = lookup.lookup(&symbol).await?;
    output::render(&resolved, pretty)
}
