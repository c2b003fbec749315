use tickerlens_core::QuoteSource;

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output;

pub async fn run(
    args: &SearchArgs,
    source: &dyn QuoteSource,
    pretty: bool,
) -> Result<(), CliError> {
    let mut matches = source.search(&args.query).await?;
    matches.truncate(args.limit);
    output::render(&matches, pretty)
}
