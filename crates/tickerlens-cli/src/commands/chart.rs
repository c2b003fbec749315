use fastrand::Rng;
use time::OffsetDateTime;

use tickerlens_core::{chart, QuoteLookup, Symbol};

use crate::cli::ChartArgs;
use crate::error::CliError;
use crate::output;

pub async fn run(args: &ChartArgs, lookup: &QuoteLookup, pretty: bool) -> Result<(), CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let resolved = lookup.lookup(&symbol).await?;

    let payload = match args.seed {
        Some(seed) => {
            let mut rng = Rng::with_seed(seed);
            chart::generate_with(&resolved.quote, OffsetDateTime::now_utc().date(), &mut rng)
        }
        None => chart::generate(&resolved.quote),
    };

    output::render(&payload, pretty)
}
