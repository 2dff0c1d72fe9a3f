//! Pipeline driver: BOM → resolver → aggregator → report

use console::style;
use std::collections::HashSet;

use crate::cli::Cli;
use crate::core::bom::read_bom;
use crate::core::cogs::{aggregate, parse_quantities, ResolvedLine};
use crate::core::config::Config;
use crate::core::error::CogsError;
use crate::core::provider::{CofactrClient, PartLookup, PartQuery};
use crate::core::report::{open_output, write_breakdown, write_summary};
use crate::core::resolver::PartResolver;
use crate::entities::{CogsResult, LineItem};

pub fn run(cli: Cli) -> Result<(), CogsError> {
    let quantities = parse_quantities(&cli.quantities)?;

    let mapping = cli.column_mapping();
    mapping.validate()?;

    let strategy = cli.search_strategy;
    if strategy.uses_manufacturer() && !mapping.uses_manufacturer() {
        return Err(CogsError::config_with_help(
            format!(
                "Search strategy '{}' requires a manufacturer, but no BOM manufacturer column was provided",
                strategy
            ),
            "Pass --bom-manufacturer-column, or use --search-strategy fuzzy",
        ));
    }

    tracing::debug!("Using part number column: {:?}", mapping.part_number);
    tracing::debug!("Using manufacturer column: {:?}", mapping.manufacturer);
    tracing::debug!("Using quantity column: {:?}", mapping.quantity);
    tracing::debug!("Using search strategy: {}", strategy);

    let items = read_bom(&cli.bom_file, &mapping)?;
    tracing::info!("Computing COGS for {} parts", items.len());

    let lines = if items.is_empty() {
        Vec::new()
    } else {
        let config = Config::load();
        if config.platform_token.is_some() {
            tracing::debug!("Hosting platform token present");
        }
        let credentials = config.credentials()?;
        let client = CofactrClient::new(config.api_url(), credentials)?;
        let mut resolver = PartResolver::new(client, strategy);

        tracing::info!(
            "Fetching prices for {} distinct parts",
            distinct_parts(&items, &resolver)
        );
        let lines = resolver.resolve_lines(items)?;
        let cache = resolver.cache();
        tracing::info!(
            "Matched {} of {} parts, {} with prices",
            cache.found(),
            cache.len(),
            cache.priced()
        );
        lines
    };

    let results = aggregate(&lines, &quantities);

    // Both destinations must open before either report is written
    let breakdown = cli
        .breakdown_path()
        .map(|path| open_output(Some(path)))
        .transpose()?;
    let mut out = open_output(cli.output_path())?;

    write_summary(&mut out, &results)?;
    drop(out);
    if let Some(breakdown) = breakdown {
        write_breakdown(breakdown, &lines, &results, mapping.uses_manufacturer())?;
    }

    report_status(&cli, &lines, &results);
    Ok(())
}

fn distinct_parts<L: PartLookup>(items: &[LineItem], resolver: &PartResolver<L>) -> usize {
    items
        .iter()
        .map(|item| PartQuery::new(&item.part_number, &item.manufacturer, resolver.strategy()))
        .collect::<HashSet<_>>()
        .len()
}

/// Final status line on stderr
fn report_status(cli: &Cli, lines: &[ResolvedLine], results: &[CogsResult]) {
    let fully_priced = results.iter().all(CogsResult::is_fully_priced);
    let unpriced = results.first().map(|r| r.unpriced_lines).unwrap_or(0);
    if !fully_priced {
        tracing::warn!(
            "{} of {} BOM lines have no price; totals are incomplete",
            unpriced,
            lines.len()
        );
    }

    let destination = cli
        .output_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    let marker = if !fully_priced {
        style("!").yellow()
    } else {
        style("✓").green()
    };
    eprintln!(
        "{} Computed COGS at {} quantities for {} lines ({})",
        marker,
        results.len(),
        lines.len(),
        style(destination).cyan()
    );
}
