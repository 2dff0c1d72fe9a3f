//! CSV report output

use csv::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::cogs::ResolvedLine;
use crate::core::error::CogsError;
use crate::entities::CogsResult;

pub const SUMMARY_HEADERS: [&str; 3] = ["Quantity", "Total Cost", "Unpriced Lines"];

/// Open the report destination: a file if given, else stdout
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, CogsError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| CogsError::io(path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

/// Format a currency amount at cent granularity
pub fn format_cost(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a per-unit price; catalog prices go below a cent
pub fn format_unit_price(price: f64) -> String {
    format!("{:.5}", price)
}

/// Write one row per requested quantity, in request order
pub fn write_summary<W: Write>(writer: W, results: &[CogsResult]) -> Result<(), CogsError> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(SUMMARY_HEADERS)?;

    for result in results {
        wtr.write_record([
            result.quantity.to_string(),
            format_cost(result.total_cost),
            result.unpriced_lines.to_string(),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the per-line cost breakdown followed by a totals row.
///
/// Unpriced cells are left empty.
pub fn write_breakdown<W: Write>(
    writer: W,
    lines: &[ResolvedLine],
    results: &[CogsResult],
    with_manufacturer: bool,
) -> Result<(), CogsError> {
    let mut wtr = Writer::from_writer(writer);

    let mut headers = vec!["Part Number".to_string()];
    if with_manufacturer {
        headers.push("Manufacturer".to_string());
    }
    headers.push("Cofactr ID".to_string());
    headers.push("Quantity".to_string());
    for result in results {
        headers.push(format!("Per Unit at {}", result.quantity));
        headers.push(format!("Total at {}", result.quantity));
    }
    let width = headers.len();
    wtr.write_record(&headers)?;

    for line in lines {
        let mut row = vec![line.item.part_number.clone()];
        if with_manufacturer {
            row.push(line.item.manufacturer.clone());
        }
        row.push(line.part_id().unwrap_or_default().to_string());
        row.push(line.item.qty_per_board.to_string());

        for result in results {
            match line.cost_at(result.quantity) {
                Some(cost) => {
                    row.push(format_unit_price(cost.unit_price));
                    row.push(format_cost(cost.extended_cost));
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        debug_assert_eq!(row.len(), width);
        wtr.write_record(&row)?;
    }

    let mut totals = vec!["Totals".to_string()];
    totals.resize(width - 2 * results.len(), String::new());
    for result in results {
        totals.push(String::new());
        totals.push(format_cost(result.total_cost));
    }
    wtr.write_record(&totals)?;

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
