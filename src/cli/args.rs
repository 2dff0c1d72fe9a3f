//! CLI argument definitions using clap derive

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::core::bom::ColumnMapping;
use crate::core::logging::LogLevel;
use crate::core::strategy::SearchStrategy;

#[derive(Parser, Debug)]
#[command(name = "cofactr-cogs")]
#[command(author, version, about = "Compute the cost of goods sold for a BOM")]
#[command(long_about = "Reads a BOM CSV, prices every part through the Cofactr API, and writes the \
total part cost at each requested build quantity as CSV.\n\n\
Credentials are read from COFACTR_API_KEY and COFACTR_CLIENT_ID.")]
pub struct Cli {
    /// The path to the BOM file
    pub bom_file: PathBuf,

    /// Comma-separated list of PCB quantities to compute the COGS for
    #[arg(long, default_value = "1,10,100,1000")]
    pub quantities: String,

    /// The name of the part number column in the BOM file (required)
    #[arg(long, default_value = "")]
    pub bom_part_number_column: String,

    /// The name of the manufacturer column in the BOM file. Required by
    /// search strategies that use the manufacturer
    #[arg(long, default_value = "")]
    pub bom_manufacturer_column: String,

    /// The name of the quantity column in the BOM file (required)
    #[arg(long, default_value = "")]
    pub bom_quantity_column: String,

    /// The Cofactr search strategy
    #[arg(long, value_enum, default_value_t = SearchStrategy::MpnSkuMfr)]
    pub search_strategy: SearchStrategy,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output_file: Option<String>,

    /// Also write a per-line price breakdown to this file
    #[arg(long)]
    pub breakdown_file: Option<String>,

    /// Diagnostic log level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn column_mapping(&self) -> ColumnMapping {
        ColumnMapping::new(
            &self.bom_part_number_column,
            Some(&self.bom_manufacturer_column),
            &self.bom_quantity_column,
        )
    }

    /// Report destination; an empty path means stdout
    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output_file)
    }

    pub fn breakdown_path(&self) -> Option<&Path> {
        non_empty_path(&self.breakdown_file)
    }
}

fn non_empty_path(value: &Option<String>) -> Option<&Path> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Path::new)
}
