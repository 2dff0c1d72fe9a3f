//! Core module - the BOM pricing pipeline and its supporting services

pub mod bom;
pub mod cogs;
pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod strategy;

pub use bom::{read_bom, ColumnMapping};
pub use cogs::{aggregate, parse_quantities, LineCost, ResolvedLine};
pub use config::{Config, Credentials};
pub use error::CogsError;
pub use logging::LogLevel;
pub use provider::{CofactrClient, PartLookup, PartQuery, UpstreamError};
pub use resolver::{PartCache, PartResolver};
pub use strategy::SearchStrategy;
