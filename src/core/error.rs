//! Error taxonomy for a COGS run
//!
//! Every variant here is fatal. A part that cannot be found is not an
//! error; it surfaces as an unpriced line in the report.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::provider::UpstreamError;

#[derive(Debug, Error, Diagnostic)]
pub enum CogsError {
    /// Invalid or missing arguments, column mappings, or credentials
    #[error("Configuration error: {message}")]
    #[diagnostic(code(cogs::config))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Malformed BOM content
    #[error("BOM data error at row {row}: {message}")]
    #[diagnostic(
        code(cogs::data),
        help("Fix the BOM file; no report is written while any row is invalid")
    )]
    Data { row: usize, message: String },

    /// The pricing API failed in a way that makes the report untrustworthy
    #[error("Pricing API error: {0}")]
    #[diagnostic(
        code(cogs::upstream),
        help("No report was written. Check credentials and connectivity, then re-run")
    )]
    Upstream(#[from] UpstreamError),

    #[error("Failed to access {}: {source}", .path.display())]
    #[diagnostic(code(cogs::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    #[diagnostic(code(cogs::csv))]
    Csv(#[from] csv::Error),
}

impl CogsError {
    pub fn config(message: impl Into<String>) -> Self {
        CogsError::Configuration {
            message: message.into(),
            help: None,
        }
    }

    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        CogsError::Configuration {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub fn data(row: usize, message: impl Into<String>) -> Self {
        CogsError::Data {
            row,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CogsError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, CogsError::Configuration { .. })
    }
}
