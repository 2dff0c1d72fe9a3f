//! CLI module - argument parsing and pipeline driver

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::run;
