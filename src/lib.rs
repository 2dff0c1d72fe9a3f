//! Cofactr COGS: cost of goods sold for a bill of materials
//!
//! Reads a BOM CSV, prices each distinct part through the Cofactr parts API,
//! and reports the total part cost at several production quantities.

pub mod cli;
pub mod core;
pub mod entities;
