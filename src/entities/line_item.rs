//! BOM line item - one row of the bill of materials

use serde::{Deserialize, Serialize};

/// A single BOM row
///
/// Several rows may reference the same physical part; a line's identity is
/// its position in the BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Manufacturer part number
    pub part_number: String,

    /// Manufacturer name, empty when the BOM has no manufacturer column
    #[serde(default)]
    pub manufacturer: String,

    /// Quantity used on one board
    pub qty_per_board: u64,
}

impl LineItem {
    pub fn new(part_number: impl Into<String>, manufacturer: impl Into<String>, qty_per_board: u64) -> Self {
        Self {
            part_number: part_number.into(),
            manufacturer: manufacturer.into(),
            qty_per_board,
        }
    }

    /// Quantity needed to build `build_qty` boards
    pub fn extended_qty(&self, build_qty: u64) -> u64 {
        build_qty.saturating_mul(self.qty_per_board)
    }
}
