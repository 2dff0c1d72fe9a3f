//! COGS result entity - total part cost at one build quantity

use serde::{Deserialize, Serialize};

/// Cost of goods sold for one requested build quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CogsResult {
    /// Number of boards built
    pub quantity: u64,

    /// Sum of extended line costs across the BOM
    pub total_cost: f64,

    /// Lines that contributed nothing because no price was found
    pub unpriced_lines: usize,
}

impl CogsResult {
    pub fn new(quantity: u64) -> Self {
        Self {
            quantity,
            total_cost: 0.0,
            unpriced_lines: 0,
        }
    }

    /// True when every line in the BOM had a price
    pub fn is_fully_priced(&self) -> bool {
        self.unpriced_lines == 0
    }
}
