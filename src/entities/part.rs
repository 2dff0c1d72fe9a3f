//! Part entity types - resolved catalog entries and their price breaks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::pricing;

/// A quantity threshold with the unit price that applies from it upwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreak {
    /// Minimum order quantity for this break
    pub min_qty: u64,

    /// Price per unit at or above `min_qty`
    pub unit_price: f64,
}

impl PriceBreak {
    pub fn new(min_qty: u64, unit_price: f64) -> Self {
        Self { min_qty, unit_price }
    }
}

/// A catalog part matched for a BOM line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartMatch {
    /// Canonical identifier assigned by the pricing API
    pub id: String,

    /// Price breaks, strictly increasing by `min_qty`
    price_breaks: Vec<PriceBreak>,
}

impl PartMatch {
    /// Create a part match, normalizing the price breaks.
    ///
    /// Breaks are sorted by minimum quantity. When two breaks share a
    /// minimum quantity the later one wins.
    pub fn new(id: impl Into<String>, price_breaks: impl IntoIterator<Item = PriceBreak>) -> Self {
        let by_qty: BTreeMap<u64, f64> = price_breaks
            .into_iter()
            .map(|pb| (pb.min_qty, pb.unit_price))
            .collect();

        Self {
            id: id.into(),
            price_breaks: by_qty
                .into_iter()
                .map(|(min_qty, unit_price)| PriceBreak { min_qty, unit_price })
                .collect(),
        }
    }

    pub fn price_breaks(&self) -> &[PriceBreak] {
        &self.price_breaks
    }

    /// Whether any price is known for this part
    pub fn is_priced(&self) -> bool {
        !self.price_breaks.is_empty()
    }

    /// Get the unit price for a purchase of `qty` units
    pub fn price_for_qty(&self, qty: u64) -> Option<f64> {
        pricing::select_unit_price(&self.price_breaks, qty)
    }
}
