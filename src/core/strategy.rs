//! Cofactr search strategies

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the pricing API should match a BOM line to a catalog part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Structured match on MPN, SKU, and manufacturer
    #[default]
    #[value(name = "mpn_sku_mfr")]
    MpnSkuMfr,

    /// Similarity search on the MPN alone; manufacturer is ignored
    #[value(name = "fuzzy")]
    Fuzzy,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::MpnSkuMfr => "mpn_sku_mfr",
            SearchStrategy::Fuzzy => "fuzzy",
        }
    }

    /// Value sent as the API's `search_strategy` parameter
    pub fn query_value(&self) -> &'static str {
        match self {
            SearchStrategy::MpnSkuMfr => "mpn_sku_mfr",
            // Cofactr's default strategy is its similarity search
            SearchStrategy::Fuzzy => "default",
        }
    }

    /// Whether the manufacturer takes part in the query
    pub fn uses_manufacturer(&self) -> bool {
        matches!(self, SearchStrategy::MpnSkuMfr)
    }

    /// Build the free-text query for a part
    pub fn query_text(&self, part_number: &str, manufacturer: &str) -> String {
        if self.uses_manufacturer() && !manufacturer.is_empty() {
            format!("{} {}", part_number, manufacturer)
        } else {
            part_number.to_string()
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_cli_names() {
        assert_eq!(
            SearchStrategy::from_str("mpn_sku_mfr", false),
            Ok(SearchStrategy::MpnSkuMfr)
        );
        assert_eq!(SearchStrategy::from_str("fuzzy", false), Ok(SearchStrategy::Fuzzy));
        assert!(SearchStrategy::from_str("mpn_exact", false).is_err());
    }

    #[test]
    fn test_fuzzy_maps_to_default_strategy() {
        assert_eq!(SearchStrategy::Fuzzy.query_value(), "default");
        assert_eq!(SearchStrategy::MpnSkuMfr.query_value(), "mpn_sku_mfr");
    }

    #[test]
    fn test_query_text() {
        assert_eq!(SearchStrategy::MpnSkuMfr.query_text("R1", "Acme"), "R1 Acme");
        assert_eq!(SearchStrategy::MpnSkuMfr.query_text("R1", ""), "R1");
        assert_eq!(SearchStrategy::Fuzzy.query_text("R1", "Acme"), "R1");
    }
}
