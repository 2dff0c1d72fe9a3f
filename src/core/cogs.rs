//! COGS aggregation across build quantities

use crate::core::error::CogsError;
use crate::entities::{CogsResult, LineItem, PartMatch};

/// A BOM line paired with its resolved part, if one was found
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLine {
    pub item: LineItem,
    pub part: Option<PartMatch>,
}

/// Cost of one line at one build quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCost {
    pub extended_qty: u64,
    pub unit_price: f64,
    pub extended_cost: f64,
}

impl ResolvedLine {
    pub fn new(item: LineItem, part: Option<PartMatch>) -> Self {
        Self { item, part }
    }

    /// Canonical part identifier, if resolved
    pub fn part_id(&self) -> Option<&str> {
        self.part.as_ref().map(|p| p.id.as_str())
    }

    /// Cost of this line when building `build_qty` boards.
    ///
    /// `None` when the part was not found or has no price breaks.
    pub fn cost_at(&self, build_qty: u64) -> Option<LineCost> {
        let extended_qty = self.item.extended_qty(build_qty);
        let unit_price = self.part.as_ref()?.price_for_qty(extended_qty)?;

        Some(LineCost {
            extended_qty,
            unit_price,
            extended_cost: extended_qty as f64 * unit_price,
        })
    }
}

/// Total the BOM cost at each requested build quantity.
///
/// Results follow the order of `quantities` exactly, duplicates included.
/// Unpriced lines add nothing to the total and are counted instead.
pub fn aggregate(lines: &[ResolvedLine], quantities: &[u64]) -> Vec<CogsResult> {
    quantities
        .iter()
        .map(|&qty| {
            lines
                .iter()
                .fold(CogsResult::new(qty), |mut result, line| {
                    match line.cost_at(qty) {
                        Some(cost) => result.total_cost += cost.extended_cost,
                        None => result.unpriced_lines += 1,
                    }
                    result
                })
        })
        .collect()
}

/// Parse a comma-separated list of build quantities, keeping order and duplicates
pub fn parse_quantities(list: &str) -> Result<Vec<u64>, CogsError> {
    let quantities = list
        .split(',')
        .map(str::trim)
        .map(|q| match q.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(CogsError::config_with_help(
                format!("Invalid build quantity '{}' in '{}'", q, list),
                "Use a comma-separated list of positive integers, e.g. 1,10,100,1000",
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quantities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::PriceBreak;

    fn acme_r1(qty_per_board: u64) -> ResolvedLine {
        ResolvedLine::new(
            LineItem::new("R1", "Acme", qty_per_board),
            Some(PartMatch::new(
                "CF-R1",
                [PriceBreak::new(1, 0.10), PriceBreak::new(100, 0.05)],
            )),
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_single_line_scenario() {
        let results = aggregate(&[acme_r1(2)], &[1, 1000]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].quantity, 1);
        assert_close(results[0].total_cost, 0.20);
        assert_eq!(results[1].quantity, 1000);
        assert_close(results[1].total_cost, 100.00);
        assert!(results.iter().all(CogsResult::is_fully_priced));
    }

    #[test]
    fn test_line_cost_uses_extended_quantity() {
        // 60 boards x 2 per board crosses the 100 break
        let cost = acme_r1(2).cost_at(60).unwrap();
        assert_eq!(cost.extended_qty, 120);
        assert_close(cost.unit_price, 0.05);
        assert_close(cost.extended_cost, 6.0);
    }

    #[test]
    fn test_empty_bom_yields_zero_results() {
        let results = aggregate(&[], &[1, 10, 100]);

        assert_eq!(results.len(), 3);
        for result in &results {
            assert_eq!(result.total_cost, 0.0);
            assert_eq!(result.unpriced_lines, 0);
        }
    }

    #[test]
    fn test_unresolved_line_counts_as_unpriced() {
        let lines = vec![
            acme_r1(1),
            ResolvedLine::new(LineItem::new("MISSING", "Acme", 3), None),
        ];

        let results = aggregate(&lines, &[1, 100]);
        assert_close(results[0].total_cost, 0.10);
        assert_close(results[1].total_cost, 5.0);
        assert!(results.iter().all(|r| r.unpriced_lines == 1));
    }

    #[test]
    fn test_match_without_breaks_counts_as_unpriced() {
        let lines = vec![ResolvedLine::new(
            LineItem::new("C1", "Acme", 4),
            Some(PartMatch::new("CF-C1", Vec::new())),
        )];

        let results = aggregate(&lines, &[10]);
        assert_eq!(results[0].total_cost, 0.0);
        assert_eq!(results[0].unpriced_lines, 1);
    }

    #[test]
    fn test_quantity_order_and_duplicates_preserved() {
        let results = aggregate(&[acme_r1(1)], &[100, 1, 100, 10]);
        let qtys: Vec<u64> = results.iter().map(|r| r.quantity).collect();
        assert_eq!(qtys, vec![100, 1, 100, 10]);
        assert_eq!(results[0], results[2]);
    }

    #[test]
    fn test_parse_quantities() {
        assert_eq!(parse_quantities("1,10,100,1000").unwrap(), vec![1, 10, 100, 1000]);
        assert_eq!(parse_quantities(" 50 , 5,50").unwrap(), vec![50, 5, 50]);
    }

    #[test]
    fn test_parse_quantities_rejects_bad_values() {
        for list in ["", "1,,10", "0", "1,-5", "ten", "1.5"] {
            let err = parse_quantities(list).unwrap_err();
            assert!(err.is_configuration(), "{list:?}");
        }
    }

    #[test]
    fn test_lines_sharing_a_part_both_contribute() {
        let results = aggregate(&[acme_r1(1), acme_r1(1)], &[1]);
        assert_close(results[0].total_cost, 0.20);
    }
}
