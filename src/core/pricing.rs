//! Price break selection

use crate::entities::PriceBreak;

/// Select the unit price for a purchase of `required_qty` units.
///
/// Uses the break with the highest minimum quantity that does not exceed
/// `required_qty`. Quantities below the smallest break take the smallest
/// break's price: the first break is treated as a price floor, not as a
/// minimum order gate.
///
/// `breaks` must be ordered by strictly increasing `min_qty`. Returns `None`
/// when there are no breaks at all.
pub fn select_unit_price(breaks: &[PriceBreak], required_qty: u64) -> Option<f64> {
    let first = breaks.first()?;

    // Number of breaks whose minimum is <= required_qty
    let applicable = breaks.partition_point(|pb| pb.min_qty <= required_qty);
    let selected = match applicable {
        0 => first,
        n => &breaks[n - 1],
    };

    Some(selected.unit_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Vec<PriceBreak> {
        vec![
            PriceBreak::new(1, 0.10),
            PriceBreak::new(100, 0.05),
            PriceBreak::new(1000, 0.03),
        ]
    }

    #[test]
    fn test_select_exact_break() {
        let breaks = schedule();
        assert_eq!(select_unit_price(&breaks, 1), Some(0.10));
        assert_eq!(select_unit_price(&breaks, 100), Some(0.05));
        assert_eq!(select_unit_price(&breaks, 1000), Some(0.03));
    }

    #[test]
    fn test_select_between_breaks() {
        let breaks = schedule();
        assert_eq!(select_unit_price(&breaks, 2), Some(0.10));
        assert_eq!(select_unit_price(&breaks, 99), Some(0.10));
        assert_eq!(select_unit_price(&breaks, 999), Some(0.05));
        assert_eq!(select_unit_price(&breaks, 2000), Some(0.03));
    }

    #[test]
    fn test_below_smallest_break_uses_floor() {
        let breaks = vec![PriceBreak::new(10, 1.50), PriceBreak::new(50, 1.20)];
        assert_eq!(select_unit_price(&breaks, 0), Some(1.50));
        assert_eq!(select_unit_price(&breaks, 5), Some(1.50));
    }

    #[test]
    fn test_empty_schedule_is_unpriced() {
        assert_eq!(select_unit_price(&[], 10), None);
    }

    #[test]
    fn test_price_never_increases_with_quantity() {
        let breaks = vec![
            PriceBreak::new(1, 2.00),
            PriceBreak::new(10, 1.75),
            PriceBreak::new(25, 1.60),
            PriceBreak::new(100, 1.20),
            PriceBreak::new(500, 0.95),
        ];

        let mut last = f64::MAX;
        for qty in 0..=1200 {
            let price = select_unit_price(&breaks, qty).unwrap();
            assert!(price <= last, "price rose at qty {}: {} > {}", qty, price, last);
            last = price;
        }
    }
}
