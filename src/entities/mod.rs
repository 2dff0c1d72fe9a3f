//! Entity type definitions
//!
//! The COGS pipeline works with the following types:
//!
//! - [`LineItem`] - One BOM row (part number, manufacturer, quantity per board)
//! - [`PartMatch`] - A catalog part resolved by the pricing API
//! - [`PriceBreak`] - Minimum order quantity and the unit price from there up
//! - [`CogsResult`] - Total part cost at one requested build quantity

pub mod cogs_result;
pub mod line_item;
pub mod part;

pub use cogs_result::CogsResult;
pub use line_item::LineItem;
pub use part::{PartMatch, PriceBreak};
