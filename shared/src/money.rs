//! Money presentation helpers
//!
//! Amounts are accumulated as `Decimal` at full precision. Rounding to two
//! places happens here and only here, when a label is produced.

use rust_decimal::prelude::*;

/// Decimal places shown for monetary values
pub const DECIMAL_PLACES: u32 = 2;

/// Round to cents, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly two decimals ("10.00")
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Format an amount as euros ("10.00€")
pub fn format_euro(value: Decimal) -> String {
    format!("{}€", format_amount(value))
}
