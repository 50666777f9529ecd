//! Money calculation utilities using rust_decimal for precision

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Sales tax applied to every sale (10%)
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Round to 2 decimal places, midpoint away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax due on a subtotal
pub fn tax_for(subtotal: Decimal) -> Decimal {
    round2(subtotal * TAX_RATE)
}

/// Render with exactly two fractional digits, independent of locale
///
/// ```
/// use rust_decimal::Decimal;
/// use shared::money::format_money;
///
/// assert_eq!(format_money(Decimal::new(5, 0)), "5.00");
/// assert_eq!(format_money(Decimal::new(12345, 3)), "12.35");
/// ```
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round2(value))
}
