//! Fixed-point price helpers (two fractional digits, `NUMERIC(10,2)` in the store)

use std::str::FromStr;

use catalog_shared::constants::PRICE_SCALE;
use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

/// Largest value a `NUMERIC(10,2)` column holds.
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, PRICE_SCALE)
}

/// Round to two fractional digits and force scale 2, so `12.5` and `12.500`
/// become the same `12.50`.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

/// Parse a price cell. Accepts plain (`12.5`) and scientific (`1.25e1`) notation.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .map(normalize_price)
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price_negative"));
    }
    if *price > max_price() {
        return Err(ValidationError::new("price_too_large"));
    }
    Ok(())
}
