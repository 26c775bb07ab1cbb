//! Quantity sanitization
//!
//! Every quantity that lands in the registry passes through here. Malformed,
//! negative or oversized input never fails; it always resolves to a value
//! inside `[0, bound]`.

use rust_decimal::prelude::*;
use std::num::IntErrorKind;

/// 2^53 - 1, the largest integer an IEEE-754 double represents exactly
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Default upper bound for quantities without a domain-specific maximum
pub const MAX_SAFE_QUANTITY: Decimal = Decimal::from_parts(0xFFFF_FFFF, 0x001F_FFFF, 0, false, 0);

/// Parse user input into a number
///
/// Accepts plain decimals, scientific notation and `0x`/`0o`/`0b` prefixed
/// literals. Anything unparseable (including NaN) yields zero. Magnitudes
/// beyond [`MAX_SAFE_QUANTITY`] saturate to it.
///
/// The result is not clamped to zero; see [`sanitize`].
pub fn parse_quantity(raw: &str) -> Decimal {
    let s = raw.trim();
    if s.is_empty() {
        return Decimal::ZERO;
    }

    if let Some(value) = parse_radix_literal(s) {
        return value;
    }

    if let Ok(value) = Decimal::from_str(s) {
        return value;
    }

    // Scientific notation, "inf", out-of-range digit strings
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Decimal::ZERO,
        Ok(v) if v >= MAX_SAFE_INTEGER as f64 => MAX_SAFE_QUANTITY,
        Ok(v) if v <= -(MAX_SAFE_INTEGER as f64) => -MAX_SAFE_QUANTITY,
        Ok(v) => Decimal::from_f64(v).unwrap_or(Decimal::ZERO),
        Err(_) => Decimal::ZERO,
    }
}

fn parse_radix_literal(s: &str) -> Option<Decimal> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };

    // from_str_radix tolerates a sign, a prefixed literal must not carry one
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Some(Decimal::ZERO);
    }

    let value = match u128::from_str_radix(digits, radix) {
        Ok(v) if v > MAX_SAFE_INTEGER as u128 => MAX_SAFE_QUANTITY,
        Ok(v) => Decimal::from(v as u64),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_SAFE_QUANTITY,
        Err(_) => Decimal::ZERO,
    };
    Some(value)
}

/// Constrain a quantity into `[0, upper]`
///
/// `upper` defaults to [`MAX_SAFE_QUANTITY`] and is itself capped by it.
pub fn clamp_quantity(value: Decimal, upper: Option<Decimal>) -> Decimal {
    let bound = upper
        .map(|u| u.clamp(Decimal::ZERO, MAX_SAFE_QUANTITY))
        .unwrap_or(MAX_SAFE_QUANTITY);
    value.clamp(Decimal::ZERO, bound).normalize()
}

/// Apply `delta` to `current` and clamp the result
pub fn sanitize(current: Decimal, delta: Decimal, upper: Option<Decimal>) -> Decimal {
    let candidate = current.checked_add(delta).unwrap_or(if delta.is_sign_negative() {
        Decimal::ZERO
    } else {
        MAX_SAFE_QUANTITY
    });
    clamp_quantity(candidate, upper)
}

/// [`parse_quantity`] followed by [`sanitize`]
pub fn sanitize_input(raw: &str, delta: Decimal, upper: Option<Decimal>) -> Decimal {
    sanitize(parse_quantity(raw), delta, upper)
}

/// Canonical decimal rendering of a quantity (`16`, never `0x10` or `16.00`)
pub fn canonical_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}
