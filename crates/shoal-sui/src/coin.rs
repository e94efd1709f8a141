//! Coin-type matching and base-unit arithmetic
//!
//! Amounts cross every boundary as decimal-integer strings in base units and
//! are parsed as u128 before any arithmetic. Floats only appear after the
//! division by `10^decimals`.

use crate::constants::{DUST_THRESHOLD, SUI_COIN_TYPE};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("amount is not a base-unit integer string: {0:?}")]
    NotAnInteger(String),
    #[error("amount overflows u128: {0:?}")]
    Overflow(String),
}

/// Parse a base-unit decimal-integer string. Signs, decimal points and
/// exponents are rejected outright.
pub fn parse_base_units(s: &str) -> Result<u128, AmountError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotAnInteger(s.to_string()));
    }
    s.parse::<u128>()
        .map_err(|_| AmountError::Overflow(s.to_string()))
}

/// `base_units / 10^decimals` as the human-readable quantity
pub fn normalize_amount(base_units: u128, decimals: u8) -> f64 {
    base_units as f64 / 10f64.powi(decimals as i32)
}

/// Whether a normalized balance is too small to display
pub fn is_dust(normalized: f64) -> bool {
    normalized < DUST_THRESHOLD
}

/// Collapse representational variants of the native gas token to the
/// canonical short form; other types pass through unchanged.
pub fn normalize_coin_type(coin_type: &str) -> String {
    if coin_type.ends_with("::sui::SUI") {
        SUI_COIN_TYPE.to_string()
    } else {
        coin_type.to_string()
    }
}

/// Trailing type segment, e.g. `USDC` for `0x..::coin::USDC`
pub fn trailing_segment(coin_type: &str) -> &str {
    coin_type.rsplit("::").next().unwrap_or(coin_type)
}

/// Coin-type identity tolerant of representational variants of the same
/// token: canonical forms compare equal, otherwise matching falls back to
/// trailing type-segment identity (never exact-string equality).
pub fn same_coin_type(a: &str, b: &str) -> bool {
    let (na, nb) = (normalize_coin_type(a), normalize_coin_type(b));
    if na == nb {
        return true;
    }
    let (sa, sb) = (trailing_segment(&na), trailing_segment(&nb));
    !sa.is_empty() && sa == sb
}

/// Best-effort symbol when metadata is unavailable
pub fn symbol_from_type(coin_type: &str) -> String {
    trailing_segment(coin_type).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base_unit_strings() {
        assert_eq!(parse_base_units("2500000000"), Ok(2_500_000_000));
        assert_eq!(parse_base_units("0"), Ok(0));
        assert_eq!(
            parse_base_units("340282366920938463463374607431768211455"),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn rejects_non_integer_amounts() {
        for bad in ["", "1.5", "-1", "+1", "1e9", " 1", "0x10"] {
            assert!(matches!(
                parse_base_units(bad),
                Err(AmountError::NotAnInteger(_))
            ));
        }
        assert!(matches!(
            parse_base_units("340282366920938463463374607431768211456"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn normalizes_exactly_for_representable_amounts() {
        assert_eq!(normalize_amount(2_500_000_000, 9), 2.5);
        assert_eq!(normalize_amount(4_000_000, 6), 4.0);
        assert_eq!(normalize_amount(0, 9), 0.0);
    }

    #[test]
    fn sui_variants_collapse_to_canonical() {
        let long = "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";
        assert_eq!(normalize_coin_type(long), SUI_COIN_TYPE);
        assert!(same_coin_type(long, SUI_COIN_TYPE));
    }

    #[test]
    fn trailing_segment_matching() {
        assert!(same_coin_type(
            "0xaaa::coin::USDC",
            "0xbbb::wrapped::USDC"
        ));
        assert!(!same_coin_type("0xaaa::coin::USDC", "0xaaa::coin::USDT"));
    }

    #[test]
    fn dust_threshold() {
        assert!(is_dust(0.0000009));
        assert!(!is_dust(0.000001));
    }
}
