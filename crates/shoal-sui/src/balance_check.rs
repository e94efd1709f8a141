//! Pre-flight balance verification
//!
//! The chain performs the authoritative check at submission time; these
//! checks exist to produce a better user-facing error before a transaction is
//! ever built. Balances can change between check and submission.

use crate::coin::{normalize_coin_type, parse_base_units, same_coin_type};
use shoal_types::RawCoinBalance;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq)]
pub enum BalanceCheckError {
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u128, available: u128 },
    #[error("invalid amount: {amount}")]
    InvalidAmount { amount: String },
}

/// A snapshot of an address's holdings keyed by normalized coin type
#[derive(Debug, Default, Clone)]
pub struct BalanceSheet {
    holdings: HashMap<String, u128>,
}

impl BalanceSheet {
    /// Build from raw chain balances; entries with unparseable amounts are
    /// dropped with a warning rather than failing the whole snapshot
    pub fn from_raw(balances: &[RawCoinBalance]) -> Self {
        let mut holdings = HashMap::new();
        for b in balances {
            match parse_base_units(&b.total_balance) {
                Ok(units) => {
                    *holdings
                        .entry(normalize_coin_type(&b.coin_type))
                        .or_insert(0) += units;
                }
                Err(e) => {
                    warn!("[BalanceSheet] Skipping {}: {e}", b.coin_type);
                }
            }
        }
        Self { holdings }
    }

    /// Available base units for a coin type, tolerant of type variants
    pub fn available(&self, coin_type: &str) -> u128 {
        let normalized = normalize_coin_type(coin_type);
        if let Some(units) = self.holdings.get(&normalized) {
            return *units;
        }
        self.holdings
            .iter()
            .find(|(held, _)| same_coin_type(held, &normalized))
            .map(|(_, units)| *units)
            .unwrap_or(0)
    }

    /// Verify one requested amount against the snapshot
    pub fn check(&self, coin_type: &str, requested: u128) -> Result<(), BalanceCheckError> {
        if requested == 0 {
            return Err(BalanceCheckError::InvalidAmount {
                amount: requested.to_string(),
            });
        }
        let available = self.available(coin_type);
        if requested > available {
            return Err(BalanceCheckError::InsufficientFunds {
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Exactly the coin types whose requested amount exceeds the holding,
    /// in the order they were requested
    pub fn missing<'a>(&self, requested: &'a [(String, u128)]) -> Vec<&'a str> {
        requested
            .iter()
            .filter(|(coin_type, amount)| self.available(coin_type) < *amount)
            .map(|(coin_type, _)| coin_type.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(coin_type: &str, total: &str) -> RawCoinBalance {
        RawCoinBalance {
            coin_type: coin_type.to_string(),
            total_balance: total.to_string(),
            coin_object_count: 1,
        }
    }

    #[test]
    fn check_reports_requested_and_available() {
        let sheet = BalanceSheet::from_raw(&[raw("0x2::sui::SUI", "1000")]);
        assert!(sheet.check("0x2::sui::SUI", 1000).is_ok());
        assert_eq!(
            sheet.check("0x2::sui::SUI", 1001),
            Err(BalanceCheckError::InsufficientFunds {
                requested: 1001,
                available: 1000
            })
        );
    }

    #[test]
    fn zero_requests_are_invalid() {
        let sheet = BalanceSheet::default();
        assert!(matches!(
            sheet.check("0x2::sui::SUI", 0),
            Err(BalanceCheckError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn long_form_sui_matches_canonical_holding() {
        let long = "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI";
        let sheet = BalanceSheet::from_raw(&[raw(long, "500")]);
        assert_eq!(sheet.available("0x2::sui::SUI"), 500);
        assert!(sheet.check("0x2::sui::SUI", 500).is_ok());
    }

    #[test]
    fn missing_lists_exactly_the_underfunded_types() {
        let sheet = BalanceSheet::from_raw(&[
            raw("0x2::sui::SUI", "1000"),
            raw("0xaaa::usdc::USDC", "50"),
        ]);
        let requested = vec![
            ("0x2::sui::SUI".to_string(), 900u128),
            ("0xaaa::usdc::USDC".to_string(), 100u128),
            ("0xbbb::cetus::CETUS".to_string(), 1u128),
        ];
        let missing = sheet.missing(&requested);
        assert_eq!(missing, vec!["0xaaa::usdc::USDC", "0xbbb::cetus::CETUS"]);
    }

    #[test]
    fn unparseable_entries_are_skipped() {
        let sheet = BalanceSheet::from_raw(&[
            raw("0x2::sui::SUI", "not-a-number"),
            raw("0xaaa::usdc::USDC", "7"),
        ]);
        assert_eq!(sheet.available("0x2::sui::SUI"), 0);
        assert_eq!(sheet.available("0xaaa::usdc::USDC"), 7);
    }
}
