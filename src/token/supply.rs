//! Balances, total supply and cap
//!
//! Pure checked arithmetic with no authorization. Every mutation computes
//! all new values first and only then writes them, so a failed call leaves
//! the ledger exactly as it was.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Balance map with a running total bounded by an immutable cap
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SupplyLedger {
    /// Balances: address -> amount (zero balances are not stored)
    balances: HashMap<String, u128>,
    total_supply: u128,
    cap: u128,
}

impl SupplyLedger {
    /// Create an empty ledger bounded by `cap`
    pub fn new(cap: u128) -> Self {
        Self {
            balances: HashMap::new(),
            total_supply: 0,
            cap,
        }
    }

    pub fn balance_of(&self, address: &str) -> u128 {
        *self.balances.get(address).unwrap_or(&0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    pub fn cap(&self) -> u128 {
        self.cap
    }

    /// Amount that can still be minted before hitting the cap
    pub fn headroom(&self) -> u128 {
        self.cap.saturating_sub(self.total_supply)
    }

    /// Get all holders with balances
    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Whether `sum(balances) == total_supply <= cap`
    pub fn is_consistent(&self) -> bool {
        let sum = self
            .balances
            .values()
            .try_fold(0u128, |acc, &b| acc.checked_add(b));
        sum == Some(self.total_supply) && self.total_supply <= self.cap
    }

    /// Create `amount` new units in `to`
    pub fn mint(&mut self, to: &str, amount: u128) -> Result<(), LedgerError> {
        let new_total = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        if new_total > self.cap {
            return Err(LedgerError::CapExceeded {
                cap: self.cap,
                supply: self.total_supply,
                amount,
            });
        }
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = new_total;
        self.set_balance(to, new_balance);
        Ok(())
    }

    /// Destroy `amount` units held by `from`
    pub fn burn(&mut self, from: &str, amount: u128) -> Result<(), LedgerError> {
        let new_balance = self.debited(from, amount)?;
        let new_total = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = new_total;
        self.set_balance(from, new_balance);
        Ok(())
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        let from_balance = self.debited(from, amount)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(from, from_balance);
        self.set_balance(to, to_balance);
        Ok(())
    }

    fn debited(&self, from: &str, amount: u128) -> Result<u128, LedgerError> {
        let have = self.balance_of(from);
        have.checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance { have, need: amount })
    }

    fn set_balance(&mut self, address: &str, amount: u128) {
        if amount == 0 {
            self.balances.remove(address);
        } else {
            self.balances.insert(address.to_string(), amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_within_cap() {
        let mut ledger = SupplyLedger::new(1000);

        ledger.mint("alice", 600).unwrap();
        ledger.mint("bob", 400).unwrap();

        assert_eq!(ledger.total_supply(), 1000);
        assert_eq!(ledger.balance_of("alice"), 600);
        assert_eq!(ledger.headroom(), 0);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_mint_over_cap() {
        let mut ledger = SupplyLedger::new(1000);
        ledger.mint("alice", 1000).unwrap();

        let result = ledger.mint("alice", 1);
        assert!(matches!(
            result,
            Err(LedgerError::CapExceeded {
                cap: 1000,
                supply: 1000,
                amount: 1
            })
        ));
        assert_eq!(ledger.total_supply(), 1000);
        assert_eq!(ledger.balance_of("alice"), 1000);
    }

    #[test]
    fn test_mint_overflow() {
        let mut ledger = SupplyLedger::new(u128::MAX);
        ledger.mint("alice", u128::MAX).unwrap();

        let result = ledger.mint("bob", 1);
        assert!(matches!(result, Err(LedgerError::Overflow)));
        assert_eq!(ledger.balance_of("bob"), 0);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_burn_frees_headroom() {
        let mut ledger = SupplyLedger::new(1000);
        ledger.mint("alice", 1000).unwrap();

        ledger.burn("alice", 1000).unwrap();
        assert_eq!(ledger.total_supply(), 0);
        assert_eq!(ledger.holder_count(), 0);
        assert_eq!(ledger.headroom(), 1000);

        ledger.mint("bob", 500).unwrap();
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_burn_insufficient_balance() {
        let mut ledger = SupplyLedger::new(1000);
        ledger.mint("alice", 10).unwrap();

        let result = ledger.burn("alice", 11);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { have: 10, need: 11 })
        ));
        assert_eq!(ledger.total_supply(), 10);
    }

    #[test]
    fn test_transfer() {
        let mut ledger = SupplyLedger::new(1000);
        ledger.mint("alice", 100).unwrap();

        ledger.transfer("alice", "bob", 40).unwrap();
        assert_eq!(ledger.balance_of("alice"), 60);
        assert_eq!(ledger.balance_of("bob"), 40);
        assert_eq!(ledger.holder_count(), 2);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_transfer_to_self_and_zero_amount() {
        let mut ledger = SupplyLedger::new(1000);
        ledger.mint("alice", 100).unwrap();

        ledger.transfer("alice", "alice", 100).unwrap();
        assert_eq!(ledger.balance_of("alice"), 100);

        ledger.transfer("bob", "alice", 0).unwrap();
        assert_eq!(ledger.balance_of("bob"), 0);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_transfer_insufficient_balance_is_atomic() {
        let mut ledger = SupplyLedger::new(1000);
        ledger.mint("alice", 100).unwrap();

        let result = ledger.transfer("alice", "bob", 101);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.balance_of("alice"), 100);
        assert_eq!(ledger.balance_of("bob"), 0);
    }
}
