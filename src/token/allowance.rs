//! Delegated spending allowances

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Allowances: owner -> (spender -> amount)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AllowanceTable {
    allowances: HashMap<String, HashMap<String, u128>>,
}

impl AllowanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get allowance for a spender
    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Overwrite the allowance (0 revokes)
    pub fn set(&mut self, owner: &str, spender: &str, amount: u128) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(owner) {
                spenders.remove(spender);
                if spenders.is_empty() {
                    self.allowances.remove(owner);
                }
            }
            return;
        }

        self.allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
    }

    /// Allowance left after spending `amount`, without committing it
    pub fn remaining_after(
        &self,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        let have = self.allowance(owner, spender);
        have.checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance { have, need: amount })
    }

    /// Allowance after adding `added`, without committing it
    pub fn increased(&self, owner: &str, spender: &str, added: u128) -> Result<u128, LedgerError> {
        self.allowance(owner, spender)
            .checked_add(added)
            .ok_or(LedgerError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut table = AllowanceTable::new();
        assert_eq!(table.allowance("owner", "spender"), 0);

        table.set("owner", "spender", 5000);
        table.set("owner", "spender", 3000);
        assert_eq!(table.allowance("owner", "spender"), 3000);

        table.set("owner", "spender", 0);
        assert_eq!(table.allowance("owner", "spender"), 0);
        assert!(table.allowances.is_empty());
    }

    #[test]
    fn test_remaining_after() {
        let mut table = AllowanceTable::new();
        table.set("owner", "spender", 100);

        assert_eq!(table.remaining_after("owner", "spender", 100).unwrap(), 0);
        assert!(matches!(
            table.remaining_after("owner", "spender", 101),
            Err(LedgerError::InsufficientAllowance {
                have: 100,
                need: 101
            })
        ));
        // Nothing is committed by the query
        assert_eq!(table.allowance("owner", "spender"), 100);
    }

    #[test]
    fn test_increased_overflow() {
        let mut table = AllowanceTable::new();
        table.set("owner", "spender", u128::MAX);

        assert!(matches!(
            table.increased("owner", "spender", 1),
            Err(LedgerError::Overflow)
        ));
        assert_eq!(table.increased("owner", "other", 7).unwrap(), 7);
    }
}
