//! Recovery of foreign tokens held by the ledger's own account

use crate::error::LedgerError;

/// External token interface used to move foreign assets
pub trait ForeignTokens {
    /// Move `amount` of `token` from `from` to `to`
    fn transfer(&mut self, token: &str, from: &str, to: &str, amount: u128)
        -> Result<(), LedgerError>;
}

/// Refuse recovery of the ledger's own token
pub fn ensure_foreign(own_handle: &str, token: &str) -> Result<(), LedgerError> {
    if own_handle == token {
        log::warn!("Refused recovery of the ledger's own token {}", token);
        return Err(LedgerError::SelfRecoveryForbidden);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory foreign token balances: (token, holder) -> amount
    #[derive(Default)]
    pub(crate) struct MockTokens {
        pub balances: HashMap<(String, String), u128>,
    }

    impl MockTokens {
        pub fn with_balance(token: &str, holder: &str, amount: u128) -> Self {
            let mut mock = Self::default();
            mock.balances
                .insert((token.to_string(), holder.to_string()), amount);
            mock
        }

        pub fn balance(&self, token: &str, holder: &str) -> u128 {
            *self
                .balances
                .get(&(token.to_string(), holder.to_string()))
                .unwrap_or(&0)
        }
    }

    impl ForeignTokens for MockTokens {
        fn transfer(
            &mut self,
            token: &str,
            from: &str,
            to: &str,
            amount: u128,
        ) -> Result<(), LedgerError> {
            let have = self.balance(token, from);
            if have < amount {
                return Err(LedgerError::InsufficientBalance { have, need: amount });
            }
            let to_balance = self.balance(token, to);
            self.balances
                .insert((token.to_string(), from.to_string()), have - amount);
            self.balances
                .insert((token.to_string(), to.to_string()), to_balance + amount);
            Ok(())
        }
    }

    #[test]
    fn test_ensure_foreign() {
        assert!(ensure_foreign("0xown", "0xother").is_ok());
        assert!(matches!(
            ensure_foreign("0xown", "0xown"),
            Err(LedgerError::SelfRecoveryForbidden)
        ));
    }

    #[test]
    fn test_mock_transfer() {
        let mut tokens = MockTokens::with_balance("0xforeign", "ledger", 10);
        tokens.transfer("0xforeign", "ledger", "owner", 4).unwrap();
        assert_eq!(tokens.balance("0xforeign", "ledger"), 6);
        assert_eq!(tokens.balance("0xforeign", "owner"), 4);
    }
}
