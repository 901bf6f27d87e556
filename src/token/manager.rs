//! Registry of foreign tokens
//!
//! Holds the plain tokens a ledger can receive by mistake and serves as the
//! token interface recovery delegates to.

use crate::crypto::derive_address;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::token::metadata::TokenMetadata;
use crate::token::recovery::ForeignTokens;
use crate::token::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Address kind of foreign tokens
const TOKEN_KIND: &str = "token";

/// Manages all foreign tokens by address
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenManager {
    tokens: HashMap<String, Token>,
    /// Deployment counter for address generation
    nonce: u64,
}

impl TokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new token
    ///
    /// All tokens are initially allocated to the creator.
    pub fn create_token(
        &mut self,
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: u128,
        creator: &str,
    ) -> Result<Token, LedgerError> {
        let metadata = TokenMetadata::new(name, symbol, decimals)?;

        let nonce = self.nonce.to_string();
        let address = derive_address(
            TOKEN_KIND,
            &[creator, metadata.symbol.as_str(), nonce.as_str()],
        );
        if self.exists(&address) {
            return Err(LedgerError::TokenExists(address));
        }

        let token = Token::new(address.clone(), metadata, creator, total_supply)?;
        self.nonce += 1;
        self.tokens.insert(address.clone(), token.clone());

        log::info!(
            "Foreign token created: {} ({}) at {}",
            token.name(),
            token.symbol(),
            address
        );

        Ok(token)
    }

    pub fn get(&self, address: &str) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn list(&self) -> Vec<&Token> {
        self.tokens.values().collect()
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    pub fn exists(&self, address: &str) -> bool {
        self.tokens.contains_key(address)
    }

    pub fn transfer(
        &mut self,
        token_address: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.token_mut(token_address)?.transfer(from, to, amount)
    }

    pub fn approve(
        &mut self,
        token_address: &str,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.token_mut(token_address)?.approve(owner, spender, amount)
    }

    pub fn transfer_from(
        &mut self,
        token_address: &str,
        spender: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.token_mut(token_address)?
            .transfer_from(spender, from, to, amount)
    }

    pub fn balance_of(&self, token_address: &str, holder: &str) -> Result<u128, LedgerError> {
        Ok(self.token(token_address)?.balance_of(holder))
    }

    pub fn allowance(
        &self,
        token_address: &str,
        owner: &str,
        spender: &str,
    ) -> Result<u128, LedgerError> {
        Ok(self.token(token_address)?.allowance(owner, spender))
    }

    /// Get all tokens held by an address
    pub fn tokens_for_holder(&self, holder: &str) -> Vec<(&Token, u128)> {
        self.tokens
            .values()
            .filter_map(|token| {
                let balance = token.balance_of(holder);
                if balance > 0 {
                    Some((token, balance))
                } else {
                    None
                }
            })
            .collect()
    }

    fn token(&self, address: &str) -> Result<&Token, LedgerError> {
        self.tokens
            .get(address)
            .ok_or_else(|| LedgerError::TokenNotFound(address.to_string()))
    }

    fn token_mut(&mut self, address: &str) -> Result<&mut Token, LedgerError> {
        self.tokens
            .get_mut(address)
            .ok_or_else(|| LedgerError::TokenNotFound(address.to_string()))
    }
}

impl ForeignTokens for TokenManager {
    fn transfer(
        &mut self,
        token: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<(), LedgerError> {
        TokenManager::transfer(self, token, from, to, amount).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::config::TokenConfig;
    use crate::token::BaseToken;

    fn manager_with_token(creator: &str, supply: u128) -> (TokenManager, String) {
        let mut manager = TokenManager::new();
        let token = manager
            .create_token(
                "Test Token".to_string(),
                "TST".to_string(),
                18,
                supply,
                creator,
            )
            .unwrap();
        (manager, token.address)
    }

    #[test]
    fn test_manager_creation() {
        let manager = TokenManager::new();
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_token_creation() {
        let (manager, address) = manager_with_token("creator", 1_000_000);

        assert!(address.starts_with("0x"));
        assert!(manager.exists(&address));
        assert_eq!(manager.balance_of(&address, "creator").unwrap(), 1_000_000);
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_same_symbol_gets_distinct_addresses() {
        let (mut manager, first) = manager_with_token("creator", 10);
        let second = manager
            .create_token("Again".to_string(), "TST".to_string(), 18, 10, "creator")
            .unwrap();

        assert_ne!(first, second.address);
        assert_eq!(manager.list().len(), 2);
    }

    #[test]
    fn test_create_rejects_taken_address() {
        let (mut manager, address) = manager_with_token("creator", 10);

        // Replaying the nonce derives the same address again
        manager.nonce = 0;
        let result = manager.create_token(
            "Test Token".to_string(),
            "TST".to_string(),
            18,
            99,
            "creator",
        );
        assert!(matches!(
            result,
            Err(LedgerError::TokenExists(ref taken)) if *taken == address
        ));
        assert_eq!(manager.count(), 1);
        assert_eq!(manager.balance_of(&address, "creator").unwrap(), 10);
        assert_eq!(manager.nonce, 0);
    }

    #[test]
    fn test_foreign_address_never_matches_ledger() {
        // Ledger named "0" with the same owner and symbol as the first token
        let ledger =
            BaseToken::new(TokenConfig::new("0", "BASE", 18, 100, 0, "owner")).unwrap();
        let mut manager = TokenManager::new();
        let token = manager
            .create_token("Other".to_string(), "BASE".to_string(), 18, 10, "owner")
            .unwrap();

        assert_ne!(token.address, ledger.address);
    }

    #[test]
    fn test_approve_and_transfer_from() {
        let (mut manager, address) = manager_with_token("creator", 1_000_000);

        manager
            .approve(&address, "creator", "spender", 5000)
            .unwrap();
        manager
            .transfer_from(&address, "spender", "creator", "recipient", 1000)
            .unwrap();

        assert_eq!(manager.balance_of(&address, "recipient").unwrap(), 1000);
        assert_eq!(
            manager.allowance(&address, "creator", "spender").unwrap(),
            4000
        );
    }

    #[test]
    fn test_tokens_for_holder() {
        let (mut manager, address) = manager_with_token("alice", 1000);

        assert_eq!(manager.tokens_for_holder("alice").len(), 1);
        assert!(manager.tokens_for_holder("bob").is_empty());

        manager.transfer(&address, "alice", "bob", 500).unwrap();

        let bob_tokens = manager.tokens_for_holder("bob");
        assert_eq!(bob_tokens.len(), 1);
        assert_eq!(bob_tokens[0].1, 500);
    }

    #[test]
    fn test_transfer_nonexistent_token() {
        let mut manager = TokenManager::new();

        let result = manager.transfer("0xNONEXISTENT", "from", "to", 100);
        assert!(matches!(result, Err(LedgerError::TokenNotFound(_))));
    }

    #[test]
    fn test_recover_through_manager() {
        let mut ledger = BaseToken::new(TokenConfig::new(
            "Base Token",
            "BASE",
            18,
            1000,
            1000,
            "owner",
        ))
        .unwrap();
        let (mut manager, foreign) = manager_with_token("third_party", 10);

        // Sent to the ledger's own account by mistake
        manager
            .transfer(&foreign, "third_party", &ledger.address, 10)
            .unwrap();

        let own = ledger.address.clone();
        let result = ledger.recover_token("owner", &mut manager, &own, 10);
        assert!(matches!(result, Err(LedgerError::SelfRecoveryForbidden)));

        let result = ledger.recover_token("owner", &mut manager, "0xmissing", 10);
        assert!(matches!(result, Err(LedgerError::TokenNotFound(_))));

        ledger
            .recover_token("owner", &mut manager, &foreign, 10)
            .unwrap();
        assert_eq!(manager.balance_of(&foreign, "owner").unwrap(), 10);
        assert_eq!(manager.balance_of(&foreign, &ledger.address).unwrap(), 0);
        assert_eq!(ledger.balance_of("owner"), 1000);
        assert!(!ledger.has_role("owner", Role::Minter));
    }
}
