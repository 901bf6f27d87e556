//! Plain fixed-supply token
//!
//! Used for foreign assets that may end up in a ledger's own account. No
//! roles, no switches: the whole supply belongs to the creator at creation.

use crate::error::{ensure_account, LedgerError};
use crate::event::{push_bounded, EventRecord, LedgerEvent};
use crate::token::allowance::AllowanceTable;
use crate::token::metadata::TokenMetadata;
use crate::token::supply::SupplyLedger;
use serde::{Deserialize, Serialize};

/// A fixed-supply fungible token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Token {
    /// Unique token address
    pub address: String,
    /// Token metadata
    pub metadata: TokenMetadata,
    /// Creator address
    pub creator: String,
    supply: SupplyLedger,
    allowances: AllowanceTable,
    /// Transfer history (last 100)
    pub transfer_history: Vec<EventRecord>,
}

impl Token {
    /// Create a new token with all supply allocated to creator
    pub fn new(
        address: String,
        metadata: TokenMetadata,
        creator: &str,
        total_supply: u128,
    ) -> Result<Self, LedgerError> {
        ensure_account(creator)?;
        if total_supply == 0 {
            return Err(LedgerError::InvalidCap);
        }

        let mut supply = SupplyLedger::new(total_supply);
        supply.mint(creator, total_supply)?;

        Ok(Self {
            address,
            metadata,
            creator: creator.to_string(),
            supply,
            allowances: AllowanceTable::new(),
            transfer_history: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn total_supply(&self) -> u128 {
        self.supply.total_supply()
    }

    pub fn balance_of(&self, address: &str) -> u128 {
        self.supply.balance_of(address)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances.allowance(owner, spender)
    }

    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.supply.holders()
    }

    pub fn holder_count(&self) -> usize {
        self.supply.holder_count()
    }

    /// Transfer tokens from one address to another
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        ensure_account(to)?;
        self.supply.transfer(from, to, amount)?;
        Ok(self.record_transfer(from, to, amount))
    }

    /// Approve a spender to transfer tokens on behalf of owner
    pub fn approve(
        &mut self,
        owner: &str,
        spender: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        ensure_account(spender)?;
        self.allowances.set(owner, spender, amount);

        Ok(LedgerEvent::Approval {
            owner: owner.to_string(),
            spender: spender.to_string(),
            amount,
        })
    }

    /// Transfer tokens on behalf of owner (requires prior approval)
    pub fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        ensure_account(to)?;
        let remaining = self.allowances.remaining_after(from, spender, amount)?;
        self.supply.transfer(from, to, amount)?;
        self.allowances.set(from, spender, remaining);

        Ok(self.record_transfer(from, to, amount))
    }

    fn record_transfer(&mut self, from: &str, to: &str, amount: u128) -> LedgerEvent {
        let event = LedgerEvent::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        };
        push_bounded(&mut self.transfer_history, event.clone());
        event
    }
}
