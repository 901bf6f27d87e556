//! Capped, role-gated fungible token
//!
//! Every public operation checks authorization first, then the transfer
//! gate where relevant, then stages the arithmetic. State is written only
//! once every check has passed, so a failed call has no effect.

use crate::access::{AccessRegistry, Role};
use crate::config::TokenConfig;
use crate::crypto::derive_address;
use crate::error::{ensure_account, LedgerError};
use crate::event::{push_bounded, EventRecord, LedgerEvent};
use crate::token::allowance::AllowanceTable;
use crate::token::gate::{self, TransferGate};
use crate::token::metadata::TokenMetadata;
use crate::token::minting::MintingState;
use crate::token::recovery::{self, ForeignTokens};
use crate::token::supply::SupplyLedger;
use serde::{Deserialize, Serialize};

/// Address kind of capped ledgers
const LEDGER_KIND: &str = "ledger";

/// A capped token with minter/operator roles, a minting latch, a transfer
/// switch and foreign token recovery
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BaseToken {
    /// Ledger handle; also the account holding tokens sent to the ledger
    pub address: String,
    pub metadata: TokenMetadata,
    access: AccessRegistry,
    supply: SupplyLedger,
    allowances: AllowanceTable,
    gate: TransferGate,
    minting: MintingState,
    history: Vec<EventRecord>,
}

impl BaseToken {
    /// Build the ledger and mint the initial supply to the owner
    pub fn new(config: TokenConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        let metadata = TokenMetadata::new(config.name, config.symbol, config.decimals)?;
        let access = AccessRegistry::new(&config.owner)?;
        let address = derive_address(
            LEDGER_KIND,
            &[
                config.owner.as_str(),
                metadata.symbol.as_str(),
                metadata.name.as_str(),
            ],
        );

        let mut supply = SupplyLedger::new(config.cap);
        supply.mint(&config.owner, config.initial_supply)?;

        let mut token = Self {
            address,
            metadata,
            access,
            supply,
            allowances: AllowanceTable::new(),
            gate: TransferGate::Disabled,
            minting: MintingState::Open,
            history: Vec::new(),
        };
        if config.initial_supply > 0 {
            token.record(LedgerEvent::Mint {
                to: config.owner.clone(),
                amount: config.initial_supply,
            });
        }

        log::info!(
            "Token created: {} ({}) at {}, cap {}, initial supply {} to {}",
            token.name(),
            token.symbol(),
            token.address,
            token.cap(),
            config.initial_supply,
            config.owner
        );

        Ok(token)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn owner(&self) -> &str {
        self.access.owner()
    }

    pub fn total_supply(&self) -> u128 {
        self.supply.total_supply()
    }

    pub fn cap(&self) -> u128 {
        self.supply.cap()
    }

    pub fn balance_of(&self, address: &str) -> u128 {
        self.supply.balance_of(address)
    }

    pub fn allowance(&self, owner: &str, spender: &str) -> u128 {
        self.allowances.allowance(owner, spender)
    }

    pub fn has_role(&self, account: &str, role: Role) -> bool {
        self.access.has_role(account, role)
    }

    pub fn role_members(&self, role: Role) -> Vec<String> {
        self.access.members(role)
    }

    pub fn transfer_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn minting_finished(&self) -> bool {
        self.minting.is_finished()
    }

    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.supply.holders()
    }

    pub fn holder_count(&self) -> usize {
        self.supply.holder_count()
    }

    /// Recent notifications, oldest first
    pub fn history(&self) -> &[EventRecord] {
        &self.history
    }

    /// Whether `sum(balances) == total_supply <= cap`
    pub fn is_consistent(&self) -> bool {
        self.supply.is_consistent()
    }

    // =========================================================================
    // Roles and ownership
    // =========================================================================

    pub fn add_role(
        &mut self,
        caller: &str,
        account: &str,
        role: Role,
    ) -> Result<LedgerEvent, LedgerError> {
        let event = self.access.add_role(caller, account, role)?;
        Ok(self.record(event))
    }

    pub fn remove_role(
        &mut self,
        caller: &str,
        account: &str,
        role: Role,
    ) -> Result<LedgerEvent, LedgerError> {
        let event = self.access.remove_role(caller, account, role)?;
        Ok(self.record(event))
    }

    pub fn renounce_role(&mut self, caller: &str, role: Role) -> Result<LedgerEvent, LedgerError> {
        let event = self.access.renounce_role(caller, role)?;
        Ok(self.record(event))
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &str,
        new_owner: &str,
    ) -> Result<LedgerEvent, LedgerError> {
        let event = self.access.transfer_ownership(caller, new_owner)?;
        Ok(self.record(event))
    }

    // =========================================================================
    // Supply
    // =========================================================================

    /// Create new tokens (minters only, until minting is finished)
    pub fn mint(
        &mut self,
        caller: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_role(caller, Role::Minter)?;
        self.minting.ensure_open()?;
        ensure_account(to)?;

        self.supply.mint(to, amount)?;

        log::info!("{} minted {} to {}", caller, amount, to);
        Ok(self.record(LedgerEvent::Mint {
            to: to.to_string(),
            amount,
        }))
    }

    /// Destroy tokens from the caller's own balance
    pub fn burn(&mut self, caller: &str, amount: u128) -> Result<LedgerEvent, LedgerError> {
        self.supply.burn(caller, amount)?;

        log::info!("{} burned {}", caller, amount);
        Ok(self.record(LedgerEvent::Burn {
            from: caller.to_string(),
            amount,
        }))
    }

    /// Destroy tokens from `from`, consuming the caller's allowance
    pub fn burn_from(
        &mut self,
        caller: &str,
        from: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        let remaining = self.allowances.remaining_after(from, caller, amount)?;
        self.supply.burn(from, amount)?;
        self.allowances.set(from, caller, remaining);

        log::info!("{} burned {} from {}", caller, amount, from);
        Ok(self.record(LedgerEvent::Burn {
            from: from.to_string(),
            amount,
        }))
    }

    /// Finish minting forever (owner only)
    pub fn finish_minting(&mut self, caller: &str) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_owner(caller)?;
        self.minting.finish()?;

        log::info!("Minting finished for {}", self.address);
        Ok(self.record(LedgerEvent::MintFinished))
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Move tokens from the caller to `to`
    pub fn transfer(
        &mut self,
        caller: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.authorize_transfer(caller, caller)?;
        ensure_account(to)?;

        self.supply.transfer(caller, to, amount)?;

        log::debug!("Transfer {} from {} to {}", amount, caller, to);
        Ok(self.record(LedgerEvent::Transfer {
            from: caller.to_string(),
            to: to.to_string(),
            amount,
        }))
    }

    /// Move tokens from `from` to `to`, consuming the caller's allowance
    pub fn transfer_from(
        &mut self,
        caller: &str,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.authorize_transfer(caller, from)?;
        ensure_account(to)?;

        let remaining = self.allowances.remaining_after(from, caller, amount)?;
        self.supply.transfer(from, to, amount)?;
        self.allowances.set(from, caller, remaining);

        log::debug!(
            "Delegated transfer {} from {} to {} by {}",
            amount,
            from,
            to,
            caller
        );
        Ok(self.record(LedgerEvent::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }))
    }

    /// Open transfers to everyone, forever (owner only)
    pub fn enable_transfer(&mut self, caller: &str) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_owner(caller)?;
        self.gate.enable()?;

        log::info!("Transfers enabled for {}", self.address);
        Ok(self.record(LedgerEvent::TransferEnabled))
    }

    fn authorize_transfer(&self, sender: &str, from: &str) -> Result<(), LedgerError> {
        gate::authorize(
            self.gate,
            self.access.has_role(sender, Role::Operator),
            self.access.has_role(from, Role::Operator),
        )
    }

    // =========================================================================
    // Allowances
    // =========================================================================

    /// Set the spender's allowance, overwriting any previous value
    pub fn approve(
        &mut self,
        caller: &str,
        spender: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        ensure_account(spender)?;
        self.allowances.set(caller, spender, amount);
        Ok(self.approval(caller, spender, amount))
    }

    pub fn increase_allowance(
        &mut self,
        caller: &str,
        spender: &str,
        added: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        ensure_account(spender)?;
        let amount = self.allowances.increased(caller, spender, added)?;
        self.allowances.set(caller, spender, amount);
        Ok(self.approval(caller, spender, amount))
    }

    pub fn decrease_allowance(
        &mut self,
        caller: &str,
        spender: &str,
        subtracted: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        ensure_account(spender)?;
        let amount = self.allowances.remaining_after(caller, spender, subtracted)?;
        self.allowances.set(caller, spender, amount);
        Ok(self.approval(caller, spender, amount))
    }

    fn approval(&mut self, owner: &str, spender: &str, amount: u128) -> LedgerEvent {
        log::debug!("{} approved {} for {}", owner, spender, amount);
        self.record(LedgerEvent::Approval {
            owner: owner.to_string(),
            spender: spender.to_string(),
            amount,
        })
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Send `amount` of a foreign token held by the ledger's own account to
    /// the owner (owner only, never the ledger's own token)
    pub fn recover_token(
        &mut self,
        caller: &str,
        foreign: &mut dyn ForeignTokens,
        token: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.access.ensure_owner(caller)?;
        recovery::ensure_foreign(&self.address, token)?;

        let owner = self.owner().to_string();
        foreign.transfer(token, &self.address, &owner, amount)?;

        log::info!("Recovered {} of {} to {}", amount, token, owner);
        Ok(self.record(LedgerEvent::TokenRecovered {
            token: token.to_string(),
            amount,
            to: owner,
        }))
    }

    fn record(&mut self, event: LedgerEvent) -> LedgerEvent {
        push_bounded(&mut self.history, event.clone());
        event
    }
}
