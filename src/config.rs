//! Ledger construction parameters
//!
//! A [`TokenConfig`] can be built in code or loaded from a JSON file:
//!
//! ```json
//! {
//!   "name": "Base Token",
//!   "symbol": "BASE",
//!   "decimals": 18,
//!   "cap": 1000000,
//!   "initial_supply": 1000,
//!   "owner": "alice"
//! }
//! ```

use crate::error::{ensure_account, LedgerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] LedgerError),
}

/// Everything needed to construct a ledger
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Maximum total supply, fixed forever
    pub cap: u128,
    /// Minted to `owner` at construction
    pub initial_supply: u128,
    pub owner: String,
}

impl TokenConfig {
    pub fn new(
        name: &str,
        symbol: &str,
        decimals: u8,
        cap: u128,
        initial_supply: u128,
        owner: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            cap,
            initial_supply,
            owner: owner.to_string(),
        }
    }

    /// Load and validate a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: TokenConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the supply parameters and owner identity
    ///
    /// Name, symbol and decimals are checked by `TokenMetadata::new`.
    pub fn validate(&self) -> Result<(), LedgerError> {
        ensure_account(&self.owner)?;
        if self.cap == 0 {
            return Err(LedgerError::InvalidCap);
        }
        if self.initial_supply > self.cap {
            return Err(LedgerError::CapExceeded {
                cap: self.cap,
                supply: 0,
                amount: self.initial_supply,
            });
        }
        Ok(())
    }
}
