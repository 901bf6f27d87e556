//! Capped Token Ledger: a role-gated fungible token ledger in Rust
//!
//! This crate provides the state machine of a capped token featuring:
//! - Balances, allowances and an immutable supply cap with checked arithmetic
//! - Owner-administered `minter` and `operator` roles
//! - A one-way minting latch and a one-way transfer switch
//! - Operator bypass of the transfer switch for initial distribution
//! - Recovery of foreign tokens sent to the ledger's own account
//! - A shared handle serializing mutations for concurrent hosts
//! - JSON persistence with backups
//!
//! Every operation either commits in full and returns its notification, or
//! fails with a specific [`LedgerError`] and changes nothing.
//!
//! # Example
//!
//! ```rust
//! use capped_token_ledger::{BaseToken, LedgerError, Role, TokenConfig, TokenManager};
//!
//! let config = TokenConfig::new("Base Token", "BASE", 18, 1_000, 1_000, "owner");
//! let mut ledger = BaseToken::new(config).unwrap();
//!
//! // Burning frees headroom under the cap
//! ledger.add_role("owner", "minter", Role::Minter).unwrap();
//! ledger.burn("owner", 1_000).unwrap();
//! ledger.mint("minter", "alice", 500).unwrap();
//!
//! // Operators may move tokens before transfers are enabled
//! assert!(matches!(
//!     ledger.transfer("alice", "bob", 500),
//!     Err(LedgerError::TransferDisabled)
//! ));
//! ledger.add_role("owner", "alice", Role::Operator).unwrap();
//! ledger.transfer("alice", "bob", 500).unwrap();
//!
//! // Foreign tokens sent to the ledger can be recovered by the owner
//! let mut foreign = TokenManager::new();
//! let other = foreign
//!     .create_token("Other".to_string(), "OTH".to_string(), 6, 50, "carol")
//!     .unwrap();
//! foreign.transfer(&other.address, "carol", &ledger.address, 50).unwrap();
//! ledger
//!     .recover_token("owner", &mut foreign, &other.address, 50)
//!     .unwrap();
//! assert_eq!(foreign.balance_of(&other.address, "owner").unwrap(), 50);
//! ```

pub mod access;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod event;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use access::{AccessRegistry, Role};
pub use config::{ConfigError, TokenConfig};
pub use error::LedgerError;
pub use event::{EventRecord, LedgerEvent};
pub use storage::{LedgerState, Storage, StorageConfig, StorageError};
pub use token::{
    BaseToken, ForeignTokens, SharedLedger, SupplyLedger, Token, TokenManager, TransferGate,
};
