//! Capped, role-gated fungible token ledger
//!
//! Building blocks, leaf first:
//! - [`SupplyLedger`]: balances, total supply and the immutable cap
//! - [`AllowanceTable`]: delegated spending limits
//! - [`TransferGate`]: one-way transfer switch with operator bypass
//! - [`MintingState`]: one-way minting latch
//! - [`ForeignTokens`]: interface recovery delegates to
//!
//! [`BaseToken`] composes them behind role checks; [`SharedLedger`] wraps
//! it for concurrent hosts. [`Token`] and [`TokenManager`] model foreign
//! assets.
//!
//! # Example
//!
//! ```
//! use capped_token_ledger::access::Role;
//! use capped_token_ledger::config::TokenConfig;
//! use capped_token_ledger::token::BaseToken;
//!
//! let config = TokenConfig::new("Base Token", "BASE", 18, 1_000, 1_000, "owner");
//! let mut token = BaseToken::new(config).unwrap();
//!
//! token.add_role("owner", "minter", Role::Minter).unwrap();
//! token.burn("owner", 500).unwrap();
//! token.mint("minter", "alice", 500).unwrap();
//!
//! // Transfers stay closed until the owner opens them
//! assert!(token.transfer("alice", "bob", 10).is_err());
//! token.enable_transfer("owner").unwrap();
//! token.transfer("alice", "bob", 10).unwrap();
//! assert_eq!(token.balance_of("bob"), 10);
//! ```

pub mod allowance;
pub mod gate;
pub mod ledger;
pub mod manager;
pub mod metadata;
pub mod minting;
pub mod recovery;
pub mod shared;
pub mod supply;
pub mod token;

pub use allowance::AllowanceTable;
pub use gate::{authorize, TransferGate};
pub use ledger::BaseToken;
pub use manager::TokenManager;
pub use metadata::TokenMetadata;
pub use minting::MintingState;
pub use recovery::ForeignTokens;
pub use shared::SharedLedger;
pub use supply::SupplyLedger;
pub use token::Token;
