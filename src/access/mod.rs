//! Role-based access control
//!
//! A single owner administers named role sets:
//! - `minter` accounts may create new supply
//! - `operator` accounts may move tokens while transfers are disabled
//!
//! The owner is not a role member; ownership moves only through
//! [`AccessRegistry::transfer_ownership`].

pub mod registry;

pub use registry::{AccessRegistry, Role};
