//! Ledger error taxonomy
//!
//! Every rejected operation leaves the ledger untouched and reports one of
//! these kinds. Callers branch on the variant, never on the message text.

use crate::access::Role;
use thiserror::Error;

/// Errors returned by ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unauthorized: {caller} is not {required}")]
    Unauthorized { caller: String, required: String },
    #[error("Account {account} already has the {role} role")]
    AlreadyMember { account: String, role: Role },
    #[error("Account {account} does not have the {role} role")]
    NotMember { account: String, role: Role },
    #[error("Cap exceeded: minting {amount} on top of {supply} exceeds cap {cap}")]
    CapExceeded { cap: u128, supply: u128, amount: u128 },
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
    #[error("Transfers are disabled")]
    TransferDisabled,
    #[error("Minting is already finished")]
    AlreadyFinished,
    #[error("Transfers are already enabled")]
    AlreadyEnabled,
    #[error("Recovering the ledger's own token is forbidden")]
    SelfRecoveryForbidden,
    #[error("Invalid account: identity must not be empty")]
    InvalidAccount,
    #[error("Token not found: {0}")]
    TokenNotFound(String),
    #[error("Token already exists: {0}")]
    TokenExists(String),
    #[error("Invalid name: must be 1-50 characters")]
    InvalidName,
    #[error("Invalid symbol: must be 1-10 characters")]
    InvalidSymbol,
    #[error("Invalid decimals: must be 0-18")]
    InvalidDecimals,
    #[error("Invalid cap: must be greater than 0")]
    InvalidCap,
}

impl LedgerError {
    pub(crate) fn unauthorized(caller: &str, required: impl Into<String>) -> Self {
        Self::Unauthorized {
            caller: caller.to_string(),
            required: required.into(),
        }
    }
}

/// Reject empty account identities
pub(crate) fn ensure_account(account: &str) -> Result<(), LedgerError> {
    if account.is_empty() {
        return Err(LedgerError::InvalidAccount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = LedgerError::InsufficientBalance { have: 5, need: 10 };
        assert_eq!(err.to_string(), "Insufficient balance: have 5, need 10");

        let err = LedgerError::NotMember {
            account: "alice".to_string(),
            role: Role::Operator,
        };
        assert_eq!(
            err.to_string(),
            "Account alice does not have the operator role"
        );
    }

    #[test]
    fn test_ensure_account() {
        assert!(ensure_account("alice").is_ok());
        assert!(matches!(ensure_account(""), Err(LedgerError::InvalidAccount)));
    }
}
