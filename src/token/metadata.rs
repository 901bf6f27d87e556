//! Token metadata (immutable after creation)

use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive token details fixed at construction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    /// Token name (e.g., "My Token")
    pub name: String,
    /// Token symbol (e.g., "MTK")
    pub symbol: String,
    /// Decimal places (usually 18)
    pub decimals: u8,
    /// Timestamp when created
    pub created_at: DateTime<Utc>,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(name: String, symbol: String, decimals: u8) -> Result<Self, LedgerError> {
        if name.is_empty() || name.chars().count() > 50 {
            return Err(LedgerError::InvalidName);
        }

        if symbol.is_empty() || symbol.chars().count() > 10 {
            return Err(LedgerError::InvalidSymbol);
        }

        if decimals > 18 {
            return Err(LedgerError::InvalidDecimals);
        }

        Ok(Self {
            name,
            symbol,
            decimals,
            created_at: Utc::now(),
        })
    }
}
