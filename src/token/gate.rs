//! Transfer activation switch with operator bypass

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// One-way switch: `Disabled` until the owner enables transfers, then
/// `Enabled` forever
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferGate {
    #[default]
    Disabled,
    Enabled,
}

impl TransferGate {
    pub fn is_enabled(&self) -> bool {
        matches!(self, TransferGate::Enabled)
    }

    /// Flip to `Enabled`; fails with `AlreadyEnabled` on the second call
    pub fn enable(&mut self) -> Result<(), LedgerError> {
        match self {
            TransferGate::Enabled => Err(LedgerError::AlreadyEnabled),
            TransferGate::Disabled => {
                *self = TransferGate::Enabled;
                Ok(())
            }
        }
    }
}

/// Decide whether a transfer may proceed.
///
/// Permitted when the gate is open, or when either the account initiating
/// the call or the account whose tokens move is an operator.
pub fn authorize(
    gate: TransferGate,
    sender_is_operator: bool,
    from_is_operator: bool,
) -> Result<(), LedgerError> {
    if gate.is_enabled() || sender_is_operator || from_is_operator {
        Ok(())
    } else {
        Err(LedgerError::TransferDisabled)
    }
}
