//! State-change notifications emitted by the ledger

use crate::access::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of notifications kept in a ledger's history
pub const HISTORY_LIMIT: usize = 100;

/// A notification emitted by a committed operation
///
/// Externally tagged, so amounts deserialize straight into `u128` whatever
/// the key order of the stored document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum LedgerEvent {
    RoleAdded {
        account: String,
        role: Role,
    },
    RoleRemoved {
        account: String,
        role: Role,
    },
    OwnershipTransferred {
        previous_owner: String,
        new_owner: String,
    },
    Transfer {
        from: String,
        to: String,
        amount: u128,
    },
    Approval {
        owner: String,
        spender: String,
        amount: u128,
    },
    Mint {
        to: String,
        amount: u128,
    },
    Burn {
        from: String,
        amount: u128,
    },
    TransferEnabled,
    MintFinished,
    TokenRecovered {
        token: String,
        amount: u128,
        to: String,
    },
}

impl LedgerEvent {
    /// Short name of the notification
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::RoleAdded { .. } => "RoleAdded",
            LedgerEvent::RoleRemoved { .. } => "RoleRemoved",
            LedgerEvent::OwnershipTransferred { .. } => "OwnershipTransferred",
            LedgerEvent::Transfer { .. } => "Transfer",
            LedgerEvent::Approval { .. } => "Approval",
            LedgerEvent::Mint { .. } => "Mint",
            LedgerEvent::Burn { .. } => "Burn",
            LedgerEvent::TransferEnabled => "TransferEnabled",
            LedgerEvent::MintFinished => "MintFinished",
            LedgerEvent::TokenRecovered { .. } => "TokenRecovered",
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::RoleAdded { account, role } => {
                write!(f, "RoleAdded: {} is now {}", account, role)
            }
            LedgerEvent::RoleRemoved { account, role } => {
                write!(f, "RoleRemoved: {} is no longer {}", account, role)
            }
            LedgerEvent::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => write!(
                f,
                "OwnershipTransferred: {} -> {}",
                previous_owner, new_owner
            ),
            LedgerEvent::Transfer { from, to, amount } => {
                write!(f, "Transfer: {} from {} to {}", amount, from, to)
            }
            LedgerEvent::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "Approval: {} lets {} spend {}", owner, spender, amount),
            LedgerEvent::Mint { to, amount } => write!(f, "Mint: {} to {}", amount, to),
            LedgerEvent::Burn { from, amount } => write!(f, "Burn: {} from {}", amount, from),
            LedgerEvent::TransferEnabled => f.write_str("TransferEnabled"),
            LedgerEvent::MintFinished => f.write_str("MintFinished"),
            LedgerEvent::TokenRecovered { token, amount, to } => {
                write!(f, "TokenRecovered: {} of {} to {}", amount, token, to)
            }
        }
    }
}

/// A notification together with the time it was committed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: LedgerEvent,
    pub timestamp: DateTime<Utc>,
}

/// Append to a bounded history, dropping the oldest entry when full
pub(crate) fn push_bounded(history: &mut Vec<EventRecord>, event: LedgerEvent) {
    history.push(EventRecord {
        event,
        timestamp: Utc::now(),
    });
    if history.len() > HISTORY_LIMIT {
        history.remove(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = LedgerEvent::Mint {
            to: "alice".to_string(),
            amount: 500,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["Mint"]["to"], "alice");
        assert_eq!(json["Mint"]["amount"], 500);

        let json = serde_json::to_value(LedgerEvent::MintFinished).unwrap();
        assert_eq!(json, "MintFinished");
    }

    #[test]
    fn test_event_deserializes_in_any_key_order() {
        let json = r#"{"Transfer":{"amount":340282366920938463463374607431768211455,"to":"bob","from":"alice"}}"#;
        let event: LedgerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            LedgerEvent::Transfer {
                from: "alice".to_string(),
                to: "bob".to_string(),
                amount: u128::MAX,
            }
        );

        let record = r#"{"timestamp":"2024-01-01T00:00:00Z","event":{"Burn":{"amount":7,"from":"alice"}}}"#;
        let record: EventRecord = serde_json::from_str(record).unwrap();
        assert_eq!(record.event.name(), "Burn");
    }

    #[test]
    fn test_display() {
        let event = LedgerEvent::Transfer {
            from: "alice".to_string(),
            to: "bob".to_string(),
            amount: 5,
        };
        assert_eq!(event.to_string(), "Transfer: 5 from alice to bob");
        assert_eq!(LedgerEvent::TransferEnabled.to_string(), "TransferEnabled");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = Vec::new();
        for i in 0..(HISTORY_LIMIT as u128 + 5) {
            push_bounded(
                &mut history,
                LedgerEvent::Burn {
                    from: "alice".to_string(),
                    amount: i,
                },
            );
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(
            history[0].event,
            LedgerEvent::Burn {
                from: "alice".to_string(),
                amount: 5
            }
        );
    }
}
