//! Owner and role membership registry

use crate::error::{ensure_account, LedgerError};
use crate::event::LedgerEvent;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Named roles granted by the owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Minter,
    Operator,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Minter, Role::Operator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Minter => "minter",
            Role::Operator => "operator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minter" => Ok(Role::Minter),
            "operator" => Ok(Role::Operator),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Owner identity plus role -> members mapping
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessRegistry {
    owner: String,
    members: HashMap<Role, HashSet<String>>,
}

impl AccessRegistry {
    /// Create a registry administered by `owner`, with every role set empty
    pub fn new(owner: &str) -> Result<Self, LedgerError> {
        ensure_account(owner)?;
        Ok(Self {
            owner: owner.to_string(),
            members: HashMap::new(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_owner(&self, account: &str) -> bool {
        self.owner == account
    }

    /// Fail with `Unauthorized` unless `caller` is the owner
    pub fn ensure_owner(&self, caller: &str) -> Result<(), LedgerError> {
        if !self.is_owner(caller) {
            log::warn!("Rejected owner-only call from {}", caller);
            return Err(LedgerError::unauthorized(caller, "owner"));
        }
        Ok(())
    }

    pub fn has_role(&self, account: &str, role: Role) -> bool {
        self.members
            .get(&role)
            .map(|set| set.contains(account))
            .unwrap_or(false)
    }

    /// Fail with `Unauthorized` unless `account` holds `role`
    pub fn ensure_role(&self, account: &str, role: Role) -> Result<(), LedgerError> {
        if !self.has_role(account, role) {
            log::warn!("Rejected {}-only call from {}", role, account);
            return Err(LedgerError::unauthorized(account, role.as_str()));
        }
        Ok(())
    }

    /// Sorted members of a role
    pub fn members(&self, role: Role) -> Vec<String> {
        let mut members: Vec<String> = self
            .members
            .get(&role)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    /// Grant `role` to `account` (owner only)
    pub fn add_role(
        &mut self,
        caller: &str,
        account: &str,
        role: Role,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_owner(caller)?;
        ensure_account(account)?;
        if self.has_role(account, role) {
            return Err(LedgerError::AlreadyMember {
                account: account.to_string(),
                role,
            });
        }

        self.members
            .entry(role)
            .or_default()
            .insert(account.to_string());

        log::info!("Granted {} role to {}", role, account);
        Ok(LedgerEvent::RoleAdded {
            account: account.to_string(),
            role,
        })
    }

    /// Revoke `role` from `account` (owner only)
    pub fn remove_role(
        &mut self,
        caller: &str,
        account: &str,
        role: Role,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_owner(caller)?;
        self.take_membership(account, role)?;

        log::info!("Revoked {} role from {}", role, account);
        Ok(LedgerEvent::RoleRemoved {
            account: account.to_string(),
            role,
        })
    }

    /// Drop the caller's own membership of `role`
    pub fn renounce_role(&mut self, caller: &str, role: Role) -> Result<LedgerEvent, LedgerError> {
        self.take_membership(caller, role)?;

        log::info!("{} renounced the {} role", caller, role);
        Ok(LedgerEvent::RoleRemoved {
            account: caller.to_string(),
            role,
        })
    }

    /// Hand ownership to `new_owner` (owner only)
    pub fn transfer_ownership(
        &mut self,
        caller: &str,
        new_owner: &str,
    ) -> Result<LedgerEvent, LedgerError> {
        self.ensure_owner(caller)?;
        ensure_account(new_owner)?;

        let previous_owner = std::mem::replace(&mut self.owner, new_owner.to_string());

        log::info!("Ownership transferred from {} to {}", previous_owner, new_owner);
        Ok(LedgerEvent::OwnershipTransferred {
            previous_owner,
            new_owner: new_owner.to_string(),
        })
    }

    fn take_membership(&mut self, account: &str, role: Role) -> Result<(), LedgerError> {
        let removed = self
            .members
            .get_mut(&role)
            .map(|set| set.remove(account))
            .unwrap_or(false);

        if !removed {
            return Err(LedgerError::NotMember {
                account: account.to_string(),
                role,
            });
        }
        Ok(())
    }
}
