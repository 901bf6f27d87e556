//! CLI commands for the token ledger
//!
//! Implements all command handlers for the CLI interface.

use crate::access::Role;
use crate::config::TokenConfig;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::storage::{LedgerState, Storage, StorageConfig};
use crate::token::BaseToken;
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub state: LedgerState,
    pub storage: Storage,
}

impl AppState {
    /// Load an existing ledger from the data directory
    pub fn open(data_dir: &Path) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })?;

        if !storage.exists() {
            return Err(format!(
                "no ledger found at {:?}, run `token-ledger init` first",
                data_dir
            )
            .into());
        }

        let state = storage.load()?;
        log::debug!("Loaded ledger {}", state.ledger.address);

        Ok(Self { state, storage })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.state)?;
        Ok(())
    }

    pub fn ledger(&self) -> &BaseToken {
        &self.state.ledger
    }
}

/// Initialize a new ledger
pub fn cmd_init(data_dir: &Path, config: TokenConfig, force: bool) -> CliResult<()> {
    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    })?;

    if storage.exists() && !force {
        println!("⚠️  Ledger already exists at {:?}", data_dir);
        println!("   Use --force to reinitialize (this will delete existing data)");
        return Ok(());
    }

    let ledger = BaseToken::new(config)?;
    storage.save(&LedgerState::new(ledger.clone()))?;

    println!("✅ Ledger initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   📍 Address: {}", ledger.address);
    println!("   🏷️  {} ({})", ledger.name(), ledger.symbol());
    println!("   🔧 Cap: {}", ledger.cap());
    println!(
        "   💰 Initial supply: {} to {}",
        ledger.total_supply(),
        ledger.owner()
    );

    Ok(())
}

/// Apply a ledger operation, persist it and print the notification
///
/// `op` runs against a staged copy of the state, which is kept and saved
/// only when it succeeds.
pub fn cmd_apply<F>(app: &mut AppState, op: F) -> CliResult<()>
where
    F: FnOnce(&mut LedgerState) -> Result<LedgerEvent, LedgerError>,
{
    let mut staged = app.state.clone();
    let event = op(&mut staged)?;
    app.state = staged;
    app.save()?;
    println!("✅ {}", event);
    Ok(())
}

/// Display ledger information
pub fn cmd_info(app: &AppState) -> CliResult<()> {
    let ledger = app.ledger();

    println!("📊 Ledger Information");
    println!("   ├─ Address: {}", ledger.address);
    println!("   ├─ Name: {}", ledger.name());
    println!("   ├─ Symbol: {}", ledger.symbol());
    println!("   ├─ Decimals: {}", ledger.decimals());
    println!("   ├─ Owner: {}", ledger.owner());
    println!("   ├─ Total supply: {}", ledger.total_supply());
    println!("   ├─ Cap: {}", ledger.cap());
    println!("   ├─ Holders: {}", ledger.holder_count());
    println!("   ├─ Minting finished: {}", ledger.minting_finished());
    println!("   ├─ Transfers enabled: {}", ledger.transfer_enabled());
    println!("   └─ Foreign tokens: {}", app.state.foreign.count());

    Ok(())
}

pub fn cmd_balance(app: &AppState, address: &str) -> CliResult<()> {
    let ledger = app.ledger();
    println!(
        "💰 Balance for {}: {} {}",
        address,
        ledger.balance_of(address),
        ledger.symbol()
    );
    Ok(())
}

pub fn cmd_allowance(app: &AppState, owner: &str, spender: &str) -> CliResult<()> {
    println!(
        "🔓 {} may spend {} of {}'s tokens",
        spender,
        app.ledger().allowance(owner, spender),
        owner
    );
    Ok(())
}

/// List members of every role
pub fn cmd_role_list(app: &AppState) -> CliResult<()> {
    let ledger = app.ledger();
    println!("👑 Owner: {}", ledger.owner());
    for role in Role::ALL {
        let members = ledger.role_members(role);
        if members.is_empty() {
            println!("   {}: (none)", role);
        } else {
            println!("   {}: {}", role, members.join(", "));
        }
    }
    Ok(())
}

/// Create a foreign token
pub fn cmd_foreign_create(
    app: &mut AppState,
    name: String,
    symbol: String,
    decimals: u8,
    supply: u128,
    creator: &str,
) -> CliResult<()> {
    let token = app
        .state
        .foreign
        .create_token(name, symbol, decimals, supply, creator)?;
    app.save()?;

    println!("🪙 Foreign token created!");
    println!("   📍 Address: {}", token.address);
    println!("   🏷️  {} ({})", token.name(), token.symbol());
    println!("   💰 Supply: {} to {}", token.total_supply(), creator);

    Ok(())
}

pub fn cmd_foreign_balance(app: &AppState, token: &str, holder: &str) -> CliResult<()> {
    let balance = app.state.foreign.balance_of(token, holder)?;
    println!("💰 {} holds {} of {}", holder, balance, token);
    Ok(())
}

pub fn cmd_foreign_list(app: &AppState) -> CliResult<()> {
    let tokens = app.state.foreign.list();
    if tokens.is_empty() {
        println!("📭 No foreign tokens.");
        return Ok(());
    }

    let own = &app.ledger().address;
    println!("📋 Foreign tokens:");
    for token in tokens {
        println!(
            "   {} {} ({}) - held by ledger: {}",
            token.address,
            token.name(),
            token.symbol(),
            token.balance_of(own)
        );
    }
    Ok(())
}

/// Show recent notifications
pub fn cmd_history(app: &AppState, count: usize) -> CliResult<()> {
    let history = app.ledger().history();
    if history.is_empty() {
        println!("📭 No notifications recorded.");
        return Ok(());
    }

    println!("📜 Recent notifications:");
    let skip = history.len().saturating_sub(count);
    for record in history.iter().skip(skip) {
        println!(
            "   {} {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.event
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_app(dir: &Path) -> AppState {
        let config = TokenConfig::new("Base Token", "BASE", 18, 1000, 1000, "owner");
        cmd_init(dir, config, false).unwrap();
        AppState::open(dir).unwrap()
    }

    #[test]
    fn test_open_without_init_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(AppState::open(temp_dir.path()).is_err());
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = init_app(temp_dir.path());
        cmd_apply(&mut app, |s| s.ledger.burn("owner", 100)).unwrap();

        let config = TokenConfig::new("Other", "OTH", 18, 5, 5, "owner");
        cmd_init(temp_dir.path(), config, false).unwrap();
        let app = AppState::open(temp_dir.path()).unwrap();
        assert_eq!(app.ledger().symbol(), "BASE");
        assert_eq!(app.ledger().total_supply(), 900);
    }

    #[test]
    fn test_apply_persists_only_successes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = init_app(temp_dir.path());

        cmd_apply(&mut app, |s| {
            s.ledger.add_role("owner", "owner", Role::Operator)
        })
        .unwrap();
        cmd_apply(&mut app, |s| s.ledger.transfer("owner", "alice", 10)).unwrap();
        assert!(cmd_apply(&mut app, |s| s.ledger.transfer("alice", "bob", 1)).is_err());

        let reopened = AppState::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.ledger().balance_of("alice"), 10);
        assert_eq!(reopened.ledger().balance_of("bob"), 0);
    }

    #[test]
    fn test_failed_apply_leaves_state_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = init_app(temp_dir.path());

        let result = cmd_apply(&mut app, |s| {
            s.ledger.burn("owner", 100)?;
            s.ledger.transfer("owner", "alice", 1)
        });
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), LedgerError::TransferDisabled.to_string());

        assert_eq!(app.ledger().total_supply(), 1000);
        let reopened = AppState::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.ledger().total_supply(), 1000);
        assert_eq!(reopened.ledger().history().len(), 1);
    }

    #[test]
    fn test_foreign_recovery_flow() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut app = init_app(temp_dir.path());
        let own = app.ledger().address.clone();

        cmd_foreign_create(&mut app, "Other".to_string(), "OTH".to_string(), 6, 50, "bob")
            .unwrap();
        let foreign = app.state.foreign.list()[0].address.clone();

        cmd_apply(&mut app, |s| s.foreign.transfer(&foreign, "bob", &own, 20)).unwrap();
        cmd_apply(&mut app, |s| {
            s.ledger.recover_token("owner", &mut s.foreign, &foreign, 20)
        })
        .unwrap();

        let reopened = AppState::open(temp_dir.path()).unwrap();
        assert_eq!(
            reopened.state.foreign.balance_of(&foreign, "owner").unwrap(),
            20
        );
        assert_eq!(reopened.state.foreign.balance_of(&foreign, &own).unwrap(), 0);
    }
}
