//! Token Ledger CLI Application
//!
//! A command-line interface for administering a capped token ledger.

use capped_token_ledger::access::Role;
use capped_token_ledger::cli::{self, AppState};
use capped_token_ledger::config::TokenConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "token-ledger")]
#[command(version = "0.1.0")]
#[command(about = "A capped, role-gated fungible token ledger", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".token_ledger")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ledger
    Init {
        /// JSON configuration file (overrides the flags below)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Token name
        #[arg(long)]
        name: Option<String>,

        /// Token symbol
        #[arg(long)]
        symbol: Option<String>,

        /// Decimal places
        #[arg(long, default_value = "18")]
        decimals: u8,

        /// Maximum total supply
        #[arg(long)]
        cap: Option<u128>,

        /// Supply minted to the owner at creation
        #[arg(long, default_value = "0")]
        initial_supply: u128,

        /// Owner account
        #[arg(long)]
        owner: Option<String>,

        /// Replace an existing ledger
        #[arg(long)]
        force: bool,
    },

    /// Display ledger information
    Info,

    /// Show an account balance
    Balance {
        #[arg(short, long)]
        address: String,
    },

    /// Show an allowance
    Allowance {
        #[arg(short, long)]
        owner: String,

        #[arg(short, long)]
        spender: String,
    },

    /// Role management
    Role {
        #[command(subcommand)]
        action: RoleCommands,
    },

    /// Mint new tokens (minters only)
    Mint {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        to: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Burn the caller's tokens
    Burn {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Burn another account's tokens using an allowance
    BurnFrom {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Transfer the caller's tokens
    Transfer {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        to: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Transfer another account's tokens using an allowance
    TransferFrom {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        to: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Set a spender's allowance
    Approve {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        spender: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Open transfers to everyone (owner only, irreversible)
    EnableTransfer {
        #[arg(short, long)]
        caller: String,
    },

    /// Stop minting forever (owner only, irreversible)
    FinishMinting {
        #[arg(short, long)]
        caller: String,
    },

    /// Hand ownership to another account
    TransferOwnership {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        new_owner: String,
    },

    /// Foreign token operations
    Foreign {
        #[command(subcommand)]
        action: ForeignCommands,
    },

    /// Recover a foreign token held by the ledger (owner only)
    Recover {
        #[arg(short, long)]
        caller: String,

        /// Foreign token address
        #[arg(short, long)]
        token: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Show recent notifications
    History {
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

#[derive(Subcommand)]
enum RoleCommands {
    /// Grant a role (owner only)
    Add {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        account: String,

        /// minter or operator
        #[arg(short, long)]
        role: Role,
    },

    /// Revoke a role (owner only)
    Remove {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        account: String,

        #[arg(short, long)]
        role: Role,
    },

    /// Drop one of the caller's own roles
    Renounce {
        #[arg(short, long)]
        caller: String,

        #[arg(short, long)]
        role: Role,
    },

    /// List role members
    List,
}

#[derive(Subcommand)]
enum ForeignCommands {
    /// Create a foreign token
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        symbol: String,

        #[arg(short, long, default_value = "18")]
        decimals: u8,

        #[arg(long)]
        supply: u128,

        #[arg(short, long)]
        creator: String,
    },

    /// Transfer a foreign token
    Transfer {
        #[arg(short, long)]
        token: String,

        #[arg(short, long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(short, long)]
        amount: u128,
    },

    /// Show a foreign token balance
    Balance {
        #[arg(short, long)]
        token: String,

        #[arg(long)]
        holder: String,
    },

    /// List foreign tokens
    List,
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("❌ {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> cli::CliResult<()> {
    // Handle init command separately (doesn't need full state)
    if let Commands::Init {
        config,
        name,
        symbol,
        decimals,
        cap,
        initial_supply,
        owner,
        force,
    } = &cli.command
    {
        let config = match config {
            Some(path) => TokenConfig::from_file(path)?,
            None => TokenConfig {
                name: name.clone().ok_or("--name is required without --config")?,
                symbol: symbol.clone().ok_or("--symbol is required without --config")?,
                decimals: *decimals,
                cap: cap.ok_or("--cap is required without --config")?,
                initial_supply: *initial_supply,
                owner: owner.clone().ok_or("--owner is required without --config")?,
            },
        };
        return cli::cmd_init(&cli.data_dir, config, *force);
    }

    let mut app = AppState::open(&cli.data_dir)?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Info => cli::cmd_info(&app)?,
        Commands::Balance { address } => cli::cmd_balance(&app, &address)?,
        Commands::Allowance { owner, spender } => cli::cmd_allowance(&app, &owner, &spender)?,
        Commands::Role { action } => match action {
            RoleCommands::Add {
                caller,
                account,
                role,
            } => cli::cmd_apply(&mut app, |s| s.ledger.add_role(&caller, &account, role))?,
            RoleCommands::Remove {
                caller,
                account,
                role,
            } => cli::cmd_apply(&mut app, |s| s.ledger.remove_role(&caller, &account, role))?,
            RoleCommands::Renounce { caller, role } => {
                cli::cmd_apply(&mut app, |s| s.ledger.renounce_role(&caller, role))?
            }
            RoleCommands::List => cli::cmd_role_list(&app)?,
        },
        Commands::Mint { caller, to, amount } => {
            cli::cmd_apply(&mut app, |s| s.ledger.mint(&caller, &to, amount))?
        }
        Commands::Burn { caller, amount } => {
            cli::cmd_apply(&mut app, |s| s.ledger.burn(&caller, amount))?
        }
        Commands::BurnFrom {
            caller,
            from,
            amount,
        } => cli::cmd_apply(&mut app, |s| s.ledger.burn_from(&caller, &from, amount))?,
        Commands::Transfer { caller, to, amount } => {
            cli::cmd_apply(&mut app, |s| s.ledger.transfer(&caller, &to, amount))?
        }
        Commands::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => cli::cmd_apply(&mut app, |s| {
            s.ledger.transfer_from(&caller, &from, &to, amount)
        })?,
        Commands::Approve {
            caller,
            spender,
            amount,
        } => cli::cmd_apply(&mut app, |s| s.ledger.approve(&caller, &spender, amount))?,
        Commands::EnableTransfer { caller } => {
            cli::cmd_apply(&mut app, |s| s.ledger.enable_transfer(&caller))?
        }
        Commands::FinishMinting { caller } => {
            cli::cmd_apply(&mut app, |s| s.ledger.finish_minting(&caller))?
        }
        Commands::TransferOwnership { caller, new_owner } => {
            cli::cmd_apply(&mut app, |s| s.ledger.transfer_ownership(&caller, &new_owner))?
        }
        Commands::Foreign { action } => match action {
            ForeignCommands::Create {
                name,
                symbol,
                decimals,
                supply,
                creator,
            } => cli::cmd_foreign_create(&mut app, name, symbol, decimals, supply, &creator)?,
            ForeignCommands::Transfer {
                token,
                from,
                to,
                amount,
            } => cli::cmd_apply(&mut app, |s| s.foreign.transfer(&token, &from, &to, amount))?,
            ForeignCommands::Balance { token, holder } => {
                cli::cmd_foreign_balance(&app, &token, &holder)?
            }
            ForeignCommands::List => cli::cmd_foreign_list(&app)?,
        },
        Commands::Recover {
            caller,
            token,
            amount,
        } => cli::cmd_apply(&mut app, |s| {
            s.ledger
                .recover_token(&caller, &mut s.foreign, &token, amount)
        })?,
        Commands::History { count } => cli::cmd_history(&app, count)?,
    }

    Ok(())
}
