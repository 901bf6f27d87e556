//! Command-line front end

pub mod commands;

pub use commands::{
    cmd_allowance, cmd_apply, cmd_balance, cmd_foreign_balance, cmd_foreign_create,
    cmd_foreign_list, cmd_history, cmd_info, cmd_init, cmd_role_list, AppState, CliResult,
};
