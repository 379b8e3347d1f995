//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use accountdeck_core::AccountType;

/// Manage local and LDAP login accounts.
#[derive(Parser, Debug)]
#[command(name = "accountdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the persisted accounts (defaults to the user data dir).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage key the account list is saved under.
    #[arg(long, global = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all accounts (passwords are masked).
    List,

    /// Print the number of accounts.
    Count,

    /// Add a new account and print its ID.
    Add {
        /// Account type: `local` or `ldap`.
        #[arg(long = "type", default_value = "local")]
        kind: AccountType,

        /// Login name.
        #[arg(long)]
        login: String,

        /// Password (local accounts only).
        #[arg(long)]
        password: Option<String>,

        /// Mark to attach; repeat for several.
        #[arg(long = "mark")]
        marks: Vec<String>,
    },

    /// Replace fields of an existing account.
    Set {
        /// ID of the account to change.
        id: String,

        #[command(flatten)]
        changes: AccountChanges,
    },

    /// Append a mark to an existing account.
    Mark {
        /// ID of the account to tag.
        id: String,

        /// Mark text.
        text: String,
    },

    /// Remove an account.
    Remove {
        /// ID of the account to remove.
        id: String,
    },
}

/// Field changes applied by `set`. Omitted fields keep their current value.
#[derive(Args, Debug, Default)]
pub struct AccountChanges {
    /// New account type.
    #[arg(long = "type")]
    pub kind: Option<AccountType>,

    /// New login name.
    #[arg(long)]
    pub login: Option<String>,

    /// New password.
    #[arg(long, conflicts_with = "clear_password")]
    pub password: Option<String>,

    /// Drop the stored password.
    #[arg(long)]
    pub clear_password: bool,

    /// Replacement marks; repeat for several.
    #[arg(long = "mark")]
    pub marks: Vec<String>,

    /// Remove all marks.
    #[arg(long, conflicts_with = "marks")]
    pub clear_marks: bool,
}
