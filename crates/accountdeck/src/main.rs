//! `AccountDeck` - manage local and LDAP login accounts from the terminal.
//!
//! Builds one account store from the command-line settings and hands it to
//! the command dispatcher.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod settings;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accountdeck_core::{AccountStore, FileStorage};

use cli::Cli;
use settings::Settings;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accountdeck=info,accountdeck_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);
    info!("Using account storage at {:?}", settings.data_dir);

    let storage = FileStorage::new(&settings.data_dir);
    let mut store = AccountStore::open_with_config(storage, settings.store_config())
        .with_context(|| format!("failed to load accounts from {:?}", settings.data_dir))?;

    let stdout = std::io::stdout();
    commands::execute(cli.command, &mut store, &mut stdout.lock())
}
