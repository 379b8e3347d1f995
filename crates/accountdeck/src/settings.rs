//! Runtime settings resolved from the command line.

use std::path::PathBuf;

use accountdeck_core::StoreConfig;

use crate::cli::Cli;

/// Name of the application directory under the platform data dir.
const APP_DIR: &str = "accountdeck";

/// Where and under which key the account list is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory for the file storage adapter.
    pub data_dir: PathBuf,
    /// Storage key override.
    pub storage_key: Option<String>,
}

impl Settings {
    /// Resolve settings, falling back to the platform data directory.
    pub fn from_cli(cli: &Cli) -> Self {
        let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
        Self {
            data_dir,
            storage_key: cli.key.clone(),
        }
    }

    /// Store configuration for these settings.
    pub fn store_config(&self) -> StoreConfig {
        self.storage_key
            .as_ref()
            .map_or_else(StoreConfig::default, StoreConfig::with_key)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn explicit_data_dir_wins() {
        let cli = Cli::try_parse_from(["accountdeck", "--data-dir", "/tmp/deck", "count"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/deck"));
        assert_eq!(settings.store_config(), StoreConfig::default());
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        let cli = Cli::try_parse_from(["accountdeck", "count"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert!(settings.data_dir.ends_with(APP_DIR));
    }

    #[test]
    fn key_override() {
        let cli = Cli::try_parse_from(["accountdeck", "--key", "team", "count"]).unwrap();
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.store_config().storage_key, "team");
    }
}
