//! The account store.
//!
//! Holds the session's collection of [`Account`] records and mirrors it to a
//! [`Storage`] under a single key. Every mutator writes the whole collection
//! back before returning; there is no batching and no delta encoding.
//!
//! Lookups by id act on the first matching record. Unknown ids are a quiet
//! no-op for `set`, `update` and `remove`.

use tracing::{debug, info, warn};

use crate::account::{Account, AccountId};
use crate::storage::Storage;
use crate::{Error, Result};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "accounts";

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the collection is persisted under.
    pub storage_key: String,
}

impl StoreConfig {
    /// Create a configuration with a custom storage key.
    #[must_use]
    pub fn with_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }
}

/// In-memory account collection kept in sync with a persistence adapter.
#[derive(Debug)]
pub struct AccountStore<S: Storage> {
    storage: S,
    key: String,
    accounts: Vec<Account>,
}

impl<S: Storage> AccountStore<S> {
    /// Hydrate a store from `storage` under the default key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Hydration` if a stored value exists but does not
    /// decode as a list of accounts, or `Error::Storage` if the read fails.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_config(storage, StoreConfig::default())
    }

    /// Hydrate a store from `storage` using `config`.
    ///
    /// A present value is adopted verbatim, duplicate ids included. When
    /// nothing is stored the collection starts with one blank local account,
    /// which is written on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Hydration` if a stored value exists but does not
    /// decode as a list of accounts, or `Error::Storage` if the read fails.
    pub fn open_with_config(storage: S, config: StoreConfig) -> Result<Self> {
        let key = config.storage_key;

        let accounts = match storage.get_item(&key)? {
            Some(raw) => {
                let accounts: Vec<Account> =
                    serde_json::from_str(&raw).map_err(|source| Error::Hydration {
                        key: key.clone(),
                        source,
                    })?;
                debug!("Hydrated {} accounts from `{key}`", accounts.len());
                accounts
            }
            None => {
                let account = Account::blank();
                info!("No stored accounts under `{key}`, starting with {}", account.id);
                vec![account]
            }
        };

        Ok(Self {
            storage,
            key,
            accounts,
        })
    }

    /// All accounts in insertion order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// First account with the given id.
    #[must_use]
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| &account.id == id)
    }

    /// Number of accounts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Append an account. The id is not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns an error if write-back fails. The account stays in memory.
    pub fn add_account(&mut self, account: Account) -> Result<()> {
        debug!("Adding account {}", account.id);
        self.accounts.push(account);
        self.persist()
    }

    /// Replace the first account with `id` by `account`, keeping its position.
    ///
    /// The replacement is stored as given, including its own `id` field.
    ///
    /// # Errors
    ///
    /// Returns an error if write-back fails. The replacement stays in memory.
    pub fn set_account(&mut self, id: &AccountId, account: Account) -> Result<()> {
        let Some(index) = self.position(id) else {
            debug!("set_account: no account {id}, ignoring");
            return Ok(());
        };

        self.accounts[index] = account;
        self.persist()
    }

    /// Edit the first account with `id` in place, then write back.
    ///
    /// Use this for nested changes such as adding or removing marks.
    ///
    /// # Errors
    ///
    /// Returns an error if write-back fails. The edit stays in memory.
    pub fn update_account<F>(&mut self, id: &AccountId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Account),
    {
        let Some(index) = self.position(id) else {
            debug!("update_account: no account {id}, ignoring");
            return Ok(());
        };

        edit(&mut self.accounts[index]);
        self.persist()
    }

    /// Remove the first account with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if write-back fails. The account stays removed.
    pub fn remove_account(&mut self, id: &AccountId) -> Result<()> {
        let Some(index) = self.position(id) else {
            debug!("remove_account: no account {id}, ignoring");
            return Ok(());
        };

        self.accounts.remove(index);
        self.persist()
    }

    /// Serialize the whole collection and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the storage write fails.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.accounts)?;
        if let Err(e) = self.storage.set_item(&self.key, &json) {
            warn!("Failed to write back accounts to `{}`: {e}", self.key);
            return Err(e.into());
        }
        debug!("Persisted {} accounts to `{}`", self.accounts.len(), self.key);
        Ok(())
    }

    /// Key the collection is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the persistence adapter.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store and return its persistence adapter.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: &AccountId) -> Option<usize> {
        self.accounts.iter().position(|account| &account.id == id)
    }
}
