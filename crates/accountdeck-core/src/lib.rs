//! # accountdeck-core
//!
//! Core logic for `AccountDeck`, a small manager of login accounts.
//!
//! This crate provides:
//! - Account records (local or LDAP) with free-form marks
//! - Advisory validation for user-entered records
//! - Persistence adapters over a string key-value store
//! - The [`AccountStore`], which mirrors every change to its adapter

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod storage;
pub mod store;

pub use account::{
    Account, AccountId, AccountType, Mark, ParseAccountTypeError, ValidationError,
    ValidationResult, validate_account,
};
pub use error::{Error, Result};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use store::{AccountStore, DEFAULT_STORAGE_KEY, StoreConfig};
