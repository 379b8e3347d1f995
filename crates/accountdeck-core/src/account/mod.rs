//! Account management module.
//!
//! Provides the account record types and advisory validation.

mod model;
mod validation;

pub use model::{Account, AccountId, AccountType, Mark, ParseAccountTypeError};
pub use validation::{ValidationError, ValidationResult, validate_account};
