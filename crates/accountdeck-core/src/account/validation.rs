//! Account validation.
//!
//! Advisory checks for callers building records from user input. The store
//! accepts any record; nothing here runs implicitly.

use super::model::{Account, AccountType};

/// Validation error for an account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Account ID is empty.
    EmptyId,
    /// Login is empty.
    EmptyLogin,
    /// Local account without a password.
    MissingPassword,
    /// LDAP account carrying a stored password.
    LdapPassword,
    /// A mark has no text.
    EmptyMark,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyId => "Account ID is required",
            Self::EmptyLogin => "Login is required",
            Self::MissingPassword => "Password is required for local accounts",
            Self::LdapPassword => "LDAP accounts must not store a password",
            Self::EmptyMark => "Marks must not be empty",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyLogin => "login",
            Self::MissingPassword | Self::LdapPassword => "password",
            Self::EmptyMark => "mark",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating an account.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate an account record.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all errors.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_account(account: &Account) -> ValidationResult {
    let mut errors = Vec::new();

    if account.id.as_str().trim().is_empty() {
        errors.push(ValidationError::EmptyId);
    }

    if account.login.trim().is_empty() {
        errors.push(ValidationError::EmptyLogin);
    }

    match (account.kind, account.password.as_deref()) {
        (AccountType::Local, None | Some("")) => errors.push(ValidationError::MissingPassword),
        (AccountType::Ldap, Some(_)) => errors.push(ValidationError::LdapPassword),
        _ => {}
    }

    // One entry is enough even if several marks are blank
    if account.marks.iter().any(|mark| mark.text.trim().is_empty()) {
        errors.push(ValidationError::EmptyMark);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
