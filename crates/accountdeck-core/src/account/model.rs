//! Account model types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an account.
///
/// Opaque to the store: ids are compared by value and never reissued by the
/// store itself. Freshly created records get a random UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wrap a caller-supplied account ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random account ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How an account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccountType {
    /// Authenticates with the stored password.
    #[default]
    Local,
    /// Authenticates against an external directory; no password is stored.
    Ldap,
}

impl AccountType {
    /// Get display name for the account type.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Ldap => "LDAP",
        }
    }

    /// Integer code used in the persisted layout.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Local => 0,
            Self::Ldap => 1,
        }
    }

    /// Inverse of [`AccountType::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Local),
            1 => Some(Self::Ldap),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when an account type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown account type `{0}` (expected `local` or `ldap`)")]
pub struct ParseAccountTypeError(String);

impl std::str::FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ldap" => Ok(Self::Ldap),
            other => Err(ParseAccountTypeError(other.to_string())),
        }
    }
}

/// A text tag attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    /// Tag text.
    pub text: String,
}

impl Mark {
    /// Create a new mark.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One stored credential set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, assigned by whoever creates the record.
    pub id: AccountId,
    /// Tags in insertion order. Duplicates are allowed.
    #[serde(rename = "mark")]
    pub marks: Vec<Mark>,
    /// Serialized as `type` (integer code) to match the persisted layout.
    #[serde(rename = "type", with = "account_type_serde")]
    pub kind: AccountType,
    /// Login name, may be empty.
    pub login: String,
    /// Password; `None` (JSON `null`) for LDAP accounts.
    pub password: Option<String>,
}

impl Account {
    /// The record a fresh store starts with: new id, no marks, local type,
    /// empty login and empty password.
    #[must_use]
    pub fn blank() -> Self {
        Self::local(String::new(), String::new())
    }

    /// Create a local account with a generated ID.
    #[must_use]
    pub fn local(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: AccountId::generate(),
            marks: Vec::new(),
            kind: AccountType::Local,
            login: login.into(),
            password: Some(password.into()),
        }
    }

    /// Create an LDAP account with a generated ID and no password.
    #[must_use]
    pub fn ldap(login: impl Into<String>) -> Self {
        Self {
            id: AccountId::generate(),
            marks: Vec::new(),
            kind: AccountType::Ldap,
            login: login.into(),
            password: None,
        }
    }

    /// Replace the generated ID with a caller-supplied one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<AccountId>) -> Self {
        self.id = id.into();
        self
    }

    /// Append a mark.
    #[must_use]
    pub fn with_mark(mut self, text: impl Into<String>) -> Self {
        self.marks.push(Mark::new(text));
        self
    }
}

/// Serde helpers for `AccountType` (persisted as `0` / `1`).
mod account_type_serde {
    use super::AccountType;
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde with= signature
    pub fn serialize<S>(kind: &AccountType, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(kind.code())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<AccountType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        AccountType::from_code(code).ok_or_else(|| {
            D::Error::invalid_value(
                Unexpected::Unsigned(u64::from(code)),
                &"0 (Local) or 1 (LDAP)",
            )
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect
)]
mod tests {
    use super::*;

    mod account_id_tests {
        use super::*;

        #[test]
        fn generate_is_unique_and_non_empty() {
            let a = AccountId::generate();
            let b = AccountId::generate();
            assert!(!a.is_empty());
            assert_ne!(a, b);
        }

        #[test]
        fn display() {
            let id = AccountId::new("U0");
            assert_eq!(format!("{id}"), "U0");
        }

        #[test]
        fn serializes_as_plain_string() {
            let id = AccountId::new("abc");
            assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        }
    }

    mod account_type_tests {
        use super::*;

        #[test]
        fn default_is_local() {
            assert_eq!(AccountType::default(), AccountType::Local);
        }

        #[test]
        fn display_names() {
            assert_eq!(AccountType::Local.display_name(), "Local");
            assert_eq!(AccountType::Ldap.display_name(), "LDAP");
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!("LDAP".parse::<AccountType>().unwrap(), AccountType::Ldap);
            assert_eq!(" local ".parse::<AccountType>().unwrap(), AccountType::Local);
            assert!("kerberos".parse::<AccountType>().is_err());
        }

        #[test]
        fn codes() {
            assert_eq!(AccountType::Local.code(), 0);
            assert_eq!(AccountType::Ldap.code(), 1);
            assert_eq!(AccountType::from_code(2), None);
        }
    }

    mod account_tests {
        use super::*;

        #[test]
        fn blank_matches_default_record() {
            let account = Account::blank();
            assert!(!account.id.is_empty());
            assert!(account.marks.is_empty());
            assert_eq!(account.kind, AccountType::Local);
            assert_eq!(account.login, "");
            assert_eq!(account.password.as_deref(), Some(""));
        }

        #[test]
        fn ldap_has_no_password() {
            let account = Account::ldap("bob");
            assert_eq!(account.kind, AccountType::Ldap);
            assert!(account.password.is_none());
        }

        #[test]
        fn json_layout() {
            let account = Account::ldap("bob").with_id("U1").with_mark("ops");
            let value = serde_json::to_value(&account).unwrap();
            assert_eq!(
                value,
                serde_json::json!({
                    "id": "U1",
                    "mark": [{ "text": "ops" }],
                    "type": 1,
                    "login": "bob",
                    "password": null
                })
            );
        }

        #[test]
        fn decodes_local_record() {
            let json = r#"{"id":"U0","mark":[],"type":0,"login":"alice","password":"pw"}"#;
            let account: Account = serde_json::from_str(json).unwrap();
            assert_eq!(account.id, AccountId::new("U0"));
            assert_eq!(account.kind, AccountType::Local);
            assert_eq!(account.password.as_deref(), Some("pw"));
        }

        #[test]
        fn rejects_unknown_type_code() {
            let json = r#"{"id":"U0","mark":[],"type":7,"login":"","password":null}"#;
            assert!(serde_json::from_str::<Account>(json).is_err());
        }

        #[test]
        fn rejects_missing_login() {
            let json = r#"{"id":"U0","mark":[],"type":0,"password":null}"#;
            assert!(serde_json::from_str::<Account>(json).is_err());
        }
    }
}
