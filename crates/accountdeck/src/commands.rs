//! Command handlers.
//!
//! Each handler works on the store it is given; nothing here opens storage.
//! Output goes to the supplied writer so the handlers can be driven from tests.

use std::io::Write;

use anyhow::{Context, bail};
use tracing::info;

use accountdeck_core::{
    Account, AccountId, AccountStore, AccountType, Mark, Storage, validate_account,
};

use crate::cli::{AccountChanges, Commands};

/// Execute the parsed command against `store`.
///
/// # Errors
///
/// Returns an error if validation fails, the account does not exist (for
/// commands that need it), or write-back fails.
pub fn execute<S: Storage>(
    command: Commands,
    store: &mut AccountStore<S>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::List => cmd_list(store, out),
        Commands::Count => writeln!(out, "{}", store.count()).map_err(Into::into),
        Commands::Add {
            kind,
            login,
            password,
            marks,
        } => cmd_add(store, out, kind, login, password, marks),
        Commands::Set { id, changes } => cmd_set(store, out, &AccountId::new(id), changes),
        Commands::Mark { id, text } => cmd_mark(store, out, &AccountId::new(id), text),
        Commands::Remove { id } => cmd_remove(store, out, &AccountId::new(id)),
    }
}

fn cmd_list<S: Storage>(store: &AccountStore<S>, out: &mut impl Write) -> anyhow::Result<()> {
    if store.count() == 0 {
        writeln!(out, "No accounts")?;
        return Ok(());
    }

    for account in store.accounts() {
        writeln!(out, "{}", describe(account))?;
    }
    Ok(())
}

fn cmd_add<S: Storage>(
    store: &mut AccountStore<S>,
    out: &mut impl Write,
    kind: AccountType,
    login: String,
    password: Option<String>,
    marks: Vec<String>,
) -> anyhow::Result<()> {
    let account = Account {
        id: AccountId::generate(),
        marks: marks.into_iter().map(Mark::new).collect(),
        kind,
        login,
        password: match kind {
            AccountType::Local => Some(password.unwrap_or_default()),
            AccountType::Ldap => password,
        },
    };
    check(&account)?;

    let id = account.id.clone();
    store
        .add_account(account)
        .context("failed to save new account")?;

    info!("Added account {id}");
    writeln!(out, "{id}")?;
    Ok(())
}

fn cmd_set<S: Storage>(
    store: &mut AccountStore<S>,
    out: &mut impl Write,
    id: &AccountId,
    changes: AccountChanges,
) -> anyhow::Result<()> {
    let Some(current) = store.account(id) else {
        bail!("no account with ID {id}");
    };

    let updated = apply_changes(current.clone(), changes);
    check(&updated)?;

    store
        .set_account(id, updated)
        .with_context(|| format!("failed to save account {id}"))?;

    info!("Updated account {id}");
    writeln!(out, "Updated {id}")?;
    Ok(())
}

fn cmd_mark<S: Storage>(
    store: &mut AccountStore<S>,
    out: &mut impl Write,
    id: &AccountId,
    text: String,
) -> anyhow::Result<()> {
    if store.account(id).is_none() {
        bail!("no account with ID {id}");
    }
    if text.trim().is_empty() {
        bail!("mark text must not be empty");
    }

    store
        .update_account(id, |account| account.marks.push(Mark::new(text)))
        .with_context(|| format!("failed to save account {id}"))?;

    writeln!(out, "Marked {id}")?;
    Ok(())
}

fn cmd_remove<S: Storage>(
    store: &mut AccountStore<S>,
    out: &mut impl Write,
    id: &AccountId,
) -> anyhow::Result<()> {
    if store.account(id).is_none() {
        bail!("no account with ID {id}");
    }

    store
        .remove_account(id)
        .with_context(|| format!("failed to remove account {id}"))?;

    info!("Removed account {id}");
    writeln!(out, "Removed {id}")?;
    Ok(())
}

/// Build the replacement record for `set`. The id is carried over.
fn apply_changes(mut account: Account, changes: AccountChanges) -> Account {
    if let Some(kind) = changes.kind {
        account.kind = kind;
        if kind == AccountType::Ldap && changes.password.is_none() {
            account.password = None;
        }
    }
    if let Some(login) = changes.login {
        account.login = login;
    }
    if changes.clear_password {
        account.password = None;
    } else if let Some(password) = changes.password {
        account.password = Some(password);
    }
    if changes.clear_marks {
        account.marks.clear();
    } else if !changes.marks.is_empty() {
        account.marks = changes.marks.into_iter().map(Mark::new).collect();
    }
    account
}

fn check(account: &Account) -> anyhow::Result<()> {
    if let Err(errors) = validate_account(account) {
        let details = errors
            .iter()
            .map(|e| format!("{}: {}", e.field(), e.message()))
            .collect::<Vec<_>>()
            .join("; ");
        bail!("invalid account: {details}");
    }
    Ok(())
}

fn describe(account: &Account) -> String {
    let password = match account.password.as_deref() {
        None => "-",
        Some("") => "(empty)",
        Some(_) => "********",
    };
    let marks = account
        .marks
        .iter()
        .map(|mark| mark.text.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "{}\t{}\t{}\t{}\t{}",
        account.id,
        account.kind.display_name(),
        account.login,
        password,
        marks
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use accountdeck_core::MemoryStorage;

    fn store_with(accounts: &[Account]) -> AccountStore<MemoryStorage> {
        let json = serde_json::to_string(accounts).unwrap();
        AccountStore::open(MemoryStorage::with_item("accounts", json)).unwrap()
    }

    fn run(store: &mut AccountStore<MemoryStorage>, command: Commands) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(command, store, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn list_masks_passwords() {
        let mut store = store_with(&[
            Account::local("alice", "hunter2").with_id("U0").with_mark("a"),
            Account::ldap("bob").with_id("U1"),
        ]);

        let output = run(&mut store, Commands::List).unwrap();

        assert!(output.contains("U0\tLocal\talice\t********\ta"));
        assert!(output.contains("U1\tLDAP\tbob\t-\t"));
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn add_prints_new_id_and_persists() {
        let mut store = store_with(&[]);

        let output = run(
            &mut store,
            Commands::Add {
                kind: AccountType::Ldap,
                login: "bob".to_string(),
                password: None,
                marks: vec!["eng".to_string()],
            },
        )
        .unwrap();

        let id = AccountId::new(output.trim());
        let added = store.account(&id).unwrap();
        assert_eq!(added.login, "bob");
        assert_eq!(added.marks, vec![Mark::new("eng")]);
        assert_eq!(run(&mut store, Commands::Count).unwrap(), "1\n");
    }

    #[test]
    fn add_rejects_invalid_record() {
        let mut store = store_with(&[]);

        let err = run(
            &mut store,
            Commands::Add {
                kind: AccountType::Local,
                login: String::new(),
                password: None,
                marks: Vec::new(),
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("login"));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn set_replaces_fields_and_keeps_position() {
        let mut store = store_with(&[
            Account::local("a", "1").with_id("U0"),
            Account::local("b", "2").with_id("U1"),
        ]);

        run(
            &mut store,
            Commands::Set {
                id: "U0".to_string(),
                changes: AccountChanges {
                    login: Some("alice".to_string()),
                    ..AccountChanges::default()
                },
            },
        )
        .unwrap();

        assert_eq!(store.accounts()[0].id, AccountId::new("U0"));
        assert_eq!(store.accounts()[0].login, "alice");
        assert_eq!(store.accounts()[0].password.as_deref(), Some("1"));
    }

    #[test]
    fn set_to_ldap_drops_password() {
        let mut store = store_with(&[Account::local("a", "1").with_id("U0")]);

        run(
            &mut store,
            Commands::Set {
                id: "U0".to_string(),
                changes: AccountChanges {
                    kind: Some(AccountType::Ldap),
                    ..AccountChanges::default()
                },
            },
        )
        .unwrap();

        assert_eq!(store.accounts()[0].kind, AccountType::Ldap);
        assert!(store.accounts()[0].password.is_none());
    }

    #[test]
    fn set_unknown_id_fails() {
        let mut store = store_with(&[]);
        let result = run(
            &mut store,
            Commands::Set {
                id: "nope".to_string(),
                changes: AccountChanges::default(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn mark_appends_duplicate_marks() {
        let mut store = store_with(&[Account::ldap("bob").with_id("U1").with_mark("x")]);

        run(
            &mut store,
            Commands::Mark {
                id: "U1".to_string(),
                text: "x".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            store.accounts()[0].marks,
            vec![Mark::new("x"), Mark::new("x")]
        );
    }

    #[test]
    fn remove_deletes_account() {
        let mut store = store_with(&[
            Account::local("a", "1").with_id("U0"),
            Account::ldap("bob").with_id("U1"),
        ]);

        run(
            &mut store,
            Commands::Remove {
                id: "U1".to_string(),
            },
        )
        .unwrap();

        assert_eq!(store.count(), 1);
        assert!(store.account(&AccountId::new("U1")).is_none());
    }

    #[test]
    fn list_empty() {
        let mut store = store_with(&[]);
        assert_eq!(run(&mut store, Commands::List).unwrap(), "No accounts\n");
    }
}
