//! Load/save adapter for the account store. Plain JSON on disk with RFC 3339
//! timestamps; no business logic lives here.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::domain::{Account, Error};
use crate::store::AccountStore;

pub fn load_accounts(path: &Path) -> Result<Vec<Account>, Error> {
    let text = fs::read_to_string(path)?;
    let accounts: Vec<Account> = serde_json::from_str(&text)
        .map_err(|e| Error::Persistence(format!("Malformed accounts file: {}", e)))?;

    // The file is outside our control; re-check the invariant that matters.
    for account in &accounts {
        if account.balance() < Decimal::ZERO {
            return Err(Error::Persistence(format!(
                "Account {} has a negative balance",
                account.number()
            )));
        }
    }

    Ok(accounts)
}

pub fn save_accounts(path: &Path, store: &AccountStore) -> Result<(), Error> {
    let mut accounts: Vec<&Account> = store.accounts().collect();
    accounts.sort_by_key(|acc| acc.number().to_owned());
    let text = serde_json::to_string_pretty(&accounts)
        .map_err(|e| Error::Persistence(format!("Serialization failed: {}", e)))?;
    fs::write(path, text)?;
    Ok(())
}

/// Seed data for runs without an accounts file: a few accounts with history,
/// one mid-way through failed PIN attempts, one already locked.
pub fn sample_accounts() -> Vec<Account> {
    let mut john = Account::new(
        "123456789".into(),
        "John Smith".into(),
        "1234".into(),
        Decimal::from(500),
    );
    john.credit(Decimal::from(500));
    john.debit(Decimal::from(200));
    john.credit(Decimal::from(700));

    let mut jane = Account::new(
        "987654321".into(),
        "Jane Doe".into(),
        "5678".into(),
        Decimal::from(1000),
    );
    jane.credit(Decimal::from(1000));
    jane.debit(Decimal::from(250));
    jane.credit(Decimal::new(100050, 2));

    let mut bob = Account::new(
        "555666777".into(),
        "Bob Johnson".into(),
        "9999".into(),
        Decimal::ZERO,
    );
    bob.credit(Decimal::from(100));
    bob.debit(Decimal::from(50));

    let mut alice = Account::new(
        "111222333".into(),
        "Alice Brown".into(),
        "0000".into(),
        Decimal::from(5000),
    );
    let _ = alice.check_pin("9999");
    let _ = alice.check_pin("9999");

    let mut charlie = Account::new(
        "444555666".into(),
        "Charlie Wilson".into(),
        "1111".into(),
        Decimal::new(75025, 2),
    );
    let _ = charlie.check_pin("9999");
    let _ = charlie.check_pin("9999");
    let _ = charlie.check_pin("9999");

    vec![john, jane, bob, alice, charlie]
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{load_accounts, sample_accounts, save_accounts};
    use crate::domain::Error;
    use crate::store::AccountStore;

    #[test]
    fn accounts_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");

        let store = AccountStore::from_accounts(sample_accounts());
        save_accounts(&path, &store).unwrap();

        let loaded = AccountStore::from_accounts(load_accounts(&path).unwrap());
        assert_eq!(loaded.len(), store.len());

        let john = loaded.lookup("123456789").unwrap();
        assert_eq!(john.balance(), Decimal::from(1500));
        assert_eq!(john.ledger().len(), 3);
        let saved_john = store.lookup("123456789").unwrap();
        assert_eq!(
            john.ledger().iter().collect::<Vec<_>>(),
            saved_john.ledger().iter().collect::<Vec<_>>()
        );

        let charlie = loaded.lookup("444555666").unwrap();
        assert!(charlie.locked());
        assert_eq!(loaded.lookup("111222333").unwrap().failed_attempts(), 2);
    }

    #[test]
    fn negative_balance_on_disk_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");

        let store = AccountStore::from_accounts(sample_accounts());
        save_accounts(&path, &store).unwrap();
        let text = std::fs::read_to_string(&path)
            .unwrap()
            .replace("\"5000\"", "\"-5000\"");
        std::fs::write(&path, text).unwrap();

        let err = load_accounts(&path).unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[test]
    fn missing_file_surfaces_as_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_accounts(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
