use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Write;

use rust_decimal::Decimal;

use crate::domain::{Account, Error};

/// Owned in-memory account collection, keyed by account number. Passed by
/// reference to the components that need it rather than living as ambient
/// global state.
#[derive(Default, Debug)]
pub struct AccountStore {
    accounts: HashMap<String, Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|acc| (acc.number().to_owned(), acc))
                .collect(),
        }
    }

    pub fn lookup(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn lookup_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    /// Account-number format checks (digit-only, 6-12 chars) are the caller's
    /// gate; the store enforces uniqueness and a non-negative opening balance.
    pub fn create(
        &mut self,
        number: String,
        holder: String,
        pin: String,
        initial_balance: Decimal,
    ) -> Result<&mut Account, Error> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::InvalidAmount);
        }
        match self.accounts.entry(number.clone()) {
            Entry::Vacant(e) => Ok(e.insert(Account::new(number, holder, pin, initial_balance))),
            Entry::Occupied(_) => Err(Error::DuplicateAccount(number)),
        }
    }

    pub fn list_all(&self) -> Vec<(&str, &str)> {
        let mut listing: Vec<(&str, &str)> = self
            .accounts
            .values()
            .map(|acc| (acc.number(), acc.holder()))
            .collect();
        listing.sort_by_key(|(number, _)| *number);
        listing
    }

    pub fn delete(&mut self, number: &str) -> bool {
        self.accounts.remove(number).is_some()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Writes the final account table, sorted by number for stable output.
    pub fn flush<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        writeln!(out, "account,holder,balance,locked")?;
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by_key(|acc| acc.number().to_owned());
        for account in accounts {
            writeln!(
                out,
                "{},{},{},{}",
                account.number(),
                account.holder(),
                account.balance().round_dp(2),
                account.locked()
            )?;
        }
        Ok(())
    }
}
