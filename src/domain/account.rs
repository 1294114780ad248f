use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Ledger, Transaction, TransactionKind};

pub const MAX_FAILED_ATTEMPTS: u8 = 3;

/// A single customer account. Fields are private so every mutation runs
/// through a method that upholds the invariants: the balance never goes
/// negative, the lock is one-way, and every balance-affecting operation
/// leaves exactly one ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    number: String,
    holder: String,
    pin: String,
    balance: Decimal,
    failed_attempts: u8,
    locked: bool,
    #[serde(default)]
    ledger: Ledger,
}

impl Account {
    pub fn new(number: String, holder: String, pin: String, balance: Decimal) -> Self {
        Self {
            number,
            holder,
            pin,
            balance,
            failed_attempts: 0,
            locked: false,
            ledger: Ledger::new(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn failed_attempts(&self) -> u8 {
        self.failed_attempts
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Compares the entered PIN against the stored one, driving the lockout
    /// counter. Must not be called on a locked account; the caller rejects
    /// those before any comparison happens.
    pub(crate) fn check_pin(&mut self, entered: &str) -> Result<(), Error> {
        debug_assert!(!self.locked);

        if self.pin == entered {
            self.failed_attempts = 0;
            return Ok(());
        }

        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_FAILED_ATTEMPTS {
            self.locked = true;
            return Err(Error::LockedOut);
        }
        Err(Error::Rejected {
            remaining: MAX_FAILED_ATTEMPTS - self.failed_attempts,
        })
    }

    pub(crate) fn credit(&mut self, amount: Decimal) {
        self.balance += amount;
        self.record(TransactionKind::Deposit, amount);
    }

    /// Debits may only be issued after the engine has checked the amount
    /// against the balance; the assertion guards the non-negativity invariant.
    pub(crate) fn debit(&mut self, amount: Decimal) {
        debug_assert!(amount <= self.balance);
        self.balance -= amount;
        self.record(TransactionKind::Withdrawal, amount);
    }

    pub(crate) fn pin_matches(&self, pin: &str) -> bool {
        self.pin == pin
    }

    pub(crate) fn set_pin(&mut self, new_pin: String) {
        self.pin = new_pin;
        self.record(TransactionKind::PinChange, Decimal::ZERO);
    }

    fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        self.ledger
            .append(Transaction::new(kind, amount, self.balance));
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Account, MAX_FAILED_ATTEMPTS};
    use crate::domain::{Error, TransactionKind};

    fn account() -> Account {
        Account::new(
            "123456789".into(),
            "John Smith".into(),
            "1234".into(),
            Decimal::from(1500),
        )
    }

    #[test]
    fn wrong_pin_increments_until_lockout() {
        let mut acc = account();

        assert!(matches!(
            acc.check_pin("0000"),
            Err(Error::Rejected { remaining: 2 })
        ));
        assert!(matches!(
            acc.check_pin("0000"),
            Err(Error::Rejected { remaining: 1 })
        ));
        assert!(matches!(acc.check_pin("0000"), Err(Error::LockedOut)));
        assert!(acc.locked());
        assert_eq!(acc.failed_attempts(), MAX_FAILED_ATTEMPTS);
    }

    #[test]
    fn correct_pin_resets_failed_attempts() {
        let mut acc = account();
        let _ = acc.check_pin("9999");
        let _ = acc.check_pin("9999");
        assert_eq!(acc.failed_attempts(), 2);

        assert!(acc.check_pin("1234").is_ok());
        assert_eq!(acc.failed_attempts(), 0);
        assert!(!acc.locked());
    }

    #[test]
    fn credit_and_debit_record_balance_after() {
        let mut acc = account();
        acc.credit(Decimal::from(700));
        assert_eq!(acc.balance(), Decimal::from(2200));

        acc.debit(Decimal::from(200));
        assert_eq!(acc.balance(), Decimal::from(2000));

        let history: Vec<_> = acc.ledger().iter().collect();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, TransactionKind::Deposit);
        assert_eq!(history[0].balance_after, Decimal::from(2200));
        assert_eq!(history[1].kind, TransactionKind::Withdrawal);
        assert_eq!(history[1].balance_after, Decimal::from(2000));
    }

    #[test]
    fn pin_change_records_a_zero_amount_entry() {
        let mut acc = account();
        acc.set_pin("4321".into());
        assert!(acc.pin_matches("4321"));

        let history: Vec<_> = acc.ledger().iter().collect();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, TransactionKind::PinChange);
        assert_eq!(history[0].amount, Decimal::ZERO);
        assert_eq!(history[0].balance_after, Decimal::from(1500));
    }
}
