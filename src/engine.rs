use rust_decimal::Decimal;

use futures::StreamExt;
use tracing::info;

use crate::auth;
use crate::domain::{Account, Command, CommandStream, DeadLetterQueue, Error, Transaction};
use crate::store::AccountStore;

/// Per-transaction ceilings carried over from the branch's ATM rules.
pub const WITHDRAWAL_LIMIT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);
pub const DEPOSIT_LIMIT: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);

pub const MINI_STATEMENT_LEN: usize = 5;

/// Credits the account. Balance mutation and ledger append commit together;
/// any rejection leaves the account untouched.
pub fn deposit(account: &mut Account, amount: Decimal) -> Result<(Decimal, Decimal), Error> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount);
    }
    if amount > DEPOSIT_LIMIT {
        return Err(Error::DepositLimit {
            limit: DEPOSIT_LIMIT,
        });
    }
    let old = account.balance();
    account.credit(amount);
    Ok((old, account.balance()))
}

pub fn withdraw(account: &mut Account, amount: Decimal) -> Result<(Decimal, Decimal), Error> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount);
    }
    if amount > account.balance() {
        return Err(Error::InsufficientFunds {
            available: account.balance(),
        });
    }
    if amount > WITHDRAWAL_LIMIT {
        return Err(Error::WithdrawalLimit {
            limit: WITHDRAWAL_LIMIT,
        });
    }
    let old = account.balance();
    account.debit(amount);
    Ok((old, account.balance()))
}

/// PIN format (exactly four digits) is the caller's gate; the engine checks
/// the transition rules and records the change in the ledger.
pub fn change_pin(
    account: &mut Account,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), Error> {
    if !account.pin_matches(current) {
        return Err(Error::WrongCurrentPin);
    }
    if account.pin_matches(new) {
        return Err(Error::SamePin);
    }
    if new != confirm {
        return Err(Error::PinMismatch);
    }
    account.set_pin(new.to_owned());
    Ok(())
}

/// Pure read; no ledger entry.
pub fn view_balance(account: &Account) -> (&str, Decimal) {
    (account.holder(), account.balance())
}

/// The five most recent transactions, most recent first.
pub fn mini_statement(account: &Account) -> Vec<&Transaction> {
    account.ledger().last_n(MINI_STATEMENT_LEN)
}

/// Drives a stream of session commands against the account store. Rejected
/// commands go to the dead-letter queue and the run continues; the store is
/// never left partially updated.
#[derive(Debug)]
pub struct Engine<I, D>
where
    I: CommandStream,
    D: DeadLetterQueue,
{
    ingestion: I,
    store: AccountStore,
    dlq: D,
    session: Option<String>,
}

impl<I, D> Engine<I, D>
where
    I: CommandStream,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, store: AccountStore, dlq: D) -> Self {
        Self {
            ingestion,
            store,
            dlq,
            session: None,
        }
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut commands = self.ingestion.stream();

        while let Some(cmd) = commands.next().await {
            match cmd {
                Ok(cmd) => match self.apply(cmd) {
                    Ok(()) => {}
                    Err(e) => self.dlq.report(&e),
                },
                Err(e) => self.dlq.report(&e),
            }
        }

        Ok(())
    }

    fn apply(&mut self, cmd: Command) -> Result<(), Error> {
        match cmd {
            Command::Create {
                number,
                holder,
                pin,
                initial_balance,
            } => {
                let account = self.store.create(number, holder, pin, initial_balance)?;
                info!(account = account.number(), "account created");
                Ok(())
            }
            Command::Login { number, pin } => {
                self.session = None;
                let account = auth::authenticate(&mut self.store, &number, &pin)?;
                info!(account = account.number(), "login successful");
                self.session = Some(number);
                Ok(())
            }
            Command::Logout => {
                self.session = None;
                Ok(())
            }
            Command::Deposit { amount } => {
                let account = self.session_account()?;
                let (old, new) = deposit(account, amount)?;
                println!("deposit,{},{},{}", amount, old.round_dp(2), new.round_dp(2));
                Ok(())
            }
            Command::Withdraw { amount } => {
                let account = self.session_account()?;
                let (old, new) = withdraw(account, amount)?;
                println!(
                    "withdrawal,{},{},{}",
                    amount,
                    old.round_dp(2),
                    new.round_dp(2)
                );
                Ok(())
            }
            Command::ChangePin {
                current,
                new,
                confirm,
            } => {
                let account = self.session_account()?;
                change_pin(account, &current, &new, &confirm)?;
                info!(account = account.number(), "PIN changed");
                Ok(())
            }
            Command::Balance => {
                let account = self.session_account()?;
                let (holder, balance) = view_balance(account);
                println!("balance,{},{}", holder, balance.round_dp(2));
                Ok(())
            }
            Command::Statement => {
                let account = self.session_account()?;
                for tx in mini_statement(account) {
                    println!("statement,{}", tx);
                }
                Ok(())
            }
            Command::ListAccounts => {
                for (number, holder) in self.store.list_all() {
                    println!("list,{},{}", number, holder);
                }
                Ok(())
            }
            Command::DeleteAccount { number } => {
                if !self.store.delete(&number) {
                    return Err(Error::NotFound(number));
                }
                if self.session.as_deref() == Some(number.as_str()) {
                    self.session = None;
                }
                info!(account = %number, "account deleted");
                Ok(())
            }
        }
    }

    fn session_account(&mut self) -> Result<&mut Account, Error> {
        let number = self.session.as_deref().ok_or(Error::NoSession)?;
        self.store
            .lookup_mut(number)
            .ok_or_else(|| Error::NotFound(number.to_owned()))
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    pub fn flush(&self) -> Result<(), Error> {
        self.store.flush(&mut std::io::stdout().lock())
    }
}
