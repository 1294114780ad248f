pub mod account;
pub mod command;
pub mod error;
pub mod ledger;
pub mod traits;
pub mod transaction;

pub use account::{Account, MAX_FAILED_ATTEMPTS};
pub use command::Command;
pub use error::Error;
pub use ledger::Ledger;
pub use traits::{CommandStream, DeadLetterQueue};
pub use transaction::{Transaction, TransactionKind, TransactionSummary};
