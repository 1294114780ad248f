use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Persistence failed with: {0}")]
    Persistence(String),

    #[error("Account {0} not found")]
    NotFound(String),

    #[error("Account {0} is locked")]
    AlreadyLocked(String),

    #[error("Incorrect PIN, {remaining} attempt(s) remaining")]
    Rejected { remaining: u8 },

    #[error("Account locked after too many failed PIN attempts")]
    LockedOut,

    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient funds, available balance is {available}")]
    InsufficientFunds { available: Decimal },

    #[error("Withdrawal amount exceeds the {limit} per-transaction limit")]
    WithdrawalLimit { limit: Decimal },

    #[error("Deposit amount exceeds the {limit} per-transaction limit")]
    DepositLimit { limit: Decimal },

    #[error("Current PIN is incorrect")]
    WrongCurrentPin,

    #[error("New PIN must differ from the current PIN")]
    SamePin,

    #[error("New PIN and confirmation do not match")]
    PinMismatch,

    #[error("Account {0} already exists")]
    DuplicateAccount(String),

    #[error("No authenticated session")]
    NoSession,
}
