use rust_decimal::Decimal;

/// A parsed session-script verb. Produced by the ingestion layer, consumed by
/// the engine's command loop. Operation verbs act on the current session's
/// account; `Create`, `ListAccounts` and `DeleteAccount` are administrative.
#[derive(Debug, Clone)]
pub enum Command {
    Create {
        number: String,
        holder: String,
        pin: String,
        initial_balance: Decimal,
    },
    Login {
        number: String,
        pin: String,
    },
    Logout,
    Deposit {
        amount: Decimal,
    },
    Withdraw {
        amount: Decimal,
    },
    ChangePin {
        current: String,
        new: String,
        confirm: String,
    },
    Balance,
    Statement,
    ListAccounts,
    DeleteAccount {
        number: String,
    },
}
