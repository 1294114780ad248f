use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    PinChange,
}

/// A single ledger entry. Created by the operations engine, never mutated,
/// owned solely by its account's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_after: Decimal,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            amount,
            balance_after,
        }
    }
}

impl core::fmt::Display for Transaction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            TransactionKind::PinChange => write!(
                f,
                "{:?},time={},balance={}",
                self.kind,
                self.timestamp.to_rfc3339(),
                self.balance_after.round_dp(2)
            ),
            _ => write!(
                f,
                "{:?},time={},amount={},balance={}",
                self.kind,
                self.timestamp.to_rfc3339(),
                self.amount.round_dp(2),
                self.balance_after.round_dp(2)
            ),
        }
    }
}

/// Aggregate view over a time window, produced by `Ledger::summary`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionSummary {
    pub deposit_count: usize,
    pub deposit_total: Decimal,
    pub withdrawal_count: usize,
    pub withdrawal_total: Decimal,
}

impl TransactionSummary {
    pub fn total_transactions(&self) -> usize {
        self.deposit_count + self.withdrawal_count
    }
}
