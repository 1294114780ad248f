use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionKind, TransactionSummary};

/// Bounded append-only transaction history, newest last. Overflow evicts the
/// oldest entries so that exactly the most recent `CAPACITY` remain.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: VecDeque<Transaction>,
}

impl Ledger {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    pub fn append(&mut self, tx: Transaction) {
        self.entries.push_back(tx);
        while self.entries.len() > Self::CAPACITY {
            self.entries.pop_front();
        }
    }

    /// The last `n` entries, most recent first. Fewer if the history is
    /// shorter, empty if there is none.
    pub fn last_n(&self, n: usize) -> Vec<&Transaction> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Count/total of deposits and withdrawals at or after `window_start`.
    /// The cutoff instant is the caller's to build; no calendar arithmetic
    /// happens here.
    pub fn summary(&self, window_start: DateTime<Utc>) -> TransactionSummary {
        let mut summary = TransactionSummary::default();
        for tx in self.entries.iter().filter(|tx| tx.timestamp >= window_start) {
            match tx.kind {
                TransactionKind::Deposit => {
                    summary.deposit_count += 1;
                    summary.deposit_total += tx.amount;
                }
                TransactionKind::Withdrawal => {
                    summary.withdrawal_count += 1;
                    summary.withdrawal_total += tx.amount;
                }
                TransactionKind::PinChange => {}
            }
        }
        summary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }
}
