use tracing::warn;

use crate::domain::{DeadLetterQueue, Error};

/// Reports rejected commands on stderr; the run itself keeps going.
#[derive(Default, Debug)]
pub struct StdErrDlq {}

impl DeadLetterQueue for StdErrDlq {
    fn report(&self, error: &Error) {
        warn!(%error, "command rejected");
        eprintln!("DLQ Report - Error: {}", error);
    }
}
