//! Authentication and lockout state machine.
//!
//! An account moves from unauthenticated to authenticated on a matching PIN,
//! or to locked after three consecutive failures. Lockout is one-way within
//! the core; unlocking is an administrative action that does not exist here.

use crate::domain::{Account, Error};
use crate::store::AccountStore;

/// Authenticates against the store. A locked account is rejected before any
/// PIN comparison and counts no further attempts. On success the failed
/// attempt counter resets and the caller holds the returned account for the
/// rest of its session.
pub fn authenticate<'a>(
    store: &'a mut AccountStore,
    number: &str,
    pin: &str,
) -> Result<&'a mut Account, Error> {
    let account = store
        .lookup_mut(number)
        .ok_or_else(|| Error::NotFound(number.to_owned()))?;

    if account.locked() {
        return Err(Error::AlreadyLocked(number.to_owned()));
    }

    account.check_pin(pin)?;
    Ok(account)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::authenticate;
    use crate::domain::Error;
    use crate::store::AccountStore;

    fn store() -> AccountStore {
        let mut store = AccountStore::new();
        store
            .create(
                "123456789".into(),
                "John Smith".into(),
                "1234".into(),
                Decimal::from(1500),
            )
            .unwrap();
        store
    }

    #[test]
    fn unknown_account_is_not_found() {
        let mut store = store();
        let err = authenticate(&mut store, "000000", "1234").unwrap_err();
        assert!(matches!(err, Error::NotFound(n) if n == "000000"));
    }

    #[test]
    fn three_failures_lock_and_the_fourth_is_rejected_early() {
        let mut store = store();

        for remaining in [2u8, 1] {
            let err = authenticate(&mut store, "123456789", "0000").unwrap_err();
            assert!(matches!(err, Error::Rejected { remaining: r } if r == remaining));
        }
        let err = authenticate(&mut store, "123456789", "0000").unwrap_err();
        assert!(matches!(err, Error::LockedOut));
        assert!(store.lookup("123456789").unwrap().locked());

        // Fourth call never reaches PIN comparison, even with the right PIN,
        // and the counter stays where lockout left it.
        let err = authenticate(&mut store, "123456789", "1234").unwrap_err();
        assert!(matches!(err, Error::AlreadyLocked(_)));
        assert_eq!(store.lookup("123456789").unwrap().failed_attempts(), 3);
    }

    #[test]
    fn success_resets_the_counter_from_any_prior_value() {
        let mut store = store();
        let _ = authenticate(&mut store, "123456789", "0000");
        let _ = authenticate(&mut store, "123456789", "0000");
        assert_eq!(store.lookup("123456789").unwrap().failed_attempts(), 2);

        let account = authenticate(&mut store, "123456789", "1234").unwrap();
        assert_eq!(account.failed_attempts(), 0);
    }
}
