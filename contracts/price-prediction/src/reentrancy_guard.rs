use soroban_sdk::Env;

use crate::errors::Error;
use crate::storage::DataKey;

/// Cross-function reentrancy guard.
///
/// Held around every token transfer made by `bet_up`, `bet_down`, `claim`
/// and `claim_treasury`. The Soroban host already refuses to re-enter a
/// contract that is on the call stack, so a token callback fails before it
/// reaches this check; the flag is an extra layer that keeps the invariant
/// explicit in contract state. It lives in instance storage, and a failed
/// call reverts it together with everything else.
pub struct ReentrancyGuard;

impl ReentrancyGuard {
    /// Returns true if the lock is currently held.
    pub fn is_locked(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::ReentrancyLock)
            .unwrap_or(false)
    }

    /// Fails with `ReentrancyGuardActive` while the lock is held.
    pub fn check_reentrancy_state(env: &Env) -> Result<(), Error> {
        if Self::is_locked(env) {
            return Err(Error::ReentrancyGuardActive);
        }
        Ok(())
    }

    /// Takes the lock before an external call.
    pub fn before_external_call(env: &Env) -> Result<(), Error> {
        Self::check_reentrancy_state(env)?;
        env.storage()
            .instance()
            .set(&DataKey::ReentrancyLock, &true);
        Ok(())
    }

    /// Releases the lock once the external call has returned.
    pub fn after_external_call(env: &Env) {
        env.storage()
            .instance()
            .set(&DataKey::ReentrancyLock, &false);
    }

    /// Runs `call` with the lock held.
    pub fn guarded<T, F>(env: &Env, call: F) -> Result<T, Error>
    where
        F: FnOnce() -> Result<T, Error>,
    {
        Self::before_external_call(env)?;
        let result = call();
        Self::after_external_call(env);
        result
    }
}
