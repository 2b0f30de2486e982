//! Single-entry lock for sale operations that move tokens.
//!
//! Deposits and withdrawals move the payment token. Settlement moves the sale
//! token and, when staking, calls into the external pool. While any of these
//! runs, a flag sits in instance storage and nested entry is refused.

use crate::errors::SaleError;
use soroban_sdk::{symbol_short, Env, Symbol};

const SALE_LOCK_KEY: Symbol = symbol_short!("sale_lock");

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().has(&SALE_LOCK_KEY)
}

/// Run `op` while holding the sale lock.
///
/// The flag is removed again whatever `op` returns; on a failed invocation
/// the host rolls it back along with every other write.
///
/// # Errors
/// * `OperationNotAllowed` if another token-moving operation is in progress
pub fn with_sale_lock<F, R>(env: &Env, op: F) -> Result<R, SaleError>
where
    F: FnOnce() -> Result<R, SaleError>,
{
    if is_locked(env) {
        return Err(SaleError::OperationNotAllowed);
    }

    env.storage().instance().set(&SALE_LOCK_KEY, &true);
    let outcome = op();
    env.storage().instance().remove(&SALE_LOCK_KEY);
    outcome
}
