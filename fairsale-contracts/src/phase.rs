//! Time-gated sale phases.
//!
//! The phase is never stored: it is recomputed from the ledger timestamp and the
//! immutable window in [`SaleConfig`] on every call.

use crate::errors::SaleError;
use crate::init::SaleConfig;
use soroban_sdk::{contracttype, Env};

/// Delay after `end_time` before unclaimed supply may be recovered: 31 days.
pub const UNCLAIMED_COOLDOWN_SECS: u64 = 31 * 24 * 60 * 60;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    NotStarted,
    Open,
    Ended,
}

impl SalePhase {
    /// Phase of the sale at `now`.
    pub fn at(config: &SaleConfig, now: u64) -> Self {
        if now < config.start_time {
            SalePhase::NotStarted
        } else if now < config.end_time {
            SalePhase::Open
        } else {
            SalePhase::Ended
        }
    }

    pub fn current(env: &Env, config: &SaleConfig) -> Self {
        Self::at(config, env.ledger().timestamp())
    }
}

/// Deposits and withdrawals: only inside the window.
pub fn require_open(env: &Env, config: &SaleConfig) -> Result<(), SaleError> {
    match SalePhase::current(env, config) {
        SalePhase::NotStarted => Err(SaleError::SaleNotStarted),
        SalePhase::Open => Ok(()),
        SalePhase::Ended => Err(SaleError::SaleEnded),
    }
}

/// Claims, fund sweep and unsold-supply recovery: only after the window.
pub fn require_ended(env: &Env, config: &SaleConfig) -> Result<(), SaleError> {
    match SalePhase::current(env, config) {
        SalePhase::Ended => Ok(()),
        _ => Err(SaleError::SaleNotEnded),
    }
}

/// Staking-pool authorization: only before the window closes.
pub fn require_not_ended(env: &Env, config: &SaleConfig) -> Result<(), SaleError> {
    match SalePhase::current(env, config) {
        SalePhase::Ended => Err(SaleError::SaleEnded),
        _ => Ok(()),
    }
}

/// Unclaimed-supply recovery: only once the cool-down after `end_time` has passed.
pub fn require_cooldown_elapsed(env: &Env, config: &SaleConfig) -> Result<(), SaleError> {
    let unlock_at = config.end_time.saturating_add(UNCLAIMED_COOLDOWN_SECS);
    if env.ledger().timestamp() < unlock_at {
        return Err(SaleError::CooldownActive);
    }
    Ok(())
}
