//! Staking-pool collaborator.
//!
//! The pool is an external contract. The sale only transfers tokens to it and
//! tells it whom they belong to; lock bookkeeping is the pool's business.

use soroban_sdk::{contractclient, Address, Env};

/// Minimum lock a claim-and-stake may request: 10 minutes.
pub const MIN_STAKE_LOCK_SECS: u64 = 600;

#[contractclient(name = "StakingPoolClient")]
pub trait StakingPool {
    /// Credit `amount` tokens, already transferred to the pool, to `participant`
    /// with a lock of `lock_duration` seconds.
    fn deposit_for(env: Env, participant: Address, amount: i128, lock_duration: u64);
}
