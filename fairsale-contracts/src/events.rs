//! Sale events for indexers and audit.
//!
//! Topics are single short symbols; payloads are plain tuples in the order
//! listed on each emitter.

use crate::init::SaleConfig;
use soroban_sdk::{symbol_short, Address, Env};

/// `sale_init`: (owner, start_time, end_time, total_distributable, minimal_provide_threshold)
pub fn emit_sale_initialized(env: &Env, owner: &Address, config: &SaleConfig) {
    env.events().publish(
        (symbol_short!("sale_init"),),
        (
            owner.clone(),
            config.start_time,
            config.end_time,
            config.total_distributable,
            config.minimal_provide_threshold,
        ),
    );
}

/// `own_trf`: (old_owner, new_owner, timestamp)
pub fn emit_ownership_transferred(env: &Env, old_owner: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("own_trf"),),
        (old_owner.clone(), new_owner.clone(), env.ledger().timestamp()),
    );
}

/// `deposit`: (participant, amount)
pub fn emit_deposit(env: &Env, participant: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("deposit"),), (participant.clone(), amount));
}

/// `withdraw`: (participant, amount)
pub fn emit_withdraw(env: &Env, participant: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("withdraw"),), (participant.clone(), amount));
}

/// `claim`: (participant, provided, tokens_transferred)
pub fn emit_claim(env: &Env, participant: &Address, provided: i128, tokens: i128) {
    env.events().publish(
        (symbol_short!("claim"),),
        (participant.clone(), provided, tokens),
    );
}

/// `clm_stake`: (participant, amount, lock_duration)
pub fn emit_claim_and_stake(env: &Env, participant: &Address, amount: i128, lock_duration: u64) {
    env.events().publish(
        (symbol_short!("clm_stake"),),
        (participant.clone(), amount, lock_duration),
    );
}

/// `pool_set`: (pool)
pub fn emit_staking_pool_set(env: &Env, pool: &Address) {
    env.events()
        .publish((symbol_short!("pool_set"),), (pool.clone(),));
}

/// `sweep`: (owner, amount)
pub fn emit_sale_funds_swept(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("sweep"),), (owner.clone(), amount));
}

/// `rec_unsld`: (owner, amount)
pub fn emit_unsold_recovered(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("rec_unsld"),), (owner.clone(), amount));
}

/// `rec_uncl`: (owner, amount)
pub fn emit_unclaimed_recovered(env: &Env, owner: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("rec_uncl"),), (owner.clone(), amount));
}
