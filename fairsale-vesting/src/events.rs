//! Vesting events.

use soroban_sdk::{symbol_short, Address, Env};

/// `vest_init`: (owner, token, start_time, scheduled_total, unscheduled_cap)
pub fn emit_vesting_initialized(
    env: &Env,
    owner: &Address,
    token: &Address,
    start_time: u64,
    scheduled_total: i128,
    unscheduled_cap: i128,
) {
    env.events().publish(
        (symbol_short!("vest_init"),),
        (
            owner.clone(),
            token.clone(),
            start_time,
            scheduled_total,
            unscheduled_cap,
        ),
    );
}

/// `vest_rel`: (period, amount, released_total)
pub fn emit_release(env: &Env, period: u32, amount: i128, released_total: i128) {
    env.events().publish(
        (symbol_short!("vest_rel"),),
        (period, amount, released_total),
    );
}

/// `req_rel`: (amount, ready_at)
pub fn emit_request_release(env: &Env, amount: i128, ready_at: u64) {
    env.events()
        .publish((symbol_short!("req_rel"),), (amount, ready_at));
}

/// `unsch_rel`: (amount, unscheduled_released_total)
pub fn emit_unscheduled_release(env: &Env, amount: i128, released_total: i128) {
    env.events()
        .publish((symbol_short!("unsch_rel"),), (amount, released_total));
}

/// `req_cncl`: (amount, ready_at)
pub fn emit_request_cancelled(env: &Env, amount: i128, ready_at: u64) {
    env.events()
        .publish((symbol_short!("req_cncl"),), (amount, ready_at));
}

/// `own_trf`: (old_owner, new_owner, timestamp)
pub fn emit_ownership_transferred(env: &Env, old_owner: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("own_trf"),),
        (old_owner.clone(), new_owner.clone(), env.ledger().timestamp()),
    );
}
