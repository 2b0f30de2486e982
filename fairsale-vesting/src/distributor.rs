//! Scheduled and unscheduled releases to the owner.
//!
//! Two independent counters live here. `released` follows the monthly table
//! and only ever grows to the cumulative amount of the current period.
//! `unscheduled_released` grows through the request path: the owner asks for
//! an amount, waits `request_delay_secs`, then claims it. Only one request can
//! be outstanding at a time.

use crate::errors::VestingError;
use crate::events::{
    emit_release, emit_request_cancelled, emit_request_release, emit_unscheduled_release,
};
use crate::init::{VestingConfig, VestingInitializer};
use crate::owner::OwnerStorage;
use crate::schedule;
use soroban_sdk::{contracttype, log, symbol_short, token, Address, Env, Symbol};

const RELEASED_KEY: Symbol = symbol_short!("released");
const UNSCHEDULED_RELEASED_KEY: Symbol = symbol_short!("unsch_rel");
const REQUEST_KEY: Symbol = symbol_short!("request");

/// An unscheduled release waiting out its delay.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingRelease {
    pub amount: i128,
    pub ready_at: u64,
}

/// Unscheduled-release slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestState {
    Idle,
    Pending(PendingRelease),
}

pub struct VestingStorage;

impl VestingStorage {
    pub fn released(env: &Env) -> i128 {
        env.storage().instance().get(&RELEASED_KEY).unwrap_or(0)
    }

    fn set_released(env: &Env, amount: i128) {
        env.storage().instance().set(&RELEASED_KEY, &amount);
    }

    pub fn unscheduled_released(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&UNSCHEDULED_RELEASED_KEY)
            .unwrap_or(0)
    }

    fn set_unscheduled_released(env: &Env, amount: i128) {
        env.storage()
            .instance()
            .set(&UNSCHEDULED_RELEASED_KEY, &amount);
    }

    pub fn request(env: &Env) -> RequestState {
        env.storage()
            .instance()
            .get(&REQUEST_KEY)
            .unwrap_or(RequestState::Idle)
    }

    fn set_request(env: &Env, state: &RequestState) {
        env.storage().instance().set(&REQUEST_KEY, state);
    }
}

pub struct Distributor;

impl Distributor {
    /// Current period, or `None` before `start_time`.
    pub fn current_period(env: &Env, config: &VestingConfig) -> Option<u32> {
        schedule::period_at(
            config.start_time,
            config.period_secs,
            config.last_period(),
            env.ledger().timestamp(),
        )
    }

    /// Scheduled tokens that `release` would transfer right now.
    pub fn releasable(env: &Env, config: &VestingConfig) -> Result<i128, VestingError> {
        let Some(period) = Self::current_period(env, config) else {
            return Ok(0);
        };
        let unlocked = schedule::cumulative_at(&config.steps, period)?;
        Ok((unlocked - VestingStorage::released(env)).max(0))
    }

    /// Transfer everything the schedule has unlocked so far to the owner.
    ///
    /// # Errors
    /// * `NotOwner`
    /// * `VestingNotStarted` before `start_time`
    /// * `NothingToRelease` if the current period adds nothing new
    pub fn release(env: &Env, owner: &Address) -> Result<i128, VestingError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = VestingInitializer::get_config(env)?;

        let period = Self::current_period(env, &config).ok_or(VestingError::VestingNotStarted)?;
        let unlocked = schedule::cumulative_at(&config.steps, period)?;
        let released = VestingStorage::released(env);
        let amount = unlocked - released;
        if amount <= 0 {
            return Err(VestingError::NothingToRelease);
        }

        VestingStorage::set_released(env, unlocked);
        let contract = env.current_contract_address();
        token::Client::new(env, &config.token).transfer(&contract, owner, &amount);

        log!(env, "scheduled release", period, amount);
        emit_release(env, period, amount, unlocked);
        Ok(amount)
    }

    /// Unscheduled fund still available for requests.
    pub fn requestable(env: &Env, config: &VestingConfig) -> i128 {
        config.unscheduled_cap - VestingStorage::unscheduled_released(env)
    }

    /// Open a request for `amount` of the unscheduled fund. Returns the time it
    /// becomes claimable.
    ///
    /// # Errors
    /// * `NotOwner`
    /// * `PendingRequest` while another request is outstanding
    /// * `InvalidAmount` unless `0 < amount <= requestable`
    pub fn request_unscheduled(
        env: &Env,
        owner: &Address,
        amount: i128,
    ) -> Result<u64, VestingError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = VestingInitializer::get_config(env)?;

        if let RequestState::Pending(_) = VestingStorage::request(env) {
            return Err(VestingError::PendingRequest);
        }
        if amount <= 0 || amount > Self::requestable(env, &config) {
            return Err(VestingError::InvalidAmount);
        }

        let ready_at = env
            .ledger()
            .timestamp()
            .saturating_add(config.request_delay_secs);
        VestingStorage::set_request(env, &RequestState::Pending(PendingRelease { amount, ready_at }));

        emit_request_release(env, amount, ready_at);
        Ok(ready_at)
    }

    /// Pay out the pending request once its delay has passed.
    ///
    /// # Errors
    /// * `NotOwner`
    /// * `NoPendingRequest` when idle
    /// * `RequestNotReady` before `ready_at`
    pub fn claim_unscheduled(env: &Env, owner: &Address) -> Result<i128, VestingError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = VestingInitializer::get_config(env)?;

        let pending = match VestingStorage::request(env) {
            RequestState::Idle => return Err(VestingError::NoPendingRequest),
            RequestState::Pending(pending) => pending,
        };
        if env.ledger().timestamp() < pending.ready_at {
            return Err(VestingError::RequestNotReady);
        }

        let total = VestingStorage::unscheduled_released(env)
            .checked_add(pending.amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        VestingStorage::set_unscheduled_released(env, total);
        VestingStorage::set_request(env, &RequestState::Idle);

        let contract = env.current_contract_address();
        token::Client::new(env, &config.token).transfer(&contract, owner, &pending.amount);

        emit_unscheduled_release(env, pending.amount, total);
        Ok(pending.amount)
    }

    /// Drop the pending request without paying it.
    ///
    /// # Errors
    /// * `NotOwner`
    /// * `NoPendingRequest` when idle
    pub fn cancel_unscheduled(env: &Env, owner: &Address) -> Result<i128, VestingError> {
        OwnerStorage::require_owner(env, owner)?;

        let pending = match VestingStorage::request(env) {
            RequestState::Idle => return Err(VestingError::NoPendingRequest),
            RequestState::Pending(pending) => pending,
        };
        VestingStorage::set_request(env, &RequestState::Idle);

        emit_request_cancelled(env, pending.amount, pending.ready_at);
        Ok(pending.amount)
    }
}
