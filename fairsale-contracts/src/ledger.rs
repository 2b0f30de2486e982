//! Deposit ledger: per-participant balances and the global total.
//!
//! Every participant carries two numbers. `provided` is what they currently
//! hold in the sale and drops on withdrawal. `accumulated` is everything they
//! ever deposited and never drops. The lock curve is evaluated against
//! `accumulated`, so withdrawing and re-depositing cannot lower a lock.
//!
//! Invariants kept by every mutation here:
//! - `0 <= provided <= accumulated`
//! - `total_provided == sum(provided)`

use crate::curve;
use crate::errors::SaleError;
use crate::events::{emit_deposit, emit_withdraw};
use crate::init::{SaleConfig, SaleInitializer};
use crate::phase::require_open;
use crate::reentrancy::with_sale_lock;
use soroban_sdk::{contracttype, log, symbol_short, token, Address, Env, Symbol};

const PARTICIPANT_KEY: Symbol = symbol_short!("part");
const TOTAL_PROVIDED_KEY: Symbol = symbol_short!("tot_prov");
const PARTICIPANT_COUNT_KEY: Symbol = symbol_short!("part_cnt");

/// Ledger entry for one participant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    /// Currently held deposit
    pub provided: i128,
    /// Lifetime sum of deposits
    pub accumulated: i128,
    /// Sale tokens already forwarded to the staking pool
    pub staked: i128,
    /// Set once the final claim went through
    pub claimed: bool,
}

impl Participant {
    fn empty() -> Self {
        Participant {
            provided: 0,
            accumulated: 0,
            staked: 0,
            claimed: false,
        }
    }
}

pub struct LedgerStorage;

impl LedgerStorage {
    fn key(participant: &Address) -> (Symbol, Address) {
        (PARTICIPANT_KEY, participant.clone())
    }

    pub fn get(env: &Env, participant: &Address) -> Option<Participant> {
        env.storage().persistent().get(&Self::key(participant))
    }

    /// Entry for `participant`, or an all-zero entry if they never deposited.
    pub fn get_or_empty(env: &Env, participant: &Address) -> Participant {
        Self::get(env, participant).unwrap_or_else(Participant::empty)
    }

    pub fn store(env: &Env, participant: &Address, record: &Participant) {
        env.storage()
            .persistent()
            .set(&Self::key(participant), record);
    }

    pub fn total_provided(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&TOTAL_PROVIDED_KEY)
            .unwrap_or(0)
    }

    fn set_total_provided(env: &Env, total: i128) {
        env.storage().instance().set(&TOTAL_PROVIDED_KEY, &total);
    }

    pub fn participant_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&PARTICIPANT_COUNT_KEY)
            .unwrap_or(0)
    }

    fn increment_participant_count(env: &Env) {
        let next = Self::participant_count(env).saturating_add(1);
        env.storage().instance().set(&PARTICIPANT_COUNT_KEY, &next);
    }
}

pub struct DepositLedger;

impl DepositLedger {
    /// Accept `amount` of the payment token from `participant`.
    ///
    /// # Errors
    /// * `SaleNotStarted` / `SaleEnded` outside the deposit window
    /// * `InvalidAmount` if `amount <= 0`
    /// * `InsufficientSupply` if the contract holds less than the full distributable supply
    pub fn deposit(env: &Env, participant: &Address, amount: i128) -> Result<(), SaleError> {
        participant.require_auth();

        with_sale_lock(env, || {
            let config = SaleInitializer::get_config(env)?;
            require_open(env, &config)?;

            if amount <= 0 {
                return Err(SaleError::InvalidAmount);
            }

            let contract = env.current_contract_address();
            let supply = token::Client::new(env, &config.sale_token).balance(&contract);
            if supply < config.total_distributable {
                return Err(SaleError::InsufficientSupply);
            }

            let existing = LedgerStorage::get(env, participant);
            let is_new = existing.is_none();
            let mut record = existing.unwrap_or_else(Participant::empty);

            record.provided = record
                .provided
                .checked_add(amount)
                .ok_or(SaleError::ArithmeticOverflow)?;
            record.accumulated = record
                .accumulated
                .checked_add(amount)
                .ok_or(SaleError::ArithmeticOverflow)?;
            let total = LedgerStorage::total_provided(env)
                .checked_add(amount)
                .ok_or(SaleError::ArithmeticOverflow)?;

            token::Client::new(env, &config.payment_token).transfer(participant, &contract, &amount);

            LedgerStorage::store(env, participant, &record);
            LedgerStorage::set_total_provided(env, total);
            if is_new {
                LedgerStorage::increment_participant_count(env);
            }

            log!(env, "deposit accepted", participant.clone(), amount, record.accumulated);
            emit_deposit(env, participant, amount);
            Ok(())
        })
    }

    /// Return `amount` of the payment token to `participant`.
    ///
    /// The remaining `provided` must stay at or above `locked(accumulated)`;
    /// `accumulated` itself is left untouched.
    ///
    /// # Errors
    /// * `SaleNotStarted` / `SaleEnded` outside the deposit window
    /// * `InvalidAmount` if `amount <= 0` or the withdrawal would cut into the lock
    /// * `InsufficientBalance` if `amount > provided`
    pub fn withdraw(env: &Env, participant: &Address, amount: i128) -> Result<(), SaleError> {
        participant.require_auth();

        with_sale_lock(env, || {
            let config = SaleInitializer::get_config(env)?;
            require_open(env, &config)?;

            if amount <= 0 {
                return Err(SaleError::InvalidAmount);
            }

            let mut record = LedgerStorage::get_or_empty(env, participant);
            if amount > record.provided {
                return Err(SaleError::InsufficientBalance);
            }

            let max_locked = curve::locked(record.accumulated, config.payment_unit());
            let remaining = record.provided - amount;
            if remaining < max_locked {
                log!(env, "withdraw below lock", participant.clone(), remaining, max_locked);
                return Err(SaleError::InvalidAmount);
            }

            record.provided = remaining;
            let total = LedgerStorage::total_provided(env) - amount;

            LedgerStorage::store(env, participant, &record);
            LedgerStorage::set_total_provided(env, total);

            let contract = env.current_contract_address();
            token::Client::new(env, &config.payment_token).transfer(&contract, participant, &amount);

            emit_withdraw(env, participant, amount);
            Ok(())
        })
    }

    /// `locked(accumulated)` for the participant as it stands.
    pub fn locked_now(env: &Env, config: &SaleConfig, participant: &Address) -> i128 {
        let record = LedgerStorage::get_or_empty(env, participant);
        curve::locked(record.accumulated, config.payment_unit())
    }

    /// Curve value of the participant's accumulated deposit.
    pub fn withdrawable_now(env: &Env, config: &SaleConfig, participant: &Address) -> i128 {
        let record = LedgerStorage::get_or_empty(env, participant);
        curve::withdrawable(record.accumulated, config.payment_unit())
    }

    /// Largest amount `withdraw` would accept right now.
    pub fn max_withdrawal(env: &Env, config: &SaleConfig, participant: &Address) -> i128 {
        let record = LedgerStorage::get_or_empty(env, participant);
        let lock = curve::locked(record.accumulated, config.payment_unit());
        (record.provided - lock).max(0)
    }

    /// `accumulated + extra`, without touching state.
    pub fn accumulated_after_deposit(
        env: &Env,
        participant: &Address,
        extra: i128,
    ) -> Result<i128, SaleError> {
        if extra < 0 {
            return Err(SaleError::InvalidAmount);
        }
        LedgerStorage::get_or_empty(env, participant)
            .accumulated
            .checked_add(extra)
            .ok_or(SaleError::ArithmeticOverflow)
    }

    /// `locked(accumulated + extra)`, without touching state.
    pub fn locked_after_deposit(
        env: &Env,
        config: &SaleConfig,
        participant: &Address,
        extra: i128,
    ) -> Result<i128, SaleError> {
        let accumulated = Self::accumulated_after_deposit(env, participant, extra)?;
        Ok(curve::locked(accumulated, config.payment_unit()))
    }
}
