//! Post-sale settlement: participant claims and owner recovery.
//!
//! Everything here runs after `end_time` (except the staking-pool setter, which
//! must happen before it) and inside the payment guard. Ledger writes happen
//! before any token leaves the contract.
//!
//! Conservation: a participant receives `entitlement - staked` on claim and at
//! most `entitlement` in total across stakes and claim. Unsold supply can be
//! recovered once. Together these never exceed `total_distributable`.

use crate::allocation;
use crate::errors::SaleError;
use crate::events::{
    emit_claim, emit_claim_and_stake, emit_sale_funds_swept, emit_staking_pool_set,
    emit_unclaimed_recovered, emit_unsold_recovered,
};
use crate::init::{SaleConfig, SaleInitializer};
use crate::ledger::{LedgerStorage, Participant};
use crate::owner::OwnerStorage;
use crate::phase::{require_cooldown_elapsed, require_ended, require_not_ended};
use crate::reentrancy::with_sale_lock;
use crate::staking::{StakingPoolClient, MIN_STAKE_LOCK_SECS};
use soroban_sdk::{log, symbol_short, token, Address, Env, Symbol};

const STAKING_POOL_KEY: Symbol = symbol_short!("stk_pool");
const UNSOLD_RECOVERED_KEY: Symbol = symbol_short!("unsld_rec");

pub struct Settlement;

impl Settlement {
    /// Tokens the participant can still take out, by claim or by stake.
    pub fn remaining_entitlement(
        env: &Env,
        config: &SaleConfig,
        record: &Participant,
    ) -> Result<i128, SaleError> {
        if record.claimed {
            return Ok(0);
        }
        let total = LedgerStorage::total_provided(env);
        let full = allocation::entitlement(env, config, total, record.provided)?;
        Ok((full - record.staked).max(0))
    }

    /// Transfer the participant's remaining entitlement and close their record.
    ///
    /// # Errors
    /// * `SaleNotEnded` before `end_time`
    /// * `AlreadyClaimed` on a second claim
    /// * `EmptyBalance` if the participant has nothing provided
    /// * `InsufficientSupply` if the contract no longer holds the tokens owed
    pub fn claim(env: &Env, participant: &Address) -> Result<i128, SaleError> {
        participant.require_auth();
        let config = SaleInitializer::get_config(env)?;
        require_ended(env, &config)?;

        with_sale_lock(env, || {
            let mut record = LedgerStorage::get(env, participant).ok_or(SaleError::EmptyBalance)?;
            if record.claimed {
                return Err(SaleError::AlreadyClaimed);
            }
            if record.provided <= 0 {
                return Err(SaleError::EmptyBalance);
            }

            let payout = Self::remaining_entitlement(env, &config, &record)?;
            let contract = env.current_contract_address();
            let sale_token = token::Client::new(env, &config.sale_token);
            if sale_token.balance(&contract) < payout {
                return Err(SaleError::InsufficientSupply);
            }

            record.claimed = true;
            LedgerStorage::store(env, participant, &record);

            if payout > 0 {
                sale_token.transfer(&contract, participant, &payout);
            }

            emit_claim(env, participant, record.provided, payout);
            Ok(payout)
        })
    }

    /// Forward part of the participant's entitlement to the staking pool.
    ///
    /// # Errors
    /// * `SaleNotEnded` before `end_time`
    /// * `StakingPoolNotSet` if no pool was authorized
    /// * `InvalidDuration` if `lock_duration < MIN_STAKE_LOCK_SECS`
    /// * `AlreadyClaimed` once the participant claimed
    /// * `InvalidAmount` unless `0 < amount <= remaining entitlement`
    pub fn claim_and_stake(
        env: &Env,
        participant: &Address,
        amount: i128,
        lock_duration: u64,
    ) -> Result<(), SaleError> {
        participant.require_auth();
        let config = SaleInitializer::get_config(env)?;
        require_ended(env, &config)?;

        let pool = Self::staking_pool(env).ok_or(SaleError::StakingPoolNotSet)?;
        if lock_duration < MIN_STAKE_LOCK_SECS {
            return Err(SaleError::InvalidDuration);
        }

        with_sale_lock(env, || {
            let mut record = LedgerStorage::get_or_empty(env, participant);
            if record.claimed {
                return Err(SaleError::AlreadyClaimed);
            }

            let remaining = Self::remaining_entitlement(env, &config, &record)?;
            if amount <= 0 || amount > remaining {
                return Err(SaleError::InvalidAmount);
            }

            let contract = env.current_contract_address();
            let sale_token = token::Client::new(env, &config.sale_token);
            if sale_token.balance(&contract) < amount {
                return Err(SaleError::InsufficientSupply);
            }

            record.staked += amount;
            LedgerStorage::store(env, participant, &record);

            sale_token.transfer(&contract, &pool, &amount);
            StakingPoolClient::new(env, &pool).deposit_for(participant, &amount, &lock_duration);

            log!(env, "staked on claim", participant.clone(), amount, lock_duration);
            emit_claim_and_stake(env, participant, amount, lock_duration);
            Ok(())
        })
    }

    /// Authorize the pool that `claim_and_stake` forwards to.
    ///
    /// # Errors
    /// * `NotOwner` for any caller but the owner
    /// * `SaleEnded` once the sale has ended
    /// * `InvalidAddress` if `pool` is this contract
    pub fn set_staking_pool(env: &Env, owner: &Address, pool: &Address) -> Result<(), SaleError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = SaleInitializer::get_config(env)?;
        require_not_ended(env, &config)?;

        if *pool == env.current_contract_address() {
            return Err(SaleError::InvalidAddress);
        }

        env.storage().instance().set(&STAKING_POOL_KEY, pool);
        emit_staking_pool_set(env, pool);
        Ok(())
    }

    pub fn staking_pool(env: &Env) -> Option<Address> {
        env.storage().instance().get(&STAKING_POOL_KEY)
    }

    /// Send every unit of the payment token held by the sale to the owner.
    ///
    /// # Errors
    /// * `NotOwner`, `SaleNotEnded`
    /// * `EmptyBalance` if nothing is left to sweep
    pub fn sweep_sale_funds(env: &Env, owner: &Address) -> Result<i128, SaleError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = SaleInitializer::get_config(env)?;
        require_ended(env, &config)?;

        with_sale_lock(env, || {
            let contract = env.current_contract_address();
            let payment = token::Client::new(env, &config.payment_token);
            let balance = payment.balance(&contract);
            if balance <= 0 {
                return Err(SaleError::EmptyBalance);
            }

            payment.transfer(&contract, owner, &balance);
            emit_sale_funds_swept(env, owner, balance);
            Ok(balance)
        })
    }

    /// Return the part of the supply that the floor price left unsold.
    ///
    /// # Errors
    /// * `NotOwner`, `SaleNotEnded`
    /// * `SaleNotUndersubscribed` if `total_provided >= minimal_provide_threshold`
    /// * `NothingToWithdraw` if already recovered or custody no longer covers the unsold part
    pub fn recover_unsold_supply(env: &Env, owner: &Address) -> Result<i128, SaleError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = SaleInitializer::get_config(env)?;
        require_ended(env, &config)?;

        let total = LedgerStorage::total_provided(env);
        if total >= config.minimal_provide_threshold {
            return Err(SaleError::SaleNotUndersubscribed);
        }

        with_sale_lock(env, || {
            if Self::unsold_recovered(env) {
                return Err(SaleError::NothingToWithdraw);
            }
            let unsold = allocation::unsold_supply(env, &config, total)?;
            if unsold <= 0 {
                return Err(SaleError::NothingToWithdraw);
            }

            let contract = env.current_contract_address();
            let sale_token = token::Client::new(env, &config.sale_token);
            // unclaimed recovery may already have emptied custody
            if sale_token.balance(&contract) < unsold {
                return Err(SaleError::NothingToWithdraw);
            }

            env.storage().instance().set(&UNSOLD_RECOVERED_KEY, &true);
            sale_token.transfer(&contract, owner, &unsold);

            emit_unsold_recovered(env, owner, unsold);
            Ok(unsold)
        })
    }

    pub fn unsold_recovered(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&UNSOLD_RECOVERED_KEY)
            .unwrap_or(false)
    }

    /// After the cool-down, return every sale token still held by the contract.
    ///
    /// # Errors
    /// * `NotOwner`
    /// * `CooldownActive` before `end_time + UNCLAIMED_COOLDOWN_SECS`
    /// * `NothingToWithdraw` if the contract holds no sale tokens
    pub fn recover_unclaimed_supply(env: &Env, owner: &Address) -> Result<i128, SaleError> {
        OwnerStorage::require_owner(env, owner)?;
        let config = SaleInitializer::get_config(env)?;
        require_cooldown_elapsed(env, &config)?;

        with_sale_lock(env, || {
            let contract = env.current_contract_address();
            let sale_token = token::Client::new(env, &config.sale_token);
            let balance = sale_token.balance(&contract);
            if balance <= 0 {
                return Err(SaleError::NothingToWithdraw);
            }

            sale_token.transfer(&contract, owner, &balance);
            emit_unclaimed_recovered(env, owner, balance);
            Ok(balance)
        })
    }
}
